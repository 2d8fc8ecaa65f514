use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::multipart::read_image_upload;
use crate::{
    adapters::inbound::http::{
        auth::AdminSession,
        dto::{ApiError, ApiResponse, ApiResult, ImageDto},
        router::AppState,
    },
    domain::{errors::ContentError, value_objects::ResourceId},
};

fn image_id(raw: String) -> Result<ResourceId, ApiError> {
    ResourceId::new(raw.clone()).map_err(|_| ContentError::ImageNotFound { id: raw }.into())
}

/// POST /api/images/upload
pub async fn upload_image(
    _admin: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<ImageDto>>)> {
    let upload = read_image_upload(multipart).await?;
    let image = state.images.upload(upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(image.into()).with_message("Image uploaded successfully")),
    ))
}

/// GET /api/images: newest first
pub async fn list_images(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ImageDto>>>> {
    let images: Vec<ImageDto> = state
        .images
        .list()
        .await?
        .into_iter()
        .map(ImageDto::from)
        .collect();
    let count = images.len();
    Ok(Json(
        ApiResponse::ok(images)
            .with_count(count)
            .with_message("Images retrieved successfully"),
    ))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ImageDto>>> {
    let id = image_id(id)?;
    let image = state.images.get(&id).await?;
    Ok(Json(ApiResponse::ok(image.into())))
}

pub async fn replace_image(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<ApiResponse<ImageDto>>> {
    let id = image_id(id)?;
    let upload = read_image_upload(multipart).await?;
    let image = state.images.replace(&id, upload).await?;
    Ok(Json(
        ApiResponse::ok(image.into()).with_message("Image updated successfully"),
    ))
}

pub async fn delete_image(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = image_id(id)?;
    state.images.delete(&id).await?;
    Ok(Json(ApiResponse::message("Image deleted successfully")))
}
