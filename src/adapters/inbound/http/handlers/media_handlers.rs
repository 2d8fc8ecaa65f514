use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    adapters::inbound::http::{
        dto::{ApiError, ApiResponse, ApiResult},
        router::AppState,
    },
    ports::storage::MediaError,
};

/// GET /media/{*storage_id}: serve a stored blob
pub async fn serve_media(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let media = state.media.fetch(&storage_id).await.map_err(|e| match e {
        MediaError::NotFound(_) | MediaError::InvalidId(_) => {
            ApiError::not_found(format!("Media not found: {}", storage_id))
        }
        MediaError::Backend(message) => ApiError {
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
            error: Some(message),
        },
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, media.content_type),
            (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
        ],
        media.data,
    ))
}

pub async fn root() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .with_message("Agency content API is running"))
}

pub async fn health() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok" })))
}
