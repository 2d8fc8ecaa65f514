use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::multipart::read_resource_form;
use crate::{
    adapters::inbound::http::{
        auth::AdminSession,
        dto::{
            resource_dtos, ApiError, ApiResponse, ApiResult, BulkRequest, BulkResultDto,
            GalleryStatsDto, ListParams, OrderRequest, ReorderRequest, ResourceDto,
            StatusRequest, ViewsDto,
        },
        router::AppState,
    },
    domain::{
        errors::{ContentError, ValidationError},
        models::{BulkAction, ResourcePage, ResourceQuery},
        value_objects::{Collection, ResourceId},
    },
};

type Listing = Json<ApiResponse<Vec<ResourceDto>>>;
type Single = Json<ApiResponse<ResourceDto>>;

/// A path id that cannot be a valid id can't name a stored resource either
fn path_id(collection: Collection, raw: String) -> Result<ResourceId, ApiError> {
    ResourceId::new(raw.clone()).map_err(|_| ContentError::not_found(collection, raw).into())
}

fn body_ids(ids: Option<Vec<String>>) -> Result<Vec<ResourceId>, ValidationError> {
    let ids = ids.filter(|ids| !ids.is_empty()).ok_or(ValidationError::EmptyIdList)?;
    ids.into_iter().map(ResourceId::new).collect()
}

fn listing(page: ResourcePage) -> Listing {
    let count = page.items.len();
    Json(
        ApiResponse::ok(resource_dtos(page.items))
            .with_count(count)
            .with_pagination(page.pagination),
    )
}

/// GET /: active resources in display order
pub async fn list_active(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Query(params): Query<ListParams>,
) -> ApiResult<Listing> {
    let query = ResourceQuery::try_from(params)?;
    let page = state.resources.list_active(collection, query).await?;
    Ok(listing(page))
}

/// GET /admin/all: every resource regardless of status
pub async fn list_all(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Query(params): Query<ListParams>,
) -> ApiResult<Listing> {
    let query = ResourceQuery::try_from(params)?;
    let page = state.resources.list_all(collection, query).await?;
    Ok(listing(page))
}

pub async fn get_resource(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> ApiResult<Single> {
    let id = path_id(collection, id)?;
    let resource = state.resources.get(collection, &id).await?;
    Ok(Json(ApiResponse::ok(resource.into())))
}

pub async fn create_resource(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Single)> {
    let form = read_resource_form(collection, multipart).await?;
    let resource = state
        .resources
        .create(collection, form.fields, form.media)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(resource.into())
                .with_message(format!("{} created successfully", collection.display_name())),
        ),
    ))
}

pub async fn update_resource(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Single> {
    let id = path_id(collection, id)?;
    let form = read_resource_form(collection, multipart).await?;
    let resource = state
        .resources
        .update(collection, &id, form.fields, form.media)
        .await?;

    Ok(Json(
        ApiResponse::ok(resource.into())
            .with_message(format!("{} updated successfully", collection.display_name())),
    ))
}

pub async fn delete_resource(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = path_id(collection, id)?;
    state.resources.delete(collection, &id).await?;
    Ok(Json(ApiResponse::message(format!(
        "{} deleted successfully",
        collection.display_name()
    ))))
}

pub async fn set_status(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> ApiResult<Single> {
    let id = path_id(collection, id)?;
    let resource = state
        .resources
        .set_status(collection, &id, &body.status)
        .await?;
    Ok(Json(
        ApiResponse::ok(resource.into()).with_message("Status updated successfully"),
    ))
}

/// PUT /admin/order: rewrite the order from a full or partial id list.
///
/// Unknown ids are a client error here, reported as 400.
pub async fn reorder(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Json(body): Json<ReorderRequest>,
) -> ApiResult<Listing> {
    let ids = body_ids(body.ids)?;
    let resources = state
        .ordering
        .reorder(collection, &ids)
        .await
        .map_err(|e| match e {
            ContentError::NotFound { .. } => ApiError::bad_request(e.to_string()),
            other => other.into(),
        })?;

    let count = resources.len();
    Ok(Json(
        ApiResponse::ok(resource_dtos(resources))
            .with_count(count)
            .with_message("Order updated successfully"),
    ))
}

/// PATCH /{id}/order
pub async fn set_order(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    Json(body): Json<OrderRequest>,
) -> ApiResult<Single> {
    let id = path_id(collection, id)?;
    let resource = state.resources.set_order(collection, &id, body.order).await?;
    Ok(Json(
        ApiResponse::ok(resource.into()).with_message("Order updated successfully"),
    ))
}

pub async fn stats(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> ApiResult<Json<ApiResponse<GalleryStatsDto>>> {
    let stats = state.resources.stats(collection).await?;
    Ok(Json(ApiResponse::ok(stats.into())))
}

pub async fn bulk(
    _admin: AdminSession,
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Json(body): Json<BulkRequest>,
) -> ApiResult<Json<ApiResponse<BulkResultDto>>> {
    let ids = body_ids(body.ids)?;
    let value = match body.action.trim() {
        "status" => body.data.status.as_deref(),
        "category" => body.data.category.as_deref(),
        _ => None,
    };
    let action = BulkAction::parse(&body.action, value)?;

    let affected = state.resources.bulk(collection, &ids, action).await?;
    let verb = match action {
        BulkAction::Delete => "deleted",
        _ => "updated",
    };

    Ok(Json(
        ApiResponse::ok(BulkResultDto { affected })
            .with_message(format!("{} items {} successfully", affected, verb)),
    ))
}

/// POST /{id}/view: public view counter
pub async fn record_view(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ViewsDto>>> {
    let id = path_id(collection, id)?;
    let views = state.resources.record_view(collection, &id).await?;
    Ok(Json(ApiResponse::ok(ViewsDto { views })))
}
