use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    adapters::inbound::http::{
        auth::AdminSession,
        dto::{ApiError, ApiResponse, ApiResult, ContactDto, ContactRequest, StatusRequest},
        router::AppState,
    },
    domain::{errors::ContentError, value_objects::ResourceId},
};

fn contact_id(raw: String) -> Result<ResourceId, ApiError> {
    ResourceId::new(raw.clone()).map_err(|_| ContentError::ContactNotFound { id: raw }.into())
}

/// POST /api/contacts: public contact form
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ContactDto>>)> {
    let contact = state.contacts.submit(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(contact.into())
                .with_message("Thank you for your message. We will get back to you soon."),
        ),
    ))
}

pub async fn list_contacts(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ContactDto>>>> {
    let contacts: Vec<ContactDto> = state
        .contacts
        .list()
        .await?
        .into_iter()
        .map(ContactDto::from)
        .collect();
    let count = contacts.len();
    Ok(Json(ApiResponse::ok(contacts).with_count(count)))
}

pub async fn get_contact(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ContactDto>>> {
    let id = contact_id(id)?;
    let contact = state.contacts.get(&id).await?;
    Ok(Json(ApiResponse::ok(contact.into())))
}

pub async fn set_contact_status(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> ApiResult<Json<ApiResponse<ContactDto>>> {
    let id = contact_id(id)?;
    let contact = state.contacts.set_status(&id, &body.status).await?;
    Ok(Json(
        ApiResponse::ok(contact.into()).with_message("Contact status updated"),
    ))
}

pub async fn delete_contact(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = contact_id(id)?;
    state.contacts.delete(&id).await?;
    Ok(Json(ApiResponse::message("Contact deleted successfully")))
}
