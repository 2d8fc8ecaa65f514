use axum::{extract::State, http::StatusCode, Json};

use crate::{
    adapters::inbound::http::{
        auth::AdminSession,
        dto::{ApiResponse, ApiResult, NewsletterRequest, SubscriberDto},
        router::AppState,
    },
    domain::errors::ValidationError,
};

/// POST /api/newsletter: public signup
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<NewsletterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SubscriberDto>>)> {
    let email = body
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(ValidationError::MissingField("Email"))?;

    let subscription = state.newsletter.subscribe(&email).await?;
    let message = if subscription.notified {
        "Successfully subscribed to newsletter! Check your email for confirmation."
    } else {
        "Successfully subscribed to newsletter!"
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(subscription.subscriber.into()).with_message(message)),
    ))
}

pub async fn list_subscribers(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<SubscriberDto>>>> {
    let subscribers: Vec<SubscriberDto> = state
        .newsletter
        .list()
        .await?
        .into_iter()
        .map(SubscriberDto::from)
        .collect();
    let count = subscribers.len();
    Ok(Json(ApiResponse::ok(subscribers).with_count(count)))
}
