use axum::{extract::State, Json};

use crate::{
    adapters::inbound::http::{
        dto::{ApiResponse, ApiResult, SessionDto},
        router::AppState,
    },
    domain::models::Credentials,
};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<ApiResponse<SessionDto>>> {
    let session = state.authenticator.authenticate(&credentials).await?;
    Ok(Json(
        ApiResponse::ok(session.into()).with_message("Login successful"),
    ))
}
