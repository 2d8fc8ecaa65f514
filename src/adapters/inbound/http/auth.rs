use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{dto::ApiError, router::AppState};
use crate::domain::{errors::AuthError, models::Claims};

/// Extractor that admits only requests carrying a valid admin bearer token.
///
/// Put it first in a handler's argument list so the 401 wins over other
/// extraction failures.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Claims);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = state.authenticator.verify(token).await?;
        Ok(AdminSession(claims))
    }
}
