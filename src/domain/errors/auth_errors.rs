use thiserror::Error;

/// Errors raised while authenticating admin users
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token: {0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
}

impl From<AuthError> for http::StatusCode {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken(_) => {
                http::StatusCode::UNAUTHORIZED
            }
            AuthError::Hash(_) | AuthError::Token(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
