use crate::domain::{
    errors::AuthResult,
    models::{Claims, Credentials, Session},
};
use async_trait::async_trait;

/// Admin authentication port
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Check credentials and issue a session token
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Validate a session token
    async fn verify(&self, token: &str) -> AuthResult<Claims>;
}
