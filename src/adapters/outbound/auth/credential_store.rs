use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::{
    domain::{
        errors::{AuthError, AuthResult},
        models::{Claims, Credentials, Session},
    },
    ports::services::Authenticator,
};

const ADMIN_ROLE: &str = "admin";

/// An admin login with its argon2 password hash
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
}

impl AdminAccount {
    /// Build an account from a plaintext password, hashing it
    pub fn with_password(email: &str, password: &str) -> AuthResult<Self> {
        Ok(Self {
            email: email.trim().to_lowercase(),
            password_hash: hash_password(password)?,
        })
    }
}

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Checks admin credentials against a fixed account list and issues HS256 session tokens
pub struct CredentialStoreAuthenticator {
    accounts: HashMap<String, String>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
}

impl CredentialStoreAuthenticator {
    pub fn new(accounts: Vec<AdminAccount>, secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.email.trim().to_lowercase(), a.password_hash))
                .collect(),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            token_ttl,
        }
    }

    fn password_matches(hash: &str, password: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[async_trait]
impl Authenticator for CredentialStoreAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<Session> {
        let email = credentials.email.trim().to_lowercase();
        let Some(hash) = self.accounts.get(&email) else {
            warn!(%email, "login attempt for unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !Self::password_matches(hash, &credentials.password)? {
            warn!(%email, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = Utc::now();
        let expires_at = issued + self.token_ttl;
        let claims = Claims {
            sub: email.clone(),
            role: ADMIN_ROLE.to_string(),
            iat: issued.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        info!(%email, "admin logged in");
        Ok(Session {
            token,
            email,
            role: claims.role,
            expires_at,
        })
    }

    async fn verify(&self, token: &str) -> AuthResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if claims.role != ADMIN_ROLE {
            return Err(AuthError::InvalidToken("insufficient role".to_string()));
        }
        Ok(claims)
    }
}
