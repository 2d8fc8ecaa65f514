use axum::Router;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

use crate::{
    adapters::{
        inbound::http::router::{create_router, AppState},
        outbound::{
            auth::{AdminAccount, CredentialStoreAuthenticator},
            notify::LoggingNotifier,
            persistence::{
                connect_sqlite, InMemoryContactRepository, InMemoryImageRepository,
                InMemoryResourceRepository, InMemorySubscriberRepository, SqlContactRepository,
                SqlImageRepository, SqlResourceRepository, SqlSubscriberRepository,
            },
            storage::{
                create_local_store, create_memory_store, create_s3_store, MediaSettings,
                ObjectStoreMediaAdapter, S3Config,
            },
        },
    },
    ports::{
        repositories::{
            ContactRepository, ImageRepository, ResourceRepository, SubscriberRepository,
        },
        services::{
            Authenticator, ContactService, ImageLibrary, NewsletterService, OrderingService,
            ResourceService, WelcomeNotifier,
        },
        storage::MediaStore,
    },
    services::{
        ContactServiceImpl, ImageLibraryImpl, NewsletterServiceImpl, OrderingServiceImpl,
        ResourceServiceImpl,
    },
};

/// Every repository the application needs, from one backend
struct Repositories {
    resources: Arc<dyn ResourceRepository>,
    contacts: Arc<dyn ContactRepository>,
    subscribers: Arc<dyn SubscriberRepository>,
    images: Arc<dyn ImageRepository>,
}

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@digiora.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub auth: AuthConfig,
    pub media: MediaSettings,
    /// Allowed browser origins; empty allows any
    pub cors_origins: Vec<String>,
}

/// Storage backend configuration
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    Local {
        root: PathBuf,
    },
    S3(S3Config),
}

/// Repository backend configuration
#[derive(Debug, Clone, Default)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    /// SQLite database, e.g. `sqlite://content.db` or `sqlite::memory:`
    Database { connection_string: String },
}

#[derive(Debug, Clone)]
pub enum AdminPassword {
    Plain(String),
    /// Argon2 PHC string
    Hash(String),
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_email: String,
    pub admin_password: AdminPassword,
    /// Signing secret for session tokens; a random one is generated when unset
    pub jwt_secret: Option<String>,
    pub token_ttl: chrono::Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string()),
            jwt_secret: None,
            token_ttl: chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub resource_repository: Arc<dyn ResourceRepository>,
    pub contact_repository: Arc<dyn ContactRepository>,
    pub subscriber_repository: Arc<dyn SubscriberRepository>,
    pub image_repository: Arc<dyn ImageRepository>,
    pub media_store: Arc<dyn MediaStore>,
    pub authenticator: Arc<dyn Authenticator>,
    pub notifier: Arc<dyn WelcomeNotifier>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub resources: Arc<dyn ResourceService>,
    pub ordering: Arc<dyn OrderingService>,
    pub contacts: Arc<dyn ContactService>,
    pub newsletter: Arc<dyn NewsletterService>,
    pub images: Arc<dyn ImageLibrary>,
    pub authenticator: Arc<dyn Authenticator>,
    pub media: Arc<dyn MediaStore>,
    pub cors_origins: Vec<String>,
}

impl AppServices {
    pub fn state(&self) -> AppState {
        AppState {
            resources: self.resources.clone(),
            ordering: self.ordering.clone(),
            contacts: self.contacts.clone(),
            newsletter: self.newsletter.clone(),
            images: self.images.clone(),
            authenticator: self.authenticator.clone(),
            media: self.media.clone(),
        }
    }

    /// The full HTTP router over these services
    pub fn router(&self) -> Router {
        create_router(self.state(), &self.cors_origins)
    }
}

/// Application builder for dependency injection
#[derive(Default)]
pub struct AppBuilder {
    config: AppConfig,
    notifier: Option<Arc<dyn WelcomeNotifier>>,
    media_store: Option<Arc<dyn MediaStore>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.config.cors_origins = origins;
        self
    }

    /// Use a custom welcome notifier instead of the logging one
    pub fn with_notifier(mut self, notifier: Arc<dyn WelcomeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Use a ready-made media store, bypassing the storage backend setting
    pub fn with_media_store(mut self, media_store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(media_store);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let media_store = match &self.media_store {
            Some(store) => store.clone(),
            None => self.create_media_store()?,
        };
        let repositories = self.create_repositories().await?;

        Ok(AppDependencies {
            resource_repository: repositories.resources,
            contact_repository: repositories.contacts,
            subscriber_repository: repositories.subscribers,
            image_repository: repositories.images,
            media_store,
            authenticator: self.create_authenticator()?,
            notifier: self
                .notifier
                .clone()
                .unwrap_or_else(|| Arc::new(LoggingNotifier)),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        Ok(AppServices {
            resources: Arc::new(ResourceServiceImpl::new(
                deps.resource_repository.clone(),
                deps.media_store.clone(),
            )),
            ordering: Arc::new(OrderingServiceImpl::new(deps.resource_repository)),
            contacts: Arc::new(ContactServiceImpl::new(deps.contact_repository)),
            newsletter: Arc::new(NewsletterServiceImpl::new(
                deps.subscriber_repository,
                deps.notifier,
            )),
            images: Arc::new(ImageLibraryImpl::new(
                deps.image_repository,
                deps.media_store.clone(),
            )),
            authenticator: deps.authenticator,
            media: deps.media_store,
            cors_origins: self.config.cors_origins,
        })
    }

    fn create_media_store(&self) -> Result<Arc<dyn MediaStore>, AppError> {
        let backend = match &self.config.storage_backend {
            StorageBackend::InMemory => create_memory_store(),
            StorageBackend::Local { root } => {
                info!(root = %root.display(), "using local media storage");
                create_local_store(root).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?
            }
            StorageBackend::S3(config) => {
                info!(bucket = %config.bucket, region = %config.region, "using S3 media storage");
                create_s3_store(config).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?
            }
        };

        Ok(Arc::new(ObjectStoreMediaAdapter::new(
            backend,
            self.config.media.clone(),
        )))
    }

    async fn create_repositories(&self) -> Result<Repositories, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Repositories {
                resources: Arc::new(InMemoryResourceRepository::new()),
                contacts: Arc::new(InMemoryContactRepository::new()),
                subscribers: Arc::new(InMemorySubscriberRepository::new()),
                images: Arc::new(InMemoryImageRepository::new()),
            }),
            RepositoryBackend::Database { connection_string } => {
                let repository_error = |e: sqlx::Error| AppError::RepositoryInit {
                    message: e.to_string(),
                };
                let pool = connect_sqlite(connection_string)
                    .await
                    .map_err(repository_error)?;

                let resources = SqlResourceRepository::new(pool.clone());
                let contacts = SqlContactRepository::new(pool.clone());
                let subscribers = SqlSubscriberRepository::new(pool.clone());
                let images = SqlImageRepository::new(pool);
                resources.migrate().await.map_err(repository_error)?;
                contacts.migrate().await.map_err(repository_error)?;
                subscribers.migrate().await.map_err(repository_error)?;
                images.migrate().await.map_err(repository_error)?;

                info!("database repositories ready");
                Ok(Repositories {
                    resources: Arc::new(resources),
                    contacts: Arc::new(contacts),
                    subscribers: Arc::new(subscribers),
                    images: Arc::new(images),
                })
            }
        }
    }

    fn create_authenticator(&self) -> Result<Arc<dyn Authenticator>, AppError> {
        let auth = &self.config.auth;
        let account = match &auth.admin_password {
            AdminPassword::Plain(password) => AdminAccount::with_password(&auth.admin_email, password)
                .map_err(|e| AppError::ServiceInit {
                    message: e.to_string(),
                })?,
            AdminPassword::Hash(hash) => AdminAccount {
                email: auth.admin_email.trim().to_lowercase(),
                password_hash: hash.clone(),
            },
        };

        let secret = match &auth.jwt_secret {
            Some(secret) if !secret.is_empty() => secret.as_bytes().to_vec(),
            _ => {
                info!("JWT_SECRET not set, sessions will not survive a restart");
                rand::random::<[u8; 32]>().to_vec()
            }
        };

        Ok(Arc::new(CredentialStoreAuthenticator::new(
            vec![account],
            &secret,
            auth.token_ttl,
        )))
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

fn required_env(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Configuration {
        message: format!("{} environment variable required", name),
    })
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
            Ok("local") => StorageBackend::Local {
                root: std::env::var("MEDIA_ROOT")
                    .unwrap_or_else(|_| "./media".to_string())
                    .into(),
            },
            Ok("s3") => StorageBackend::S3(S3Config {
                bucket: required_env("S3_BUCKET")?,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                access_key: std::env::var("S3_ACCESS_KEY").ok(),
                secret_key: std::env::var("S3_SECRET_KEY").ok(),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
            }),
            Ok("memory") | Err(_) => StorageBackend::InMemory,
            Ok(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown storage backend: {}", other),
                })
            }
        };

        let repository_backend = match std::env::var("REPOSITORY_BACKEND").as_deref() {
            Ok("database") | Ok("db") => RepositoryBackend::Database {
                connection_string: required_env("DATABASE_URL")?,
            },
            Ok("memory") | Err(_) => RepositoryBackend::InMemory,
            Ok(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown repository backend: {}", other),
                })
            }
        };

        let defaults = AuthConfig::default();
        let admin_password = match (
            std::env::var("ADMIN_PASSWORD_HASH"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(hash), _) => AdminPassword::Hash(hash),
            (Err(_), Ok(password)) => AdminPassword::Plain(password),
            _ => defaults.admin_password,
        };
        let token_ttl = match std::env::var("TOKEN_TTL_HOURS") {
            Ok(hours) => chrono::Duration::hours(hours.parse().map_err(|_| {
                AppError::Configuration {
                    message: format!("TOKEN_TTL_HOURS must be a whole number, got '{}'", hours),
                }
            })?),
            Err(_) => defaults.token_ttl,
        };
        let auth = AuthConfig {
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password,
            jwt_secret: std::env::var("JWT_SECRET").ok(),
            token_ttl,
        };

        let media_defaults = MediaSettings::default();
        let media = MediaSettings {
            prefix: std::env::var("MEDIA_PREFIX").unwrap_or(media_defaults.prefix),
            public_base_url: std::env::var("MEDIA_BASE_URL")
                .unwrap_or(media_defaults.public_base_url),
        };

        Ok(Self {
            storage_backend,
            repository_backend,
            auth,
            media,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

/// Create an in-memory application for testing and development.
///
/// Uses the default admin account and a random token secret.
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig::from_env()?)
        .build()
        .await
}
