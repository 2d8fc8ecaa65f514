use agency_content_server::{
    adapters::outbound::storage::{MediaSettings, S3Config},
    app::{
        parse_origins, AdminPassword, AppBuilder, AppConfig, AuthConfig, RepositoryBackend,
        StorageBackend, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
    },
};
use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "agency-content-server")]
#[command(about = "Content API for the agency marketing site and admin panel", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Media storage backend: memory, local or s3
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Root directory for the local media backend
    #[arg(long, env = "MEDIA_ROOT", default_value = "./media")]
    media_root: PathBuf,

    /// Folder every storage id starts with
    #[arg(long, env = "MEDIA_PREFIX", default_value = "digiora")]
    media_prefix: String,

    /// Public base URL media is served under
    #[arg(long, env = "MEDIA_BASE_URL")]
    media_base_url: Option<String>,

    /// Repository backend: memory or database
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// S3 endpoint URL, for S3-compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// SQLite database URL for the database repository backend
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Admin login email
    #[arg(long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL)]
    admin_email: String,

    /// Admin password, hashed at startup
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Pre-computed argon2 hash of the admin password
    #[arg(long, env = "ADMIN_PASSWORD_HASH", hide_env_values = true)]
    admin_password_hash: Option<String>,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Session token lifetime in hours
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value = "12")]
    token_ttl_hours: i64,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "CORS_ORIGINS", default_value = "")]
    cors_origins: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "local" => StorageBackend::Local {
                root: self.media_root.clone(),
            },
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for S3 backend")?;

                StorageBackend::S3(S3Config {
                    bucket,
                    region: self.s3_region.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                    endpoint: self.s3_endpoint.clone(),
                })
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        let admin_password = match (&self.admin_password_hash, &self.admin_password) {
            (Some(hash), _) => AdminPassword::Hash(hash.clone()),
            (None, Some(password)) => AdminPassword::Plain(password.clone()),
            (None, None) => {
                warn!("ADMIN_PASSWORD not set, using the default admin password");
                AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string())
            }
        };

        let mut media = MediaSettings {
            prefix: self.media_prefix.clone(),
            ..MediaSettings::default()
        };
        media.public_base_url = match &self.media_base_url {
            Some(url) => url.clone(),
            None => format!("http://localhost:{}/media", self.port),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            auth: AuthConfig {
                admin_email: self.admin_email.clone(),
                admin_password,
                jwt_secret: self.jwt_secret.clone(),
                token_ttl: chrono::Duration::hours(self.token_ttl_hours),
            },
            media,
            cors_origins: parse_origins(&self.cors_origins),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "agency_content_server={level},tower_http={level},{level}"
            ))
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting agency content server");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Repository backend: {}", cli.repository_backend);

    let config = cli.to_app_config()?;
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = app_services.router();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "agency-content-server",
            "--port",
            "8080",
            "--storage-backend",
            "s3",
            "--s3-bucket",
            "site-media",
            "--s3-endpoint",
            "http://localhost:9000",
        ]);

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.storage_backend, "s3");
        assert_eq!(cli.s3_bucket, Some("site-media".to_string()));

        let config = cli.to_app_config().unwrap();
        match config.storage_backend {
            StorageBackend::S3(s3) => {
                assert_eq!(s3.bucket, "site-media");
                assert_eq!(s3.endpoint.as_deref(), Some("http://localhost:9000"));
            }
            other => panic!("Expected S3 backend, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_config() {
        let cli = Cli::parse_from(["agency-content-server", "--cors-origins", "http://a.test"]);

        let config = cli.to_app_config().unwrap();
        assert!(matches!(config.storage_backend, StorageBackend::InMemory));
        assert!(matches!(
            config.repository_backend,
            RepositoryBackend::InMemory
        ));
        assert_eq!(config.cors_origins, vec!["http://a.test".to_string()]);
    }

    #[test]
    fn test_database_backend_requires_url() {
        let cli = Cli::parse_from([
            "agency-content-server",
            "--repository-backend",
            "database",
        ]);
        if cli.database_url.is_none() {
            assert!(cli.to_app_config().is_err());
        }
    }
}
