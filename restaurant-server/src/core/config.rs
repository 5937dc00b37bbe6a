use std::time::Duration;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Minimum accepted length of the signing secret, in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:restaurant.db | store location |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | JWT_SECRET | (required) | HS256 signing secret, at least 32 bytes |
/// | ACCESS_TOKEN_TTL_HOURS | 24 | access token lifetime |
/// | REFRESH_TOKEN_TTL_HOURS | 200 | refresh token lifetime |
/// | DB_OPERATION_TIMEOUT_SECS | 100 | budget for every store operation |
/// | ENVIRONMENT | development | environment label |
/// | LOG_LEVEL | info | default log level |
/// | LOG_DIR | (unset) | directory for daily log files |
///
/// # Example
///
/// ```ignore
/// JWT_SECRET=$(openssl rand -hex 32) HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Token service configuration
    pub jwt: JwtConfig,
    /// Budget for a single store round trip
    pub db_operation_timeout: Duration,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing or short `JWT_SECRET` is fatal: tokens cannot be issued
    /// without it, so the server refuses to start.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| ServerError::Config("JWT_SECRET must be set".to_string()))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes long"
            )));
        }

        let jwt = JwtConfig {
            secret,
            access_ttl_hours: env_parse("ACCESS_TOKEN_TTL_HOURS", 24),
            refresh_ttl_hours: env_parse("REFRESH_TOKEN_TTL_HOURS", 200),
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:restaurant.db".into()),
            http_port: env_parse("HTTP_PORT", 8000),
            jwt,
            db_operation_timeout: Duration::from_secs(env_parse("DB_OPERATION_TIMEOUT_SECS", 100)),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        })
    }

    /// Configuration for tests: in-memory store and a fixed secret
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "test-secret-that-is-at-least-32-bytes-long".into(),
                access_ttl_hours: 24,
                refresh_ttl_hours: 200,
            },
            db_operation_timeout: Duration::from_secs(100),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
