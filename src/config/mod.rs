use chrono::Duration;
use serde::Serialize;
use std::env;
use thiserror::Error;

/// Errors raised while building configuration at startup. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_KEY is not set or empty; a signing secret is required")]
    MissingSecret,

    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("SECURITY_JWT_EXPIRY_HOURS must be a positive number of hours within range, got {0}")]
    InvalidTokenLifetime(u64),
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterConfig {
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    /// Connection string; only required by the Postgres store.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Clone, Serialize)]
pub struct SecurityConfig {
    /// Token signing secret. Loaded once; rotating it requires a restart.
    #[serde(skip_serializing)]
    pub jwt_secret: Vec<u8>,
    pub jwt_expiry_hours: u64,
    /// `jwt_expiry_hours` as a validated, positive duration.
    #[serde(skip_serializing)]
    pub token_ttl: Duration,
    pub cors_origins: Vec<String>,
}

impl SecurityConfig {
    fn validate_token_ttl(&mut self) -> Result<(), ConfigError> {
        self.token_ttl = token_ttl_from_hours(self.jwt_expiry_hours)?;
        Ok(())
    }
}

/// Convert a configured lifetime in hours into a duration tokens can be issued with.
pub fn token_ttl_from_hours(hours: u64) -> Result<Duration, ConfigError> {
    i64::try_from(hours)
        .ok()
        .filter(|h| *h > 0)
        .and_then(Duration::try_hours)
        .ok_or(ConfigError::InvalidTokenLifetime(hours))
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl AppConfig {
    /// Build the process configuration. Call once at startup and share the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides();

        if config.security.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        config.security.validate_token_ttl()?;

        Ok(config)
    }

    /// Fixed configuration with the given secret, bypassing the environment.
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        let mut config = Self::development();
        config.security.jwt_secret = secret.into();
        config
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("JWT_KEY") {
            self.security.jwt_secret = v.into_bytes();
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Allow tests or deployments to override port via env
        if let Some(port) = env::var("NITELIFE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        self
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig { debug_logging: true },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: Vec::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
                token_ttl: Duration::hours(24 * 7),
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            filter: FilterConfig { debug_logging: false },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: Vec::new(),
                jwt_expiry_hours: 24,
                token_ttl: Duration::hours(24),
                cors_origins: vec!["https://staging.nitelife.app".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            filter: FilterConfig { debug_logging: false },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: Vec::new(),
                jwt_expiry_hours: 4,
                token_ttl: Duration::hours(4),
                cors_origins: vec!["https://nitelife.app".to_string()],
            },
        }
    }
}
