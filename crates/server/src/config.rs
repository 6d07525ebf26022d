//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults serve a local development setup.
//!
//! - `SHOWROOM_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWROOM_PORT` - Listen port (default: 5000)
//! - `SHOWROOM_BASE_URL` - Public URL; an `https` scheme marks cookies `Secure`
//!   (default: <http://localhost:5000>)
//! - `SHOWROOM_UPLOADS_DIR` - Directory for uploaded product images (default: uploads)
//! - `SHOWROOM_MAX_UPLOAD_BYTES` - Request body cap for uploads (default: 5 MiB)
//! - `SHOWROOM_SESSION_TTL_HOURS` - Admin session inactivity expiry, at most one
//!   year (default: 24)
//! - `SHOWROOM_ADMIN_USERNAME` - Bootstrap admin username (default: admin)
//! - `SHOWROOM_ADMIN_PASSWORD` - Bootstrap admin password (default: admin123)
//! - `SHOWROOM_SEED_PRODUCTS` - Seed the demo catalog at startup (default: true)
//! - `SHOWROOM_SEED_FILE` - YAML catalog to seed instead of the built-in one
//! - `SHOWROOM_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Bootstrap admin username used when none is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Bootstrap admin password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Showroom server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the server
    pub base_url: String,
    /// Where uploaded product images are written and served from
    pub uploads_dir: PathBuf,
    /// Maximum accepted request body size for uploads
    pub max_upload_bytes: usize,
    /// Admin session inactivity expiry, in hours
    pub session_ttl_hours: i64,
    /// Bootstrap admin account
    pub default_admin: DefaultAdminConfig,
    /// Catalog seeding at startup
    pub seed: SeedConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Credentials for the admin account created at startup.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DefaultAdminConfig {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for DefaultAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl DefaultAdminConfig {
    /// Whether the well-known development password is in use.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.password.expose_secret() == DEFAULT_ADMIN_PASSWORD
    }
}

/// Catalog seeding configuration.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    /// Whether to seed products at startup
    pub enabled: bool,
    /// YAML file to load instead of the built-in catalog
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            default_admin: DefaultAdminConfig {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            },
            seed: SeedConfig {
                enabled: true,
                file: None,
            },
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or("SHOWROOM_HOST", &get, defaults.host)?;
        let port = parse_or("SHOWROOM_PORT", &get, defaults.port)?;
        let base_url = get("SHOWROOM_BASE_URL").unwrap_or(defaults.base_url);
        validate_base_url(&base_url)?;
        let uploads_dir = get("SHOWROOM_UPLOADS_DIR").map_or(defaults.uploads_dir, PathBuf::from);
        let max_upload_bytes = parse_or("SHOWROOM_MAX_UPLOAD_BYTES", &get, defaults.max_upload_bytes)?;
        let session_ttl_hours = parse_or(
            "SHOWROOM_SESSION_TTL_HOURS",
            &get,
            defaults.session_ttl_hours,
        )?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOWROOM_SESSION_TTL_HOURS".to_string(),
                format!("must be between 1 and {MAX_SESSION_TTL_HOURS} hours"),
            ));
        }

        let default_admin = DefaultAdminConfig {
            username: get("SHOWROOM_ADMIN_USERNAME").unwrap_or(defaults.default_admin.username),
            password: get("SHOWROOM_ADMIN_PASSWORD")
                .map_or(defaults.default_admin.password, SecretString::from),
        };

        let seed = SeedConfig {
            enabled: parse_bool_or("SHOWROOM_SEED_PRODUCTS", &get, defaults.seed.enabled)?,
            file: get("SHOWROOM_SEED_FILE").map(PathBuf::from),
        };

        let log_format = match get("SHOWROOM_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOWROOM_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            base_url,
            uploads_dir,
            max_upload_bytes,
            session_ttl_hours,
            default_admin,
            seed,
            log_format,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        Url::parse(&self.base_url).is_ok_and(|url| url.scheme() == "https")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable with `FromStr`, falling back to `default` when unset.
fn parse_or<T, F>(key: &str, get: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    get(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Validate that the base URL is an absolute `http` or `https` URL.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("SHOWROOM_BASE_URL".to_string(), e.to_string())
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEnvVar(
            "SHOWROOM_BASE_URL".to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Parse a boolean flag accepting `true/false`, `1/0`, `yes/no`.
fn parse_bool_or<F>(key: &str, get: &F, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
