//! Server configuration

use std::time::Duration;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Secret used when `EXTENSION_SECRET_KEY` is unset in development
pub const DEV_EXTENSION_KEY: &str = "test-secret";

/// Intake server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT (or PORT) | 8080 | listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | EXTENSION_SECRET_KEY | test-secret (development only) | expected `X-Extension-Key` |
/// | LOG_LEVEL | info | default filter when RUST_LOG is unset |
/// | LOG_DIR | - | daily rolling log files, if the directory exists |
/// | TELEMETRY_ENABLED | true | emit telemetry events |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Shared secret the browser extension sends in `X-Extension-Key`
    pub extension_key: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub telemetry_enabled: bool,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        Ok(Self {
            http_port: lookup("HTTP_PORT")
                .or_else(|| lookup("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            extension_key: require_secret(&lookup, "EXTENSION_SECRET_KEY", &environment)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            telemetry_enabled: lookup("TELEMETRY_ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            environment,
        })
    }

    /// Development configuration with the given secret, for tests
    pub fn with_overrides(extension_key: impl Into<String>, http_port: u16) -> Self {
        Self {
            http_port,
            environment: "development".into(),
            extension_key: extension_key.into(),
            log_level: "info".into(),
            log_dir: None,
            telemetry_enabled: false,
            request_timeout_ms: 30000,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Secret variables must be set and non-empty outside development
///
/// Development falls back to [`DEV_EXTENSION_KEY`] when the variable is
/// unset or empty.
fn require_secret<F>(lookup: &F, name: &str, environment: &str) -> Result<String, BoxError>
where
    F: Fn(&str) -> Option<String>,
{
    let is_dev = environment == "development";
    match lookup(name) {
        Some(val) if !val.is_empty() => Ok(val),
        Some(_) if !is_dev => {
            Err(format!("{name} must not be empty in {environment} environment").into())
        }
        None if !is_dev => Err(format!("{name} must be set in {environment} environment").into()),
        _ => Ok(DEV_EXTENSION_KEY.to_string()),
    }
}
