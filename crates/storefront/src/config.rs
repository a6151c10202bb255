//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PASTA_HOUSE_API_URL` - Backend origin, no path (default: `http://localhost:8000`)
//! - `PASTA_HOUSE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `PASTA_HOUSE_TOKEN_FILE` - File used to persist auth tokens between runs
//!   (default: tokens are kept in memory only)
//! - `PASTA_HOUSE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for binaries built on this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin that all `/api/...` paths are resolved against
    pub api_url: Url,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Where auth tokens are persisted, if anywhere
    pub token_file: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_api_url(
            &lookup("PASTA_HOUSE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let timeout_secs = lookup("PASTA_HOUSE_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PASTA_HOUSE_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PASTA_HOUSE_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let token_file = lookup("PASTA_HOUSE_TOKEN_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup("PASTA_HOUSE_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "PASTA_HOUSE_LOG_FORMAT".to_string(),
                    format!("expected 'pretty' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            token_file,
            log_format,
        })
    }

    /// Configuration pointing at `api_url` with every other setting defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an absolute
    /// `http`/`https` URL without a path.
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| (key == "PASTA_HOUSE_API_URL").then(|| api_url.to_string()))
    }
}

/// Parse and check the backend origin.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PASTA_HOUSE_API_URL".to_string(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }

    // Service paths are absolute (`/api/...`) and would replace any prefix
    if url.path() != "/" {
        return Err(invalid(format!(
            "must be an origin without a path, got path '{}'",
            url.path()
        )));
    }
    Ok(url)
}
