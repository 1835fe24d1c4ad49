//! Verification client configuration.
//!
//! Tunables for the HTTP gateway and the engine, loaded from environment
//! variables with production defaults, plus the single-tenant credential
//! used when no credentials file is supplied.

use std::time::Duration;

use url::Url;
use usign_core::{MatchPolicy, ProviderCredential, CRYPTOLOG_PROVIDER};

use crate::retry::RetryPolicy;

/// Default Universign/Cryptolog RA endpoint.
pub const DEFAULT_PROVIDER_URL: &str = "https://ws.universign.eu/ra/rpc/";

/// Engine and gateway tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationConfig {
    /// Per-HTTP-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds; doubles each retry.
    pub retry_base_ms: u64,
    /// Deadline for a whole verification (all attempts), in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Minimum field confidence accepted from the provider.
    pub min_confidence: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            retry_base_ms: 200,
            request_timeout_secs: None,
            min_confidence: 0.5,
        }
    }
}

impl VerificationConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `USIGN_TIMEOUT_SECS` (default: 30)
    /// - `USIGN_MAX_RETRIES` (default: 3)
    /// - `USIGN_RETRY_BASE_MS` (default: 200)
    /// - `USIGN_REQUEST_TIMEOUT_SECS` (default: unset, no deadline)
    /// - `USIGN_MIN_CONFIDENCE` (default: 0.5, must be within 0.0..=1.0)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let min_confidence = env_parse("USIGN_MIN_CONFIDENCE")?.unwrap_or(defaults.min_confidence);
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConfigError::InvalidValue(
                "USIGN_MIN_CONFIDENCE".to_string(),
                format!("{min_confidence} is outside 0.0..=1.0"),
            ));
        }
        Ok(Self {
            timeout_secs: env_parse("USIGN_TIMEOUT_SECS")?.unwrap_or(defaults.timeout_secs),
            max_retries: env_parse("USIGN_MAX_RETRIES")?.unwrap_or(defaults.max_retries),
            retry_base_ms: env_parse("USIGN_RETRY_BASE_MS")?.unwrap_or(defaults.retry_base_ms),
            request_timeout_secs: env_parse("USIGN_REQUEST_TIMEOUT_SECS")?,
            min_confidence,
        })
    }

    /// Per-HTTP-request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry schedule for transient provider failures.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_ms),
        }
    }

    /// Deadline for a whole verification, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Readability thresholds for the matcher.
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            min_confidence: self.min_confidence,
        }
    }
}

/// Load the provider credential from environment variables.
///
/// Variables:
/// - `USIGN_PROVIDER_URL` (default: [`DEFAULT_PROVIDER_URL`])
/// - `USIGN_USERNAME` (required)
/// - `USIGN_PASSWORD` (required)
pub fn credential_from_env() -> Result<ProviderCredential, ConfigError> {
    let username =
        std::env::var("USIGN_USERNAME").map_err(|_| ConfigError::MissingVar("USIGN_USERNAME"))?;
    let password =
        std::env::var("USIGN_PASSWORD").map_err(|_| ConfigError::MissingVar("USIGN_PASSWORD"))?;
    let endpoint = env_url("USIGN_PROVIDER_URL", DEFAULT_PROVIDER_URL)?;
    Ok(ProviderCredential::new(
        CRYPTOLOG_PROVIDER,
        endpoint,
        username,
        password,
    ))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_parse<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue(var.to_string(), e.to_string())),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    /// A URL variable does not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// A numeric variable does not parse or is out of range.
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
