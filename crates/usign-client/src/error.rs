//! Error types for provider calls and verification runs.

use usign_core::InputError;

use crate::credential_store::CredentialError;

/// Errors from a single provider gateway call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The provider could not be reached (DNS, connection refused, TLS).
    #[error("provider unreachable calling {endpoint}: {reason}")]
    Transport {
        /// Endpoint that was called.
        endpoint: String,
        /// Description of the transport failure.
        reason: String,
    },

    /// The HTTP request timed out.
    #[error("provider request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Configured per-request timeout in milliseconds.
        elapsed_ms: u64,
    },

    /// The provider answered 429 or 5xx.
    #[error("provider {endpoint} unavailable: HTTP {status}: {body}")]
    ServiceUnavailable {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// The provider rejected the credential (401/403).
    #[error("provider rejected credentials for {username}: HTTP {status}")]
    Authentication {
        /// Account that was rejected. Never the password.
        username: String,
        /// HTTP status code.
        status: u16,
    },

    /// The provider processed the request and reported a failure that is
    /// not "documents unreadable".
    #[error("provider error {code}: {message}")]
    Provider {
        /// Provider error code.
        code: String,
        /// Provider error message.
        message: String,
    },

    /// The provider response could not be decoded.
    #[error("malformed provider response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint that was called.
        endpoint: String,
        /// Decoding failure.
        reason: String,
    },

    /// The gateway cannot be used as configured.
    #[error("gateway not configured: {reason}")]
    NotConfigured {
        /// What is missing or invalid.
        reason: String,
    },
}

impl GatewayError {
    /// Whether the failure is transient and the same request may be resent.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::ServiceUnavailable { .. }
        )
    }
}

/// Errors from a verification run.
///
/// A verification that ran and did not match returns
/// [`usign_core::Verdict::Mismatch`], not one of these.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Malformed claim or images; nothing was sent.
    #[error("invalid verification input: {0}")]
    Input(#[from] InputError),

    /// No usable provider credential for the tenant.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The provider could not be reached or rejected the credential.
    #[error("transport error after {attempts} attempt(s): {source}")]
    Transport {
        /// Number of attempts made.
        attempts: u32,
        /// Last gateway error.
        source: GatewayError,
    },

    /// The provider answered with a non-transient failure.
    #[error("provider failure: {source}")]
    Provider {
        /// Gateway error as reported.
        source: GatewayError,
    },

    /// The request-scoped deadline expired before a verdict was reached.
    #[error("verification timed out after {elapsed_ms}ms")]
    Timeout {
        /// The deadline in milliseconds.
        elapsed_ms: u64,
    },
}

impl VerifyError {
    /// Classify a gateway error surfaced after `attempts` tries.
    pub(crate) fn from_gateway(source: GatewayError, attempts: u32) -> Self {
        match source {
            GatewayError::Provider { .. }
            | GatewayError::MalformedResponse { .. }
            | GatewayError::NotConfigured { .. } => Self::Provider { source },
            GatewayError::Transport { .. }
            | GatewayError::Timeout { .. }
            | GatewayError::ServiceUnavailable { .. }
            | GatewayError::Authentication { .. } => Self::Transport { attempts, source },
        }
    }
}
