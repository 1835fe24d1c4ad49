//! # Provider Credentials
//!
//! The account a tenant uses to reach the verification provider, and the
//! tenant identifier used to look it up.
//!
//! ## Secret Handling
//!
//! The password lives in a [`Zeroizing`] buffer that is wiped on drop. The
//! custom `Debug` implementation prints `[REDACTED]` so credentials can be
//! logged structurally without leaking the secret. Only the HTTP gateway
//! reads [`ProviderCredential::password`], to build the authenticated call.

use std::fmt;

use url::Url;
use zeroize::Zeroizing;

use crate::error::InputError;

/// Provider name for the Universign/Cryptolog service.
pub const CRYPTOLOG_PROVIDER: &str = "cryptolog";

/// Identifier of the company/tenant on whose behalf a verification runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(String);

impl TenantId {
    /// Create a tenant identifier. Must be non-empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, InputError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(InputError::InvalidTenantId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential for one provider account.
#[derive(Clone)]
pub struct ProviderCredential {
    provider: String,
    endpoint_url: Url,
    username: String,
    password: Zeroizing<String>,
}

impl ProviderCredential {
    /// Create a credential.
    pub fn new(
        provider: impl Into<String>,
        endpoint_url: Url,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            endpoint_url,
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Provider this credential belongs to (e.g. [`CRYPTOLOG_PROVIDER`]).
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Base URL of the provider API.
    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    /// Account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password. Read only when authenticating a request.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredential")
            .field("provider", &self.provider)
            .field("endpoint_url", &self.endpoint_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> ProviderCredential {
        ProviderCredential::new(
            CRYPTOLOG_PROVIDER,
            Url::parse("https://sign.test.cryptolog.com/ra/rpc/").unwrap(),
            "test@universign.com",
            "s3cr3t-pw",
        )
    }

    #[test]
    fn debug_redacts_password() {
        let dbg = format!("{:?}", credential());
        assert!(dbg.contains("[REDACTED]"));
        assert!(dbg.contains("test@universign.com"));
        assert!(!dbg.contains("s3cr3t-pw"));
    }

    #[test]
    fn accessors_expose_fields() {
        let cred = credential();
        assert_eq!(cred.provider(), "cryptolog");
        assert_eq!(cred.endpoint_url().host_str(), Some("sign.test.cryptolog.com"));
        assert_eq!(cred.username(), "test@universign.com");
        assert_eq!(cred.password(), "s3cr3t-pw");
    }

    #[test]
    fn tenant_id_trims_and_rejects_empty() {
        assert_eq!(TenantId::new(" coopengo ").unwrap().as_str(), "coopengo");
        assert_eq!(TenantId::new("   ").unwrap_err(), InputError::InvalidTenantId);
    }
}
