//! # Credential Store
//!
//! Resolves which provider credential a tenant uses. The engine never reads
//! ambient tenant context: callers pass the [`TenantId`] explicitly and the
//! store answers from whatever backs it.
//!
//! ## Credentials File
//!
//! [`InMemoryCredentialStore::from_yaml_str`] loads a file of the form:
//!
//! ```yaml
//! tenants:
//!   coopengo:
//!     - provider: cryptolog
//!       provider_url: https://sign.test.cryptolog.com/ra/rpc/
//!       username: test.coopengo@universign.com
//!       password: "..."
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use url::Url;
use usign_core::{InputError, ProviderCredential, TenantId};

/// Errors resolving or loading credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The tenant has no credential for the provider.
    #[error("no {provider} credential configured for tenant {tenant}")]
    NotFound {
        /// Tenant that was looked up.
        tenant: String,
        /// Provider that was requested.
        provider: String,
    },

    /// The credentials file could not be read.
    #[error("failed to read credentials file {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The credentials file is not valid YAML for the expected layout.
    #[error("malformed credentials file: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// A credential entry has an unusable endpoint URL.
    #[error("invalid provider_url for tenant {tenant}: {reason}")]
    InvalidUrl {
        /// Tenant owning the entry.
        tenant: String,
        /// URL parse failure.
        reason: String,
    },

    /// A tenant key in the file is not a valid tenant identifier.
    #[error("invalid tenant in credentials file: {0}")]
    InvalidTenant(#[from] InputError),
}

/// Lookup of provider credentials by tenant.
pub trait CredentialStore: Send + Sync {
    /// Resolve the credential `tenant` uses for `provider`.
    fn resolve(&self, tenant: &TenantId, provider: &str) -> Result<ProviderCredential, CredentialError>;
}

/// Credential store held in memory, typically loaded once at start-up.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: BTreeMap<TenantId, Vec<ProviderCredential>>,
}

#[derive(Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    tenants: BTreeMap<String, Vec<CredentialRecord>>,
}

// No Debug: the record holds the plaintext password until it is moved into
// a `ProviderCredential`.
#[derive(Deserialize)]
struct CredentialRecord {
    provider: String,
    provider_url: String,
    username: String,
    password: String,
}

impl InMemoryCredentialStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential for `tenant`. Earlier entries for the same provider
    /// take precedence.
    pub fn insert(&mut self, tenant: TenantId, credential: ProviderCredential) {
        self.credentials.entry(tenant).or_default().push(credential);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_credential(mut self, tenant: TenantId, credential: ProviderCredential) -> Self {
        self.insert(tenant, credential);
        self
    }

    /// Parse a credentials file body.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CredentialError> {
        let file: CredentialsFile = serde_yaml::from_str(yaml)?;
        let mut store = Self::new();
        for (tenant, records) in file.tenants {
            let tenant_id = TenantId::new(tenant)?;
            for record in records {
                let url = Url::parse(&record.provider_url).map_err(|e| CredentialError::InvalidUrl {
                    tenant: tenant_id.to_string(),
                    reason: e.to_string(),
                })?;
                store.insert(
                    tenant_id.clone(),
                    ProviderCredential::new(record.provider, url, record.username, record.password),
                );
            }
        }
        Ok(store)
    }

    /// Read and parse a credentials file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, CredentialError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Number of tenants with at least one credential.
    pub fn tenant_count(&self) -> usize {
        self.credentials.len()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn resolve(&self, tenant: &TenantId, provider: &str) -> Result<ProviderCredential, CredentialError> {
        self.credentials
            .get(tenant)
            .and_then(|creds| creds.iter().find(|c| c.provider() == provider))
            .cloned()
            .ok_or_else(|| CredentialError::NotFound {
                tenant: tenant.to_string(),
                provider: provider.to_string(),
            })
    }
}
