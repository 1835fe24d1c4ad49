//! # usign-client -- Universign identity verification client
//!
//! Runs identity verifications against the Universign/Cryptolog extraction
//! service:
//! - **Gateway** ([`ProviderGateway`]) — narrow interface to the provider,
//!   with a live HTTP implementation and a deterministic fixture.
//! - **Engine** ([`VerificationEngine`]) — input checks, retry with backoff,
//!   request deadline, and the field comparison from `usign-core`.
//! - **Credentials** ([`CredentialStore`]) — per-tenant credential lookup,
//!   loadable from a YAML file.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use usign_client::{credential_from_env, HttpProviderGateway, VerificationConfig, VerificationEngine};
//! use usign_core::{parse_birth_date, DocumentImage, DocumentType, IdentityClaim};
//!
//! let config = VerificationConfig::from_env()?;
//! let gateway = Arc::new(HttpProviderGateway::new(config.http_timeout())?);
//! let engine = VerificationEngine::from_config(gateway, &config);
//!
//! let claim = IdentityClaim::new(
//!     "Berthier",
//!     "Corinne",
//!     parse_birth_date("1965-12-06")?,
//!     DocumentType::IdCardFr,
//! )?;
//! let images = [
//!     DocumentImage::new(std::fs::read("CNI-FR-TEST-RECTO.jpg")?),
//!     DocumentImage::new(std::fs::read("CNI-FR-TEST-VERSO.jpg")?),
//! ];
//! let verdict = engine.verify(&credential_from_env()?, &claim, &images).await?;
//! println!("{verdict}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credential_store;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod gateway;
pub mod http;
pub mod retry;

pub use config::{credential_from_env, ConfigError, VerificationConfig};
pub use credential_store::{CredentialError, CredentialStore, InMemoryCredentialStore};
pub use engine::VerificationEngine;
pub use error::{GatewayError, VerifyError};
pub use fixture::FixtureGateway;
pub use gateway::{ProviderGateway, VerificationRequest};
pub use http::HttpProviderGateway;
pub use retry::RetryPolicy;
