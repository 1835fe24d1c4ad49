//! # Provider Gateway
//!
//! The narrow interface between the verification engine and the remote
//! extraction service.
//!
//! ## Architecture
//!
//! The `ProviderGateway` trait abstracts over the provider backend.
//! Production uses [`crate::http::HttpProviderGateway`]; tests and local
//! development use [`crate::fixture::FixtureGateway`]. The engine treats the
//! gateway as an oracle: it relies only on the [`ExtractionResult`] shape,
//! never on how the provider reads the images.

use async_trait::async_trait;
use uuid::Uuid;

use usign_core::{DocumentImage, DocumentType, ExtractionResult, IdentityClaim, ProviderCredential};

use crate::error::GatewayError;

/// Everything the provider needs for one extraction.
///
/// Borrowed from the caller for the duration of the call; image bytes are
/// never copied or altered by the engine.
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest<'a> {
    /// Idempotency key. Identical across retries of one verification.
    pub reference: Uuid,
    /// Account used to authenticate the call.
    pub credential: &'a ProviderCredential,
    /// Identity the subscriber claims.
    pub claim: &'a IdentityClaim,
    /// Scanned document images, in the order the document type expects.
    pub images: &'a [DocumentImage],
}

impl VerificationRequest<'_> {
    /// Document type declared by the claim.
    pub fn document_type(&self) -> DocumentType {
        self.claim.document_type()
    }
}

/// Adapter for the remote identity-extraction provider.
///
/// Implementations must be `Send + Sync` so they can be shared across async
/// tasks behind an `Arc`. The trait is object-safe to support runtime
/// selection between the live and fixture gateways.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Submit document images for extraction.
    ///
    /// Returns the provider's reading of the documents, or an error when the
    /// provider could not be reached or failed to process the request. An
    /// unreadable document is a successful call returning
    /// [`ExtractionResult::Unreadable`].
    async fn submit_for_verification(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<ExtractionResult, GatewayError>;

    /// Human-readable name of the implementation (e.g. "HttpProviderGateway").
    fn gateway_name(&self) -> &str;
}
