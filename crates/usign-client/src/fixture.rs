//! # Fixture Gateway
//!
//! Deterministic in-process [`ProviderGateway`] for tests and local
//! development. Image sets are registered with the extraction the provider
//! would return for them; any other image set reads as unreadable, the way
//! the real provider treats an unrelated photo.
//!
//! The fixture can also be told to fail its first calls with a transport
//! error, which exercises the engine's retry policy without a network.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use usign_core::{DocumentImage, ExtractionResult};

use crate::error::GatewayError;
use crate::gateway::{ProviderGateway, VerificationRequest};

/// Canned-response gateway.
#[derive(Debug, Default)]
pub struct FixtureGateway {
    documents: Vec<(Vec<DocumentImage>, ExtractionResult)>,
    fail_first: u32,
    delay: Option<Duration>,
    calls: AtomicU32,
}

impl FixtureGateway {
    /// An empty fixture: every image set is unreadable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the extraction returned for exactly this ordered image set.
    pub fn with_document(
        mut self,
        images: impl IntoIterator<Item = DocumentImage>,
        extraction: ExtractionResult,
    ) -> Self {
        self.documents.push((images.into_iter().collect(), extraction));
        self
    }

    /// Fail the first `n` calls with a transport error.
    pub fn failing_first(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }

    /// Wait `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls received so far, including failed ones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderGateway for FixtureGateway {
    async fn submit_for_verification(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<ExtractionResult, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if call < self.fail_first {
            return Err(GatewayError::Transport {
                endpoint: request.credential.endpoint_url().to_string(),
                reason: format!("fixture transport failure #{}", call + 1),
            });
        }

        let extraction = self
            .documents
            .iter()
            .find(|(images, _)| images.as_slice() == request.images)
            .map(|(_, extraction)| extraction.clone())
            .unwrap_or_else(ExtractionResult::unreadable);
        Ok(extraction)
    }

    fn gateway_name(&self) -> &str {
        "FixtureGateway"
    }
}
