//! # Verification Engine
//!
//! Orchestrates one identity verification: input checks, the provider call
//! under retry and deadline, and the field comparison that yields a
//! [`Verdict`].
//!
//! ## Lifecycle of a call
//!
//! ```text
//! NotStarted ─▶ GatewayCalled ─▶ ResultParsed ─▶ FieldsCompared ─▶ Verdict
//!      │              │
//!      ▼              ▼
//!  InputError   Transport / Provider / Timeout error
//! ```
//!
//! The engine holds only immutable configuration and a shared gateway handle.
//! Nothing is recorded between calls, so one engine behind an `Arc` can serve
//! any number of concurrent verifications.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use usign_core::{
    decide, validate_images, DocumentImage, IdentityClaim, MatchPolicy, ProviderCredential, TenantId,
    Verdict, CRYPTOLOG_PROVIDER,
};

use crate::config::VerificationConfig;
use crate::credential_store::CredentialStore;
use crate::error::VerifyError;
use crate::gateway::{ProviderGateway, VerificationRequest};
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Stateless identity-verification service.
#[derive(Clone)]
pub struct VerificationEngine {
    gateway: Arc<dyn ProviderGateway>,
    match_policy: MatchPolicy,
    retry_policy: RetryPolicy,
    request_timeout: Option<Duration>,
}

impl std::fmt::Debug for VerificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("gateway", &self.gateway.gateway_name())
            .field("match_policy", &self.match_policy)
            .field("retry_policy", &self.retry_policy)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl VerificationEngine {
    /// Engine with default policies and no request deadline.
    pub fn new(gateway: Arc<dyn ProviderGateway>) -> Self {
        Self {
            gateway,
            match_policy: MatchPolicy::default(),
            retry_policy: RetryPolicy::default(),
            request_timeout: None,
        }
    }

    /// Engine with policies taken from `config`.
    pub fn from_config(gateway: Arc<dyn ProviderGateway>, config: &VerificationConfig) -> Self {
        Self {
            gateway,
            match_policy: config.match_policy(),
            retry_policy: config.retry_policy(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Replace the matcher's readability thresholds.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Replace the retry schedule.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Abort any verification that has not produced a verdict within `limit`,
    /// retries included.
    pub fn with_request_timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    /// Verify `claim` against `images` using `credential`.
    ///
    /// Returns a [`Verdict`] when the provider processed the documents, even
    /// when they do not match. Returns an error when the verification could
    /// not run: bad input (no request sent), unreachable provider after
    /// retries, provider-side failure, or deadline expiry.
    pub async fn verify(
        &self,
        credential: &ProviderCredential,
        claim: &IdentityClaim,
        images: &[DocumentImage],
    ) -> Result<Verdict, VerifyError> {
        validate_images(claim.document_type(), images)?;

        let request = VerificationRequest {
            reference: Uuid::new_v4(),
            credential,
            claim,
            images,
        };
        let span = tracing::info_span!(
            "verify",
            reference = %request.reference,
            document_type = %claim.document_type(),
            gateway = self.gateway.gateway_name()
        );

        async move {
            tracing::debug!(stage = "gateway_called", images = images.len());
            let extraction = match self.request_timeout {
                Some(limit) => tokio::time::timeout(limit, self.call_gateway(&request))
                    .await
                    .map_err(|_| VerifyError::Timeout {
                        elapsed_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    })??,
                None => self.call_gateway(&request).await?,
            };
            tracing::debug!(stage = "result_parsed");

            let verdict = decide(claim, &extraction, &self.match_policy);
            tracing::debug!(stage = "fields_compared");
            tracing::info!(verdict = %verdict, "identity verification complete");
            Ok::<_, VerifyError>(verdict)
        }
        .instrument(span)
        .await
    }

    /// Verify on behalf of `tenant`, resolving its Cryptolog credential from
    /// `store` first.
    pub async fn verify_for_tenant(
        &self,
        store: &dyn CredentialStore,
        tenant: &TenantId,
        claim: &IdentityClaim,
        images: &[DocumentImage],
    ) -> Result<Verdict, VerifyError> {
        let credential = store.resolve(tenant, CRYPTOLOG_PROVIDER)?;
        tracing::debug!(tenant = %tenant, username = credential.username(), "resolved provider credential");
        self.verify(&credential, claim, images).await
    }

    async fn call_gateway(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<usign_core::ExtractionResult, VerifyError> {
        retry_with_backoff(&self.retry_policy, || {
            self.gateway.submit_for_verification(request)
        })
        .await
        .map_err(|(source, attempts)| VerifyError::from_gateway(source, attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureGateway;
    use chrono::NaiveDate;
    use url::Url;
    use usign_core::{DocumentType, InputError};

    fn credential() -> ProviderCredential {
        ProviderCredential::new(
            CRYPTOLOG_PROVIDER,
            Url::parse("https://sign.test.cryptolog.com/ra/rpc/").unwrap(),
            "test.coopengo@universign.com",
            "pw",
        )
    }

    fn claim() -> IdentityClaim {
        IdentityClaim::new(
            "Berthier",
            "Corinne",
            NaiveDate::from_ymd_opt(1965, 12, 6).unwrap(),
            DocumentType::IdCardFr,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn wrong_cardinality_fails_before_gateway() {
        let gateway = Arc::new(FixtureGateway::new());
        let engine = VerificationEngine::new(gateway.clone());
        let err = engine
            .verify(&credential(), &claim(), &[DocumentImage::new(b"front".to_vec())])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Input(InputError::ImageCount { expected: 2, actual: 1, .. })
        ));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn debug_shows_gateway_name() {
        let engine = VerificationEngine::new(Arc::new(FixtureGateway::new()));
        let dbg = format!("{engine:?}");
        assert!(dbg.contains("FixtureGateway"));
    }
}
