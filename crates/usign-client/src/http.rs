//! # HTTP Provider Gateway
//!
//! Production [`ProviderGateway`] backed by `reqwest`. One client is built
//! per gateway and shared by all calls; the credential is supplied per call,
//! so a single gateway serves every tenant.
//!
//! ## Endpoint
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `{endpoint_url}/validator/validate` | Extract identity fields from document images |
//!
//! Requests authenticate with HTTP basic auth. Images travel base64-encoded
//! in the JSON body, byte-for-byte as supplied.
//!
//! ## Status Mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 200 `status: extracted` | [`ExtractionResult::Extracted`] |
//! | 200 `status: unreadable` | [`ExtractionResult::Unreadable`] |
//! | 200/4xx `status: error` | [`GatewayError::Provider`] |
//! | 401, 403 | [`GatewayError::Authentication`] |
//! | 429, 5xx | [`GatewayError::ServiceUnavailable`] |
//! | other 4xx | [`GatewayError::Provider`] |
//!
//! Retries are NOT built into the gateway; the engine applies its
//! [`crate::retry::RetryPolicy`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use usign_core::{DocumentType, ExtractedField, ExtractedIdentity, ExtractionResult};

use crate::error::GatewayError;
use crate::gateway::{ProviderGateway, VerificationRequest};

/// Path of the extraction endpoint, relative to the credential's endpoint URL.
const VALIDATE_PATH: &str = "validator/validate";

/// Longest response-body excerpt kept in error messages.
const BODY_EXCERPT_LEN: usize = 512;

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ValidateRequestBody<'a> {
    reference: Uuid,
    document_type: DocumentType,
    images: Vec<String>,
    identity: ClaimedIdentityBody<'a>,
}

#[derive(Debug, Serialize)]
struct ClaimedIdentityBody<'a> {
    last_name: &'a str,
    first_name: &'a str,
    birth_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ValidateResponseBody {
    Extracted {
        #[serde(default)]
        document_type: Option<String>,
        #[serde(default)]
        fields: ExtractedFieldsBody,
    },
    Unreadable {
        #[serde(default)]
        explanation: Option<String>,
    },
    Error {
        code: String,
        #[serde(default)]
        message: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ExtractedFieldsBody {
    #[serde(default)]
    last_name: Option<ExtractedField>,
    #[serde(default)]
    first_name: Option<ExtractedField>,
    #[serde(default)]
    birth_date: Option<ExtractedField>,
}

impl ValidateResponseBody {
    fn into_extraction(self) -> Result<ExtractionResult, GatewayError> {
        match self {
            Self::Extracted {
                document_type,
                fields,
            } => {
                let document_type = match document_type.as_deref().map(str::parse::<DocumentType>) {
                    None => None,
                    Some(Ok(t)) => Some(t),
                    Some(Err(_)) => {
                        return Ok(ExtractionResult::Unreadable {
                            explanation: document_type
                                .map(|t| format!("unsupported document type detected: {t}")),
                        })
                    }
                };
                Ok(ExtractionResult::Extracted(ExtractedIdentity {
                    document_type,
                    last_name: fields.last_name,
                    first_name: fields.first_name,
                    birth_date: fields.birth_date,
                }))
            }
            Self::Unreadable { explanation } => Ok(ExtractionResult::Unreadable { explanation }),
            Self::Error { code, message } => Err(GatewayError::Provider { code, message }),
        }
    }
}

// -- Gateway --------------------------------------------------------------------

/// Real HTTP client for the Universign/Cryptolog extraction service.
#[derive(Debug, Clone)]
pub struct HttpProviderGateway {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProviderGateway {
    /// Build a gateway whose HTTP requests each time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("usign-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::NotConfigured {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, timeout })
    }

    fn validate_url(request: &VerificationRequest<'_>) -> String {
        format!(
            "{}/{VALIDATE_PATH}",
            request.credential.endpoint_url().as_str().trim_end_matches('/')
        )
    }

    fn request_body<'a>(request: &VerificationRequest<'a>) -> ValidateRequestBody<'a> {
        let engine = base64::engine::general_purpose::STANDARD;
        ValidateRequestBody {
            reference: request.reference,
            document_type: request.document_type(),
            images: request
                .images
                .iter()
                .map(|image| engine.encode(image.as_bytes()))
                .collect(),
            identity: ClaimedIdentityBody {
                last_name: request.claim.full_name(),
                first_name: request.claim.first_name(),
                birth_date: request.claim.birth_date(),
            },
        }
    }

    fn map_send_error(&self, url: &str, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                elapsed_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            GatewayError::Transport {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl ProviderGateway for HttpProviderGateway {
    async fn submit_for_verification(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<ExtractionResult, GatewayError> {
        let url = Self::validate_url(request);
        let body = Self::request_body(request);

        tracing::debug!(
            endpoint = %url,
            reference = %request.reference,
            document_type = %request.document_type(),
            images = request.images.len(),
            "submitting documents to provider"
        );

        let resp = self
            .client
            .post(&url)
            .basic_auth(
                request.credential.username(),
                Some(request.credential.password()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Authentication {
                username: request.credential.username().to_string(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(|e| self.map_send_error(&url, e))?;

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::ServiceUnavailable {
                endpoint: url,
                status: status.as_u16(),
                body: excerpt(&text),
            });
        }

        if status.is_client_error() {
            return match serde_json::from_str::<ValidateResponseBody>(&text) {
                Ok(ValidateResponseBody::Error { code, message }) => {
                    Err(GatewayError::Provider { code, message })
                }
                _ => Err(GatewayError::Provider {
                    code: format!("http_{}", status.as_u16()),
                    message: excerpt(&text),
                }),
            };
        }

        let parsed: ValidateResponseBody =
            serde_json::from_str(&text).map_err(|e| GatewayError::MalformedResponse {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;
        parsed.into_extraction()
    }

    fn gateway_name(&self) -> &str {
        "HttpProviderGateway"
    }
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_body_maps_fields() {
        let json = r#"{
            "status": "extracted",
            "document_type": "id_card_fr",
            "fields": {
                "last_name": {"value": "BERTHIER", "confidence": 0.98},
                "first_name": {"value": "CORINNE", "confidence": 0.97},
                "birth_date": {"value": "06.12.1965"}
            }
        }"#;
        let body: ValidateResponseBody = serde_json::from_str(json).unwrap();
        let ExtractionResult::Extracted(identity) = body.into_extraction().unwrap() else {
            panic!("expected extracted result");
        };
        assert_eq!(identity.document_type, Some(DocumentType::IdCardFr));
        assert_eq!(identity.last_name.unwrap().value, "BERTHIER");
        assert_eq!(identity.birth_date.unwrap().confidence, None);
    }

    #[test]
    fn extracted_without_fields_is_empty_identity() {
        let body: ValidateResponseBody = serde_json::from_str(r#"{"status":"extracted"}"#).unwrap();
        assert_eq!(
            body.into_extraction().unwrap(),
            ExtractionResult::Extracted(ExtractedIdentity::default())
        );
    }

    #[test]
    fn unknown_detected_type_is_unreadable() {
        let body: ValidateResponseBody = serde_json::from_str(
            r#"{"status":"extracted","document_type":"library_card","fields":{}}"#,
        )
        .unwrap();
        assert!(matches!(
            body.into_extraction().unwrap(),
            ExtractionResult::Unreadable { explanation: Some(e) } if e.contains("library_card")
        ));
    }

    #[test]
    fn error_body_is_provider_error() {
        let body: ValidateResponseBody = serde_json::from_str(
            r#"{"status":"error","code":"invalid_account","message":"account disabled"}"#,
        )
        .unwrap();
        let err = body.into_extraction().unwrap_err();
        assert!(matches!(err, GatewayError::Provider { code, .. } if code == "invalid_account"));
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert!(serde_json::from_str::<ValidateResponseBody>(r#"{"status":"pending"}"#).is_err());
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(BODY_EXCERPT_LEN + 10);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), BODY_EXCERPT_LEN + 1);
        assert_eq!(excerpt("short"), "short");
    }
}
