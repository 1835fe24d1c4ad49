//! # Extraction Results
//!
//! What the provider read out of the submitted images. The provider either
//! returns the identity fields it found, each with an optional confidence
//! score, or signals that the documents could not be read at all.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::DocumentType;

/// Date layouts the provider is known to emit for birth dates.
const EXTRACTED_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%Y%m%d"];

/// A single field read from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// The text as read by the provider.
    pub value: String,
    /// Provider confidence between 0.0 and 1.0, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ExtractedField {
    /// A field without a confidence score.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence: None,
        }
    }

    /// A field with a confidence score.
    pub fn with_confidence(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence: Some(confidence),
        }
    }
}

/// Identity fields extracted from a readable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIdentity {
    /// Document type the provider recognized, if it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<ExtractedField>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<ExtractedField>,
    /// Birth date, in one of the provider's date layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<ExtractedField>,
}

/// Outcome of the provider's extraction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// The provider read identity fields from the images.
    Extracted(ExtractedIdentity),
    /// The images could not be read, or are not an identity document.
    Unreadable {
        /// Provider explanation, when given.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
}

impl ExtractionResult {
    /// An unreadable result with no explanation.
    pub fn unreadable() -> Self {
        Self::Unreadable { explanation: None }
    }
}

/// Parse a birth date as emitted by the provider.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, `DD.MM.YYYY` and `YYYYMMDD`. A
/// trailing time component after a `T` or a space is ignored.
pub fn parse_extracted_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    EXTRACTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_all_known_layouts() {
        assert_eq!(parse_extracted_date("1965-12-06"), Some(ymd(1965, 12, 6)));
        assert_eq!(parse_extracted_date("06/12/1965"), Some(ymd(1965, 12, 6)));
        assert_eq!(parse_extracted_date("06.12.1965"), Some(ymd(1965, 12, 6)));
        assert_eq!(parse_extracted_date("19651206"), Some(ymd(1965, 12, 6)));
    }

    #[test]
    fn ignores_time_component() {
        assert_eq!(parse_extracted_date("1965-12-06T08:05:00"), Some(ymd(1965, 12, 6)));
        assert_eq!(parse_extracted_date("1965-12-06 08:05"), Some(ymd(1965, 12, 6)));
    }

    #[test]
    fn rejects_unparsable_dates() {
        assert_eq!(parse_extracted_date(""), None);
        assert_eq!(parse_extracted_date("6 dec 1965"), None);
        assert_eq!(parse_extracted_date("31/02/1965"), None);
    }

    #[test]
    fn deserializes_tagged_extraction() {
        let json = r#"{
            "status": "extracted",
            "document_type": "id_card_fr",
            "last_name": {"value": "BERTHIER", "confidence": 0.98},
            "first_name": {"value": "CORINNE"},
            "birth_date": {"value": "06.12.1965", "confidence": 0.91}
        }"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        let ExtractionResult::Extracted(identity) = result else {
            panic!("expected extracted result");
        };
        assert_eq!(identity.document_type, Some(DocumentType::IdCardFr));
        assert_eq!(identity.last_name, Some(ExtractedField::with_confidence("BERTHIER", 0.98)));
        assert_eq!(identity.first_name, Some(ExtractedField::new("CORINNE")));
    }

    #[test]
    fn deserializes_unreadable() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"status":"unreadable","explanation":"blurred"}"#).unwrap();
        assert_eq!(
            result,
            ExtractionResult::Unreadable {
                explanation: Some("blurred".into())
            }
        );
    }
}
