//! # Identity Claim
//!
//! The identity a subscriber asserts: family name, first name, birth date and
//! the type of document offered as evidence. A claim is validated once at
//! construction and is read-only afterwards.

use chrono::{NaiveDate, NaiveDateTime};

use crate::document::DocumentType;
use crate::error::InputError;

/// A claimed identity to check against scanned documents.
///
/// `full_name` is the family name as printed on the document (the party
/// record's `name`); `first_name` is the given name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    full_name: String,
    first_name: String,
    birth_date: NaiveDate,
    document_type: DocumentType,
}

impl IdentityClaim {
    /// Build a claim, rejecting blank names.
    ///
    /// Names are stored as given; normalization happens at comparison time
    /// so that the original spelling is what gets sent to the provider.
    pub fn new(
        full_name: impl Into<String>,
        first_name: impl Into<String>,
        birth_date: NaiveDate,
        document_type: DocumentType,
    ) -> Result<Self, InputError> {
        let full_name = full_name.into();
        let first_name = first_name.into();
        if full_name.trim().is_empty() {
            return Err(InputError::BlankField("full_name"));
        }
        if first_name.trim().is_empty() {
            return Err(InputError::BlankField("first_name"));
        }
        Ok(Self {
            full_name,
            first_name,
            birth_date,
            document_type,
        })
    }

    /// Build a claim from a birth date-time, as party records often store it.
    /// The time of day is discarded.
    pub fn with_birth_datetime(
        full_name: impl Into<String>,
        first_name: impl Into<String>,
        birth: NaiveDateTime,
        document_type: DocumentType,
    ) -> Result<Self, InputError> {
        Self::new(full_name, first_name, birth.date(), document_type)
    }

    /// Family name as claimed.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Given name as claimed.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Claimed birth date.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Document type offered as evidence.
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }
}

/// Parse a birth date given as `YYYY-MM-DD`.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| InputError::InvalidBirthDate {
        value: value.to_string(),
    })
}
