//! # Identity Documents
//!
//! Document types accepted by the provider and the raw images that are
//! submitted for extraction.
//!
//! ## Cardinality
//!
//! Two-sided cards (French national ID card, residence permit) need a front
//! and a back image, in that order. A passport needs the data page only.
//! [`validate_images`] enforces this before any network call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// Kind of identity document submitted for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// French national identity card (CNI), front and back.
    IdCardFr,
    /// Passport, data page only.
    Passport,
    /// French residence permit (titre de séjour), front and back.
    ResidencePermit,
}

impl DocumentType {
    /// All supported document types, in display order.
    pub const ALL: [DocumentType; 3] = [Self::IdCardFr, Self::Passport, Self::ResidencePermit];

    /// Wire code used by the provider API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdCardFr => "id_card_fr",
            Self::Passport => "passport",
            Self::ResidencePermit => "residence_permit",
        }
    }

    /// Number of images the provider expects for this document type.
    pub fn expected_images(&self) -> usize {
        match self {
            Self::IdCardFr | Self::ResidencePermit => 2,
            Self::Passport => 1,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| InputError::UnknownDocumentType(s.to_string()))
    }
}

/// A scanned identity-document image.
///
/// The bytes are passed to the provider unmodified; the format (JPEG, PNG,
/// PDF) is whatever the provider accepts and is not inspected here.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentImage(Vec<u8>);

impl DocumentImage {
    /// Wrap raw image bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the image has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Image payloads can be megabytes; print the size only.
impl fmt::Debug for DocumentImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentImage({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for DocumentImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Check that `images` has the cardinality `document_type` requires and
/// that no image is empty.
pub fn validate_images(
    document_type: DocumentType,
    images: &[DocumentImage],
) -> Result<(), InputError> {
    let expected = document_type.expected_images();
    if images.len() != expected {
        return Err(InputError::ImageCount {
            document_type,
            expected,
            actual: images.len(),
        });
    }
    if let Some(index) = images.iter().position(DocumentImage::is_empty) {
        return Err(InputError::EmptyImage { index });
    }
    Ok(())
}
