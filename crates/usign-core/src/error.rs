//! # Input Errors
//!
//! Errors raised while building or checking verification inputs. Every
//! variant is detected locally, before any request is sent to the provider.

use thiserror::Error;

use crate::document::DocumentType;

/// Malformed verification input.
///
/// Each variant carries the offending value or the expectation that was not
/// met, so that callers can report the problem without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A required claim field is empty or whitespace-only.
    #[error("claim field \"{0}\" must not be blank")]
    BlankField(&'static str),

    /// The document type code is not one the provider accepts.
    #[error("unknown document type: \"{0}\" (expected id_card_fr, passport or residence_permit)")]
    UnknownDocumentType(String),

    /// The number of images does not match what the document type requires.
    #[error("{document_type} requires {expected} image(s), got {actual}")]
    ImageCount {
        /// The declared document type.
        document_type: DocumentType,
        /// Images the document type requires.
        expected: usize,
        /// Images actually supplied.
        actual: usize,
    },

    /// An image blob contains no bytes.
    #[error("image #{index} is empty")]
    EmptyImage {
        /// Zero-based position of the empty image.
        index: usize,
    },

    /// Birth date text could not be parsed as a calendar date.
    #[error("invalid birth date: \"{value}\" (expected YYYY-MM-DD)")]
    InvalidBirthDate {
        /// The text that failed to parse.
        value: String,
    },

    /// Tenant identifier is empty.
    #[error("invalid tenant ID: must be non-empty")]
    InvalidTenantId,
}
