//! # Verdicts
//!
//! The single externally observable result of a verification run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a claim did not match the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// Family name differs from the document.
    NameMismatch,
    /// Given name differs from the document.
    FirstNameMismatch,
    /// Birth date differs from the document.
    BirthDateMismatch,
    /// Identity fields could not be read from the images, or the images are
    /// not the declared document type.
    DocumentUnreadable,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameMismatch => write!(f, "name_mismatch"),
            Self::FirstNameMismatch => write!(f, "first_name_mismatch"),
            Self::BirthDateMismatch => write!(f, "birth_date_mismatch"),
            Self::DocumentUnreadable => write!(f, "document_unreadable"),
        }
    }
}

/// Result of comparing a claim against extracted document fields.
///
/// A mismatch is a normal outcome of a verification that ran to completion;
/// it is never used to report that the verification could not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Every compared field satisfied its rule.
    Match,
    /// The first failing check, in evaluation order.
    Mismatch(MismatchReason),
}

impl Verdict {
    /// Whether the claim matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Reason code for a mismatch; `None` on a match.
    pub fn reason(&self) -> Option<MismatchReason> {
        match self {
            Self::Match => None,
            Self::Mismatch(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch(reason) => write!(f, "mismatch ({reason})"),
        }
    }
}
