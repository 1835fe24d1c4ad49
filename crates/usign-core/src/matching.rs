//! # Field Matching
//!
//! Turns an [`ExtractionResult`] and an [`IdentityClaim`] into a [`Verdict`].
//!
//! ## Evaluation Order
//!
//! 1. **Readability.** An unreadable result, a recognized document type that
//!    differs from the claimed one, a missing or blank field, a field whose
//!    confidence is below [`MatchPolicy::min_confidence`], or a birth date in
//!    no known layout all yield [`MismatchReason::DocumentUnreadable`]. No
//!    field is compared in that case.
//! 2. **Name**, then **first name**: normalized exact equality
//!    (see [`crate::normalize`]).
//! 3. **Birth date**: calendar-date equality.
//!
//! The first failing check decides the reason code.

use chrono::NaiveDate;

use crate::claim::IdentityClaim;
use crate::extraction::{parse_extracted_date, ExtractedField, ExtractedIdentity, ExtractionResult};
use crate::normalize::names_match;
use crate::verdict::{MismatchReason, Verdict};

/// Tunables for the readability pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Fields reported with a confidence below this value are treated as not
    /// extracted. Fields without a confidence score are always accepted.
    pub min_confidence: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }
}

/// Fields that passed the readability pass.
struct ReadableIdentity<'a> {
    last_name: &'a str,
    first_name: &'a str,
    birth_date: NaiveDate,
}

/// Decide whether `claim` is consistent with what the provider extracted.
pub fn decide(claim: &IdentityClaim, extraction: &ExtractionResult, policy: &MatchPolicy) -> Verdict {
    let identity = match extraction {
        ExtractionResult::Unreadable { .. } => {
            return Verdict::Mismatch(MismatchReason::DocumentUnreadable)
        }
        ExtractionResult::Extracted(identity) => identity,
    };

    let Some(readable) = readable_fields(claim, identity, policy) else {
        return Verdict::Mismatch(MismatchReason::DocumentUnreadable);
    };

    if !names_match(claim.full_name(), readable.last_name) {
        return Verdict::Mismatch(MismatchReason::NameMismatch);
    }
    if !names_match(claim.first_name(), readable.first_name) {
        return Verdict::Mismatch(MismatchReason::FirstNameMismatch);
    }
    if claim.birth_date() != readable.birth_date {
        return Verdict::Mismatch(MismatchReason::BirthDateMismatch);
    }
    Verdict::Match
}

fn readable_fields<'a>(
    claim: &IdentityClaim,
    identity: &'a ExtractedIdentity,
    policy: &MatchPolicy,
) -> Option<ReadableIdentity<'a>> {
    if let Some(detected) = identity.document_type {
        if detected != claim.document_type() {
            return None;
        }
    }
    let last_name = usable(identity.last_name.as_ref(), policy)?;
    let first_name = usable(identity.first_name.as_ref(), policy)?;
    let birth_date = parse_extracted_date(usable(identity.birth_date.as_ref(), policy)?)?;
    Some(ReadableIdentity {
        last_name,
        first_name,
        birth_date,
    })
}

fn usable<'a>(field: Option<&'a ExtractedField>, policy: &MatchPolicy) -> Option<&'a str> {
    let field = field?;
    if field.value.trim().is_empty() {
        return None;
    }
    match field.confidence {
        Some(c) if c.is_nan() || c < policy.min_confidence => None,
        _ => Some(field.value.as_str()),
    }
}
