#![deny(missing_docs)]

//! # usign-core — Identity Verification Domain for Universign
//!
//! Foundational types and the decision procedure used to check a subscriber's
//! claimed identity against the fields a remote provider extracted from
//! scanned identity documents. This crate performs no I/O: the provider call
//! lives in `usign-client`, and everything here is a pure function of its
//! inputs.
//!
//! ## Design Principles
//!
//! 1. **Validated construction.** An [`IdentityClaim`] cannot exist with a
//!    blank name, and a [`TenantId`] cannot be empty. Image cardinality is
//!    checked by [`validate_images`] before anything reaches the network.
//!
//! 2. **Mismatch is not an error.** [`Verdict::Mismatch`] carries a
//!    [`MismatchReason`]; failures to *run* a verification are errors in the
//!    client crate. The two never convert into each other.
//!
//! 3. **Fixed evaluation order.** [`decide`] compares name, then first name,
//!    then birth date, and reports the first failing field so that reason
//!    codes are reproducible.
//!
//! 4. **Secrets stay opaque.** [`ProviderCredential`] keeps its password in a
//!    zeroizing buffer and redacts it from `Debug`.

pub mod claim;
pub mod credential;
pub mod document;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod normalize;
pub mod verdict;

pub use claim::{parse_birth_date, IdentityClaim};
pub use credential::{ProviderCredential, TenantId, CRYPTOLOG_PROVIDER};
pub use document::{validate_images, DocumentImage, DocumentType};
pub use error::InputError;
pub use extraction::{parse_extracted_date, ExtractedField, ExtractedIdentity, ExtractionResult};
pub use matching::{decide, MatchPolicy};
pub use normalize::{names_match, normalize_name};
pub use verdict::{MismatchReason, Verdict};
