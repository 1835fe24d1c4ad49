//! # usign-cli — CLI Tool for Universign Identity Verification
//!
//! Provides the `usign` command-line interface for operators and for
//! checking a provider account outside the ERP workflow.
//!
//! ## Subcommands
//!
//! - `usign verify` — Check a claimed identity against scanned documents.
//! - `usign document-types` — List supported document types.
//!
//! ```bash
//! usign verify --name Berthier --first-name Corinne --birth-date 1965-12-06 \
//!     --document-type id_card_fr --image recto.jpg --image verso.jpg
//! usign verify ... --tenant coopengo --credentials credentials.yaml
//! usign document-types --json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Identity matches the documents |
//! | 1 | Verification could not run |
//! | 2 | Identity does not match the documents |

pub mod document_types;
pub mod verify;

/// Exit code for a matching identity (and successful informational commands).
pub const EXIT_MATCH: u8 = 0;

/// Exit code for a verification that ran and did not match.
pub const EXIT_MISMATCH: u8 = 2;
