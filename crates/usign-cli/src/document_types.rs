//! # Document Types Subcommand
//!
//! Lists the document types the provider accepts and how many images each
//! one takes.

use anyhow::Result;
use clap::Args;

use usign_core::DocumentType;

use crate::EXIT_MATCH;

/// Arguments for the `usign document-types` subcommand.
#[derive(Args, Debug)]
pub struct DocumentTypesArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the document-types subcommand.
pub fn run_document_types(args: &DocumentTypesArgs) -> Result<u8> {
    let out = if args.json {
        serde_json::to_string_pretty(&document_types_json())?
    } else {
        document_types_table()
    };
    println!("{out}");
    Ok(EXIT_MATCH)
}

fn document_types_json() -> serde_json::Value {
    DocumentType::ALL
        .iter()
        .map(|t| serde_json::json!({"code": t.as_str(), "images": t.expected_images()}))
        .collect()
}

fn document_types_table() -> String {
    let mut out = format!("{:<18} IMAGES", "CODE");
    for t in DocumentType::ALL {
        out.push_str(&format!("\n{:<18} {}", t.as_str(), t.expected_images()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lists_every_type() {
        let json = document_types_json();
        assert_eq!(
            json,
            serde_json::json!([
                {"code": "id_card_fr", "images": 2},
                {"code": "passport", "images": 1},
                {"code": "residence_permit", "images": 2}
            ])
        );
    }

    #[test]
    fn table_has_header_and_one_row_per_type() {
        let table = document_types_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 1 + DocumentType::ALL.len());
        assert!(lines[0].starts_with("CODE"));
        assert!(lines[1].starts_with("id_card_fr"));
        assert!(lines[2].trim_end().ends_with('1'));
    }
}
