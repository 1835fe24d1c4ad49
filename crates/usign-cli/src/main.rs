//! # usign CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use usign_cli::document_types::{run_document_types, DocumentTypesArgs};
use usign_cli::verify::{run_verify, VerifyArgs};

/// Universign identity verification
///
/// Checks that a subscriber's declared name, first name and birth date match
/// the identity document they scanned.
#[derive(Parser, Debug)]
#[command(name = "usign", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a claimed identity against document images.
    Verify(VerifyArgs),

    /// List supported document types.
    DocumentTypes(DocumentTypesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout carries only the verdict JSON.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "usign CLI starting");

    let result = match cli.command {
        Commands::Verify(args) => run_verify(&args),
        Commands::DocumentTypes(args) => run_document_types(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
