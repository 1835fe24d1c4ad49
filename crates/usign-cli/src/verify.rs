//! # Verify Subcommand
//!
//! Checks a claimed identity against scanned document images through the
//! live Universign/Cryptolog service and prints the verdict as JSON.
//!
//! The provider credential comes either from a credentials file looked up by
//! tenant (`--tenant` with `--credentials`) or from `USIGN_USERNAME`,
//! `USIGN_PASSWORD` and `USIGN_PROVIDER_URL`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use usign_client::{
    credential_from_env, HttpProviderGateway, InMemoryCredentialStore, VerificationConfig,
    VerificationEngine,
};
use usign_core::{parse_birth_date, DocumentImage, DocumentType, IdentityClaim, TenantId, Verdict};

use crate::{EXIT_MATCH, EXIT_MISMATCH};

/// Arguments for the `usign verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Subscriber's last name as recorded in the contract.
    #[arg(long)]
    pub name: String,

    /// Subscriber's first name.
    #[arg(long)]
    pub first_name: String,

    /// Birth date, `YYYY-MM-DD`.
    #[arg(long)]
    pub birth_date: String,

    /// Kind of document presented (see `usign document-types`).
    #[arg(long, default_value = "id_card_fr")]
    pub document_type: String,

    /// Document image file. Repeat for front and back, in that order.
    #[arg(long = "image", value_name = "PATH", required = true)]
    pub images: Vec<PathBuf>,

    /// Tenant whose credential to use from the credentials file.
    #[arg(long, requires = "credentials")]
    pub tenant: Option<String>,

    /// YAML credentials file.
    #[arg(long, value_name = "FILE", requires = "tenant")]
    pub credentials: Option<PathBuf>,
}

/// Execute the verify subcommand.
///
/// Returns [`EXIT_MATCH`] or [`EXIT_MISMATCH`]; failures to run the
/// verification come back as errors.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let claim = build_claim(args)?;
    let images = load_images(&args.images)?;

    let config = VerificationConfig::from_env().context("invalid verification configuration")?;
    let gateway = HttpProviderGateway::new(config.http_timeout())
        .context("failed to build provider HTTP client")?;
    let engine = VerificationEngine::from_config(Arc::new(gateway), &config);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let verdict = runtime.block_on(execute(&engine, args, &claim, &images))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&verdict).context("failed to serialize verdict")?
    );
    Ok(exit_code(verdict))
}

/// Build the identity claim from command-line fields.
pub fn build_claim(args: &VerifyArgs) -> Result<IdentityClaim> {
    let document_type: DocumentType = args
        .document_type
        .parse()
        .with_context(|| format!("invalid --document-type {:?}", args.document_type))?;
    let birth_date = parse_birth_date(&args.birth_date)
        .with_context(|| format!("invalid --birth-date {:?}", args.birth_date))?;
    Ok(IdentityClaim::new(
        args.name.as_str(),
        args.first_name.as_str(),
        birth_date,
        document_type,
    )?)
}

/// Read each image file in the order given.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<DocumentImage>> {
    paths.iter().map(|path| load_image(path)).collect()
}

fn load_image(path: &Path) -> Result<DocumentImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document image");
    Ok(DocumentImage::new(bytes))
}

/// Run the verification with the credential selected by `args`.
pub async fn execute(
    engine: &VerificationEngine,
    args: &VerifyArgs,
    claim: &IdentityClaim,
    images: &[DocumentImage],
) -> Result<Verdict> {
    let verdict = match (&args.tenant, &args.credentials) {
        (Some(tenant), Some(path)) => {
            let store = InMemoryCredentialStore::from_yaml_file(path)?;
            let tenant = TenantId::new(tenant.as_str()).context("invalid --tenant")?;
            engine
                .verify_for_tenant(&store, &tenant, claim, images)
                .await?
        }
        _ => {
            let credential =
                credential_from_env().context("no credentials file given and environment incomplete")?;
            engine.verify(&credential, claim, images).await?
        }
    };
    Ok(verdict)
}

/// Map a verdict to the process exit code.
pub fn exit_code(verdict: Verdict) -> u8 {
    if verdict.is_match() {
        EXIT_MATCH
    } else {
        EXIT_MISMATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use usign_client::{FixtureGateway, RetryPolicy};
    use usign_core::{ExtractedField, ExtractedIdentity, ExtractionResult, MismatchReason};

    const CREDENTIALS: &str = r#"
tenants:
  coopengo:
    - provider: cryptolog
      provider_url: https://sign.test.cryptolog.com/ra/rpc/
      username: test.coopengo@universign.com
      password: EGC0S50W
"#;

    fn args(dir: &Path, first_name: &str) -> VerifyArgs {
        let front = dir.join("recto.jpg");
        let back = dir.join("verso.jpg");
        std::fs::write(&front, b"CNI-FR-TEST-RECTO.jpg").unwrap();
        std::fs::write(&back, b"CNI-FR-TEST-VERSO.jpg").unwrap();
        let credentials = dir.join("credentials.yaml");
        std::fs::write(&credentials, CREDENTIALS).unwrap();

        VerifyArgs {
            name: "Berthier".into(),
            first_name: first_name.into(),
            birth_date: "1965-12-06".into(),
            document_type: "id_card_fr".into(),
            images: vec![front, back],
            tenant: Some("coopengo".into()),
            credentials: Some(credentials),
        }
    }

    fn engine() -> VerificationEngine {
        let extraction = ExtractionResult::Extracted(ExtractedIdentity {
            document_type: Some(DocumentType::IdCardFr),
            last_name: Some(ExtractedField::with_confidence("BERTHIER", 0.98)),
            first_name: Some(ExtractedField::with_confidence("CORINNE", 0.97)),
            birth_date: Some(ExtractedField::with_confidence("06/12/1965", 0.95)),
        });
        let gateway = FixtureGateway::new().with_document(
            vec![
                DocumentImage::new(b"CNI-FR-TEST-RECTO.jpg".to_vec()),
                DocumentImage::new(b"CNI-FR-TEST-VERSO.jpg".to_vec()),
            ],
            extraction,
        );
        VerificationEngine::new(Arc::new(gateway)).with_retry_policy(RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(1),
        })
    }

    fn run(args: &VerifyArgs) -> Result<Verdict> {
        let claim = build_claim(args)?;
        let images = load_images(&args.images)?;
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(execute(&engine(), args, &claim, &images))
    }

    #[test]
    fn matching_subscriber_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let verdict = run(&args(dir.path(), "Corinne")).unwrap();
        assert_eq!(verdict, Verdict::Match);
        assert_eq!(exit_code(verdict), EXIT_MATCH);
    }

    #[test]
    fn wrong_first_name_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let verdict = run(&args(dir.path(), "Bad firstname")).unwrap();
        assert_eq!(verdict, Verdict::Mismatch(MismatchReason::FirstNameMismatch));
        assert_eq!(exit_code(verdict), EXIT_MISMATCH);
    }

    #[test]
    fn unknown_tenant_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "Corinne");
        args.tenant = Some("acme".into());
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("acme"));
    }

    #[test]
    fn missing_image_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_images(&[dir.path().join("absent.jpg")]).unwrap_err();
        assert!(err.to_string().contains("absent.jpg"));
    }

    #[test]
    fn bad_birth_date_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "Corinne");
        args.birth_date = "06/12/1965".into();
        let err = build_claim(&args).unwrap_err();
        assert!(err.to_string().contains("--birth-date"));
    }

    #[test]
    fn unknown_document_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "Corinne");
        args.document_type = "driving_licence".into();
        let err = build_claim(&args).unwrap_err();
        assert!(err.to_string().contains("--document-type"));
    }

    #[test]
    fn verdict_prints_as_tagged_json() {
        let json = serde_json::to_value(Verdict::Mismatch(MismatchReason::BirthDateMismatch)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"outcome": "mismatch", "reason": "birth_date_mismatch"})
        );
    }
}
