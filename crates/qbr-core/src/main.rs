//! `qbr` binary entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use qbr_bundle::CredentialPolicy;
use qbr_config::{resolve, RawSettings, StdinPrompt};
use qbr_core::Pipeline;

/// Fetch attribution reports, render QBR charts, and bundle the outputs.
#[derive(Parser, Debug)]
#[command(name = "qbr", version, about)]
struct Cli {
    /// API token for the reports service (prompted when omitted)
    #[arg(long, env = "QBR_API_TOKEN")]
    api_token: Option<String>,

    /// Space-separated app tokens, or 'all' for no filter
    #[arg(long, env = "QBR_APP_TOKENS")]
    app_tokens: Option<String>,

    /// UTC offset for the report, e.g. +00:00 or -03:00
    #[arg(long, env = "QBR_UTC_OFFSET")]
    utc_offset: Option<String>,

    /// Calendar range, YYYY-MM-DD/YYYY-MM-DD
    #[arg(long, env = "QBR_DATE_RANGE")]
    date_range: Option<String>,

    /// Directory for outputs and the final archive
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Reports service endpoint
    #[arg(long, env = "QBR_ENDPOINT", default_value = qbr_report::REPORTS_ENDPOINT)]
    endpoint: String,

    /// Record the bearer token in cleartext in the audit trail
    #[arg(long)]
    audit_plaintext: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = RawSettings {
        api_token: cli.api_token,
        app_tokens: cli.app_tokens,
        utc_offset: cli.utc_offset,
        date_range: cli.date_range,
    };

    let settings = match resolve(raw, &mut StdinPrompt) {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "invalid settings");
            return;
        }
    };

    let credential_policy = if cli.audit_plaintext {
        CredentialPolicy::Plaintext
    } else {
        CredentialPolicy::Redact
    };

    Pipeline::new(settings, cli.out_dir, cli.endpoint, credential_policy).run();
}
