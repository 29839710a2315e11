//! Request audit trail.
//!
//! One row per successful fetch, written once at the end of the run. This is
//! a compliance record, not a security boundary; whether the bearer token
//! appears in cleartext is an explicit policy choice.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::Result;

/// How the bearer credential appears in the audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Replace the token with a fixed marker (default).
    Redact,
    /// Record the token in cleartext, as a deliberate compliance choice.
    Plaintext,
}

/// One audit row; created after a successful fetch, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    #[serde(rename = "Request Header")]
    pub header: String,
    #[serde(rename = "Requested URL")]
    pub requested_url: String,
}

impl AuditEntry {
    pub fn new(api_token: &str, requested_url: &str, policy: CredentialPolicy) -> Self {
        let credential = match policy {
            CredentialPolicy::Redact => "[redacted]",
            CredentialPolicy::Plaintext => api_token,
        };
        Self {
            header: format!("API Token: Bearer {credential}"),
            requested_url: requested_url.to_string(),
        }
    }
}

/// Write the audit trail CSV, header row included even when no fetch
/// succeeded.
pub fn write_audit_trail(path: &Path, entries: &[AuditEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if entries.is_empty() {
        writer.write_record(["Request Header", "Requested URL"])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    info!(path = %path.display(), requests = entries.len(), "audit trail saved");
    Ok(())
}
