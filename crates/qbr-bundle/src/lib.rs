//! QBR audit trail and output packaging.
//!
//! Records the request URLs of a run in a CSV audit trail, then bundles the
//! fixed artifact list into one ZIP archive, removing loose copies as they
//! are archived.

use thiserror::Error;

pub mod archive;
pub mod audit;

pub use archive::{archive_outputs, ArchiveSummary};
pub use audit::{write_audit_trail, AuditEntry, CredentialPolicy};

/// Errors from audit and packaging operations.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;
