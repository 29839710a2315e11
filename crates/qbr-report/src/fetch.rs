//! Authenticated CSV retrieval.

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::request::ReportRequest;

/// Errors from a single report fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The service answered with a non-success status.
    #[error("report request failed with HTTP {status}")]
    Status { status: u16 },

    /// Connection, DNS, or TLS failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Failure writing the response body to disk.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Blocking HTTP client for the reports service.
///
/// Transport timeouts are left at the agent defaults.
pub struct ReportClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one report and persist the response body byte-for-byte.
    ///
    /// Returns the exact request URL on success so the caller can record it
    /// in the audit trail. The destination file is only created on HTTP 200.
    pub fn fetch_csv(
        &self,
        request: &ReportRequest,
        api_token: &str,
        dest: &Path,
    ) -> Result<String, FetchError> {
        let url = request.to_url(&self.base_url);
        debug!(dimension = request.dimension.as_str(), "requesting report");

        let response = match self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {api_token}"))
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => return Err(FetchError::Status { status }),
            Err(err) => return Err(FetchError::Transport(err.to_string())),
        };

        // The agent only errors on 4xx/5xx; the service speaks plain 200.
        if response.status() != 200 {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let mut reader = response.into_reader();
        let mut file = File::create(dest)?;
        io::copy(&mut reader, &mut file)?;
        info!(dest = %dest.display(), "report saved");

        Ok(url)
    }
}
