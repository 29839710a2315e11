//! The sequential reporting pipeline.
//!
//! Stages run in order: normalize window, fetch both reports, derive and
//! render, write the audit trail, archive. Each stage is fatal for its own
//! output only; failures are logged and later stages guard on what actually
//! exists. Nothing is retried and nothing rolls back.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use qbr_bundle::{archive_outputs, write_audit_trail, AuditEntry, CredentialPolicy};
use qbr_charts::{catalog, render_all};
use qbr_common::artifacts;
use qbr_config::RunSettings;
use qbr_metrics::{ChannelTable, MonthlyTable};
use qbr_report::{ReportClient, ReportRequest};

/// One configured reporting run.
pub struct Pipeline {
    settings: RunSettings,
    out_dir: PathBuf,
    endpoint: String,
    credential_policy: CredentialPolicy,
}

impl Pipeline {
    pub fn new(
        settings: RunSettings,
        out_dir: PathBuf,
        endpoint: String,
        credential_policy: CredentialPolicy,
    ) -> Self {
        Self {
            settings,
            out_dir,
            endpoint,
            credential_policy,
        }
    }

    /// Run all stages against the current calendar date.
    pub fn run(&self) {
        self.run_at(Local::now().date_naive());
    }

    /// Run all stages with an explicit `today` for the window normalization.
    pub fn run_at(&self, today: NaiveDate) {
        let window = match self.settings.window.normalize(today) {
            Ok(window) => window,
            Err(err) => {
                error!(error = %err, "invalid date window, aborting run");
                return;
            }
        };
        let period = window.as_date_period();
        info!(date_period = %period, "window normalized");

        let client = ReportClient::new(&self.endpoint);
        let apps = self.settings.app_tokens.as_deref();
        let mut audit = Vec::new();

        // The two fetches are independent; one failing does not stop the other.
        let monthly_request = ReportRequest::monthly(&self.settings.utc_offset, apps, &period);
        self.fetch_into(&client, &monthly_request, artifacts::MONTHLY_CSV, &mut audit);

        let channel_request = ReportRequest::by_channel(&self.settings.utc_offset, apps, &period);
        self.fetch_into(&client, &channel_request, artifacts::CHANNEL_CSV, &mut audit);

        self.render_charts();

        if let Err(err) = write_audit_trail(&self.out_dir.join(artifacts::AUDIT_CSV), &audit) {
            error!(error = %err, "failed to write audit trail");
        }

        match archive_outputs(
            &self.out_dir,
            &artifacts::expected_artifacts(),
            artifacts::ARCHIVE_NAME,
        ) {
            Ok(summary) if !summary.missing.is_empty() => {
                warn!(missing = summary.missing.len(), "archive is incomplete")
            }
            Ok(_) => {}
            Err(err) => error!(error = %err, "failed during archiving"),
        }
    }

    fn fetch_into(
        &self,
        client: &ReportClient,
        request: &ReportRequest,
        filename: &str,
        audit: &mut Vec<AuditEntry>,
    ) {
        let dest = self.out_dir.join(filename);
        match client.fetch_csv(request, &self.settings.api_token, &dest) {
            Ok(url) => audit.push(AuditEntry::new(
                &self.settings.api_token,
                &url,
                self.credential_policy,
            )),
            Err(err) => error!(
                dimension = request.dimension.as_str(),
                error = %err,
                "report fetch failed"
            ),
        }
    }

    /// Derive both tables and render the full chart batch.
    ///
    /// Skipped entirely when either input CSV is absent; individual chart
    /// failures are logged by the renderer and do not stop the batch.
    fn render_charts(&self) {
        let monthly = match MonthlyTable::load(&self.out_dir.join(artifacts::MONTHLY_CSV)) {
            Ok(table) => table,
            Err(err) => {
                error!(error = %err, "monthly data unavailable, skipping charts");
                return;
            }
        };
        let channels = match ChannelTable::load(&self.out_dir.join(artifacts::CHANNEL_CSV)) {
            Ok(table) => table,
            Err(err) => {
                error!(error = %err, "channel data unavailable, skipping charts");
                return;
            }
        };

        let outcomes = render_all(&catalog(&monthly, &channels), &self.out_dir);
        let failures = outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count();
        if failures > 0 {
            warn!(failures, total = outcomes.len(), "some charts failed");
        }
    }
}
