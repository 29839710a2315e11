//! Channel-grouped report table and top-N subsets.

use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::MetricsError;

/// One raw row of the channel-grouped report.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRecord {
    pub channel: String,
    pub installs: f64,
    pub reattributions: f64,
    pub sessions: f64,
    pub rejected_installs: f64,
    pub rejected_reattributions: f64,
}

/// One channel row with the rejected-attributions total derived.
#[derive(Debug, Clone)]
pub struct ChannelRow {
    pub channel: String,
    pub installs: f64,
    pub reattributions: f64,
    pub sessions: f64,
    pub rejected_installs: f64,
    pub rejected_reattributions: f64,
    pub rejected_attributions: f64,
}

/// Channel-grouped table in service order.
#[derive(Debug, Clone)]
pub struct ChannelTable {
    pub rows: Vec<ChannelRow>,
}

impl ChannelTable {
    /// Load and derive from a persisted report CSV.
    pub fn load(path: &Path) -> Result<Self, MetricsError> {
        if !path.exists() {
            return Err(MetricsError::MissingInput(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MetricsError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let record: ChannelRecord = record?;
            let rejected_attributions = record.rejected_installs + record.rejected_reattributions;
            rows.push(ChannelRow {
                channel: record.channel,
                installs: record.installs,
                reattributions: record.reattributions,
                sessions: record.sessions,
                rejected_installs: record.rejected_installs,
                rejected_reattributions: record.rejected_reattributions,
                rejected_attributions,
            });
        }
        debug!(channels = rows.len(), "channel table derived");
        Ok(Self { rows })
    }

    /// Top `n` paid channels by `metric`, descending.
    ///
    /// Channels whose name contains "organic" (any case) are excluded before
    /// ranking, whatever their value.
    pub fn top_paid<F>(&self, metric: F, n: usize) -> Vec<ChannelRow>
    where
        F: Fn(&ChannelRow) -> f64,
    {
        let mut paid: Vec<ChannelRow> = self
            .rows
            .iter()
            .filter(|row| !row.channel.to_lowercase().contains("organic"))
            .cloned()
            .collect();
        paid.sort_by(|a, b| {
            metric(b)
                .partial_cmp(&metric(a))
                .unwrap_or(Ordering::Equal)
        });
        paid.truncate(n);
        paid
    }
}
