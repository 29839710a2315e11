//! Month-grouped report table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::MetricsError;

/// One raw row of the month-grouped report, as the service returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyRecord {
    pub month: String,
    pub installs: f64,
    pub reattributions: f64,
    pub sessions: f64,
    pub rejected_installs: f64,
    pub rejected_reattributions: f64,
    pub organic_install_rate: f64,
    pub maus: f64,
    pub clicks: f64,
    pub impressions: f64,
    /// Requested from the service but not charted.
    pub events: f64,
    pub revenue_events: f64,
}

/// One monthly row with derived columns filled in.
#[derive(Debug, Clone)]
pub struct MonthlyRow {
    /// First day of the month; the chronological sort key.
    pub month: NaiveDate,
    /// Display label, `Mon/YY`.
    pub label: String,
    pub installs: f64,
    pub reattributions: f64,
    pub sessions: f64,
    pub rejected_installs: f64,
    pub rejected_reattributions: f64,
    pub organic_install_rate: f64,
    pub maus: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub revenue_events: f64,
    pub total_attributions: f64,
    pub percent_installs: f64,
    pub percent_reattributions: f64,
    pub organic_installs: f64,
    pub paid_installs: f64,
    pub rejected_attributions: f64,
}

/// Month-grouped table, sorted chronologically ascending.
#[derive(Debug, Clone)]
pub struct MonthlyTable {
    pub rows: Vec<MonthlyRow>,
}

impl MonthlyTable {
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
            let record: MonthlyRecord = record?;
            rows.push(derive_row(record)?);
        }

        // The display label is not sortable as a string; order by the parsed
        // month before anything downstream sees the labels.
        rows.sort_by_key(|row| row.month);
        debug!(months = rows.len(), "monthly table derived");
        Ok(Self { rows })
    }

    /// Display labels in row order.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }

    /// Extract one column in row order.
    pub fn column<F>(&self, select: F) -> Vec<f64>
    where
        F: Fn(&MonthlyRow) -> f64,
    {
        self.rows.iter().map(select).collect()
    }
}

fn derive_row(record: MonthlyRecord) -> Result<MonthlyRow, MetricsError> {
    let month = parse_month(&record.month)?;
    let total_attributions = record.installs + record.reattributions;

    // A month with zero attributions renders as 0% / 0% rather than NaN.
    let (percent_installs, percent_reattributions) = if total_attributions > 0.0 {
        (
            record.installs / total_attributions * 100.0,
            record.reattributions / total_attributions * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let organic_installs = record.installs * record.organic_install_rate;
    let paid_installs = record.installs - organic_installs;
    let rejected_attributions = record.rejected_installs + record.rejected_reattributions;

    Ok(MonthlyRow {
        label: month.format("%b/%y").to_string(),
        month,
        installs: record.installs,
        reattributions: record.reattributions,
        sessions: record.sessions,
        rejected_installs: record.rejected_installs,
        rejected_reattributions: record.rejected_reattributions,
        organic_install_rate: record.organic_install_rate,
        maus: record.maus,
        clicks: record.clicks,
        impressions: record.impressions,
        revenue_events: record.revenue_events,
        total_attributions,
        percent_installs,
        percent_reattributions,
        organic_installs,
        paid_installs,
        rejected_attributions,
    })
}

fn parse_month(raw: &str) -> Result<NaiveDate, MetricsError> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| MetricsError::BadMonth(raw.to_string()))
}
