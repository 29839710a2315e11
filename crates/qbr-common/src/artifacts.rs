//! Canonical names of every artifact a run produces.
//!
//! The packaging stage works from this fixed list; charts and raw exports use
//! these constants so the two never drift apart.

/// Raw monthly report, persisted byte-for-byte from the service.
pub const MONTHLY_CSV: &str = "data_by_month.csv";
/// Raw per-channel report, persisted byte-for-byte from the service.
pub const CHANNEL_CSV: &str = "data_by_channel.csv";
/// Request audit trail.
pub const AUDIT_CSV: &str = "audit_trail.csv";
/// Final bundle holding everything above plus the chart images.
pub const ARCHIVE_NAME: &str = "qbr_outputs.zip";

pub const PERCENT_INSTALLS_REATTRIBUTIONS_CHART: &str =
    "percent_installsxreattributions_by_month.png";
pub const ABSOLUTE_INSTALLS_REATTRIBUTIONS_CHART: &str =
    "absolute_installsxreattributions_by_month.png";
pub const PAID_ORGANIC_INSTALLS_CHART: &str = "absolute_paidinstallsxorganicinstalls_by_month.png";
pub const PAID_INSTALLS_CHART: &str = "absolute_paidinstalls_by_month.png";
pub const TOP_INSTALLS_BY_CHANNEL_CHART: &str = "top_installs_by_channel.png";
pub const TOP_SESSIONS_BY_CHANNEL_CHART: &str = "top_sessions_by_channel.png";
pub const MAUS_CHART: &str = "maus_by_month.png";
pub const REJECTED_ATTRIBUTIONS_CHART: &str = "absolute_rejected_attributions_by_month.png";
pub const TOP_REJECTED_BY_CHANNEL_CHART: &str = "top_rejected_attributions_by_channel.png";
pub const SESSIONS_REVENUE_EVENTS_CHART: &str = "absolute_sessions_revevents_by_month.png";
pub const CLICKS_IMPRESSIONS_CHART: &str = "absolute_clicks_impressions_by_month.png";

/// The fixed packaging list, in archive order.
pub fn expected_artifacts() -> Vec<&'static str> {
    vec![
        MONTHLY_CSV,
        CHANNEL_CSV,
        AUDIT_CSV,
        PERCENT_INSTALLS_REATTRIBUTIONS_CHART,
        ABSOLUTE_INSTALLS_REATTRIBUTIONS_CHART,
        PAID_ORGANIC_INSTALLS_CHART,
        PAID_INSTALLS_CHART,
        TOP_INSTALLS_BY_CHANNEL_CHART,
        TOP_SESSIONS_BY_CHANNEL_CHART,
        MAUS_CHART,
        REJECTED_ATTRIBUTIONS_CHART,
        TOP_REJECTED_BY_CHANNEL_CHART,
        SESSIONS_REVENUE_EVENTS_CHART,
        CLICKS_IMPRESSIONS_CHART,
    ]
}
