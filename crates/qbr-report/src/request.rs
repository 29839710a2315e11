//! Report request construction.
//!
//! The reports service takes every parameter on the query string. Apart from
//! the UTC offset, app filter, window, grouping dimension, and metric list,
//! all parameters are fixed for this tool.

/// Production CSV report endpoint.
pub const REPORTS_ENDPOINT: &str =
    "https://dash.adjust.com/control-center/reports-service/csv_report";

/// Metric list for the month-grouped report, in request order.
pub const MONTH_METRICS: &[&str] = &[
    "installs",
    "reattributions",
    "sessions",
    "rejected_installs",
    "rejected_reattributions",
    "organic_install_rate",
    "maus",
    "clicks",
    "impressions",
    "events",
    "revenue_events",
];

/// Metric list for the channel-grouped report, in request order.
pub const CHANNEL_METRICS: &[&str] = &[
    "installs",
    "reattributions",
    "sessions",
    "rejected_installs",
    "rejected_reattributions",
];

/// Grouping axis of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Month,
    Channel,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Month => "month",
            Dimension::Channel => "channel",
        }
    }
}

/// One fully-parameterized report request.
///
/// Metric names are passed through as given; the service rejects unknown
/// names itself.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub utc_offset: String,
    /// `None` means no `app_token__in` filter (all apps).
    pub app_tokens: Option<Vec<String>>,
    /// Normalized window, e.g. `-44d:-14d`.
    pub date_period: String,
    pub dimension: Dimension,
    pub metrics: Vec<String>,
}

impl ReportRequest {
    /// Month-grouped request with the standard monthly metric list.
    pub fn monthly(utc_offset: &str, app_tokens: Option<&[String]>, date_period: &str) -> Self {
        Self::new(utc_offset, app_tokens, date_period, Dimension::Month, MONTH_METRICS)
    }

    /// Channel-grouped request with the standard channel metric list.
    pub fn by_channel(utc_offset: &str, app_tokens: Option<&[String]>, date_period: &str) -> Self {
        Self::new(utc_offset, app_tokens, date_period, Dimension::Channel, CHANNEL_METRICS)
    }

    fn new(
        utc_offset: &str,
        app_tokens: Option<&[String]>,
        date_period: &str,
        dimension: Dimension,
        metrics: &[&str],
    ) -> Self {
        Self {
            utc_offset: utc_offset.to_string(),
            app_tokens: app_tokens.map(|tokens| tokens.to_vec()),
            date_period: date_period.to_string(),
            dimension,
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Assemble the full request URL against `base`.
    pub fn to_url(&self, base: &str) -> String {
        let app_token_param = match &self.app_tokens {
            Some(tokens) => format!("&app_token__in={}", tokens.join(",")),
            None => String::new(),
        };

        format!(
            "{base}?utc_offset={offset}{apps}\
             &reattributed=all\
             &attribution_source=dynamic\
             &attribution_type=all\
             &ad_spend_mode=network\
             &date_period={period}\
             &cohort_maturity=immature\
             &sandbox=false\
             &assisting_attribution_type=all\
             &ironsource_mode=ironsource\
             &dimensions={dimensions}\
             &metrics={metrics}\
             &sort=-installs\
             &is_report_setup_open=true",
            offset = self.utc_offset,
            apps = app_token_param,
            period = self.date_period,
            dimensions = self.dimension.as_str(),
            metrics = self.metrics.join(","),
        )
    }
}
