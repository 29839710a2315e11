//! The eleven chart specifications.
//!
//! Each spec is plain data: what to draw, from which derived columns, into
//! which file. The renderer consumes them without knowing which chart is
//! which.

use qbr_common::artifacts;
use qbr_metrics::{ChannelRow, ChannelTable, MonthlyTable};

use crate::format::ValueFormat;

/// How many channels the top-N subsets keep.
pub const TOP_CHANNELS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Vertical bars, series stacked bottom-up in spec order.
    StackedBar,
    /// Single line series with point markers and labels.
    Line,
}

/// Bar shade; also selects the annotation text color (white on dark,
/// black on light).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Dark,
    Light,
}

/// One series of values, aligned with the spec's x labels.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: &'static str,
    pub shade: Shade,
    pub values: Vec<f64>,
}

/// One complete chart specification.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub filename: &'static str,
    pub title: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub kind: ChartKind,
    pub x_labels: Vec<String>,
    /// Bottom-up stacking order.
    pub series: Vec<Series>,
    pub value_format: ValueFormat,
    /// Label zero-valued segments `<0.1` at a synthetic visible position.
    pub zero_label_guard: bool,
}

/// Build all eleven chart specs from the derived tables.
pub fn catalog(monthly: &MonthlyTable, channels: &ChannelTable) -> Vec<ChartSpec> {
    let months = monthly.labels();

    let top_installs = channels.top_paid(|row| row.installs, TOP_CHANNELS);
    let top_sessions = channels.top_paid(|row| row.sessions, TOP_CHANNELS);
    let top_rejected = channels.top_paid(|row| row.rejected_attributions, TOP_CHANNELS);

    vec![
        ChartSpec {
            filename: artifacts::PERCENT_INSTALLS_REATTRIBUTIONS_CHART,
            title: "Monthly Installs and Reattributions (Percentage)",
            x_title: "Month",
            y_title: "Percentage",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![
                Series {
                    label: "Installs",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.percent_installs),
                },
                Series {
                    label: "Reattributions",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.percent_reattributions),
                },
            ],
            value_format: ValueFormat::Percent,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::ABSOLUTE_INSTALLS_REATTRIBUTIONS_CHART,
            title: "Monthly Installs and Reattributions (Absolute Values)",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![
                Series {
                    label: "Installs",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.installs),
                },
                Series {
                    label: "Reattributions",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.reattributions),
                },
            ],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::PAID_ORGANIC_INSTALLS_CHART,
            title: "Monthly Paid Installs and Organic Installs (Absolute Values)",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![
                Series {
                    label: "Organic Installs",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.organic_installs),
                },
                Series {
                    label: "Paid Installs",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.paid_installs),
                },
            ],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::PAID_INSTALLS_CHART,
            title: "Monthly Paid Installs (Absolute Values)",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![Series {
                label: "Paid Installs",
                shade: Shade::Dark,
                values: monthly.column(|row| row.paid_installs),
            }],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::TOP_INSTALLS_BY_CHANNEL_CHART,
            title: "Top 5 Installs by Channel (Excluding Organic)",
            x_title: "Channel",
            y_title: "Installs",
            kind: ChartKind::StackedBar,
            x_labels: channel_names(&top_installs),
            series: vec![Series {
                label: "Channel",
                shade: Shade::Dark,
                values: top_installs.iter().map(|row| row.installs).collect(),
            }],
            value_format: ValueFormat::Count,
            zero_label_guard: true,
        },
        ChartSpec {
            filename: artifacts::TOP_SESSIONS_BY_CHANNEL_CHART,
            title: "Top 5 Sessions by Channel (Excluding Organic)",
            x_title: "Channel",
            y_title: "Sessions",
            kind: ChartKind::StackedBar,
            x_labels: channel_names(&top_sessions),
            series: vec![Series {
                label: "Channel",
                shade: Shade::Dark,
                values: top_sessions.iter().map(|row| row.sessions).collect(),
            }],
            value_format: ValueFormat::Count,
            zero_label_guard: true,
        },
        ChartSpec {
            filename: artifacts::MAUS_CHART,
            title: "MAUs by Month",
            x_title: "Month",
            y_title: "MAUs",
            kind: ChartKind::Line,
            x_labels: months.clone(),
            series: vec![Series {
                label: "MAUs",
                shade: Shade::Dark,
                values: monthly.column(|row| row.maus),
            }],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::REJECTED_ATTRIBUTIONS_CHART,
            title: "Monthly Rejected Attributions",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![
                Series {
                    label: "Rejected Reattributions",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.rejected_reattributions),
                },
                Series {
                    label: "Rejected Installs",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.rejected_installs),
                },
            ],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::TOP_REJECTED_BY_CHANNEL_CHART,
            title: "Top 5 Rejected Attributions by Channel (Installs + Reattributions)",
            x_title: "Channel",
            y_title: "Rejected Attributions",
            kind: ChartKind::StackedBar,
            x_labels: channel_names(&top_rejected),
            series: vec![Series {
                label: "Channel",
                shade: Shade::Dark,
                values: top_rejected
                    .iter()
                    .map(|row| row.rejected_attributions)
                    .collect(),
            }],
            value_format: ValueFormat::Count,
            zero_label_guard: true,
        },
        ChartSpec {
            filename: artifacts::SESSIONS_REVENUE_EVENTS_CHART,
            title: "Monthly Sessions and Revenue Events",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months.clone(),
            series: vec![
                Series {
                    label: "Revenue Events",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.revenue_events),
                },
                Series {
                    label: "Sessions",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.sessions),
                },
            ],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
        ChartSpec {
            filename: artifacts::CLICKS_IMPRESSIONS_CHART,
            title: "Monthly Clicks and Impressions",
            x_title: "Month",
            y_title: "Count",
            kind: ChartKind::StackedBar,
            x_labels: months,
            series: vec![
                Series {
                    label: "Clicks",
                    shade: Shade::Dark,
                    values: monthly.column(|row| row.clicks),
                },
                Series {
                    label: "Impressions",
                    shade: Shade::Light,
                    values: monthly.column(|row| row.impressions),
                },
            ],
            value_format: ValueFormat::Count,
            zero_label_guard: false,
        },
    ]
}

fn channel_names(rows: &[ChannelRow]) -> Vec<String> {
    rows.iter().map(|row| row.channel.clone()).collect()
}
