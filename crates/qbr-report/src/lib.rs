//! QBR report retrieval.
//!
//! Builds fully-parameterized CSV report requests against the reports
//! service and persists successful responses verbatim.

pub mod fetch;
pub mod request;

pub use fetch::{FetchError, ReportClient};
pub use request::{Dimension, ReportRequest, CHANNEL_METRICS, MONTH_METRICS, REPORTS_ENDPOINT};
