//! QBR derived metrics.
//!
//! Loads the two persisted report CSVs into typed tables and computes the
//! derived columns the charts consume: attribution totals and percentages,
//! the organic/paid split, rejected-attribution totals, and top-N channel
//! subsets.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod channel;
pub mod monthly;

pub use channel::{ChannelRow, ChannelTable};
pub use monthly::{MonthlyRow, MonthlyTable};

/// Errors from table loading and derivation.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A required input CSV does not exist; derivation halts before rendering.
    #[error("required input missing: {0}")]
    MissingInput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unparsable month label '{0}': expected YYYY-MM")]
    BadMonth(String),
}
