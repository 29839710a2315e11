//! QBR chart rendering.
//!
//! Eleven fixed chart specifications, each a pure data structure, and one
//! renderer that turns them into PNG files. Charts fail independently: one
//! bad chart never discards the other ten.

use thiserror::Error;

pub mod format;
pub mod render;
pub mod spec;

pub use format::ValueFormat;
pub use render::{render_all, ChartOutcome};
pub use spec::{catalog, ChartKind, ChartSpec, Series, Shade};

/// Errors from rendering a single chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The backing table has no rows; nothing to draw.
    #[error("chart '{0}' has no rows to draw")]
    EmptyTable(&'static str),

    /// Backend failure (file creation, font lookup, drawing).
    #[error("drawing failed: {0}")]
    Draw(String),
}
