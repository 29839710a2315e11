//! QBR shared types.
//!
//! This crate provides the foundational pieces shared across the qbr crates:
//! - Calendar-to-relative date window normalization
//! - Canonical artifact names for the packaging list

pub mod artifacts;
pub mod window;

pub use window::{RelativeWindow, TimeWindow, WindowError};
