//! QBR run-settings resolution and validation.
//!
//! This crate provides:
//! - Typed settings for a reporting run
//! - Resolution of missing values through a prompt abstraction, so the
//!   pipeline itself never touches stdin
//! - Validation of the UTC offset and date-range inputs

pub mod prompt;
pub mod settings;

pub use prompt::{SettingsPrompt, StdinPrompt};
pub use settings::{resolve, ConfigError, RawSettings, RunSettings};
