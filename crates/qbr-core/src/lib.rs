//! QBR pipeline library.
//!
//! The `qbr` binary wires resolved settings into [`pipeline::Pipeline`];
//! everything else lives in the leaf crates.

pub mod pipeline;

pub use pipeline::Pipeline;
