//! Pipeline module.
//!
//! Wires the stages together: load, filter, impute, summarize.

mod builder;

pub use builder::{Analysis, Explorer, ExplorerBuilder};
