//! Human-readable rendering of analysis results.
//!
//! The CLI prints these sections in plain text by default and serializes the
//! [`StatSummary`](crate::stats::StatSummary) directly in `--json` mode.

mod text;

pub use text::{NOT_APPLICABLE, SEPARATOR, render_imputation, render_section, render_summary};
