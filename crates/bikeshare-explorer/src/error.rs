//! Custom error types for the bike-share explorer.
//!
//! Only conditions that abort a run are errors. Empty filter results,
//! undefined aggregates and unresolved missing values are reported as
//! [`Caveat`](crate::stats::Caveat)s on the summary instead.
//!
//! Errors are serializable so the CLI can emit them in `--json` mode.

use crate::types::City;
use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The source file for a city is missing or could not be parsed.
    #[error("Data for {city} is unavailable at '{}': {reason}", .path.display())]
    DataUnavailable {
        city: City,
        path: PathBuf,
        reason: String,
    },

    /// One or more configured source files do not exist.
    #[error("Missing data files: {}", join_paths(.0))]
    MissingSources(Vec<PathBuf>),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExplorerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExplorerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "DATA_UNAVAILABLE",
            Self::MissingSources(_) => "MISSING_SOURCES",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ExplorerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExplorerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExplorerError::Polars(e).with_context(context))
    }
}
