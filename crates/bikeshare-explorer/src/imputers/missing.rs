//! Missing-value imputation by column kind.

use crate::config::DEFAULT_MISSING_PLACEHOLDER;
use crate::dataset::{ColumnKind, Dataset};
use crate::error::{Result, ResultExt};
use crate::utils::{backfill_numeric_nulls, fill_string_nulls};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How a column's missing values were filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum ImputationMethod {
    /// Each gap takes the next non-missing value in row order.
    BackwardFill,
    /// Each gap takes a fixed placeholder.
    Placeholder(String),
}

/// Diagnostic record for one column that had missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationNote {
    pub column: String,
    pub kind: ColumnKind,
    pub method: ImputationMethod,
    /// Missing cells before imputation.
    pub missing: usize,
    /// Missing cells left afterwards (trailing gaps under backward fill).
    pub unresolved: usize,
}

/// Fills missing values in every column except the first.
#[derive(Debug, Clone)]
pub struct MissingValueImputer {
    placeholder: String,
}

impl Default for MissingValueImputer {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_PLACEHOLDER)
    }
}

impl MissingValueImputer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Return a copy of `dataset` with missing values filled.
    ///
    /// Numeric columns are backward filled, leaving trailing gaps as they
    /// are. Categorical columns get the placeholder. Columns without gaps are
    /// left alone, so running this twice gives the same result as once.
    pub fn impute(&self, dataset: &Dataset) -> Result<(Dataset, Vec<ImputationNote>)> {
        info!("Checking {} columns for missing values...", dataset.schema().len());

        let mut frame = dataset.frame().clone();
        let mut notes = Vec::new();

        for spec in dataset.schema().iter().skip(1) {
            let series = frame
                .column(&spec.name)
                .context(format!("reading '{}' for imputation", spec.name))?
                .as_materialized_series();

            let missing = series.null_count();
            if missing == 0 {
                continue;
            }

            let (filled, method) = match spec.kind {
                ColumnKind::Numeric => (
                    backfill_numeric_nulls(series)?,
                    ImputationMethod::BackwardFill,
                ),
                ColumnKind::Categorical => (
                    fill_string_nulls(series, &self.placeholder)?,
                    ImputationMethod::Placeholder(self.placeholder.clone()),
                ),
            };

            let unresolved = filled.null_count();
            frame.replace(&spec.name, filled)?;

            match &method {
                ImputationMethod::BackwardFill => info!(
                    "Missing values found in column '{}': {} backward filled",
                    spec.name,
                    missing - unresolved
                ),
                ImputationMethod::Placeholder(value) => info!(
                    "Missing values found in column '{}': {} replaced with '{}'",
                    spec.name, missing, value
                ),
            }
            if unresolved > 0 {
                warn!(
                    "Column '{}' keeps {} trailing missing values after backward fill",
                    spec.name, unresolved
                );
            }

            notes.push(ImputationNote {
                column: spec.name.clone(),
                kind: spec.kind,
                method,
                missing,
                unresolved,
            });
        }

        debug!("Imputation touched {} columns", notes.len());
        Ok((dataset.with_frame(frame), notes))
    }
}
