//! In-memory trip datasets.
//!
//! A [`Dataset`] pairs a polars [`DataFrame`] with a schema that tags each
//! column with a [`ColumnKind`]. Kinds are assigned once when the dataset is
//! built and drive the imputation policy later on, so no stage needs to
//! inspect runtime dtypes again.
//!
//! - [`DatasetLoader`] reads a city's CSV file
//! - [`calendar`] derives `month`, `day_of_week` and `hour` from the start time
//! - [`filter_dataset`] restricts a dataset to a month and/or weekday

pub mod calendar;
mod filter;
mod loader;

pub use calendar::{DAY_OF_WEEK_COLUMN, HOUR_COLUMN, MONTH_COLUMN};
pub use filter::filter_dataset;
pub use loader::DatasetLoader;

use crate::config::TripColumns;
use crate::error::{ExplorerError, Result, ResultExt};
use crate::types::City;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How missing values in a column are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point values.
    Numeric,
    /// Text or any other non-numeric values.
    Categorical,
}

impl ColumnKind {
    fn of(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// A column name with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// The trip table for one city.
#[derive(Debug, Clone)]
pub struct Dataset {
    city: City,
    frame: DataFrame,
    schema: Vec<ColumnSpec>,
    columns: TripColumns,
}

impl Dataset {
    /// Build a dataset from a raw frame.
    ///
    /// Checks that the required columns exist, coerces trip duration and
    /// birth year to `Float64`, appends the derived calendar columns and
    /// records the kind of every column.
    pub fn from_frame(city: City, mut frame: DataFrame, columns: &TripColumns) -> Result<Self> {
        for name in columns.required() {
            if frame.column(name).is_err() {
                return Err(ExplorerError::ColumnNotFound(name.to_string()));
            }
        }

        for name in [&columns.trip_duration, &columns.birth_year] {
            if let Ok(column) = frame.column(name) {
                let as_float = column
                    .as_materialized_series()
                    .cast(&DataType::Float64)
                    .context(format!("coercing '{}' to float", name))?;
                frame.replace(name, as_float)?;
            }
        }

        for derived in calendar::derive_calendar_columns(&frame, &columns.start_time)? {
            frame.with_column(derived)?;
        }

        let schema = frame
            .get_columns()
            .iter()
            .map(|column| ColumnSpec {
                name: column.name().to_string(),
                kind: ColumnKind::of(column.dtype()),
            })
            .collect::<Vec<_>>();

        debug!(
            "Built {} dataset: {} rows, schema {:?}",
            city,
            frame.height(),
            schema
        );

        Ok(Self {
            city,
            frame,
            schema,
            columns: columns.clone(),
        })
    }

    /// Same city, schema and column names over a different frame.
    ///
    /// Used by the filter and imputation stages, which keep every column.
    pub(crate) fn with_frame(&self, frame: DataFrame) -> Self {
        Self {
            city: self.city,
            frame,
            schema: self.schema.clone(),
            columns: self.columns.clone(),
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn schema(&self) -> &[ColumnSpec] {
        &self.schema
    }

    pub fn columns(&self) -> &TripColumns {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Kind recorded for a column, if the column exists.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.schema
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    pub fn has_gender(&self) -> bool {
        self.has_column(&self.columns.gender)
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_column(&self.columns.birth_year)
    }

    /// Numeric columns (after the first) that still hold missing values.
    pub fn unresolved_missing(&self) -> Vec<(String, usize)> {
        self.schema
            .iter()
            .skip(1)
            .filter(|spec| spec.kind == ColumnKind::Numeric)
            .filter_map(|spec| {
                let missing = self.frame.column(&spec.name).ok()?.null_count();
                (missing > 0).then(|| (spec.name.clone(), missing))
            })
            .collect()
    }

    /// A window of raw rows, or `None` once `offset` is past the end.
    pub fn rows(&self, offset: usize, len: usize) -> Option<DataFrame> {
        if offset >= self.frame.height() {
            return None;
        }
        Some(self.frame.slice(offset as i64, len))
    }
}
