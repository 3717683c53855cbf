//! Shared utilities for reading and rewriting polars columns.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Column Extraction Utilities
// =============================================================================

/// Read a column as owned optional strings, casting non-string columns.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series();
    let as_str = series.cast(&DataType::String)?;
    Ok(as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read a column as optional `f64`, casting integer columns.
///
/// Cells that cannot be represented as a float come back as `None`.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    let as_f64 = series.cast(&DataType::Float64)?;
    Ok(as_f64.f64()?.into_iter().collect())
}

/// Read a column as optional `i32`.
pub fn i32_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i32>>> {
    let series = df.column(name)?.as_materialized_series();
    let as_i32 = series.cast(&DataType::Int32)?;
    Ok(as_i32.i32()?.into_iter().collect())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let as_str = series.cast(&DataType::String)?;
    let filled: Vec<String> = as_str
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value).to_string())
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

/// Backward-fill nulls in a numeric Series.
///
/// Each null takes the next non-null value below it. Trailing nulls have no
/// later value and stay null.
pub fn backfill_numeric_nulls(series: &Series) -> PolarsResult<Series> {
    series.fill_null(FillNullStrategy::Backward(None))
}

// =============================================================================
// Tests
// =============================================================================
