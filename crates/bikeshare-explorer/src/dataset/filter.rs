//! Month and day-of-week filtering.

use super::Dataset;
use super::calendar::{DAY_OF_WEEK_COLUMN, MONTH_COLUMN};
use crate::error::{Result, ResultExt};
use crate::types::FilterSpec;
use polars::prelude::*;
use tracing::{info, warn};

/// Keep the records matching the month and day selectors of `spec`.
///
/// With both selectors set to `all` the dataset is returned unchanged. Rows
/// whose derived month or day is missing never match an active selector. An
/// empty result is not an error.
pub fn filter_dataset(dataset: &Dataset, spec: &FilterSpec) -> Result<Dataset> {
    if spec.city != dataset.city() {
        warn!(
            "Filter selects {} but dataset holds {} trips; applying month/day only",
            spec.city,
            dataset.city()
        );
    }

    if spec.is_unfiltered() {
        return Ok(dataset.clone());
    }

    let by_month = spec.month.number().map(|month| col(MONTH_COLUMN).eq(lit(month)));
    let by_day = spec.day.index().map(|day| col(DAY_OF_WEEK_COLUMN).eq(lit(day)));
    let predicate = [by_month, by_day]
        .into_iter()
        .flatten()
        .reduce(|left, right| left.and(right))
        .unwrap_or(lit(true));

    let frame = dataset
        .frame()
        .clone()
        .lazy()
        .filter(predicate)
        .collect()
        .context("filtering trips")?;

    info!(
        "Filter month={} day={} kept {} of {} trips",
        spec.month.token(),
        spec.day.token(),
        frame.height(),
        dataset.height()
    );

    Ok(dataset.with_frame(frame))
}
