//! Most frequent times of travel.

use super::aggregates::{Frequency, mode};
use crate::dataset::{DAY_OF_WEEK_COLUMN, Dataset, HOUR_COLUMN, MONTH_COLUMN};
use crate::error::Result;
use crate::utils::i32_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Popular month, weekday and hour.
///
/// Month and weekday are only reported when the records span more than one
/// distinct value; a filter that pins them makes the answer trivial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    /// Month number, 1 = January.
    pub popular_month: Option<Frequency<i32>>,
    /// Day index, 0 = Monday.
    pub popular_day: Option<Frequency<i32>>,
    /// Hour of day; `None` only when there are no records.
    pub popular_hour: Option<Frequency<i32>>,
}

/// Mode of a calendar column, or `None` unless it holds more than one
/// distinct value.
fn popular_if_varied(frame: &DataFrame, name: &str) -> Result<Option<Frequency<i32>>> {
    let values = frame
        .column(name)?
        .as_materialized_series()
        .drop_nulls()
        .cast(&DataType::Int32)?;

    if values.n_unique()? > 1 {
        Ok(mode(values.i32()?.into_iter().flatten()))
    } else {
        Ok(None)
    }
}

pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let frame = dataset.frame();
    let hours = i32_values(frame, HOUR_COLUMN)?.into_iter().flatten();

    Ok(TimeStats {
        popular_month: popular_if_varied(frame, MONTH_COLUMN)?,
        popular_day: popular_if_varied(frame, DAY_OF_WEEK_COLUMN)?,
        popular_hour: mode(hours),
    })
}
