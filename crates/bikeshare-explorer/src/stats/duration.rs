//! Trip duration totals, overall and split by gender.

use super::aggregates::NumericSummary;
use super::rows_where;
use crate::dataset::Dataset;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDurationStats {
    pub summary: NumericSummary,
    /// Records left out because their duration is still missing.
    pub skipped: usize,
}

/// Duration aggregates for male and female riders.
///
/// Records with any other gender value are not part of either subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderDurationStats {
    pub male: NumericSummary,
    pub female: NumericSummary,
}

pub fn trip_duration_stats(dataset: &Dataset) -> Result<TripDurationStats> {
    let durations = dataset
        .frame()
        .column(&dataset.columns().trip_duration)?
        .as_materialized_series();

    Ok(TripDurationStats {
        summary: NumericSummary::from_series(durations)?,
        skipped: durations.null_count(),
    })
}

/// `None` when the dataset has no gender column.
pub fn gender_duration_stats(dataset: &Dataset) -> Result<Option<GenderDurationStats>> {
    if !dataset.has_gender() {
        return Ok(None);
    }

    let columns = dataset.columns();
    let summary_for = |wanted: &str| -> Result<NumericSummary> {
        let riders = rows_where(dataset.frame(), &columns.gender, wanted)?;
        let durations = riders
            .column(&columns.trip_duration)?
            .as_materialized_series();
        Ok(NumericSummary::from_series(durations)?)
    };

    Ok(Some(GenderDurationStats {
        male: summary_for(MALE)?,
        female: summary_for(FEMALE)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{TestTrip, dataset_from_trips};

    fn trip(duration: Option<f64>, gender: Option<&'static str>) -> TestTrip {
        TestTrip {
            duration,
            gender,
            ..TestTrip::default()
        }
    }

    #[test]
    fn test_trip_duration_totals() {
        let dataset = dataset_from_trips(
            &[trip(Some(100.0), None), trip(Some(300.0), None), trip(None, None)],
            false,
        );

        let stats = trip_duration_stats(&dataset).unwrap();

        assert_eq!(stats.summary.total, 400.0);
        assert_eq!(stats.summary.mean, Some(200.0));
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_empty_duration_mean_is_undefined() {
        let dataset = dataset_from_trips(&[], false);
        let stats = trip_duration_stats(&dataset).unwrap();
        assert_eq!(stats.summary.total, 0.0);
        assert_eq!(stats.summary.mean, None);
    }

    #[test]
    fn test_gender_split_excludes_other_values() {
        let dataset = dataset_from_trips(
            &[
                trip(Some(100.0), Some(MALE)),
                trip(Some(500.0), Some(FEMALE)),
                trip(Some(300.0), Some(MALE)),
                trip(Some(9999.0), Some("not specified")),
            ],
            true,
        );

        let stats = gender_duration_stats(&dataset).unwrap().unwrap();

        assert_eq!(stats.male.count, 2);
        assert_eq!(stats.male.total, 400.0);
        assert_eq!(stats.male.mean, Some(200.0));
        assert_eq!(stats.male.max, Some(300.0));
        assert_eq!(stats.male.min, Some(100.0));
        assert_eq!(stats.female.count, 1);
        assert_eq!(stats.female.total, 500.0);
    }

    #[test]
    fn test_gender_split_without_female_riders() {
        let dataset = dataset_from_trips(&[trip(Some(100.0), Some(MALE))], true);
        let stats = gender_duration_stats(&dataset).unwrap().unwrap();
        assert!(stats.female.is_empty());
        assert_eq!(stats.female.min, None);
    }

    #[test]
    fn test_gender_split_skips_missing_gender_and_duration() {
        let dataset = dataset_from_trips(
            &[
                trip(Some(100.0), Some(MALE)),
                trip(Some(700.0), None),
                trip(None, Some(MALE)),
            ],
            true,
        );

        let stats = gender_duration_stats(&dataset).unwrap().unwrap();

        assert_eq!(stats.male.count, 1);
        assert_eq!(stats.male.total, 100.0);
        assert!(stats.female.is_empty());
    }

    #[test]
    fn test_no_gender_column() {
        let dataset = dataset_from_trips(&[trip(Some(100.0), None)], false);
        assert_eq!(gender_duration_stats(&dataset).unwrap(), None);
    }
}
