//! Descriptive statistics over a filtered, imputed dataset.
//!
//! Each section is an independent pure function of a [`Dataset`]:
//!
//! - [`time_stats`]: popular month, weekday and hour
//! - [`station_stats`]: popular start/end stations and station pair
//! - [`trip_duration_stats`]: total and mean duration
//! - [`user_stats`]: user type, gender and birth year breakdowns
//! - [`gender_duration_stats`]: duration aggregates for male/female riders
//! - [`user_type_trip_stats`]: popular station pair per user type
//!
//! [`summarize`] runs all of them in that order and collects the results in
//! a [`StatSummary`]. Every "most frequent" value is a mode whose ties go to
//! the value seen first.

mod aggregates;
mod duration;
mod station;
mod time;
mod user;

pub use aggregates::{Frequency, NumericSummary, mode, numeric_mode, value_counts};
pub use duration::{
    FEMALE, GenderDurationStats, MALE, TripDurationStats, gender_duration_stats,
    trip_duration_stats,
};
pub use station::{
    CUSTOMER, SUBSCRIBER, StationStats, UserTypeTripStats, station_stats, trip_key,
    user_type_trip_stats,
};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYearStats, UserStats, user_stats};

use crate::dataset::Dataset;
use crate::error::{Result, ResultExt};
use crate::types::FilterSpec;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Statistic sections in the order they are computed and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    TimeOfTravel,
    Stations,
    TripDuration,
    Users,
    GenderDuration,
    UserTypeTrips,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::TimeOfTravel,
        Section::Stations,
        Section::TripDuration,
        Section::Users,
        Section::GenderDuration,
        Section::UserTypeTrips,
    ];
}

/// Wall-clock time spent computing one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionTiming {
    pub section: Section,
    pub elapsed_secs: f64,
}

/// A non-fatal condition attached to a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caveat {
    /// The filter matched no records.
    EmptyFilterResult,
    /// A statistic was requested over an empty subset.
    UndefinedAggregate { statistic: String },
    /// A numeric column still holds missing values after imputation.
    ResidualMissingValue { column: String, count: usize },
}

impl fmt::Display for Caveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caveat::EmptyFilterResult => f.write_str("no trips match the selected filters"),
            Caveat::UndefinedAggregate { statistic } => {
                write!(f, "{} is not applicable (no matching trips)", statistic)
            }
            Caveat::ResidualMissingValue { column, count } => write!(
                f,
                "{} trailing missing value(s) in '{}' could not be backward filled",
                count, column
            ),
        }
    }
}

/// All statistics computed for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub filter: FilterSpec,
    /// Number of records the statistics were computed over.
    pub records: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub trip_duration: TripDurationStats,
    pub users: UserStats,
    /// `None` when the dataset has no gender column.
    pub gender_durations: Option<GenderDurationStats>,
    pub user_type_trips: UserTypeTripStats,
    pub caveats: Vec<Caveat>,
    pub timings: Vec<SectionTiming>,
}

impl StatSummary {
    pub fn timing(&self, section: Section) -> Option<f64> {
        self.timings
            .iter()
            .find(|t| t.section == section)
            .map(|t| t.elapsed_secs)
    }
}

/// Rows whose `column` equals `value`. Missing cells never match.
pub(crate) fn rows_where(frame: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
    frame
        .clone()
        .lazy()
        .filter(col(column).eq(lit(value)))
        .collect()
        .context(format!("selecting rows where '{}' is '{}'", column, value))
}

fn timed<T>(
    section: Section,
    timings: &mut Vec<SectionTiming>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let start = Instant::now();
    let value = f().context(format!("computing {:?} statistics", section))?;
    let elapsed_secs = start.elapsed().as_secs_f64();
    debug!("{:?} statistics took {:.6}s", section, elapsed_secs);
    timings.push(SectionTiming {
        section,
        elapsed_secs,
    });
    Ok(value)
}

/// Compute every statistic section for `dataset`, in [`Section::ALL`] order.
pub fn summarize(dataset: &Dataset, filter: &FilterSpec) -> Result<StatSummary> {
    info!("Computing statistics over {} trips...", dataset.height());
    let mut timings = Vec::with_capacity(Section::ALL.len());

    let time = timed(Section::TimeOfTravel, &mut timings, || time_stats(dataset))?;
    let stations = timed(Section::Stations, &mut timings, || station_stats(dataset))?;
    let trip_duration = timed(Section::TripDuration, &mut timings, || {
        trip_duration_stats(dataset)
    })?;
    let users = timed(Section::Users, &mut timings, || user_stats(dataset))?;
    let gender_durations = timed(Section::GenderDuration, &mut timings, || {
        gender_duration_stats(dataset)
    })?;
    let user_type_trips = timed(Section::UserTypeTrips, &mut timings, || {
        user_type_trip_stats(dataset)
    })?;

    let mut summary = StatSummary {
        filter: *filter,
        records: dataset.height(),
        time,
        stations,
        trip_duration,
        users,
        gender_durations,
        user_type_trips,
        caveats: Vec::new(),
        timings,
    };
    summary.caveats = collect_caveats(dataset, &summary);

    for caveat in &summary.caveats {
        warn!("{}", caveat);
    }
    Ok(summary)
}

fn collect_caveats(dataset: &Dataset, summary: &StatSummary) -> Vec<Caveat> {
    let mut caveats = Vec::new();

    if dataset.is_empty() {
        caveats.push(Caveat::EmptyFilterResult);
    }

    for (column, count) in dataset.unresolved_missing() {
        caveats.push(Caveat::ResidualMissingValue { column, count });
    }

    let mut undefined = |statistic: &str, defined: bool| {
        if !defined {
            caveats.push(Caveat::UndefinedAggregate {
                statistic: statistic.to_string(),
            });
        }
    };

    undefined("popular hour", summary.time.popular_hour.is_some());
    undefined("popular start station", summary.stations.popular_start.is_some());
    undefined("popular end station", summary.stations.popular_end.is_some());
    undefined("popular trip", summary.stations.popular_trip.is_some());
    undefined("mean trip duration", summary.trip_duration.summary.mean.is_some());

    if let Some(years) = &summary.users.birth_years {
        undefined("birth year statistics", years.most_common.is_some());
    }
    if let Some(split) = &summary.gender_durations {
        undefined("male trip duration statistics", !split.male.is_empty());
        undefined("female trip duration statistics", !split.female.is_empty());
    }

    undefined(
        "popular trip for subscribers",
        summary.user_type_trips.subscriber.is_some(),
    );
    undefined(
        "popular trip for customers",
        summary.user_type_trips.customer.is_some(),
    );

    caveats
}


#[cfg(test)]
mod tests {
    use super::test_support::{TestTrip, dataset_from_trips};
    use super::*;
    use crate::types::{City, MonthFilter};

    #[test]
    fn test_summarize_runs_every_section_in_order() {
        let dataset = dataset_from_trips(&[TestTrip::default(), TestTrip::default()], true);
        let summary = summarize(&dataset, &FilterSpec::new(City::Chicago)).unwrap();

        let order: Vec<Section> = summary.timings.iter().map(|t| t.section).collect();
        assert_eq!(order, Section::ALL.to_vec());
        assert_eq!(summary.records, 2);
        assert!(summary.gender_durations.is_some());
    }

    #[test]
    fn test_summarize_empty_dataset_reports_caveats() {
        let dataset = dataset_from_trips(&[], false);
        let filter = FilterSpec::new(City::Washington).with_month(MonthFilter::Apr);

        let summary = summarize(&dataset, &filter).unwrap();

        assert_eq!(summary.records, 0);
        assert_eq!(summary.caveats[0], Caveat::EmptyFilterResult);
        assert!(summary.caveats.contains(&Caveat::UndefinedAggregate {
            statistic: "popular hour".to_string()
        }));
        assert!(summary.caveats.contains(&Caveat::UndefinedAggregate {
            statistic: "popular trip for customers".to_string()
        }));
        assert_eq!(summary.gender_durations, None);
    }

    #[test]
    fn test_summarize_without_customers() {
        let dataset = dataset_from_trips(&[TestTrip::default()], false);
        let summary = summarize(&dataset, &FilterSpec::new(City::Washington)).unwrap();

        assert_eq!(summary.user_type_trips.customer, None);
        assert_eq!(
            summary.caveats,
            vec![Caveat::UndefinedAggregate {
                statistic: "popular trip for customers".to_string()
            }]
        );
    }

    #[test]
    fn test_summarize_flags_residual_missing_values() {
        let trips = [
            TestTrip::default(),
            TestTrip {
                duration: None,
                ..TestTrip::default()
            },
        ];
        let dataset = dataset_from_trips(&trips, false);
        let summary = summarize(&dataset, &FilterSpec::new(City::Washington)).unwrap();

        assert!(summary.caveats.contains(&Caveat::ResidualMissingValue {
            column: "Trip Duration".to_string(),
            count: 1
        }));
        assert_eq!(summary.trip_duration.skipped, 1);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let rider = TestTrip {
            gender: Some(MALE),
            birth_year: Some(1990.0),
            ..TestTrip::default()
        };
        let dataset = dataset_from_trips(&[rider], true);
        let summary = summarize(&dataset, &FilterSpec::new(City::Chicago)).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["filter"]["city"], "chicago");
        assert_eq!(json["stations"]["popular_trip"]["value"], "(Clark St) TO (State St)");
        assert_eq!(json["caveats"][0]["kind"], "undefined_aggregate");
        assert_eq!(
            json["caveats"][0]["statistic"],
            "female trip duration statistics"
        );
    }
}
