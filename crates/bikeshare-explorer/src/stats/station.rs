//! Popular stations and station pairs.

use super::aggregates::{Frequency, mode};
use super::rows_where;
use crate::config::TripColumns;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::utils::string_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

pub const SUBSCRIBER: &str = "Subscriber";
pub const CUSTOMER: &str = "Customer";

/// Key identifying a trip by its start and end station.
pub fn trip_key(start: &str, end: &str) -> String {
    format!("({}) TO ({})", start, end)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStats {
    pub popular_start: Option<Frequency<String>>,
    pub popular_end: Option<Frequency<String>>,
    /// Most frequent start/end pair, keyed by [`trip_key`].
    pub popular_trip: Option<Frequency<String>>,
}

/// Most frequent station pair for each user type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTypeTripStats {
    pub subscriber: Option<Frequency<String>>,
    pub customer: Option<Frequency<String>>,
}

/// Trip keys per row; `None` where either station is missing.
fn trip_keys(frame: &DataFrame, columns: &TripColumns) -> Result<Vec<Option<String>>> {
    let starts = string_values(frame, &columns.start_station)?;
    let ends = string_values(frame, &columns.end_station)?;

    Ok(starts
        .iter()
        .zip(ends.iter())
        .map(|(start, end)| match (start, end) {
            (Some(start), Some(end)) => Some(trip_key(start, end)),
            _ => None,
        })
        .collect())
}

pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    let frame = dataset.frame();
    let columns = dataset.columns();
    let starts = string_values(frame, &columns.start_station)?;
    let ends = string_values(frame, &columns.end_station)?;

    Ok(StationStats {
        popular_start: mode(starts.into_iter().flatten()),
        popular_end: mode(ends.into_iter().flatten()),
        popular_trip: mode(trip_keys(frame, columns)?.into_iter().flatten()),
    })
}

pub fn user_type_trip_stats(dataset: &Dataset) -> Result<UserTypeTripStats> {
    let columns = dataset.columns();
    let popular_for = |wanted: &str| -> Result<Option<Frequency<String>>> {
        let riders = rows_where(dataset.frame(), &columns.user_type, wanted)?;
        Ok(mode(trip_keys(&riders, columns)?.into_iter().flatten()))
    };

    Ok(UserTypeTripStats {
        subscriber: popular_for(SUBSCRIBER)?,
        customer: popular_for(CUSTOMER)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{TestTrip, dataset_from_trips};

    fn trip(start: &'static str, end: &'static str, user_type: &'static str) -> TestTrip {
        TestTrip {
            start_station: start,
            end_station: end,
            user_type,
            ..TestTrip::default()
        }
    }

    #[test]
    fn test_trip_key_format() {
        assert_eq!(trip_key("Clark St", "State St"), "(Clark St) TO (State St)");
    }

    #[test]
    fn test_station_stats() {
        let dataset = dataset_from_trips(
            &[
                trip("Clark St", "State St", SUBSCRIBER),
                trip("Lake St", "State St", SUBSCRIBER),
                trip("Clark St", "Lake St", CUSTOMER),
                trip("Lake St", "State St", SUBSCRIBER),
            ],
            false,
        );

        let stats = station_stats(&dataset).unwrap();

        // Clark St and Lake St tie at 2; Clark St was seen first.
        assert_eq!(stats.popular_start, Some(Frequency::new("Clark St".to_string(), 2)));
        assert_eq!(stats.popular_end, Some(Frequency::new("State St".to_string(), 3)));
        assert_eq!(
            stats.popular_trip,
            Some(Frequency::new("(Lake St) TO (State St)".to_string(), 2))
        );
    }

    #[test]
    fn test_user_type_trip_stats() {
        let dataset = dataset_from_trips(
            &[
                trip("A", "B", SUBSCRIBER),
                trip("B", "C", CUSTOMER),
                trip("A", "B", SUBSCRIBER),
                trip("C", "A", CUSTOMER),
                trip("C", "A", CUSTOMER),
            ],
            false,
        );

        let stats = user_type_trip_stats(&dataset).unwrap();

        assert_eq!(stats.subscriber, Some(Frequency::new("(A) TO (B)".to_string(), 2)));
        assert_eq!(stats.customer, Some(Frequency::new("(C) TO (A)".to_string(), 2)));
    }

    #[test]
    fn test_no_customers_is_not_applicable() {
        let dataset = dataset_from_trips(
            &[trip("A", "B", SUBSCRIBER), trip("B", "A", SUBSCRIBER)],
            false,
        );

        let stats = user_type_trip_stats(&dataset).unwrap();

        assert_eq!(stats.subscriber, Some(Frequency::new("(A) TO (B)".to_string(), 1)));
        assert_eq!(stats.customer, None);
    }

    #[test]
    fn test_empty_dataset_has_no_stations() {
        let dataset = dataset_from_trips(&[], false);
        let stats = station_stats(&dataset).unwrap();
        assert_eq!(stats.popular_start, None);
        assert_eq!(stats.popular_trip, None);
    }
}
