//! Rider demographics.

use super::aggregates::{Frequency, NumericSummary, numeric_mode, value_counts};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::utils::{f64_values, string_values};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthYearStats {
    pub earliest: Option<f64>,
    pub most_recent: Option<f64>,
    pub most_common: Option<Frequency<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Counts per user type, most common first.
    pub user_types: Vec<Frequency<String>>,
    /// Counts per gender; `None` when the dataset has no gender column.
    pub genders: Option<Vec<Frequency<String>>>,
    /// `None` when the dataset has no birth year column.
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    let frame = dataset.frame();
    let columns = dataset.columns();

    let user_types = value_counts(string_values(frame, &columns.user_type)?.into_iter().flatten());

    let genders = if dataset.has_gender() {
        Some(value_counts(
            string_values(frame, &columns.gender)?.into_iter().flatten(),
        ))
    } else {
        None
    };

    let birth_years = if dataset.has_birth_year() {
        let years = frame.column(&columns.birth_year)?.as_materialized_series();
        let range = NumericSummary::from_series(years)?;
        let values = f64_values(frame, &columns.birth_year)?;
        Some(BirthYearStats {
            earliest: range.min,
            most_recent: range.max,
            most_common: numeric_mode(values.into_iter().flatten()),
        })
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{TestTrip, dataset_from_trips};
    use pretty_assertions::assert_eq;

    fn rider(
        user_type: &'static str,
        gender: Option<&'static str>,
        birth_year: Option<f64>,
    ) -> TestTrip {
        TestTrip {
            user_type,
            gender,
            birth_year,
            ..TestTrip::default()
        }
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let dataset = dataset_from_trips(
            &[
                rider("Subscriber", Some("Male"), Some(1985.0)),
                rider("Customer", Some("Female"), Some(1992.0)),
                rider("Subscriber", Some("Male"), Some(1992.0)),
                rider("Subscriber", Some("Female"), Some(1960.0)),
                rider("Customer", Some("Male"), None),
            ],
            true,
        );

        let stats = user_stats(&dataset).unwrap();

        assert_eq!(
            stats.user_types,
            vec![
                Frequency::new("Subscriber".to_string(), 3),
                Frequency::new("Customer".to_string(), 2),
            ]
        );
        assert_eq!(
            stats.genders,
            Some(vec![
                Frequency::new("Male".to_string(), 3),
                Frequency::new("Female".to_string(), 2),
            ])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: Some(1960.0),
                most_recent: Some(1992.0),
                most_common: Some(Frequency::new(1992.0, 2)),
            })
        );
    }

    #[test]
    fn test_user_stats_without_demographics() {
        let dataset = dataset_from_trips(&[rider("Customer", None, None)], false);

        let stats = user_stats(&dataset).unwrap();

        assert_eq!(stats.user_types, vec![Frequency::new("Customer".to_string(), 1)]);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_birth_years_all_missing() {
        let dataset = dataset_from_trips(&[rider("Customer", Some("Male"), None)], true);

        let years = user_stats(&dataset).unwrap().birth_years.unwrap();

        assert_eq!(years.earliest, None);
        assert_eq!(years.most_recent, None);
        assert_eq!(years.most_common, None);
    }
}
