//! Counting and numeric aggregates shared by the statistic sections.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A value with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Frequency<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Frequency<U> {
        Frequency {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Count occurrences of each value.
///
/// The result is sorted by descending count. Values with equal counts keep
/// the order in which they were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<Frequency<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<Frequency<T>> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push(Frequency::new(value, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Most frequent value; ties go to the value seen first.
///
/// Returns `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<Frequency<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

/// Most frequent float, compared bit for bit.
pub fn numeric_mode<I>(values: I) -> Option<Frequency<f64>>
where
    I: IntoIterator<Item = f64>,
{
    mode(values.into_iter().map(f64::to_bits)).map(|f| f.map(f64::from_bits))
}

/// Sum, mean, min and max of a numeric column.
///
/// Only `total` is defined for an empty set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub total: f64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    /// Summarize a series, skipping missing values.
    pub fn from_series(series: &Series) -> PolarsResult<Self> {
        let values = series.drop_nulls().cast(&DataType::Float64)?;
        if values.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self {
            count: values.len(),
            total: values.sum::<f64>()?,
            mean: values.mean(),
            min: values.min::<f64>()?,
            max: values.max::<f64>()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mode_ties_break_to_first_seen() {
        let result = mode(["b", "a", "b", "a"]).unwrap();
        assert_eq!(result, Frequency::new("b", 2));

        let result = mode(["x", "y", "y", "x", "z"]).unwrap();
        assert_eq!(result.value, "x");
    }

    #[test]
    fn test_mode_of_empty_is_none() {
        assert_eq!(mode(Vec::<String>::new()), None);
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(["Customer", "Subscriber", "Subscriber", "Dependent"]);
        assert_eq!(
            counts,
            vec![
                Frequency::new("Subscriber", 2),
                Frequency::new("Customer", 1),
                Frequency::new("Dependent", 1),
            ]
        );
    }

    #[test]
    fn test_numeric_mode() {
        let result = numeric_mode([1989.0, 1992.0, 1992.0, 1989.0, 1975.0]).unwrap();
        assert_eq!(result, Frequency::new(1989.0, 2));
        assert_eq!(numeric_mode(std::iter::empty()), None);
    }

    #[test]
    fn test_numeric_summary() {
        let series = Series::new(
            "Trip Duration".into(),
            &[Some(300.0), None, Some(100.0), Some(200.0)],
        );
        let summary = NumericSummary::from_series(&series).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 600.0);
        assert_eq!(summary.mean, Some(200.0));
        assert_eq!(summary.min, Some(100.0));
        assert_eq!(summary.max, Some(300.0));
    }

    #[test]
    fn test_numeric_summary_casts_integers() {
        let series = Series::new("Trip Duration".into(), &[60i64, 120]);
        let summary = NumericSummary::from_series(&series).unwrap();
        assert_eq!(summary.total, 180.0);
        assert_eq!(summary.mean, Some(90.0));
    }

    #[test]
    fn test_numeric_summary_empty() {
        let series = Series::new("Trip Duration".into(), &[None::<f64>, None]);
        let summary = NumericSummary::from_series(&series).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
    }
}
