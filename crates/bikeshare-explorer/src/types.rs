//! Selection types shared by the CLI and the analysis pipeline.
//!
//! Tokens are parsed case-insensitively. The month selector covers the six
//! months present in the source data; the day selector covers the full week.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a city, month or day token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFilterError {
    #[error("Unknown city '{0}' (expected chicago, new york city or washington)")]
    City(String),

    #[error("Unknown month '{0}' (expected all, jan, feb, mar, apr, may or jun)")]
    Month(String),

    #[error("Unknown day '{0}' (expected all, mon, tue, wed, thur, fri, sat or sun)")]
    Day(String),
}

fn normalize(token: &str) -> String {
    token.trim().to_ascii_lowercase()
}

// =============================================================================
// City
// =============================================================================

/// A city with its own trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities in display order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The lowercase token users type to select this city.
    pub fn token(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

impl FromStr for City {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" | "new_york_city" | "nyc" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(ParseFilterError::City(s.to_string())),
        }
    }
}

// =============================================================================
// Month
// =============================================================================

/// Month tokens in calendar order; position + 1 is the month number.
pub const MONTH_TOKENS: [&str; 6] = ["jan", "feb", "mar", "apr", "may", "jun"];

/// Month selector: either no restriction or one of January..June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    #[default]
    All,
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
}

impl MonthFilter {
    const SELECTABLE: [MonthFilter; 6] = [
        MonthFilter::Jan,
        MonthFilter::Feb,
        MonthFilter::Mar,
        MonthFilter::Apr,
        MonthFilter::May,
        MonthFilter::Jun,
    ];

    /// Month number (1 = January), or `None` for `All`.
    pub fn number(&self) -> Option<i32> {
        Self::SELECTABLE
            .iter()
            .position(|m| m == self)
            .map(|idx| idx as i32 + 1)
    }

    pub fn token(&self) -> &'static str {
        match self.number() {
            Some(n) => MONTH_TOKENS[(n - 1) as usize],
            None => "all",
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.token()))
    }
}

impl FromStr for MonthFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize(s);
        if token == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_TOKENS
            .iter()
            .position(|&t| t == token)
            .map(|idx| Self::SELECTABLE[idx])
            .ok_or_else(|| ParseFilterError::Month(s.to_string()))
    }
}

// =============================================================================
// Day of week
// =============================================================================

/// Day tokens with Monday first; position is the day-of-week index.
pub const DAY_TOKENS: [&str; 7] = ["mon", "tue", "wed", "thur", "fri", "sat", "sun"];

/// Day-of-week selector: either no restriction or a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayFilter {
    #[default]
    All,
    Mon,
    Tue,
    Wed,
    Thur,
    Fri,
    Sat,
    Sun,
}

impl DayFilter {
    const SELECTABLE: [DayFilter; 7] = [
        DayFilter::Mon,
        DayFilter::Tue,
        DayFilter::Wed,
        DayFilter::Thur,
        DayFilter::Fri,
        DayFilter::Sat,
        DayFilter::Sun,
    ];

    /// Day-of-week index (0 = Monday), or `None` for `All`.
    pub fn index(&self) -> Option<i32> {
        Self::SELECTABLE
            .iter()
            .position(|d| d == self)
            .map(|idx| idx as i32)
    }

    pub fn token(&self) -> &'static str {
        match self.index() {
            Some(i) => DAY_TOKENS[i as usize],
            None => "all",
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.token()))
    }
}

impl FromStr for DayFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize(s);
        let token = if token == "thu" { "thur".to_string() } else { token };
        if token == "all" {
            return Ok(DayFilter::All);
        }
        DAY_TOKENS
            .iter()
            .position(|&t| t == token)
            .map(|idx| Self::SELECTABLE[idx])
            .ok_or_else(|| ParseFilterError::Day(s.to_string()))
    }
}

// =============================================================================
// FilterSpec
// =============================================================================

/// The (city, month, day) triple selecting which records are analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub city: City,
    #[serde(default)]
    pub month: MonthFilter,
    #[serde(default)]
    pub day: DayFilter,
}

impl FilterSpec {
    /// Select every record of a city.
    pub fn new(city: City) -> Self {
        Self {
            city,
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }

    pub fn with_month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    pub fn with_day(mut self, day: DayFilter) -> Self {
        self.day = day;
        self
    }

    /// True when neither month nor day restricts the records.
    pub fn is_unfiltered(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City: {}\nMonth: {}\nDay of the Week: {}",
            self.city, self.month, self.day
        )
    }
}

/// Title-case a token ("thur" -> "Thur").
pub(crate) fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parsing_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!(
            "  NEW YORK CITY ".parse::<City>().unwrap(),
            City::NewYorkCity
        );
        assert_eq!("washington".parse::<City>().unwrap(), City::Washington);
        assert!(matches!(
            "boston".parse::<City>(),
            Err(ParseFilterError::City(_))
        ));
    }

    #[test]
    fn test_month_numbers_follow_lexical_order() {
        for (idx, token) in MONTH_TOKENS.iter().enumerate() {
            let month: MonthFilter = token.parse().unwrap();
            assert_eq!(month.number(), Some(idx as i32 + 1));
            assert_eq!(month.token(), *token);
        }
        assert_eq!(MonthFilter::All.number(), None);
        assert!("jul".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_day_indices_start_at_monday() {
        assert_eq!("mon".parse::<DayFilter>().unwrap().index(), Some(0));
        assert_eq!("THUR".parse::<DayFilter>().unwrap().index(), Some(3));
        assert_eq!("thu".parse::<DayFilter>().unwrap(), DayFilter::Thur);
        assert_eq!("sun".parse::<DayFilter>().unwrap().index(), Some(6));
        assert_eq!(DayFilter::All.index(), None);
        assert!("funday".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_filter_spec_display() {
        let spec = FilterSpec::new(City::NewYorkCity)
            .with_month(MonthFilter::Mar)
            .with_day(DayFilter::Thur);
        assert_eq!(
            spec.to_string(),
            "City: New York City\nMonth: Mar\nDay of the Week: Thur"
        );
        assert!(!spec.is_unfiltered());
        assert!(FilterSpec::new(City::Chicago).is_unfiltered());
    }

    #[test]
    fn test_filter_spec_from_json() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"city": "new_york_city", "month": "feb"}"#).unwrap();
        assert_eq!(spec.city, City::NewYorkCity);
        assert_eq!(spec.month, MonthFilter::Feb);
        assert_eq!(spec.day, DayFilter::All);
    }
}
