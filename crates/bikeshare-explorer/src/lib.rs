//! Bike-Share Explorer Library
//!
//! Descriptive statistics over the bike-share trip records of Chicago, New
//! York City and Washington, built on Polars.
//!
//! # Overview
//!
//! An analysis runs four stages over one city's trip table:
//!
//! - **Loading**: read the city's CSV file, derive `month`, `day_of_week` and
//!   `hour` from the start time, and tag every column as numeric or
//!   categorical
//! - **Filtering**: keep the records of one month and/or weekday
//! - **Imputation**: backward fill numeric gaps, replace categorical gaps
//!   with a placeholder
//! - **Aggregation**: six statistic sections (times of travel, stations,
//!   trip duration, users, duration by gender, trips by user type)
//!
//! Conditions such as an empty filter result are reported as
//! [`Caveat`]s on the [`StatSummary`], never as errors.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bikeshare_explorer::{City, DayFilter, Explorer, ExplorerConfig, FilterSpec, MonthFilter};
//!
//! let config = ExplorerConfig::builder()
//!     .data_dir("data")
//!     .missing_placeholder("unknown")
//!     .build()?;
//!
//! let explorer = Explorer::builder().config(config).build()?;
//! explorer.check_sources()?;
//!
//! let filter = FilterSpec::new(City::Chicago)
//!     .with_month(MonthFilter::Mar)
//!     .with_day(DayFilter::All);
//! let analysis = explorer.analyze(&filter)?;
//!
//! println!("{}", bikeshare_explorer::reporting::render_summary(&analysis.summary)?);
//! ```
//!
//! # Filter tokens
//!
//! [`City`], [`MonthFilter`] and [`DayFilter`] parse the case-insensitive
//! tokens accepted on the command line (`"new york city"`, `"mar"`,
//! `"thur"`, `"all"`).

pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod reporting;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    CitySources, ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder, TripColumns,
};
pub use dataset::{ColumnKind, ColumnSpec, Dataset, DatasetLoader, filter_dataset};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use imputers::{ImputationMethod, ImputationNote, MissingValueImputer};
pub use pipeline::{Analysis, Explorer, ExplorerBuilder};
pub use stats::{Caveat, Frequency, NumericSummary, Section, SectionTiming, StatSummary, summarize};
pub use types::{City, DayFilter, FilterSpec, MonthFilter, ParseFilterError};
