//! Configuration types for the explorer.
//!
//! The city-to-file mapping and the source column names are explicit
//! configuration handed to the loader. Use [`ExplorerConfig::builder()`] for
//! a validated configuration, or [`ExplorerConfig::from_json_file`] to read
//! one from disk.

use crate::error::Result;
use crate::types::City;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default placeholder written into missing categorical cells.
pub const DEFAULT_MISSING_PLACEHOLDER: &str = "not specified";

/// File name of each city's trip data, relative to the data directory
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitySources {
    pub chicago: PathBuf,
    pub new_york_city: PathBuf,
    pub washington: PathBuf,
}

impl Default for CitySources {
    fn default() -> Self {
        Self {
            chicago: PathBuf::from("chicago.csv"),
            new_york_city: PathBuf::from("new_york_city.csv"),
            washington: PathBuf::from("washington.csv"),
        }
    }
}

impl CitySources {
    /// The configured file for a city.
    pub fn file_for(&self, city: City) -> &Path {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

/// Column names in the source files.
///
/// `gender` and `birth_year` are optional in the data: a file without them
/// simply skips the statistics that need them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripColumns {
    pub start_time: String,
    pub trip_duration: String,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: String,
    pub birth_year: String,
}

impl Default for TripColumns {
    fn default() -> Self {
        Self {
            start_time: "Start Time".to_string(),
            trip_duration: "Trip Duration".to_string(),
            start_station: "Start Station".to_string(),
            end_station: "End Station".to_string(),
            user_type: "User Type".to_string(),
            gender: "Gender".to_string(),
            birth_year: "Birth Year".to_string(),
        }
    }
}

impl TripColumns {
    /// Columns every city file must provide.
    pub fn required(&self) -> [&str; 5] {
        [
            &self.start_time,
            &self.trip_duration,
            &self.start_station,
            &self.end_station,
            &self.user_type,
        ]
    }
}

/// Configuration for the explorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Directory holding the city files.
    /// Default: "."
    pub data_dir: PathBuf,

    /// File name per city.
    pub sources: CitySources,

    /// Source column names.
    pub columns: TripColumns,

    /// Value used to fill missing categorical cells.
    /// Default: "not specified"
    pub missing_placeholder: String,

    /// Number of rows used for CSV schema inference.
    /// Default: 10000
    pub infer_schema_length: usize,

    /// Rows shown per page when browsing raw data.
    /// Default: 5
    pub raw_page_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            sources: CitySources::default(),
            columns: TripColumns::default(),
            missing_placeholder: DEFAULT_MISSING_PLACEHOLDER.to_string(),
            infer_schema_length: 10_000,
            raw_page_size: 5,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Read and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ExplorerConfig = serde_json::from_str(&text)?;
        config.validate().map_err(|e| {
            crate::error::ExplorerError::InvalidConfig(e.to_string())
        })?;
        Ok(config)
    }

    /// Resolved path of a city's source file.
    pub fn source_path(&self, city: City) -> PathBuf {
        let file = self.sources.file_for(city);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.missing_placeholder.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPlaceholder);
        }

        if self.infer_schema_length == 0 {
            return Err(ConfigValidationError::InvalidInferSchemaLength);
        }

        if self.raw_page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize(self.raw_page_size));
        }

        for name in self.columns.required() {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName);
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing-value placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("Schema inference length must be at least 1")]
    InvalidInferSchemaLength,

    #[error("Invalid raw page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    #[error("Required column names must not be empty")]
    EmptyColumnName,
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    data_dir: Option<PathBuf>,
    sources: Option<CitySources>,
    columns: Option<TripColumns>,
    missing_placeholder: Option<String>,
    infer_schema_length: Option<usize>,
    raw_page_size: Option<usize>,
}

impl ExplorerConfigBuilder {
    /// Set the directory containing the city files.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Override the file name used for each city.
    pub fn sources(mut self, sources: CitySources) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Override the source column names.
    pub fn columns(mut self, columns: TripColumns) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the value used to fill missing categorical cells.
    pub fn missing_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_placeholder = Some(placeholder.into());
        self
    }

    /// Set how many rows the CSV reader scans to infer column types.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the number of rows per raw-data page.
    pub fn raw_page_size(mut self, rows: usize) -> Self {
        self.raw_page_size = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<ExplorerConfig, ConfigValidationError> {
        let defaults = ExplorerConfig::default();
        let config = ExplorerConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            sources: self.sources.unwrap_or_default(),
            columns: self.columns.unwrap_or_default(),
            missing_placeholder: self
                .missing_placeholder
                .unwrap_or(defaults.missing_placeholder),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
            raw_page_size: self.raw_page_size.unwrap_or(defaults.raw_page_size),
        };

        config.validate()?;
        Ok(config)
    }
}
