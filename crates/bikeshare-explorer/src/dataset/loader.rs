//! CSV loading for city trip files.

use super::Dataset;
use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result};
use crate::types::City;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads city datasets using the paths and column names of an
/// [`ExplorerConfig`].
pub struct DatasetLoader<'a> {
    config: &'a ExplorerConfig,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(config: &'a ExplorerConfig) -> Self {
        Self { config }
    }

    /// Verify that the file for every city exists.
    ///
    /// All missing files are reported together so the user can fix them in
    /// one go.
    pub fn check_sources(&self) -> Result<()> {
        let missing: Vec<PathBuf> = City::ALL
            .iter()
            .map(|&city| self.config.source_path(city))
            .filter(|path| !path.is_file())
            .collect();

        if missing.is_empty() {
            debug!("All city sources present in {}", self.config.data_dir.display());
            Ok(())
        } else {
            Err(ExplorerError::MissingSources(missing))
        }
    }

    /// Load the full dataset for `city`.
    ///
    /// Any failure to find, read or interpret the file surfaces as
    /// [`ExplorerError::DataUnavailable`].
    pub fn load(&self, city: City) -> Result<Dataset> {
        let path = self.config.source_path(city);
        let unavailable = |reason: String| ExplorerError::DataUnavailable {
            city,
            path: path.clone(),
            reason,
        };

        if !path.is_file() {
            return Err(unavailable("file not found".to_string()));
        }

        info!("Loading {} trips from: {}", city, path.display());
        let frame = read_csv(&path, self.config.infer_schema_length)
            .map_err(|e| unavailable(e.to_string()))?;

        let dataset = Dataset::from_frame(city, frame, &self.config.columns)
            .map_err(|e| unavailable(e.to_string()))?;

        info!(
            "Dataset loaded successfully: {} rows x {} columns",
            dataset.height(),
            dataset.frame().width()
        );
        Ok(dataset)
    }
}

/// Read a CSV file with a header row. Empty cells become nulls.
pub(crate) fn read_csv(path: &Path, infer_schema_length: usize) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(infer_schema_length))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CitySources;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn fixture_config() -> ExplorerConfig {
        ExplorerConfig::builder()
            .data_dir(fixtures_dir())
            .build()
            .unwrap()
    }

    #[test]
    fn test_check_sources_with_fixtures() {
        let config = fixture_config();
        assert!(DatasetLoader::new(&config).check_sources().is_ok());
    }

    #[test]
    fn test_check_sources_reports_every_missing_file() {
        let config = ExplorerConfig::builder()
            .data_dir(fixtures_dir())
            .sources(CitySources {
                chicago: PathBuf::from("nope_chicago.csv"),
                washington: PathBuf::from("nope_washington.csv"),
                ..CitySources::default()
            })
            .build()
            .unwrap();

        match DatasetLoader::new(&config).check_sources() {
            Err(ExplorerError::MissingSources(paths)) => assert_eq!(paths.len(), 2),
            other => panic!("expected MissingSources, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let config = ExplorerConfig::builder()
            .data_dir("/definitely/not/here")
            .build()
            .unwrap();

        let err = DatasetLoader::new(&config).load(City::Chicago).unwrap_err();
        assert_eq!(err.error_code(), "DATA_UNAVAILABLE");
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_washington_fixture() {
        let config = fixture_config();
        let dataset = DatasetLoader::new(&config).load(City::Washington).unwrap();

        assert_eq!(dataset.city(), City::Washington);
        assert!(dataset.height() > 0);
        assert!(!dataset.has_gender());
        assert!(dataset.has_column("month"));
    }
}
