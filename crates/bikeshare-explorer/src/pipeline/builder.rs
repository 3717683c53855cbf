//! The explorer pipeline and its builder.

use crate::config::ExplorerConfig;
use crate::dataset::{Dataset, DatasetLoader, filter_dataset};
use crate::error::{ExplorerError, Result, ResultExt};
use crate::imputers::{ImputationNote, MissingValueImputer};
use crate::stats::{StatSummary, summarize};
use crate::types::{City, FilterSpec};
use polars::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};

/// Runs analyses against the configured city files.
///
/// Use [`Explorer::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use bikeshare_explorer::{City, Explorer, ExplorerConfig, FilterSpec, MonthFilter};
///
/// let explorer = Explorer::builder()
///     .config(ExplorerConfig::builder().data_dir("data").build()?)
///     .build()?;
///
/// let analysis = explorer.analyze(&FilterSpec::new(City::Chicago).with_month(MonthFilter::Mar))?;
/// println!("{} trips", analysis.summary.records);
/// ```
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    imputer: MissingValueImputer,
}

impl Explorer {
    /// Create a new explorer builder.
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::default()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Verify that every city's source file exists.
    pub fn check_sources(&self) -> Result<()> {
        DatasetLoader::new(&self.config).check_sources()
    }

    /// Load the full, unfiltered dataset of a city.
    pub fn load(&self, city: City) -> Result<Dataset> {
        DatasetLoader::new(&self.config).load(city)
    }

    /// Load the city named by `filter` and analyze it.
    pub fn analyze(&self, filter: &FilterSpec) -> Result<Analysis> {
        let dataset = self.load(filter.city)?;
        self.analyze_dataset(&dataset, filter)
    }

    /// Filter, impute and summarize an already loaded dataset.
    ///
    /// Each call works on its own copy; `dataset` is left untouched.
    pub fn analyze_dataset(&self, dataset: &Dataset, filter: &FilterSpec) -> Result<Analysis> {
        match self.run(dataset, filter) {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                error!("Analysis failed: {}", e);
                Err(e)
            }
        }
    }

    fn run(&self, dataset: &Dataset, filter: &FilterSpec) -> Result<Analysis> {
        let start_time = Instant::now();
        info!(
            "Starting analysis for {} (month={}, day={})",
            filter.city,
            filter.month.token(),
            filter.day.token()
        );

        info!("Step 1: Filtering trips...");
        let filtered = filter_dataset(dataset, filter).context("filter stage")?;

        info!("Step 2: Imputing missing values...");
        let (imputed, imputation) = self
            .imputer
            .impute(&filtered)
            .context("imputation stage")?;

        info!("Step 3: Computing statistics...");
        let summary = summarize(&imputed, filter).context("aggregation stage")?;

        info!(
            "Analysis complete in {:.3}s: {} trips, {} caveats",
            start_time.elapsed().as_secs_f64(),
            summary.records,
            summary.caveats.len()
        );

        Ok(Analysis {
            dataset: imputed,
            imputation,
            summary,
            page_size: self.config.raw_page_size,
        })
    }
}

/// Builder for [`Explorer`].
#[derive(Debug, Default)]
pub struct ExplorerBuilder {
    config: Option<ExplorerConfig>,
}

impl ExplorerBuilder {
    /// Set the explorer configuration.
    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configuration and build the explorer.
    pub fn build(self) -> Result<Explorer> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| ExplorerError::InvalidConfig(e.to_string()))?;

        let imputer = MissingValueImputer::new(config.missing_placeholder.clone());
        Ok(Explorer { config, imputer })
    }
}

/// The outcome of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Filtered and imputed records.
    #[serde(skip)]
    pub dataset: Dataset,
    pub imputation: Vec<ImputationNote>,
    pub summary: StatSummary,
    #[serde(skip)]
    page_size: usize,
}

impl Analysis {
    /// The `page`-th window of raw rows, or `None` past the last row.
    pub fn raw_page(&self, page: usize) -> Option<DataFrame> {
        self.dataset.rows(page * self.page_size, self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
