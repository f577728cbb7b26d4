//! Data sources for StudyPulse
//!
//! The aggregation core never touches storage directly; it is handed the
//! records a [`MetricsSource`] produces for each request.

mod file;
mod generator;

pub use file::JsonFileSource;
pub use generator::{generate_daily_metrics, write_mock_data, MockDataOptions};

use crate::error::Result;
use crate::models::{DailyMetric, FilterOptions};

/// Supplier of the record set and filter options
#[async_trait::async_trait]
pub trait MetricsSource: Send + Sync {
    /// Load every daily metric record
    async fn daily_metrics(&self) -> Result<Vec<DailyMetric>>;

    /// Load the filter options offered to the frontend
    async fn filter_options(&self) -> Result<FilterOptions>;
}

/// Source backed by records already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    metrics: Vec<DailyMetric>,
    options: FilterOptions,
}

impl StaticSource {
    /// Serve the given records with the canonical filter options
    pub fn new(metrics: Vec<DailyMetric>) -> Self {
        Self {
            metrics,
            options: FilterOptions::default(),
        }
    }
}

#[async_trait::async_trait]
impl MetricsSource for StaticSource {
    async fn daily_metrics(&self) -> Result<Vec<DailyMetric>> {
        Ok(self.metrics.clone())
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        Ok(self.options.clone())
    }
}
