//! JSON file backed data source

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DataConfig;
use crate::error::{Error, Result};
use crate::models::{DailyMetric, FilterOptions};

use super::MetricsSource;

/// Reads the data documents from disk on every call
///
/// Nothing is cached, so edits to the files are picked up by the next
/// request.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    metrics_path: PathBuf,
    filter_options_path: Option<PathBuf>,
}

impl JsonFileSource {
    /// Create a source for the given metrics file
    pub fn new(metrics_path: impl Into<PathBuf>) -> Self {
        Self {
            metrics_path: metrics_path.into(),
            filter_options_path: None,
        }
    }

    /// Also read filter options from a file instead of the canonical lists
    #[must_use]
    pub fn with_filter_options(mut self, path: impl Into<PathBuf>) -> Self {
        self.filter_options_path = Some(path.into());
        self
    }

    /// Create a source from configuration
    pub fn from_config(config: &DataConfig) -> Self {
        Self {
            metrics_path: config.metrics_path.clone(),
            filter_options_path: config.filter_options_path.clone(),
        }
    }

    /// Path of the metrics document
    pub fn metrics_path(&self) -> &Path {
        &self.metrics_path
    }
}

#[async_trait::async_trait]
impl MetricsSource for JsonFileSource {
    async fn daily_metrics(&self) -> Result<Vec<DailyMetric>> {
        let metrics: Vec<DailyMetric> = read_json(&self.metrics_path).await?;
        debug!(
            path = %self.metrics_path.display(),
            count = metrics.len(),
            "Loaded daily metrics"
        );
        Ok(metrics)
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        match &self.filter_options_path {
            Some(path) => read_json(path).await,
            None => Ok(FilterOptions::default()),
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::data_source(format!("failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&raw)
        .map_err(|e| Error::data_source(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[tokio::test]
    async fn reads_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dailyMetrics.json");
        fs::write(
            &path,
            r#"[{"date":"2024-01-15","studyType":"Surveys","ageGroup":"18-24","region":"Asia",
                "applicationsCount":3,"completionsCount":2,"newParticipantsCount":1,"studyId":"s1"}]"#,
        )
        .unwrap();

        let metrics = JsonFileSource::new(&path).daily_metrics().await.unwrap();

        assert_eq!(
            metrics,
            vec![DailyMetric::new("2024-01-15", "Surveys", "18-24", "Asia")
                .with_counts(3, 2, 1)
                .with_study_id("s1")]
        );
    }

    #[tokio::test]
    async fn missing_file_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json"));

        assert!(matches!(source.daily_metrics().await, Err(Error::DataSource(_))));
    }

    #[tokio::test]
    async fn malformed_file_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dailyMetrics.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileSource::new(&path).daily_metrics().await,
            Err(Error::DataSource(_))
        ));
    }

    #[tokio::test]
    async fn filter_options_default_to_canonical_lists() {
        let source = JsonFileSource::new("unused.json");
        assert_eq!(source.filter_options().await.unwrap(), FilterOptions::default());
    }

    #[tokio::test]
    async fn filter_options_read_from_file_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filterOptions.json");
        fs::write(
            &path,
            r#"{"studyTypes":["Surveys"],"ageGroups":["65+"],"regions":["Asia"],"timeRanges":["7d"]}"#,
        )
        .unwrap();

        let options = JsonFileSource::new("unused.json")
            .with_filter_options(&path)
            .filter_options()
            .await
            .unwrap();

        assert_eq!(options.study_types, vec!["Surveys".to_string()]);
        assert_eq!(options.time_ranges, vec!["7d".to_string()]);
    }
}
