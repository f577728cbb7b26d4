//! Mock data generation for demos and local development

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::categories::{AGE_GROUPS, REGIONS, STUDY_TYPES};
use crate::error::Result;
use crate::models::{DailyMetric, FilterOptions};

/// File name of the generated metrics document
pub const METRICS_FILE: &str = "dailyMetrics.json";

/// File name of the generated filter options document
pub const FILTER_OPTIONS_FILE: &str = "filterOptions.json";

/// Shape of the generated data set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockDataOptions {
    /// Number of days to generate, ending today
    pub days: u32,
    /// Chance that a given day/category combination has any activity
    pub probability: f64,
}

impl Default for MockDataOptions {
    fn default() -> Self {
        Self {
            days: 30,
            probability: 0.3,
        }
    }
}

/// Generate records for every category combination over the last `days`
///
/// Each combination gets a record with `options.probability`. Counter
/// ranges: applications 0..=50, completions 0..=30, new participants 0..=20.
pub fn generate_daily_metrics<R: Rng>(
    options: MockDataOptions,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<DailyMetric> {
    let probability = options.probability.clamp(0.0, 1.0);
    let mut metrics = Vec::new();

    for offset in 0..i64::from(options.days) {
        let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();

        for study_type in STUDY_TYPES {
            for age_group in AGE_GROUPS {
                for region in REGIONS {
                    if !rng.gen_bool(probability) {
                        continue;
                    }
                    let mut metric = DailyMetric::new(date.clone(), study_type, age_group, region)
                        .with_counts(
                            rng.gen_range(0..=50),
                            rng.gen_range(0..=30),
                            rng.gen_range(0..=20),
                        )
                        .with_study_id(Uuid::new_v4().to_string());
                    metric.created_at = Some(Utc::now());
                    metrics.push(metric);
                }
            }
        }
    }

    metrics
}

/// Generate a data set and write both documents into `dir`
///
/// Returns the paths written, metrics first.
pub fn write_mock_data(dir: &Path, options: MockDataOptions) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;

    let today = Utc::now().date_naive();
    let metrics = generate_daily_metrics(options, today, &mut rand::thread_rng());
    let filter_options = FilterOptions::default();

    let metrics_path = dir.join(METRICS_FILE);
    let options_path = dir.join(FILTER_OPTIONS_FILE);

    std::fs::write(&metrics_path, serde_json::to_string_pretty(&metrics)?)?;
    std::fs::write(&options_path, serde_json::to_string_pretty(&filter_options)?)?;

    info!(
        records = metrics.len(),
        days = options.days,
        path = %metrics_path.display(),
        "Generated mock daily metrics"
    );

    Ok((metrics_path, options_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Dimension;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn probability_one_fills_every_combination() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = MockDataOptions {
            days: 2,
            probability: 1.0,
        };

        let metrics = generate_daily_metrics(options, today(), &mut rng);

        assert_eq!(metrics.len(), 2 * 6 * 6 * 6);
        let dates: HashSet<&str> = metrics.iter().map(|m| m.date.as_str()).collect();
        assert_eq!(dates, HashSet::from(["2024-03-10", "2024-03-09"]));
    }

    #[test]
    fn probability_zero_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = MockDataOptions {
            days: 30,
            probability: 0.0,
        };

        assert!(generate_daily_metrics(options, today(), &mut rng).is_empty());
    }

    #[test]
    fn records_stay_within_ranges_and_categories() {
        let mut rng = StdRng::seed_from_u64(42);

        let metrics = generate_daily_metrics(MockDataOptions::default(), today(), &mut rng);

        assert!(!metrics.is_empty());
        for metric in &metrics {
            assert!(metric.applications_count <= 50);
            assert!(metric.completions_count <= 30);
            assert!(metric.new_participants_count <= 20);
            assert!(metric.study_id.is_some());
            assert!(metric.timestamp().is_some());
            for dimension in Dimension::ALL {
                assert!(dimension.contains(dimension.value_of(metric)));
            }
        }
    }

    #[test]
    fn writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let options = MockDataOptions {
            days: 3,
            probability: 1.0,
        };

        let (metrics_path, options_path) = write_mock_data(dir.path(), options).unwrap();

        let metrics: Vec<DailyMetric> =
            serde_json::from_str(&std::fs::read_to_string(metrics_path).unwrap()).unwrap();
        let filter_options: FilterOptions =
            serde_json::from_str(&std::fs::read_to_string(options_path).unwrap()).unwrap();

        assert_eq!(metrics.len(), 3 * 216);
        assert_eq!(filter_options, FilterOptions::default());
    }
}
