//! Aggregate response models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::categories::{TimeRange, AGE_GROUPS, REGIONS, STUDY_TYPES, TIME_RANGES};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Sum of new participants
    pub total_participants: u64,

    /// Estimated share of participants still active
    pub active_participants: u64,

    /// Distinct studies seen
    pub total_studies: u64,

    /// Estimated share of studies still active
    pub active_studies: u64,

    /// Applications as a percentage of applications plus completions
    pub average_eligibility_rate: f64,

    /// Completions as a percentage of applications
    pub completion_rate: f64,
}

/// A single point of a daily series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: u64,
}

/// A named daily series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesMetric {
    pub name: String,
    pub data: Vec<TimeSeriesPoint>,
}

/// Series for one look-back window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeConfig {
    /// Bucket width, always `"day"`
    pub interval: String,
    pub metrics: Vec<TimeSeriesMetric>,
}

/// Series for every look-back window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRanges {
    #[serde(rename = "7d")]
    pub week: TimeRangeConfig,
    #[serde(rename = "14d")]
    pub fortnight: TimeRangeConfig,
    #[serde(rename = "30d")]
    pub month: TimeRangeConfig,
}

/// Output of the trends builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsData {
    pub time_ranges: TimeRanges,
}

impl TrendsData {
    /// Borrow the series for one window
    pub fn range(&self, range: TimeRange) -> &TimeRangeConfig {
        match range {
            TimeRange::Week => &self.time_ranges.week,
            TimeRange::Fortnight => &self.time_ranges.fortnight,
            TimeRange::Month => &self.time_ranges.month,
        }
    }

    /// Keep only the requested window
    pub fn into_response(self, range: TimeRange) -> TrendsResponse {
        let config = match range {
            TimeRange::Week => self.time_ranges.week,
            TimeRange::Fortnight => self.time_ranges.fortnight,
            TimeRange::Month => self.time_ranges.month,
        };

        let mut time_ranges = BTreeMap::new();
        time_ranges.insert(range.as_str().to_string(), config);
        TrendsResponse { time_ranges }
    }
}

/// Trends as returned by the API: a single window keyed by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub time_ranges: BTreeMap<String, TimeRangeConfig>,
}

/// Totals for one category of a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMetric {
    pub name: String,
    pub applications: u64,
    pub completions: u64,
}

/// Totals for every category of a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonDimension {
    /// Field name of the dimension (`studyType`, `ageGroup`, `region`)
    pub dimension: String,
    pub metrics: Vec<ComparisonMetric>,
}

/// Output of the comparisons builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonsData {
    pub study_type: ComparisonDimension,
    pub age_group: ComparisonDimension,
    pub region: ComparisonDimension,
}

/// Values the frontend offers in its filter dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub study_types: Vec<String>,
    pub age_groups: Vec<String>,
    pub regions: Vec<String>,
    pub time_ranges: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        let owned = |values: &[&str]| -> Vec<String> { values.iter().map(ToString::to_string).collect() };
        Self {
            study_types: owned(&STUDY_TYPES),
            age_groups: owned(&AGE_GROUPS),
            regions: owned(&REGIONS),
            time_ranges: owned(&TIME_RANGES),
        }
    }
}
