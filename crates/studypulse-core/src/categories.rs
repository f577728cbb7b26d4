//! Fixed category lists shared by validation, aggregation and data generation
//!
//! The order of each list is significant: comparison output and filter
//! options are always emitted in this order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::DailyMetric;

/// Sentinel value meaning "no restriction" for categorical filters
pub const ALL: &str = "all";

/// Study types, in canonical order
pub const STUDY_TYPES: [&str; 6] = [
    "Clinical Trials",
    "Surveys",
    "Focus Groups",
    "Longitudinal Studies",
    "Interviews",
    "Observational Studies",
];

/// Participant age bands, in canonical order
pub const AGE_GROUPS: [&str; 6] = ["18-24", "25-34", "35-44", "45-54", "55-64", "65+"];

/// Regions, in canonical order
pub const REGIONS: [&str; 6] = [
    "North America",
    "Europe",
    "Asia",
    "South America",
    "Africa",
    "Australia",
];

/// Accepted `timeRange` values, in canonical order
pub const TIME_RANGES: [&str; 3] = ["7d", "14d", "30d"];

/// A look-back window offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 7 days
    #[serde(rename = "7d")]
    Week,
    /// Last 14 days
    #[serde(rename = "14d")]
    Fortnight,
    /// Last 30 days
    #[default]
    #[serde(rename = "30d")]
    Month,
}

impl TimeRange {
    /// All windows, shortest first
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Fortnight, TimeRange::Month];

    /// Wire name (`"7d"`, `"14d"`, `"30d"`)
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Fortnight => "14d",
            TimeRange::Month => "30d",
        }
    }

    /// Number of days covered by the window
    pub fn days(self) -> usize {
        match self {
            TimeRange::Week => 7,
            TimeRange::Fortnight => 14,
            TimeRange::Month => 30,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Week),
            "14d" => Ok(TimeRange::Fortnight),
            "30d" => Ok(TimeRange::Month),
            other => Err(format!(
                "unknown time range {other:?}, expected one of {}",
                TIME_RANGES.join(", ")
            )),
        }
    }
}

/// A categorical axis a record can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// `studyType`
    StudyType,
    /// `ageGroup`
    AgeGroup,
    /// `region`
    Region,
}

impl Dimension {
    /// Dimensions in output order
    pub const ALL: [Dimension; 3] = [Dimension::StudyType, Dimension::AgeGroup, Dimension::Region];

    /// Field name as used in JSON and query strings
    pub fn key(self) -> &'static str {
        match self {
            Dimension::StudyType => "studyType",
            Dimension::AgeGroup => "ageGroup",
            Dimension::Region => "region",
        }
    }

    /// Closed category list for this dimension
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Dimension::StudyType => &STUDY_TYPES,
            Dimension::AgeGroup => &AGE_GROUPS,
            Dimension::Region => &REGIONS,
        }
    }

    /// Whether `value` is one of this dimension's categories (case-sensitive)
    pub fn contains(self, value: &str) -> bool {
        self.categories().contains(&value)
    }

    /// Read this dimension's value off a record
    pub fn value_of(self, metric: &DailyMetric) -> &str {
        match self {
            Dimension::StudyType => &metric.study_type,
            Dimension::AgeGroup => &metric.age_group,
            Dimension::Region => &metric.region,
        }
    }
}
