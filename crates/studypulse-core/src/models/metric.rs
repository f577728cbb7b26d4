//! Daily metric record

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// One day of activity for a (study type, age group, region) combination
///
/// Records are read-only once loaded. Counters that are missing or `null`
/// in the source document deserialize as zero, and missing categorical
/// fields deserialize as the empty string.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    /// Optional record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Calendar day (`YYYY-MM-DD`)
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub date: String,

    /// Study type category
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub study_type: String,

    /// Age group category
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub age_group: String,

    /// Region category
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub region: String,

    /// Applications received that day
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub applications_count: u64,

    /// Study completions that day
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub completions_count: u64,

    /// Participants who joined that day
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub new_participants_count: u64,

    /// Study the record belongs to; only used for distinct-study counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_id: Option<String>,

    /// When the record was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DailyMetric {
    /// Create a record with zeroed counters
    pub fn new(
        date: impl Into<String>,
        study_type: impl Into<String>,
        age_group: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            study_type: study_type.into(),
            age_group: age_group.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Set the three counters
    #[must_use]
    pub fn with_counts(mut self, applications: u64, completions: u64, new_participants: u64) -> Self {
        self.applications_count = applications;
        self.completions_count = completions;
        self.new_participants_count = new_participants;
        self
    }

    /// Set the study identifier
    #[must_use]
    pub fn with_study_id(mut self, study_id: impl Into<String>) -> Self {
        self.study_id = Some(study_id.into());
        self
    }

    /// Instant the record's `date` refers to, if it parses
    ///
    /// Bare dates are taken at midnight UTC; full RFC 3339 timestamps are
    /// also accepted.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return day
                .and_hms_opt(0, 0, 0)
                .map(|midnight| Utc.from_utc_datetime(&midnight));
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{
            "date": "2024-01-15",
            "studyType": "Surveys",
            "ageGroup": "25-34",
            "region": null,
            "applicationsCount": 12,
            "completionsCount": null
        }"#;

        let metric: DailyMetric = serde_json::from_str(json).unwrap();

        assert_eq!(metric.study_type, "Surveys");
        assert_eq!(metric.region, "");
        assert_eq!(metric.applications_count, 12);
        assert_eq!(metric.completions_count, 0);
        assert_eq!(metric.new_participants_count, 0);
        assert_eq!(metric.study_id, None);
    }

    #[test]
    fn timestamp_accepts_dates_and_rfc3339() {
        let day = DailyMetric::new("2024-01-15", "", "", "");
        assert_eq!(
            day.timestamp().unwrap().to_rfc3339(),
            "2024-01-15T00:00:00+00:00"
        );

        let instant = DailyMetric::new("2024-01-15T10:30:00Z", "", "", "");
        assert_eq!(
            instant.timestamp().unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );

        assert!(DailyMetric::new("not a date", "", "", "").timestamp().is_none());
        assert!(DailyMetric::new("", "", "", "").timestamp().is_none());
    }
}
