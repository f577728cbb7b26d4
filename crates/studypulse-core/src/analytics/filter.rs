//! Record filter
//!
//! Applies a time window and up to three categorical equality filters to a
//! record set. All active predicates are ANDed.

use chrono::{DateTime, Duration, Utc};

use crate::categories::Dimension;
use crate::models::{DailyMetric, FilterCriteria};

/// Filter records against the current wall-clock time
///
/// `None` criteria return the input untouched.
pub fn filter_metrics(records: &[DailyMetric], criteria: Option<&FilterCriteria>) -> Vec<DailyMetric> {
    filter_metrics_at(records, criteria, Utc::now())
}

/// Filter records, measuring the time window back from `now`
///
/// When a window is active, a record is kept if its date (midnight UTC for
/// bare dates) is at or after `now - N days`. Records whose date does not
/// parse are dropped while a window is active.
pub fn filter_metrics_at(
    records: &[DailyMetric],
    criteria: Option<&FilterCriteria>,
    now: DateTime<Utc>,
) -> Vec<DailyMetric> {
    let Some(criteria) = criteria else {
        return records.to_vec();
    };

    let cutoff = criteria
        .window_days()
        .and_then(Duration::try_days)
        .and_then(|window| now.checked_sub_signed(window));

    let restrictions: Vec<(Dimension, &str)> = [
        (Dimension::StudyType, criteria.selected_study_type()),
        (Dimension::AgeGroup, criteria.selected_age_group()),
        (Dimension::Region, criteria.selected_region()),
    ]
    .into_iter()
    .filter_map(|(dimension, value)| value.map(|v| (dimension, v)))
    .collect();

    records
        .iter()
        .filter(|record| {
            if let Some(cutoff) = cutoff {
                match record.timestamp() {
                    Some(ts) if ts >= cutoff => {}
                    _ => return false,
                }
            }

            restrictions
                .iter()
                .all(|(dimension, value)| dimension.value_of(record) == *value)
        })
        .cloned()
        .collect()
}
