//! Query parameter validation

use crate::categories::{Dimension, TimeRange, ALL, TIME_RANGES};
use crate::models::QueryParams;

/// Check each parameter against its fixed enumeration
///
/// Absent and empty values are always accepted, and `"all"` is accepted
/// for the categorical parameters. Errors are reported in the order
/// `timeRange`, `studyType`, `ageGroup`, `region`.
pub fn validate_query(query: &QueryParams) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(range) = provided(query.time_range.as_deref()) {
        if range.parse::<TimeRange>().is_err() {
            errors.push(format!(
                "Invalid timeRange: {range}. Must be one of: {}",
                TIME_RANGES.join(", ")
            ));
        }
    }

    let categorical = [
        (Dimension::StudyType, query.study_type.as_deref(), "study types"),
        (Dimension::AgeGroup, query.age_group.as_deref(), "age groups"),
        (Dimension::Region, query.region.as_deref(), "regions"),
    ];

    for (dimension, value, label) in categorical {
        let Some(value) = provided(value) else {
            continue;
        };
        if value != ALL && !dimension.contains(value) {
            errors.push(format!(
                "Invalid {}: {value}. Must be one of the valid {label} or \"{ALL}\"",
                dimension.key()
            ));
        }
    }

    errors
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
