//! Per-category comparisons across study type, age group and region

use std::collections::HashMap;

use crate::categories::Dimension;
use crate::models::{ComparisonDimension, ComparisonMetric, ComparisonsData, DailyMetric};

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    applications: u64,
    completions: u64,
}

/// Build comparisons for every dimension
///
/// Each dimension lists its full category set in canonical order, zero
/// filled. When `study_type` is given, the study-type dimension is narrowed
/// to that single entry; the other dimensions are unaffected.
pub fn build_comparisons(records: &[DailyMetric], study_type: Option<&str>) -> ComparisonsData {
    let mut study_types = compare(records, Dimension::StudyType);
    if let Some(selected) = study_type {
        study_types.metrics.retain(|metric| metric.name == selected);
    }

    ComparisonsData {
        study_type: study_types,
        age_group: compare(records, Dimension::AgeGroup),
        region: compare(records, Dimension::Region),
    }
}

/// Totals for one dimension over its fixed category list
pub fn compare(records: &[DailyMetric], dimension: Dimension) -> ComparisonDimension {
    let mut by_category: HashMap<&str, Totals> = HashMap::new();

    for record in records {
        let key = dimension.value_of(record);
        if key.is_empty() {
            continue;
        }
        let totals = by_category.entry(key).or_default();
        totals.applications = totals.applications.saturating_add(record.applications_count);
        totals.completions = totals.completions.saturating_add(record.completions_count);
    }

    let metrics = dimension
        .categories()
        .iter()
        .map(|&category| {
            let totals = by_category.get(category).copied().unwrap_or_default();
            ComparisonMetric {
                name: category.to_string(),
                applications: totals.applications,
                completions: totals.completions,
            }
        })
        .collect();

    ComparisonDimension {
        dimension: dimension.key().to_string(),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{AGE_GROUPS, REGIONS, STUDY_TYPES};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<DailyMetric> {
        vec![
            DailyMetric::new("2024-01-15", "Clinical Trials", "25-34", "North America")
                .with_counts(100, 80, 20),
            DailyMetric::new("2024-01-16", "Surveys", "35-44", "Europe").with_counts(150, 120, 30),
            DailyMetric::new("2024-01-17", "Clinical Trials", "25-34", "Asia")
                .with_counts(200, 160, 40),
            DailyMetric::new("2024-01-18", "Interviews", "55-64", "Australia")
                .with_counts(80, 60, 15),
        ]
    }

    fn names(dimension: &ComparisonDimension) -> Vec<&str> {
        dimension.metrics.iter().map(|m| m.name.as_str()).collect()
    }

    fn entry<'a>(dimension: &'a ComparisonDimension, name: &str) -> &'a ComparisonMetric {
        dimension
            .metrics
            .iter()
            .find(|m| m.name == name)
            .unwrap()
    }

    #[test]
    fn emits_every_category_in_canonical_order() {
        let comparisons = build_comparisons(&sample(), None);

        assert_eq!(comparisons.study_type.dimension, "studyType");
        assert_eq!(comparisons.age_group.dimension, "ageGroup");
        assert_eq!(comparisons.region.dimension, "region");
        assert_eq!(names(&comparisons.study_type), STUDY_TYPES.to_vec());
        assert_eq!(names(&comparisons.age_group), AGE_GROUPS.to_vec());
        assert_eq!(names(&comparisons.region), REGIONS.to_vec());
    }

    #[test]
    fn sums_per_category() {
        let comparisons = build_comparisons(&sample(), None);

        let trials = entry(&comparisons.study_type, "Clinical Trials");
        assert_eq!((trials.applications, trials.completions), (300, 240));

        let young = entry(&comparisons.age_group, "25-34");
        assert_eq!((young.applications, young.completions), (300, 240));

        let europe = entry(&comparisons.region, "Europe");
        assert_eq!((europe.applications, europe.completions), (150, 120));

        let africa = entry(&comparisons.region, "Africa");
        assert_eq!((africa.applications, africa.completions), (0, 0));
    }

    #[test]
    fn category_sums_saturate() {
        let records = vec![
            DailyMetric::new("2024-01-15", "Surveys", "18-24", "Asia").with_counts(u64::MAX, 7, 0),
            DailyMetric::new("2024-01-16", "Surveys", "18-24", "Asia").with_counts(1, 3, 0),
        ];

        let comparisons = build_comparisons(&records, None);

        let surveys = entry(&comparisons.study_type, "Surveys");
        assert_eq!((surveys.applications, surveys.completions), (u64::MAX, 10));
    }

    #[test]
    fn empty_input_is_zero_filled() {
        let comparisons = build_comparisons(&[], None);

        for dimension in [&comparisons.study_type, &comparisons.age_group, &comparisons.region] {
            assert_eq!(dimension.metrics.len(), 6);
            assert!(dimension
                .metrics
                .iter()
                .all(|m| m.applications == 0 && m.completions == 0));
        }
    }

    #[test]
    fn narrows_only_study_type() {
        let comparisons = build_comparisons(&sample(), Some("Clinical Trials"));

        assert_eq!(
            comparisons.study_type.metrics,
            vec![ComparisonMetric {
                name: "Clinical Trials".to_string(),
                applications: 300,
                completions: 240,
            }]
        );
        assert_eq!(comparisons.age_group.metrics.len(), 6);
        assert_eq!(comparisons.region.metrics.len(), 6);
    }

    #[test]
    fn empty_and_unknown_keys_contribute_nothing() {
        let records = vec![
            DailyMetric::new("2024-01-15", "", "", "").with_counts(10, 10, 10),
            DailyMetric::new("2024-01-15", "Hackathons", "99+", "Antarctica").with_counts(5, 5, 5),
        ];

        let comparisons = build_comparisons(&records, None);

        for dimension in [&comparisons.study_type, &comparisons.age_group, &comparisons.region] {
            assert_eq!(dimension.metrics.len(), 6);
            assert!(dimension.metrics.iter().all(|m| m.applications == 0));
        }
    }
}
