//! Summary statistics over a record set

use std::collections::HashSet;

use crate::models::{DailyMetric, SummaryMetrics};

/// Share of new participants counted as active
pub const ACTIVE_PARTICIPANT_RATIO: f64 = 0.7;

/// Share of distinct studies counted as active
pub const ACTIVE_STUDY_RATIO: f64 = 0.6;

/// Multipliers used to estimate the "active" counts
///
/// These are fixed fractions of the totals, not derived from any activity
/// signal in the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityRatios {
    /// Applied to total participants
    pub participants: f64,
    /// Applied to total studies
    pub studies: f64,
}

impl Default for ActivityRatios {
    fn default() -> Self {
        Self {
            participants: ACTIVE_PARTICIPANT_RATIO,
            studies: ACTIVE_STUDY_RATIO,
        }
    }
}

/// Summarize records with the default activity ratios
pub fn summarize(records: &[DailyMetric]) -> SummaryMetrics {
    summarize_with(records, ActivityRatios::default())
}

/// Summarize records in a single pass
pub fn summarize_with(records: &[DailyMetric], ratios: ActivityRatios) -> SummaryMetrics {
    if records.is_empty() {
        return SummaryMetrics::default();
    }

    let mut applications: u64 = 0;
    let mut completions: u64 = 0;
    let mut new_participants: u64 = 0;
    let mut study_ids: HashSet<&str> = HashSet::new();

    for record in records {
        applications = applications.saturating_add(record.applications_count);
        completions = completions.saturating_add(record.completions_count);
        new_participants = new_participants.saturating_add(record.new_participants_count);
        if let Some(id) = record.study_id.as_deref().filter(|id| !id.is_empty()) {
            study_ids.insert(id);
        }
    }

    let total_studies = study_ids.len() as u64;

    let outcomes = applications.saturating_add(completions);
    let average_eligibility_rate = if outcomes > 0 {
        percent(applications, outcomes)
    } else {
        0.0
    };

    let completion_rate = if applications > 0 {
        percent(completions, applications)
    } else {
        0.0
    };

    SummaryMetrics {
        total_participants: new_participants,
        active_participants: scale_down(new_participants, ratios.participants),
        total_studies,
        active_studies: scale_down(total_studies, ratios.studies),
        average_eligibility_rate,
        completion_rate,
    }
}

/// `numerator / denominator` as a percentage with one decimal place
///
/// Ties round up (`55.75 -> 55.8`). Callers guarantee a non-zero
/// denominator.
pub fn percent(numerator: u64, denominator: u64) -> f64 {
    let ratio = numerator as f64 / denominator as f64;
    (ratio * 100.0 * 10.0).round() / 10.0
}

fn scale_down(total: u64, ratio: f64) -> u64 {
    (total as f64 * ratio).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metric(applications: u64, completions: u64, participants: u64, study: &str) -> DailyMetric {
        DailyMetric::new("2024-01-15", "Clinical Trials", "25-34", "North America")
            .with_counts(applications, completions, participants)
            .with_study_id(study)
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(&[]), SummaryMetrics::default());
    }

    #[test]
    fn summarizes_sample_data() {
        let records = vec![
            metric(100, 80, 20, "study1"),
            metric(150, 120, 30, "study2"),
            metric(200, 160, 40, "study3"),
            metric(80, 60, 15, "study4"),
        ];

        let summary = summarize(&records);

        assert_eq!(summary.total_participants, 105);
        assert_eq!(summary.active_participants, 73);
        assert_eq!(summary.total_studies, 4);
        assert_eq!(summary.active_studies, 2);
        assert_eq!(summary.average_eligibility_rate, 55.8);
        assert_eq!(summary.completion_rate, 79.2);
    }

    #[test]
    fn rounds_to_one_decimal() {
        let summary = summarize(&[metric(333, 222, 10, "s1")]);

        assert_eq!(summary.average_eligibility_rate, 60.0);
        assert_eq!(summary.completion_rate, 66.7);
    }

    #[test]
    fn zero_applications_guard_division() {
        let summary = summarize(&[metric(0, 0, 10, "s1")]);

        assert_eq!(summary.average_eligibility_rate, 0.0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.total_participants, 10);
        assert_eq!(summary.active_participants, 7);
    }

    #[test]
    fn only_applications() {
        let summary = summarize(&[metric(100, 0, 10, "s1")]);

        assert_eq!(summary.average_eligibility_rate, 100.0);
        assert_eq!(summary.completion_rate, 0.0);
    }

    #[test]
    fn only_completions() {
        let summary = summarize(&[metric(0, 50, 10, "s1")]);

        assert_eq!(summary.average_eligibility_rate, 0.0);
        assert_eq!(summary.completion_rate, 0.0);
    }

    #[test]
    fn counts_distinct_non_empty_study_ids() {
        let records = vec![
            metric(1, 1, 1, "a"),
            metric(1, 1, 1, "a"),
            metric(1, 1, 1, "b"),
            metric(1, 1, 1, ""),
            DailyMetric::new("2024-01-15", "Surveys", "18-24", "Asia").with_counts(1, 1, 1),
        ];

        let summary = summarize(&records);

        assert_eq!(summary.total_studies, 2);
        assert_eq!(summary.active_studies, 1);
    }

    #[test]
    fn custom_ratios_apply() {
        let records = vec![metric(10, 5, 10, "a"), metric(10, 5, 10, "b")];
        let ratios = ActivityRatios {
            participants: 0.5,
            studies: 1.0,
        };

        let summary = summarize_with(&records, ratios);

        assert_eq!(summary.active_participants, 10);
        assert_eq!(summary.active_studies, 2);
    }

    #[test]
    fn completion_rate_is_not_capped() {
        // More completions than applications is reported as-is.
        let summary = summarize(&[metric(1, 499, 0, "s1")]);

        assert_eq!(summary.completion_rate, 49900.0);
        assert_eq!(summary.average_eligibility_rate, 0.2);
    }

    #[test]
    fn huge_counters_saturate() {
        let records = vec![
            metric(u64::MAX, 1, u64::MAX, "s1"),
            metric(1, 1, 10, "s2"),
        ];

        let summary = summarize(&records);

        assert_eq!(summary.total_participants, u64::MAX);
        assert_eq!(summary.total_studies, 2);
        assert_eq!(summary.average_eligibility_rate, 100.0);
        assert_eq!(summary.completion_rate, 0.0);
    }

    #[rstest]
    #[case(1, 3, 33.3)]
    #[case(2, 3, 66.7)]
    #[case(1, 8, 12.5)]
    #[case(5, 5, 100.0)]
    fn percent_rounds_half_up(#[case] numerator: u64, #[case] denominator: u64, #[case] expected: f64) {
        assert_eq!(percent(numerator, denominator), expected);
    }
}
