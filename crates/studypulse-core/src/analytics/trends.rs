//! Daily trends over a record set
//!
//! Records are grouped by their exact `date` string and the three counters
//! summed per day. The 30-day window carries the whole series; the 14- and
//! 7-day windows are its trailing points, counted by distinct dates rather
//! than calendar distance.

use std::collections::BTreeMap;

use crate::categories::TimeRange;
use crate::models::{
    DailyMetric, TimeRangeConfig, TimeRanges, TimeSeriesMetric, TimeSeriesPoint, TrendsData,
};

/// Series name for summed applications
pub const APPLICATIONS_SERIES: &str = "Study Applications";

/// Series name for summed completions
pub const COMPLETIONS_SERIES: &str = "Study Completions";

/// Series name for summed new participants
pub const PARTICIPANTS_SERIES: &str = "New Participants";

const DAY_INTERVAL: &str = "day";

#[derive(Debug, Default, Clone, Copy)]
struct DayTotals {
    applications: u64,
    completions: u64,
    new_participants: u64,
}

/// Build the three look-back windows
pub fn build_trends(records: &[DailyMetric]) -> TrendsData {
    // BTreeMap keeps dates in ascending lexicographic order, which is
    // chronological for ISO dates.
    let mut by_date: BTreeMap<&str, DayTotals> = BTreeMap::new();

    for record in records {
        let totals = by_date.entry(record.date.as_str()).or_default();
        totals.applications = totals.applications.saturating_add(record.applications_count);
        totals.completions = totals.completions.saturating_add(record.completions_count);
        totals.new_participants = totals
            .new_participants
            .saturating_add(record.new_participants_count);
    }

    let series = |name: &str, pick: fn(&DayTotals) -> u64| TimeSeriesMetric {
        name: name.to_string(),
        data: by_date
            .iter()
            .map(|(date, totals)| TimeSeriesPoint {
                date: (*date).to_string(),
                value: pick(totals),
            })
            .collect(),
    };

    let metrics = vec![
        series(APPLICATIONS_SERIES, |t: &DayTotals| t.applications),
        series(COMPLETIONS_SERIES, |t: &DayTotals| t.completions),
        series(PARTICIPANTS_SERIES, |t: &DayTotals| t.new_participants),
    ];

    TrendsData {
        time_ranges: TimeRanges {
            week: trailing(&metrics, TimeRange::Week.days()),
            fortnight: trailing(&metrics, TimeRange::Fortnight.days()),
            month: TimeRangeConfig {
                interval: DAY_INTERVAL.to_string(),
                metrics,
            },
        },
    }
}

fn trailing(metrics: &[TimeSeriesMetric], points: usize) -> TimeRangeConfig {
    TimeRangeConfig {
        interval: DAY_INTERVAL.to_string(),
        metrics: metrics
            .iter()
            .map(|metric| {
                let start = metric.data.len().saturating_sub(points);
                TimeSeriesMetric {
                    name: metric.name.clone(),
                    data: metric.data[start..].to_vec(),
                }
            })
            .collect(),
    }
}
