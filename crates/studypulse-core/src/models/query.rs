//! Query parameters and filter criteria shared between the API and CLI

use serde::{Deserialize, Serialize};

use crate::categories::ALL;

/// Raw dashboard query, exactly as received on the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub time_range: Option<String>,
    pub study_type: Option<String>,
    pub age_group: Option<String>,
    pub region: Option<String>,
}

/// Criteria applied by the record filter
///
/// Each categorical field is either a category value or `"all"`; `None`
/// and `"all"` both mean "no restriction". A missing `time_range` means no
/// date cutoff at all, which is not the same as `"30d"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub time_range: Option<String>,
    pub study_type: Option<String>,
    pub age_group: Option<String>,
    pub region: Option<String>,
}

impl FilterCriteria {
    /// Study type the caller selected, if it is a real restriction
    pub fn selected_study_type(&self) -> Option<&str> {
        restriction(self.study_type.as_deref())
    }

    /// Age group the caller selected, if it is a real restriction
    pub fn selected_age_group(&self) -> Option<&str> {
        restriction(self.age_group.as_deref())
    }

    /// Region the caller selected, if it is a real restriction
    pub fn selected_region(&self) -> Option<&str> {
        restriction(self.region.as_deref())
    }

    /// Number of look-back days named by `time_range`
    ///
    /// Reads the leading integer (`"30d"` -> 30). Returns `None` when no
    /// window was requested or the value has no leading digits.
    pub fn window_days(&self) -> Option<i64> {
        let raw = self.time_range.as_deref()?.trim_start();
        let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

impl From<QueryParams> for FilterCriteria {
    fn from(query: QueryParams) -> Self {
        Self {
            time_range: non_empty(query.time_range),
            study_type: non_empty(query.study_type),
            age_group: non_empty(query.age_group),
            region: non_empty(query.region),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn restriction(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}
