//! Aggregation core
//!
//! Everything here is synchronous and pure: callers hand in an already
//! loaded record slice and get plain aggregate values back.

mod comparisons;
mod filter;
mod summary;
mod trends;
mod validate;

pub use comparisons::{build_comparisons, compare};
pub use filter::{filter_metrics, filter_metrics_at};
pub use summary::{
    percent, summarize, summarize_with, ActivityRatios, ACTIVE_PARTICIPANT_RATIO,
    ACTIVE_STUDY_RATIO,
};
pub use trends::{build_trends, APPLICATIONS_SERIES, COMPLETIONS_SERIES, PARTICIPANTS_SERIES};
pub use validate::validate_query;
