//! Data models for StudyPulse

mod analytics;
mod metric;
mod query;

pub use analytics::*;
pub use metric::*;
pub use query::*;
