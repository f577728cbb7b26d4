//! # StudyPulse
//!
//! Analytics backend for research-study participation dashboards.
//!
//! StudyPulse filters a flat collection of daily metric records and serves
//! summary, trend and comparison aggregates over a small authenticated
//! HTTP/JSON API.
//!
//! ## Architecture
//!
//! - **Analytics**: pure filtering and aggregation over an in-memory slice
//! - **Data**: record sources (JSON file, in-memory) and a mock generator
//! - **API**: REST endpoints consumed by the dashboard frontend
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a month of sample data
//! studypulse generate
//!
//! # Serve the API
//! API_KEY=secret studypulse serve
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod analytics;
pub mod api;
pub mod categories;
pub mod config;
pub mod data;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::analytics::{
        build_comparisons, build_trends, filter_metrics, summarize, validate_query,
    };
    pub use crate::categories::{Dimension, TimeRange};
    pub use crate::config::Config;
    pub use crate::data::{JsonFileSource, MetricsSource};
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
}
