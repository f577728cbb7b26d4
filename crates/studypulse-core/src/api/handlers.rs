//! API handlers for the HTTP REST API

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::analytics::{
    build_comparisons, build_trends, filter_metrics, summarize_with, validate_query, ActivityRatios,
};
use crate::categories::TimeRange;
use crate::data::MetricsSource;
use crate::error::Error;
use crate::models::{
    ComparisonsData, DailyMetric, FilterCriteria, FilterOptions, QueryParams, SummaryMetrics,
    TrendsResponse,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Where records are loaded from on each request
    pub source: Arc<dyn MetricsSource>,
    /// Shared secret required on `/api` routes
    pub api_key: Arc<str>,
    /// Multipliers for the "active" summary counts
    pub ratios: ActivityRatios,
}

impl AppState {
    /// Create state with the default activity ratios
    pub fn new(source: Arc<dyn MetricsSource>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            source,
            api_key: api_key.into(),
            ratios: ActivityRatios::default(),
        }
    }

    /// Override the activity ratios
    #[must_use]
    pub fn with_ratios(mut self, ratios: ActivityRatios) -> Self {
        self.ratios = ratios;
        self
    }
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Short headline
    pub error: String,
    /// Longer explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Individual validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiErrorResponse {
    /// Error with just a headline
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    /// Attach a human-readable message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a list of details
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// Health check response
#[derive(Serialize)]
#[allow(missing_docs)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Headline summary for the filtered records
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
) -> Result<Json<SummaryMetrics>, ApiError> {
    let criteria = checked_criteria(query)?;
    let records = load_filtered(&state, &criteria, "Failed to load summary data").await?;

    Ok(Json(summarize_with(&records, state.ratios)))
}

/// Daily trends for the requested window (default `30d`)
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let criteria = checked_criteria(query)?;
    let records = load_filtered(&state, &criteria, "Failed to load trends data").await?;

    let range = match criteria.time_range.as_deref() {
        Some(requested) => requested.parse::<TimeRange>().map_err(|_| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse::new("Range not found")),
            )
        })?,
        None => TimeRange::default(),
    };

    Ok(Json(build_trends(&records).into_response(range)))
}

/// Per-category comparisons for the filtered records
pub async fn get_comparisons(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
) -> Result<Json<ComparisonsData>, ApiError> {
    let criteria = checked_criteria(query)?;
    let records = load_filtered(&state, &criteria, "Failed to load comparisons data").await?;

    Ok(Json(build_comparisons(
        &records,
        criteria.selected_study_type(),
    )))
}

/// Values offered by the dashboard's filter controls
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, ApiError> {
    state
        .source
        .filter_options()
        .await
        .map(Json)
        .map_err(|e| internal_error(&e, "Failed to load filter options"))
}

/// Catch-all for unknown `/api` paths
pub async fn api_not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("Not found")),
    )
}

fn checked_criteria(query: QueryParams) -> Result<FilterCriteria, ApiError> {
    let errors = validate_query(&query);
    if !errors.is_empty() {
        debug!(?errors, "Rejected query parameters");
        return Err(client_error(&Error::Validation(errors)));
    }
    Ok(FilterCriteria::from(query))
}

async fn load_filtered(
    state: &AppState,
    criteria: &FilterCriteria,
    failure: &str,
) -> Result<Vec<DailyMetric>, ApiError> {
    let records = state
        .source
        .daily_metrics()
        .await
        .map_err(|e| internal_error(&e, failure))?;

    let filtered = filter_metrics(&records, Some(criteria));
    debug!(
        total = records.len(),
        matched = filtered.len(),
        ?criteria,
        "Filtered daily metrics"
    );
    Ok(filtered)
}

/// Map a caller-side error onto its status and body
pub fn client_error(err: &Error) -> ApiError {
    match err {
        Error::Validation(details) => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("Invalid query parameters").with_details(details.clone())),
        ),
        Error::MissingApiKey => (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new("Authentication required").with_message(err.to_string())),
        ),
        Error::InvalidApiKey => (
            StatusCode::FORBIDDEN,
            Json(ApiErrorResponse::new("Authentication failed").with_message(err.to_string())),
        ),
        other => internal_error(other, "Internal server error"),
    }
}

fn internal_error(err: &Error, headline: &str) -> ApiError {
    error!(error = %err, "{headline}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse::new(headline)),
    )
}
