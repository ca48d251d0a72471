//! Record listing and submission handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use school_closures::{ClosureForm, ClosureRecord, DashboardView, RecordFilter};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query string of filtered endpoints: `?search=&year=&district=`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub search: String,
    pub year: String,
    pub district: String,
}

impl FilterParams {
    pub fn to_filter(&self) -> Result<RecordFilter, ApiError> {
        Ok(RecordFilter::from_params(
            &self.search,
            &self.year,
            &self.district,
        )?)
    }
}

/// Get the dashboard for the requested filters.
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardView>, ApiError> {
    let filter = params.to_filter()?;
    let registry = state.registry.read().await;
    Ok(Json(registry.dashboard(&filter)))
}

/// Validate and store a submitted form.
///
/// The append writes the whole collection to disk, so it runs on the blocking pool.
pub async fn create_record(
    State(state): State<AppState>,
    Json(form): Json<ClosureForm>,
) -> Result<(StatusCode, Json<ClosureRecord>), ApiError> {
    let registry = Arc::clone(&state.registry);
    let record = tokio::task::spawn_blocking(move || registry.blocking_write().submit(&form))
        .await
        .map_err(|e| ApiError::Internal(format!("submission task failed: {}", e)))??;
    Ok((StatusCode::CREATED, Json(record)))
}
