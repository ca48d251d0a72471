//! Export download handler.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use school_closures::ExportFormat;

use super::records::FilterParams;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Download the filtered records as CSV or JSON.
pub async fn export_records(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse().map_err(ApiError::BadRequest)?;
    let filter = params.to_filter()?;

    let registry = Arc::clone(&state.registry);
    let file = tokio::task::spawn_blocking(move || registry.blocking_read().export(&filter, format))
        .await
        .map_err(|e| ApiError::Internal(format!("export task failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, format.media_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.contents,
    )
        .into_response())
}
