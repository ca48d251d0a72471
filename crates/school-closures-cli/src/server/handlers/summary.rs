//! Summary, filter option and catalog handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use school_closures::catalog::{CLOSURE_REASONS, DISTRICTS, MAX_YEAR, MIN_YEAR};
use school_closures::{Summary, district_options, year_options};

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct OptionsResponse {
    /// Districts present in the data, ascending.
    pub districts: Vec<String>,
    /// Years present in the data, newest first.
    pub years: Vec<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub districts: &'static [&'static str],
    pub reasons: &'static [&'static str],
    pub min_year: i32,
    pub max_year: i32,
}

/// Summary statistics over every record.
pub async fn get_summary(State(state): State<AppState>) -> Json<Summary> {
    Json(state.registry.read().await.summary())
}

pub async fn get_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let registry = state.registry.read().await;
    Json(OptionsResponse {
        districts: district_options(registry.records()),
        years: year_options(registry.records()),
    })
}

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        districts: DISTRICTS,
        reasons: CLOSURE_REASONS,
        min_year: MIN_YEAR,
        max_year: MAX_YEAR,
    })
}
