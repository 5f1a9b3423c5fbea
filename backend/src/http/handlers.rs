//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::dto::{ControlDefinitions, Dashboard, DrawListResponse, HealthResponse, OccupancyQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::OccupancyReport;
use crate::error::OccupancyResult;
use crate::models::EventTable;
use crate::routes::chart::build_dashboard;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Run `f` on the current event table in a blocking task.
async fn with_table<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(Arc<EventTable>) -> OccupancyResult<T> + Send + 'static,
{
    let cache = state.cache.clone();
    let path = Arc::clone(&state.data_path);

    tokio::task::spawn_blocking(move || cache.get_or_load(&path).and_then(f))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(AppError::from)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the sales data loads.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let data_status = match with_table(&state, |table| Ok(table.len())).await {
        Ok(count) => format!("loaded ({} events)", count),
        Err(AppError::DataLoad(e)) => format!("error: {}", e),
        Err(e) => format!("error: {:?}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        data: data_status,
    }))
}

// =============================================================================
// Dashboard Endpoints
// =============================================================================

/// GET /v1/controls
///
/// Slider definitions the dashboard renders above the charts.
pub async fn get_controls(State(state): State<AppState>) -> HandlerResult<ControlDefinitions> {
    Ok(Json(state.controls.as_ref().clone()))
}

/// GET /v1/draws
///
/// List the draws present in the sales log.
pub async fn list_draws(State(state): State<AppState>) -> HandlerResult<DrawListResponse> {
    let (draws, checksum) = with_table(&state, |table| {
        Ok((services::summarize_draws(&table), table.checksum().to_string()))
    })
    .await?;

    let total = draws.len();
    Ok(Json(DrawListResponse {
        draws,
        total,
        checksum,
    }))
}

/// GET /v1/occupancy?time_at_house=30&progress_lower=0&progress_upper=100
///
/// Charts for every draw, laid out in two columns.
pub async fn get_occupancy(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> HandlerResult<Dashboard> {
    let params = state.controls.resolve(&query)?;

    let dashboard = with_table(&state, move |table| {
        let report = services::compute_occupancy(&table, params)?;
        Ok(build_dashboard(&report))
    })
    .await?;

    Ok(Json(dashboard))
}

/// GET /v1/occupancy/report
///
/// Raw curves and percentile markers, without chart styling.
pub async fn get_occupancy_report(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> HandlerResult<OccupancyReport> {
    let params = state.controls.resolve(&query)?;

    let report = with_table(&state, move |table| {
        services::compute_occupancy(&table, params)
    })
    .await?;

    Ok(Json(report))
}
