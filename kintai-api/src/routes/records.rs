use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{AttendanceRecord, EmployeeId, WorkingHoursSummary, YearMonth},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(all_records))
        .route("/:employee_id", get(employee_records))
        .route("/:employee_id/summary", get(summary))
}

#[derive(Debug, Deserialize)]
struct MonthParams {
    month: Option<YearMonth>,
}

#[instrument(name = "GET /records", skip(app_state))]
async fn all_records(
    State(app_state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
    let records = app_state.records.all_records(params.month).await?;
    Ok(Json(records))
}

#[instrument(name = "GET /records/:employee_id", skip(app_state))]
async fn employee_records(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
    let records = app_state
        .records
        .employee_records(employee_id, params.month)
        .await?;
    Ok(Json(records))
}

#[instrument(name = "GET /records/:employee_id/summary", skip(app_state))]
async fn summary(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Query(params): Query<MonthParams>,
) -> Result<Json<WorkingHoursSummary>, ApiError> {
    let summary = app_state.records.summary(employee_id, params.month).await?;
    Ok(Json(summary))
}
