use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{AttendanceRecord, DailyAttendance, EmployeeId},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clock-in", post(clock_in))
        .route("/clock-out", post(clock_out))
        .route("/status/:employee_id", get(status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PunchBody {
    employee_id: EmployeeId,
}

#[instrument(name = "POST /attendance/clock-in", skip(app_state))]
async fn clock_in(
    State(app_state): State<AppState>,
    Json(body): Json<PunchBody>,
) -> Result<Json<AttendanceRecord>, ApiError> {
    let record = app_state.attendance.clock_in(body.employee_id).await?;
    Ok(Json(record))
}

#[instrument(name = "POST /attendance/clock-out", skip(app_state))]
async fn clock_out(
    State(app_state): State<AppState>,
    Json(body): Json<PunchBody>,
) -> Result<Json<AttendanceRecord>, ApiError> {
    let record = app_state.attendance.clock_out(body.employee_id).await?;
    Ok(Json(record))
}

#[instrument(name = "GET /attendance/status", skip(app_state))]
async fn status(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> Result<Json<DailyAttendance>, ApiError> {
    let status = app_state.attendance.status(employee_id).await?;
    Ok(Json(status))
}
