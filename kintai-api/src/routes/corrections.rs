use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{
        AttendanceRecordId, CorrectionRequest, CorrectionRequestId, CorrectionStatus,
        CorrectionSubmission, EmployeeId,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit).get(list))
        .route("/:id/approve", post(approve))
        .route("/:id/reject", post(reject))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody {
    employee_id: EmployeeId,
    record_id: AttendanceRecordId,
    requested_clock_in: Option<NaiveDateTime>,
    requested_clock_out: Option<NaiveDateTime>,
    reason: String,
}

#[instrument(name = "POST /corrections", skip(app_state, body))]
async fn submit(
    State(app_state): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<CorrectionRequest>, ApiError> {
    let request = app_state
        .corrections
        .submit(CorrectionSubmission {
            employee_id: body.employee_id,
            record_id: body.record_id,
            requested_clock_in: body.requested_clock_in,
            requested_clock_out: body.requested_clock_out,
            reason: body.reason,
        })
        .await?;
    Ok(Json(request))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    employee_id: Option<EmployeeId>,
    status: Option<CorrectionStatus>,
}

#[instrument(name = "GET /corrections", skip(app_state))]
async fn list(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CorrectionRequest>>, ApiError> {
    let requests = app_state
        .corrections
        .list(params.employee_id, params.status)
        .await?;
    Ok(Json(requests))
}

#[instrument(name = "POST /corrections/approve", skip(app_state))]
async fn approve(
    State(app_state): State<AppState>,
    Path(id): Path<CorrectionRequestId>,
) -> Result<Json<CorrectionRequest>, ApiError> {
    let request = app_state.corrections.approve(id).await?;
    Ok(Json(request))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody {
    rejection_reason: Option<String>,
}

#[instrument(name = "POST /corrections/reject", skip(app_state, body))]
async fn reject(
    State(app_state): State<AppState>,
    Path(id): Path<CorrectionRequestId>,
    Json(body): Json<RejectBody>,
) -> Result<Json<CorrectionRequest>, ApiError> {
    let request = app_state
        .corrections
        .reject(id, body.rejection_reason.as_deref())
        .await?;
    Ok(Json(request))
}
