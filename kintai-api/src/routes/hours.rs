use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{
        DailyWorkingHours, EmployeeId, MonthlyWorkingHours, RequiredHoursComparison, YearMonth,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily/:employee_id", get(daily))
        .route("/monthly/:employee_id", get(monthly))
        .route("/comparison", get(comparison_all))
        .route("/comparison/:employee_id", get(comparison))
}

#[derive(Debug, Deserialize)]
struct DailyParams {
    date: NaiveDate,
}

#[instrument(name = "GET /hours/daily", skip(app_state))]
async fn daily(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Query(params): Query<DailyParams>,
) -> Result<Json<DailyWorkingHours>, ApiError> {
    let daily = app_state
        .hours
        .daily_hours(employee_id, params.date)
        .await?;
    Ok(Json(daily))
}

#[derive(Debug, Deserialize)]
struct MonthParams {
    month: YearMonth,
}

#[instrument(name = "GET /hours/monthly", skip(app_state))]
async fn monthly(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Query(params): Query<MonthParams>,
) -> Result<Json<MonthlyWorkingHours>, ApiError> {
    let monthly = app_state
        .hours
        .monthly_hours(employee_id, params.month)
        .await?;
    Ok(Json(monthly))
}

#[instrument(name = "GET /hours/comparison/:employee_id", skip(app_state))]
async fn comparison(
    State(app_state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Query(params): Query<MonthParams>,
) -> Result<Json<RequiredHoursComparison>, ApiError> {
    let comparison = app_state
        .hours
        .required_hours_comparison(employee_id, params.month)
        .await?;
    Ok(Json(comparison))
}

#[instrument(name = "GET /hours/comparison", skip(app_state))]
async fn comparison_all(
    State(app_state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<RequiredHoursComparison>>, ApiError> {
    let comparisons = app_state
        .hours
        .all_employees_required_hours_comparison(params.month)
        .await?;
    Ok(Json(comparisons))
}
