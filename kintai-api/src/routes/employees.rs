use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::{
        models::{Employee, EmployeeId, EmployeeRole},
        services::EmployeeInput,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_employee).put(update).delete(delete_employee))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeBody {
    name: String,
    employee_number: String,
    required_monthly_hours: i32,
    role: EmployeeRole,
}

impl From<EmployeeBody> for EmployeeInput {
    fn from(body: EmployeeBody) -> Self {
        Self {
            name: body.name,
            employee_number: body.employee_number,
            required_monthly_hours: body.required_monthly_hours,
            role: body.role,
        }
    }
}

#[instrument(name = "GET /employees", skip(app_state))]
async fn list(State(app_state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = app_state.employees.list().await?;
    Ok(Json(employees))
}

#[instrument(name = "GET /employees/:id", skip(app_state))]
async fn get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<Employee>, ApiError> {
    let employee = app_state.employees.get(id).await?;
    Ok(Json(employee))
}

#[instrument(name = "POST /employees", skip(app_state, body))]
async fn create(
    State(app_state): State<AppState>,
    Json(body): Json<EmployeeBody>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let employee = app_state.employees.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[instrument(name = "PUT /employees/:id", skip(app_state, body))]
async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(body): Json<EmployeeBody>,
) -> Result<Json<Employee>, ApiError> {
    let employee = app_state.employees.update(id, body.into()).await?;
    Ok(Json(employee))
}

#[instrument(name = "DELETE /employees/:id", skip(app_state))]
async fn delete_employee(
    State(app_state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
    app_state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
