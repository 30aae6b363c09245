use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::AttendanceError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

/// Transport-facing error: HTTP status plus the domain's stable code.
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        let status = match &err {
            AttendanceError::EmployeeNotFound(_)
            | AttendanceError::RecordNotFound(_)
            | AttendanceError::CorrectionRequestNotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::AlreadyClockedIn
            | AttendanceError::AlreadyClockedOut
            | AttendanceError::CorrectionAlreadyProcessed
            | AttendanceError::EmployeeNumberDuplicate(_) => StatusCode::CONFLICT,
            AttendanceError::NotClockedIn
            | AttendanceError::InvalidTimeRange
            | AttendanceError::InvalidRequiredHours(_)
            | AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
            AttendanceError::Forbidden => StatusCode::FORBIDDEN,
            AttendanceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("storage failure: {err}");
        }

        Self::new(status, err.to_string()).with_code(err.code())
    }
}
