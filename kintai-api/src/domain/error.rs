use thiserror::Error;

use super::models::{AttendanceRecordId, CorrectionRequestId, EmployeeId};
use super::ports::outbound::StoreError;

/// Errors that can occur during attendance operations.
///
/// Every variant carries a stable machine-readable code (see [`code`])
/// alongside the human-readable message; the HTTP layer maps both onto
/// the wire.
///
/// [`code`]: AttendanceError::code
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
    #[error("already clocked in today")]
    AlreadyClockedIn,
    #[error("not clocked in today")]
    NotClockedIn,
    #[error("already clocked out today")]
    AlreadyClockedOut,
    #[error("clock-in must be strictly before clock-out")]
    InvalidTimeRange,
    #[error("attendance record not found: {0}")]
    RecordNotFound(AttendanceRecordId),
    #[error("correction request not found: {0}")]
    CorrectionRequestNotFound(CorrectionRequestId),
    #[error("correction request already processed")]
    CorrectionAlreadyProcessed,
    #[error("cannot touch another employee's record")]
    Forbidden,
    #[error("employee number already exists: {0}")]
    EmployeeNumberDuplicate(String),
    #[error("required monthly hours must be within 140-180, got {0}")]
    InvalidRequiredHours(i32),
    #[error("{0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl AttendanceError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable code for clients and telemetry.
    ///
    /// Codes group by area: ATTENDANCE_* for state-machine violations,
    /// EMPLOYEE_*, CORRECTION_*, AUTH_* and SYS_001 for storage/infra.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyClockedIn => "ATTENDANCE_001",
            Self::NotClockedIn => "ATTENDANCE_002",
            Self::AlreadyClockedOut => "ATTENDANCE_003",
            Self::InvalidTimeRange => "ATTENDANCE_004",
            Self::EmployeeNotFound(_) => "EMPLOYEE_001",
            Self::EmployeeNumberDuplicate(_) => "EMPLOYEE_002",
            Self::InvalidRequiredHours(_) => "EMPLOYEE_003",
            Self::Validation(_) => "EMPLOYEE_004",
            Self::Forbidden => "AUTH_002",
            Self::RecordNotFound(_) => "RECORD_001",
            Self::CorrectionRequestNotFound(_) => "CORRECTION_001",
            Self::CorrectionAlreadyProcessed => "CORRECTION_002",
            Self::Storage(_) => "SYS_001",
        }
    }
}

/// Store failures the services did not intercept are infrastructure
/// problems; sites that care about `Duplicate` match before `?`.
impl From<StoreError> for AttendanceError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
