use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{AttendanceRecordId, CorrectionRequestId, EmployeeId};

/// Processing state of a correction request. Transitions are one-shot:
/// PENDING -> APPROVED or PENDING -> REJECTED, never back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A proposed retroactive edit to one attendance record's clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub id: CorrectionRequestId,
    pub employee_id: EmployeeId,
    pub record_id: AttendanceRecordId,
    pub requested_clock_in: Option<NaiveDateTime>,
    pub requested_clock_out: Option<NaiveDateTime>,
    pub reason: String,
    pub status: CorrectionStatus,
    pub request_date: NaiveDateTime,
    pub processed_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for creating a PENDING request; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewCorrectionRequest {
    pub employee_id: EmployeeId,
    pub record_id: AttendanceRecordId,
    pub requested_clock_in: Option<NaiveDateTime>,
    pub requested_clock_out: Option<NaiveDateTime>,
    pub reason: String,
    pub request_date: NaiveDateTime,
}

/// An employee's submission contesting a recorded day.
#[derive(Debug, Clone)]
pub struct CorrectionSubmission {
    pub employee_id: EmployeeId,
    pub record_id: AttendanceRecordId,
    pub requested_clock_in: Option<NaiveDateTime>,
    pub requested_clock_out: Option<NaiveDateTime>,
    pub reason: String,
}
