//! Attendance record store port (outbound).

use async_trait::async_trait;
use chrono::NaiveDate;

use super::StoreError;
use crate::domain::models::{
    AttendanceRecord, AttendanceRecordId, EmployeeId, NewAttendanceRecord, YearMonth,
};

/// Durable storage of one attendance record per (employee, date).
///
/// Implementations must enforce (employee, date) uniqueness and surface a
/// violation as [`StoreError::Duplicate`]; per-employee serialization of
/// clock-in races rides on that constraint rather than in-process locking.
/// `insert` and `update` return the persisted row including store-assigned
/// id and timestamps.
#[async_trait]
pub trait AttendanceRecordStore: Send + Sync + 'static {
    async fn find_by_id(
        &self,
        id: AttendanceRecordId,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn find_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Records for one employee within a month, ordered by date ascending.
    async fn find_by_employee_and_month(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Full history for one employee, ordered by date descending.
    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Every employee's records within a month, ordered by employee then date.
    async fn find_all_by_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn insert(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError>;

    async fn update(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, StoreError>;
}
