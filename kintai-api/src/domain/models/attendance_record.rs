use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{AttendanceRecordId, EmployeeId};

/// Where a day's record sits in the clock-in/clock-out state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Both clock-in and clock-out recorded.
    Present,
    /// No clock-in recorded for the day.
    Absent,
    /// Clocked in, not yet clocked out.
    Partial,
}

/// One attendance record per (employee, date).
///
/// Worked minutes equal the whole-minute difference between clock-out and
/// clock-in whenever both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub working_minutes: i64,
    pub status: AttendanceStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AttendanceRecord {
    pub fn is_clocked_in(&self) -> bool {
        self.clock_in_time.is_some()
    }

    pub fn is_clocked_out(&self) -> bool {
        self.clock_out_time.is_some()
    }

    /// Whole-minute span between two timestamps, truncated toward zero.
    pub fn minutes_between(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> i64 {
        (clock_out - clock_in).num_minutes()
    }
}

/// Data for creating a day's record; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAttendanceRecord {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub working_minutes: i64,
    pub status: AttendanceStatus,
}

/// A day's attendance as reported to clients.
///
/// Days without a stored record are reported as a synthetic ABSENT entry
/// (`record_id` = None) so callers handle every day uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    pub record_id: Option<AttendanceRecordId>,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in_time: Option<NaiveDateTime>,
    pub clock_out_time: Option<NaiveDateTime>,
    pub working_minutes: i64,
    pub status: AttendanceStatus,
}

impl DailyAttendance {
    pub fn absent(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            record_id: None,
            employee_id,
            date,
            clock_in_time: None,
            clock_out_time: None,
            working_minutes: 0,
            status: AttendanceStatus::Absent,
        }
    }
}

impl From<AttendanceRecord> for DailyAttendance {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            record_id: Some(record.id),
            employee_id: record.employee_id,
            date: record.date,
            clock_in_time: record.clock_in_time,
            clock_out_time: record.clock_out_time,
            working_minutes: record.working_minutes,
            status: record.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn minutes_between_truncates_toward_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let clock_in = date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let clock_out = date.and_time(NaiveTime::from_hms_opt(17, 30, 59).unwrap());

        assert_eq!(AttendanceRecord::minutes_between(clock_in, clock_out), 510);
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for (status, name) in [
            (AttendanceStatus::Present, "PRESENT"),
            (AttendanceStatus::Absent, "ABSENT"),
            (AttendanceStatus::Partial, "PARTIAL"),
        ] {
            assert_eq!(status.to_string(), name);
            assert_eq!(name.parse::<AttendanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn synthetic_absent_day_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let absent = DailyAttendance::absent(EmployeeId::new(7), date);

        let json = serde_json::to_value(&absent).unwrap();
        assert_eq!(json["recordId"], serde_json::Value::Null);
        assert_eq!(json["employeeId"], 7);
        assert_eq!(json["status"], "ABSENT");
        assert_eq!(json["workingMinutes"], 0);
        assert_eq!(json["clockInTime"], serde_json::Value::Null);
    }
}
