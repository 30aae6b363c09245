use chrono::NaiveDate;
use serde::Serialize;

use super::{AttendanceRecord, EmployeeId, YearMonth};

/// Worked time for a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkingHours {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub working_minutes: i64,
    pub clocked_in: bool,
    pub clocked_out: bool,
    pub complete_day: bool,
}

impl DailyWorkingHours {
    pub fn new(
        employee_id: EmployeeId,
        date: NaiveDate,
        working_minutes: i64,
        clocked_in: bool,
        clocked_out: bool,
    ) -> Self {
        Self {
            employee_id,
            date,
            working_minutes,
            clocked_in,
            clocked_out,
            complete_day: clocked_in && clocked_out,
        }
    }

    pub fn empty(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self::new(employee_id, date, 0, false, false)
    }

    pub fn working_hours(&self) -> f64 {
        self.working_minutes as f64 / 60.0
    }
}

/// Worked time aggregated over one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWorkingHours {
    pub employee_id: EmployeeId,
    pub month: YearMonth,
    pub total_working_minutes: i64,
    /// Days with any record at all.
    pub working_days: usize,
    /// Days with both clock-in and clock-out set.
    pub present_days: usize,
    pub absent_days: usize,
    pub average_working_hours: f64,
}

impl MonthlyWorkingHours {
    pub fn from_records(
        employee_id: EmployeeId,
        month: YearMonth,
        records: &[AttendanceRecord],
    ) -> Self {
        let total_working_minutes: i64 = records.iter().map(|r| r.working_minutes).sum();
        let working_days = records.len();
        let present_days = records
            .iter()
            .filter(|r| r.is_clocked_in() && r.is_clocked_out())
            .count();
        let average_working_hours = if working_days > 0 {
            (total_working_minutes as f64 / 60.0) / working_days as f64
        } else {
            0.0
        };

        Self {
            employee_id,
            month,
            total_working_minutes,
            working_days,
            present_days,
            absent_days: working_days - present_days,
            average_working_hours,
        }
    }

    pub fn total_working_hours(&self) -> f64 {
        self.total_working_minutes as f64 / 60.0
    }
}

/// A month's worked time reconciled against the employee's required hours.
///
/// The three predicates are mutually exclusive by construction from the
/// sign of `difference_minutes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredHoursComparison {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub employee_number: String,
    pub month: YearMonth,
    pub actual_minutes: i64,
    pub required_minutes: i64,
    pub difference_minutes: i64,
    pub achievement_rate: f64,
    pub is_overtime: bool,
    pub is_undertime: bool,
    pub meets_requirement: bool,
}

impl RequiredHoursComparison {
    pub fn new(
        employee_id: EmployeeId,
        employee_name: String,
        employee_number: String,
        month: YearMonth,
        actual_minutes: i64,
        required_minutes: i64,
    ) -> Self {
        let difference_minutes = actual_minutes - required_minutes;
        let achievement_rate = if required_minutes == 0 {
            0.0
        } else {
            actual_minutes as f64 / required_minutes as f64 * 100.0
        };

        Self {
            employee_id,
            employee_name,
            employee_number,
            month,
            actual_minutes,
            required_minutes,
            difference_minutes,
            achievement_rate,
            is_overtime: difference_minutes > 0,
            is_undertime: difference_minutes < 0,
            meets_requirement: difference_minutes == 0,
        }
    }

    pub fn actual_hours(&self) -> f64 {
        self.actual_minutes as f64 / 60.0
    }

    pub fn required_hours(&self) -> f64 {
        self.required_minutes as f64 / 60.0
    }
}

/// Compact per-month summary for the record browsing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursSummary {
    pub employee_id: EmployeeId,
    pub month: YearMonth,
    pub total_working_minutes: i64,
    pub required_minutes: i64,
    pub difference_minutes: i64,
    pub working_days: usize,
}

impl WorkingHoursSummary {
    pub fn new(
        employee_id: EmployeeId,
        month: YearMonth,
        total_working_minutes: i64,
        required_minutes: i64,
        working_days: usize,
    ) -> Self {
        Self {
            employee_id,
            month,
            total_working_minutes,
            required_minutes,
            difference_minutes: total_working_minutes - required_minutes,
            working_days,
        }
    }
}
