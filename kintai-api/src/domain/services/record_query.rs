use std::sync::Arc;

use crate::domain::{
    clock::Clock,
    models::{AttendanceRecord, EmployeeId, WorkingHoursSummary, YearMonth},
    ports::outbound::{AttendanceRecordStore, EmployeeDirectory},
    AttendanceError,
};

/// Record browsing for the admin and per-employee history views.
/// Read-only, like the aggregator.
pub struct RecordQuery<S, D> {
    records: Arc<S>,
    employees: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<S, D> RecordQuery<S, D>
where
    S: AttendanceRecordStore,
    D: EmployeeDirectory,
{
    pub fn new(records: Arc<S>, employees: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records,
            employees,
            clock,
        }
    }

    fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.clock.today())
    }

    /// Every employee's records for a month (defaults to the current one).
    pub async fn all_records(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let month = month.unwrap_or_else(|| self.current_month());
        Ok(self.records.find_all_by_month(month).await?)
    }

    /// One employee's records; without a month, the full history.
    pub async fn employee_records(
        &self,
        employee_id: EmployeeId,
        month: Option<YearMonth>,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        self.ensure_employee(employee_id).await?;

        let records = match month {
            Some(month) => {
                self.records
                    .find_by_employee_and_month(employee_id, month)
                    .await?
            }
            None => self.records.find_by_employee(employee_id).await?,
        };
        Ok(records)
    }

    /// Month totals against the required-hours target, for the history
    /// header (defaults to the current month).
    pub async fn summary(
        &self,
        employee_id: EmployeeId,
        month: Option<YearMonth>,
    ) -> Result<WorkingHoursSummary, AttendanceError> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound(employee_id))?;

        let month = month.unwrap_or_else(|| self.current_month());
        let records = self
            .records
            .find_by_employee_and_month(employee_id, month)
            .await?;

        let total_working_minutes: i64 = records.iter().map(|r| r.working_minutes).sum();
        let required_minutes = i64::from(employee.required_monthly_hours) * 60;

        Ok(WorkingHoursSummary::new(
            employee_id,
            month,
            total_working_minutes,
            required_minutes,
            records.len(),
        ))
    }

    async fn ensure_employee(&self, employee_id: EmployeeId) -> Result<(), AttendanceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .map(|_| ())
            .ok_or(AttendanceError::EmployeeNotFound(employee_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};
    use crate::domain::clock::FixedClock;
    use crate::domain::models::{AttendanceStatus, NewAttendanceRecord};
    use chrono::{NaiveDate, NaiveTime};

    type Query = RecordQuery<InMemoryAttendanceStore, InMemoryEmployeeDirectory>;

    async fn fixture() -> (Query, Arc<InMemoryAttendanceStore>, EmployeeId) {
        let records = Arc::new(InMemoryAttendanceStore::new());
        let directory = Arc::new(
            InMemoryEmployeeDirectory::new()
                .with_employee("Sato Aoi", "E-0001")
                .await
                .with_employee("Tanaka Ren", "E-0002")
                .await,
        );
        let clock = Arc::new(FixedClock::at(
            NaiveDate::from_ymd_opt(2025, 6, 15)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        ));
        let query = RecordQuery::new(Arc::clone(&records), directory, clock as Arc<dyn Clock>);
        (query, records, EmployeeId::new(1))
    }

    async fn insert_present(
        records: &InMemoryAttendanceStore,
        employee: i64,
        date: NaiveDate,
        minutes: i64,
    ) {
        records
            .insert(NewAttendanceRecord {
                employee_id: EmployeeId::new(employee),
                date,
                clock_in_time: Some(date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())),
                clock_out_time: Some(date.and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap())),
                working_minutes: minutes,
                status: AttendanceStatus::Present,
            })
            .await
            .unwrap();
    }

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn all_records_defaults_to_current_month() {
        let (query, records, _) = fixture().await;
        insert_present(&records, 1, june(2), 540).await;
        insert_present(&records, 2, june(2), 480).await;
        insert_present(&records, 1, NaiveDate::from_ymd_opt(2025, 5, 30).unwrap(), 300).await;

        let all = query.all_records(None).await.unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by employee, then date.
        assert_eq!(all[0].employee_id, EmployeeId::new(1));
        assert_eq!(all[1].employee_id, EmployeeId::new(2));
    }

    #[tokio::test]
    async fn employee_records_without_month_returns_history_newest_first() {
        let (query, records, employee) = fixture().await;
        insert_present(&records, 1, june(2), 540).await;
        insert_present(&records, 1, june(5), 480).await;
        insert_present(&records, 2, june(3), 300).await;

        let history = query.employee_records(employee, None).await.unwrap();
        let dates: Vec<_> = history.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![june(5), june(2)]);
    }

    #[tokio::test]
    async fn summary_reconciles_against_required_hours() {
        let (query, records, employee) = fixture().await;
        insert_present(&records, 1, june(2), 540).await;
        insert_present(&records, 1, june(3), 480).await;

        let summary = query
            .summary(employee, Some(YearMonth::new(2025, 6).unwrap()))
            .await
            .unwrap();
        assert_eq!(summary.total_working_minutes, 1020);
        assert_eq!(summary.required_minutes, 9600);
        assert_eq!(summary.difference_minutes, 1020 - 9600);
        assert_eq!(summary.working_days, 2);
    }

    #[tokio::test]
    async fn unknown_employee_is_rejected() {
        let (query, _, _) = fixture().await;
        let ghost = EmployeeId::new(404);

        assert!(matches!(
            query.employee_records(ghost, None).await.unwrap_err(),
            AttendanceError::EmployeeNotFound(_)
        ));
        assert!(matches!(
            query.summary(ghost, None).await.unwrap_err(),
            AttendanceError::EmployeeNotFound(_)
        ));
    }
}
