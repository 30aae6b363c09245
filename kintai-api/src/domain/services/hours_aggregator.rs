use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    models::{
        DailyWorkingHours, Employee, EmployeeId, MonthlyWorkingHours, RequiredHoursComparison,
        YearMonth,
    },
    ports::outbound::{AttendanceRecordStore, EmployeeDirectory},
    AttendanceError,
};

/// Read-side aggregation of worked time. Performs no mutation.
pub struct HoursAggregator<S, D> {
    records: Arc<S>,
    employees: Arc<D>,
}

impl<S, D> HoursAggregator<S, D>
where
    S: AttendanceRecordStore,
    D: EmployeeDirectory,
{
    pub fn new(records: Arc<S>, employees: Arc<D>) -> Self {
        Self { records, employees }
    }

    async fn employee(&self, employee_id: EmployeeId) -> Result<Employee, AttendanceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound(employee_id))
    }

    /// Worked minutes and session flags for one day; all-zero when the
    /// day has no record.
    pub async fn daily_hours(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<DailyWorkingHours, AttendanceError> {
        self.employee(employee_id).await?;

        let record = self
            .records
            .find_by_employee_and_date(employee_id, date)
            .await?;

        Ok(match record {
            Some(record) => DailyWorkingHours::new(
                employee_id,
                date,
                record.working_minutes,
                record.is_clocked_in(),
                record.is_clocked_out(),
            ),
            None => DailyWorkingHours::empty(employee_id, date),
        })
    }

    /// Totals across one month's records.
    pub async fn monthly_hours(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> Result<MonthlyWorkingHours, AttendanceError> {
        self.employee(employee_id).await?;

        let records = self
            .records
            .find_by_employee_and_month(employee_id, month)
            .await?;

        Ok(MonthlyWorkingHours::from_records(
            employee_id,
            month,
            &records,
        ))
    }

    /// One month's actual minutes reconciled against the employee's
    /// contractual required hours.
    pub async fn required_hours_comparison(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> Result<RequiredHoursComparison, AttendanceError> {
        let employee = self.employee(employee_id).await?;

        let monthly = self.monthly_hours(employee_id, month).await?;
        let required_minutes = i64::from(employee.required_monthly_hours) * 60;

        Ok(RequiredHoursComparison::new(
            employee_id,
            employee.name,
            employee.employee_number,
            month,
            monthly.total_working_minutes,
            required_minutes,
        ))
    }

    /// The comparison for every known employee. Propagates the first
    /// failure rather than returning a partial result.
    pub async fn all_employees_required_hours_comparison(
        &self,
        month: YearMonth,
    ) -> Result<Vec<RequiredHoursComparison>, AttendanceError> {
        let employees = self.employees.find_all().await?;

        let mut comparisons = Vec::with_capacity(employees.len());
        for employee in employees {
            comparisons.push(self.required_hours_comparison(employee.id, month).await?);
        }
        Ok(comparisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};
    use crate::domain::models::{AttendanceStatus, NewAttendanceRecord};
    use crate::domain::ports::outbound::StoreError;
    use async_trait::async_trait;
    use chrono::{NaiveDateTime, NaiveTime};

    type Aggregator = HoursAggregator<InMemoryAttendanceStore, InMemoryEmployeeDirectory>;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn time(d: u32, h: u32, m: u32) -> NaiveDateTime {
        date(d).and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn june() -> YearMonth {
        YearMonth::new(2025, 6).unwrap()
    }

    async fn fixture() -> (Aggregator, Arc<InMemoryAttendanceStore>, EmployeeId) {
        let records = Arc::new(InMemoryAttendanceStore::new());
        let directory =
            Arc::new(InMemoryEmployeeDirectory::new().with_employee("Sato Aoi", "E-0001").await);
        let aggregator = HoursAggregator::new(Arc::clone(&records), directory);
        (aggregator, records, EmployeeId::new(1))
    }

    async fn insert_day(
        records: &InMemoryAttendanceStore,
        employee: EmployeeId,
        d: u32,
        clock_out: Option<(u32, u32)>,
        minutes: i64,
    ) {
        let (status, clock_out_time) = match clock_out {
            Some((h, m)) => (AttendanceStatus::Present, Some(time(d, h, m))),
            None => (AttendanceStatus::Partial, None),
        };
        records
            .insert(NewAttendanceRecord {
                employee_id: employee,
                date: date(d),
                clock_in_time: Some(time(d, 9, 0)),
                clock_out_time,
                working_minutes: minutes,
                status,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn daily_hours_for_complete_day() {
        let (aggregator, records, employee) = fixture().await;
        insert_day(&records, employee, 2, Some((18, 0)), 540).await;

        let daily = aggregator.daily_hours(employee, date(2)).await.unwrap();
        assert_eq!(daily.working_minutes, 540);
        assert!(daily.clocked_in);
        assert!(daily.clocked_out);
        assert!(daily.complete_day);
        assert_eq!(daily.working_hours(), 9.0);
    }

    #[tokio::test]
    async fn daily_hours_without_record_is_all_zero() {
        let (aggregator, _, employee) = fixture().await;

        let daily = aggregator.daily_hours(employee, date(2)).await.unwrap();
        assert_eq!(daily.working_minutes, 0);
        assert!(!daily.clocked_in);
        assert!(!daily.clocked_out);
        assert!(!daily.complete_day);
    }

    #[tokio::test]
    async fn monthly_hours_counts_days_and_averages() {
        let (aggregator, records, employee) = fixture().await;
        insert_day(&records, employee, 2, Some((18, 0)), 540).await;
        insert_day(&records, employee, 3, Some((13, 0)), 240).await;
        // An open session counts as a working day but not a present day.
        insert_day(&records, employee, 4, None, 0).await;

        let monthly = aggregator.monthly_hours(employee, june()).await.unwrap();
        assert_eq!(monthly.total_working_minutes, 780);
        assert_eq!(monthly.working_days, 3);
        assert_eq!(monthly.present_days, 2);
        assert_eq!(monthly.absent_days, 1);
        assert!((monthly.average_working_hours - (13.0 / 3.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_month_avoids_division_by_zero() {
        let (aggregator, _, employee) = fixture().await;

        let monthly = aggregator.monthly_hours(employee, june()).await.unwrap();
        assert_eq!(monthly.total_working_minutes, 0);
        assert_eq!(monthly.working_days, 0);
        assert_eq!(monthly.average_working_hours, 0.0);
    }

    #[tokio::test]
    async fn comparison_flags_undertime() {
        let (aggregator, records, employee) = fixture().await;
        // 1440 worked minutes against the seeded 160h requirement.
        insert_day(&records, employee, 2, Some((21, 0)), 720).await;
        insert_day(&records, employee, 3, Some((21, 0)), 720).await;

        let comparison = aggregator
            .required_hours_comparison(employee, june())
            .await
            .unwrap();
        assert_eq!(comparison.required_minutes, 9600);
        assert_eq!(comparison.actual_minutes, 1440);
        assert_eq!(comparison.difference_minutes, -8160);
        assert_eq!(comparison.achievement_rate, 15.0);
        assert!(comparison.is_undertime);
        assert!(!comparison.is_overtime);
        assert!(!comparison.meets_requirement);
    }

    #[tokio::test]
    async fn comparison_flags_are_mutually_exclusive() {
        let (aggregator, records, employee) = fixture().await;
        // Exactly the 160h requirement: 9600 minutes.
        insert_day(&records, employee, 2, Some((18, 0)), 9600).await;

        let comparison = aggregator
            .required_hours_comparison(employee, june())
            .await
            .unwrap();
        assert!(comparison.meets_requirement);
        assert!(!comparison.is_overtime);
        assert!(!comparison.is_undertime);
    }

    #[tokio::test]
    async fn full_day_flows_from_punches_to_daily_hours() {
        use crate::domain::clock::{Clock, FixedClock};
        use crate::domain::services::AttendanceLifecycle;

        let records = Arc::new(InMemoryAttendanceStore::new());
        let directory =
            Arc::new(InMemoryEmployeeDirectory::new().with_employee("Sato Aoi", "E-0001").await);
        let clock = Arc::new(FixedClock::at(time(2, 9, 0)));

        let lifecycle = AttendanceLifecycle::new(
            Arc::clone(&records),
            Arc::clone(&directory),
            clock.clone() as Arc<dyn Clock>,
        );
        let aggregator = HoursAggregator::new(Arc::clone(&records), directory);

        let employee = EmployeeId::new(1);
        lifecycle.clock_in(employee).await.unwrap();
        clock.set(time(2, 18, 0));
        let record = lifecycle.clock_out(employee).await.unwrap();
        assert_eq!(record.working_minutes, 540);
        assert_eq!(record.status, AttendanceStatus::Present);

        let daily = aggregator.daily_hours(employee, date(2)).await.unwrap();
        assert_eq!(daily.working_minutes, 540);
        assert!(daily.complete_day);
    }

    #[tokio::test]
    async fn all_employees_comparison_covers_directory() {
        let records = Arc::new(InMemoryAttendanceStore::new());
        let directory = Arc::new(
            InMemoryEmployeeDirectory::new()
                .with_employee("Sato Aoi", "E-0001")
                .await
                .with_employee("Tanaka Ren", "E-0002")
                .await,
        );
        let aggregator = HoursAggregator::new(records, directory);

        let comparisons = aggregator
            .all_employees_required_hours_comparison(june())
            .await
            .unwrap();
        assert_eq!(comparisons.len(), 2);
        assert!(comparisons.iter().all(|c| c.is_undertime));
    }

    /// Directory whose listing includes an employee that no longer
    /// resolves by id, to exercise fail-fast propagation.
    #[derive(Clone)]
    struct VanishingDirectory {
        inner: InMemoryEmployeeDirectory,
    }

    #[async_trait]
    impl EmployeeDirectory for VanishingDirectory {
        async fn find_by_id(&self, _id: EmployeeId) -> Result<Option<Employee>, StoreError> {
            Ok(None)
        }

        async fn find_by_number(
            &self,
            employee_number: &str,
        ) -> Result<Option<Employee>, StoreError> {
            self.inner.find_by_number(employee_number).await
        }

        async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
            self.inner.find_all().await
        }

        async fn insert(
            &self,
            employee: crate::domain::models::NewEmployee,
        ) -> Result<Employee, StoreError> {
            self.inner.insert(employee).await
        }

        async fn update(&self, employee: &Employee) -> Result<Employee, StoreError> {
            self.inner.update(employee).await
        }

        async fn delete(&self, id: EmployeeId) -> Result<(), StoreError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn all_employees_comparison_fails_fast() {
        let records = Arc::new(InMemoryAttendanceStore::new());
        let inner = InMemoryEmployeeDirectory::new()
            .with_employee("Sato Aoi", "E-0001")
            .await;
        let aggregator = HoursAggregator::new(records, Arc::new(VanishingDirectory { inner }));

        let err = aggregator
            .all_employees_required_hours_comparison(june())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::EmployeeNotFound(_)));
    }
}
