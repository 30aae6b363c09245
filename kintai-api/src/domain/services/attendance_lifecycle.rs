use std::sync::Arc;

use crate::domain::{
    clock::Clock,
    models::{
        AttendanceRecord, AttendanceStatus, DailyAttendance, EmployeeId, NewAttendanceRecord,
    },
    ports::outbound::{AttendanceRecordStore, EmployeeDirectory, StoreError},
    AttendanceError,
};

/// The daily clock-in/clock-out state machine, per employee.
///
/// "Today" is the injected clock's local calendar date, taken once per
/// call. Concurrent first clock-ins for the same employee are serialized
/// by the store's (employee, date) uniqueness; the duplicate surfaces
/// here as [`AttendanceError::AlreadyClockedIn`].
pub struct AttendanceLifecycle<S, D> {
    records: Arc<S>,
    employees: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<S, D> AttendanceLifecycle<S, D>
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

    async fn ensure_employee(&self, employee_id: EmployeeId) -> Result<(), AttendanceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .map(|_| ())
            .ok_or(AttendanceError::EmployeeNotFound(employee_id))
    }

    /// Record the start of today's work session.
    pub async fn clock_in(
        &self,
        employee_id: EmployeeId,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.ensure_employee(employee_id).await?;

        let now = self.clock.now();
        let today = now.date();

        let existing = self
            .records
            .find_by_employee_and_date(employee_id, today)
            .await?;

        if let Some(record) = existing {
            if record.is_clocked_in() {
                return Err(AttendanceError::AlreadyClockedIn);
            }

            // An absent shell exists for today; fill in the clock-in.
            let mut record = record;
            record.clock_in_time = Some(now);
            record.working_minutes = 0;
            record.status = AttendanceStatus::Partial;
            return Ok(self.records.update(&record).await?);
        }

        let insert = self
            .records
            .insert(NewAttendanceRecord {
                employee_id,
                date: today,
                clock_in_time: Some(now),
                clock_out_time: None,
                working_minutes: 0,
                status: AttendanceStatus::Partial,
            })
            .await;

        match insert {
            Ok(record) => Ok(record),
            // Lost the race against a concurrent clock-in for the same day.
            Err(StoreError::Duplicate(_)) => Err(AttendanceError::AlreadyClockedIn),
            Err(e) => Err(e.into()),
        }
    }

    /// Record the end of today's work session and finalize worked minutes.
    pub async fn clock_out(
        &self,
        employee_id: EmployeeId,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.ensure_employee(employee_id).await?;

        let now = self.clock.now();
        let today = now.date();

        let record = self
            .records
            .find_by_employee_and_date(employee_id, today)
            .await?;

        let Some(mut record) = record else {
            return Err(AttendanceError::NotClockedIn);
        };
        let Some(clock_in) = record.clock_in_time else {
            return Err(AttendanceError::NotClockedIn);
        };
        if record.is_clocked_out() {
            return Err(AttendanceError::AlreadyClockedOut);
        }

        record.clock_out_time = Some(now);
        record.working_minutes = AttendanceRecord::minutes_between(clock_in, now);
        record.status = AttendanceStatus::Present;

        Ok(self.records.update(&record).await?)
    }

    /// Today's attendance, synthesized as ABSENT when nothing is stored.
    pub async fn status(
        &self,
        employee_id: EmployeeId,
    ) -> Result<DailyAttendance, AttendanceError> {
        self.ensure_employee(employee_id).await?;

        let today = self.clock.today();
        let record = self
            .records
            .find_by_employee_and_date(employee_id, today)
            .await?;

        Ok(record
            .map(DailyAttendance::from)
            .unwrap_or_else(|| DailyAttendance::absent(employee_id, today)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::{InMemoryAttendanceStore, InMemoryEmployeeDirectory};
    use crate::domain::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    async fn fixture() -> (
        AttendanceLifecycle<InMemoryAttendanceStore, InMemoryEmployeeDirectory>,
        Arc<InMemoryAttendanceStore>,
        Arc<FixedClock>,
        EmployeeId,
    ) {
        let store = Arc::new(InMemoryAttendanceStore::new());
        let directory =
            Arc::new(InMemoryEmployeeDirectory::new().with_employee("Sato Aoi", "E-0001").await);
        let clock = Arc::new(FixedClock::at(at(9, 0)));
        let lifecycle =
            AttendanceLifecycle::new(Arc::clone(&store), directory, clock.clone() as Arc<dyn Clock>);
        (lifecycle, store, clock, EmployeeId::new(1))
    }

    #[tokio::test]
    async fn clock_in_creates_partial_record() {
        let (lifecycle, _, _, employee) = fixture().await;

        let record = lifecycle.clock_in(employee).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Partial);
        assert_eq!(record.clock_in_time, Some(at(9, 0)));
        assert_eq!(record.clock_out_time, None);
        assert_eq!(record.working_minutes, 0);

        let status = lifecycle.status(employee).await.unwrap();
        assert_eq!(status.status, AttendanceStatus::Partial);
        assert_eq!(status.record_id, Some(record.id));
    }

    #[tokio::test]
    async fn second_clock_in_same_day_fails() {
        let (lifecycle, _, _, employee) = fixture().await;

        lifecycle.clock_in(employee).await.unwrap();
        let err = lifecycle.clock_in(employee).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyClockedIn));
    }

    #[tokio::test]
    async fn clock_out_without_clock_in_fails() {
        let (lifecycle, _, _, employee) = fixture().await;

        let err = lifecycle.clock_out(employee).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NotClockedIn));
    }

    #[tokio::test]
    async fn clock_out_computes_whole_minutes() {
        let (lifecycle, _, clock, employee) = fixture().await;

        lifecycle.clock_in(employee).await.unwrap();
        clock.set(at(18, 0) + Duration::seconds(59));

        let record = lifecycle.clock_out(employee).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        // 9h span plus 59s truncates to 540 whole minutes.
        assert_eq!(record.working_minutes, 540);
        assert_eq!(record.clock_out_time, Some(at(18, 0) + Duration::seconds(59)));
    }

    #[tokio::test]
    async fn second_clock_out_same_day_fails() {
        let (lifecycle, _, clock, employee) = fixture().await;

        lifecycle.clock_in(employee).await.unwrap();
        clock.advance(Duration::hours(8) + Duration::minutes(30));
        lifecycle.clock_out(employee).await.unwrap();

        let err = lifecycle.clock_out(employee).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyClockedOut));
    }

    #[tokio::test]
    async fn status_without_record_is_synthetic_absent() {
        let (lifecycle, store, _, employee) = fixture().await;

        let status = lifecycle.status(employee).await.unwrap();
        assert_eq!(status.status, AttendanceStatus::Absent);
        assert_eq!(status.record_id, None);
        assert_eq!(status.working_minutes, 0);
        // Nothing was persisted by the status query.
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_employee_is_rejected_everywhere() {
        let (lifecycle, _, _, _) = fixture().await;
        let ghost = EmployeeId::new(404);

        for result in [
            lifecycle.clock_in(ghost).await.map(|_| ()),
            lifecycle.clock_out(ghost).await.map(|_| ()),
            lifecycle.status(ghost).await.map(|_| ()),
        ] {
            assert!(matches!(
                result.unwrap_err(),
                AttendanceError::EmployeeNotFound(id) if id == ghost
            ));
        }
    }

    #[tokio::test]
    async fn clock_in_fills_existing_absent_shell() {
        let (lifecycle, store, _, employee) = fixture().await;

        let shell = store
            .insert(NewAttendanceRecord {
                employee_id: employee,
                date: at(9, 0).date(),
                clock_in_time: None,
                clock_out_time: None,
                working_minutes: 0,
                status: AttendanceStatus::Absent,
            })
            .await
            .unwrap();

        let record = lifecycle.clock_in(employee).await.unwrap();
        assert_eq!(record.id, shell.id);
        assert_eq!(record.status, AttendanceStatus::Partial);
        assert_eq!(record.clock_in_time, Some(at(9, 0)));
        assert_eq!(store.len(), 1);
    }

    /// Store whose reads see no record but whose insert reports the
    /// unique-constraint violation a concurrent clock-in would cause.
    #[derive(Clone, Default)]
    struct RacingStore;

    #[async_trait]
    impl AttendanceRecordStore for RacingStore {
        async fn find_by_id(
            &self,
            _id: crate::domain::models::AttendanceRecordId,
        ) -> Result<Option<AttendanceRecord>, StoreError> {
            Ok(None)
        }

        async fn find_by_employee_and_date(
            &self,
            _employee_id: EmployeeId,
            _date: NaiveDate,
        ) -> Result<Option<AttendanceRecord>, StoreError> {
            Ok(None)
        }

        async fn find_by_employee_and_month(
            &self,
            _employee_id: EmployeeId,
            _month: crate::domain::models::YearMonth,
        ) -> Result<Vec<AttendanceRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_by_employee(
            &self,
            _employee_id: EmployeeId,
        ) -> Result<Vec<AttendanceRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_all_by_month(
            &self,
            _month: crate::domain::models::YearMonth,
        ) -> Result<Vec<AttendanceRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn insert(
            &self,
            record: NewAttendanceRecord,
        ) -> Result<AttendanceRecord, StoreError> {
            Err(StoreError::duplicate(format!(
                "attendance record for employee {} on {}",
                record.employee_id, record.date
            )))
        }

        async fn update(
            &self,
            _record: &AttendanceRecord,
        ) -> Result<AttendanceRecord, StoreError> {
            unreachable!("racing store never holds a record to update")
        }
    }

    #[tokio::test]
    async fn duplicate_insert_translates_to_already_clocked_in() {
        let directory =
            Arc::new(InMemoryEmployeeDirectory::new().with_employee("Sato Aoi", "E-0001").await);
        let clock = Arc::new(FixedClock::at(at(9, 0)));
        let lifecycle = AttendanceLifecycle::new(
            Arc::new(RacingStore),
            directory,
            clock as Arc<dyn Clock>,
        );

        let err = lifecycle.clock_in(EmployeeId::new(1)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyClockedIn));
    }
}
