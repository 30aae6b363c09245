//! In-memory implementation of the AttendanceRecordStore port.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::models::{
    AttendanceRecord, AttendanceRecordId, EmployeeId, NewAttendanceRecord, YearMonth,
};
use crate::domain::ports::outbound::{AttendanceRecordStore, StoreError};

/// Attendance store backed by a HashMap, for tests and local experiments.
///
/// Enforces the same (employee, date) uniqueness as the real schema.
#[derive(Clone)]
pub struct InMemoryAttendanceStore {
    rows: Arc<RwLock<HashMap<i64, AttendanceRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().unwrap().is_empty()
    }
}

#[async_trait]
impl AttendanceRecordStore for InMemoryAttendanceStore {
    async fn find_by_id(
        &self,
        id: AttendanceRecordId,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self.rows.read().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned())
    }

    async fn find_by_employee_and_month(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = self.rows.read().unwrap();
        let mut records: Vec<_> = rows
            .values()
            .filter(|r| r.employee_id == employee_id && month.contains(r.date))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = self.rows.read().unwrap();
        let mut records: Vec<_> = rows
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.date));
        Ok(records)
    }

    async fn find_all_by_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = self.rows.read().unwrap();
        let mut records: Vec<_> = rows
            .values()
            .filter(|r| month.contains(r.date))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.employee_id.as_i64(), r.date));
        Ok(records)
    }

    async fn insert(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let mut rows = self.rows.write().unwrap();
        if rows
            .values()
            .any(|r| r.employee_id == record.employee_id && r.date == record.date)
        {
            return Err(StoreError::duplicate(format!(
                "attendance record for employee {} on {}",
                record.employee_id, record.date
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Local::now().naive_local();
        let persisted = AttendanceRecord {
            id: AttendanceRecordId::new(id),
            employee_id: record.employee_id,
            date: record.date,
            clock_in_time: record.clock_in_time,
            clock_out_time: record.clock_out_time,
            working_minutes: record.working_minutes,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let mut rows = self.rows.write().unwrap();
        if !rows.contains_key(&record.id.as_i64()) {
            return Err(StoreError::not_found(record.id.to_string()));
        }

        let mut updated = record.clone();
        updated.updated_at = Local::now().naive_local();
        rows.insert(record.id.as_i64(), updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AttendanceStatus;

    fn new_record(employee_id: i64, date: NaiveDate) -> NewAttendanceRecord {
        NewAttendanceRecord {
            employee_id: EmployeeId::new(employee_id),
            date,
            clock_in_time: None,
            clock_out_time: None,
            working_minutes: 0,
            status: AttendanceStatus::Absent,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = InMemoryAttendanceStore::new();
        let record = store.insert(new_record(1, date(2025, 6, 2))).await.unwrap();

        let by_id = store.find_by_id(record.id).await.unwrap();
        assert_eq!(by_id, Some(record.clone()));

        let by_day = store
            .find_by_employee_and_date(EmployeeId::new(1), date(2025, 6, 2))
            .await
            .unwrap();
        assert_eq!(by_day, Some(record));
    }

    #[tokio::test]
    async fn rejects_second_record_for_same_day() {
        let store = InMemoryAttendanceStore::new();
        store.insert(new_record(1, date(2025, 6, 2))).await.unwrap();

        let err = store
            .insert(new_record(1, date(2025, 6, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Same day, another employee is fine.
        assert!(store.insert(new_record(2, date(2025, 6, 2))).await.is_ok());
    }

    #[tokio::test]
    async fn month_queries_are_half_open() {
        let store = InMemoryAttendanceStore::new();
        store.insert(new_record(1, date(2025, 5, 31))).await.unwrap();
        store.insert(new_record(1, date(2025, 6, 1))).await.unwrap();
        store.insert(new_record(1, date(2025, 6, 30))).await.unwrap();
        store.insert(new_record(1, date(2025, 7, 1))).await.unwrap();

        let june = YearMonth::new(2025, 6).unwrap();
        let records = store
            .find_by_employee_and_month(EmployeeId::new(1), june)
            .await
            .unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2025, 6, 1), date(2025, 6, 30)]);
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let store = InMemoryAttendanceStore::new();
        let record = store.insert(new_record(1, date(2025, 6, 2))).await.unwrap();

        let mut phantom = record;
        phantom.id = AttendanceRecordId::new(999);
        let err = store.update(&phantom).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
