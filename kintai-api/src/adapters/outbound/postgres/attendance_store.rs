//! PostgreSQL implementation of the AttendanceRecordStore port.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;

use crate::domain::models::{
    AttendanceRecord, AttendanceRecordId, AttendanceStatus, EmployeeId, NewAttendanceRecord,
    YearMonth,
};
use crate::domain::ports::outbound::{AttendanceRecordStore, StoreError};

pub struct PgAttendanceRecordStore {
    pool: PgPool,
}

impl PgAttendanceRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRecordRow {
    id: i64,
    employee_id: i64,
    date: NaiveDate,
    clock_in_time: Option<NaiveDateTime>,
    clock_out_time: Option<NaiveDateTime>,
    working_minutes: i64,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<AttendanceRecordRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRecordRow) -> Result<Self, Self::Error> {
        let status: AttendanceStatus = row
            .status
            .parse()
            .map_err(|e: strum::ParseError| StoreError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Self {
            id: AttendanceRecordId::new(row.id),
            employee_id: EmployeeId::new(row.employee_id),
            date: row.date,
            clock_in_time: row.clock_in_time,
            clock_out_time: row.clock_out_time,
            working_minutes: row.working_minutes,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, employee_id, date, clock_in_time, clock_out_time, \
                       working_minutes, status, created_at, updated_at";

fn into_records(rows: Vec<AttendanceRecordRow>) -> Result<Vec<AttendanceRecord>, StoreError> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

/// Unique-violation aware error translation for the (employee, date) index.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate(db_err.to_string())
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl AttendanceRecordStore for PgAttendanceRecordStore {
    async fn find_by_id(
        &self,
        id: AttendanceRecordId,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "SELECT {COLUMNS} FROM attendance_records WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "SELECT {COLUMNS} FROM attendance_records WHERE employee_id = $1 AND date = $2"
        ))
        .bind(employee_id.as_i64())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn find_by_employee_and_month(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "SELECT {COLUMNS} FROM attendance_records \
             WHERE employee_id = $1 AND date >= $2 AND date < $3 \
             ORDER BY date"
        ))
        .bind(employee_id.as_i64())
        .bind(month.first_day())
        .bind(month.next().first_day())
        .fetch_all(&self.pool)
        .await?;

        into_records(rows)
    }

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "SELECT {COLUMNS} FROM attendance_records \
             WHERE employee_id = $1 \
             ORDER BY date DESC"
        ))
        .bind(employee_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        into_records(rows)
    }

    async fn find_all_by_month(
        &self,
        month: YearMonth,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "SELECT {COLUMNS} FROM attendance_records \
             WHERE date >= $1 AND date < $2 \
             ORDER BY employee_id, date"
        ))
        .bind(month.first_day())
        .bind(month.next().first_day())
        .fetch_all(&self.pool)
        .await?;

        into_records(rows)
    }

    async fn insert(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "INSERT INTO attendance_records \
             (employee_id, date, clock_in_time, clock_out_time, working_minutes, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(record.employee_id.as_i64())
        .bind(record.date)
        .bind(record.clock_in_time)
        .bind(record.clock_out_time)
        .bind(record.working_minutes)
        .bind(record.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        AttendanceRecord::try_from(row)
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRecordRow>(&format!(
            "UPDATE attendance_records \
             SET clock_in_time = $1, clock_out_time = $2, working_minutes = $3, \
                 status = $4, updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        ))
        .bind(record.clock_in_time)
        .bind(record.clock_out_time)
        .bind(record.working_minutes)
        .bind(record.status.to_string())
        .bind(record.id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRecord::try_from)
            .transpose()?
            .ok_or_else(|| StoreError::not_found(record.id.to_string()))
    }
}
