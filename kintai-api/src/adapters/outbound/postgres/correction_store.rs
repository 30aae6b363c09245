//! PostgreSQL implementation of the CorrectionRequestStore port.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::domain::models::{
    AttendanceRecordId, CorrectionRequest, CorrectionRequestId, CorrectionStatus, EmployeeId,
    NewCorrectionRequest,
};
use crate::domain::ports::outbound::{CorrectionRequestStore, StoreError};

pub struct PgCorrectionRequestStore {
    pool: PgPool,
}

impl PgCorrectionRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CorrectionRequestRow {
    id: i64,
    employee_id: i64,
    record_id: i64,
    requested_clock_in: Option<NaiveDateTime>,
    requested_clock_out: Option<NaiveDateTime>,
    reason: String,
    status: String,
    request_date: NaiveDateTime,
    processed_date: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<CorrectionRequestRow> for CorrectionRequest {
    type Error = StoreError;

    fn try_from(row: CorrectionRequestRow) -> Result<Self, Self::Error> {
        let status: CorrectionStatus = row
            .status
            .parse()
            .map_err(|e: strum::ParseError| StoreError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Self {
            id: CorrectionRequestId::new(row.id),
            employee_id: EmployeeId::new(row.employee_id),
            record_id: AttendanceRecordId::new(row.record_id),
            requested_clock_in: row.requested_clock_in,
            requested_clock_out: row.requested_clock_out,
            reason: row.reason,
            status,
            request_date: row.request_date,
            processed_date: row.processed_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, employee_id, record_id, requested_clock_in, requested_clock_out, \
                       reason, status, request_date, processed_date, created_at, updated_at";

fn into_requests(rows: Vec<CorrectionRequestRow>) -> Result<Vec<CorrectionRequest>, StoreError> {
    rows.into_iter().map(CorrectionRequest::try_from).collect()
}

#[async_trait]
impl CorrectionRequestStore for PgCorrectionRequestStore {
    async fn find_by_id(
        &self,
        id: CorrectionRequestId,
    ) -> Result<Option<CorrectionRequest>, StoreError> {
        let row = sqlx::query_as::<_, CorrectionRequestRow>(&format!(
            "SELECT {COLUMNS} FROM correction_requests WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CorrectionRequest::try_from).transpose()
    }

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CorrectionRequest>, StoreError> {
        let rows = sqlx::query_as::<_, CorrectionRequestRow>(&format!(
            "SELECT {COLUMNS} FROM correction_requests \
             WHERE employee_id = $1 \
             ORDER BY request_date DESC, id DESC"
        ))
        .bind(employee_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        into_requests(rows)
    }

    async fn find_by_status(
        &self,
        status: CorrectionStatus,
    ) -> Result<Vec<CorrectionRequest>, StoreError> {
        let rows = sqlx::query_as::<_, CorrectionRequestRow>(&format!(
            "SELECT {COLUMNS} FROM correction_requests \
             WHERE status = $1 \
             ORDER BY request_date DESC, id DESC"
        ))
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await?;

        into_requests(rows)
    }

    async fn insert(
        &self,
        request: NewCorrectionRequest,
    ) -> Result<CorrectionRequest, StoreError> {
        let row = sqlx::query_as::<_, CorrectionRequestRow>(&format!(
            "INSERT INTO correction_requests \
             (employee_id, record_id, requested_clock_in, requested_clock_out, reason, \
              status, request_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(request.employee_id.as_i64())
        .bind(request.record_id.as_i64())
        .bind(request.requested_clock_in)
        .bind(request.requested_clock_out)
        .bind(&request.reason)
        .bind(CorrectionStatus::Pending.to_string())
        .bind(request.request_date)
        .fetch_one(&self.pool)
        .await?;

        CorrectionRequest::try_from(row)
    }

    async fn update(&self, request: &CorrectionRequest) -> Result<CorrectionRequest, StoreError> {
        let row = sqlx::query_as::<_, CorrectionRequestRow>(&format!(
            "UPDATE correction_requests \
             SET reason = $1, status = $2, processed_date = $3, updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        ))
        .bind(&request.reason)
        .bind(request.status.to_string())
        .bind(request.processed_date)
        .bind(request.id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CorrectionRequest::try_from)
            .transpose()?
            .ok_or_else(|| StoreError::not_found(request.id.to_string()))
    }
}
