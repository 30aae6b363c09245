//! PostgreSQL implementation of the EmployeeDirectory port.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::domain::models::{Employee, EmployeeId, EmployeeRole, NewEmployee};
use crate::domain::ports::outbound::{EmployeeDirectory, StoreError};

pub struct PgEmployeeDirectory {
    pool: PgPool,
}

impl PgEmployeeDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    employee_number: String,
    required_monthly_hours: i32,
    role: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role: EmployeeRole = row
            .role
            .parse()
            .map_err(|e: strum::ParseError| StoreError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Self {
            id: EmployeeId::new(row.id),
            name: row.name,
            employee_number: row.employee_number,
            required_monthly_hours: row.required_monthly_hours,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str =
    "id, name, employee_number, required_monthly_hours, role, created_at, updated_at";

fn map_unique_violation(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate(db_err.to_string())
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl EmployeeDirectory for PgEmployeeDirectory {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_number(
        &self,
        employee_number: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE employee_number = $1"
        ))
        .bind(employee_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "INSERT INTO employees (name, employee_number, required_monthly_hours, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        ))
        .bind(&employee.name)
        .bind(&employee.employee_number)
        .bind(employee.required_monthly_hours)
        .bind(employee.role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Employee::try_from(row)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "UPDATE employees \
             SET name = $1, employee_number = $2, required_monthly_hours = $3, role = $4, \
                 updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        ))
        .bind(&employee.name)
        .bind(&employee.employee_number)
        .bind(employee.required_monthly_hours)
        .bind(employee.role.to_string())
        .bind(employee.id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.map(Employee::try_from)
            .transpose()?
            .ok_or_else(|| StoreError::not_found(employee.id.to_string()))
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}
