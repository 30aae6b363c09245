//! Employee directory port (outbound).

use async_trait::async_trait;

use super::StoreError;
use crate::domain::models::{Employee, EmployeeId, NewEmployee};

/// Lookup and management of employee master data.
///
/// The attendance core consumes only `find_by_id`/`find_all`; the
/// management operations exist for the admin surface. Implementations
/// enforce employee-number uniqueness via [`StoreError::Duplicate`].
#[async_trait]
pub trait EmployeeDirectory: Send + Sync + 'static {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    async fn find_by_number(&self, employee_number: &str)
        -> Result<Option<Employee>, StoreError>;

    /// All employees, ordered by id.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    async fn update(&self, employee: &Employee) -> Result<Employee, StoreError>;

    async fn delete(&self, id: EmployeeId) -> Result<(), StoreError>;
}
