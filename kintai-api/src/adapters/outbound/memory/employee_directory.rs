//! In-memory implementation of the EmployeeDirectory port.

use async_trait::async_trait;
use chrono::Local;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::models::{Employee, EmployeeId, EmployeeRole, NewEmployee};
use crate::domain::ports::outbound::{EmployeeDirectory, StoreError};

/// Employee directory backed by a HashMap, for tests.
#[derive(Clone)]
pub struct InMemoryEmployeeDirectory {
    rows: Arc<RwLock<HashMap<i64, Employee>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Seed an employee with default role and 160 required hours.
    pub async fn with_employee(self, name: &str, number: &str) -> Self {
        self.insert(NewEmployee {
            name: name.to_string(),
            employee_number: number.to_string(),
            required_monthly_hours: 160,
            role: EmployeeRole::Employee,
        })
        .await
        .expect("seed employee");
        self
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.rows.read().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_by_number(
        &self,
        employee_number: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .values()
            .find(|e| e.employee_number == employee_number)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = self.rows.read().unwrap();
        let mut employees: Vec<_> = rows.values().cloned().collect();
        employees.sort_by_key(|e| e.id.as_i64());
        Ok(employees)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.write().unwrap();
        if rows
            .values()
            .any(|e| e.employee_number == employee.employee_number)
        {
            return Err(StoreError::duplicate(format!(
                "employee number {}",
                employee.employee_number
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Local::now().naive_local();
        let persisted = Employee {
            id: EmployeeId::new(id),
            name: employee.name,
            employee_number: employee.employee_number,
            required_monthly_hours: employee.required_monthly_hours,
            role: employee.role,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut rows = self.rows.write().unwrap();
        if !rows.contains_key(&employee.id.as_i64()) {
            return Err(StoreError::not_found(employee.id.to_string()));
        }
        if rows
            .values()
            .any(|e| e.employee_number == employee.employee_number && e.id != employee.id)
        {
            return Err(StoreError::duplicate(format!(
                "employee number {}",
                employee.employee_number
            )));
        }

        let mut updated = employee.clone();
        updated.updated_at = Local::now().naive_local();
        rows.insert(employee.id.as_i64(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap();
        rows.remove(&id.as_i64())
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id.to_string()))
    }
}
