use std::sync::Arc;

use crate::domain::{
    models::{Employee, EmployeeId, EmployeeRole, NewEmployee},
    ports::outbound::{EmployeeDirectory, StoreError},
    AttendanceError,
};

const REQUIRED_HOURS_MIN: i32 = 140;
const REQUIRED_HOURS_MAX: i32 = 180;

/// Fields accepted when registering or updating an employee.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub employee_number: String,
    pub required_monthly_hours: i32,
    pub role: EmployeeRole,
}

/// Management of employee master data: listing, registration, update,
/// removal. Enforces the contractual 140-180 required-hours policy and
/// employee-number uniqueness.
pub struct EmployeeAdmin<D> {
    employees: Arc<D>,
}

impl<D> EmployeeAdmin<D>
where
    D: EmployeeDirectory,
{
    pub fn new(employees: Arc<D>) -> Self {
        Self { employees }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AttendanceError> {
        Ok(self.employees.find_all().await?)
    }

    pub async fn get(&self, id: EmployeeId) -> Result<Employee, AttendanceError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound(id))
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, AttendanceError> {
        Self::validate(&input)?;

        if self
            .employees
            .find_by_number(&input.employee_number)
            .await?
            .is_some()
        {
            return Err(AttendanceError::EmployeeNumberDuplicate(
                input.employee_number,
            ));
        }

        let insert = self
            .employees
            .insert(NewEmployee {
                name: input.name,
                employee_number: input.employee_number.clone(),
                required_monthly_hours: input.required_monthly_hours,
                role: input.role,
            })
            .await;

        match insert {
            Ok(employee) => Ok(employee),
            // Lost a race against a concurrent registration of the number.
            Err(StoreError::Duplicate(_)) => Err(AttendanceError::EmployeeNumberDuplicate(
                input.employee_number,
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Employee, AttendanceError> {
        let mut employee = self.get(id).await?;

        Self::validate(&input)?;

        // The number may collide with anyone but the employee being updated.
        if let Some(other) = self.employees.find_by_number(&input.employee_number).await? {
            if other.id != id {
                return Err(AttendanceError::EmployeeNumberDuplicate(
                    input.employee_number,
                ));
            }
        }

        employee.name = input.name;
        employee.employee_number = input.employee_number;
        employee.required_monthly_hours = input.required_monthly_hours;
        employee.role = input.role;

        Ok(self.employees.update(&employee).await?)
    }

    pub async fn delete(&self, id: EmployeeId) -> Result<(), AttendanceError> {
        self.get(id).await?;
        Ok(self.employees.delete(id).await?)
    }

    fn validate(input: &EmployeeInput) -> Result<(), AttendanceError> {
        if input.name.trim().is_empty() {
            return Err(AttendanceError::Validation(
                "employee name must not be blank".to_string(),
            ));
        }
        if input.employee_number.trim().is_empty() {
            return Err(AttendanceError::Validation(
                "employee number must not be blank".to_string(),
            ));
        }
        if !(REQUIRED_HOURS_MIN..=REQUIRED_HOURS_MAX).contains(&input.required_monthly_hours) {
            return Err(AttendanceError::InvalidRequiredHours(
                input.required_monthly_hours,
            ));
        }
        Ok(())
    }
}
