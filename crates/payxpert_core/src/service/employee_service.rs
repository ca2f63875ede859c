//! Employee use-case service.
//!
//! # Invariants
//! - Missing employees are reported as `None`/`false`, never as errors.
//! - Duplicate ids are not pre-checked; the store's constraint error is
//!   returned unchanged.

use crate::model::employee::Employee;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for employee CRUD operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Point lookup by `Employee_ID`.
    pub fn get_employee_by_id(&self, employee_id: &str) -> RepoResult<Option<Employee>> {
        self.repo.get_employee_by_id(employee_id)
    }

    /// Lists every employee, ordered by id.
    pub fn get_all_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.get_all_employees()
    }

    pub fn add_employee(&self, employee: &Employee) -> RepoResult<()> {
        self.repo.add_employee(employee)?;
        info!("event=employee_add module=service status=ok");
        Ok(())
    }

    /// Overwrites name, email and phone only.
    ///
    /// Returns `false` when no employee matched.
    pub fn update_employee(&self, employee: &Employee) -> RepoResult<bool> {
        let matched = self.repo.update_employee(employee)?;
        info!(
            "event=employee_update module=service status=ok matched={}",
            matched
        );
        Ok(matched)
    }

    /// Deletes by id. Deleting an unknown id is a successful no-op.
    pub fn remove_employee(&self, employee_id: &str) -> RepoResult<bool> {
        let removed = self.repo.remove_employee(employee_id)?;
        info!(
            "event=employee_remove module=service status=ok removed={}",
            removed
        );
        Ok(removed)
    }
}
