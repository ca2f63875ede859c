//! Payroll use-case service.

use crate::model::payroll::{Payroll, PayrollId};
use crate::repo::payroll_repo::PayrollRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;

/// Use-case service wrapper for payroll periods.
pub struct PayrollService<R: PayrollRepository> {
    repo: R,
}

impl<R: PayrollRepository> PayrollService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists one payroll period.
    ///
    /// # Contract
    /// - `payroll.net_salary` must already equal basic + overtime - deductions
    ///   (use `Payroll::new`).
    /// - Returns the store-assigned payroll id.
    pub fn generate_payroll(&self, payroll: &Payroll) -> RepoResult<PayrollId> {
        let payroll_id = self.repo.generate_payroll(payroll)?;
        info!(
            "event=payroll_generate module=service status=ok payroll_id={}",
            payroll_id
        );
        Ok(payroll_id)
    }

    pub fn get_payroll_by_id(&self, payroll_id: PayrollId) -> RepoResult<Option<Payroll>> {
        self.repo.get_payroll_by_id(payroll_id)
    }

    pub fn get_payrolls_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Payroll>> {
        self.repo.get_payrolls_for_employee(employee_id)
    }

    /// Payrolls whose period starts within `[start_date, end_date]`.
    pub fn get_payrolls_for_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Payroll>> {
        self.repo.get_payrolls_for_period(start_date, end_date)
    }
}
