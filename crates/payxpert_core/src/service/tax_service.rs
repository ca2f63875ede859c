//! Tax use-case service.
//!
//! # Responsibility
//! - Derive taxable income from an employee's payroll rows.
//! - Persist a flat-rate tax assessment snapshot.
//!
//! # Invariants
//! - `calculate_tax` is not idempotent: every call inserts a new row.
//! - Taxable income of an employee without payroll rows is zero.

use crate::model::tax::{Tax, TaxId};
use crate::repo::payroll_repo::PayrollRepository;
use crate::repo::tax_repo::TaxRepository;
use crate::repo::RepoResult;
use log::{error, info};
use std::time::Instant;

/// Use-case service for tax assessments.
pub struct TaxService<T: TaxRepository, P: PayrollRepository> {
    taxes: T,
    payrolls: P,
}

impl<T: TaxRepository, P: PayrollRepository> TaxService<T, P> {
    pub fn new(taxes: T, payrolls: P) -> Self {
        Self { taxes, payrolls }
    }

    /// Computes and stores the tax for `employee_id` in `tax_year`.
    ///
    /// Returns the stored row including its generated `tax_id`.
    pub fn calculate_tax(&self, employee_id: &str, tax_year: i32) -> RepoResult<Tax> {
        let started_at = Instant::now();
        let result = self.assess_and_store(employee_id, tax_year);
        match &result {
            Ok(tax) => info!(
                "event=tax_calculate module=service status=ok tax_year={} duration_ms={}",
                tax.tax_year,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=tax_calculate module=service status=error tax_year={} duration_ms={} error={}",
                tax_year,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    pub fn get_taxes_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Tax>> {
        self.taxes.get_taxes_for_employee(employee_id)
    }

    pub fn get_tax_by_id(&self, tax_id: TaxId) -> RepoResult<Option<Tax>> {
        self.taxes.get_tax_by_id(tax_id)
    }

    pub fn get_taxes_for_year(&self, tax_year: i32) -> RepoResult<Vec<Tax>> {
        self.taxes.get_taxes_for_year(tax_year)
    }

    fn assess_and_store(&self, employee_id: &str, tax_year: i32) -> RepoResult<Tax> {
        let taxable_income = self.payrolls.taxable_income_for_employee(employee_id)?;
        let mut tax = Tax::assess(employee_id, tax_year, taxable_income);
        tax.tax_id = Some(self.taxes.create_tax(&tax)?);
        Ok(tax)
    }
}
