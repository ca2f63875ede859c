//! Payroll period model.
//!
//! # Invariants
//! - `net_salary == basic_salary + overtime_pay - deductions` exactly,
//!   computed by `Payroll::new` before the row reaches storage.
//! - Every amount has at most two decimal places.
//! - `payroll_id` is `None` until the store assigns it.

use super::{check_currency, require_text, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-generated payroll identifier (`Payroll_ID`).
pub type PayrollId = i64;

/// One pay period for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    pub payroll_id: Option<PayrollId>,
    pub employee_id: String,
    pub pay_period_start_date: NaiveDate,
    pub pay_period_end_date: NaiveDate,
    pub basic_salary: Decimal,
    pub overtime_pay: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
}

impl Payroll {
    /// Builds an unsaved payroll entry and computes its net salary.
    ///
    /// # Errors
    /// - `AmountOverflow` when the net salary is not representable.
    pub fn new(
        employee_id: impl Into<String>,
        pay_period_start_date: NaiveDate,
        pay_period_end_date: NaiveDate,
        basic_salary: Decimal,
        overtime_pay: Decimal,
        deductions: Decimal,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            payroll_id: None,
            employee_id: employee_id.into(),
            pay_period_start_date,
            pay_period_end_date,
            basic_salary,
            overtime_pay,
            deductions,
            net_salary: compute_net_salary(basic_salary, overtime_pay, deductions)?,
        })
    }

    /// Checks period ordering, amount sign, scale and range, and the
    /// net-salary identity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("payroll", "employee_id", &self.employee_id)?;

        if self.pay_period_end_date < self.pay_period_start_date {
            return Err(ValidationError::InvalidPayPeriod {
                start: self.pay_period_start_date,
                end: self.pay_period_end_date,
            });
        }

        for (field, value) in [
            ("basic_salary", self.basic_salary),
            ("overtime_pay", self.overtime_pay),
            ("deductions", self.deductions),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ValidationError::NegativeAmount { field, value });
            }
            check_currency(field, value)?;
        }

        let expected = compute_net_salary(self.basic_salary, self.overtime_pay, self.deductions)?;
        if expected != self.net_salary {
            return Err(ValidationError::NetSalaryMismatch {
                expected,
                actual: self.net_salary,
            });
        }

        Ok(())
    }
}

/// Net salary for one period: basic + overtime - deductions, unrounded.
pub fn compute_net_salary(
    basic_salary: Decimal,
    overtime_pay: Decimal,
    deductions: Decimal,
) -> Result<Decimal, ValidationError> {
    basic_salary
        .checked_add(overtime_pay)
        .and_then(|gross| gross.checked_sub(deductions))
        .ok_or(ValidationError::AmountOverflow("net_salary"))
}
