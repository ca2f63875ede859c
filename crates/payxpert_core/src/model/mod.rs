//! Payroll domain model.
//!
//! # Responsibility
//! - Define typed records for employees, payroll periods, tax assessments and
//!   financial records.
//! - Own the validation rules every persisted record must satisfy.
//!
//! # Invariants
//! - Currency values are `Decimal`, never binary floating point.
//! - Stored currency amounts carry at most `CURRENCY_SCALE` places and stay
//!   within `MAX_CURRENCY_AMOUNT`, so sums never hit `Decimal` overflow.
//! - Only derived tax amounts are rounded; every other figure is exact.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod employee;
pub mod financial_record;
pub mod payroll;
pub mod tax;

/// Number of decimal places kept for computed currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest magnitude accepted for a single currency amount.
pub const MAX_CURRENCY_AMOUNT: Decimal = Decimal::from_parts(276_447_232, 23_283, 0, false, 2);

/// Rounds a currency amount to two places, half away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Invariant violations detected before writes and after reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    InvalidEmail(String),
    TerminationBeforeJoining {
        joining_date: NaiveDate,
        termination_date: NaiveDate,
    },
    InvalidPayPeriod {
        start: NaiveDate,
        end: NaiveDate,
    },
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },
    NetSalaryMismatch {
        expected: Decimal,
        actual: Decimal,
    },
    /// More decimal places than `CURRENCY_SCALE`.
    ExcessScale {
        field: &'static str,
        value: Decimal,
    },
    AmountOutOfRange {
        field: &'static str,
        value: Decimal,
    },
    /// Arithmetic on otherwise valid amounts left the `Decimal` range.
    AmountOverflow(&'static str),
    NilRecordId,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::TerminationBeforeJoining {
                joining_date,
                termination_date,
            } => write!(
                f,
                "termination_date {termination_date} is before joining_date {joining_date}"
            ),
            Self::InvalidPayPeriod { start, end } => {
                write!(f, "pay period end {end} is before start {start}")
            }
            Self::NegativeAmount { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NetSalaryMismatch { expected, actual } => write!(
                f,
                "net_salary {actual} does not match basic + overtime - deductions = {expected}"
            ),
            Self::ExcessScale { field, value } => write!(
                f,
                "{field} {value} has more than {CURRENCY_SCALE} decimal places"
            ),
            Self::AmountOutOfRange { field, value } => write!(
                f,
                "{field} {value} exceeds the limit of {MAX_CURRENCY_AMOUNT}"
            ),
            Self::AmountOverflow(what) => write!(f, "{what} overflowed"),
            Self::NilRecordId => write!(f, "financial record id must not be nil"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Checks scale and magnitude of one currency amount.
pub fn check_currency(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.scale() > CURRENCY_SCALE {
        return Err(ValidationError::ExcessScale { field, value });
    }
    if value.abs() > MAX_CURRENCY_AMOUNT {
        return Err(ValidationError::AmountOutOfRange { field, value });
    }
    Ok(())
}
