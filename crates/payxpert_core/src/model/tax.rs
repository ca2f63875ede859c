//! Tax assessment model.
//!
//! A `Tax` row is a snapshot: it is never recomputed when the payroll rows it
//! was derived from change later.

use super::{require_text, round_currency, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-generated tax identifier (`Tax_ID`).
pub type TaxId = i64;

/// Flat tax rate applied to taxable income (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub tax_id: Option<TaxId>,
    pub employee_id: String,
    pub tax_year: i32,
    pub taxable_income: Decimal,
    pub tax_amount: Decimal,
}

impl Tax {
    /// Builds an unsaved assessment for `taxable_income` at `TAX_RATE`.
    ///
    /// `taxable_income` is kept exactly as summed; only the tax is rounded.
    pub fn assess(employee_id: impl Into<String>, tax_year: i32, taxable_income: Decimal) -> Self {
        Self {
            tax_id: None,
            employee_id: employee_id.into(),
            tax_year,
            taxable_income,
            tax_amount: compute_tax_amount(taxable_income),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("tax", "employee_id", &self.employee_id)
    }
}

/// Tax owed on `taxable_income` at the flat rate, rounded to currency scale.
pub fn compute_tax_amount(taxable_income: Decimal) -> Decimal {
    round_currency(taxable_income * TAX_RATE)
}
