//! Financial history model.
//!
//! # Invariants
//! - `record_id` is a non-nil UUID generated at construction.
//! - `record_type` is persisted as snake_case text.

use super::{check_currency, require_text, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable financial record identifier (`Record_ID`).
pub type RecordId = Uuid;

/// Category of a financial history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Income,
    Expense,
    TaxPayment,
    Other,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::TaxPayment => "tax_payment",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "tax_payment" | "tax payment" | "tax" => Some(Self::TaxPayment),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub record_id: RecordId,
    pub employee_id: String,
    pub record_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub record_type: RecordType,
}

impl FinancialRecord {
    /// Creates a record with a generated id.
    pub fn new(
        employee_id: impl Into<String>,
        record_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        record_type: RecordType,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            record_date,
            description: description.into(),
            amount,
            record_type,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.record_id.is_nil() {
            return Err(ValidationError::NilRecordId);
        }
        require_text("financial_record", "employee_id", &self.employee_id)?;
        require_text("financial_record", "description", &self.description)?;
        check_currency("amount", self.amount)
    }
}
