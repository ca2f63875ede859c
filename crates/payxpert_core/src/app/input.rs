//! Operator input parsing.
//!
//! Every value typed at the menu passes through one of these helpers before a
//! service is called, so a malformed value aborts the command with no writes.

use super::{AppError, AppResult};
use crate::model::financial_record::{RecordId, RecordType};
use crate::model::{check_currency, ValidationError, CURRENCY_SCALE, MAX_CURRENCY_AMOUNT};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_TAX_YEAR: i32 = 1900;
const MAX_TAX_YEAR: i32 = 9999;

fn invalid(field: &'static str, value: &str, reason: impl Into<String>) -> AppError {
    AppError::InvalidInput {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Trims `raw` and rejects blank input.
pub fn parse_required(field: &'static str, raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, raw, "value is required"));
    }
    Ok(trimmed.to_string())
}

/// Trims `raw`; blank input becomes `None`.
pub fn parse_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, raw: &str) -> AppResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| invalid(field, trimmed, "expected a date in YYYY-MM-DD format"))
}

/// Like `parse_date`, but blank input is `None`.
pub fn parse_optional_date(field: &'static str, raw: &str) -> AppResult<Option<NaiveDate>> {
    match parse_optional(raw) {
        Some(value) => parse_date(field, &value).map(Some),
        None => Ok(None),
    }
}

/// Parses a non-negative currency amount with at most two decimal places.
pub fn parse_amount(field: &'static str, raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| invalid(field, trimmed, "expected a decimal amount such as 5000.00"))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(field, trimmed, "amount must not be negative"));
    }
    match check_currency(field, value) {
        Ok(()) => Ok(value),
        Err(ValidationError::ExcessScale { .. }) => Err(invalid(
            field,
            trimmed,
            format!("at most {CURRENCY_SCALE} decimal places are allowed"),
        )),
        Err(_) => Err(invalid(
            field,
            trimmed,
            format!("amount must not exceed {MAX_CURRENCY_AMOUNT}"),
        )),
    }
}

/// Parses a four-digit tax year.
pub fn parse_tax_year(raw: &str) -> AppResult<i32> {
    let trimmed = raw.trim();
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| invalid("tax_year", trimmed, "expected a year such as 2024"))?;
    if !(MIN_TAX_YEAR..=MAX_TAX_YEAR).contains(&year) {
        return Err(invalid(
            "tax_year",
            trimmed,
            format!("year must be between {MIN_TAX_YEAR} and {MAX_TAX_YEAR}"),
        ));
    }
    Ok(year)
}

/// Parses a positive store-generated id (`Payroll_ID`, `Tax_ID`).
pub fn parse_id(field: &'static str, raw: &str) -> AppResult<i64> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid(field, trimmed, "expected a positive whole number")),
    }
}

pub fn parse_record_id(raw: &str) -> AppResult<RecordId> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| invalid("record_id", trimmed, "expected a UUID"))
}

pub fn parse_record_type(raw: &str) -> AppResult<RecordType> {
    RecordType::parse(raw).ok_or_else(|| {
        invalid(
            "record_type",
            raw.trim(),
            "expected income|expense|tax_payment|other",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppError;

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date("joining_date", " 2024-03-01 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        let err = parse_date("joining_date", "01/03/2024").unwrap_err();
        match err {
            AppError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "joining_date");
                assert_eq!(value, "01/03/2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_optional_date_treats_blank_as_none() {
        assert_eq!(parse_optional_date("termination_date", "  ").unwrap(), None);
        assert!(parse_optional_date("termination_date", "2024-13-01").is_err());
    }

    #[test]
    fn parse_amount_keeps_decimal_scale() {
        let amount = parse_amount("basic_salary", "5000.00").unwrap();
        assert_eq!(amount.to_string(), "5000.00");
    }

    #[test]
    fn parse_amount_rejects_negative_and_garbage() {
        assert!(parse_amount("deductions", "-1").is_err());
        assert!(parse_amount("deductions", "abc").is_err());
        assert!(parse_amount("deductions", "").is_err());
    }

    #[test]
    fn parse_amount_accepts_the_upper_limit() {
        assert_eq!(
            parse_amount("basic_salary", "1000000000000.00").unwrap(),
            MAX_CURRENCY_AMOUNT
        );
    }

    #[test]
    fn parse_amount_rejects_sub_cent_and_oversized_values() {
        for raw in ["0.005", "1000000000000.01", "79228162514264337593543950335"] {
            match parse_amount("basic_salary", raw).unwrap_err() {
                AppError::InvalidInput { field, value, .. } => {
                    assert_eq!(field, "basic_salary");
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn parse_tax_year_enforces_range() {
        assert_eq!(parse_tax_year("2024").unwrap(), 2024);
        assert!(parse_tax_year("24").is_err());
        assert!(parse_tax_year("twenty").is_err());
    }

    #[test]
    fn parse_id_requires_positive_numbers() {
        assert_eq!(parse_id("payroll_id", "7").unwrap(), 7);
        assert!(parse_id("payroll_id", "0").is_err());
        assert!(parse_id("payroll_id", "x").is_err());
    }

    #[test]
    fn parse_record_type_accepts_aliases() {
        assert_eq!(parse_record_type("Income").unwrap(), RecordType::Income);
        assert_eq!(parse_record_type("tax").unwrap(), RecordType::TaxPayment);
        assert!(parse_record_type("bonus").is_err());
    }

    #[test]
    fn parse_required_rejects_blank() {
        assert_eq!(parse_required("employee_id", " E1 ").unwrap(), "E1");
        assert!(parse_required("employee_id", "   ").is_err());
    }
}
