use chrono::NaiveDate;
use payxpert_core::{
    compute_net_salary, round_currency, ContactUpdate, Employee, FinancialRecord, Payroll,
    RecordType, Tax, ValidationError,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn sample_employee() -> Employee {
    Employee {
        employee_id: "E1".to_string(),
        first_name: "Tara".to_string(),
        last_name: "Menon".to_string(),
        date_of_birth: date(1991, 4, 12),
        gender: "F".to_string(),
        email: "tara@example.com".to_string(),
        phone_number: "555-0155".to_string(),
        address: "3 Bay St".to_string(),
        position: "Lead".to_string(),
        joining_date: date(2018, 10, 1),
        termination_date: Some(date(2024, 3, 31)),
    }
}

#[test]
fn employee_validation_accepts_sample() {
    assert_eq!(sample_employee().validate(), Ok(()));
}

#[test]
fn employee_validation_rejects_blank_id_and_bad_email() {
    let mut employee = sample_employee();
    employee.employee_id = "".to_string();
    assert_eq!(
        employee.validate(),
        Err(ValidationError::BlankField {
            entity: "employee",
            field: "employee_id",
        })
    );

    let mut employee = sample_employee();
    employee.email = "tara@".to_string();
    assert_eq!(
        employee.validate(),
        Err(ValidationError::InvalidEmail("tara@".to_string()))
    );
}

#[test]
fn employment_window_is_inclusive() {
    let employee = sample_employee();
    assert!(employee.is_employed_on(date(2018, 10, 1)));
    assert!(employee.is_employed_on(date(2024, 3, 31)));
    assert!(!employee.is_employed_on(date(2024, 4, 1)));
    assert!(!employee.is_employed_on(date(2018, 9, 30)));
}

#[test]
fn contact_update_touches_only_named_fields() {
    let mut employee = sample_employee();
    employee.apply_contact_update(ContactUpdate {
        last_name: Some("Nair".to_string()),
        phone_number: Some("555-0999".to_string()),
        ..ContactUpdate::default()
    });

    assert_eq!(employee.full_name(), "Tara Nair");
    assert_eq!(employee.phone_number, "555-0999");
    assert_eq!(employee.email, "tara@example.com");
    assert_eq!(employee.position, "Lead");
}

#[test]
fn net_salary_is_exact_decimal_arithmetic() {
    assert_eq!(
        compute_net_salary(dec("5000.00"), dec("200.00"), dec("150.00")).unwrap(),
        dec("5050.00")
    );
    assert_eq!(
        compute_net_salary(dec("0.10"), dec("0.20"), Decimal::ZERO).unwrap(),
        dec("0.30")
    );
    assert_eq!(round_currency(dec("2.345")), dec("2.35"));
}

#[test]
fn payroll_validation_rejects_negative_amounts() {
    let payroll = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 31),
        dec("100.00"),
        dec("-5.00"),
        Decimal::ZERO,
    )
    .unwrap();
    assert_eq!(
        payroll.validate(),
        Err(ValidationError::NegativeAmount {
            field: "overtime_pay",
            value: dec("-5.00"),
        })
    );
}

#[test]
fn single_day_pay_period_is_valid() {
    let payroll = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 1),
        dec("100.00"),
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .unwrap();
    assert_eq!(payroll.validate(), Ok(()));
}

#[test]
fn deductions_may_exceed_earnings() {
    let payroll = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 31),
        dec("100.00"),
        Decimal::ZERO,
        dec("150.00"),
    )
    .unwrap();
    assert_eq!(payroll.net_salary, dec("-50.00"));
    assert_eq!(payroll.validate(), Ok(()));
}

#[test]
fn tax_assessment_rounds_to_cents() {
    let tax = Tax::assess("E1", 2024, dec("333.33"));
    assert_eq!(tax.tax_id, None);
    assert_eq!(tax.tax_amount, dec("33.33"));
}

#[test]
fn financial_record_gets_fresh_id() {
    let first = FinancialRecord::new("E1", date(2024, 1, 1), "Bonus", dec("1.00"), RecordType::Income);
    let second = FinancialRecord::new("E1", date(2024, 1, 1), "Bonus", dec("1.00"), RecordType::Income);
    assert_ne!(first.record_id, second.record_id);
    assert_eq!(first.validate(), Ok(()));
}

#[test]
fn record_type_text_roundtrip() {
    for record_type in [
        RecordType::Income,
        RecordType::Expense,
        RecordType::TaxPayment,
        RecordType::Other,
    ] {
        assert_eq!(RecordType::parse(record_type.as_str()), Some(record_type));
    }
    assert_eq!(RecordType::parse(" Tax Payment "), Some(RecordType::TaxPayment));
    assert_eq!(RecordType::parse("gift"), None);
}

#[test]
fn payroll_serializes_amounts_as_strings() {
    let payroll = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 31),
        dec("5000.00"),
        dec("200.00"),
        dec("150.00"),
    )
    .unwrap();
    let value = serde_json::to_value(&payroll).unwrap();
    assert_eq!(value["net_salary"], json!("5050.00"));
    assert_eq!(value["pay_period_start_date"], json!("2024-01-01"));
    assert_eq!(value["payroll_id"], json!(null));
}

#[test]
fn employee_json_roundtrip() {
    let employee = sample_employee();
    let encoded = serde_json::to_string(&employee).unwrap();
    let decoded: Employee = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, employee);
}

#[test]
fn record_type_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(RecordType::TaxPayment).unwrap(),
        json!("tax_payment")
    );
}
