use chrono::NaiveDate;
use payxpert_core::db::open_db_in_memory;
use payxpert_core::{
    Employee, EmployeeRepository, Payroll, PayrollRepository, PayrollService, RepoError,
    SqliteEmployeeRepository, SqlitePayrollRepository, ValidationError, MAX_CURRENCY_AMOUNT,
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn seed_employee(conn: &Connection, id: &str) {
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();
    repo.add_employee(&Employee {
        employee_id: id.to_string(),
        first_name: "Ravi".to_string(),
        last_name: "Kumar".to_string(),
        date_of_birth: date(1988, 2, 3),
        gender: "M".to_string(),
        email: "ravi@example.com".to_string(),
        phone_number: "555-0111".to_string(),
        address: "4 Park Ave".to_string(),
        position: "Engineer".to_string(),
        joining_date: date(2019, 7, 1),
        termination_date: None,
    })
    .unwrap();
}

fn monthly(employee_id: &str, month: u32, basic: &str, overtime: &str, deductions: &str) -> Payroll {
    Payroll::new(
        employee_id,
        date(2024, month, 1),
        date(2024, month, 28),
        dec(basic),
        dec(overtime),
        dec(deductions),
    )
    .unwrap()
}

#[test]
fn generate_payroll_stores_exact_net_salary() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let payroll = monthly("E1", 1, "5000.00", "200.00", "150.00");
    assert_eq!(payroll.net_salary, dec("5050.00"));
    let payroll_id = repo.generate_payroll(&payroll).unwrap();

    let loaded = repo.get_payroll_by_id(payroll_id).unwrap().unwrap();
    assert_eq!(loaded.payroll_id, Some(payroll_id));
    assert_eq!(loaded.net_salary, dec("5050.00"));
    assert_eq!(loaded.net_salary.to_string(), "5050.00");

    let stored: String = conn
        .query_row(
            "SELECT Net_Salary FROM payroll WHERE Payroll_ID = ?1;",
            [payroll_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "5050.00");
}

#[test]
fn store_assigns_increasing_payroll_ids() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let first = repo
        .generate_payroll(&monthly("E1", 1, "100.00", "0.00", "0.00"))
        .unwrap();
    let second = repo
        .generate_payroll(&monthly("E1", 2, "100.00", "0.00", "0.00"))
        .unwrap();
    assert!(second > first);
}

#[test]
fn payrolls_for_employee_filters_by_employee() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    seed_employee(&conn, "E2");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    repo.generate_payroll(&monthly("E1", 1, "1000.00", "0.00", "0.00"))
        .unwrap();
    repo.generate_payroll(&monthly("E2", 1, "2000.00", "0.00", "0.00"))
        .unwrap();
    repo.generate_payroll(&monthly("E1", 2, "1100.00", "0.00", "0.00"))
        .unwrap();

    let rows = repo.get_payrolls_for_employee("E1").unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.employee_id == "E1"));
    assert!(repo.get_payrolls_for_employee("nobody").unwrap().is_empty());
}

#[test]
fn get_unknown_payroll_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    assert!(repo.get_payroll_by_id(404).unwrap().is_none());
}

#[test]
fn payrolls_for_period_matches_start_dates_inclusively() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    for month in 1..=4 {
        repo.generate_payroll(&monthly("E1", month, "1000.00", "0.00", "0.00"))
            .unwrap();
    }

    let rows = repo
        .get_payrolls_for_period(date(2024, 2, 1), date(2024, 3, 1))
        .unwrap();
    let starts: Vec<NaiveDate> = rows.iter().map(|row| row.pay_period_start_date).collect();
    assert_eq!(starts, vec![date(2024, 2, 1), date(2024, 3, 1)]);

    assert!(repo
        .get_payrolls_for_period(date(2024, 3, 1), date(2024, 2, 1))
        .unwrap()
        .is_empty());
}

#[test]
fn payroll_for_unknown_employee_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let err = repo
        .generate_payroll(&monthly("ghost", 1, "1000.00", "0.00", "0.00"))
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn inconsistent_net_salary_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let mut payroll = monthly("E1", 1, "5000.00", "200.00", "150.00");
    payroll.net_salary = dec("5000.00");
    let err = repo.generate_payroll(&payroll).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NetSalaryMismatch { .. })
    ));

    let mut reversed = monthly("E1", 1, "5000.00", "0.00", "0.00");
    reversed.pay_period_end_date = date(2023, 12, 1);
    let err = repo.generate_payroll(&reversed).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidPayPeriod { .. })
    ));

    assert!(repo.get_payrolls_for_employee("E1").unwrap().is_empty());
}

#[test]
fn corrupted_amount_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();
    let payroll_id = repo
        .generate_payroll(&monthly("E1", 1, "1000.00", "0.00", "0.00"))
        .unwrap();

    conn.execute(
        "UPDATE payroll SET Basic_Salary = 'lots' WHERE Payroll_ID = ?1;",
        [payroll_id],
    )
    .unwrap();

    let err = repo.get_payroll_by_id(payroll_id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn taxable_income_sums_net_amounts_and_defaults_to_zero() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    assert_eq!(repo.taxable_income_for_employee("E1").unwrap(), Decimal::ZERO);

    repo.generate_payroll(&monthly("E1", 1, "0.10", "0.20", "0.00"))
        .unwrap();
    repo.generate_payroll(&monthly("E1", 2, "0.10", "0.00", "0.00"))
        .unwrap();
    assert_eq!(repo.taxable_income_for_employee("E1").unwrap(), dec("0.40"));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let service = PayrollService::new(SqlitePayrollRepository::try_new(&conn).unwrap());

    let payroll_id = service
        .generate_payroll(&monthly("E1", 5, "3000.00", "0.00", "100.00"))
        .unwrap();
    let fetched = service.get_payroll_by_id(payroll_id).unwrap().unwrap();
    assert_eq!(fetched.net_salary, dec("2900.00"));
    assert_eq!(service.get_payrolls_for_employee("E1").unwrap().len(), 1);
    assert_eq!(
        service
            .get_payrolls_for_period(date(2024, 5, 1), date(2024, 5, 31))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn amounts_at_the_upper_limit_are_stored_exactly() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let payroll = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 31),
        MAX_CURRENCY_AMOUNT,
        MAX_CURRENCY_AMOUNT,
        Decimal::ZERO,
    )
    .unwrap();
    let payroll_id = repo.generate_payroll(&payroll).unwrap();

    let loaded = repo.get_payroll_by_id(payroll_id).unwrap().unwrap();
    assert_eq!(loaded.net_salary, dec("2000000000000.00"));
    assert_eq!(
        repo.taxable_income_for_employee("E1").unwrap(),
        dec("2000000000000.00")
    );
}

#[test]
fn sub_cent_amounts_are_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();

    let payroll = monthly("E1", 1, "0.005", "0.00", "0.00");
    assert_eq!(payroll.net_salary, dec("0.005"));
    let err = repo.generate_payroll(&payroll).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::ExcessScale {
            field: "basic_salary",
            ..
        })
    ));

    let oversized = monthly("E1", 1, "1000000000000.01", "0.00", "0.00");
    let err = repo.generate_payroll(&oversized).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::AmountOutOfRange { .. })
    ));

    assert!(repo.get_payrolls_for_employee("E1").unwrap().is_empty());
}

#[test]
fn net_salary_overflow_is_an_error() {
    let err = Payroll::new(
        "E1",
        date(2024, 1, 1),
        date(2024, 1, 31),
        Decimal::MAX,
        Decimal::ONE,
        Decimal::ZERO,
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::AmountOverflow("net_salary"));
}

#[test]
fn taxable_income_over_unbounded_rows_fails_without_panicking() {
    let conn = open_db_in_memory().unwrap();
    seed_employee(&conn, "E1");
    for month in ["2024-01-01", "2024-02-01"] {
        conn.execute(
            "INSERT INTO payroll (
                Employee_ID, Payperiod_Start_Date, Payperiod_End_Date,
                Basic_Salary, Overtime_Pay, Deductions, Net_Salary
            ) VALUES ('E1', ?1, ?1, ?2, '0', '0', ?2);",
            [month, Decimal::MAX.to_string().as_str()],
        )
        .unwrap();
    }

    let repo = SqlitePayrollRepository::try_new(&conn).unwrap();
    let err = repo.taxable_income_for_employee("E1").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::AmountOutOfRange { .. })
    ));
}
