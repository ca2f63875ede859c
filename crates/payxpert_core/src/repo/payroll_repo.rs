//! Payroll repository contract and SQLite implementation.
//!
//! # Invariants
//! - Payroll rows are append-only; no update or delete path exists.
//! - `Net_Salary` is written as computed by the caller and re-checked on read.
//! - Period queries match on `Payperiod_Start_Date` within `[start, end]`.

use super::{decimal_to_db, ensure_connection_ready, parse_decimal_column, RepoError, RepoResult};
use crate::model::check_currency;
use crate::model::payroll::{compute_net_salary, Payroll, PayrollId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use rust_decimal::Decimal;

const PAYROLL_COLUMNS: &[&str] = &[
    "Payroll_ID",
    "Employee_ID",
    "Payperiod_Start_Date",
    "Payperiod_End_Date",
    "Basic_Salary",
    "Overtime_Pay",
    "Deductions",
    "Net_Salary",
];

const PAYROLL_SELECT_SQL: &str = "SELECT
    Payroll_ID,
    Employee_ID,
    Payperiod_Start_Date,
    Payperiod_End_Date,
    Basic_Salary,
    Overtime_Pay,
    Deductions,
    Net_Salary
FROM payroll";

/// Repository interface for payroll periods.
pub trait PayrollRepository {
    /// Inserts one payroll row and returns the store-assigned id.
    fn generate_payroll(&self, payroll: &Payroll) -> RepoResult<PayrollId>;
    fn get_payroll_by_id(&self, payroll_id: PayrollId) -> RepoResult<Option<Payroll>>;
    fn get_payrolls_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Payroll>>;
    fn get_payrolls_for_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Payroll>>;
    /// Sum of `basic + overtime - deductions` over all rows of one employee.
    fn taxable_income_for_employee(&self, employee_id: &str) -> RepoResult<Decimal>;
}

/// SQLite-backed payroll repository.
pub struct SqlitePayrollRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePayrollRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "payroll", PAYROLL_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_payrolls(&self, sql: &str, bind: impl Params) -> RepoResult<Vec<Payroll>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut payrolls = Vec::new();
        while let Some(row) = rows.next()? {
            payrolls.push(parse_payroll_row(row)?);
        }
        Ok(payrolls)
    }
}

impl PayrollRepository for SqlitePayrollRepository<'_> {
    fn generate_payroll(&self, payroll: &Payroll) -> RepoResult<PayrollId> {
        payroll.validate()?;

        self.conn.execute(
            "INSERT INTO payroll (
                Employee_ID,
                Payperiod_Start_Date,
                Payperiod_End_Date,
                Basic_Salary,
                Overtime_Pay,
                Deductions,
                Net_Salary
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                payroll.employee_id.as_str(),
                payroll.pay_period_start_date,
                payroll.pay_period_end_date,
                decimal_to_db(payroll.basic_salary),
                decimal_to_db(payroll.overtime_pay),
                decimal_to_db(payroll.deductions),
                decimal_to_db(payroll.net_salary),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_payroll_by_id(&self, payroll_id: PayrollId) -> RepoResult<Option<Payroll>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PAYROLL_SELECT_SQL} WHERE Payroll_ID = ?1;"))?;
        let mut rows = stmt.query([payroll_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_payroll_row(row)?));
        }

        Ok(None)
    }

    fn get_payrolls_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Payroll>> {
        self.query_payrolls(
            &format!("{PAYROLL_SELECT_SQL} WHERE Employee_ID = ?1 ORDER BY Payroll_ID ASC;"),
            [employee_id],
        )
    }

    fn get_payrolls_for_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Payroll>> {
        if start_date > end_date {
            return Ok(Vec::new());
        }

        self.query_payrolls(
            &format!(
                "{PAYROLL_SELECT_SQL}
                 WHERE Payperiod_Start_Date >= ?1
                   AND Payperiod_Start_Date <= ?2
                 ORDER BY Payperiod_Start_Date ASC, Payroll_ID ASC;"
            ),
            params![start_date, end_date],
        )
    }

    fn taxable_income_for_employee(&self, employee_id: &str) -> RepoResult<Decimal> {
        // Aggregated in Decimal: SQLite SUM over text columns would go through REAL.
        let mut stmt = self.conn.prepare(
            "SELECT Basic_Salary, Overtime_Pay, Deductions
             FROM payroll
             WHERE Employee_ID = ?1;",
        )?;
        let mut rows = stmt.query([employee_id])?;
        let mut total = Decimal::ZERO;
        while let Some(row) = rows.next()? {
            let basic = parse_decimal_column(row, "payroll", "Basic_Salary")?;
            let overtime = parse_decimal_column(row, "payroll", "Overtime_Pay")?;
            let deductions = parse_decimal_column(row, "payroll", "Deductions")?;
            check_currency("basic_salary", basic)?;
            check_currency("overtime_pay", overtime)?;
            check_currency("deductions", deductions)?;
            let net = compute_net_salary(basic, overtime, deductions)?;
            total = total.checked_add(net).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "taxable income for employee `{employee_id}` overflowed"
                ))
            })?;
        }

        Ok(total)
    }
}

fn parse_payroll_row(row: &Row<'_>) -> RepoResult<Payroll> {
    let payroll = Payroll {
        payroll_id: Some(row.get("Payroll_ID")?),
        employee_id: row.get("Employee_ID")?,
        pay_period_start_date: row.get("Payperiod_Start_Date")?,
        pay_period_end_date: row.get("Payperiod_End_Date")?,
        basic_salary: parse_decimal_column(row, "payroll", "Basic_Salary")?,
        overtime_pay: parse_decimal_column(row, "payroll", "Overtime_Pay")?,
        deductions: parse_decimal_column(row, "payroll", "Deductions")?,
        net_salary: parse_decimal_column(row, "payroll", "Net_Salary")?,
    };
    payroll.validate()?;
    Ok(payroll)
}
