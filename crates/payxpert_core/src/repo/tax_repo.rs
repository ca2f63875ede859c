//! Tax repository contract and SQLite implementation.
//!
//! Tax rows are append-only snapshots. No uniqueness is enforced on
//! `(Employee_ID, Tax_Year)`; repeated inserts produce repeated rows.

use super::{decimal_to_db, ensure_connection_ready, parse_decimal_column, RepoResult};
use crate::model::tax::{Tax, TaxId};
use rusqlite::{params, Connection, Params, Row};

const TAX_COLUMNS: &[&str] = &[
    "Tax_ID",
    "Employee_ID",
    "Tax_Year",
    "Taxable_Income",
    "Tax_Amount",
];

const TAX_SELECT_SQL: &str = "SELECT
    Tax_ID,
    Employee_ID,
    Tax_Year,
    Taxable_Income,
    Tax_Amount
FROM tax";

/// Repository interface for tax assessments.
pub trait TaxRepository {
    /// Inserts one tax row and returns the store-assigned id.
    fn create_tax(&self, tax: &Tax) -> RepoResult<TaxId>;
    fn get_tax_by_id(&self, tax_id: TaxId) -> RepoResult<Option<Tax>>;
    fn get_taxes_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Tax>>;
    fn get_taxes_for_year(&self, tax_year: i32) -> RepoResult<Vec<Tax>>;
}

/// SQLite-backed tax repository.
pub struct SqliteTaxRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaxRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tax", TAX_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_taxes(&self, sql: &str, bind: impl Params) -> RepoResult<Vec<Tax>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut taxes = Vec::new();
        while let Some(row) = rows.next()? {
            taxes.push(parse_tax_row(row)?);
        }
        Ok(taxes)
    }
}

impl TaxRepository for SqliteTaxRepository<'_> {
    fn create_tax(&self, tax: &Tax) -> RepoResult<TaxId> {
        tax.validate()?;

        self.conn.execute(
            "INSERT INTO tax (
                Employee_ID,
                Tax_Year,
                Taxable_Income,
                Tax_Amount
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                tax.employee_id.as_str(),
                tax.tax_year,
                decimal_to_db(tax.taxable_income),
                decimal_to_db(tax.tax_amount),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_tax_by_id(&self, tax_id: TaxId) -> RepoResult<Option<Tax>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TAX_SELECT_SQL} WHERE Tax_ID = ?1;"))?;
        let mut rows = stmt.query([tax_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_tax_row(row)?));
        }

        Ok(None)
    }

    fn get_taxes_for_employee(&self, employee_id: &str) -> RepoResult<Vec<Tax>> {
        self.query_taxes(
            &format!("{TAX_SELECT_SQL} WHERE Employee_ID = ?1 ORDER BY Tax_ID ASC;"),
            [employee_id],
        )
    }

    fn get_taxes_for_year(&self, tax_year: i32) -> RepoResult<Vec<Tax>> {
        self.query_taxes(
            &format!("{TAX_SELECT_SQL} WHERE Tax_Year = ?1 ORDER BY Tax_ID ASC;"),
            [tax_year],
        )
    }
}

fn parse_tax_row(row: &Row<'_>) -> RepoResult<Tax> {
    Ok(Tax {
        tax_id: Some(row.get("Tax_ID")?),
        employee_id: row.get("Employee_ID")?,
        tax_year: row.get("Tax_Year")?,
        taxable_income: parse_decimal_column(row, "tax", "Taxable_Income")?,
        tax_amount: parse_decimal_column(row, "tax", "Tax_Amount")?,
    })
}
