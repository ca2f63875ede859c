//! Financial record repository contract and SQLite implementation.

use super::{
    decimal_to_db, ensure_connection_ready, parse_decimal_column, RepoError, RepoResult,
};
use crate::model::financial_record::{FinancialRecord, RecordId, RecordType};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use uuid::Uuid;

const FINANCIAL_RECORD_COLUMNS: &[&str] = &[
    "Record_ID",
    "Employee_ID",
    "Record_Date",
    "Description",
    "Amount",
    "Record_Type",
];

const FINANCIAL_RECORD_SELECT_SQL: &str = "SELECT
    Record_ID,
    Employee_ID,
    Record_Date,
    Description,
    Amount,
    Record_Type
FROM financial_record";

/// Repository interface for employee financial history.
pub trait FinancialRecordRepository {
    fn add_financial_record(&self, record: &FinancialRecord) -> RepoResult<RecordId>;
    fn get_financial_record_by_id(&self, record_id: RecordId)
        -> RepoResult<Option<FinancialRecord>>;
    fn get_financial_records_for_employee(
        &self,
        employee_id: &str,
    ) -> RepoResult<Vec<FinancialRecord>>;
    fn get_financial_records_for_date(&self, date: NaiveDate) -> RepoResult<Vec<FinancialRecord>>;
}

/// SQLite-backed financial record repository.
pub struct SqliteFinancialRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFinancialRecordRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "financial_record", FINANCIAL_RECORD_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_records(&self, sql: &str, bind: impl Params) -> RepoResult<Vec<FinancialRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_financial_record_row(row)?);
        }
        Ok(records)
    }
}

impl FinancialRecordRepository for SqliteFinancialRecordRepository<'_> {
    fn add_financial_record(&self, record: &FinancialRecord) -> RepoResult<RecordId> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO financial_record (
                Record_ID,
                Employee_ID,
                Record_Date,
                Description,
                Amount,
                Record_Type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.record_id.to_string(),
                record.employee_id.as_str(),
                record.record_date,
                record.description.as_str(),
                decimal_to_db(record.amount),
                record.record_type.as_str(),
            ],
        )?;

        Ok(record.record_id)
    }

    fn get_financial_record_by_id(
        &self,
        record_id: RecordId,
    ) -> RepoResult<Option<FinancialRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FINANCIAL_RECORD_SELECT_SQL} WHERE Record_ID = ?1;"))?;
        let mut rows = stmt.query([record_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_financial_record_row(row)?));
        }

        Ok(None)
    }

    fn get_financial_records_for_employee(
        &self,
        employee_id: &str,
    ) -> RepoResult<Vec<FinancialRecord>> {
        self.query_records(
            &format!(
                "{FINANCIAL_RECORD_SELECT_SQL}
                 WHERE Employee_ID = ?1
                 ORDER BY Record_Date ASC, Record_ID ASC;"
            ),
            [employee_id],
        )
    }

    fn get_financial_records_for_date(&self, date: NaiveDate) -> RepoResult<Vec<FinancialRecord>> {
        self.query_records(
            &format!(
                "{FINANCIAL_RECORD_SELECT_SQL}
                 WHERE Record_Date = ?1
                 ORDER BY Employee_ID ASC, Record_ID ASC;"
            ),
            [date],
        )
    }
}

fn parse_financial_record_row(row: &Row<'_>) -> RepoResult<FinancialRecord> {
    let id_text: String = row.get("Record_ID")?;
    let record_id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{id_text}` in financial_record.Record_ID"
        ))
    })?;

    let type_text: String = row.get("Record_Type")?;
    let record_type = RecordType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid record type `{type_text}` in financial_record.Record_Type"
        ))
    })?;

    let record = FinancialRecord {
        record_id,
        employee_id: row.get("Employee_ID")?,
        record_date: row.get("Record_Date")?,
        description: row.get("Description")?,
        amount: parse_decimal_column(row, "financial_record", "Amount")?,
        record_type,
    };
    record.validate()?;
    Ok(record)
}
