//! Application controller.
//!
//! # Responsibility
//! - Own the single database connection for the process lifetime.
//! - Translate discrete operator commands into service calls.
//! - Classify every failure into the closed `AppError` taxonomy.
//!
//! # Invariants
//! - Input is parsed before any service call; a parse failure writes nothing.
//! - Each command builds short-lived repositories over the owned connection.

use crate::config::AppConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::employee::{ContactUpdate, Employee};
use crate::model::financial_record::{FinancialRecord, RecordId, RecordType};
use crate::model::payroll::{Payroll, PayrollId};
use crate::model::tax::{Tax, TaxId};
use crate::model::ValidationError;
use crate::repo::employee_repo::SqliteEmployeeRepository;
use crate::repo::financial_record_repo::SqliteFinancialRecordRepository;
use crate::repo::payroll_repo::SqlitePayrollRepository;
use crate::repo::tax_repo::SqliteTaxRepository;
use crate::repo::RepoError;
use crate::service::employee_service::EmployeeService;
use crate::service::financial_record_service::FinancialRecordService;
use crate::service::payroll_service::PayrollService;
use crate::service::tax_service::TaxService;
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod input;

pub type AppResult<T> = Result<T, AppError>;

/// Every way a controller command can fail.
#[derive(Debug)]
pub enum AppError {
    /// The store could not be opened or bootstrapped.
    DatabaseUnavailable(DbError),
    /// Operator input was rejected before reaching a service.
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// A command needed an existing row that is absent.
    NotFound { entity: &'static str, id: String },
    /// The store rejected a write (duplicate id, unknown employee reference).
    ConstraintViolation(RepoError),
    Validation(ValidationError),
    Storage(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseUnavailable(err) => write!(f, "could not connect to database: {err}"),
            Self::InvalidInput {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} `{value}`: {reason}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::ConstraintViolation(err) => write!(f, "rejected by database constraint: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DatabaseUnavailable(err) => Some(err),
            Self::ConstraintViolation(err) | Self::Storage(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidInput { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        if value.is_constraint_violation() {
            return Self::ConstraintViolation(value);
        }
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other),
        }
    }
}

/// Input for generating one payroll period; net salary is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRequest {
    pub employee_id: String,
    pub pay_period_start_date: NaiveDate,
    pub pay_period_end_date: NaiveDate,
    pub basic_salary: Decimal,
    pub overtime_pay: Decimal,
    pub deductions: Decimal,
}

/// Input for recording one financial history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialRecordRequest {
    pub employee_id: String,
    pub record_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub record_type: RecordType,
}

/// Controller owning the process-wide connection.
pub struct PayrollApp {
    conn: Connection,
}

impl PayrollApp {
    /// Opens the configured database.
    ///
    /// # Errors
    /// - `AppError::DatabaseUnavailable` for any open or bootstrap failure.
    pub fn connect(config: &AppConfig) -> AppResult<Self> {
        match open_db(&config.db_path) {
            Ok(conn) => {
                info!("event=app_connect module=app status=ok");
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=app_connect module=app status=error error_code=db_unavailable error={}",
                    err
                );
                Err(AppError::DatabaseUnavailable(err))
            }
        }
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = open_db_in_memory().map_err(AppError::DatabaseUnavailable)?;
        Ok(Self { conn })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn add_employee(&self, employee: &Employee) -> AppResult<()> {
        self.employees()?.add_employee(employee)?;
        Ok(())
    }

    pub fn list_employees(&self) -> AppResult<Vec<Employee>> {
        Ok(self.employees()?.get_all_employees()?)
    }

    pub fn find_employee(&self, employee_id: &str) -> AppResult<Option<Employee>> {
        Ok(self.employees()?.get_employee_by_id(employee_id)?)
    }

    /// Applies a contact update on top of the stored profile.
    ///
    /// # Errors
    /// - `AppError::NotFound` when `employee_id` does not exist.
    pub fn update_employee_contact(
        &self,
        employee_id: &str,
        update: ContactUpdate,
    ) -> AppResult<Employee> {
        let service = self.employees()?;
        let mut employee = service
            .get_employee_by_id(employee_id)?
            .ok_or_else(|| AppError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            })?;
        employee.apply_contact_update(update);
        if !service.update_employee(&employee)? {
            return Err(AppError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            });
        }
        Ok(employee)
    }

    /// Returns whether a row was deleted.
    pub fn remove_employee(&self, employee_id: &str) -> AppResult<bool> {
        Ok(self.employees()?.remove_employee(employee_id)?)
    }

    /// Computes net salary and stores the payroll row.
    pub fn generate_payroll(&self, request: &PayrollRequest) -> AppResult<Payroll> {
        let mut payroll = Payroll::new(
            request.employee_id.as_str(),
            request.pay_period_start_date,
            request.pay_period_end_date,
            request.basic_salary,
            request.overtime_pay,
            request.deductions,
        )
        .map_err(AppError::Validation)?;
        payroll.payroll_id = Some(self.payrolls()?.generate_payroll(&payroll)?);
        Ok(payroll)
    }

    pub fn payrolls_for_employee(&self, employee_id: &str) -> AppResult<Vec<Payroll>> {
        Ok(self.payrolls()?.get_payrolls_for_employee(employee_id)?)
    }

    pub fn payroll_by_id(&self, payroll_id: PayrollId) -> AppResult<Option<Payroll>> {
        Ok(self.payrolls()?.get_payroll_by_id(payroll_id)?)
    }

    pub fn payrolls_for_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<Payroll>> {
        Ok(self.payrolls()?.get_payrolls_for_period(start_date, end_date)?)
    }

    pub fn calculate_tax(&self, employee_id: &str, tax_year: i32) -> AppResult<Tax> {
        Ok(self.taxes()?.calculate_tax(employee_id, tax_year)?)
    }

    pub fn taxes_for_employee(&self, employee_id: &str) -> AppResult<Vec<Tax>> {
        Ok(self.taxes()?.get_taxes_for_employee(employee_id)?)
    }

    pub fn tax_by_id(&self, tax_id: TaxId) -> AppResult<Option<Tax>> {
        Ok(self.taxes()?.get_tax_by_id(tax_id)?)
    }

    pub fn taxes_for_year(&self, tax_year: i32) -> AppResult<Vec<Tax>> {
        Ok(self.taxes()?.get_taxes_for_year(tax_year)?)
    }

    pub fn add_financial_record(
        &self,
        request: &FinancialRecordRequest,
    ) -> AppResult<FinancialRecord> {
        let record = FinancialRecord::new(
            request.employee_id.as_str(),
            request.record_date,
            request.description.as_str(),
            request.amount,
            request.record_type,
        );
        self.financial_records()?.add_financial_record(&record)?;
        Ok(record)
    }

    pub fn financial_record_by_id(
        &self,
        record_id: RecordId,
    ) -> AppResult<Option<FinancialRecord>> {
        Ok(self
            .financial_records()?
            .get_financial_record_by_id(record_id)?)
    }

    pub fn financial_records_for_employee(
        &self,
        employee_id: &str,
    ) -> AppResult<Vec<FinancialRecord>> {
        Ok(self
            .financial_records()?
            .get_financial_records_for_employee(employee_id)?)
    }

    pub fn financial_records_for_date(&self, date: NaiveDate) -> AppResult<Vec<FinancialRecord>> {
        Ok(self
            .financial_records()?
            .get_financial_records_for_date(date)?)
    }

    fn employees(&self) -> AppResult<EmployeeService<SqliteEmployeeRepository<'_>>> {
        Ok(EmployeeService::new(SqliteEmployeeRepository::try_new(
            &self.conn,
        )?))
    }

    fn payrolls(&self) -> AppResult<PayrollService<SqlitePayrollRepository<'_>>> {
        Ok(PayrollService::new(SqlitePayrollRepository::try_new(
            &self.conn,
        )?))
    }

    fn taxes(
        &self,
    ) -> AppResult<TaxService<SqliteTaxRepository<'_>, SqlitePayrollRepository<'_>>> {
        Ok(TaxService::new(
            SqliteTaxRepository::try_new(&self.conn)?,
            SqlitePayrollRepository::try_new(&self.conn)?,
        ))
    }

    fn financial_records(
        &self,
    ) -> AppResult<FinancialRecordService<SqliteFinancialRecordRepository<'_>>> {
        Ok(FinancialRecordService::new(
            SqliteFinancialRecordRepository::try_new(&self.conn)?,
        ))
    }
}
