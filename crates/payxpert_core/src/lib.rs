//! Core payroll record keeping for PayXpert.
//! This crate owns the schema, the entity mapping and every business rule.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::{AppError, AppResult, FinancialRecordRequest, PayrollApp, PayrollRequest};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{ContactUpdate, Employee, EmployeeId};
pub use model::financial_record::{FinancialRecord, RecordId, RecordType};
pub use model::payroll::{compute_net_salary, Payroll, PayrollId};
pub use model::tax::{compute_tax_amount, Tax, TaxId, TAX_RATE};
pub use model::{check_currency, round_currency, ValidationError, MAX_CURRENCY_AMOUNT};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::financial_record_repo::{
    FinancialRecordRepository, SqliteFinancialRecordRepository,
};
pub use repo::payroll_repo::{PayrollRepository, SqlitePayrollRepository};
pub use repo::tax_repo::{SqliteTaxRepository, TaxRepository};
pub use repo::{RepoError, RepoResult};
pub use service::employee_service::EmployeeService;
pub use service::financial_record_service::FinancialRecordService;
pub use service::payroll_service::PayrollService;
pub use service::tax_service::TaxService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
