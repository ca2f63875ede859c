//! Financial record use-case service.

use crate::model::financial_record::{FinancialRecord, RecordId};
use crate::repo::financial_record_repo::FinancialRecordRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;

/// Use-case service wrapper for employee financial history.
pub struct FinancialRecordService<R: FinancialRecordRepository> {
    repo: R,
}

impl<R: FinancialRecordRepository> FinancialRecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_financial_record(&self, record: &FinancialRecord) -> RepoResult<RecordId> {
        self.repo.add_financial_record(record)
    }

    pub fn get_financial_record_by_id(
        &self,
        record_id: RecordId,
    ) -> RepoResult<Option<FinancialRecord>> {
        self.repo.get_financial_record_by_id(record_id)
    }

    pub fn get_financial_records_for_employee(
        &self,
        employee_id: &str,
    ) -> RepoResult<Vec<FinancialRecord>> {
        self.repo.get_financial_records_for_employee(employee_id)
    }

    pub fn get_financial_records_for_date(
        &self,
        date: NaiveDate,
    ) -> RepoResult<Vec<FinancialRecord>> {
        self.repo.get_financial_records_for_date(date)
    }
}
