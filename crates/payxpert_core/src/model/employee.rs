//! Employee domain model.
//!
//! # Responsibility
//! - Define the employee profile persisted in the `employee` table.
//! - Describe which fields the contact-update path may change.
//!
//! # Invariants
//! - `employee_id` is supplied by the caller and never generated.
//! - `termination_date`, when set, is not earlier than `joining_date`.
//! - Only name, email and phone change after creation.

use super::{require_text, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Caller-supplied employee identifier (`Employee_ID`).
pub type EmployeeId = String;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Employee profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub position: String,
    pub joining_date: NaiveDate,
    /// `None` while the employee is still active.
    pub termination_date: Option<NaiveDate>,
}

/// Partial contact update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl Employee {
    /// Returns `first_name last_name`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns whether `on` falls inside the employment window (inclusive).
    pub fn is_employed_on(&self, on: NaiveDate) -> bool {
        on >= self.joining_date && self.termination_date.map_or(true, |end| on <= end)
    }

    /// Applies a contact update in place, leaving every other field untouched.
    pub fn apply_contact_update(&mut self, update: ContactUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
    }

    /// Checks profile invariants.
    ///
    /// # Errors
    /// - `BlankField` for an empty id or name.
    /// - `InvalidEmail` when `email` is not `local@domain.tld` shaped.
    /// - `TerminationBeforeJoining` for a reversed employment window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("employee", "employee_id", &self.employee_id)?;
        require_text("employee", "first_name", &self.first_name)?;
        require_text("employee", "last_name", &self.last_name)?;

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }

        if let Some(termination_date) = self.termination_date {
            if termination_date < self.joining_date {
                return Err(ValidationError::TerminationBeforeJoining {
                    joining_date: self.joining_date,
                    termination_date,
                });
            }
        }

        Ok(())
    }
}
