//! Record services.
//!
//! # Responsibility
//! - Expose the per-entity use-case contracts the controller calls.
//! - Keep the controller decoupled from SQL and row mapping.
//!
//! # Invariants
//! - Each mutating call is its own unit of work; nothing spans two calls.

pub mod employee_service;
pub mod financial_record_service;
pub mod payroll_service;
pub mod tax_service;
