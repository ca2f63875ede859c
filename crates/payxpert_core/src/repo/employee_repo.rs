//! Employee repository contract and SQLite implementation.
//!
//! # Invariants
//! - `add_employee` writes all eleven columns; `Employee_ID` is not pre-checked.
//! - `update_employee` touches only `First_Name`, `Last_Name`, `Email`,
//!   `Phone_Number`.
//! - `remove_employee` on a missing id affects zero rows and succeeds.

use super::{ensure_connection_ready, RepoResult};
use crate::model::employee::Employee;
use rusqlite::{params, Connection, Row};

const EMPLOYEE_COLUMNS: &[&str] = &[
    "Employee_ID",
    "First_Name",
    "Last_Name",
    "Date_of_Birth",
    "Gender",
    "Email",
    "Phone_Number",
    "Address",
    "Position",
    "Joining_Date",
    "Termination_Date",
];

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    Employee_ID,
    First_Name,
    Last_Name,
    Date_of_Birth,
    Gender,
    Email,
    Phone_Number,
    Address,
    Position,
    Joining_Date,
    Termination_Date
FROM employee";

/// Repository interface for employee profiles.
pub trait EmployeeRepository {
    fn get_employee_by_id(&self, employee_id: &str) -> RepoResult<Option<Employee>>;
    fn get_all_employees(&self) -> RepoResult<Vec<Employee>>;
    fn add_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Returns whether a row matched `employee.employee_id`.
    fn update_employee(&self, employee: &Employee) -> RepoResult<bool>;
    /// Returns whether a row was deleted.
    fn remove_employee(&self, employee_id: &str) -> RepoResult<bool>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "employee", EMPLOYEE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn get_employee_by_id(&self, employee_id: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE Employee_ID = ?1;"))?;
        let mut rows = stmt.query([employee_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn get_all_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY Employee_ID ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn add_employee(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employee (
                Employee_ID,
                First_Name,
                Last_Name,
                Date_of_Birth,
                Gender,
                Email,
                Phone_Number,
                Address,
                Position,
                Joining_Date,
                Termination_Date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                employee.employee_id.as_str(),
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.date_of_birth,
                employee.gender.as_str(),
                employee.email.as_str(),
                employee.phone_number.as_str(),
                employee.address.as_str(),
                employee.position.as_str(),
                employee.joining_date,
                employee.termination_date,
            ],
        )?;

        Ok(())
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<bool> {
        employee.validate()?;

        let changed = self.conn.execute(
            "UPDATE employee
             SET
                First_Name = ?1,
                Last_Name = ?2,
                Email = ?3,
                Phone_Number = ?4
             WHERE Employee_ID = ?5;",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
                employee.phone_number.as_str(),
                employee.employee_id.as_str(),
            ],
        )?;

        Ok(changed > 0)
    }

    fn remove_employee(&self, employee_id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM employee WHERE Employee_ID = ?1;", [employee_id])?;
        Ok(changed > 0)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        employee_id: row.get("Employee_ID")?,
        first_name: row.get("First_Name")?,
        last_name: row.get("Last_Name")?,
        date_of_birth: row.get("Date_of_Birth")?,
        gender: row.get("Gender")?,
        email: row.get("Email")?,
        phone_number: row.get("Phone_Number")?,
        address: row.get("Address")?,
        position: row.get("Position")?,
        joining_date: row.get("Joining_Date")?,
        termination_date: row.get("Termination_Date")?,
    })
}
