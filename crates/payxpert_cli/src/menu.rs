//! Numbered menu loop.
//!
//! # Invariants
//! - A failing command prints its error and the menu is shown again.
//! - Only choice 10 (or end of input) leaves the loop.

use payxpert_core::app::input::{
    parse_amount, parse_date, parse_id, parse_optional, parse_optional_date, parse_record_id,
    parse_record_type, parse_required, parse_tax_year,
};
use payxpert_core::{
    AppError, ContactUpdate, Employee, FinancialRecord, FinancialRecordRequest, Payroll,
    PayrollApp, PayrollRequest, Tax,
};
use std::io::{self, BufRead, Write};

const MENU_TEXT: &str = "
========== EMPLOYEE MANAGEMENT SYSTEM ==========
1. Add Employee
2. View All Employees
3. Get Employee by ID
4. Update Employee
5. Delete Employee
6. Generate Payroll
7. View Payrolls for an Employee
8. Calculate Tax
9. View Taxes for an Employee
---------- Reports and Records ----------
11. Get Payroll by ID
12. View Payrolls for a Period
13. Get Tax by ID
14. View Taxes for a Year
15. Add Financial Record
16. View Financial Records for an Employee
17. View Financial Records for a Date
18. Get Financial Record by ID
------------------------------------------
10. Exit";

enum MenuError {
    App(AppError),
    Io(io::Error),
    EndOfInput,
}

impl From<AppError> for MenuError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<io::Error> for MenuError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

type CommandResult = Result<(), MenuError>;

/// Interactive menu bound to one controller.
pub struct Menu<'app, R: BufRead, W: Write> {
    app: &'app PayrollApp,
    input: R,
    output: W,
}

impl<'app, R: BufRead, W: Write> Menu<'app, R, W> {
    pub fn new(app: &'app PayrollApp, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    /// Runs until Exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU_TEXT}")?;
            let choice = match self.prompt("Enter your choice: ") {
                Ok(choice) => choice,
                Err(MenuError::EndOfInput) => return Ok(()),
                Err(MenuError::Io(err)) => return Err(err),
                Err(MenuError::App(_)) => continue,
            };

            let result = match choice.as_str() {
                "1" => self.add_employee(),
                "2" => self.view_all_employees(),
                "3" => self.get_employee_by_id(),
                "4" => self.update_employee(),
                "5" => self.delete_employee(),
                "6" => self.generate_payroll(),
                "7" => self.view_payrolls_for_employee(),
                "8" => self.calculate_tax(),
                "9" => self.view_taxes_for_employee(),
                "10" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                "11" => self.get_payroll_by_id(),
                "12" => self.view_payrolls_for_period(),
                "13" => self.get_tax_by_id(),
                "14" => self.view_taxes_for_year(),
                "15" => self.add_financial_record(),
                "16" => self.view_financial_records_for_employee(),
                "17" => self.view_financial_records_for_date(),
                "18" => self.get_financial_record_by_id(),
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    continue;
                }
            };

            match result {
                Ok(()) => {}
                Err(MenuError::App(err)) => self.report(&err)?,
                Err(MenuError::EndOfInput) => return Ok(()),
                Err(MenuError::Io(err)) => return Err(err),
            }
        }
    }

    fn report(&mut self, err: &AppError) -> io::Result<()> {
        match err {
            AppError::InvalidInput { .. } => writeln!(self.output, "Invalid input: {err}"),
            AppError::NotFound { .. } => writeln!(self.output, "Not found: {err}"),
            AppError::ConstraintViolation(_) => writeln!(self.output, "Rejected: {err}"),
            AppError::Validation(_) => writeln!(self.output, "Invalid record: {err}"),
            AppError::DatabaseUnavailable(_) | AppError::Storage(_) => {
                writeln!(self.output, "Error: {err}")
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String, MenuError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn add_employee(&mut self) -> CommandResult {
        writeln!(self.output, "\nEnter Employee Details:")?;
        let employee_id = parse_required("employee_id", &self.prompt("Employee ID: ")?)?;
        let first_name = parse_required("first_name", &self.prompt("First Name: ")?)?;
        let last_name = parse_required("last_name", &self.prompt("Last Name: ")?)?;
        let date_of_birth = parse_date(
            "date_of_birth",
            &self.prompt("Date of Birth (YYYY-MM-DD): ")?,
        )?;
        let gender = self.prompt("Gender: ")?.trim().to_string();
        let email = parse_required("email", &self.prompt("Email: ")?)?;
        let phone_number = self.prompt("Phone Number: ")?.trim().to_string();
        let address = self.prompt("Address: ")?.trim().to_string();
        let position = self.prompt("Position: ")?.trim().to_string();
        let joining_date =
            parse_date("joining_date", &self.prompt("Joining Date (YYYY-MM-DD): ")?)?;
        let termination_date = parse_optional_date(
            "termination_date",
            &self.prompt("Termination Date (YYYY-MM-DD) or leave blank: ")?,
        )?;

        let employee = Employee {
            employee_id,
            first_name,
            last_name,
            date_of_birth,
            gender,
            email,
            phone_number,
            address,
            position,
            joining_date,
            termination_date,
        };
        self.app.add_employee(&employee)?;
        writeln!(self.output, "Employee added successfully.")?;
        Ok(())
    }

    fn view_all_employees(&mut self) -> CommandResult {
        let employees = self.app.list_employees()?;
        if employees.is_empty() {
            writeln!(self.output, "No employees found.")?;
        }
        for employee in &employees {
            writeln!(
                self.output,
                "ID: {} | Name: {} | Email: {}",
                employee.employee_id,
                employee.full_name(),
                employee.email
            )?;
        }
        Ok(())
    }

    fn get_employee_by_id(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        match self.app.find_employee(&employee_id)? {
            Some(employee) => self.print_employee(&employee)?,
            None => writeln!(self.output, "Employee not found.")?,
        }
        Ok(())
    }

    fn update_employee(&mut self) -> CommandResult {
        let employee_id =
            parse_required("employee_id", &self.prompt("Enter Employee ID to update: ")?)?;
        if self.app.find_employee(&employee_id)?.is_none() {
            writeln!(self.output, "Employee not found.")?;
            return Ok(());
        }

        writeln!(self.output, "Leave field blank to keep current value.")?;
        let update = ContactUpdate {
            first_name: parse_optional(&self.prompt("First Name: ")?),
            last_name: parse_optional(&self.prompt("Last Name: ")?),
            email: parse_optional(&self.prompt("Email: ")?),
            phone_number: parse_optional(&self.prompt("Phone Number: ")?),
        };
        self.app.update_employee_contact(&employee_id, update)?;
        writeln!(self.output, "Employee updated.")?;
        Ok(())
    }

    fn delete_employee(&mut self) -> CommandResult {
        let employee_id =
            parse_required("employee_id", &self.prompt("Enter Employee ID to delete: ")?)?;
        if self.app.remove_employee(&employee_id)? {
            writeln!(self.output, "Employee deleted.")?;
        } else {
            writeln!(self.output, "No employee with ID {employee_id}; nothing deleted.")?;
        }
        Ok(())
    }

    fn generate_payroll(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let pay_period_start_date = parse_date(
            "pay_period_start_date",
            &self.prompt("Enter Pay Period Start Date (YYYY-MM-DD): ")?,
        )?;
        let pay_period_end_date = parse_date(
            "pay_period_end_date",
            &self.prompt("Enter Pay Period End Date (YYYY-MM-DD): ")?,
        )?;
        let basic_salary = parse_amount("basic_salary", &self.prompt("Enter Basic Salary: ")?)?;
        let overtime_pay = parse_amount("overtime_pay", &self.prompt("Enter Overtime Pay: ")?)?;
        let deductions = parse_amount("deductions", &self.prompt("Enter Deductions: ")?)?;

        let payroll = self.app.generate_payroll(&PayrollRequest {
            employee_id,
            pay_period_start_date,
            pay_period_end_date,
            basic_salary,
            overtime_pay,
            deductions,
        })?;
        writeln!(
            self.output,
            "Payroll generated. Payroll ID: {} | Net Salary: {:.2}",
            payroll.payroll_id.unwrap_or_default(),
            payroll.net_salary
        )?;
        Ok(())
    }

    fn view_payrolls_for_employee(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let payrolls = self.app.payrolls_for_employee(&employee_id)?;
        self.print_payrolls(&payrolls)
    }

    fn get_payroll_by_id(&mut self) -> CommandResult {
        let payroll_id = parse_id("payroll_id", &self.prompt("Enter Payroll ID: ")?)?;
        match self.app.payroll_by_id(payroll_id)? {
            Some(payroll) => self.print_payrolls(std::slice::from_ref(&payroll)),
            None => {
                writeln!(self.output, "Payroll not found.")?;
                Ok(())
            }
        }
    }

    fn view_payrolls_for_period(&mut self) -> CommandResult {
        let start = parse_date("start_date", &self.prompt("Enter Start Date (YYYY-MM-DD): ")?)?;
        let end = parse_date("end_date", &self.prompt("Enter End Date (YYYY-MM-DD): ")?)?;
        let payrolls = self.app.payrolls_for_period(start, end)?;
        self.print_payrolls(&payrolls)
    }

    fn calculate_tax(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let tax_year = parse_tax_year(&self.prompt("Enter Tax Year (e.g., 2024): ")?)?;
        let tax = self.app.calculate_tax(&employee_id, tax_year)?;
        writeln!(
            self.output,
            "Tax calculated. Taxable Income: {:.2} | Tax Amount: {:.2}",
            tax.taxable_income, tax.tax_amount
        )?;
        Ok(())
    }

    fn view_taxes_for_employee(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let taxes = self.app.taxes_for_employee(&employee_id)?;
        self.print_taxes(&taxes)
    }

    fn get_tax_by_id(&mut self) -> CommandResult {
        let tax_id = parse_id("tax_id", &self.prompt("Enter Tax ID: ")?)?;
        match self.app.tax_by_id(tax_id)? {
            Some(tax) => self.print_taxes(std::slice::from_ref(&tax)),
            None => {
                writeln!(self.output, "Tax record not found.")?;
                Ok(())
            }
        }
    }

    fn view_taxes_for_year(&mut self) -> CommandResult {
        let tax_year = parse_tax_year(&self.prompt("Enter Tax Year (e.g., 2024): ")?)?;
        let taxes = self.app.taxes_for_year(tax_year)?;
        self.print_taxes(&taxes)
    }

    fn add_financial_record(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let record_date =
            parse_date("record_date", &self.prompt("Enter Record Date (YYYY-MM-DD): ")?)?;
        let description = parse_required("description", &self.prompt("Enter Description: ")?)?;
        let amount = parse_amount("amount", &self.prompt("Enter Amount: ")?)?;
        let record_type = parse_record_type(
            &self.prompt("Enter Record Type (income|expense|tax_payment|other): ")?,
        )?;

        let record = self.app.add_financial_record(&FinancialRecordRequest {
            employee_id,
            record_date,
            description,
            amount,
            record_type,
        })?;
        writeln!(
            self.output,
            "Financial record added. Record ID: {}",
            record.record_id
        )?;
        Ok(())
    }

    fn view_financial_records_for_employee(&mut self) -> CommandResult {
        let employee_id = parse_required("employee_id", &self.prompt("Enter Employee ID: ")?)?;
        let records = self.app.financial_records_for_employee(&employee_id)?;
        self.print_financial_records(&records)
    }

    fn view_financial_records_for_date(&mut self) -> CommandResult {
        let date = parse_date("record_date", &self.prompt("Enter Record Date (YYYY-MM-DD): ")?)?;
        let records = self.app.financial_records_for_date(date)?;
        self.print_financial_records(&records)
    }

    fn get_financial_record_by_id(&mut self) -> CommandResult {
        let record_id = parse_record_id(&self.prompt("Enter Record ID: ")?)?;
        match self.app.financial_record_by_id(record_id)? {
            Some(record) => self.print_financial_records(std::slice::from_ref(&record)),
            None => {
                writeln!(self.output, "Financial record not found.")?;
                Ok(())
            }
        }
    }

    fn print_employee(&mut self, employee: &Employee) -> io::Result<()> {
        let termination = employee
            .termination_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(self.output, "Employee Details:")?;
        writeln!(self.output, "  ID: {}", employee.employee_id)?;
        writeln!(self.output, "  First Name: {}", employee.first_name)?;
        writeln!(self.output, "  Last Name: {}", employee.last_name)?;
        writeln!(self.output, "  Date of Birth: {}", employee.date_of_birth)?;
        writeln!(self.output, "  Gender: {}", employee.gender)?;
        writeln!(self.output, "  Email: {}", employee.email)?;
        writeln!(self.output, "  Phone Number: {}", employee.phone_number)?;
        writeln!(self.output, "  Address: {}", employee.address)?;
        writeln!(self.output, "  Position: {}", employee.position)?;
        writeln!(self.output, "  Joining Date: {}", employee.joining_date)?;
        writeln!(self.output, "  Termination Date: {termination}")
    }

    fn print_payrolls(&mut self, payrolls: &[Payroll]) -> CommandResult {
        if payrolls.is_empty() {
            writeln!(self.output, "No payroll records found.")?;
            return Ok(());
        }
        for payroll in payrolls {
            writeln!(
                self.output,
                "Payroll ID: {}\nEmployee ID: {}\nPay Period: {} to {}\nBasic Salary: {:.2}\nOvertime Pay: {:.2}\nDeductions: {:.2}\nNet Salary: {:.2}\n------------------------------",
                payroll.payroll_id.unwrap_or_default(),
                payroll.employee_id,
                payroll.pay_period_start_date,
                payroll.pay_period_end_date,
                payroll.basic_salary,
                payroll.overtime_pay,
                payroll.deductions,
                payroll.net_salary
            )?;
        }
        Ok(())
    }

    fn print_taxes(&mut self, taxes: &[Tax]) -> CommandResult {
        if taxes.is_empty() {
            writeln!(self.output, "No tax records found.")?;
            return Ok(());
        }
        for tax in taxes {
            writeln!(
                self.output,
                "Tax ID: {}\nEmployee ID: {}\nTax Year: {}\nTaxable Income: {:.2}\nTax Amount: {:.2}\n------------------------------",
                tax.tax_id.unwrap_or_default(),
                tax.employee_id,
                tax.tax_year,
                tax.taxable_income,
                tax.tax_amount
            )?;
        }
        Ok(())
    }

    fn print_financial_records(&mut self, records: &[FinancialRecord]) -> CommandResult {
        if records.is_empty() {
            writeln!(self.output, "No financial records found.")?;
            return Ok(());
        }
        for record in records {
            writeln!(
                self.output,
                "Record ID: {}\nEmployee ID: {}\nDate: {}\nType: {}\nDescription: {}\nAmount: {:.2}\n------------------------------",
                record.record_id,
                record.employee_id,
                record.record_date,
                record.record_type.as_str(),
                record.description,
                record.amount
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Menu;
    use payxpert_core::PayrollApp;
    use std::io::Cursor;

    fn run_script(app: &PayrollApp, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut menu = Menu::new(app, Cursor::new(script.as_bytes()), &mut output);
            menu.run().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    const ADD_E1: &str = "1\nE1\nAsha\nRao\n1990-05-17\nF\nasha@example.com\n555-0100\n12 Main St\nAnalyst\n2020-01-06\n\n";

    #[test]
    fn exit_choice_stops_the_loop() {
        let app = PayrollApp::open_in_memory().unwrap();
        let output = run_script(&app, "10\n2\n");
        assert!(output.contains("Exiting..."));
        assert!(!output.contains("No employees found."));
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let app = PayrollApp::open_in_memory().unwrap();
        let output = run_script(&app, "2\n");
        assert!(output.contains("No employees found."));
    }

    #[test]
    fn invalid_choice_redisplays_menu() {
        let app = PayrollApp::open_in_memory().unwrap();
        let output = run_script(&app, "42\n10\n");
        assert!(output.contains("Invalid choice. Try again."));
        assert_eq!(output.matches("1. Add Employee").count(), 2);
    }

    #[test]
    fn exit_is_listed_last() {
        let app = PayrollApp::open_in_memory().unwrap();
        let output = run_script(&app, "10\n");
        let exit_at = output.find("10. Exit").unwrap();
        let last_report_at = output.find("18. Get Financial Record by ID").unwrap();
        assert!(exit_at > last_report_at);
    }

    #[test]
    fn sub_cent_amount_is_rejected_at_the_prompt() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = format!(
            "{ADD_E1}6\nE1\n2024-01-01\n2024-01-31\n0.005\n7\nE1\n10\n"
        );
        let output = run_script(&app, &script);
        assert!(output.contains("Invalid input: invalid basic_salary `0.005`"));
        assert!(output.contains("No payroll records found."));
    }

    #[test]
    fn add_then_view_employee() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = format!("{ADD_E1}3\nE1\n10\n");
        let output = run_script(&app, &script);
        assert!(output.contains("Employee added successfully."));
        assert!(output.contains("  First Name: Asha"));
        assert!(output.contains("  Termination Date: -"));
    }

    #[test]
    fn malformed_date_aborts_command_without_writing() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = "1\nE1\nAsha\nRao\n17/05/1990\n2\n10\n";
        let output = run_script(&app, script);
        assert!(output.contains("Invalid input: invalid date_of_birth"));
        assert!(output.contains("No employees found."));
        assert!(app.list_employees().unwrap().is_empty());
    }

    #[test]
    fn duplicate_employee_is_reported_and_loop_continues() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = format!("{ADD_E1}{ADD_E1}2\n10\n");
        let output = run_script(&app, &script);
        assert!(output.contains("Rejected: rejected by database constraint"));
        assert!(output.contains("ID: E1 | Name: Asha Rao | Email: asha@example.com"));
    }

    #[test]
    fn payroll_and_tax_flow_prints_amounts() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = format!(
            "{ADD_E1}6\nE1\n2024-01-01\n2024-01-31\n5000.00\n200.00\n150.00\n8\nE1\n2024\n9\nE1\n10\n"
        );
        let output = run_script(&app, &script);
        assert!(output.contains("Net Salary: 5050.00"));
        assert!(output.contains("Taxable Income: 5050.00 | Tax Amount: 505.00"));
        assert!(output.contains("Tax Year: 2024"));
    }

    #[test]
    fn update_keeps_blank_fields() {
        let app = PayrollApp::open_in_memory().unwrap();
        let script = format!("{ADD_E1}4\nE1\n\nSharma\n\n555-0199\n10\n");
        let output = run_script(&app, &script);
        assert!(output.contains("Employee updated."));

        let employee = app.find_employee("E1").unwrap().unwrap();
        assert_eq!(employee.first_name, "Asha");
        assert_eq!(employee.last_name, "Sharma");
        assert_eq!(employee.email, "asha@example.com");
        assert_eq!(employee.phone_number, "555-0199");
    }

    #[test]
    fn update_unknown_employee_reports_not_found() {
        let app = PayrollApp::open_in_memory().unwrap();
        let output = run_script(&app, "4\nNOPE\n10\n");
        assert!(output.contains("Employee not found."));
    }
}
