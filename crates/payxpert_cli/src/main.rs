//! PayXpert interactive menu.
//!
//! # Responsibility
//! - Resolve configuration from flags, environment and `.env`.
//! - Open the database once and run the numbered menu until Exit.

mod menu;

use clap::Parser;
use log::{error, info};
use menu::Menu;
use payxpert_core::{init_logging, AppConfig, PayrollApp};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "payxpert")]
#[command(about = "Employee, payroll and tax record keeper")]
#[command(version)]
struct Cli {
    /// SQLite database file (defaults to PAYXPERT_DB_PATH or payxpert.sqlite3)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("Logging disabled: {err}");
        }
    }

    let app = match PayrollApp::connect(&config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Database connection failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(&app, stdin.lock(), stdout.lock());
    match menu.run() {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={}", err);
            eprintln!("I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
