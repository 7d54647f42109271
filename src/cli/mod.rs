//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Handlers for commands that
//! operate on a live session receive it already ticked; the binary commits
//! it afterwards.

pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod goal;
pub mod import;
pub mod income;
pub mod init;
pub mod period;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::handle_import_command;
pub use income::{handle_income_command, IncomeCommands};
pub use init::{handle_init_command, InitArgs};
pub use period::{handle_period_command, PeriodCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_status;
use crate::error::PaceResult;
use crate::models::calendar::start_of_day;
use crate::models::transaction::parse_timestamp;
use crate::models::{Money, MonthKey, SessionState};

/// Commands that work on the saved session
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show balance, next payday and the open budget period
    Status,

    /// Record expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// List, inspect and delete transactions
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Category budget management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Income amount and payday
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Budget months and the reset day
    #[command(subcommand)]
    Period(PeriodCommands),

    /// Budget versus actual for a budget month
    Budget(BudgetArgs),

    /// Spending analytics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Export the session
    #[command(subcommand)]
    Export(ExportCommands),
}

/// Dispatch a session command
pub fn handle_session_command(
    session: &mut SessionState,
    settings: &Settings,
    cmd: SessionCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        SessionCommands::Status => {
            print!("{}", format_status(session, now));
            Ok(())
        }
        SessionCommands::Expense(cmd) => handle_expense_command(session, cmd, now),
        SessionCommands::Txn(cmd) => handle_transaction_command(session, cmd, now),
        SessionCommands::Category(cmd) => handle_category_command(session, cmd, now),
        SessionCommands::Income(cmd) => handle_income_command(session, cmd, now),
        SessionCommands::Period(cmd) => handle_period_command(session, cmd, now),
        SessionCommands::Budget(args) => handle_budget_command(session, args, now),
        SessionCommands::Report(cmd) => handle_report_command(session, settings, cmd, now),
        SessionCommands::Goal(cmd) => handle_goal_command(session, cmd, now),
        SessionCommands::Export(cmd) => handle_export_command(session, cmd, now),
    }
}

/// Parse the global `--now` override ("YYYY-MM-DD HH:MM" or "YYYY-MM-DD")
pub fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value)
        .or_else(|_| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map(start_of_day))
        .map_err(|_| format!("expected \"YYYY-MM-DD HH:MM\", got '{}'", value))
}

/// Parse a money argument ("12.50", "$12.50", "12")
pub fn parse_money_arg(value: &str) -> Result<Money, String> {
    Money::parse(value).map_err(|e| e.to_string())
}

/// Parse a budget month argument ("2025-01")
pub fn parse_month_arg(value: &str) -> Result<MonthKey, String> {
    MonthKey::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_now() {
        let full = parse_now("2025-01-15 18:30").unwrap();
        assert_eq!(full.to_string(), "2025-01-15 18:30:00");

        let date_only = parse_now("2025-01-15").unwrap();
        assert_eq!(date_only.to_string(), "2025-01-15 00:00:00");

        assert!(parse_now("15/01/2025").is_err());
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_money_arg("$12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_money_arg("twelve").is_err());
        assert_eq!(parse_month_arg("2025-02").unwrap().to_string(), "2025-02");
        assert!(parse_month_arg("2025-13").is_err());
    }
}
