//! Expense CLI commands

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::error::PaceResult;
use crate::models::{Money, SessionState};
use crate::services::{BudgetService, LedgerService};

use super::parse_money_arg;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense against a category, or "unbudgeted"
    Add {
        /// Category name (case-insensitive) or "unbudgeted"
        category: String,
        /// Amount (e.g., "12.50")
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
        /// What the money went on
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    session: &mut SessionState,
    cmd: ExpenseCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
        } => {
            let txn = LedgerService::new(session).add_expense(&category, amount, &description, now)?;
            println!("Recorded expense: {}", txn);
            println!("  ID: {}", txn.id.short());

            if let Some(category) = session.profile.category(&txn.category) {
                let status = BudgetService::new(session).category_status(
                    category,
                    session.current_month(),
                    now,
                );
                if status.is_over_budget() {
                    println!(
                        "  {} is over budget by {} ({})",
                        status.name,
                        status.remaining.abs(),
                        status.window
                    );
                } else {
                    println!(
                        "  {} left in {} ({})",
                        status.remaining, status.name, status.window
                    );
                }
            }

            println!("  Balance: {}", session.profile.current_balance);
        }
    }

    Ok(())
}
