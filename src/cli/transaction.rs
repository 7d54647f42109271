//! Transaction CLI commands
//!
//! Listing, inspection and deletion of logged transactions. Deletion is only
//! possible inside the open budget month.

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::PaceResult;
use crate::models::{MonthKey, SessionState};
use crate::services::period::is_archived;
use crate::services::{find_transaction, list_for_month, LedgerService};

use super::parse_month_arg;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions for a budget month, newest first
    List {
        /// Budget month (YYYY-MM); defaults to the open month
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthKey>,
        /// Show at most this many transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (full, short form, or unique prefix)
        id: String,
    },

    /// Delete a transaction from the open month
    Delete {
        /// Transaction ID (full, short form, or unique prefix)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    session: &mut SessionState,
    cmd: TransactionCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        TransactionCommands::List { month, limit } => {
            let month = month.unwrap_or_else(|| session.current_month());
            let mut txns = list_for_month(session, month);
            let total = txns.len();
            if let Some(limit) = limit {
                txns.truncate(limit);
            }

            let state = if month == session.current_month() {
                ""
            } else {
                " (archived)"
            };
            println!("Transactions for {}{}", month.friendly(), state);
            print!("{}", format_transaction_table(&txns));
            if txns.len() < total {
                println!("Showing {} of {} transactions.", txns.len(), total);
            }
        }

        TransactionCommands::Show { id } => {
            let txn = find_transaction(session, &id)?;
            print!("{}", format_transaction_details(txn));
            if is_archived(session, txn) {
                println!("(archived: read-only)");
            }
        }

        TransactionCommands::Delete { id } => {
            let txn = LedgerService::new(session).delete(&id, now)?;
            println!("Deleted transaction {}: {}", txn.id.short(), txn);
            println!("Balance: {}", session.profile.current_balance);
        }
    }

    Ok(())
}
