//! Budget period CLI commands

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::error::PaceResult;
use crate::models::{IsoWeek, SessionState};
use crate::services::period::transactions_in_month;
use crate::services::{available_months, PeriodService};

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show the open budget month and the current week
    Show,

    /// List budget months that have transactions
    Months,

    /// Change the day of the month budget months start on
    #[command(name = "reset-day")]
    ResetDay {
        /// Day of month, 1-28
        day: u32,
    },
}

/// Handle a period command
pub fn handle_period_command(
    session: &mut SessionState,
    cmd: PeriodCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        PeriodCommands::Show => {
            let month = session.current_month();
            let reset_day = session.reset_day();
            let week = IsoWeek::of(now.date());

            println!("Budget month: {}", month.friendly());
            println!(
                "  {} to {} (resets on day {})",
                month.start_date(reset_day),
                month.end_date(reset_day),
                reset_day
            );
            println!(
                "Week:         {} ({} to {})",
                week,
                week.start_date(),
                week.end_date()
            );
            println!("Last checked: {}", session.period.last_reset_check);
        }

        PeriodCommands::Months => {
            let current = session.current_month();
            let reset_day = session.reset_day();

            println!("{:<10} {:<16} {:>12}  {}", "Month", "", "Transactions", "State");
            println!("{}", "-".repeat(52));
            for month in available_months(&session.transactions, current, reset_day) {
                let count = transactions_in_month(&session.transactions, month, reset_day).len();
                let state = if month == current { "open" } else { "archived" };
                println!(
                    "{:<10} {:<16} {:>12}  {}",
                    month.to_string(),
                    month.friendly(),
                    count,
                    state
                );
            }
        }

        PeriodCommands::ResetDay { day } => {
            let signals = PeriodService::new(session).set_reset_day(day, now)?;
            println!("Monthly reset day set to {}.", session.reset_day());
            for signal in signals {
                println!("{}", signal);
            }
        }
    }

    Ok(())
}
