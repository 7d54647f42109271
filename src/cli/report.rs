//! CLI commands for reports
//!
//! Spending velocity and category trends. Both need some history; with too
//! little they say so instead of failing.

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::PaceResult;
use crate::models::SessionState;
use crate::reports::{CategoryTrendReport, SpendingVelocityReport};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Compare this week's spending pace with recent weeks
    Velocity {
        /// Prior weeks to compare against (defaults to the configured value)
        #[arg(short, long)]
        weeks: Option<u32>,
    },

    /// Show whether each category is spending more or less than usual
    Trends,
}

/// Handle report commands
pub fn handle_report_command(
    session: &SessionState,
    settings: &Settings,
    cmd: ReportCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        ReportCommands::Velocity { weeks } => {
            let lookback = weeks.unwrap_or(settings.analytics.velocity_lookback_weeks);
            match SpendingVelocityReport::generate(&session.transactions, now, lookback) {
                Some(report) => print!("{}", report.format_terminal()),
                None => println!(
                    "Not enough spending history yet: velocity needs at least one earlier week with expenses."
                ),
            }
        }

        ReportCommands::Trends => {
            let report = CategoryTrendReport::generate(session, now, &settings.analytics);
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
