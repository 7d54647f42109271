//! Savings goal CLI commands

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::display::{format_goal_details, format_goal_table};
use crate::error::PaceResult;
use crate::models::{Money, SessionState};
use crate::services::{list_goals, SavingsService};

use super::parse_money_arg;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with progress and totals
    List,

    /// Add a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        #[arg(value_parser = parse_money_arg)]
        target: Money,
        /// Amount already saved
        #[arg(short, long, value_parser = parse_money_arg, default_value = "0")]
        current: Money,
        /// Notes about the goal
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Set how much has been saved toward a goal
    Update {
        /// Goal number
        id: u32,
        /// New saved amount
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
    },

    /// Delete a goal
    Delete {
        /// Goal number
        id: u32,
    },
}

/// Handle a savings goal command
pub fn handle_goal_command(
    session: &mut SessionState,
    cmd: GoalCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        GoalCommands::List => {
            let (goals, summary) = list_goals(session);
            print!("{}", format_goal_table(goals, &summary));
        }

        GoalCommands::Add {
            name,
            target,
            current,
            description,
        } => {
            let goal = SavingsService::new(session).add(&name, target, current, &description, now)?;
            print!("Created {}", format_goal_details(&goal));
        }

        GoalCommands::Update { id, amount } => {
            let goal = SavingsService::new(session).update_current(id, amount, now)?;
            print!("Updated {}", format_goal_details(&goal));
        }

        GoalCommands::Delete { id } => {
            let goal = SavingsService::new(session).delete(id, now)?;
            println!("Deleted goal #{}: {}", goal.id, goal.name);
        }
    }

    Ok(())
}
