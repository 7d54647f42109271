//! Category CLI commands
//!
//! Implements CLI commands for category budget management.

use chrono::NaiveDateTime;
use clap::Subcommand;

use crate::display::{format_category_details, format_category_table};
use crate::error::PaceResult;
use crate::models::{BudgetFrequency, Money, SessionState};
use crate::services::{CategoryEdit, CategoryService};

use super::parse_money_arg;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their monthly equivalents
    List,

    /// Add a category budget
    Add {
        /// Category name
        name: String,
        /// Budget amount (e.g., "400" or "400.00")
        #[arg(value_parser = parse_money_arg)]
        budget: Money,
        /// Monthly or Weekly
        #[arg(short, long, default_value = "Monthly")]
        frequency: BudgetFrequency,
    },

    /// Edit a category
    Edit {
        /// Category name
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New budget amount
        #[arg(short, long, value_parser = parse_money_arg)]
        budget: Option<Money>,
        /// New frequency (Monthly or Weekly)
        #[arg(short, long)]
        frequency: Option<BudgetFrequency>,
    },

    /// Remove a category; logged transactions keep its name
    Remove {
        /// Category name
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    session: &mut SessionState,
    cmd: CategoryCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_table(&session.profile.categories));
        }

        CategoryCommands::Add {
            name,
            budget,
            frequency,
        } => {
            let category = CategoryService::new(session).add(&name, budget, frequency, now)?;
            print!("Created category: {}", format_category_details(&category));
        }

        CategoryCommands::Edit {
            category,
            name,
            budget,
            frequency,
        } => {
            if name.is_none() && budget.is_none() && frequency.is_none() {
                println!("No changes specified. Use --name, --budget, or --frequency.");
                return Ok(());
            }

            let edit = CategoryEdit {
                name,
                budget,
                frequency,
            };
            let updated = CategoryService::new(session).edit(&category, edit, now)?;
            print!("Updated category: {}", format_category_details(&updated));
        }

        CategoryCommands::Remove { category } => {
            let removed = CategoryService::new(session).remove(&category, now)?;
            println!("Removed category: {}", removed.name);
        }
    }

    Ok(())
}
