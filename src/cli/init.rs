//! `pace init`: first-run setup from command-line answers

use chrono::NaiveDateTime;
use clap::Args;

use crate::config::settings::Settings;
use crate::error::{PaceError, PaceResult};
use crate::models::{Frequency, Money, PaymentDay};
use crate::services::{create_session, parse_category_definition, SetupInput};
use crate::storage::Storage;

use super::parse_money_arg;

/// Arguments for `pace init`
#[derive(Args)]
pub struct InitArgs {
    /// Current cash balance
    #[arg(short, long, value_parser = parse_money_arg)]
    pub balance: Money,

    /// Income per payment
    #[arg(short, long, value_parser = parse_money_arg)]
    pub income: Money,

    /// Monthly, Fortnightly or Weekly
    #[arg(short, long, default_value = "Monthly")]
    pub frequency: Frequency,

    /// Day of month (1-31) for monthly income, weekday otherwise
    #[arg(short, long)]
    pub payment_day: PaymentDay,

    /// Day of the month budget months start on (1-28)
    #[arg(short, long, default_value = "1")]
    pub reset_day: u32,

    /// Category budget as Name:amount or Name:amount:Weekly (repeatable)
    #[arg(short, long = "category", required = true)]
    pub categories: Vec<String>,

    /// Replace an existing budget
    #[arg(long)]
    pub force: bool,
}

/// Handle the init command
pub fn handle_init_command(
    storage: &Storage,
    settings: &Settings,
    args: InitArgs,
    now: NaiveDateTime,
) -> PaceResult<()> {
    if storage.is_initialized() && !args.force {
        return Err(PaceError::Validation(
            "A budget already exists. Use --force to start over.".into(),
        ));
    }

    let categories = args
        .categories
        .iter()
        .map(|definition| parse_category_definition(definition))
        .collect::<PaceResult<Vec<_>>>()?;

    let input = SetupInput {
        starting_balance: args.balance,
        income_amount: args.income,
        income_frequency: args.frequency,
        payment_day: args.payment_day,
        monthly_reset_day: args.reset_day,
        categories,
    };

    let mut session = create_session(input, now)?;
    storage.commit(&mut session)?;
    settings.save(storage.paths())?;

    println!(
        "Initialized budget-pace at: {}",
        storage.paths().data_dir().display()
    );
    println!();
    println!(
        "Tracking {} from {} to {}.",
        session.current_month().friendly(),
        session.current_month().start_date(session.reset_day()),
        session.current_month().end_date(session.reset_day())
    );
    println!(
        "{} categories, {} budgeted per month.",
        session.profile.categories.len(),
        session.profile.total_monthly_budget()
    );
    println!();
    println!("Run 'pace expense add <category> <amount>' to record spending.");

    Ok(())
}
