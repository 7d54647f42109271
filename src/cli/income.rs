//! Income CLI commands
//!
//! Shows and changes the recurring income the payment scheduler posts.

use chrono::{Datelike, NaiveDateTime};
use clap::Subcommand;

use crate::error::PaceResult;
use crate::models::frequency::weekday_name;
use crate::models::{Frequency, Money, PaymentDay, SessionState};
use crate::services::{days_until_next_payment, next_payment_date, IncomeService};

use super::parse_money_arg;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Show the income schedule
    Show,

    /// Change the income amount, frequency or payment day
    Update {
        /// New income amount
        #[arg(short, long, value_parser = parse_money_arg)]
        amount: Option<Money>,
        /// Monthly, Fortnightly or Weekly
        #[arg(short, long)]
        frequency: Option<Frequency>,
        /// Day of month (1-31) for monthly income, weekday otherwise
        #[arg(short, long)]
        payment_day: Option<PaymentDay>,
    },
}

/// Handle an income command
pub fn handle_income_command(
    session: &mut SessionState,
    cmd: IncomeCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        IncomeCommands::Show => print_income(session, now),

        IncomeCommands::Update {
            amount,
            frequency,
            payment_day,
        } => {
            if amount.is_none() && frequency.is_none() && payment_day.is_none() {
                println!("No changes specified. Use --amount, --frequency, or --payment-day.");
                return Ok(());
            }

            let profile = &session.profile;
            let amount = amount.unwrap_or(profile.income_amount);
            let frequency = frequency.unwrap_or(profile.income_frequency);
            let payment_day = payment_day.unwrap_or(profile.payment_day);

            IncomeService::new(session).update_income(amount, frequency, payment_day, now)?;
            println!("Income updated.");
            print_income(session, now);
        }
    }

    Ok(())
}

fn print_income(session: &SessionState, now: NaiveDateTime) {
    let profile = &session.profile;
    let today = now.date();
    let next = next_payment_date(profile.income_frequency, profile.payment_day, today);

    println!("{:<22} {}", "Income:", profile.income_amount);
    println!("{:<22} {}", "Frequency:", profile.income_frequency);
    println!("{:<22} {}", "Payment day:", profile.payment_day);
    println!(
        "{:<22} {}",
        "Monthly equivalent:",
        profile.monthly_income_equivalent()
    );
    println!(
        "{:<22} {} {} ({} days)",
        "Next payday:",
        weekday_name(next.weekday()),
        next,
        days_until_next_payment(profile, today)
    );
    println!("{:<22} {}", "Last income posted:", session.last_income_date);
}
