//! Session status formatting
//!
//! The at-a-glance summary printed by `pace status`: balance, income
//! schedule and the budget period currently being tracked.

use chrono::{Datelike, NaiveDateTime};

use crate::models::frequency::weekday_name;
use crate::models::{IsoWeek, SessionState};
use crate::services::{days_until_next_payment, next_payment_date};

/// Format the status summary for a moment in time
pub fn format_status(session: &SessionState, now: NaiveDateTime) -> String {
    let profile = &session.profile;
    let today = now.date();
    let next_payday = next_payment_date(profile.income_frequency, profile.payment_day, today);
    let days = days_until_next_payment(profile, today);

    let mut output = String::new();
    output.push_str(&format!("{:<20} {}\n", "Balance:", profile.current_balance));
    output.push_str(&format!(
        "{:<20} {} {} (paid on {})\n",
        "Income:", profile.income_amount, profile.income_frequency, profile.payment_day
    ));

    let when = match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    output.push_str(&format!(
        "{:<20} {} {} ({})\n",
        "Next payday:",
        weekday_name(next_payday.weekday()),
        next_payday,
        when
    ));

    let month = session.current_month();
    let reset_day = session.reset_day();
    output.push_str(&format!(
        "{:<20} {} ({} to {})\n",
        "Budget month:",
        month.friendly(),
        month.start_date(reset_day),
        month.end_date(reset_day)
    ));

    let week = IsoWeek::of(today);
    output.push_str(&format!(
        "{:<20} {} ({} to {})\n",
        "Week:",
        week,
        week.start_date(),
        week.end_date()
    ));
    output.push_str(&format!(
        "{:<20} {} categories, {} transactions, {} savings goals\n",
        "Tracking:",
        profile.categories.len(),
        session.transactions.len(),
        session.savings_goals.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, BudgetFrequency, Frequency, Money, PaymentDay, UserProfile};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_status_summary() {
        let profile = UserProfile {
            current_balance: Money::from_dollars(1500),
            income_amount: Money::from_dollars(3000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(15),
            monthly_reset_day: 1,
            setup_date: at(2025, 1, 1),
            categories: vec![BudgetCategory::new(
                "Rent",
                Money::from_dollars(1000),
                BudgetFrequency::Monthly,
            )],
        };
        let session = SessionState::new(profile, at(2025, 1, 10));
        let text = format_status(&session, at(2025, 1, 10));

        assert!(text.contains("$1500.00"));
        assert!(text.contains("Wednesday 2025-01-15 (in 5 days)"));
        assert!(text.contains("January 2025 (2025-01-01 to 2025-01-31)"));
        assert!(text.contains("1 categories, 0 transactions, 0 savings goals"));
    }
}
