//! Payment scheduler
//!
//! Computes the next payday and posts recurring income when it falls due.
//!
//! Rolling a monthly payday into the next month clamps a missing day to the
//! 28th. Fortnightly paydays add 14 days when the target weekday is today or
//! earlier in the week, and only 7 days otherwise, so consecutive fortnightly
//! paydays are not always 14 days apart.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::calendar::{add_months_clamped, days_in_month, days_until_weekday};
use crate::models::{Frequency, Money, PaymentDay, SessionState, Transaction, UserProfile};

/// The next payday on or after `today`
///
/// * Monthly: this month's payment day if it has not passed yet (today
///   counts), otherwise next month's, clamped to the 28th if missing.
/// * Weekly: the next occurrence of the weekday strictly after today.
/// * Fortnightly: the weekday search plus 14 days if the naive offset is
///   zero or negative, plus 7 otherwise.
///
/// A day-of-month payment day always follows the monthly rule and a weekday
/// always follows the weekly or fortnightly rule, whatever the frequency says.
pub fn next_payment_date(frequency: Frequency, payment_day: PaymentDay, today: NaiveDate) -> NaiveDate {
    match payment_day {
        PaymentDay::DayOfMonth(day) => next_monthly_payment(day, today),
        PaymentDay::Weekday(weekday) => {
            let naive = days_until_weekday(today.weekday(), weekday);
            let offset = match frequency {
                Frequency::Fortnightly if naive <= 0 => naive + 14,
                Frequency::Fortnightly => naive + 7,
                _ if naive <= 0 => naive + 7,
                _ => naive,
            };
            today + Duration::days(offset)
        }
    }
}

fn next_monthly_payment(payment_day: u32, today: NaiveDate) -> NaiveDate {
    let (year, month) = (today.year(), today.month());
    let last_day = days_in_month(year, month);

    if today.day() <= payment_day {
        // Same month: a day past the month's end lands on its last day
        let day = payment_day.min(last_day);
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
    } else {
        // today.day() > payment_day, so the anchor exists in this month
        let anchor = NaiveDate::from_ymd_opt(year, month, payment_day).unwrap_or(today);
        add_months_clamped(anchor, 1)
    }
}

/// The first payday strictly after the last day income was posted
///
/// This is what the income check compares today against, so a payday is
/// never posted twice and weekday paydays can actually come due.
pub fn next_due_after(profile: &UserProfile, last_income_date: NaiveDate) -> NaiveDate {
    let reference = match profile.payment_day {
        PaymentDay::DayOfMonth(_) => last_income_date + Duration::days(1),
        PaymentDay::Weekday(_) => last_income_date,
    };
    next_payment_date(profile.income_frequency, profile.payment_day, reference)
}

/// Whole days from `today` until the next payday
pub fn days_until_next_payment(profile: &UserProfile, today: NaiveDate) -> i64 {
    let next = next_payment_date(profile.income_frequency, profile.payment_day, today);
    (next - today).num_days()
}

/// Service for income scheduling and income settings
pub struct IncomeService<'a> {
    session: &'a mut SessionState,
}

impl<'a> IncomeService<'a> {
    pub fn new(session: &'a mut SessionState) -> Self {
        Self { session }
    }

    /// Post income if a payday has come due
    ///
    /// Fires at most once per calendar day: when today has reached the next
    /// payday after the last posting and nothing was posted today yet.
    pub fn apply_due_income(&mut self, now: NaiveDateTime) -> Option<Transaction> {
        let today = now.date();
        let last = self.session.last_income_date;
        let due = next_due_after(&self.session.profile, last);

        if today < due || last >= today {
            return None;
        }

        let profile = &mut self.session.profile;
        let txn = Transaction::income(now, profile.income_amount, profile.income_frequency);
        profile.current_balance -= txn.amount;

        self.session.last_income_date = today;
        self.session.transactions.push(txn.clone());
        self.session.queue_audit(AuditEntry::create(
            now,
            EntityType::Transaction,
            txn.id.short(),
            Some(txn.description.clone()),
            &txn,
        ));

        Some(txn)
    }

    /// Replace the income amount, frequency and payment day
    pub fn update_income(
        &mut self,
        amount: Money,
        frequency: Frequency,
        payment_day: PaymentDay,
        now: NaiveDateTime,
    ) -> PaceResult<()> {
        if !amount.is_positive() {
            return Err(PaceError::Validation(
                "Income amount must be greater than zero".into(),
            ));
        }
        payment_day
            .validate_for(frequency)
            .map_err(PaceError::Validation)?;

        let profile = &mut self.session.profile;
        let before = income_snapshot(profile);
        profile.income_amount = amount;
        profile.income_frequency = frequency;
        profile.payment_day = payment_day;
        let after = income_snapshot(profile);

        if before != after {
            self.session.queue_audit(AuditEntry::update(
                now,
                EntityType::Income,
                "income",
                Some(format!("{} income", frequency)),
                &before,
                &after,
            ));
        }

        Ok(())
    }
}

fn income_snapshot(profile: &UserProfile) -> serde_json::Value {
    json!({
        "income_amount": profile.income_amount,
        "income_frequency": profile.income_frequency,
        "payment_day": profile.payment_day,
    })
}
