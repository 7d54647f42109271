//! Budget period manager
//!
//! Owns the open budget month pointer and answers period-scoped questions
//! about the transaction log. The queries are pure functions over a slice of
//! transactions; only the rollover check and the reset-day setter mutate the
//! session.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde_json::json;
use std::collections::BTreeSet;
use std::fmt;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::calendar::{end_of_day, start_of_day, week_start};
use crate::models::profile::validate_reset_day;
use crate::models::{IsoWeek, MonthKey, SessionState, Transaction};

/// Something the period check wants the user to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSignal {
    /// The open budget month changed; `from` is now archived
    MonthAdvanced { from: MonthKey, to: MonthKey },
    /// A new Monday-to-Sunday week started (informational)
    WeekAdvanced { week: IsoWeek },
}

impl fmt::Display for PeriodSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthAdvanced { from, to } => write!(
                f,
                "New budget month started: tracking {}. {} is archived and read-only.",
                to.friendly(),
                from.friendly()
            ),
            Self::WeekAdvanced { week } => write!(
                f,
                "New week started ({}): weekly budgets have reset.",
                week
            ),
        }
    }
}

/// Service for the budget month pointer
pub struct PeriodService<'a> {
    session: &'a mut SessionState,
}

impl<'a> PeriodService<'a> {
    pub fn new(session: &'a mut SessionState) -> Self {
        Self { session }
    }

    /// Advance the open month if `now` belongs to a different budget month,
    /// and note when a new week has started
    pub fn check_rollover(&mut self, now: NaiveDateTime) -> Vec<PeriodSignal> {
        let today = now.date();
        let mut signals = Vec::new();

        let effective = MonthKey::effective(today, self.session.reset_day());
        let current = self.session.period.current_month;
        if effective != current {
            self.session.period.current_month = effective;
            self.session.queue_audit(
                AuditEntry::create(
                    now,
                    EntityType::Period,
                    effective.to_string(),
                    Some(effective.friendly()),
                    &json!({ "from": current, "to": effective }),
                )
                .with_summary(format!("current_month: {} -> {}", current, effective)),
            );
            signals.push(PeriodSignal::MonthAdvanced {
                from: current,
                to: effective,
            });
        }

        let last_check = self.session.period.last_reset_check;
        if today.weekday() == Weekday::Mon && last_check.weekday() != Weekday::Mon {
            signals.push(PeriodSignal::WeekAdvanced {
                week: IsoWeek::of(today),
            });
        }

        self.session.period.last_reset_check = today;
        signals
    }

    /// Change the day budget months start on, then re-run the month check
    pub fn set_reset_day(&mut self, day: u32, now: NaiveDateTime) -> PaceResult<Vec<PeriodSignal>> {
        validate_reset_day(day).map_err(|e| PaceError::Validation(e.to_string()))?;

        let before = self.session.profile.monthly_reset_day;
        if before == day {
            return Ok(Vec::new());
        }

        self.session.profile.monthly_reset_day = day;
        self.session.queue_audit(AuditEntry::update(
            now,
            EntityType::Period,
            "monthly_reset_day",
            None,
            &json!({ "monthly_reset_day": before }),
            &json!({ "monthly_reset_day": day }),
        ));

        Ok(self
            .check_rollover(now)
            .into_iter()
            .filter(|s| matches!(s, PeriodSignal::MonthAdvanced { .. }))
            .collect())
    }
}

/// Transactions belonging to a budget month
pub fn transactions_in_month(
    log: &[Transaction],
    month: MonthKey,
    reset_day: u32,
) -> Vec<&Transaction> {
    log.iter()
        .filter(|t| t.budget_month(reset_day) == month)
        .collect()
}

/// Transactions from this Monday 00:00 up to and including `now`
pub fn transactions_in_current_week(log: &[Transaction], now: NaiveDateTime) -> Vec<&Transaction> {
    let start = start_of_day(week_start(now.date()));
    transactions_between(log, start, now)
}

/// Transactions in one full Monday-to-Sunday week
pub fn transactions_in_week(log: &[Transaction], week: IsoWeek) -> Vec<&Transaction> {
    transactions_between(
        log,
        start_of_day(week.start_date()),
        end_of_day(week.end_date()),
    )
}

/// Transactions with `start <= timestamp <= end`
pub fn transactions_between(
    log: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&Transaction> {
    log.iter()
        .filter(|t| t.timestamp >= start && t.timestamp <= end)
        .collect()
}

/// Every budget month present in the log plus the open one, newest first
pub fn available_months(log: &[Transaction], current: MonthKey, reset_day: u32) -> Vec<MonthKey> {
    let mut months: BTreeSet<MonthKey> = log.iter().map(|t| t.budget_month(reset_day)).collect();
    months.insert(current);
    months.into_iter().rev().collect()
}

/// Whether a transaction sits in an archived (read-only) month
pub fn is_archived(session: &SessionState, txn: &Transaction) -> bool {
    txn.budget_month(session.reset_day()) != session.current_month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetCategory, BudgetFrequency, Frequency, Money, PaymentDay, UserProfile,
    };
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn key(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn session(reset_day: u32, setup: NaiveDateTime) -> SessionState {
        let profile = UserProfile {
            current_balance: Money::from_dollars(100),
            income_amount: Money::from_dollars(1000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(1),
            monthly_reset_day: reset_day,
            setup_date: setup,
            categories: vec![BudgetCategory::new(
                "Rent",
                Money::from_dollars(500),
                BudgetFrequency::Monthly,
            )],
        };
        SessionState::new(profile, setup)
    }

    fn expense(ts: NaiveDateTime, amount: i64) -> Transaction {
        Transaction::expense(ts, "Rent", Money::from_dollars(amount), "", Frequency::Monthly)
    }

    #[test]
    fn test_month_advances_on_reset_day() {
        let mut s = session(15, at(2025, 3, 10, 9, 0));
        assert_eq!(s.current_month(), key(2025, 2));

        let signals = PeriodService::new(&mut s).check_rollover(at(2025, 3, 14, 9, 0));
        assert!(signals.is_empty());

        let signals = PeriodService::new(&mut s).check_rollover(at(2025, 3, 15, 0, 1));
        assert_eq!(
            signals,
            vec![PeriodSignal::MonthAdvanced {
                from: key(2025, 2),
                to: key(2025, 3)
            }]
        );
        assert_eq!(s.current_month(), key(2025, 3));
        assert_eq!(s.pending_audit().len(), 1);
    }

    #[test]
    fn test_month_advances_across_year_end() {
        let mut s = session(1, at(2024, 12, 30, 9, 0));
        let signals = PeriodService::new(&mut s).check_rollover(at(2025, 1, 2, 9, 0));
        assert!(signals.contains(&PeriodSignal::MonthAdvanced {
            from: key(2024, 12),
            to: key(2025, 1)
        }));
    }

    #[test]
    fn test_week_signal_only_when_last_check_was_not_monday() {
        // 2025-01-05 is a Sunday, 2025-01-06 a Monday
        let mut s = session(1, at(2025, 1, 5, 9, 0));
        let signals = PeriodService::new(&mut s).check_rollover(at(2025, 1, 6, 8, 0));
        assert_eq!(
            signals,
            vec![PeriodSignal::WeekAdvanced {
                week: IsoWeek::of(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
            }]
        );

        let signals = PeriodService::new(&mut s).check_rollover(at(2025, 1, 6, 18, 0));
        assert!(signals.is_empty());
        assert_eq!(
            s.period.last_reset_check,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_set_reset_day_moves_open_month() {
        let mut s = session(1, at(2025, 3, 10, 9, 0));
        let signals = PeriodService::new(&mut s)
            .set_reset_day(15, at(2025, 3, 10, 9, 5))
            .unwrap();
        assert_eq!(s.profile.monthly_reset_day, 15);
        assert_eq!(s.current_month(), key(2025, 2));
        assert_eq!(signals.len(), 1);

        let err = PeriodService::new(&mut s)
            .set_reset_day(29, at(2025, 3, 10, 9, 5))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_transactions_in_month_respects_reset_day() {
        let log = vec![
            expense(at(2025, 3, 14, 12, 0), 10),
            expense(at(2025, 3, 15, 12, 0), 20),
            expense(at(2025, 2, 20, 12, 0), 30),
        ];
        let feb = transactions_in_month(&log, key(2025, 2), 15);
        assert_eq!(feb.len(), 2);
        let mar = transactions_in_month(&log, key(2025, 3), 15);
        assert_eq!(mar.len(), 1);
        assert_eq!(mar[0].amount, Money::from_dollars(20));
    }

    #[test]
    fn test_current_week_window_is_monday_to_now() {
        let log = vec![
            expense(at(2025, 1, 5, 23, 59), 1), // Sunday before
            expense(at(2025, 1, 6, 0, 0), 2),   // Monday midnight
            expense(at(2025, 1, 8, 10, 0), 4),  // Wednesday, before now
            expense(at(2025, 1, 8, 15, 0), 8),  // Wednesday, after now
        ];
        let week = transactions_in_current_week(&log, at(2025, 1, 8, 12, 0));
        let total: Money = week.iter().map(|t| t.amount).sum();
        assert_eq!(total, Money::from_dollars(6));
    }

    #[test]
    fn test_full_week_window() {
        let log = vec![
            expense(at(2024, 12, 30, 0, 0), 1),
            expense(at(2025, 1, 5, 23, 59), 2),
            expense(at(2025, 1, 6, 0, 0), 4),
        ];
        let week = IsoWeek::of(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(transactions_in_week(&log, week).len(), 2);
    }

    #[test]
    fn test_available_months_descending_with_current() {
        let log = vec![
            expense(at(2024, 11, 3, 9, 0), 1),
            expense(at(2025, 1, 3, 9, 0), 1),
            expense(at(2024, 11, 20, 9, 0), 1),
        ];
        let months = available_months(&log, key(2025, 2), 1);
        assert_eq!(months, vec![key(2025, 2), key(2025, 1), key(2024, 11)]);
    }

    #[test]
    fn test_is_archived() {
        let s = session(1, at(2025, 2, 10, 9, 0));
        assert!(is_archived(&s, &expense(at(2025, 1, 31, 9, 0), 1)));
        assert!(!is_archived(&s, &expense(at(2025, 2, 1, 9, 0), 1)));
    }
}
