//! Spending Velocity Report
//!
//! Compares this week's spending so far with the same stretch of the
//! previous weeks: each prior week is cut off at the same weekday as today,
//! so a Wednesday is compared with earlier Monday-to-Wednesday windows.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use std::fmt;

use crate::models::calendar::{end_of_day, start_of_day, week_start};
use crate::models::frequency::weekday_name;
use crate::models::transaction::total_spend;
use crate::models::{Money, Transaction};
use crate::services::period::{transactions_between, transactions_in_current_week};

/// How the current pace compares with the past
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityPace {
    MuchSlower,
    Slower,
    OnPace,
    Faster,
    MuchFaster,
}

impl VelocityPace {
    /// Bucket a velocity percentage; each upper bound is inclusive
    pub fn from_percent(percent: f64) -> Self {
        if percent <= -20.0 {
            Self::MuchSlower
        } else if percent <= -5.0 {
            Self::Slower
        } else if percent <= 5.0 {
            Self::OnPace
        } else if percent <= 20.0 {
            Self::Faster
        } else {
            Self::MuchFaster
        }
    }

    /// One-line nudge shown under the numbers
    pub fn advice(&self) -> &'static str {
        match self {
            Self::MuchSlower => "Great job! You're spending much less than usual this week.",
            Self::Slower => "Nice! You're spending below your normal pace.",
            Self::OnPace => "On track: your spending pace is similar to recent weeks.",
            Self::Faster => "Notice: your spending is slightly above your normal pace.",
            Self::MuchFaster => {
                "Heads up! You're spending much faster than usual. Consider reviewing recent purchases."
            }
        }
    }
}

impl fmt::Display for VelocityPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MuchSlower => "much slower",
            Self::Slower => "slower",
            Self::OnPace => "on pace",
            Self::Faster => "faster",
            Self::MuchFaster => "much faster",
        };
        write!(f, "{}", label)
    }
}

/// Spend on one day of the current week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub spent: Money,
}

impl DailySpend {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Spending Velocity Report
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingVelocityReport {
    /// Moment the report was computed for
    pub as_of: NaiveDateTime,
    /// Expenses from Monday 00:00 through `as_of`
    pub current_week_spent: Money,
    /// Mean of the prior partial weeks that had any spending
    pub average_past_spent: Money,
    /// `(current - average) / average * 100`
    pub velocity_percent: f64,
    /// Number of prior weeks in the average
    pub weeks_compared: usize,
    pub pace: VelocityPace,
    /// Spend per day, Monday through today
    pub daily: Vec<DailySpend>,
}

impl SpendingVelocityReport {
    /// Compute velocity against up to `lookback_weeks` prior weeks
    ///
    /// Returns `None` when no prior week in range had any spending, which
    /// means there is not enough history yet. Prior weeks without spending
    /// are left out of the average rather than counted as zero.
    pub fn generate(log: &[Transaction], now: NaiveDateTime, lookback_weeks: u32) -> Option<Self> {
        let today = now.date();
        let monday = week_start(today);
        let offset = Duration::days(today.weekday().num_days_from_monday() as i64);

        let current_week_spent = total_spend(transactions_in_current_week(log, now));

        let past: Vec<Money> = (1..=lookback_weeks as i64)
            .map(|k| {
                let start = monday - Duration::weeks(k);
                total_spend(transactions_between(
                    log,
                    start_of_day(start),
                    end_of_day(start + offset),
                ))
            })
            .filter(|spent| spent.is_positive())
            .collect();

        if past.is_empty() {
            return None;
        }

        let total: Money = past.iter().sum();
        let average = total.as_f64() / past.len() as f64;
        if average == 0.0 {
            return None;
        }

        let velocity_percent = (current_week_spent.as_f64() - average) * 100.0 / average;

        Some(Self {
            as_of: now,
            current_week_spent,
            average_past_spent: Money::from_cents((average * 100.0).round() as i64),
            velocity_percent,
            weeks_compared: past.len(),
            pace: VelocityPace::from_percent(velocity_percent),
            daily: daily_breakdown(log, now),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let weekday = weekday_name(self.as_of.date().weekday());
        let mut output = String::new();

        output.push_str("Weekly Spending Velocity\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            format!("This week (Mon-{})", &weekday[..3]),
            self.current_week_spent
        ));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            format!("Avg past {} weeks", self.weeks_compared),
            self.average_past_spent
        ));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Spending pace",
            format!("{:+.0}% ({})", self.velocity_percent, self.pace)
        ));
        output.push('\n');
        output.push_str(self.pace.advice());
        output.push('\n');

        // The breakdown only says something once a few days have passed
        if self.daily.len() >= 3 {
            output.push_str("\nSpending by day this week:\n");
            for day in &self.daily {
                output.push_str(&format!(
                    "  {:<12} {:>12}\n",
                    weekday_name(day.weekday()),
                    day.spent
                ));
            }
        }

        output
    }
}

/// Spend per day from this Monday through today
pub fn daily_breakdown(log: &[Transaction], now: NaiveDateTime) -> Vec<DailySpend> {
    let week = transactions_in_current_week(log, now);
    let monday = week_start(now.date());
    let elapsed = now.date().weekday().num_days_from_monday() as i64;

    (0..=elapsed)
        .map(|d| monday + Duration::days(d))
        .map(|date| DailySpend {
            date,
            spent: total_spend(week.iter().copied().filter(|t| t.date() == date)),
        })
        .collect()
}
