//! Category Trend Report
//!
//! Compares each category's spending in the current period with its own
//! recent history. Weekly categories compare this week so far with full
//! prior Monday-to-Sunday weeks; monthly categories compare the open budget
//! month with prior budget months. Periods without spending are left out of
//! the history.

use chrono::NaiveDateTime;
use std::fmt;

use crate::config::AnalyticsSettings;
use crate::models::transaction::total_spend;
use crate::models::{BudgetCategory, BudgetFrequency, IsoWeek, Money, SessionState, Transaction};
use crate::services::period::{
    transactions_in_current_week, transactions_in_month, transactions_in_week,
};

/// Direction of a category's spending relative to its history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendStatus {
    /// No prior period had any spending
    NoData,
    /// Spending where the history averages zero
    NewSpending,
    MuchHigher,
    Higher,
    Stable,
    Lower,
    MuchLower,
}

impl TrendStatus {
    /// Bucket a percent change; each lower bound is inclusive
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 25.0 {
            Self::MuchHigher
        } else if percent >= 10.0 {
            Self::Higher
        } else if percent >= -10.0 {
            Self::Stable
        } else if percent >= -25.0 {
            Self::Lower
        } else {
            Self::MuchLower
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::MuchHigher => "^^",
            Self::Higher | Self::NewSpending => "^",
            Self::Stable | Self::NoData => "->",
            Self::Lower => "v",
            Self::MuchLower => "vv",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoData => "No data",
            Self::NewSpending => "New spending",
            Self::MuchHigher => "Much higher",
            Self::Higher => "Higher",
            Self::Stable => "Stable",
            Self::Lower => "Lower",
            Self::MuchLower => "Much lower",
        };
        write!(f, "{}", label)
    }
}

/// Trend for a single category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrend {
    pub name: String,
    /// Cadence of the comparison, taken from the category
    pub cadence: BudgetFrequency,
    /// Spend in the current week or budget month
    pub current: Money,
    /// Prior periods with spending, most recent first
    pub history: Vec<Money>,
    pub status: TrendStatus,
    /// Percent change against the history average; `None` without history
    pub percent_change: Option<f64>,
}

impl CategoryTrend {
    /// Average of the non-empty prior periods
    pub fn average(&self) -> Option<Money> {
        if self.history.is_empty() {
            return None;
        }
        let total: Money = self.history.iter().sum();
        Some(Money::from_cents(
            (total.cents() as f64 / self.history.len() as f64).round() as i64,
        ))
    }
}

/// Classify current spend against a history of non-empty periods
pub fn classify(current: Money, history: &[Money]) -> (TrendStatus, Option<f64>) {
    if history.is_empty() {
        return (TrendStatus::NoData, None);
    }

    let total: Money = history.iter().sum();
    let average = total.as_f64() / history.len() as f64;

    if average == 0.0 {
        return if current.is_positive() {
            (TrendStatus::NewSpending, Some(100.0))
        } else {
            (TrendStatus::Stable, Some(0.0))
        };
    }

    let percent = (current.as_f64() - average) * 100.0 / average;
    (TrendStatus::from_percent(percent), Some(percent))
}

/// Category Trend Report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrendReport {
    pub as_of: NaiveDateTime,
    pub trends: Vec<CategoryTrend>,
}

impl CategoryTrendReport {
    /// Trends for every category, in profile order
    ///
    /// With fewer than two transactions in the log there is nothing to
    /// compare and the report is empty.
    pub fn generate(
        session: &SessionState,
        now: NaiveDateTime,
        lookback: &AnalyticsSettings,
    ) -> Self {
        let trends = if session.transactions.len() < 2 {
            Vec::new()
        } else {
            session
                .profile
                .categories
                .iter()
                .map(|c| category_trend(session, c, now, lookback))
                .collect()
        };

        Self { as_of: now, trends }
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    /// Look up one category's trend
    pub fn get(&self, name: &str) -> Option<&CategoryTrend> {
        self.trends.iter().find(|t| t.name == name)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Category Trends\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.trends.is_empty() {
            output.push_str("Not enough transactions to show trends yet.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:<8} {:>12} {:>12} {:>10}\n",
            "Category", "Period", "Current", "Average", "Change"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for trend in &self.trends {
            let average = trend
                .average()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string());
            let change = trend
                .percent_change
                .map(|p| format!("{:+.0}%", p))
                .unwrap_or_else(|| "-".to_string());
            let period = match trend.cadence {
                BudgetFrequency::Weekly => "week",
                BudgetFrequency::Monthly => "month",
            };

            output.push_str(&format!(
                "{:<24} {:<8} {:>12} {:>12} {:>10}  {} {}\n",
                trend.name,
                period,
                trend.current,
                average,
                change,
                trend.status.arrow(),
                trend.status
            ));
        }

        output
    }
}

fn category_trend(
    session: &SessionState,
    category: &BudgetCategory,
    now: NaiveDateTime,
    lookback: &AnalyticsSettings,
) -> CategoryTrend {
    let log = &session.transactions;
    let in_category = |t: &&Transaction| t.category == category.name;

    let (current, history) = match category.frequency {
        BudgetFrequency::Weekly => {
            let this_week = IsoWeek::of(now.date());
            let current = total_spend(
                transactions_in_current_week(log, now)
                    .into_iter()
                    .filter(in_category),
            );
            let history = (1..=lookback.trend_lookback_weeks)
                .map(|k| {
                    total_spend(
                        transactions_in_week(log, this_week.back(k))
                            .into_iter()
                            .filter(in_category),
                    )
                })
                .collect::<Vec<_>>();
            (current, history)
        }
        BudgetFrequency::Monthly => {
            let month = session.current_month();
            let reset_day = session.reset_day();
            let current = total_spend(
                transactions_in_month(log, month, reset_day)
                    .into_iter()
                    .filter(in_category),
            );
            let history = (1..=lookback.trend_lookback_months)
                .map(|k| {
                    total_spend(
                        transactions_in_month(log, month.back(k), reset_day)
                            .into_iter()
                            .filter(in_category),
                    )
                })
                .collect::<Vec<_>>();
            (current, history)
        }
    };

    let history: Vec<Money> = history.into_iter().filter(|m| m.is_positive()).collect();
    let (status, percent_change) = classify(current, &history);

    CategoryTrend {
        name: category.name.clone(),
        cadence: category.frequency,
        current,
        history,
        status,
        percent_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, PaymentDay, UserProfile};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn expense(ts: NaiveDateTime, category: &str, dollars: i64) -> Transaction {
        Transaction::expense(ts, category, Money::from_dollars(dollars), "", Frequency::Monthly)
    }

    fn session(now: NaiveDateTime, log: Vec<Transaction>) -> SessionState {
        let profile = UserProfile {
            current_balance: Money::from_dollars(500),
            income_amount: Money::from_dollars(2000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(1),
            monthly_reset_day: 1,
            setup_date: at(2024, 10, 1, 9),
            categories: vec![
                BudgetCategory::new("Utilities", Money::from_dollars(80), BudgetFrequency::Monthly),
                BudgetCategory::new("Coffee", Money::from_dollars(20), BudgetFrequency::Weekly),
            ],
        };
        let mut s = SessionState::new(profile, now);
        s.transactions = log;
        s
    }

    #[test]
    fn test_monthly_trend_excludes_empty_months() {
        // Open month January 2025; prior months Dec 50, Nov 60, Oct nothing
        let now = at(2025, 1, 15, 12);
        let s = session(
            now,
            vec![
                expense(at(2024, 12, 3, 9), "Utilities", 50),
                expense(at(2024, 11, 20, 9), "Utilities", 60),
            ],
        );

        let report = CategoryTrendReport::generate(&s, now, &AnalyticsSettings::default());
        let trend = report.get("Utilities").unwrap();

        assert_eq!(trend.current, Money::zero());
        assert_eq!(trend.history, vec![Money::from_dollars(50), Money::from_dollars(60)]);
        assert_eq!(trend.average(), Some(Money::from_dollars(55)));
        assert_eq!(trend.percent_change, Some(-100.0));
        assert_eq!(trend.status, TrendStatus::MuchLower);
    }

    #[test]
    fn test_weekly_trend_uses_full_prior_weeks() {
        // Wednesday 2025-01-15; last week's Sunday spend still counts
        let now = at(2025, 1, 15, 12);
        let s = session(
            now,
            vec![
                expense(at(2025, 1, 12, 21), "Coffee", 10),
                expense(at(2025, 1, 5, 9), "Coffee", 10),
                expense(at(2025, 1, 14, 9), "Coffee", 11),
            ],
        );

        let report = CategoryTrendReport::generate(&s, now, &AnalyticsSettings::default());
        let trend = report.get("Coffee").unwrap();
        assert_eq!(trend.history.len(), 2);
        assert_eq!(trend.current, Money::from_dollars(11));
        assert_eq!(trend.status, TrendStatus::Higher);
    }

    #[test]
    fn test_no_history_is_no_data() {
        let now = at(2025, 1, 15, 12);
        let s = session(
            now,
            vec![
                expense(at(2025, 1, 14, 9), "Coffee", 3),
                expense(at(2025, 1, 14, 10), "Coffee", 3),
            ],
        );
        let report = CategoryTrendReport::generate(&s, now, &AnalyticsSettings::default());
        assert_eq!(report.get("Coffee").unwrap().status, TrendStatus::NoData);
        assert_eq!(report.get("Utilities").unwrap().percent_change, None);
    }

    #[test]
    fn test_fewer_than_two_transactions_is_empty() {
        let now = at(2025, 1, 15, 12);
        let s = session(now, vec![expense(at(2024, 12, 3, 9), "Utilities", 50)]);
        let report = CategoryTrendReport::generate(&s, now, &AnalyticsSettings::default());
        assert!(report.is_empty());
        assert!(report.format_terminal().contains("Not enough transactions"));
    }

    #[test]
    fn test_classify_edges() {
        let hundred = [Money::from_dollars(100)];
        assert_eq!(classify(Money::from_dollars(125), &hundred).0, TrendStatus::MuchHigher);
        assert_eq!(classify(Money::from_dollars(110), &hundred).0, TrendStatus::Higher);
        assert_eq!(classify(Money::from_dollars(90), &hundred).0, TrendStatus::Stable);
        assert_eq!(classify(Money::from_dollars(89), &hundred).0, TrendStatus::Lower);
        assert_eq!(classify(Money::from_dollars(75), &hundred).0, TrendStatus::Lower);
        assert_eq!(classify(Money::from_dollars(74), &hundred).0, TrendStatus::MuchLower);

        assert_eq!(classify(Money::from_dollars(5), &[Money::zero()]), (TrendStatus::NewSpending, Some(100.0)));
        assert_eq!(classify(Money::zero(), &[Money::zero()]), (TrendStatus::Stable, Some(0.0)));
        assert_eq!(classify(Money::from_dollars(5), &[]), (TrendStatus::NoData, None));
    }
}
