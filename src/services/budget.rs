//! Category budget tracker
//!
//! Compares spending against each category's budget for a selected budget
//! month. While the open month is selected, weekly categories are tracked
//! against the current Monday-to-now window; an archived month has no
//! current week, so weekly budgets are scaled to a monthly equivalent and
//! compared with the whole month.

use chrono::NaiveDateTime;
use std::fmt;

use crate::models::frequency::WEEKS_PER_MONTH;
use crate::models::{
    BudgetCategory, BudgetFrequency, IsoWeek, Money, MonthKey, SessionState, Transaction,
};

use super::period::{transactions_in_current_week, transactions_in_month};

/// The window a category's spending was measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingWindow {
    /// Monday 00:00 of this week up to now
    CurrentWeek(IsoWeek),
    /// The whole selected budget month
    FullMonth(MonthKey),
}

impl fmt::Display for TrackingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentWeek(week) => write!(f, "week {}", week),
            Self::FullMonth(month) => write!(f, "{}", month),
        }
    }
}

/// Budget-versus-actual for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStatus {
    /// Category name
    pub name: String,
    /// Budgeting frequency of the category
    pub frequency: BudgetFrequency,
    /// Budget the spend is compared against (scaled for archived weekly rows)
    pub budget: Money,
    /// Expense total inside the window
    pub spent: Money,
    /// `budget - spent`; negative when over budget
    pub remaining: Money,
    /// Window the spend was measured over
    pub window: TrackingWindow,
    /// Number of expenses inside the window
    pub transaction_count: usize,
}

impl CategoryStatus {
    /// Fraction of the budget used, capped at 1.0
    pub fn progress(&self) -> f64 {
        if !self.budget.is_positive() {
            return 0.0;
        }
        (self.spent.as_f64() / self.budget.as_f64()).min(1.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// True when a weekly budget was scaled to cover a full archived month
    pub fn is_month_equivalent(&self) -> bool {
        self.frequency == BudgetFrequency::Weekly
            && matches!(self.window, TrackingWindow::FullMonth(_))
    }
}

/// Read-only view over a session for budget-versus-actual questions
pub struct BudgetService<'a> {
    session: &'a SessionState,
}

impl<'a> BudgetService<'a> {
    pub fn new(session: &'a SessionState) -> Self {
        Self { session }
    }

    /// Whether `month` is a closed, read-only month
    pub fn is_archived_month(&self, month: MonthKey) -> bool {
        month != self.session.current_month()
    }

    /// Status of one category for the selected month
    pub fn category_status(
        &self,
        category: &BudgetCategory,
        month: MonthKey,
        now: NaiveDateTime,
    ) -> CategoryStatus {
        let log = &self.session.transactions;

        let (window, candidates, budget) = match category.frequency {
            BudgetFrequency::Weekly if !self.is_archived_month(month) => (
                TrackingWindow::CurrentWeek(IsoWeek::of(now.date())),
                transactions_in_current_week(log, now),
                category.budget,
            ),
            BudgetFrequency::Weekly => (
                TrackingWindow::FullMonth(month),
                transactions_in_month(log, month, self.session.reset_day()),
                category.budget.scale(WEEKS_PER_MONTH),
            ),
            BudgetFrequency::Monthly => (
                TrackingWindow::FullMonth(month),
                transactions_in_month(log, month, self.session.reset_day()),
                category.budget,
            ),
        };

        let matching: Vec<&Transaction> = candidates
            .into_iter()
            .filter(|t| t.is_expense() && t.category == category.name)
            .collect();
        let spent: Money = matching.iter().map(|t| t.amount).sum();

        CategoryStatus {
            name: category.name.clone(),
            frequency: category.frequency,
            budget,
            spent,
            remaining: budget - spent,
            window,
            transaction_count: matching.len(),
        }
    }

    /// Status of every category, in profile order
    pub fn all_statuses(&self, month: MonthKey, now: NaiveDateTime) -> Vec<CategoryStatus> {
        self.session
            .profile
            .categories
            .iter()
            .map(|c| self.category_status(c, month, now))
            .collect()
    }

    /// Expenses recorded against the unbudgeted bucket in a month
    pub fn unbudgeted_spent(&self, month: MonthKey) -> Money {
        self.month_expenses(month)
            .filter(|t| t.is_unbudgeted())
            .map(|t| t.amount)
            .sum()
    }

    /// Expenses in a month that carry a category label
    pub fn budgeted_spent(&self, month: MonthKey) -> Money {
        self.month_expenses(month)
            .filter(|t| !t.is_unbudgeted())
            .map(|t| t.amount)
            .sum()
    }

    fn month_expenses(&self, month: MonthKey) -> impl Iterator<Item = &'a Transaction> + 'a {
        let session: &'a SessionState = self.session;
        transactions_in_month(&session.transactions, month, session.reset_day())
            .into_iter()
            .filter(|t| t.is_expense())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, PaymentDay, UserProfile, UNBUDGETED_CATEGORY};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn key(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn expense(ts: NaiveDateTime, category: &str, dollars: i64) -> Transaction {
        Transaction::expense(ts, category, Money::from_dollars(dollars), "", Frequency::Monthly)
    }

    // Open month is January 2025; "now" is Wednesday 2025-01-15
    fn session() -> SessionState {
        let profile = UserProfile {
            current_balance: Money::from_dollars(1000),
            income_amount: Money::from_dollars(3000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(1),
            monthly_reset_day: 1,
            setup_date: at(2024, 12, 1, 9),
            categories: vec![
                BudgetCategory::new("Rent", Money::from_dollars(1200), BudgetFrequency::Monthly),
                BudgetCategory::new("Groceries", Money::from_dollars(100), BudgetFrequency::Weekly),
            ],
        };
        let mut s = SessionState::new(profile, at(2025, 1, 15, 9));
        s.transactions = vec![
            expense(at(2024, 12, 10, 9), "Groceries", 90),
            expense(at(2024, 12, 20, 9), "Groceries", 60),
            expense(at(2024, 12, 5, 9), "Rent", 1200),
            expense(at(2025, 1, 2, 9), "Rent", 1200),
            expense(at(2025, 1, 8, 9), "Groceries", 70),
            expense(at(2025, 1, 13, 9), "Groceries", 30),
            expense(at(2025, 1, 14, 9), "Groceries", 50),
            expense(at(2025, 1, 14, 10), UNBUDGETED_CATEGORY, 25),
            Transaction::income(at(2025, 1, 1, 9), Money::from_dollars(3000), Frequency::Monthly),
        ];
        s
    }

    #[test]
    fn test_monthly_category_uses_full_month() {
        let s = session();
        let service = BudgetService::new(&s);
        let rent = &s.profile.categories[0];

        let status = service.category_status(rent, key(2025, 1), at(2025, 1, 15, 12));
        assert_eq!(status.spent, Money::from_dollars(1200));
        assert_eq!(status.remaining, Money::zero());
        assert_eq!(status.window, TrackingWindow::FullMonth(key(2025, 1)));
        assert_eq!(status.progress(), 1.0);
    }

    #[test]
    fn test_weekly_category_in_open_month_uses_current_week() {
        let s = session();
        let service = BudgetService::new(&s);
        let groceries = &s.profile.categories[1];

        let status = service.category_status(groceries, key(2025, 1), at(2025, 1, 15, 12));
        assert_eq!(status.budget, Money::from_dollars(100));
        assert_eq!(status.spent, Money::from_dollars(80));
        assert_eq!(status.remaining, Money::from_dollars(20));
        assert_eq!(status.transaction_count, 2);
        assert!(matches!(status.window, TrackingWindow::CurrentWeek(_)));
        assert!(!status.is_month_equivalent());
    }

    #[test]
    fn test_weekly_category_in_archived_month_scales_budget() {
        let s = session();
        let service = BudgetService::new(&s);
        let groceries = &s.profile.categories[1];

        let status = service.category_status(groceries, key(2024, 12), at(2025, 1, 15, 12));
        assert_eq!(status.budget, Money::from_cents(43300));
        assert_eq!(status.spent, Money::from_dollars(150));
        assert_eq!(status.remaining, Money::from_cents(43300 - 15000));
        assert!(status.is_month_equivalent());
        assert!(service.is_archived_month(key(2024, 12)));
    }

    #[test]
    fn test_over_budget_and_progress_cap() {
        let mut s = session();
        s.transactions
            .push(expense(at(2025, 1, 15, 8), "Groceries", 40));
        let service = BudgetService::new(&s);
        let status = service.category_status(&s.profile.categories[1], key(2025, 1), at(2025, 1, 15, 12));
        assert_eq!(status.spent, Money::from_dollars(120));
        assert!(status.is_over_budget());
        assert_eq!(status.progress(), 1.0);
    }

    #[test]
    fn test_unbudgeted_is_summed_separately() {
        let s = session();
        let service = BudgetService::new(&s);
        assert_eq!(service.unbudgeted_spent(key(2025, 1)), Money::from_dollars(25));
        assert_eq!(service.budgeted_spent(key(2025, 1)), Money::from_dollars(1350));
        assert_eq!(service.unbudgeted_spent(key(2024, 12)), Money::zero());

        let statuses = service.all_statuses(key(2025, 1), at(2025, 1, 15, 12));
        assert_eq!(statuses.len(), 2);
        assert!(statuses.iter().all(|s| s.name != UNBUDGETED_CATEGORY));
    }
}
