//! Budget Overview Report
//!
//! Budget-versus-actual for every category in a selected budget month,
//! plus the month's totals.

use chrono::NaiveDateTime;
use std::io::Write;

use crate::error::{PaceError, PaceResult};
use crate::models::{Money, MonthKey, SessionState};
use crate::services::{BudgetService, CategoryStatus, TrackingWindow};

/// Budget Overview Report
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverviewReport {
    /// The budget month this report covers
    pub month: MonthKey,
    /// Whether `month` is closed
    pub archived: bool,
    /// One row per category, in profile order
    pub categories: Vec<CategoryStatus>,
    /// Expenses recorded without a budget
    pub unbudgeted_spent: Money,
    /// Month expenses carrying a category label
    pub budgeted_spent: Money,
    /// Budgeted plus unbudgeted spend
    pub total_spent: Money,
    /// Sum of budgets per month (weekly budgets scaled by 4.33)
    pub total_monthly_budget: Money,
    /// Total monthly budget minus budgeted spend
    pub budget_remaining: Money,
    /// Income expressed per month
    pub monthly_income_equivalent: Money,
    /// Monthly income equivalent minus total spend
    pub money_saved: Money,
}

impl BudgetOverviewReport {
    /// Generate the overview for a budget month
    pub fn generate(session: &SessionState, month: MonthKey, now: NaiveDateTime) -> Self {
        let service = BudgetService::new(session);
        let profile = &session.profile;

        let unbudgeted_spent = service.unbudgeted_spent(month);
        let budgeted_spent = service.budgeted_spent(month);
        let total_spent = budgeted_spent + unbudgeted_spent;
        let total_monthly_budget = profile.total_monthly_budget();
        let monthly_income_equivalent = profile.monthly_income_equivalent();

        Self {
            month,
            archived: service.is_archived_month(month),
            categories: service.all_statuses(month, now),
            unbudgeted_spent,
            budgeted_spent,
            total_spent,
            total_monthly_budget,
            budget_remaining: total_monthly_budget - budgeted_spent,
            monthly_income_equivalent,
            money_saved: monthly_income_equivalent - total_spent,
        }
    }

    /// Categories currently over their budget
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryStatus> {
        self.categories.iter().filter(|c| c.is_over_budget())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        let state = if self.archived { " (archived, read-only)" } else { "" };
        output.push_str(&format!("Budget Overview - {}{}\n", self.month.friendly(), state));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str(&format!(
            "{:<30} {:>12} {:>12} {:>12}  {}\n",
            "Category", "Budget", "Spent", "Remaining", "Window"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.categories {
            let budget = if row.is_month_equivalent() {
                format!("~{}", row.budget)
            } else {
                row.budget.to_string()
            };
            let remaining = if row.is_over_budget() {
                format!("{} *", row.remaining)
            } else {
                row.remaining.to_string()
            };
            let window = match row.window {
                TrackingWindow::CurrentWeek(_) => "this week".to_string(),
                TrackingWindow::FullMonth(_) => "month".to_string(),
            };

            output.push_str(&format!(
                "{:<30} {:>12} {:>12} {:>12}  {} ({}%)\n",
                format!("{} [{}]", row.name, row.frequency),
                budget,
                row.spent,
                remaining,
                window,
                (row.progress() * 100.0).round()
            ));
        }

        if self.unbudgeted_spent.is_positive() {
            output.push_str(&format!(
                "{:<30} {:>12} {:>12} {:>12}\n",
                "Unbudgeted", "-", self.unbudgeted_spent, "-"
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "Total spent", self.total_spent));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Total monthly budget", self.total_monthly_budget
        ));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Budget remaining", self.budget_remaining
        ));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Monthly income", self.monthly_income_equivalent
        ));
        let saved_label = if self.money_saved.is_negative() {
            "Over income by"
        } else {
            "Money saved"
        };
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            saved_label,
            self.money_saved.abs()
        ));

        output.push_str("\n* = Over budget   ~ = weekly budget scaled to a month\n");

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> PaceResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PaceError::Export(e.to_string());

        csv_writer
            .write_record(["Month", "Category", "Frequency", "Window", "Budget", "Spent", "Remaining"])
            .map_err(export_err)?;

        for row in &self.categories {
            csv_writer
                .write_record([
                    self.month.to_string(),
                    row.name.clone(),
                    row.frequency.to_string(),
                    row.window.to_string(),
                    row.budget.to_decimal_string(),
                    row.spent.to_decimal_string(),
                    row.remaining.to_decimal_string(),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .write_record([
                self.month.to_string(),
                "unbudgeted".to_string(),
                String::new(),
                String::new(),
                String::new(),
                self.unbudgeted_spent.to_decimal_string(),
                String::new(),
            ])
            .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| PaceError::Export(e.to_string()))
    }
}
