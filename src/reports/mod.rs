//! Reports module for budget-pace
//!
//! Provides the budget overview for a selected month, the weekly spending
//! velocity and per-category spending trends.

pub mod budget_overview;
pub mod trends;
pub mod velocity;

pub use budget_overview::BudgetOverviewReport;
pub use trends::{classify, CategoryTrend, CategoryTrendReport, TrendStatus};
pub use velocity::{daily_breakdown, DailySpend, SpendingVelocityReport, VelocityPace};
