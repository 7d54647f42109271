//! Transaction model
//!
//! The log is append-only apart from deletions inside the open budget month.
//! Sign convention: positive amounts are expenses, negative amounts are income.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::TransactionId;
use super::money::Money;
use super::period::MonthKey;
use super::profile::{INCOME_CATEGORY, UNBUDGETED_CATEGORY};

/// Timestamp format used by listings and the CSV exchange format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single entry in the transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// When the transaction happened (minute precision)
    pub timestamp: NaiveDateTime,

    /// A budget category, `unbudgeted`, or `Income`
    pub category: String,

    /// Positive = expense, negative = income
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    pub frequency: Frequency,
}

impl Transaction {
    /// Create an expense (positive amount)
    pub fn expense(
        timestamp: NaiveDateTime,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            timestamp: truncate_to_minute(timestamp),
            category: category.into(),
            amount: amount.abs(),
            description: description.into(),
            frequency,
        }
    }

    /// Create an income posting (negative amount, category `Income`)
    pub fn income(timestamp: NaiveDateTime, amount: Money, frequency: Frequency) -> Self {
        Self {
            id: TransactionId::new(),
            timestamp: truncate_to_minute(timestamp),
            category: INCOME_CATEGORY.to_string(),
            amount: -amount.abs(),
            description: format!("{} Income", frequency),
            frequency,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_unbudgeted(&self) -> bool {
        self.category == UNBUDGETED_CATEGORY
    }

    /// The budget month this transaction belongs to
    pub fn budget_month(&self, reset_day: u32) -> MonthKey {
        MonthKey::effective(self.date(), reset_day)
    }

    /// Expense amount, or zero for income
    pub fn spend(&self) -> Money {
        if self.is_expense() {
            self.amount
        } else {
            Money::zero()
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.formatted_timestamp(),
            self.category,
            self.amount
        )?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// Parse a "YYYY-MM-DD HH:MM" timestamp
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
}

/// Total spend of a set of transactions (income ignored)
pub fn total_spend<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(Transaction::spend).sum()
}
