//! Core data models for budget-pace
//!
//! Money, calendar arithmetic, budget periods, the user profile, the
//! transaction log, savings goals and the session that ties them together.

pub mod calendar;
pub mod frequency;
pub mod ids;
pub mod money;
pub mod period;
pub mod profile;
pub mod savings;
pub mod session;
pub mod transaction;

pub use frequency::{BudgetFrequency, Frequency, PaymentDay};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{IsoWeek, MonthKey, PeriodParseError};
pub use profile::{
    BudgetCategory, ProfileValidationError, UserProfile, CATEGORY_LIST_SEPARATOR, INCOME_CATEGORY,
    UNBUDGETED_CATEGORY,
};
pub use savings::{SavingsGoal, SavingsSummary};
pub use session::{BudgetPeriodPointer, SessionState};
pub use transaction::Transaction;
