//! Service layer for budget-pace
//!
//! Services apply validated changes to a borrowed `SessionState` and queue an
//! audit entry for each one. They never touch disk; the caller commits the
//! session through `Storage` once the interaction is over.

pub mod budget;
pub mod category;
pub mod import;
pub mod ledger;
pub mod payment;
pub mod period;
pub mod savings;
pub mod setup;

pub use budget::{BudgetService, CategoryStatus, TrackingWindow};
pub use category::{CategoryEdit, CategoryService};
pub use import::{import_session, ImportFormat, ImportResult};
pub use ledger::{find_transaction, list_for_month, LedgerService};
pub use payment::{days_until_next_payment, next_due_after, next_payment_date, IncomeService};
pub use period::{available_months, PeriodService, PeriodSignal};
pub use savings::{list_goals, SavingsService};
pub use setup::{create_session, parse_category_definition, SetupInput};

use chrono::NaiveDateTime;
use std::fmt;

use crate::models::{SessionState, Transaction};

/// Something that happened during the start-of-interaction tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    IncomePosted(Transaction),
    Period(PeriodSignal),
}

impl fmt::Display for TickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncomePosted(txn) => write!(
                f,
                "Income received: {} ({}) added to your balance.",
                -txn.amount,
                txn.description
            ),
            Self::Period(signal) => write!(f, "{}", signal),
        }
    }
}

/// Run once per interaction: post due income, then check the period pointer
pub fn run_tick(session: &mut SessionState, now: NaiveDateTime) -> Vec<TickEvent> {
    let mut events = Vec::new();

    if let Some(txn) = IncomeService::new(session).apply_due_income(now) {
        events.push(TickEvent::IncomePosted(txn));
    }

    events.extend(
        PeriodService::new(session)
            .check_rollover(now)
            .into_iter()
            .map(TickEvent::Period),
    );

    events
}
