//! The live session: everything one user's budget consists of
//!
//! Services mutate a `SessionState` in memory and queue audit entries on it;
//! the storage layer persists the snapshot and flushes the queue in one
//! commit at the end of an interaction.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;

use super::period::MonthKey;
use super::profile::UserProfile;
use super::savings::SavingsGoal;
use super::transaction::Transaction;

/// Which budget month is open and when the period check last ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriodPointer {
    /// The open budget month; only the period tick advances it
    pub current_month: MonthKey,

    /// Date of the last period check, used for the week-advanced notice
    pub last_reset_check: NaiveDate,
}

impl BudgetPeriodPointer {
    pub fn new(today: NaiveDate, reset_day: u32) -> Self {
        Self {
            current_month: MonthKey::effective(today, reset_day),
            last_reset_check: today,
        }
    }
}

/// Profile, log, goals and period state for the single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub profile: UserProfile,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,

    pub period: BudgetPeriodPointer,

    /// Last day income was posted; guards against double posting
    pub last_income_date: NaiveDate,

    #[serde(skip)]
    pending_audit: Vec<AuditEntry>,
}

impl SessionState {
    /// Start a fresh session
    ///
    /// No income is posted on the setup day itself.
    pub fn new(profile: UserProfile, now: NaiveDateTime) -> Self {
        let today = now.date();
        let period = BudgetPeriodPointer::new(today, profile.monthly_reset_day);
        Self {
            profile,
            transactions: Vec::new(),
            savings_goals: Vec::new(),
            period,
            last_income_date: today,
            pending_audit: Vec::new(),
        }
    }

    /// Build a session from already-validated parts (used by import)
    pub fn from_parts(
        profile: UserProfile,
        transactions: Vec<Transaction>,
        savings_goals: Vec<SavingsGoal>,
        period: BudgetPeriodPointer,
        last_income_date: NaiveDate,
    ) -> Self {
        Self {
            profile,
            transactions,
            savings_goals,
            period,
            last_income_date,
            pending_audit: Vec::new(),
        }
    }

    pub fn reset_day(&self) -> u32 {
        self.profile.monthly_reset_day
    }

    pub fn current_month(&self) -> MonthKey {
        self.period.current_month
    }

    /// Queue an audit entry to be written at the next commit
    pub fn queue_audit(&mut self, entry: AuditEntry) {
        self.pending_audit.push(entry);
    }

    pub fn pending_audit(&self) -> &[AuditEntry] {
        &self.pending_audit
    }

    /// Drain queued audit entries
    pub fn take_pending_audit(&mut self) -> Vec<AuditEntry> {
        std::mem::take(&mut self.pending_audit)
    }

    /// Move queued audit entries from another session into this one
    pub fn absorb_audit(&mut self, other: &mut SessionState) {
        self.pending_audit.append(&mut other.pending_audit);
    }
}
