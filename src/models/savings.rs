//! Savings goals
//!
//! Goals live alongside the budget but never touch the balance or the
//! transaction log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A savings target the user is working toward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: u32,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

impl SavingsGoal {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        target_amount: Money,
        current_amount: Money,
        description: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        let mut goal = Self {
            id,
            name: name.into().trim().to_string(),
            target_amount,
            current_amount,
            description: description.into(),
            created_at,
            completed: false,
        };
        goal.refresh_completed();
        goal
    }

    /// Set the saved amount and recompute the completed flag
    pub fn set_current(&mut self, amount: Money) {
        self.current_amount = amount;
        self.refresh_completed();
    }

    fn refresh_completed(&mut self) {
        self.completed = self.current_amount >= self.target_amount;
    }

    /// Amount still to save (never negative)
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Saved fraction of the target, capped at 1.0
    pub fn progress(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        (self.current_amount.as_f64() / self.target_amount.as_f64()).clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Goal name cannot be empty".to_string());
        }
        if !self.target_amount.is_positive() {
            return Err("Target amount must be greater than zero".to_string());
        }
        if self.current_amount.is_negative() {
            return Err("Current amount cannot be negative".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({} / {})",
            self.id, self.name, self.current_amount, self.target_amount
        )
    }
}

/// Totals across all goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavingsSummary {
    pub total_saved: Money,
    pub total_target: Money,
    pub remaining: Money,
    pub completed: usize,
}

impl SavingsSummary {
    pub fn of(goals: &[SavingsGoal]) -> Self {
        Self {
            total_saved: goals.iter().map(|g| g.current_amount).sum(),
            total_target: goals.iter().map(|g| g.target_amount).sum(),
            remaining: goals.iter().map(|g| g.remaining()).sum(),
            completed: goals.iter().filter(|g| g.completed).count(),
        }
    }
}
