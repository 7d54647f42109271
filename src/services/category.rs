//! Category service
//!
//! Adds, edits and removes category budgets. Names are unique, trimmed and
//! may not collide with the `unbudgeted` or `Income` sentinels.

use chrono::NaiveDateTime;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::{BudgetCategory, BudgetFrequency, Money, SessionState};

/// Changes to apply to an existing category
#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    pub name: Option<String>,
    pub budget: Option<Money>,
    pub frequency: Option<BudgetFrequency>,
}

/// Service for category management
pub struct CategoryService<'a> {
    session: &'a mut SessionState,
}

impl<'a> CategoryService<'a> {
    pub fn new(session: &'a mut SessionState) -> Self {
        Self { session }
    }

    /// Add a category at the end of the list
    pub fn add(
        &mut self,
        name: &str,
        budget: Money,
        frequency: BudgetFrequency,
        now: NaiveDateTime,
    ) -> PaceResult<BudgetCategory> {
        let category = BudgetCategory::new(name, budget, frequency);
        category
            .validate()
            .map_err(|e| PaceError::Validation(e.to_string()))?;

        if self.session.profile.find_category(&category.name).is_some() {
            return Err(PaceError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        self.session.profile.categories.push(category.clone());
        self.session.queue_audit(AuditEntry::create(
            now,
            EntityType::Category,
            category.name.clone(),
            None,
            &category,
        ));

        Ok(category)
    }

    /// Rename and/or re-budget a category in place
    ///
    /// A rename also relabels the open month's transactions; archived
    /// months keep the old name, even the part of a week that straddles
    /// the rollover.
    pub fn edit(
        &mut self,
        name: &str,
        edit: CategoryEdit,
        now: NaiveDateTime,
    ) -> PaceResult<BudgetCategory> {
        let index = self.position(name)?;
        let before = self.session.profile.categories[index].clone();

        let mut updated = before.clone();
        if let Some(new_name) = &edit.name {
            updated.name = new_name.trim().to_string();
        }
        if let Some(budget) = edit.budget {
            updated.budget = budget;
        }
        if let Some(frequency) = edit.frequency {
            updated.frequency = frequency;
        }

        updated
            .validate()
            .map_err(|e| PaceError::Validation(e.to_string()))?;

        let renamed = updated.name != before.name;
        if renamed {
            let clash = self
                .session
                .profile
                .categories
                .iter()
                .enumerate()
                .any(|(i, c)| i != index && c.name.eq_ignore_ascii_case(&updated.name));
            if clash {
                return Err(PaceError::Duplicate {
                    entity_type: "Category",
                    identifier: updated.name,
                });
            }
        }

        if updated == before {
            return Ok(updated);
        }

        self.session.profile.categories[index] = updated.clone();
        if renamed {
            self.relabel_open_month(&before.name, &updated.name);
        }

        self.session.queue_audit(AuditEntry::update(
            now,
            EntityType::Category,
            before.name.clone(),
            Some(updated.name.clone()),
            &before,
            &updated,
        ));

        Ok(updated)
    }

    /// Remove a category; its past transactions keep their label
    pub fn remove(&mut self, name: &str, now: NaiveDateTime) -> PaceResult<BudgetCategory> {
        let index = self.position(name)?;
        if self.session.profile.categories.len() == 1 {
            return Err(PaceError::Validation(
                "Cannot remove the last budget category".into(),
            ));
        }
        let removed = self.session.profile.categories.remove(index);

        self.session.queue_audit(AuditEntry::delete(
            now,
            EntityType::Category,
            removed.name.clone(),
            None,
            &removed,
        ));

        Ok(removed)
    }

    fn position(&self, name: &str) -> PaceResult<usize> {
        let found = self
            .session
            .profile
            .find_category(name)
            .ok_or_else(|| PaceError::category_not_found(name.trim()))?;
        self.session
            .profile
            .categories
            .iter()
            .position(|c| c.name == found.name)
            .ok_or_else(|| PaceError::category_not_found(name.trim()))
    }

    fn relabel_open_month(&mut self, from: &str, to: &str) {
        let reset_day = self.session.reset_day();
        let open_month = self.session.current_month();

        for txn in self.session.transactions.iter_mut() {
            if txn.category == from && txn.budget_month(reset_day) == open_month {
                txn.category = to.to_string();
            }
        }
    }
}
