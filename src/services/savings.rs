//! Savings goal service

use chrono::NaiveDateTime;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::{Money, SavingsGoal, SavingsSummary, SessionState};

/// Service for savings goal management
pub struct SavingsService<'a> {
    session: &'a mut SessionState,
}

impl<'a> SavingsService<'a> {
    pub fn new(session: &'a mut SessionState) -> Self {
        Self { session }
    }

    /// Create a goal with the next free id
    pub fn add(
        &mut self,
        name: &str,
        target: Money,
        current: Money,
        description: &str,
        now: NaiveDateTime,
    ) -> PaceResult<SavingsGoal> {
        let goal = SavingsGoal::new(
            next_goal_id(&self.session.savings_goals),
            name,
            target,
            current,
            description.trim(),
            now,
        );
        goal.validate().map_err(PaceError::Validation)?;

        self.session.queue_audit(AuditEntry::create(
            now,
            EntityType::SavingsGoal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        ));
        self.session.savings_goals.push(goal.clone());

        Ok(goal)
    }

    /// Set how much has been saved toward a goal
    pub fn update_current(
        &mut self,
        id: u32,
        amount: Money,
        now: NaiveDateTime,
    ) -> PaceResult<SavingsGoal> {
        if amount.is_negative() {
            return Err(PaceError::Validation(
                "Current amount cannot be negative".into(),
            ));
        }

        let index = self.position(id)?;
        let before = self.session.savings_goals[index].clone();
        let goal = &mut self.session.savings_goals[index];
        goal.set_current(amount);
        let after = goal.clone();

        if after != before {
            self.session.queue_audit(AuditEntry::update(
                now,
                EntityType::SavingsGoal,
                after.id.to_string(),
                Some(after.name.clone()),
                &before,
                &after,
            ));
        }

        Ok(after)
    }

    pub fn delete(&mut self, id: u32, now: NaiveDateTime) -> PaceResult<SavingsGoal> {
        let index = self.position(id)?;
        let removed = self.session.savings_goals.remove(index);

        self.session.queue_audit(AuditEntry::delete(
            now,
            EntityType::SavingsGoal,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        ));

        Ok(removed)
    }

    fn position(&self, id: u32) -> PaceResult<usize> {
        self.session
            .savings_goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| PaceError::goal_not_found(id.to_string()))
    }
}

/// Goals in creation order, with totals
pub fn list_goals(session: &SessionState) -> (&[SavingsGoal], SavingsSummary) {
    let goals = session.savings_goals.as_slice();
    (goals, SavingsSummary::of(goals))
}

fn next_goal_id(goals: &[SavingsGoal]) -> u32 {
    goals.iter().map(|g| g.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, BudgetFrequency, Frequency, PaymentDay, UserProfile};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn session() -> SessionState {
        let profile = UserProfile {
            current_balance: Money::from_dollars(100),
            income_amount: Money::from_dollars(1000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(1),
            monthly_reset_day: 1,
            setup_date: now(),
            categories: vec![BudgetCategory::new(
                "Rent",
                Money::from_dollars(500),
                BudgetFrequency::Monthly,
            )],
        };
        SessionState::new(profile, now())
    }

    #[test]
    fn test_add_goal_assigns_increasing_ids() {
        let mut s = session();
        let mut service = SavingsService::new(&mut s);
        let first = service
            .add("Holiday", Money::from_dollars(1000), Money::zero(), "", now())
            .unwrap();
        let second = service
            .add("Car", Money::from_dollars(5000), Money::from_dollars(100), "", now())
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        service.delete(1, now()).unwrap();
        let third = service
            .add("Laptop", Money::from_dollars(1500), Money::zero(), "", now())
            .unwrap();
        assert_eq!(third.id, 3);
        assert_eq!(s.pending_audit().len(), 4);
    }

    #[test]
    fn test_add_goal_validation() {
        let mut s = session();
        let mut service = SavingsService::new(&mut s);
        assert!(service
            .add(" ", Money::from_dollars(10), Money::zero(), "", now())
            .unwrap_err()
            .is_validation());
        assert!(service
            .add("Fund", Money::zero(), Money::zero(), "", now())
            .unwrap_err()
            .is_validation());
        assert!(service
            .add("Fund", Money::from_dollars(10), Money::from_dollars(-1), "", now())
            .unwrap_err()
            .is_validation());
        assert!(s.savings_goals.is_empty());
    }

    #[test]
    fn test_update_current_marks_completed() {
        let mut s = session();
        let mut service = SavingsService::new(&mut s);
        let goal = service
            .add("Holiday", Money::from_dollars(1000), Money::from_dollars(200), "", now())
            .unwrap();
        assert!(!goal.completed);

        let goal = service
            .update_current(goal.id, Money::from_dollars(1000), now())
            .unwrap();
        assert!(goal.completed);

        let goal = service
            .update_current(goal.id, Money::from_dollars(400), now())
            .unwrap();
        assert!(!goal.completed);

        assert!(service
            .update_current(99, Money::from_dollars(1), now())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_list_goals_summary() {
        let mut s = session();
        let mut service = SavingsService::new(&mut s);
        service
            .add("Holiday", Money::from_dollars(1000), Money::from_dollars(250), "", now())
            .unwrap();
        service
            .add("Phone", Money::from_dollars(300), Money::from_dollars(300), "", now())
            .unwrap();

        let (goals, summary) = list_goals(&s);
        assert_eq!(goals.len(), 2);
        assert_eq!(summary.total_saved, Money::from_dollars(550));
        assert_eq!(summary.total_target, Money::from_dollars(1300));
        assert_eq!(summary.remaining, Money::from_dollars(750));
        assert_eq!(summary.completed, 1);
    }
}
