//! First-run setup
//!
//! Turns the answers collected by `pace init` into a validated profile and a
//! fresh session. No income is posted on the setup day; the first payday
//! after it is the first one that counts.

use chrono::NaiveDateTime;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::{
    BudgetCategory, BudgetFrequency, Frequency, Money, PaymentDay, SessionState, UserProfile,
};

/// Everything needed to start tracking
#[derive(Debug, Clone)]
pub struct SetupInput {
    pub starting_balance: Money,
    pub income_amount: Money,
    pub income_frequency: Frequency,
    pub payment_day: PaymentDay,
    pub monthly_reset_day: u32,
    pub categories: Vec<BudgetCategory>,
}

/// Validate the setup answers and open a session at `now`
pub fn create_session(input: SetupInput, now: NaiveDateTime) -> PaceResult<SessionState> {
    let profile = UserProfile {
        current_balance: input.starting_balance,
        income_amount: input.income_amount,
        income_frequency: input.income_frequency,
        payment_day: input.payment_day,
        monthly_reset_day: input.monthly_reset_day,
        setup_date: now,
        categories: input.categories,
    };
    profile
        .validate()
        .map_err(|e| PaceError::Validation(e.to_string()))?;

    let mut session = SessionState::new(profile, now);
    let summary = format!(
        "{} categories, open month {}",
        session.profile.categories.len(),
        session.current_month()
    );
    session.queue_audit(
        AuditEntry::create(
            now,
            EntityType::Profile,
            "profile",
            Some("setup".to_string()),
            &session.profile,
        )
        .with_summary(summary),
    );

    Ok(session)
}

/// Parse a category given as `Name:amount` or `Name:amount:Weekly`
///
/// The frequency defaults to Monthly. Names may themselves contain colons;
/// only the trailing amount and frequency fields are split off.
pub fn parse_category_definition(definition: &str) -> PaceResult<BudgetCategory> {
    let invalid = || {
        PaceError::Validation(format!(
            "Invalid category '{}': expected Name:amount or Name:amount:Weekly",
            definition
        ))
    };

    let (rest, last) = definition.rsplit_once(':').ok_or_else(invalid)?;

    let (name, amount, frequency) = match last.trim().parse::<BudgetFrequency>() {
        Ok(frequency) => {
            let (name, amount) = rest.rsplit_once(':').ok_or_else(invalid)?;
            (name, amount, frequency)
        }
        Err(_) => (rest, last, BudgetFrequency::Monthly),
    };

    let budget = Money::parse(amount)
        .map_err(|e| PaceError::Validation(format!("Invalid budget for '{}': {}", name.trim(), e)))?;

    let category = BudgetCategory::new(name, budget, frequency);
    category
        .validate()
        .map_err(|e| PaceError::Validation(e.to_string()))?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn input() -> SetupInput {
        SetupInput {
            starting_balance: Money::from_dollars(500),
            income_amount: Money::from_dollars(800),
            income_frequency: Frequency::Weekly,
            payment_day: PaymentDay::Weekday(Weekday::Fri),
            monthly_reset_day: 15,
            categories: vec![BudgetCategory::new(
                "Groceries",
                Money::from_dollars(120),
                BudgetFrequency::Weekly,
            )],
        }
    }

    #[test]
    fn test_create_session() {
        let session = create_session(input(), now()).unwrap();

        assert_eq!(session.profile.setup_date, now());
        assert_eq!(session.current_month().to_string(), "2024-12");
        assert_eq!(session.last_income_date, now().date());
        assert!(session.transactions.is_empty());
        assert_eq!(session.pending_audit().len(), 1);
        assert_eq!(session.pending_audit()[0].entity_type, EntityType::Profile);
    }

    #[test]
    fn test_create_session_rejects_mismatched_payday() {
        let mut bad = input();
        bad.payment_day = PaymentDay::DayOfMonth(15);
        let err = create_session(bad, now()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_session_requires_categories() {
        let mut bad = input();
        bad.categories.clear();
        assert!(create_session(bad, now()).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_category_definition() {
        let rent = parse_category_definition("Rent:1200").unwrap();
        assert_eq!(rent.name, "Rent");
        assert_eq!(rent.budget, Money::from_dollars(1200));
        assert_eq!(rent.frequency, BudgetFrequency::Monthly);

        let food = parse_category_definition(" Eating out : 45.50 : weekly").unwrap();
        assert_eq!(food.name, "Eating out");
        assert_eq!(food.budget, Money::from_cents(4550));
        assert_eq!(food.frequency, BudgetFrequency::Weekly);

        let colon = parse_category_definition("Car: fuel:60:Weekly").unwrap();
        assert_eq!(colon.name, "Car: fuel");
    }

    #[test]
    fn test_parse_category_definition_errors() {
        assert!(parse_category_definition("Rent").is_err());
        assert!(parse_category_definition("Rent:abc").is_err());
        assert!(parse_category_definition("Rent:0").is_err());
        assert!(parse_category_definition("unbudgeted:10").is_err());
    }
}
