//! User profile: balance, income schedule and category budgets

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::{BudgetFrequency, Frequency, PaymentDay};
use super::money::Money;

/// Category name for expenses that count against no budget
pub const UNBUDGETED_CATEGORY: &str = "unbudgeted";

/// Category name stamped on posted income
pub const INCOME_CATEGORY: &str = "Income";

/// Joins category lists in the CSV settings row
pub const CATEGORY_LIST_SEPARATOR: &str = "|";

/// Validation errors for profiles and categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyCategoryName,
    SeparatorInCategoryName(String),
    ReservedCategoryName(String),
    NonPositiveBudget(String),
    DuplicateCategory(String),
    NoCategories,
    NegativeBalance,
    NonPositiveIncome,
    InvalidResetDay(u32),
    InvalidPaymentDay(String),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategoryName => write!(f, "Category name cannot be empty"),
            Self::SeparatorInCategoryName(name) => write!(
                f,
                "Category name '{}' cannot contain '{}'",
                name, CATEGORY_LIST_SEPARATOR
            ),
            Self::ReservedCategoryName(name) => {
                write!(f, "'{}' is a reserved category name", name)
            }
            Self::NonPositiveBudget(name) => {
                write!(f, "Budget for '{}' must be greater than zero", name)
            }
            Self::DuplicateCategory(name) => write!(f, "Category '{}' is listed twice", name),
            Self::NoCategories => write!(f, "At least one budget category is required"),
            Self::NegativeBalance => write!(f, "Starting balance cannot be negative"),
            Self::NonPositiveIncome => write!(f, "Income amount must be greater than zero"),
            Self::InvalidResetDay(day) => {
                write!(f, "Monthly reset day must be between 1 and 28, got {}", day)
            }
            Self::InvalidPaymentDay(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// A named budget and the cadence it is stated in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub budget: Money,
    pub frequency: BudgetFrequency,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, budget: Money, frequency: BudgetFrequency) -> Self {
        Self {
            name: name.into().trim().to_string(),
            budget,
            frequency,
        }
    }

    /// The budget expressed per month (weekly budgets × 4.33)
    pub fn monthly_equivalent(&self) -> Money {
        self.budget.scale(self.frequency.monthly_factor())
    }

    /// Validate name and amount
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyCategoryName);
        }
        if self.name.contains(CATEGORY_LIST_SEPARATOR) {
            return Err(ProfileValidationError::SeparatorInCategoryName(
                self.name.clone(),
            ));
        }
        if is_reserved_category(&self.name) {
            return Err(ProfileValidationError::ReservedCategoryName(
                self.name.clone(),
            ));
        }
        if !self.budget.is_positive() {
            return Err(ProfileValidationError::NonPositiveBudget(self.name.clone()));
        }
        Ok(())
    }
}

/// Check whether a category name collides with a sentinel category
pub fn is_reserved_category(name: &str) -> bool {
    let name = name.trim();
    name.eq_ignore_ascii_case(UNBUDGETED_CATEGORY) || name.eq_ignore_ascii_case(INCOME_CATEGORY)
}

/// The single user's financial profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Running cash balance, moved in lockstep with the transaction log
    pub current_balance: Money,

    pub income_amount: Money,

    pub income_frequency: Frequency,

    pub payment_day: PaymentDay,

    /// Day of month (1-28) on which a new budget month starts
    #[serde(default = "default_reset_day")]
    pub monthly_reset_day: u32,

    pub setup_date: NaiveDateTime,

    /// Insertion-ordered, uniquely named category budgets
    pub categories: Vec<BudgetCategory>,
}

fn default_reset_day() -> u32 {
    1
}

impl UserProfile {
    /// Find a category by exact name
    pub fn category(&self, name: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.name == name.trim())
    }

    /// Find a category by name, ignoring case
    pub fn find_category(&self, name: &str) -> Option<&BudgetCategory> {
        let name = name.trim();
        self.category(name).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
    }

    /// Income expressed per month
    pub fn monthly_income_equivalent(&self) -> Money {
        self.income_amount
            .scale(self.income_frequency.monthly_factor())
    }

    /// Sum of every category budget expressed per month
    pub fn total_monthly_budget(&self) -> Money {
        self.categories.iter().map(|c| c.monthly_equivalent()).sum()
    }

    /// Validate the whole profile
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.current_balance.is_negative() {
            return Err(ProfileValidationError::NegativeBalance);
        }
        if !self.income_amount.is_positive() {
            return Err(ProfileValidationError::NonPositiveIncome);
        }
        self.payment_day
            .validate_for(self.income_frequency)
            .map_err(ProfileValidationError::InvalidPaymentDay)?;
        validate_reset_day(self.monthly_reset_day)?;

        if self.categories.is_empty() {
            return Err(ProfileValidationError::NoCategories);
        }
        for (i, category) in self.categories.iter().enumerate() {
            category.validate()?;
            if self.categories[..i]
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&category.name))
            {
                return Err(ProfileValidationError::DuplicateCategory(
                    category.name.clone(),
                ));
            }
        }
        Ok(())
    }
}

/// Reset days stop at 28 so every month has one
pub fn validate_reset_day(day: u32) -> Result<(), ProfileValidationError> {
    if (1..=28).contains(&day) {
        Ok(())
    } else {
        Err(ProfileValidationError::InvalidResetDay(day))
    }
}
