//! Frequencies for income, category budgets and transactions

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Average number of weeks in a month, used to normalize weekly amounts
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Average number of fortnights in a month, used to normalize fortnightly income
pub const FORTNIGHTS_PER_MONTH: f64 = 2.167;

/// How often income arrives; also stamped on every transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    #[default]
    Monthly,
    Fortnightly,
    Weekly,
}

impl Frequency {
    /// Multiplier that converts one payment into a monthly equivalent
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Monthly => 1.0,
            Self::Fortnightly => FORTNIGHTS_PER_MONTH,
            Self::Weekly => WEEKS_PER_MONTH,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Fortnightly => write!(f, "Fortnightly"),
            Self::Weekly => write!(f, "Weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "fortnightly" | "biweekly" | "bi-weekly" => Ok(Self::Fortnightly),
            "weekly" => Ok(Self::Weekly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// Cadence a category budget is stated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BudgetFrequency {
    #[default]
    Monthly,
    Weekly,
}

impl BudgetFrequency {
    /// Convert a budget stated in this cadence into a monthly equivalent
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Monthly => 1.0,
            Self::Weekly => WEEKS_PER_MONTH,
        }
    }
}

impl From<BudgetFrequency> for Frequency {
    fn from(value: BudgetFrequency) -> Self {
        match value {
            BudgetFrequency::Monthly => Frequency::Monthly,
            BudgetFrequency::Weekly => Frequency::Weekly,
        }
    }
}

impl fmt::Display for BudgetFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Frequency::from(*self).fmt(f)
    }
}

impl FromStr for BudgetFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Frequency>()? {
            Frequency::Monthly => Ok(Self::Monthly),
            Frequency::Weekly => Ok(Self::Weekly),
            Frequency::Fortnightly => {
                Err("Category budgets must be Monthly or Weekly".to_string())
            }
        }
    }
}

/// When income is paid: a day of the month, or a weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentDay {
    DayOfMonth(u32),
    Weekday(Weekday),
}

impl PaymentDay {
    /// Check that this payment day makes sense for the given income frequency
    pub fn validate_for(&self, frequency: Frequency) -> Result<(), String> {
        match (frequency, self) {
            (Frequency::Monthly, Self::DayOfMonth(day)) if (1..=31).contains(day) => Ok(()),
            (Frequency::Monthly, Self::DayOfMonth(day)) => {
                Err(format!("Payment day must be between 1 and 31, got {}", day))
            }
            (Frequency::Monthly, Self::Weekday(_)) => {
                Err("Monthly income needs a day of the month (1-31)".to_string())
            }
            (_, Self::Weekday(_)) => Ok(()),
            (other, Self::DayOfMonth(_)) => Err(format!(
                "{} income needs a weekday (e.g. Friday)",
                other
            )),
        }
    }
}

impl fmt::Display for PaymentDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayOfMonth(day) => write!(f, "{}", day),
            Self::Weekday(weekday) => write!(f, "{}", weekday_name(*weekday)),
        }
    }
}

impl FromStr for PaymentDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Spreadsheet round trips sometimes turn "15" into "15.0"
        let numeric = s.strip_suffix(".0").unwrap_or(s);
        if let Ok(day) = numeric.parse::<u32>() {
            return Ok(Self::DayOfMonth(day));
        }
        s.parse::<Weekday>()
            .map(Self::Weekday)
            .map_err(|_| format!("Invalid payment day: {}", s))
    }
}

impl TryFrom<String> for PaymentDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentDay> for String {
    fn from(day: PaymentDay) -> Self {
        day.to_string()
    }
}

/// Full English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parse_and_display() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(
            "fortnightly".parse::<Frequency>().unwrap(),
            Frequency::Fortnightly
        );
        assert_eq!(Frequency::Monthly.to_string(), "Monthly");
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_budget_frequency_rejects_fortnightly() {
        assert_eq!(
            "weekly".parse::<BudgetFrequency>().unwrap(),
            BudgetFrequency::Weekly
        );
        assert!("Fortnightly".parse::<BudgetFrequency>().is_err());
    }

    #[test]
    fn test_payment_day_parse() {
        assert_eq!("15".parse::<PaymentDay>().unwrap(), PaymentDay::DayOfMonth(15));
        assert_eq!("15.0".parse::<PaymentDay>().unwrap(), PaymentDay::DayOfMonth(15));
        assert_eq!(
            "Friday".parse::<PaymentDay>().unwrap(),
            PaymentDay::Weekday(Weekday::Fri)
        );
        assert!("someday".parse::<PaymentDay>().is_err());
        assert_eq!(PaymentDay::Weekday(Weekday::Fri).to_string(), "Friday");
    }

    #[test]
    fn test_payment_day_validation() {
        assert!(PaymentDay::DayOfMonth(31)
            .validate_for(Frequency::Monthly)
            .is_ok());
        assert!(PaymentDay::DayOfMonth(32)
            .validate_for(Frequency::Monthly)
            .is_err());
        assert!(PaymentDay::Weekday(Weekday::Mon)
            .validate_for(Frequency::Monthly)
            .is_err());
        assert!(PaymentDay::Weekday(Weekday::Mon)
            .validate_for(Frequency::Fortnightly)
            .is_ok());
        assert!(PaymentDay::DayOfMonth(3)
            .validate_for(Frequency::Weekly)
            .is_err());
    }

    #[test]
    fn test_monthly_factors() {
        assert_eq!(Frequency::Weekly.monthly_factor(), 4.33);
        assert_eq!(Frequency::Fortnightly.monthly_factor(), 2.167);
        assert_eq!(BudgetFrequency::Monthly.monthly_factor(), 1.0);
    }
}
