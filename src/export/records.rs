//! Tabular record kinds
//!
//! One CSV row carries exactly one of three record kinds, told apart by the
//! `data_type` column. Every row shares the union header; columns that do not
//! apply to a row's kind are left empty.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::transaction::{parse_timestamp, truncate_to_minute};
use crate::models::{
    BudgetCategory, BudgetFrequency, Frequency, Money, MonthKey, PaymentDay, SavingsGoal,
    Transaction, TransactionId, UserProfile, CATEGORY_LIST_SEPARATOR,
};

pub const USER_SETTINGS: &str = "user_settings";
pub const EXPENSE: &str = "expense";
pub const SAVINGS_GOAL: &str = "savings_goal";

const SETUP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A raw CSV row, read by column name
///
/// Field order is the column order written on export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvRow {
    pub data_type: Option<String>,
    pub current_balance: Option<String>,
    pub income_amount: Option<String>,
    pub income_frequency: Option<String>,
    pub payment_day: Option<String>,
    pub setup_date: Option<String>,
    pub monthly_reset_day: Option<String>,
    pub current_month_year: Option<String>,
    pub categories: Option<String>,
    pub category_budgets: Option<String>,
    pub category_frequencies: Option<String>,
    pub id: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub name: Option<String>,
    pub target_amount: Option<String>,
    pub current_amount: Option<String>,
    pub created_date: Option<String>,
    pub completed: Option<String>,
}

/// Profile plus the open month pointer, as stored in a `user_settings` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettingsRecord {
    pub profile: UserProfile,
    pub current_month: Option<MonthKey>,
}

/// The closed set of row kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    UserSettings(UserSettingsRecord),
    Transaction(Transaction),
    SavingsGoal(SavingsGoal),
}

impl Record {
    /// Flatten into a union-header row
    pub fn encode(&self) -> CsvRow {
        match self {
            Self::UserSettings(settings) => encode_user_settings(settings),
            Self::Transaction(txn) => encode_transaction(txn),
            Self::SavingsGoal(goal) => encode_savings_goal(goal),
        }
    }

    /// Decode a row by its `data_type`
    ///
    /// `now` stands in for a savings goal's missing creation time.
    pub fn decode(row: &CsvRow, now: NaiveDateTime) -> Result<Self, String> {
        let data_type = required(&row.data_type, "data_type")?;
        match data_type {
            USER_SETTINGS => decode_user_settings(row).map(Self::UserSettings),
            EXPENSE => decode_transaction(row).map(Self::Transaction),
            SAVINGS_GOAL => decode_savings_goal(row, now).map(Self::SavingsGoal),
            other => Err(format!("unknown data_type '{}'", other)),
        }
    }
}

fn encode_user_settings(settings: &UserSettingsRecord) -> CsvRow {
    let profile = &settings.profile;
    let names: Vec<&str> = profile.categories.iter().map(|c| c.name.as_str()).collect();
    let budgets: Vec<String> = profile
        .categories
        .iter()
        .map(|c| format!("{}:{}", c.name, c.budget.to_decimal_string()))
        .collect();
    let frequencies: Vec<String> = profile
        .categories
        .iter()
        .map(|c| format!("{}:{}", c.name, c.frequency))
        .collect();

    CsvRow {
        data_type: Some(USER_SETTINGS.to_string()),
        current_balance: Some(profile.current_balance.to_decimal_string()),
        income_amount: Some(profile.income_amount.to_decimal_string()),
        income_frequency: Some(profile.income_frequency.to_string()),
        payment_day: Some(profile.payment_day.to_string()),
        setup_date: Some(profile.setup_date.format(SETUP_DATE_FORMAT).to_string()),
        monthly_reset_day: Some(profile.monthly_reset_day.to_string()),
        current_month_year: settings.current_month.map(|m| m.to_string()),
        categories: Some(names.join(CATEGORY_LIST_SEPARATOR)),
        category_budgets: Some(budgets.join(CATEGORY_LIST_SEPARATOR)),
        category_frequencies: Some(frequencies.join(CATEGORY_LIST_SEPARATOR)),
        ..Default::default()
    }
}

fn encode_transaction(txn: &Transaction) -> CsvRow {
    CsvRow {
        data_type: Some(EXPENSE.to_string()),
        id: Some(txn.id.to_string()),
        date: Some(txn.formatted_timestamp()),
        category: Some(txn.category.clone()),
        amount: Some(txn.amount.to_decimal_string()),
        description: Some(txn.description.clone()),
        frequency: Some(txn.frequency.to_string()),
        ..Default::default()
    }
}

fn encode_savings_goal(goal: &SavingsGoal) -> CsvRow {
    CsvRow {
        data_type: Some(SAVINGS_GOAL.to_string()),
        id: Some(goal.id.to_string()),
        name: Some(goal.name.clone()),
        target_amount: Some(goal.target_amount.to_decimal_string()),
        current_amount: Some(goal.current_amount.to_decimal_string()),
        description: Some(goal.description.clone()),
        created_date: Some(goal.created_at.format(SETUP_DATE_FORMAT).to_string()),
        completed: Some(if goal.completed { "True" } else { "False" }.to_string()),
        ..Default::default()
    }
}

fn decode_user_settings(row: &CsvRow) -> Result<UserSettingsRecord, String> {
    let budgets = parse_pairs(optional(&row.category_budgets).unwrap_or(""));
    let frequencies = parse_pairs(optional(&row.category_frequencies).unwrap_or(""));

    let mut categories = Vec::new();
    for name in optional(&row.categories)
        .unwrap_or("")
        .split(CATEGORY_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        let budget = budgets
            .get(name)
            .ok_or_else(|| format!("category '{}' has no budget", name))
            .and_then(|v| money(v, "category budget"))?;
        let frequency = match frequencies.get(name) {
            Some(value) => BudgetFrequency::from_str(value)?,
            None => BudgetFrequency::Monthly,
        };
        categories.push(BudgetCategory::new(name, budget, frequency));
    }

    let monthly_reset_day = match optional(&row.monthly_reset_day) {
        Some(value) => integer(value, "monthly_reset_day")?,
        None => 1,
    };

    let profile = UserProfile {
        current_balance: money(required(&row.current_balance, "current_balance")?, "current_balance")?,
        income_amount: money(required(&row.income_amount, "income_amount")?, "income_amount")?,
        income_frequency: Frequency::from_str(required(&row.income_frequency, "income_frequency")?)?,
        payment_day: PaymentDay::from_str(required(&row.payment_day, "payment_day")?)?,
        monthly_reset_day,
        setup_date: datetime(required(&row.setup_date, "setup_date")?)?,
        categories,
    };

    let current_month = optional(&row.current_month_year)
        .map(|value| MonthKey::parse(value).map_err(|e| e.to_string()))
        .transpose()?;

    Ok(UserSettingsRecord {
        profile,
        current_month,
    })
}

fn decode_transaction(row: &CsvRow) -> Result<Transaction, String> {
    let id = match optional(&row.id) {
        Some(value) => TransactionId::from_str(value)
            .map_err(|e| format!("invalid transaction id '{}': {}", value, e))?,
        None => TransactionId::new(),
    };
    let date = required(&row.date, "date")?;
    let timestamp = parse_timestamp(date).map_err(|_| format!("invalid date '{}'", date))?;
    let frequency = match optional(&row.frequency) {
        Some(value) => Frequency::from_str(value)?,
        None => Frequency::Monthly,
    };

    Ok(Transaction {
        id,
        timestamp: truncate_to_minute(timestamp),
        category: required(&row.category, "category")?.to_string(),
        amount: money(required(&row.amount, "amount")?, "amount")?,
        description: optional(&row.description).unwrap_or("").to_string(),
        frequency,
    })
}

fn decode_savings_goal(row: &CsvRow, now: NaiveDateTime) -> Result<SavingsGoal, String> {
    let current = match optional(&row.current_amount) {
        Some(value) => money(value, "current_amount")?,
        None => Money::zero(),
    };
    let created_at = match optional(&row.created_date) {
        Some(value) => datetime(value)?,
        None => now,
    };
    let completed = match optional(&row.completed) {
        Some(value) => boolean(value)?,
        None => current >= money(required(&row.target_amount, "target_amount")?, "target_amount")?,
    };

    Ok(SavingsGoal {
        id: integer(required(&row.id, "id")?, "id")?,
        name: required(&row.name, "name")?.to_string(),
        target_amount: money(required(&row.target_amount, "target_amount")?, "target_amount")?,
        current_amount: current,
        description: optional(&row.description).unwrap_or("").to_string(),
        created_at,
        completed,
    })
}

/// Non-blank trimmed cell
fn optional(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(cell: &'a Option<String>, column: &str) -> Result<&'a str, String> {
    optional(cell).ok_or_else(|| format!("missing required column '{}'", column))
}

fn money(value: &str, column: &str) -> Result<Money, String> {
    Money::parse(value).map_err(|_| format!("{} is not a number: '{}'", column, value))
}

/// Integers may arrive as "3" or "3.0"
fn integer(value: &str, column: &str) -> Result<u32, String> {
    let whole = value
        .split_once('.')
        .filter(|(_, frac)| frac.chars().all(|c| c == '0'))
        .map_or(value, |(whole, _)| whole);
    whole
        .parse()
        .map_err(|_| format!("{} is not a whole number: '{}'", column, value))
}

fn boolean(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("invalid completed flag '{}'", value)),
    }
}

/// ISO timestamps with or without fractional seconds, or a bare date
fn datetime(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("invalid timestamp '{}'", value))
}

/// "name:value|name:value"; the value follows the last colon
fn parse_pairs(value: &str) -> HashMap<&str, &str> {
    value
        .split(CATEGORY_LIST_SEPARATOR)
        .filter_map(|item| item.rsplit_once(':'))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}
