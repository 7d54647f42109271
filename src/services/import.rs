//! Import service
//!
//! Builds a complete replacement session from an exported file. Nothing is
//! returned until every row has decoded and the assembled session has
//! validated, so a bad file never leaves a half-imported session behind.

use chrono::NaiveDateTime;
use serde_json::json;
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::export::{self, FullExport, Record, UserSettingsRecord};
use crate::models::{
    BudgetPeriodPointer, MonthKey, SavingsGoal, SessionState, Transaction, UserProfile,
};

/// File formats `pace import` understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
    Yaml,
}

impl ImportFormat {
    /// Pick a format from the file extension; anything unknown is CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Csv,
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Counts describing a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub format: ImportFormat,
    pub categories: usize,
    pub transactions: usize,
    pub savings_goals: usize,
    pub current_month: MonthKey,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} categories, {} transactions and {} savings goals from {} (open month {})",
            self.categories, self.transactions, self.savings_goals, self.format, self.current_month
        )
    }
}

/// Read a file's contents into a new session
pub fn import_session<R: Read>(
    mut reader: R,
    format: ImportFormat,
    now: NaiveDateTime,
) -> PaceResult<(SessionState, ImportResult)> {
    let (profile, transactions, goals, current_month) = match format {
        ImportFormat::Csv => {
            let records = export::read_records(reader, now)?;
            split_records(records)?
        }
        ImportFormat::Json | ImportFormat::Yaml => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            let full = if format == ImportFormat::Json {
                export::import_from_json(&text)?
            } else {
                export::import_from_yaml(&text)?
            };
            from_full_export(full)
        }
    };

    build_session(profile, transactions, goals, current_month, format, now)
}

type Parts = (UserProfile, Vec<Transaction>, Vec<SavingsGoal>, Option<MonthKey>);

fn split_records(records: Vec<Record>) -> PaceResult<Parts> {
    let mut settings: Option<UserSettingsRecord> = None;
    let mut transactions = Vec::new();
    let mut goals = Vec::new();

    for record in records {
        match record {
            Record::UserSettings(row) => {
                if settings.is_some() {
                    return Err(PaceError::Import(
                        "file contains more than one user_settings row".into(),
                    ));
                }
                settings = Some(row);
            }
            Record::Transaction(txn) => transactions.push(txn),
            Record::SavingsGoal(goal) => goals.push(goal),
        }
    }

    let settings =
        settings.ok_or_else(|| PaceError::Import("file has no user_settings row".into()))?;
    Ok((settings.profile, transactions, goals, settings.current_month))
}

fn from_full_export(full: FullExport) -> Parts {
    (
        full.profile,
        full.transactions,
        full.savings_goals,
        Some(full.current_month),
    )
}

fn build_session(
    profile: UserProfile,
    transactions: Vec<Transaction>,
    goals: Vec<SavingsGoal>,
    current_month: Option<MonthKey>,
    format: ImportFormat,
    now: NaiveDateTime,
) -> PaceResult<(SessionState, ImportResult)> {
    profile
        .validate()
        .map_err(|e| PaceError::Import(e.to_string()))?;

    let mut txn_ids = HashSet::new();
    for txn in &transactions {
        if !txn_ids.insert(txn.id) {
            return Err(PaceError::Import(format!("duplicate transaction id {}", txn.id)));
        }
    }

    let mut goal_ids = HashSet::new();
    for goal in &goals {
        goal.validate()
            .map_err(|e| PaceError::Import(format!("savings goal {}: {}", goal.id, e)))?;
        if !goal_ids.insert(goal.id) {
            return Err(PaceError::Import(format!("duplicate savings goal id {}", goal.id)));
        }
    }

    let today = now.date();
    let mut period = BudgetPeriodPointer::new(today, profile.monthly_reset_day);
    if let Some(month) = current_month {
        period.current_month = month;
    }

    let result = ImportResult {
        format,
        categories: profile.categories.len(),
        transactions: transactions.len(),
        savings_goals: goals.len(),
        current_month: period.current_month,
    };

    let mut session = SessionState::from_parts(profile, transactions, goals, period, today);
    session.queue_audit(
        AuditEntry::create(
            now,
            EntityType::Import,
            "session",
            Some(format.to_string()),
            &json!({
                "categories": result.categories,
                "transactions": result.transactions,
                "savings_goals": result.savings_goals,
                "current_month": result.current_month,
            }),
        )
        .with_summary(result.to_string()),
    );

    Ok((session, result))
}
