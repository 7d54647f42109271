//! JSON Export functionality
//!
//! Exports the complete session to JSON with schema versioning.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{PaceError, PaceResult};
use crate::models::transaction::TIMESTAMP_FORMAT;
use crate::models::{MonthKey, SavingsGoal, SessionState, Transaction, UserProfile};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: NaiveDateTime,

    /// Application version that created the export
    pub app_version: String,

    pub profile: UserProfile,

    /// Open budget month at export time
    pub current_month: MonthKey,

    pub last_income_date: NaiveDate,

    pub transactions: Vec<Transaction>,

    pub savings_goals: Vec<SavingsGoal>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub transaction_count: usize,
    pub savings_goal_count: usize,
    /// Earliest transaction timestamp
    pub earliest_transaction: Option<String>,
    /// Latest transaction timestamp
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot a session
    pub fn from_session(session: &SessionState, now: NaiveDateTime) -> Self {
        let transactions = session.transactions.clone();
        let stamp = |t: NaiveDateTime| t.format(TIMESTAMP_FORMAT).to_string();

        let metadata = ExportMetadata {
            category_count: session.profile.categories.len(),
            transaction_count: transactions.len(),
            savings_goal_count: session.savings_goals.len(),
            earliest_transaction: transactions.iter().map(|t| t.timestamp).min().map(stamp),
            latest_transaction: transactions.iter().map(|t| t.timestamp).max().map(stamp),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: now,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile: session.profile.clone(),
            current_month: session.current_month(),
            last_income_date: session.last_income_date,
            transactions,
            savings_goals: session.savings_goals.clone(),
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        self.profile.validate().map_err(|e| e.to_string())?;

        let mut txn_ids = HashSet::new();
        for txn in &self.transactions {
            if !txn_ids.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
        }

        let mut goal_ids = HashSet::new();
        for goal in &self.savings_goals {
            goal.validate()
                .map_err(|e| format!("Savings goal {}: {}", goal.id, e))?;
            if !goal_ids.insert(goal.id) {
                return Err(format!("Duplicate savings goal id {}", goal.id));
            }
        }

        Ok(())
    }
}

/// Export the full session to JSON
pub fn export_full_json<W: Write>(
    session: &SessionState,
    writer: &mut W,
    now: NaiveDateTime,
    pretty: bool,
) -> PaceResult<()> {
    let export = FullExport::from_session(session, now);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| PaceError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> PaceResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| PaceError::Import(e.to_string()))?;

    export.validate().map_err(PaceError::Import)?;

    Ok(export)
}
