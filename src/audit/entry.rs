//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Profile,
    Transaction,
    Category,
    Income,
    Period,
    SavingsGoal,
    Import,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Profile => write!(f, "Profile"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Category => write!(f, "Category"),
            EntityType::Income => write!(f, "Income"),
            EntityType::Period => write!(f, "Period"),
            EntityType::SavingsGoal => write!(f, "SavingsGoal"),
            EntityType::Import => write!(f, "Import"),
        }
    }
}

/// A single audit log entry
///
/// The timestamp is the session's "now", not the wall clock, so replays with
/// a fixed clock produce identical journals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred
    pub timestamp: NaiveDateTime,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., category name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation of the entity before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the entity after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        at: NaiveDateTime,
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: at,
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Record a newly created entity; only `after` is set
    pub fn create<T: Serialize>(
        at: NaiveDateTime,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(at, Operation::Create, entity_type, entity_id.into(), entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Record a change; the diff summary is derived from the serialized values
    pub fn update<T: Serialize>(
        at: NaiveDateTime,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let mut entry = Self::new(at, Operation::Update, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        if let (Some(b), Some(a)) = (&entry.before, &entry.after) {
            entry.diff_summary = super::generate_diff(b, a);
        }
        entry
    }

    /// Record a removed entity; only `before` is set
    pub fn delete<T: Serialize>(
        at: NaiveDateTime,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(at, Operation::Delete, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Attach a free-form summary (used for period and import events)
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.diff_summary = Some(summary.into());
        self
    }

    /// One line per entry, plus an indented line for the change summary
    pub fn format_human_readable(&self) -> String {
        let name = self
            .entity_name
            .as_ref()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default();
        let changes = self
            .diff_summary
            .as_ref()
            .map(|d| format!("\n  Changes: {}", d))
            .unwrap_or_default();

        format!(
            "[{}] {} {} {}{}{}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.operation,
            self.entity_type,
            self.entity_id,
            name,
            changes
        )
    }
}
