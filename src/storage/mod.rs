//! Storage layer for budget-pace
//!
//! The whole session is one JSON snapshot written atomically. Audit entries
//! queued on the session during an interaction are flushed to the journal in
//! the same commit.

pub mod file_io;

pub use file_io::{read_json_optional, write_json_atomic};

use crate::audit::AuditLogger;
use crate::config::paths::PacePaths;
use crate::error::{PaceError, PaceResult};
use crate::models::SessionState;

/// Coordinates the session snapshot and the audit journal
pub struct Storage {
    paths: PacePaths,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: PacePaths) -> PaceResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &PacePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Check whether a session has been saved
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Load the saved session, if any
    pub fn load(&self) -> PaceResult<Option<SessionState>> {
        read_json_optional(self.paths.session_file())
    }

    /// Load the saved session, failing if none exists
    pub fn load_required(&self) -> PaceResult<SessionState> {
        self.load()?.ok_or(PaceError::NotInitialized)
    }

    /// Persist the session and flush its queued audit entries
    ///
    /// The snapshot is written first; audit entries are only drained once
    /// the snapshot is safely on disk.
    pub fn commit(&self, session: &mut SessionState) -> PaceResult<()> {
        write_json_atomic(self.paths.session_file(), session)?;
        let entries = session.take_pending_audit();
        self.audit.log_batch(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEntry, EntityType};
    use crate::models::{
        BudgetCategory, BudgetFrequency, Frequency, Money, PaymentDay, UserProfile,
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn session() -> SessionState {
        let profile = UserProfile {
            current_balance: Money::from_dollars(500),
            income_amount: Money::from_dollars(2000),
            income_frequency: Frequency::Monthly,
            payment_day: PaymentDay::DayOfMonth(15),
            monthly_reset_day: 1,
            setup_date: now(),
            categories: vec![BudgetCategory::new(
                "Rent",
                Money::from_dollars(800),
                BudgetFrequency::Monthly,
            )],
        };
        SessionState::new(profile, now())
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PacePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.load().unwrap().is_none());
        assert!(matches!(
            storage.load_required(),
            Err(PaceError::NotInitialized)
        ));
    }

    #[test]
    fn test_commit_persists_session_and_flushes_audit() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(PacePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let mut session = session();
        session.queue_audit(AuditEntry::create(
            now(),
            EntityType::Income,
            "profile",
            None,
            &session.profile,
        ));

        storage.commit(&mut session).unwrap();

        assert!(storage.is_initialized());
        assert!(session.pending_audit().is_empty());
        assert_eq!(storage.audit().entry_count().unwrap(), 1);

        let loaded = storage.load_required().unwrap();
        assert_eq!(loaded.profile, session.profile);
        assert_eq!(loaded.period, session.period);
        assert!(loaded.pending_audit().is_empty());
    }
}
