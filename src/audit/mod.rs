//! Audit journal for budget-pace
//!
//! Every committed mutation (income posted, expense recorded, category
//! changed, budget month advanced, import, ...) is recorded in an
//! append-only JSON-lines file.
//!
//! Services build `AuditEntry` values and queue them on the session; the
//! storage layer hands them to `AuditLogger::log_batch` when it commits.
//!
//! ```rust,ignore
//! use budget_pace::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(now, EntityType::Category, "Fuel", None, &category);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
