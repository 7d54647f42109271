//! Strongly-typed ID wrappers
//!
//! Transactions carry a UUID so that deletion can target one exact log entry
//! even when two entries share timestamp, category and amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a transaction in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

const DISPLAY_PREFIX: &str = "txn-";

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short display form used in listings ("txn-1a2b3c4d")
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Check whether a user-supplied identifier refers to this ID
    ///
    /// Accepts the full UUID, the short display form, or a bare hex prefix of
    /// at least four characters.
    pub fn matches(&self, identifier: &str) -> bool {
        let needle = identifier
            .trim()
            .strip_prefix(DISPLAY_PREFIX)
            .unwrap_or(identifier.trim())
            .to_lowercase()
            .replace('-', "");
        needle.len() >= 4 && self.0.simple().to_string().starts_with(&needle)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
