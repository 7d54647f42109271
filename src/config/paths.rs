//! Path management for budget-pace
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_PACE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config` on Linux,
//!    `~/Library/Application Support` on macOS, `%APPDATA%` on Windows)
//!    joined with `budget-pace`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PaceError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "BUDGET_PACE_DATA_DIR";

/// Manages all paths used by budget-pace
#[derive(Debug, Clone)]
pub struct PacePaths {
    /// Base directory for all budget-pace data
    base_dir: PathBuf,
}

impl PacePaths {
    /// Create a new PacePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, PaceError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PacePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the persisted session snapshot
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), PaceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PaceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PaceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a budget has been set up in this directory
    pub fn is_initialized(&self) -> bool {
        self.session_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PaceError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PaceError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budget-pace"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PacePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PacePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PacePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.session_file(),
            temp_dir.path().join("data").join("session.json")
        );
    }
}
