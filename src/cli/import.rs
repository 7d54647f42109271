//! CLI command handler for import
//!
//! Replaces the saved session with the contents of an exported file. The
//! new session is built and validated in full before anything is written,
//! so a bad file leaves the current data untouched.

use chrono::NaiveDateTime;
use std::fs::File;
use std::path::Path;

use crate::error::{PaceError, PaceResult};
use crate::services::{import_session, run_tick, ImportFormat};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path, now: NaiveDateTime) -> PaceResult<()> {
    if !file.exists() {
        return Err(PaceError::Import(format!("File not found: {}", file.display())));
    }

    let format = ImportFormat::from_path(file);
    let reader = File::open(file)
        .map_err(|e| PaceError::Import(format!("Failed to read file: {}", e)))?;

    let (mut session, result) = import_session(reader, format, now)?;
    let replaced = storage.is_initialized();

    for event in run_tick(&mut session, now) {
        eprintln!("{}", event);
    }
    storage.commit(&mut session)?;

    println!("{}", result);
    if replaced {
        println!("The previous session was replaced.");
    }
    println!("Balance: {}", session.profile.current_balance);

    Ok(())
}
