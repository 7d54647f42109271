//! YAML Export functionality
//!
//! Exports the complete session to YAML for a human-readable backup.

use chrono::NaiveDateTime;
use std::io::Write;

use crate::error::{PaceError, PaceResult};
use crate::export::json::FullExport;
use crate::models::SessionState;

/// Export the full session to YAML format
pub fn export_full_yaml<W: Write>(
    session: &SessionState,
    writer: &mut W,
    now: NaiveDateTime,
) -> PaceResult<()> {
    let export = FullExport::from_session(session, now);
    let io_err = |e: std::io::Error| PaceError::Export(e.to_string());

    writeln!(writer, "# budget-pace full export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "#").map_err(io_err)?;
    writeln!(writer, "# Amounts are stored in cents.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PaceError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> PaceResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| PaceError::Import(e.to_string()))?;

    export.validate().map_err(PaceError::Import)?;

    Ok(export)
}
