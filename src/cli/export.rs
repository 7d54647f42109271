//! CLI commands for data export
//!
//! CSV is the exchange format `pace import` reads back; JSON and YAML are
//! full snapshots with export metadata.

use chrono::NaiveDateTime;
use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PaceError, PaceResult};
use crate::export::{export_full_json, export_full_yaml, export_session_csv};
use crate::models::SessionState;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export settings, transactions and goals as CSV
    Csv {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a full JSON snapshot
    Json {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export a full YAML snapshot
    Yaml {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    session: &SessionState,
    cmd: ExportCommands,
    now: NaiveDateTime,
) -> PaceResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let writer = open_output(output.as_deref())?;
            export_session_csv(session, writer)?;
            report_written("CSV", output.as_deref(), session);
        }
        ExportCommands::Json { output, compact } => {
            let mut writer = open_output(output.as_deref())?;
            export_full_json(session, &mut writer, now, !compact)?;
            writeln!(writer).map_err(|e| PaceError::Export(e.to_string()))?;
            writer.flush().map_err(|e| PaceError::Export(e.to_string()))?;
            report_written("JSON", output.as_deref(), session);
        }
        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_deref())?;
            export_full_yaml(session, &mut writer, now)?;
            writer.flush().map_err(|e| PaceError::Export(e.to_string()))?;
            report_written("YAML", output.as_deref(), session);
        }
    }

    Ok(())
}

fn open_output(output: Option<&Path>) -> PaceResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PaceError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn report_written(format: &str, output: Option<&Path>, session: &SessionState) {
    // Nothing extra on stdout when the export itself went there
    if let Some(path) = output {
        println!(
            "Exported {} transactions and {} savings goals as {} to: {}",
            session.transactions.len(),
            session.savings_goals.len(),
            format,
            path.display()
        );
    }
}
