//! CSV export and import
//!
//! The whole session round-trips through one CSV file: a `user_settings`
//! row, then one `expense` row per transaction, then one `savings_goal` row
//! per goal. Columns are matched by header name on the way back in.

use chrono::NaiveDateTime;
use std::io::{Read, Write};

use crate::error::{PaceError, PaceResult};
use crate::models::SessionState;

use super::records::{CsvRow, Record, UserSettingsRecord};

/// Export the session as union-header CSV
pub fn export_session_csv<W: Write>(session: &SessionState, writer: W) -> PaceResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let settings = Record::UserSettings(UserSettingsRecord {
        profile: session.profile.clone(),
        current_month: Some(session.current_month()),
    });
    write_row(&mut csv_writer, &settings.encode())?;

    for txn in &session.transactions {
        write_row(&mut csv_writer, &Record::Transaction(txn.clone()).encode())?;
    }
    for goal in &session.savings_goals {
        write_row(&mut csv_writer, &Record::SavingsGoal(goal.clone()).encode())?;
    }

    csv_writer
        .flush()
        .map_err(|e| PaceError::Export(e.to_string()))
}

fn write_row<W: Write>(writer: &mut csv::Writer<W>, row: &CsvRow) -> PaceResult<()> {
    writer
        .serialize(row)
        .map_err(|e| PaceError::Export(e.to_string()))
}

/// Read and decode every row, failing on the first bad one
///
/// Row numbers in errors count the header as line 1.
pub fn read_records<R: Read>(reader: R, now: NaiveDateTime) -> PaceResult<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| PaceError::Import(format!("line {}: {}", line, e)))?;
        let record =
            Record::decode(&row, now).map_err(|e| PaceError::Import(format!("line {}: {}", line, e)))?;
        records.push(record);
    }

    Ok(records)
}
