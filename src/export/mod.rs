//! Export module for budget-pace
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: the union-header tabular format, readable back by `pace import`
//! - JSON: machine-readable full session export
//! - YAML: human-readable full session export

pub mod csv;
pub mod json;
pub mod records;
pub mod yaml;

pub use csv::{export_session_csv, read_records};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use records::{CsvRow, Record, UserSettingsRecord};
pub use yaml::{export_full_yaml, import_from_yaml};
