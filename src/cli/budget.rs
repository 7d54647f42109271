//! Budget overview CLI command

use chrono::NaiveDateTime;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::error::{PaceError, PaceResult};
use crate::models::{MonthKey, SessionState};
use crate::reports::BudgetOverviewReport;

use super::parse_month_arg;

/// Arguments for `pace budget`
#[derive(Args)]
pub struct BudgetArgs {
    /// Budget month (YYYY-MM); defaults to the open month
    #[arg(short, long, value_parser = parse_month_arg)]
    pub month: Option<MonthKey>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the budget overview command
pub fn handle_budget_command(
    session: &mut SessionState,
    args: BudgetArgs,
    now: NaiveDateTime,
) -> PaceResult<()> {
    let month = args.month.unwrap_or_else(|| session.current_month());
    let report = BudgetOverviewReport::generate(session, month, now);

    if let Some(output_path) = args.output {
        let file = File::create(&output_path).map_err(|e| {
            PaceError::Export(format!(
                "Failed to create file {}: {}",
                output_path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Budget overview exported to: {}", output_path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
