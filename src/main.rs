use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use budget_pace::cli::{
    handle_import_command, handle_init_command, handle_session_command, parse_now, InitArgs,
    SessionCommands,
};
use budget_pace::config::{paths::PacePaths, settings::Settings};
use budget_pace::services::run_tick;
use budget_pace::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pace",
    author = "Kaylee Beyene",
    version,
    about = "Terminal budget tracker with spending-pace analytics",
    long_about = "budget-pace tracks income and expenses against weekly and monthly \
                  category budgets, posts your pay on schedule, rolls budget months \
                  over on your chosen reset day, and tells you whether you are \
                  spending faster or slower than usual."
)]
struct Cli {
    /// Treat this moment as "now" ("YYYY-MM-DD HH:MM")
    #[arg(long, global = true, env = "BUDGET_PACE_NOW", value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a new budget
    Init(InitArgs),

    /// Replace the budget with the contents of an exported file
    Import {
        /// CSV, JSON or YAML file (chosen by extension)
        file: PathBuf,
    },

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Session(SessionCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let now = cli
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    // Initialize paths and settings
    let paths = PacePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init(args)) => {
            handle_init_command(&storage, &settings, args, now)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file, now)?;
        }
        Some(Commands::Log { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("budget-pace Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Audit log:        {} ({} entries)",
                paths.audit_log().display(),
                storage.audit().entry_count()?
            );
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Velocity lookback: {} weeks",
                settings.analytics.velocity_lookback_weeks
            );
            println!(
                "  Trend lookback:    {} weeks / {} months",
                settings.analytics.trend_lookback_weeks, settings.analytics.trend_lookback_months
            );
        }
        Some(Commands::Session(cmd)) => {
            let mut session = storage.load_required()?;

            for event in run_tick(&mut session, now) {
                eprintln!("{}", event);
            }

            // Commit the tick even when the command fails
            let outcome = handle_session_command(&mut session, &settings, cmd, now);
            storage.commit(&mut session)?;
            outcome?;
        }
        None => {
            println!("budget-pace - know your spending pace");
            println!();
            println!("Run 'pace --help' for usage information.");
            println!("Run 'pace init --help' to set up a budget.");
        }
    }

    Ok(())
}
