//! budget-pace - terminal budget tracker with spending-pace analytics
//!
//! This library provides the core of the `pace` command: recurring income on
//! a payday schedule, budget months that start on a configurable reset day,
//! category budgets tracked per week or per month, and short-term analytics
//! (week-over-week spending velocity and per-category trends).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, calendar arithmetic, periods, profile, transactions
//! - `storage`: JSON snapshot of the live session
//! - `services`: Business logic layer, including the per-interaction tick
//! - `audit`: Audit logging system
//! - `reports`: Budget overview, spending velocity and category trends
//! - `export`: CSV, JSON and YAML exchange formats
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `pace` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_pace::config::{paths::PacePaths, settings::Settings};
//! use budget_pace::services::run_tick;
//! use budget_pace::storage::Storage;
//!
//! let paths = PacePaths::new()?;
//! let storage = Storage::new(paths)?;
//! let mut session = storage.load_required()?;
//! for event in run_tick(&mut session, now) {
//!     println!("{}", event);
//! }
//! storage.commit(&mut session)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PaceError, PaceResult};
