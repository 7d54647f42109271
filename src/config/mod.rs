//! Configuration module for budget-pace
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - Analytics lookback windows

pub mod paths;
pub mod settings;

pub use paths::PacePaths;
pub use settings::{AnalyticsSettings, Settings};
