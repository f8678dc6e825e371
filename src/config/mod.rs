//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Application config persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Config;
