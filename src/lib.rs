//! fintrack - personal finance tracker
//!
//! This library provides the core of the fintrack application: recording
//! income and expense transactions, a monthly budget with a currency symbol,
//! monthly and per-category aggregates, and JSON backup export/import.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, preferences)
//! - `storage`: Key-value backends and the whole-collection `TransactionStore`
//! - `reports`: Pure aggregations (monthly summary, budget progress, categories)
//! - `audit`: Audit logging system
//! - `backup`: Backup export and import
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::paths::FinancePaths;
//! use fintrack::reports::{monthly_summary, MonthRef};
//! use fintrack::storage::TransactionStore;
//!
//! let paths = FinancePaths::new()?;
//! let store = TransactionStore::open(&paths)?;
//! let summary = monthly_summary(&store.list_all()?, MonthRef::current());
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
