//! Core data models for fintrack
//!
//! This module contains the data structures of the finance domain:
//! transactions, money amounts, ids, user input drafts and preferences.

pub mod draft;
pub mod ids;
pub mod money;
pub mod preferences;
pub mod transaction;

pub use draft::{parse_date, TransactionDraft};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use preferences::{Preferences, DEFAULT_CURRENCY};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
