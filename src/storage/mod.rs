//! Storage layer for fintrack
//!
//! A flat key-value namespace (JSON file on disk, or memory) holding the
//! transaction list blob plus the budget and currency settings, with the
//! `TransactionStore` on top.

pub mod backend;
pub mod commands;
pub mod file_io;
pub mod transactions;

pub use backend::{JsonFileBackend, KeyValueBackend, MemoryBackend, Namespace};
pub use commands::{CommandOutcome, StoreCommand};
pub use file_io::{read_json, write_json_atomic};
pub use transactions::{
    StoreSnapshot, TransactionStore, KEY_CURRENCY, KEY_MONTHLY_BUDGET, KEY_TRANSACTIONS,
};
