//! CLI command handlers
//!
//! Bridges clap argument parsing with the store, the report functions and
//! the backup manager. Mutations go through `StoreCommand` dispatch.

pub mod backup;
pub mod budget;
pub mod history;
pub mod report;
pub mod transaction;

pub use backup::{handle_backups_command, handle_export_command, handle_import_command};
pub use budget::{handle_budget_command, handle_currency_command, BudgetCommands, CurrencyCommands};
pub use history::handle_history_command;
pub use report::{handle_categories_command, handle_summary_command, resolve_month};
pub use transaction::{handle_transaction_command, resolve_transaction, TransactionCommands};
