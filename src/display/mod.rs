//! Display formatting for terminal output
//!
//! Turns transactions and report results into tables and text blocks.
//! Money is always rendered through an explicit `CurrencyFormat`.

pub mod currency;
pub mod report;
pub mod transaction;

pub use currency::CurrencyFormat;
pub use report::{format_budget_progress, format_category_breakdown, format_monthly_summary};
pub use transaction::{format_transaction_details, format_transaction_table, sort_for_display};
