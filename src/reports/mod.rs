//! Reports module for fintrack
//!
//! Pure, stateless aggregations over a transaction list: monthly summary,
//! budget consumption and per-category expense totals. Callers read the list
//! from the store and pass it in.

pub mod budget;
pub mod category;
pub mod summary;

pub use budget::{budget_progress, BudgetProgress, BudgetStatus};
pub use category::{category_expense_totals, sorted_category_totals, CategoryShare};
pub use summary::{monthly_expenses, monthly_summary, MonthRef, MonthlySummary};
