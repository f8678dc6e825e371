//! Report CLI commands

use crate::display::{
    format_budget_progress, format_category_breakdown, format_monthly_summary, CurrencyFormat,
};
use crate::error::FinanceResult;
use crate::models::Transaction;
use crate::reports::{budget_progress, monthly_summary, sorted_category_totals, MonthRef};
use crate::storage::{KeyValueBackend, TransactionStore};

/// Month from optional `--month`/`--year` flags, filling gaps from today
pub fn resolve_month(month: Option<u32>, year: Option<i32>) -> FinanceResult<MonthRef> {
    let current = MonthRef::current();
    MonthRef::new(
        month.unwrap_or(current.month()),
        year.unwrap_or(current.year()),
    )
}

/// Print the monthly summary followed by budget progress
pub fn handle_summary_command<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    month: Option<u32>,
    year: Option<i32>,
) -> FinanceResult<()> {
    let month = resolve_month(month, year)?;
    let currency = CurrencyFormat::new(store.currency()?);
    let transactions = store.list_all()?;

    let summary = monthly_summary(&transactions, month);
    let budget = store.budget()?;
    let progress = budget_progress(summary.expenses, budget);

    print!("{}", format_monthly_summary(month, &summary, &currency));
    println!();
    print!(
        "{}",
        format_budget_progress(summary.expenses, budget, &progress, &currency)
    );
    Ok(())
}

/// Print expense totals by category
///
/// Covers every transaction unless a month is given.
pub fn handle_categories_command<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    month: Option<u32>,
    year: Option<i32>,
) -> FinanceResult<()> {
    let currency = CurrencyFormat::new(store.currency()?);
    let mut transactions = store.list_all()?;

    if month.is_some() || year.is_some() {
        let month = resolve_month(month, year)?;
        transactions.retain(|t: &Transaction| month.contains(t));
        println!("Expenses by category for {}", month);
    } else {
        println!("Expenses by category");
    }

    println!(
        "{}",
        format_category_breakdown(&sorted_category_totals(&transactions), &currency)
    );
    Ok(())
}
