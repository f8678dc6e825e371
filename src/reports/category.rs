//! Expense totals per category

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Money, Transaction};

/// Sum of expense amounts grouped by category label
///
/// Income is ignored. The map carries no ordering; see
/// `sorted_category_totals` for a display order.
pub fn category_expense_totals(transactions: &[Transaction]) -> HashMap<String, Money> {
    let mut totals: HashMap<String, Money> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(txn.category.clone()).or_default() += txn.amount;
    }
    totals
}

/// One row of a category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Share of all expenses, 0-100
    pub percentage: f64,
}

/// Category totals ordered by descending total, then by name
pub fn sorted_category_totals(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = category_expense_totals(transactions);
    let grand_total: Money = totals.values().sum();

    let mut rows: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| {
            let percentage = if grand_total.is_zero() {
                0.0
            } else {
                total.cents() as f64 / grand_total.cents() as f64 * 100.0
            };
            CategoryShare {
                category,
                total,
                percentage,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    rows
}
