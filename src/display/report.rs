//! Report formatting for terminal output

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::reports::{BudgetProgress, BudgetStatus, CategoryShare, MonthRef, MonthlySummary};

use super::currency::CurrencyFormat;

const WIDTH: usize = 40;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar, clamped to `width` cells
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Income, expenses and balance for one month
pub fn format_monthly_summary(
    month: MonthRef,
    summary: &MonthlySummary,
    currency: &CurrencyFormat,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Summary for {}\n", month));
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("Income:    {:>20}\n", currency.format(summary.income)));
    output.push_str(&format!("Expenses:  {:>20}\n", currency.format(summary.expenses)));
    output.push_str(&format!("Balance:   {:>20}\n", currency.format(summary.balance)));
    output
}

/// Budget consumption block
pub fn format_budget_progress(
    expenses: Money,
    budget: Money,
    progress: &BudgetProgress,
    currency: &CurrencyFormat,
) -> String {
    if progress.status == BudgetStatus::Unset {
        return format!(
            "{}\nUse `fintrack budget set <amount>` to track spending.\n",
            BudgetStatus::Unset
        );
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Spent {} of {} ({}%)\n",
        currency.format(expenses),
        currency.format(budget),
        progress.ratio_percent
    ));
    output.push_str(&format_bar(progress.ratio_percent as f64, 100.0, WIDTH));
    output.push('\n');
    output.push_str(&format!("{}\n", progress.status));
    output
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Expense breakdown, one row per category
pub fn format_category_breakdown(rows: &[CategoryShare], currency: &CurrencyFormat) -> String {
    if rows.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<CategoryRow> = rows
        .iter()
        .map(|row| CategoryRow {
            category: row.category.clone(),
            total: currency.format(row.total),
            share: format_percentage(row.percentage),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::budget_progress;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.27), "5.3%");
        assert_eq!(format_percentage(75.0), "75%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 4), "██░░");
        assert_eq!(format_bar(150.0, 100.0, 4), "████");
        assert_eq!(format_bar(0.0, 100.0, 2), "░░");
    }

    #[test]
    fn test_monthly_summary_block() {
        let summary = MonthlySummary {
            income: Money::from_cents(100000),
            expenses: Money::from_cents(40000),
            balance: Money::from_cents(60000),
        };
        let output = format_monthly_summary(
            MonthRef::new(5, 2024).unwrap(),
            &summary,
            &CurrencyFormat::default(),
        );
        assert!(output.contains("2024-05"));
        assert!(output.contains("$1,000.00"));
        assert!(output.contains("$600.00"));
    }

    #[test]
    fn test_budget_block() {
        let expenses = Money::from_cents(8000);
        let budget = Money::from_cents(10000);
        let output = format_budget_progress(
            expenses,
            budget,
            &budget_progress(expenses, budget),
            &CurrencyFormat::default(),
        );
        assert!(output.contains("80%"));
        assert!(output.contains("Budget almost exceeded!"));

        let unset = format_budget_progress(
            expenses,
            Money::zero(),
            &budget_progress(expenses, Money::zero()),
            &CurrencyFormat::default(),
        );
        assert!(unset.contains("No budget set"));
    }

    #[test]
    fn test_category_breakdown() {
        let rows = vec![CategoryShare {
            category: "Housing".into(),
            total: Money::from_cents(40000),
            percentage: 100.0,
        }];
        let output = format_category_breakdown(&rows, &CurrencyFormat::default());
        assert!(output.contains("Housing"));
        assert!(output.contains("$400.00"));
        assert!(output.contains("100%"));
    }
}
