//! Monthly income / expense / balance summary

use chrono::{Datelike, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction, TransactionType};

/// A calendar month of a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthRef {
    /// 1-12
    month: u32,
    year: i32,
}

impl MonthRef {
    /// Build a month reference, rejecting months outside 1-12
    pub fn new(month: u32, year: i32) -> FinanceResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { month, year })
    }

    /// The current UTC month
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, txn: &Transaction) -> bool {
        txn.is_in_month(self.month, self.year)
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlySummary {
    pub income: Money,
    pub expenses: Money,
    /// Always `income - expenses`
    pub balance: Money,
}

/// Sum income and expenses of the transactions dated in `month`
///
/// Amounts are summed as given, so zero or negative amounts (which the
/// store never writes, but callers may pass) flow through unchanged.
pub fn monthly_summary(transactions: &[Transaction], month: MonthRef) -> MonthlySummary {
    let (income, expenses) = transactions
        .iter()
        .filter(|t| month.contains(t))
        .fold((Money::zero(), Money::zero()), |(inc, exp), t| match t.kind {
            TransactionType::Income => (inc + t.amount, exp),
            TransactionType::Expense => (inc, exp + t.amount),
        });

    MonthlySummary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Total expenses dated in `month`
pub fn monthly_expenses(transactions: &[Transaction], month: MonthRef) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t))
        .map(|t| t.amount)
        .sum()
}
