//! Budget consumption

use serde::Serialize;
use std::fmt;

use crate::models::Money;

/// How close spending is to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    /// No budget configured
    Unset,
    Normal,
    /// At least 80% of the budget spent
    Warning,
    /// Spending reached or passed the budget
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "No budget set"),
            Self::Normal => write!(f, "On track"),
            Self::Warning => write!(f, "Budget almost exceeded!"),
            Self::Exceeded => write!(f, "Budget exceeded!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    /// `round(expenses / budget * 100)`, 0 when unset
    pub ratio_percent: i64,
    pub status: BudgetStatus,
}

/// Share of the budget consumed by `monthly_expenses`
pub fn budget_progress(monthly_expenses: Money, monthly_budget: Money) -> BudgetProgress {
    if monthly_budget.cents() <= 0 {
        return BudgetProgress {
            ratio_percent: 0,
            status: BudgetStatus::Unset,
        };
    }

    let spent = monthly_expenses.cents() as f64;
    let budget = monthly_budget.cents() as f64;
    let ratio_percent = (spent / budget * 100.0).round() as i64;

    // 80% threshold compared exactly in cents: spent * 5 >= budget * 4
    let status = if monthly_expenses >= monthly_budget {
        BudgetStatus::Exceeded
    } else if i128::from(monthly_expenses.cents()) * 5 >= i128::from(monthly_budget.cents()) * 4 {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    };

    BudgetProgress {
        ratio_percent,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    #[test]
    fn test_exactly_eighty_percent_warns() {
        let progress = budget_progress(units(80), units(100));
        assert_eq!(progress.ratio_percent, 80);
        assert_eq!(progress.status, BudgetStatus::Warning);
    }

    #[test]
    fn test_just_below_eighty_is_normal() {
        let progress = budget_progress(Money::from_cents(7999), units(100));
        assert_eq!(progress.ratio_percent, 80);
        assert_eq!(progress.status, BudgetStatus::Normal);
    }

    #[test]
    fn test_reaching_budget_exceeds() {
        assert_eq!(budget_progress(units(100), units(100)).status, BudgetStatus::Exceeded);
        let over = budget_progress(units(150), units(100));
        assert_eq!(over.status, BudgetStatus::Exceeded);
        assert_eq!(over.ratio_percent, 150);
    }

    #[test]
    fn test_unset_budget() {
        let progress = budget_progress(units(50), Money::zero());
        assert_eq!(progress.status, BudgetStatus::Unset);
        assert_eq!(progress.ratio_percent, 0);

        assert_eq!(
            budget_progress(units(50), Money::from_cents(-100)).status,
            BudgetStatus::Unset
        );
    }

    #[test]
    fn test_ratio_rounds() {
        assert_eq!(budget_progress(Money::from_cents(3333), units(100)).ratio_percent, 33);
        assert_eq!(budget_progress(units(2), units(3)).ratio_percent, 67);
        assert_eq!(budget_progress(Money::zero(), units(100)).status, BudgetStatus::Normal);
    }
}
