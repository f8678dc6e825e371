//! Currency formatting

use crate::models::{Money, TransactionType, DEFAULT_CURRENCY};

/// Formats amounts with the user's chosen currency symbol
///
/// Built from the stored preference and passed to whatever renders money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// `$1,234.56`
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.symbol)
    }

    /// Amount prefixed with `+` for income and `-` for expenses
    pub fn format_signed(&self, amount: Money, kind: TransactionType) -> String {
        match kind {
            TransactionType::Income => format!("+{}", self.format(amount)),
            TransactionType::Expense => format!("-{}", self.format(amount)),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}
