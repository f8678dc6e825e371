//! Transaction model
//!
//! A transaction is an income or expense record with a title, a positive
//! amount, a free-text category and a timestamp. The serialized form is the
//! one used by the preferences blob and by backup files.

use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, immutable after creation
    pub id: TransactionId,

    /// Human-readable label
    pub title: String,

    /// Magnitude of the transaction; direction is given by `kind`
    pub amount: Money,

    /// Free-text label used for grouping
    pub category: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// When the transaction happened (epoch millis on the wire)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a new transaction with a fresh id and an empty note
    ///
    /// The date is truncated to whole milliseconds, the precision it is
    /// stored with.
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        kind: TransactionType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            title: title.into(),
            amount,
            category: category.into(),
            kind,
            date: date.trunc_subsecs(3),
            note: String::new(),
        }
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check whether the transaction falls in the given calendar month (1-12) and year
    pub fn is_in_month(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }

    /// Validate the record-level invariants
    ///
    /// These are the checks applied both on store writes and on import.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.id.is_blank() {
            return Err(TransactionValidationError::BlankId);
        }
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::BlankTitle);
        }
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.kind,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    BlankId,
    BlankTitle,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankId => write!(f, "Transaction id must not be blank"),
            Self::BlankTitle => write!(f, "Transaction title must not be blank"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Transaction amount must not exceed {}, got {}",
                Money::MAX_AMOUNT,
                amount
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
