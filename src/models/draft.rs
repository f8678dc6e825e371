//! Raw user input for a transaction
//!
//! A draft carries the text a user typed. Turning it into a `Transaction`
//! performs the form-level checks: non-blank title and category, a parseable
//! positive amount and a parseable date.

use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, Utc};

use super::ids::TransactionId;
use super::money::Money;
use super::transaction::{Transaction, TransactionType};
use crate::error::{FinanceError, FinanceResult};

/// Accepted input date formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%d/%m/%Y"];

/// Unvalidated transaction fields as entered by the user
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub kind: TransactionType,
    /// Date text; `None` means "now"
    pub date: Option<String>,
    pub note: String,
}

impl TransactionDraft {
    /// Build a brand-new transaction with a fresh id
    pub fn build(self) -> FinanceResult<Transaction> {
        self.build_with_id(TransactionId::new())
    }

    /// Build a transaction that keeps an existing id (edit flow)
    pub fn build_with_id(self, id: TransactionId) -> FinanceResult<Transaction> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FinanceError::Validation("Title is required".into()));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation("Category is required".into()));
        }

        let amount = Money::parse(&self.amount)
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        if !amount.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }

        let date = match self.date.as_deref() {
            Some(text) => parse_date(text)?,
            None => Utc::now().trunc_subsecs(3),
        };

        Ok(Transaction {
            id,
            title: title.to_string(),
            amount,
            category: category.to_string(),
            kind: self.kind,
            date,
            note: self.note.trim().to_string(),
        })
    }
}

/// Parse a calendar date typed by the user into midnight UTC of that day
pub fn parse_date(text: &str) -> FinanceResult<DateTime<Utc>> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| {
            FinanceError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD (e.g. 2024-05-01)",
                text
            ))
        })
}
