//! Explicit store commands
//!
//! Front ends describe what they want as a `StoreCommand` value and hand it
//! to `TransactionStore::dispatch`, instead of wiring closures straight into
//! the store.

use crate::error::FinanceResult;
use crate::models::{Money, Transaction, TransactionId};

use super::backend::KeyValueBackend;
use super::transactions::TransactionStore;

/// A single mutation of the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    Add(Transaction),
    Update(Transaction),
    Remove(TransactionId),
    SetBudget(Money),
    SetCurrency(String),
    ClearAll,
}

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(TransactionId),
    /// Carries the version that was replaced
    Updated(Transaction),
    Removed(usize),
    BudgetSet(Money),
    CurrencySet(String),
    Cleared,
}

impl<B: KeyValueBackend> TransactionStore<B> {
    /// Route a command to the matching typed operation
    pub fn dispatch(&self, command: StoreCommand) -> FinanceResult<CommandOutcome> {
        match command {
            StoreCommand::Add(txn) => {
                let id = txn.id.clone();
                self.add(txn)?;
                Ok(CommandOutcome::Added(id))
            }
            StoreCommand::Update(txn) => self.update(txn).map(CommandOutcome::Updated),
            StoreCommand::Remove(id) => self.remove(&id).map(CommandOutcome::Removed),
            StoreCommand::SetBudget(budget) => {
                self.set_budget(budget)?;
                Ok(CommandOutcome::BudgetSet(budget))
            }
            StoreCommand::SetCurrency(currency) => {
                self.set_currency(&currency)?;
                Ok(CommandOutcome::CurrencySet(currency.trim().to_string()))
            }
            StoreCommand::ClearAll => {
                self.clear_all()?;
                Ok(CommandOutcome::Cleared)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::storage::backend::MemoryBackend;
    use chrono::Utc;

    #[test]
    fn test_dispatch_routes_to_store() {
        let store = TransactionStore::new(MemoryBackend::new());
        let txn = Transaction::new(
            "Salary",
            Money::from_cents(100000),
            "Work",
            TransactionType::Income,
            Utc::now(),
        );
        let id = txn.id.clone();

        assert_eq!(
            store.dispatch(StoreCommand::Add(txn.clone())).unwrap(),
            CommandOutcome::Added(id.clone())
        );

        let mut edited = txn.clone();
        edited.title = "Bonus".into();
        assert_eq!(
            store.dispatch(StoreCommand::Update(edited)).unwrap(),
            CommandOutcome::Updated(txn)
        );

        assert_eq!(
            store
                .dispatch(StoreCommand::SetCurrency(" ¥ ".into()))
                .unwrap(),
            CommandOutcome::CurrencySet("¥".into())
        );
        assert_eq!(
            store.dispatch(StoreCommand::Remove(id)).unwrap(),
            CommandOutcome::Removed(1)
        );
        assert_eq!(
            store.dispatch(StoreCommand::ClearAll).unwrap(),
            CommandOutcome::Cleared
        );
        assert_eq!(store.currency().unwrap(), "$");
    }
}
