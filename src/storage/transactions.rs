//! Transaction store
//!
//! Keeps the transaction list as one JSON-encoded blob under the
//! `transactions` key of a key-value backend, next to the `monthly_budget`
//! and `currency` scalars. Every read decodes the whole list and every write
//! re-encodes it whole.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Preferences, Transaction, TransactionId, DEFAULT_CURRENCY};

use super::backend::{JsonFileBackend, KeyValueBackend, Namespace};

/// Key holding the JSON-encoded transaction array
pub const KEY_TRANSACTIONS: &str = "transactions";
/// Key holding the monthly budget in major units
pub const KEY_MONTHLY_BUDGET: &str = "monthly_budget";
/// Key holding the currency symbol
pub const KEY_CURRENCY: &str = "currency";

/// Full contents of the store at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub transactions: Vec<Transaction>,
    pub preferences: Preferences,
}

/// Whole-collection transaction store over a key-value backend
///
/// The backend sits behind a mutex so each read-modify-write sequence runs
/// to completion before another one starts.
pub struct TransactionStore<B: KeyValueBackend = JsonFileBackend> {
    backend: Mutex<B>,
    audit: Option<AuditLogger>,
}

impl TransactionStore<JsonFileBackend> {
    /// Open the on-disk store under the data directory
    pub fn open(paths: &FinancePaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(JsonFileBackend::new(paths.preferences_file())))
    }
}

impl<B: KeyValueBackend> TransactionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            audit: None,
        }
    }

    /// Append every mutation to the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    fn lock(&self) -> FinanceResult<MutexGuard<'_, B>> {
        self.backend
            .lock()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire store lock: {}", e)))
    }

    fn log(&self, entry: AuditEntry) -> FinanceResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    // ---- transactions -------------------------------------------------

    /// Append a transaction and persist the list
    pub fn add(&self, txn: Transaction) -> FinanceResult<()> {
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let mut backend = self.lock()?;
        let mut transactions = decode_transactions(&*backend)?;
        transactions.push(txn.clone());
        write_transactions(&mut *backend, &transactions)?;
        drop(backend);

        debug!(id = %txn.id, title = %txn.title, "transaction added");
        self.log(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        ))
    }

    /// Replace the first transaction whose id matches and persist the list
    ///
    /// Returns the previous version. An unknown id is reported as
    /// `NotFound` and nothing is written.
    pub fn update(&self, txn: Transaction) -> FinanceResult<Transaction> {
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let mut backend = self.lock()?;
        let mut transactions = decode_transactions(&*backend)?;
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or_else(|| FinanceError::transaction_not_found(txn.id.to_string()))?;
        let previous = std::mem::replace(slot, txn.clone());
        write_transactions(&mut *backend, &transactions)?;
        drop(backend);

        debug!(id = %txn.id, "transaction updated");
        let diff = match (serde_json::to_value(&previous), serde_json::to_value(&txn)) {
            (Ok(before), Ok(after)) => generate_diff(&before, &after),
            _ => None,
        };
        self.log(AuditEntry::update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &previous,
            &txn,
            diff,
        ))?;

        Ok(previous)
    }

    /// Remove every transaction with the given id and persist the list
    ///
    /// Returns the number of records removed; an unknown id removes nothing.
    pub fn remove(&self, id: &TransactionId) -> FinanceResult<usize> {
        let mut backend = self.lock()?;
        let (removed, kept): (Vec<_>, Vec<_>) = decode_transactions(&*backend)?
            .into_iter()
            .partition(|t| &t.id == id);
        write_transactions(&mut *backend, &kept)?;
        drop(backend);

        debug!(id = %id, removed = removed.len(), "transaction remove");
        for txn in &removed {
            self.log(AuditEntry::delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.title.clone()),
                txn,
            ))?;
        }

        Ok(removed.len())
    }

    /// Every transaction in stored (insertion) order
    ///
    /// Missing data reads as an empty list. Undecodable data is discarded
    /// with a warning and also reads as empty; use `list_all_strict` to see
    /// the error instead.
    pub fn list_all(&self) -> FinanceResult<Vec<Transaction>> {
        match self.list_all_strict() {
            Err(FinanceError::Corrupt { key, reason }) => {
                warn!(%key, %reason, "discarding unreadable transaction data");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Every transaction in stored order, surfacing undecodable data as `Corrupt`
    pub fn list_all_strict(&self) -> FinanceResult<Vec<Transaction>> {
        let backend = self.lock()?;
        decode_transactions(&*backend)
    }

    /// Look up a single transaction by id
    pub fn get(&self, id: &TransactionId) -> FinanceResult<Option<Transaction>> {
        Ok(self.list_all()?.into_iter().find(|t| &t.id == id))
    }

    // ---- preferences --------------------------------------------------

    /// Monthly budget; zero when unset
    pub fn budget(&self) -> FinanceResult<Money> {
        let backend = self.lock()?;
        read_budget(&*backend)
    }

    /// Set the monthly budget (zero clears it)
    pub fn set_budget(&self, budget: Money) -> FinanceResult<()> {
        if budget.is_negative() || budget > Money::MAX_AMOUNT {
            return Err(FinanceError::Validation(format!(
                "Budget must be between 0 and {}, got {}",
                Money::MAX_AMOUNT,
                budget
            )));
        }

        let mut backend = self.lock()?;
        let previous = read_budget(&*backend).unwrap_or_default();
        backend.put(KEY_MONTHLY_BUDGET, json!(budget.as_major_f64()))?;
        drop(backend);

        info!(budget = %budget, "monthly budget set");
        self.log(AuditEntry::update(
            EntityType::Budget,
            KEY_MONTHLY_BUDGET,
            None,
            &previous,
            &budget,
            Some(format!("{} -> {}", previous, budget)),
        ))
    }

    /// Currency symbol; `$` when unset
    pub fn currency(&self) -> FinanceResult<String> {
        let backend = self.lock()?;
        read_currency(&*backend)
    }

    /// Set the currency symbol
    pub fn set_currency(&self, currency: &str) -> FinanceResult<()> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(FinanceError::Validation(
                "Currency symbol must not be blank".into(),
            ));
        }

        let mut backend = self.lock()?;
        let previous = read_currency(&*backend).unwrap_or_else(|_| DEFAULT_CURRENCY.to_string());
        backend.put(KEY_CURRENCY, Value::String(currency.to_string()))?;
        drop(backend);

        info!(currency, "currency set");
        self.log(AuditEntry::update(
            EntityType::Currency,
            KEY_CURRENCY,
            None,
            &previous,
            &currency.to_string(),
            Some(format!("{} -> {}", previous, currency)),
        ))
    }

    /// Budget and currency together
    pub fn preferences(&self) -> FinanceResult<Preferences> {
        let backend = self.lock()?;
        Ok(Preferences {
            monthly_budget: read_budget(&*backend)?,
            currency: read_currency(&*backend)?,
        })
    }

    // ---- whole store --------------------------------------------------

    /// Erase all persisted state: transactions, budget and currency
    pub fn clear_all(&self) -> FinanceResult<()> {
        let mut backend = self.lock()?;
        backend.clear()?;
        drop(backend);

        info!("store cleared");
        self.log(AuditEntry::store_wide(Operation::Clear, "all keys removed"))
    }

    /// Read everything in one consistent pass
    pub fn snapshot(&self) -> FinanceResult<StoreSnapshot> {
        let backend = self.lock()?;
        Ok(StoreSnapshot {
            transactions: decode_transactions(&*backend)?,
            preferences: Preferences {
                monthly_budget: read_budget(&*backend)?,
                currency: read_currency(&*backend)?,
            },
        })
    }

    /// Replace all store state with the snapshot in a single backend write
    ///
    /// Every record is validated first; on any failure nothing is written.
    pub fn replace_all(&self, snapshot: StoreSnapshot) -> FinanceResult<()> {
        validate_snapshot(&snapshot)?;

        let mut entries = Namespace::new();
        entries.insert(
            KEY_TRANSACTIONS.to_string(),
            encode_transactions(&snapshot.transactions)?,
        );
        entries.insert(
            KEY_MONTHLY_BUDGET.to_string(),
            json!(snapshot.preferences.monthly_budget.as_major_f64()),
        );
        entries.insert(
            KEY_CURRENCY.to_string(),
            Value::String(snapshot.preferences.currency.clone()),
        );

        let mut backend = self.lock()?;
        backend.replace_all(entries)?;
        drop(backend);

        info!(
            transactions = snapshot.transactions.len(),
            "store contents replaced"
        );
        self.log(AuditEntry::store_wide(
            Operation::Import,
            format!(
                "{} transactions, budget {}, currency {}",
                snapshot.transactions.len(),
                snapshot.preferences.monthly_budget,
                snapshot.preferences.currency
            ),
        ))
    }
}

fn decode_transactions<B: KeyValueBackend + ?Sized>(
    backend: &B,
) -> FinanceResult<Vec<Transaction>> {
    let corrupt = |reason: String| FinanceError::Corrupt {
        key: KEY_TRANSACTIONS.to_string(),
        reason,
    };

    match backend.get(KEY_TRANSACTIONS)? {
        None => Ok(Vec::new()),
        Some(Value::String(blob)) => {
            serde_json::from_str(&blob).map_err(|e| corrupt(e.to_string()))
        }
        Some(value @ Value::Array(_)) => {
            serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))
        }
        Some(other) => Err(corrupt(format!(
            "expected a JSON-encoded array, found {}",
            other
        ))),
    }
}

fn encode_transactions(transactions: &[Transaction]) -> FinanceResult<Value> {
    let blob = serde_json::to_string(transactions)
        .map_err(|e| FinanceError::Json(format!("Failed to serialize transactions: {}", e)))?;
    Ok(Value::String(blob))
}

fn write_transactions<B: KeyValueBackend + ?Sized>(
    backend: &mut B,
    transactions: &[Transaction],
) -> FinanceResult<()> {
    backend.put(KEY_TRANSACTIONS, encode_transactions(transactions)?)
}

fn read_budget<B: KeyValueBackend + ?Sized>(backend: &B) -> FinanceResult<Money> {
    match backend.get_f64(KEY_MONTHLY_BUDGET)? {
        None => Ok(Money::zero()),
        Some(value) => Money::from_major_f64(value).ok_or_else(|| FinanceError::Corrupt {
            key: KEY_MONTHLY_BUDGET.to_string(),
            reason: format!("budget out of range: {}", value),
        }),
    }
}

fn read_currency<B: KeyValueBackend + ?Sized>(backend: &B) -> FinanceResult<String> {
    Ok(backend
        .get_string(KEY_CURRENCY)?
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

fn validate_snapshot(snapshot: &StoreSnapshot) -> FinanceResult<()> {
    let mut seen = HashSet::new();
    for (index, txn) in snapshot.transactions.iter().enumerate() {
        txn.validate().map_err(|e| {
            FinanceError::Validation(format!("transaction #{}: {}", index + 1, e))
        })?;
        if !seen.insert(&txn.id) {
            return Err(FinanceError::Validation(format!(
                "transaction #{}: duplicate id {}",
                index + 1,
                txn.id
            )));
        }
    }

    let budget = snapshot.preferences.monthly_budget;
    if budget.is_negative() || budget > Money::MAX_AMOUNT {
        return Err(FinanceError::Validation(format!(
            "budget must be between 0 and {}, got {}",
            Money::MAX_AMOUNT,
            budget
        )));
    }
    if snapshot.preferences.currency.trim().is_empty() {
        return Err(FinanceError::Validation(
            "currency symbol must not be blank".into(),
        ));
    }

    Ok(())
}
