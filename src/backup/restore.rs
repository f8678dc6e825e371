//! Backup import for fintrack
//!
//! Reads a backup document, validates it completely and only then replaces
//! the store's contents in one write. A failure at any step leaves the store
//! as it was.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Preferences};
use crate::storage::{KeyValueBackend, StoreSnapshot, TransactionStore};

use super::manager::{BackupFile, BackupManager};

const REQUIRED_KEYS: [&str; 3] = ["transactions", "budget", "currency"];

/// What an import replaced the store with
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub source: PathBuf,
    pub transactions: usize,
    pub budget: Money,
    pub currency: String,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} transaction(s), budget {}, currency {} from {}",
            self.transactions,
            self.budget,
            self.currency,
            self.source.display()
        )
    }
}

/// Import the most recently modified backup in the manager's directory
pub fn import_latest<B: KeyValueBackend>(
    manager: &BackupManager,
    store: &TransactionStore<B>,
) -> FinanceResult<ImportSummary> {
    let latest = manager
        .latest_backup()
        .map_err(|e| FinanceError::Import(e.to_string()))?
        .ok_or_else(|| FinanceError::Import("No backup files found".into()))?;

    import_from_file(&latest.path, store)
}

/// Import a specific backup file
pub fn import_from_file<B: KeyValueBackend>(
    path: &Path,
    store: &TransactionStore<B>,
) -> FinanceResult<ImportSummary> {
    let result = load_backup(path).and_then(|document| {
        let summary = ImportSummary {
            source: path.to_path_buf(),
            transactions: document.transactions.len(),
            budget: document.budget,
            currency: document.currency.clone(),
        };
        store
            .replace_all(StoreSnapshot {
                transactions: document.transactions,
                preferences: Preferences {
                    monthly_budget: document.budget,
                    currency: document.currency,
                },
            })
            .map_err(|e| match e {
                FinanceError::Validation(msg) => FinanceError::Import(msg),
                other => other,
            })?;
        Ok(summary)
    });

    match &result {
        Ok(summary) => info!(
            path = %path.display(),
            transactions = summary.transactions,
            "backup imported"
        ),
        Err(e) => warn!(path = %path.display(), error = %e, "backup import rejected"),
    }
    result
}

/// Read and validate a backup document without touching any store
pub fn load_backup(path: &Path) -> FinanceResult<BackupFile> {
    let contents = fs::read_to_string(path)
        .map_err(|e| FinanceError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let raw: Value = serde_json::from_str(&contents)
        .map_err(|e| FinanceError::Import(format!("Failed to parse backup file: {}", e)))?;

    let object = raw
        .as_object()
        .ok_or_else(|| FinanceError::Import("Invalid backup file format".into()))?;
    if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !object.contains_key(**k)) {
        return Err(FinanceError::Import(format!(
            "Invalid backup file format: missing '{}'",
            missing
        )));
    }

    let document: BackupFile = serde_json::from_value(raw)
        .map_err(|e| FinanceError::Import(format!("Invalid backup file format: {}", e)))?;

    for (index, txn) in document.transactions.iter().enumerate() {
        txn.validate().map_err(|e| {
            FinanceError::Import(format!("Invalid transaction #{}: {}", index + 1, e))
        })?;
    }

    Ok(document)
}
