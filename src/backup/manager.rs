//! Backup export for fintrack
//!
//! Writes the whole data set to timestamped `finance_data_*.json` files and
//! lists the ones already present in the backup directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction};
use crate::storage::{write_json_atomic, KeyValueBackend, TransactionStore};

/// Prefix shared by every backup file name
pub const BACKUP_PREFIX: &str = "finance_data_";
/// Timestamp layout between the prefix and the `.json` suffix
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk backup document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupFile {
    pub transactions: Vec<Transaction>,
    /// Monthly budget in major units
    pub budget: Money,
    pub currency: String,
}

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Last modification time
    pub modified_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Creates and lists backups
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(paths: &FinancePaths) -> Self {
        Self::with_dir(paths.backup_dir())
    }

    pub fn with_dir(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// File name a backup taken at `at` gets
    pub fn filename_for(at: DateTime<Utc>) -> String {
        format!("{}{}.json", BACKUP_PREFIX, at.format(BACKUP_TIMESTAMP_FORMAT))
    }

    /// Export the store's current contents
    ///
    /// Returns the path of the written file.
    pub fn export<B: KeyValueBackend>(&self, store: &TransactionStore<B>) -> FinanceResult<PathBuf> {
        let snapshot = store
            .snapshot()
            .map_err(|e| FinanceError::Export(format!("Failed to read store: {}", e)))?;

        let document = BackupFile {
            transactions: snapshot.transactions,
            budget: snapshot.preferences.monthly_budget,
            currency: snapshot.preferences.currency,
        };

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            FinanceError::Export(format!("Failed to create backup directory: {}", e))
        })?;

        let path = self.unused_path(Utc::now());
        write_json_atomic(&path, &document)
            .map_err(|e| FinanceError::Export(format!("Failed to write backup: {}", e)))?;

        info!(
            path = %path.display(),
            transactions = document.transactions.len(),
            "backup exported"
        );
        Ok(path)
    }

    /// Backup path for `at` that does not exist yet
    ///
    /// A second export within the same second gets `_2`, `_3` and so on
    /// appended to the timestamp instead of replacing the first file.
    fn unused_path(&self, at: DateTime<Utc>) -> PathBuf {
        let stamp = at.format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut path = self.backup_dir.join(Self::filename_for(at));
        let mut counter = 2u32;
        while path.exists() {
            path = self
                .backup_dir
                .join(format!("{}{}_{}.json", BACKUP_PREFIX, stamp, counter));
            counter += 1;
        }
        path
    }

    /// All backup files, most recently modified first
    pub fn list_backups(&self) -> FinanceResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            FinanceError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| FinanceError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(backups)
    }

    /// The most recently modified backup, if any
    pub fn latest_backup(&self) -> FinanceResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn is_backup_name(filename: &str) -> bool {
    filename.starts_with(BACKUP_PREFIX) && filename.ends_with(".json")
}

fn backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    if !is_backup_name(&filename) {
        return None;
    }

    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        modified_at: DateTime::<Utc>::from(metadata.modified().ok()?),
        size_bytes: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::storage::MemoryBackend;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = BackupManager::with_dir(temp_dir.path().join("backups"));
        (manager, temp_dir)
    }

    fn seeded_store() -> TransactionStore<MemoryBackend> {
        let store = TransactionStore::new(MemoryBackend::new());
        store
            .add(Transaction::new(
                "Salary",
                Money::from_cents(100000),
                "Work",
                TransactionType::Income,
                Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ))
            .unwrap();
        store.set_budget(Money::from_cents(50000)).unwrap();
        store.set_currency("€").unwrap();
        store
    }

    #[test]
    fn test_filename_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 3, 14, 7, 9).unwrap();
        assert_eq!(
            BackupManager::filename_for(at),
            "finance_data_20240503_140709.json"
        );
    }

    #[test]
    fn test_export_writes_document() {
        let (manager, _temp) = create_test_manager();
        let store = seeded_store();

        let path = manager.export(&store).unwrap();
        assert!(path.exists());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["budget"], serde_json::json!(500.0));
        assert_eq!(raw["currency"], "€");
        assert_eq!(raw["transactions"][0]["title"], "Salary");
        assert_eq!(raw["transactions"][0]["type"], "INCOME");
        assert_eq!(raw["transactions"][0]["amount"], serde_json::json!(1000.0));
    }

    #[test]
    fn test_same_second_exports_keep_both_files() {
        let (manager, _temp) = create_test_manager();
        let at = Utc.with_ymd_and_hms(2024, 5, 3, 14, 7, 9).unwrap();
        fs::create_dir_all(manager.backup_dir()).unwrap();
        fs::write(manager.backup_dir().join(BackupManager::filename_for(at)), "{}").unwrap();

        assert_eq!(
            manager.unused_path(at),
            manager.backup_dir().join("finance_data_20240503_140709_2.json")
        );

        let store = seeded_store();
        let first = manager.export(&store).unwrap();
        let second = manager.export(&store).unwrap();
        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(manager.list_backups().unwrap().len(), 3);
    }

    #[test]
    fn test_list_ignores_unrelated_files() {
        let (manager, _temp) = create_test_manager();
        fs::create_dir_all(manager.backup_dir()).unwrap();
        fs::write(manager.backup_dir().join("notes.txt"), "x").unwrap();
        fs::write(manager.backup_dir().join("finance_data_x.txt"), "x").unwrap();
        fs::write(
            manager.backup_dir().join("finance_data_20240101_000000.json"),
            "{}",
        )
        .unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].filename, "finance_data_20240101_000000.json");
    }

    #[test]
    fn test_latest_backup() {
        let (manager, _temp) = create_test_manager();
        assert!(manager.latest_backup().unwrap().is_none());

        fs::create_dir_all(manager.backup_dir()).unwrap();
        fs::write(
            manager.backup_dir().join("finance_data_20240101_000000.json"),
            "{}",
        )
        .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(
            manager.backup_dir().join("finance_data_20240102_000000.json"),
            "{}",
        )
        .unwrap();

        let latest = manager.latest_backup().unwrap().unwrap();
        assert_eq!(latest.filename, "finance_data_20240102_000000.json");
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _temp) = create_test_manager();
        assert!(manager.list_backups().unwrap().is_empty());
    }
}
