//! Backup export and import for fintrack
//!
//! # Backup Format
//!
//! Backups are JSON files named `finance_data_<YYYYMMDD_HHmmss>.json`:
//! - `transactions`: array of transaction records
//! - `budget`: monthly budget in major units
//! - `currency`: currency symbol
//!
//! Import needs all three keys and valid transactions, and then replaces the
//! whole store in a single write.
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::backup::{import_latest, BackupManager};
//!
//! let manager = BackupManager::new(&paths);
//! let path = manager.export(&store)?;
//!
//! // Later
//! let result = import_latest(&manager, &store)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupFile, BackupInfo, BackupManager, BACKUP_PREFIX, BACKUP_TIMESTAMP_FORMAT};
pub use restore::{import_from_file, import_latest, load_backup, ImportSummary};
