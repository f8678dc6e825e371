//! Backup CLI commands
//!
//! Export, import and listing of `finance_data_*.json` backups.

use std::path::PathBuf;

use chrono::Utc;

use crate::backup::{import_from_file, import_latest, load_backup, BackupManager};
use crate::error::{FinanceError, FinanceResult};
use crate::storage::{KeyValueBackend, TransactionStore};

/// Write a backup of the current data
pub fn handle_export_command<B: KeyValueBackend>(
    manager: &BackupManager,
    store: &TransactionStore<B>,
) -> FinanceResult<()> {
    let path = manager.export(store)?;
    println!("Data exported to: {}", path.display());
    Ok(())
}

/// Replace all data with a backup
///
/// Without `force` only validates the backup and reports what would happen.
pub fn handle_import_command<B: KeyValueBackend>(
    manager: &BackupManager,
    store: &TransactionStore<B>,
    file: Option<PathBuf>,
    force: bool,
) -> FinanceResult<()> {
    let path = match &file {
        Some(path) => path.clone(),
        None => manager
            .latest_backup()?
            .map(|info| info.path)
            .ok_or_else(|| FinanceError::Import("No backup files found".into()))?,
    };

    if !force {
        let document = load_backup(&path)?;
        println!("Backup: {}", path.display());
        println!("  Transactions: {}", document.transactions.len());
        println!("  Budget:       {}", document.budget);
        println!("  Currency:     {}", document.currency);
        println!();
        println!("WARNING: This will overwrite ALL current data!");
        println!("To proceed, run again with --force flag:");
        println!("  fintrack import --file {} --force", path.display());
        return Ok(());
    }

    let result = match file {
        Some(path) => import_from_file(&path, store)?,
        None => import_latest(manager, store)?,
    };
    println!("{}", result.summary());
    Ok(())
}

/// List backups, newest first
pub fn handle_backups_command(manager: &BackupManager) -> FinanceResult<()> {
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("No backups found.");
        println!("Create one with: fintrack export");
        return Ok(());
    }

    println!("Available Backups");
    println!("=================");
    for (i, backup) in backups.iter().enumerate() {
        let age = Utc::now().signed_duration_since(backup.modified_at);
        println!(
            "  {}. {} ({} ago, {})",
            i + 1,
            backup.filename,
            format_duration(age),
            format_size(backup.size_bytes),
        );
    }
    println!();
    println!("Total: {} backup(s)", backups.len());
    Ok(())
}

fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{}d", seconds / 86400)
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(30)), "30s");
        assert_eq!(format_duration(chrono::Duration::seconds(120)), "2m");
        assert_eq!(format_duration(chrono::Duration::seconds(7200)), "2h");
        assert_eq!(format_duration(chrono::Duration::seconds(172800)), "2d");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1572864), "1.5 MB");
    }
}
