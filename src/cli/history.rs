//! Audit history command

use crate::audit::AuditLogger;
use crate::error::FinanceResult;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(logger: &AuditLogger, limit: usize) -> FinanceResult<()> {
    if !logger.exists() {
        println!("No history recorded yet.");
        return Ok(());
    }

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
