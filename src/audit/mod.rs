//! Audit logging system for fintrack
//!
//! Records every store mutation (transaction create/update/delete, budget
//! and currency changes, clear and import) in an append-only JSON-lines file.
//!
//! - `AuditEntry`: one log record with timestamp, operation, entity and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: one-line summary of field changes for updates.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
