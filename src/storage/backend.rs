//! Key-value settings backends
//!
//! The store keeps all of its state in one flat namespace of JSON values.
//! `JsonFileBackend` persists that namespace as a single JSON object file;
//! `MemoryBackend` keeps it in memory for tests and embedding.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{FinanceError, FinanceResult};

use super::file_io::{read_json, write_json_atomic};

/// Flat key → JSON value map
pub type Namespace = BTreeMap<String, Value>;

/// A flat key-value namespace with whole-value reads and writes
pub trait KeyValueBackend: Send {
    /// Read a value; `None` when the key is absent
    fn get(&self, key: &str) -> FinanceResult<Option<Value>>;

    /// Write a value, replacing any previous one
    fn put(&mut self, key: &str, value: Value) -> FinanceResult<()>;

    /// Remove every key
    fn clear(&mut self) -> FinanceResult<()>;

    /// Replace the entire namespace in one write
    fn replace_all(&mut self, entries: Namespace) -> FinanceResult<()>;

    /// Read a string value, failing if the key holds another type
    fn get_string(&self, key: &str) -> FinanceResult<Option<String>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(type_mismatch(key, "string", &other)),
        }
    }

    /// Read a numeric value, failing if the key holds another type
    fn get_f64(&self, key: &str) -> FinanceResult<Option<f64>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| type_mismatch(key, "number", &Value::Number(n))),
            Some(other) => Err(type_mismatch(key, "number", &other)),
        }
    }
}

fn type_mismatch(key: &str, expected: &str, found: &Value) -> FinanceError {
    FinanceError::Corrupt {
        key: key.to_string(),
        reason: format!("expected {}, found {}", expected, found),
    }
}

/// Namespace stored as one JSON object file, rewritten whole on every write
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> FinanceResult<Namespace> {
        read_json(&self.path)
    }

    fn save(&self, namespace: &Namespace) -> FinanceResult<()> {
        write_json_atomic(&self.path, namespace)
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn put(&mut self, key: &str, value: Value) -> FinanceResult<()> {
        let mut namespace = self.load()?;
        namespace.insert(key.to_string(), value);
        self.save(&namespace)
    }

    fn clear(&mut self) -> FinanceResult<()> {
        self.save(&Namespace::new())
    }

    fn replace_all(&mut self, entries: Namespace) -> FinanceResult<()> {
        self.save(&entries)
    }
}

/// In-memory namespace
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Namespace,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing entries (e.g. to simulate a corrupt blob)
    pub fn with_entries(entries: Namespace) -> Self {
        Self { entries }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Value) -> FinanceResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&mut self) -> FinanceResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn replace_all(&mut self, entries: Namespace) -> FinanceResult<()> {
        self.entries = entries;
        Ok(())
    }
}
