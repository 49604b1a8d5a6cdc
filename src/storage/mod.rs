//! Persistence backends for ledger snapshots.

pub mod json_backend;

pub use json_backend::JsonStorage;

use std::path::PathBuf;

use crate::{errors::LedgerError, ledger::Ledger};

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend {
    fn load_named(&self, name: &str) -> Result<Ledger, LedgerError>;
    fn save_named(&self, ledger: &Ledger, name: &str) -> Result<PathBuf, LedgerError>;
    fn ledger_path(&self, name: &str) -> PathBuf;
    fn last_ledger(&self) -> Result<Option<String>, LedgerError>;
    fn record_last_ledger(&self, name: Option<&str>) -> Result<(), LedgerError>;
}
