pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing the ledger
/// document and its backups. The whole aggregate is the unit of
/// durability: a save lands every collection or none of them.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn store_path(&self, name: &str) -> PathBuf;
    fn list_stores(&self) -> Result<Vec<String>>;
    fn backup(&self, ledger: &Ledger, name: &str, note: Option<&str>) -> Result<PathBuf>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Ledger>;
    fn last_store(&self) -> Result<Option<String>>;
    fn record_last_store(&self, name: Option<&str>) -> Result<()>;

    /// Ad-hoc file operations for export/import. Defaults forward to the
    /// plain JSON helpers.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::JsonStorage;
