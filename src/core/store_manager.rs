//! Facade that owns the current ledger document and coordinates
//! persistence and backups behind the [`StorageBackend`] trait.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::storage::StorageBackend;

pub struct StoreManager {
    pub current: Option<Ledger>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl StoreManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Borrows the open ledger or reports that none is loaded.
    pub fn require_current(&self) -> Result<&Ledger, LedgerError> {
        self.current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no store is open".into()))
    }

    pub fn require_current_mut(&mut self) -> Result<&mut Ledger, LedgerError> {
        self.current
            .as_mut()
            .ok_or_else(|| LedgerError::Persistence("no store is open".into()))
    }

    pub fn open(&mut self, name: &str) -> Result<(), LedgerError> {
        let ledger = self.storage.load(name)?;
        ensure_schema_support(ledger.schema_version)?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        self.storage.record_last_store(Some(name))?;
        info!(store = name, "store opened");
        Ok(())
    }

    pub fn open_last(&mut self) -> Result<Option<String>, LedgerError> {
        match self.storage.last_store()? {
            Some(name) => {
                self.open(&name)?;
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }

    /// Creates a fresh store, saves it, and makes it current.
    pub fn create(&mut self, name: &str, shop_name: &str) -> Result<(), LedgerError> {
        if self.storage.store_path(name).exists() {
            return Err(LedgerError::Validation(format!(
                "store `{}` already exists",
                name
            )));
        }
        self.current = Some(Ledger::new(shop_name));
        self.current_name = Some(name.to_string());
        self.save()?;
        self.storage.record_last_store(Some(name))?;
        Ok(())
    }

    pub fn save(&mut self) -> Result<PathBuf, LedgerError> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| LedgerError::Persistence("current store is unnamed".into()))?;
        let ledger = self.require_current()?;
        let path = self.storage.save(ledger, &name)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), LedgerError> {
        let ledger = self.require_current()?;
        self.storage.save_to_path(ledger, path)
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<(), LedgerError> {
        let ledger = self.storage.load_from_path(path)?;
        ensure_schema_support(ledger.schema_version)?;
        self.current = Some(ledger);
        self.current_name = None;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf, LedgerError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| LedgerError::Persistence("current store is unnamed".into()))?;
        let ledger = self.require_current()?;
        self.storage.backup(ledger, name, note)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, LedgerError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| LedgerError::Persistence("current store is unnamed".into()))?;
        self.storage.list_backups(name)
    }

    pub fn restore_backup(&mut self, backup_name: &str) -> Result<(), LedgerError> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| LedgerError::Persistence("current store is unnamed".into()))?;
        let ledger = self.storage.restore(&name, backup_name)?;
        ensure_schema_support(ledger.schema_version)?;
        self.current = Some(ledger);
        info!(store = %name, backup = backup_name, "backup restored");
        Ok(())
    }

    pub fn close(&mut self) {
        self.current = None;
        self.current_name = None;
    }
}

fn ensure_schema_support(schema_version: u8) -> Result<(), LedgerError> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Persistence(format!(
            "store schema v{} is newer than supported v{}",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::fs;
    use tempfile::tempdir;

    fn manager_in(dir: &Path) -> StoreManager {
        let storage = JsonStorage::new(Some(dir.to_path_buf()), Some(3)).unwrap();
        StoreManager::new(Box::new(storage))
    }

    #[test]
    fn create_save_open_roundtrip() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.create("main", "Sparkle Laundry").unwrap();
        manager.close();

        manager.open("main").unwrap();
        assert_eq!(manager.require_current().unwrap().name, "Sparkle Laundry");
        assert_eq!(manager.current_name(), Some("main"));
    }

    #[test]
    fn open_last_remembers_the_previous_store() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.create("branch-two", "Sparkle II").unwrap();
        manager.close();

        let reopened = manager.open_last().unwrap();
        assert_eq!(reopened.as_deref(), Some("branch_two"));
    }

    #[test]
    fn duplicate_store_names_are_rejected() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.create("main", "Sparkle Laundry").unwrap();
        let err = manager
            .create("main", "Another")
            .expect_err("duplicate must fail");
        assert!(err.is_validation(), "unexpected error: {err:?}");
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());

        let path = temp.path().join("future.json");
        let mut ledger = Ledger::new("Future");
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
        fs::write(&path, serde_json::to_string(&ledger).unwrap()).unwrap();

        let err = manager
            .load_from_path(&path)
            .expect_err("future schema should fail");
        match err {
            LedgerError::Persistence(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[test]
    fn backup_and_restore_recover_discarded_edits() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.create("main", "Sparkle Laundry").unwrap();
        manager.backup(Some("before rename")).unwrap();

        manager.require_current_mut().unwrap().name = "Renamed".into();
        manager.save().unwrap();

        let backups = manager.list_backups().unwrap();
        manager.restore_backup(&backups[0]).unwrap();
        assert_eq!(manager.require_current().unwrap().name, "Sparkle Laundry");
    }
}
