use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    money::CURRENCY_CODE,
};

const TMP_SUFFIX: &str = "tmp";

/// Shop-level settings persisted next to the stores. Missing files fall
/// back to defaults so a fresh install needs no setup step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub shop_name: String,
    pub currency: String,
    pub backup_retention: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_footer: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shop_name: "Laundry Management System".into(),
            currency: CURRENCY_CODE.into(),
            backup_retention: 5,
            receipt_footer: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "AED");
        assert_eq!(config.backup_retention, 5);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.shop_name = "Sparkle Laundry".into();
        config.receipt_footer = Some("See you again!".into());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.shop_name, "Sparkle Laundry");
        assert_eq!(loaded.receipt_footer.as_deref(), Some("See you again!"));
    }
}
