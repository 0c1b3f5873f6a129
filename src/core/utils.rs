use std::{env, fs, io, path::Path, path::PathBuf, sync::Once};

use dirs::home_dir;

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("laundry_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

const DEFAULT_DIR_NAME: &str = ".laundry_core";
const STORES_DIR: &str = "stores";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";

/// Resolves the filesystem layout under the application data directory,
/// defaulting to `~/.laundry_core` unless `LAUNDRY_CORE_HOME` overrides it.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        if let Some(base) = custom {
            return base;
        }
        if let Some(base) = env::var_os("LAUNDRY_CORE_HOME") {
            return PathBuf::from(base);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn stores_dir_in(base: &Path) -> PathBuf {
        base.join(STORES_DIR)
    }

    pub fn backups_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join(STATE_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
