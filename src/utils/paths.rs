use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
pub const DATABASE_ENV: &str = "EXPENSE_TRACKER_DB";

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "expenses.db";

/// Returns the application data directory, defaulting to `~/.expense_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

pub fn database_file_in(base: &Path) -> PathBuf {
    base.join(DATABASE_FILE)
}

/// Database override from the environment, if any.
pub fn database_override() -> Option<PathBuf> {
    env::var_os(DATABASE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
