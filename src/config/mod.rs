use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{ExpenseError, Result},
    storage::json_backend::{tmp_path, write_atomic},
    utils::paths::{self, ensure_dir},
};

/// User preferences for the tracker and its shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Custom database file. Defaults to `<app dir>/expenses.db`.
    pub database_path: Option<PathBuf>,
    pub currency_symbol: String,
    pub ui_color_enabled: bool,
    pub chart_width: usize,
    pub chart_height: usize,
    /// Registers categories found on stored expenses when the tracker opens.
    pub seed_categories_from_records: bool,
    pub reconcile_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            currency_symbol: "$".into(),
            ui_color_enabled: true,
            chart_width: 60,
            chart_height: 12,
            seed_categories_from_records: true,
            reconcile_on_error: true,
        }
    }
}

impl Config {
    /// Environment override first, then the configured path, then the default location.
    pub fn resolve_database_path(&self, base: &Path) -> PathBuf {
        if let Some(path) = paths::database_override() {
            return path;
        }
        self.database_path
            .clone()
            .unwrap_or_else(|| paths::database_file_in(base))
    }
}

/// Loads and persists [`Config`] as JSON under the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = paths::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                ExpenseError::Config(format!("{}: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
