//! # Configuration
//!
//! Shop settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`LAUNDRY_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use directories::ProjectDirs;
use laundry_core::Money;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DB_PATH: &str = "LAUNDRY_DB_PATH";
pub const ENV_SHOP_NAME: &str = "LAUNDRY_SHOP_NAME";
pub const ENV_CURRENCY_SYMBOL: &str = "LAUNDRY_CURRENCY_SYMBOL";

const DB_FILE_NAME: &str = "laundry.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    EmptyVariable(&'static str),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Shown in report headers
    pub shop_name: String,

    /// Prefix for money amounts in table output
    pub currency_symbol: String,

    /// Explicit database file. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            shop_name: "Laundry Shop".to_string(),
            currency_symbol: "Rp".to_string(),
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Reads the `LAUNDRY_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(name) = lookup(ENV_SHOP_NAME) {
            config.shop_name = non_empty(ENV_SHOP_NAME, name)?;
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = non_empty(ENV_CURRENCY_SYMBOL, symbol)?;
        }

        // Blank means unset, matching how clap reads the same variable for --db.
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path.trim()));
        }

        Ok(config)
    }

    /// Applies the `--db` flag.
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.db_path = path;
        }
        self
    }

    /// Where the database file lives.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.laundry.shop/laundry.db`
    /// - **Windows**: `%APPDATA%\laundry\shop\data\laundry.db`
    /// - **Linux**: `~/.local/share/shop/laundry.db`
    ///
    /// The data directory is created when missing.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "laundry", "shop").ok_or(ConfigError::NoDataDir)?;
        let data_dir = proj_dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::CreateDir {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_major(7000)), "Rp7000.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, Money::from_minor(-amount.minor()))
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyVariable(var));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.shop_name, "Laundry Shop");
        assert_eq!(config.currency_symbol, "Rp");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_SHOP_NAME, "  Laundry Bersih "),
            (ENV_CURRENCY_SYMBOL, "$"),
            (ENV_DB_PATH, "/tmp/shop.db"),
        ]))
        .unwrap();

        assert_eq!(config.shop_name, "Laundry Bersih");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_empty_variable_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_SHOP_NAME, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVariable(ENV_SHOP_NAME)));
    }

    #[test]
    fn test_blank_db_path_is_unset() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "")])).unwrap();
        assert!(config.db_path.is_none());

        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "   ")]))
            .unwrap()
            .with_db_path(Some(PathBuf::from("/tmp/flag.db")));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_flag_wins() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/env.db")]))
            .unwrap()
            .with_db_path(Some(PathBuf::from("/tmp/flag.db")));
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/flag.db")));

        let config = config.with_db_path(None);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/flag.db")));
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_major(7000)), "Rp7000.00");
        assert_eq!(config.format_currency(Money::from_minor(1)), "Rp0.01");
        assert_eq!(config.format_currency(Money::zero()), "Rp0.00");
        assert_eq!(config.format_currency(Money::from_minor(-550)), "-Rp5.50");
    }
}
