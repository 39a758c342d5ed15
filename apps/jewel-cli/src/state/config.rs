//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `--db` on the command line (database path only)
//! 2. Environment variables (`JEWEL_*`)
//! 3. Config file (`--config <path>` or `<config dir>/jewel-billing/billing.toml`)
//! 4. Defaults (this file)
//!
//! ## File Format
//! ```toml
//! database_path = "/srv/shop/billing.db"
//!
//! [billing]
//! tax_rate = 300          # basis points, 300 = 3%
//! tax_label = "GST"
//! currency_code = "INR"
//!
//! [billing.shop]
//! name = "Lakshmi Jewellers"
//! address_lines = ["12 MG Road", "Bengaluru, Karnataka"]
//! ```
//!
//! Configuration is read-only after loading, so no mutex needed.

use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::ApiError;
use jewel_core::{BillingConfig, TaxRate};

pub const ENV_DB_PATH: &str = "JEWEL_DB_PATH";
pub const ENV_TAX_RATE: &str = "JEWEL_TAX_RATE";
pub const ENV_SHOP_NAME: &str = "JEWEL_SHOP_NAME";
pub const ENV_SHOP_ADDRESS: &str = "JEWEL_SHOP_ADDRESS";

const APP_NAME: &str = "jewel-billing";
const CONFIG_FILE: &str = "billing.toml";
const DATABASE_FILE: &str = "billing.db";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Database file. `None` selects the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Tax rate and shop identity handed to pricing and invoices.
    pub billing: BillingConfig,
}

impl ConfigState {
    /// Loads configuration from file and environment, then validates it.
    ///
    /// An explicit `path` must exist. The default path is optional: when
    /// there is no file there, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.billing.validate()?;

        info!(
            tax_rate = %config.billing.tax_rate,
            shop = %config.billing.shop.name,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ApiError::config(format!("cannot read {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Read config file");
        Self::from_toml_str(&text)
            .map_err(|e| ApiError::config(format!("{}: {}", path.display(), e.message)))
    }

    /// Parses TOML config text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ApiError> {
        toml::from_str(text).map_err(|e| ApiError::config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::internal(e.to_string()))
    }

    /// Applies `JEWEL_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `JEWEL_DB_PATH`: database file
    /// - `JEWEL_TAX_RATE`: tax rate as a percentage (e.g., "3")
    /// - `JEWEL_SHOP_NAME`: shop name on invoices
    /// - `JEWEL_SHOP_ADDRESS`: address lines separated by `|`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(rate) = lookup(ENV_TAX_RATE) {
            self.billing.tax_rate = parse_tax_percentage(&rate)?;
        }

        if let Some(name) = lookup(ENV_SHOP_NAME) {
            self.billing.shop.name = name;
        }

        if let Some(address) = lookup(ENV_SHOP_ADDRESS) {
            self.billing.shop.address_lines = address
                .split('|')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(())
    }

    /// Returns a copy using a different database file.
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// The database file to open.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }

    /// Writes a default config file unless one already exists.
    ///
    /// Returns `true` if a file was written.
    pub fn write_default(path: &Path) -> Result<bool, ApiError> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::config(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let text = Self::default().to_toml_string()?;
        std::fs::write(path, text).map_err(|e| {
            ApiError::config(format!("cannot write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Wrote default config file");
        Ok(true)
    }
}

fn parse_tax_percentage(value: &str) -> Result<TaxRate, ApiError> {
    let invalid = || ApiError::config(format!("{} is not a valid percentage: '{}'", ENV_TAX_RATE, value));

    let pct = Decimal::from_str(value.trim()).map_err(|_| invalid())?;
    TaxRate::from_percentage(pct).ok_or_else(invalid)
}

/// `<config dir>/jewel-billing/billing.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// `<data dir>/jewel-billing/billing.db`, or `billing.db` in the working
/// directory when no home directory can be found.
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}
