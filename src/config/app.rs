//! Office settings loading from config.toml
//!
//! The settings file is optional. Every section has defaults, so a fresh install runs
//! without one; a file that exists but cannot be parsed is a configuration error.

use crate::core::ListPolicy;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file, overridable with `CB_PLUMBING_CONFIG`.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Company details printed on invoices
    pub company: CompanyConfig,
    /// What default listings show
    pub listing: ListingConfig,
    /// Password hashing settings
    pub security: SecurityConfig,
}

/// Company details
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Trading name
    pub name: String,
    /// Days between issuing an invoice and its default due date
    pub payment_terms_days: u32,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "CB Plumbing".to_string(),
            payment_terms_days: 30,
        }
    }
}

/// Listing policy for jobs and invoices
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Show cancelled jobs and invoices in default listings
    pub include_cancelled: bool,
}

/// Password hashing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    /// The listing policy configured for default views.
    #[must_use]
    pub const fn list_policy(&self) -> ListPolicy {
        ListPolicy {
            include_cancelled: self.listing.include_cancelled,
        }
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is malformed or a value has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);

    if !path_ref.exists() {
        tracing::warn!(
            "Config file {:?} not found, using default settings",
            path_ref
        );
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads settings from `CB_PLUMBING_CONFIG`, or ./config.toml when unset.
pub fn load_default_config() -> Result<AppConfig> {
    let path =
        std::env::var("CB_PLUMBING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
