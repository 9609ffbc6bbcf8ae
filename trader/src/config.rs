//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use stockbook::{INITIAL_BALANCE, Price};

use crate::error::{Error, Result};

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG: &str = "trader.toml";

/// Top-level configuration. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Starting cash, written in dollars (`10000`, `2500.25` or `"2500.25"`)
    #[serde(
        default = "default_starting_balance",
        deserialize_with = "deserialize_dollars"
    )]
    pub starting_balance: Price,
}

fn default_starting_balance() -> Price {
    INITIAL_BALANCE
}

/// Read a dollar amount through [`Price`]'s parser. Floats are taken in their
/// shortest decimal form, so more than two decimals is an error, not a rounding.
fn deserialize_dollars<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Price, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dollars {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let text = match Dollars::deserialize(deserializer)? {
        Dollars::Int(n) => n.to_string(),
        Dollars::Float(x) => x.to_string(),
        Dollars::Text(s) => s,
    };
    text.parse().map_err(serde::de::Error::custom)
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for `<username>_portfolio.txt`
    #[serde(default = "default_save_dir")]
    pub save_dir: String,
}

fn default_save_dir() -> String {
    ".".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

fn default_true() -> bool {
    true
}
fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG`] if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::load(Path::new(DEFAULT_CONFIG)),
            None => Ok(Self::default()),
        }
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.account.starting_balance < Price::ZERO {
            return Err(Error::Config("starting_balance must be >= 0".into()));
        }
        if self.storage.save_dir.is_empty() {
            return Err(Error::Config("save_dir must not be empty".into()));
        }
        if self.logging.enabled && self.logging.audit_file.is_empty() {
            return Err(Error::Config("audit_file must not be empty".into()));
        }
        Ok(())
    }

    pub fn starting_balance(&self) -> Price {
        self.account.starting_balance
    }

    pub fn save_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.save_dir)
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }
}
