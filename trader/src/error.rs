//! Error types for the trading session.

use std::path::PathBuf;

/// All errors that can occur outside the ledger itself.
///
/// Ledger refusals (`stockbook::LedgerError`) are reported to the user and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("audit log error: {0}")]
    Audit(#[source] std::io::Error),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session aborted: {0}")]
    Aborted(String),
}

pub type Result<T> = std::result::Result<T, Error>;
