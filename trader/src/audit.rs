//! Session audit trail.
//!
//! Every session event is appended to a JSONL file as one object per line:
//! a `ts` timestamp, an `event` tag and the event's fields. Money is written
//! as plain `D.CC` strings so the trail never carries float amounts.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockbook::{Ledger, LedgerError, Price, Quantity, Side, Symbol, Transaction};

use crate::error::{Error, Result};

/// Something that happened during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    SessionStarted {
        user: String,
        balance: String,
    },
    TradeExecuted {
        side: String,
        symbol: String,
        qty: Quantity,
        price: String,
        executed_at: DateTime<Utc>,
        /// Cash after the trade
        balance: String,
    },
    TradeRejected {
        side: String,
        symbol: String,
        qty: Quantity,
        reason: String,
    },
    PortfolioSaved {
        path: String,
        balance: String,
        holdings: usize,
    },
    SaveFailed {
        path: String,
        error: String,
    },
    SessionEnded {
        user: String,
        balance: String,
        transactions: usize,
    },
}

impl AuditEvent {
    pub fn session_started(ledger: &Ledger) -> Self {
        AuditEvent::SessionStarted {
            user: ledger.owner().to_string(),
            balance: ledger.balance().to_plain_string(),
        }
    }

    pub fn trade_executed(tx: &Transaction, balance_after: Price) -> Self {
        AuditEvent::TradeExecuted {
            side: tx.side.to_string(),
            symbol: tx.symbol.to_string(),
            qty: tx.quantity,
            price: tx.price.to_plain_string(),
            executed_at: tx.timestamp,
            balance: balance_after.to_plain_string(),
        }
    }

    pub fn trade_rejected(side: Side, symbol: &Symbol, qty: Quantity, err: &LedgerError) -> Self {
        AuditEvent::TradeRejected {
            side: side.to_string(),
            symbol: symbol.to_string(),
            qty,
            reason: err.to_string(),
        }
    }

    pub fn portfolio_saved(path: &Path, ledger: &Ledger) -> Self {
        AuditEvent::PortfolioSaved {
            path: path.display().to_string(),
            balance: ledger.balance().to_plain_string(),
            holdings: ledger.holdings().count(),
        }
    }

    pub fn save_failed(path: &Path, err: &io::Error) -> Self {
        AuditEvent::SaveFailed {
            path: path.display().to_string(),
            error: err.to_string(),
        }
    }

    pub fn session_ended(ledger: &Ledger) -> Self {
        AuditEvent::SessionEnded {
            user: ledger.owner().to_string(),
            balance: ledger.balance().to_plain_string(),
            transactions: ledger.transactions().len(),
        }
    }
}

#[derive(Serialize)]
struct Record<'a> {
    ts: DateTime<Utc>,
    #[serde(flatten)]
    event: &'a AuditEvent,
}

/// Append-only JSONL trail. Each record is flushed as soon as it is written.
pub struct AuditLog {
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(Error::Audit)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Error::Audit)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Stamp `event` with the current time and append it.
    pub fn append(&mut self, event: &AuditEvent) -> Result<()> {
        let record = Record {
            ts: Utc::now(),
            event,
        };
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|e| Error::Audit(io::Error::from(e)))?;
        self.writer.write_all(b"\n").map_err(Error::Audit)?;
        self.writer.flush().map_err(Error::Audit)
    }
}
