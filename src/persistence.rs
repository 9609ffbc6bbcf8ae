//! Flat text dump of a ledger's balance and holdings.
//!
//! One file per user, `<owner>_portfolio.txt`:
//!
//! ```text
//! Balance: 8295.50
//! AAPL 10
//! MSFT 0
//! ```
//!
//! Holdings are written in symbol order, zero-quantity entries included.
//! The transaction log is not part of the dump.
//!
//! # Usage
//!
//! ```no_run
//! use stockbook::{persistence, Ledger, Price};
//! use std::path::Path;
//!
//! let ledger = Ledger::new("alice", Price(10_000_00));
//! let path = Path::new(".").join(persistence::portfolio_file_name(ledger.owner()));
//! persistence::save_portfolio(&ledger, &path).unwrap();
//!
//! let dump = persistence::load_portfolio(&path).unwrap();
//! assert_eq!(dump.balance, ledger.balance());
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::{Ledger, Price, Quantity, Symbol};

const BALANCE_PREFIX: &str = "Balance:";

/// Balance and holdings as read back from a dump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortfolioDump {
    pub balance: Price,
    /// In file order
    pub holdings: Vec<(Symbol, Quantity)>,
}

impl PortfolioDump {
    /// Capture the saved fields of a ledger.
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            balance: ledger.balance(),
            holdings: ledger.holdings().map(|(s, q)| (s.clone(), q)).collect(),
        }
    }

    /// Rebuild a ledger for `owner` from this dump.
    pub fn into_ledger(self, owner: impl Into<String>) -> Ledger {
        Ledger::restore(owner, self.balance, self.holdings)
    }
}

/// File name used for a user's dump.
pub fn portfolio_file_name(owner: &str) -> String {
    format!("{owner}_portfolio.txt")
}

/// Write the dump format to any writer.
pub fn write_portfolio<W: Write>(ledger: &Ledger, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{} {}", BALANCE_PREFIX, ledger.balance().to_plain_string())?;
    for (symbol, quantity) in ledger.holdings() {
        writeln!(writer, "{symbol} {quantity}")?;
    }
    writer.flush()
}

/// Save a ledger's dump to `path`, replacing any existing file.
///
/// The file is closed before returning, on success and on error.
pub fn save_portfolio(ledger: &Ledger, path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_portfolio(ledger, io::BufWriter::new(file))
}

/// Parse the dump format. Empty lines are skipped.
pub fn read_portfolio<R: BufRead>(reader: R) -> io::Result<PortfolioDump> {
    let mut balance = None;
    let mut holdings = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let invalid = |msg: String| {
            io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", line_num + 1, msg))
        };

        if let Some(rest) = line.strip_prefix(BALANCE_PREFIX) {
            if balance.is_some() {
                return Err(invalid("duplicate balance line".into()));
            }
            let price: Price = rest.parse().map_err(|e| invalid(format!("{e}")))?;
            balance = Some(price);
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(symbol), Some(qty), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid(format!("expected '<SYMBOL> <quantity>', got '{line}'")));
        };
        let qty: Quantity = qty
            .parse()
            .map_err(|_| invalid(format!("invalid quantity '{qty}'")))?;
        holdings.push((Symbol::new(symbol), qty));
    }

    let balance = balance.ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "missing balance line")
    })?;
    Ok(PortfolioDump { balance, holdings })
}

/// Load a dump written by [`save_portfolio`].
pub fn load_portfolio(path: &Path) -> io::Result<PortfolioDump> {
    let file = std::fs::File::open(path)?;
    read_portfolio(io::BufReader::new(file))
}

impl Ledger {
    /// Save this ledger's balance and holdings as a text dump.
    pub fn persist(&self, path: &Path) -> io::Result<()> {
        save_portfolio(self, path)
    }
}
