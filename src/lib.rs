// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # stockbook
//!
//! An in-memory stock trading ledger: a fixed market of stocks, one user's
//! cash balance, their holdings, and a log of every trade.
//!
//! ## Quick Start
//!
//! ```
//! use stockbook::{Ledger, LedgerError, Market, Price, INITIAL_BALANCE};
//!
//! let market = Market::new();
//! let mut ledger = Ledger::new("alice", INITIAL_BALANCE);
//!
//! let aapl = market.lookup("AAPL").unwrap();
//! ledger.buy(aapl, 10).unwrap();
//! assert_eq!(ledger.balance(), Price(8295_50));
//!
//! // Selling more than is held is refused and changes nothing
//! let err = ledger.sell(aapl, 20).unwrap_err();
//! assert!(matches!(err, LedgerError::InsufficientShares { .. }));
//! assert_eq!(ledger.holding("AAPL"), 10);
//! ```
//!
//! ## Price Representation
//!
//! Money is stored as [`i64`] cents:
//!
//! ```
//! use stockbook::Price;
//!
//! let price = Price(170_45);  // $170.45
//! assert_eq!(format!("{}", price), "$170.45");
//! assert_eq!("170.45".parse::<Price>().unwrap(), price);
//! ```
//!
//! ## Valuation
//!
//! ```
//! use stockbook::{Ledger, Market, Price};
//!
//! let market = Market::new();
//! let mut ledger = Ledger::new("bob", Price(10_000_00));
//! ledger.buy(market.lookup("MSFT").unwrap(), 2).unwrap();
//!
//! let report = ledger.valuation(&market).unwrap();
//! assert_eq!(report.holdings[0].value, Price(700_00));
//! assert_eq!(report.total, Price(10_000_00));
//! ```
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `serde` | `Serialize`/`Deserialize` on all public types |
//! | `persistence` | JSON snapshots via `Ledger::save_json` / `Ledger::load_json` |
//!
//! The flat text dump in [`persistence`] needs no feature.

mod error;
mod ledger;
mod market;
pub mod persistence;
mod side;
mod stock;
mod transaction;
mod types;

// Re-export public API
pub use error::LedgerError;
pub use ledger::{HoldingValue, INITIAL_BALANCE, Ledger, Valuation};
pub use market::Market;
pub use persistence::PortfolioDump;
pub use side::Side;
pub use stock::Stock;
pub use transaction::Transaction;
pub use types::{ParsePriceError, Price, Quantity, Symbol};
