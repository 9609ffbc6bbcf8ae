//! One user's cash, holdings and transaction history.
//!
//! The ledger enforces two rules on every trade:
//!
//! - a buy never takes the balance below zero
//! - a sell never takes a holding below zero
//!
//! A refused trade returns a [`LedgerError`] and leaves the ledger untouched.
//!
//! ```
//! use stockbook::{Ledger, Market, Price};
//!
//! let market = Market::new();
//! let mut ledger = Ledger::new("alice", Price(10_000_00));
//!
//! let aapl = market.lookup("AAPL").unwrap();
//! ledger.buy(aapl, 10).unwrap();
//! assert_eq!(ledger.balance(), Price(8295_50));
//! assert_eq!(ledger.holding("AAPL"), 10);
//!
//! ledger.sell(aapl, 5).unwrap();
//! assert_eq!(ledger.balance(), Price(9147_75));
//! assert_eq!(ledger.transactions().len(), 2);
//! ```

use rustc_hash::FxHashMap;

use crate::{LedgerError, Market, Price, Quantity, Side, Stock, Symbol, Transaction};

/// Starting cash for a new user: $10,000.00.
pub const INITIAL_BALANCE: Price = Price(10_000_00);

/// Serde helper for `FxHashMap<Symbol, Quantity>` — serializes as a sorted `Vec<(Symbol, Quantity)>`.
#[cfg(feature = "serde")]
mod serde_holdings {
    use super::{FxHashMap, Quantity, Symbol};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        map: &FxHashMap<Symbol, Quantity>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut vec: Vec<(&Symbol, &Quantity)> = map.iter().collect();
        vec.sort_by_key(|(sym, _)| *sym);
        vec.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FxHashMap<Symbol, Quantity>, D::Error> {
        let vec: Vec<(Symbol, Quantity)> = Vec::deserialize(deserializer)?;
        Ok(vec.into_iter().collect())
    }
}

/// A single user's trading account.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ledger {
    owner: String,
    /// Cash balance (cents)
    balance: Price,
    /// Shares held per symbol. Fully sold symbols stay at zero.
    #[cfg_attr(
        feature = "serde",
        serde(
            serialize_with = "serde_holdings::serialize",
            deserialize_with = "serde_holdings::deserialize"
        )
    )]
    holdings: FxHashMap<Symbol, Quantity>,
    /// Append-only, chronological
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Open a ledger with the given starting cash.
    ///
    /// Negative starting cash is a programming error (use `debug_assert`).
    pub fn new(owner: impl Into<String>, initial_balance: Price) -> Self {
        debug_assert!(
            initial_balance >= Price::ZERO,
            "initial balance must be non-negative, got {initial_balance}"
        );
        Self {
            owner: owner.into(),
            balance: initial_balance,
            holdings: FxHashMap::default(),
            transactions: Vec::new(),
        }
    }

    /// Rebuild a ledger from saved balance and holdings. The transaction log starts empty.
    pub fn restore(
        owner: impl Into<String>,
        balance: Price,
        holdings: impl IntoIterator<Item = (Symbol, Quantity)>,
    ) -> Self {
        Self {
            owner: owner.into(),
            balance,
            holdings: holdings.into_iter().collect(),
            transactions: Vec::new(),
        }
    }

    // === Queries ===

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Current cash balance.
    #[inline]
    pub fn balance(&self) -> Price {
        self.balance
    }

    /// Shares held of `symbol` (zero if never traded).
    pub fn holding(&self, symbol: &str) -> Quantity {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    /// All holdings in symbol order, including zero-quantity entries.
    pub fn holdings(&self) -> impl Iterator<Item = (&Symbol, Quantity)> {
        let mut vec: Vec<(&Symbol, Quantity)> =
            self.holdings.iter().map(|(s, q)| (s, *q)).collect();
        vec.sort_by_key(|(sym, _)| *sym);
        vec.into_iter()
    }

    /// The transaction log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    // === Trading ===

    /// Buy `quantity` shares of `stock` at its listed price.
    pub fn buy(&mut self, stock: &Stock, quantity: Quantity) -> Result<&Transaction, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }

        let insufficient = |needed| LedgerError::InsufficientBalance {
            needed,
            available: self.balance,
        };
        // An overflowing cost can never be affordable.
        let cost = stock
            .price
            .checked_mul_qty(quantity)
            .ok_or_else(|| insufficient(Price(i64::MAX)))?;
        if self.balance < cost {
            return Err(insufficient(cost));
        }
        let held = self
            .holding(stock.symbol.as_str())
            .checked_add(quantity)
            .ok_or_else(|| overflow(stock, quantity))?;

        self.balance = Price(self.balance.0 - cost.0);
        self.holdings.insert(stock.symbol.clone(), held);
        Ok(self.record(Side::Buy, stock, quantity))
    }

    /// Sell `quantity` shares of `stock` at its listed price.
    pub fn sell(&mut self, stock: &Stock, quantity: Quantity) -> Result<&Transaction, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }

        let owned = self.holding(stock.symbol.as_str());
        if owned < quantity {
            return Err(LedgerError::InsufficientShares {
                symbol: stock.symbol.clone(),
                requested: quantity,
                owned,
            });
        }

        let balance = stock
            .price
            .checked_mul_qty(quantity)
            .and_then(|proceeds| self.balance.checked_add(proceeds))
            .ok_or_else(|| overflow(stock, quantity))?;

        self.balance = balance;
        // Zero stays in the map; no removal on a full sell.
        self.holdings.insert(stock.symbol.clone(), owned - quantity);
        Ok(self.record(Side::Sell, stock, quantity))
    }

    // === Reporting ===

    /// Cash plus the market value of every holding.
    pub fn portfolio_value(&self, market: &Market) -> Result<Price, LedgerError> {
        self.valuation(market).map(|v| v.total)
    }

    /// Per-holding breakdown at current market prices.
    pub fn valuation(&self, market: &Market) -> Result<Valuation, LedgerError> {
        let mut lines = Vec::with_capacity(self.holdings.len());
        let mut total = self.balance;

        for (symbol, quantity) in self.holdings() {
            let price = market
                .price(symbol.as_str())
                .ok_or_else(|| LedgerError::UnknownSymbol(symbol.clone()))?;
            let out_of_range = || LedgerError::AmountOverflow {
                symbol: symbol.clone(),
                quantity,
            };
            let value = price.checked_mul_qty(quantity).ok_or_else(out_of_range)?;
            total = total.checked_add(value).ok_or_else(out_of_range)?;
            lines.push(HoldingValue {
                symbol: symbol.clone(),
                quantity,
                price,
                value,
            });
        }

        Ok(Valuation {
            owner: self.owner.clone(),
            balance: self.balance,
            holdings: lines,
            total,
        })
    }

    // === Persistence ===

    /// Save the full ledger, transaction log included, to a JSON file.
    #[cfg(feature = "persistence")]
    pub fn save_json(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load a ledger saved with [`Ledger::save_json`].
    #[cfg(feature = "persistence")]
    pub fn load_json(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }

    // === Internal ===

    fn record(&mut self, side: Side, stock: &Stock, quantity: Quantity) -> &Transaction {
        self.transactions.push(Transaction::new(
            side,
            stock.symbol.clone(),
            quantity,
            stock.price,
        ));
        &self.transactions[self.transactions.len() - 1]
    }
}

fn overflow(stock: &Stock, quantity: Quantity) -> LedgerError {
    LedgerError::AmountOverflow {
        symbol: stock.symbol.clone(),
        quantity,
    }
}

/// Market value of one holding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoldingValue {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub price: Price,
    pub value: Price,
}

/// A point-in-time portfolio report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valuation {
    pub owner: String,
    pub balance: Price,
    /// In symbol order
    pub holdings: Vec<HoldingValue>,
    /// Balance plus every holding's value
    pub total: Price,
}


#[cfg(all(test, feature = "persistence"))]
mod persistence_tests {
    use super::*;

    #[test]
    fn ledger_json_roundtrip() {
        let market = Market::new();
        let mut ledger = Ledger::new("alice", INITIAL_BALANCE);
        ledger.buy(market.lookup("AAPL").unwrap(), 10).unwrap();
        ledger.sell(market.lookup("AAPL").unwrap(), 4).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: Ledger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.owner(), "alice");
        assert_eq!(restored.balance(), ledger.balance());
        assert_eq!(restored.holding("AAPL"), 6);
        assert_eq!(restored.transactions(), ledger.transactions());
    }

    #[test]
    fn ledger_save_load_file() {
        let market = Market::new();
        let mut ledger = Ledger::new("bob", INITIAL_BALANCE);
        ledger.buy(market.lookup("MSFT").unwrap(), 3).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bob.json");

        ledger.save_json(&path).unwrap();
        let loaded = Ledger::load_json(&path).unwrap();

        assert_eq!(loaded.balance(), ledger.balance());
        assert_eq!(loaded.holding("MSFT"), 3);
        assert_eq!(loaded.transactions().len(), 1);
    }
}
