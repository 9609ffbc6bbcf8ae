//! The fixed catalog of tradable stocks.

use rustc_hash::FxHashMap;

use crate::{Price, Stock, Symbol};

/// Read-only lookup table from symbol to [`Stock`].
///
/// Built once at startup; there are no mutating methods.
#[derive(Clone, Debug)]
pub struct Market {
    stocks: FxHashMap<Symbol, Stock>,
}

impl Market {
    /// The default four-stock listing.
    pub fn new() -> Self {
        Self::from_stocks([
            Stock::new("AAPL", "Apple Inc.", Price(170_45)),
            Stock::new("GOOGL", "Alphabet Inc.", Price(2850_75)),
            Stock::new("TSLA", "Tesla Inc.", Price(700_55)),
            Stock::new("MSFT", "Microsoft Corp.", Price(350_00)),
        ])
    }

    /// Build a market from an arbitrary listing. Later duplicates replace earlier ones.
    pub fn from_stocks(stocks: impl IntoIterator<Item = Stock>) -> Self {
        let stocks = stocks
            .into_iter()
            .map(|s| (s.symbol.clone(), s))
            .collect();
        Self { stocks }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    /// Current price for a symbol.
    pub fn price(&self, symbol: &str) -> Option<Price> {
        self.lookup(symbol).map(|s| s.price)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.stocks.contains_key(symbol)
    }

    /// All stocks, ordered by symbol.
    pub fn list(&self) -> impl Iterator<Item = &Stock> {
        let mut stocks: Vec<&Stock> = self.stocks.values().collect();
        stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        stocks.into_iter()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl Default for Market {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing() {
        let market = Market::new();
        assert_eq!(market.len(), 4);
        assert_eq!(market.price("AAPL"), Some(Price(170_45)));
        assert_eq!(market.price("GOOGL"), Some(Price(2850_75)));
        assert_eq!(market.price("TSLA"), Some(Price(700_55)));
        assert_eq!(market.price("MSFT"), Some(Price(350_00)));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let market = Market::new();
        assert!(market.lookup("AAPL").is_some());
        assert!(market.lookup("aapl").is_none());
        assert!(market.lookup(Symbol::normalize("aapl").as_str()).is_some());
    }

    #[test]
    fn unknown_symbol() {
        let market = Market::new();
        assert!(market.lookup("XYZ").is_none());
        assert!(!market.contains("XYZ"));
    }

    #[test]
    fn list_is_sorted() {
        let market = Market::new();
        let symbols: Vec<&str> = market.list().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "GOOGL", "MSFT", "TSLA"]);
    }

    #[test]
    fn empty_market() {
        let market = Market::from_stocks([]);
        assert!(market.is_empty());
        assert_eq!(market.list().count(), 0);
    }
}
