//! A listed stock

use crate::{Price, Symbol};
use std::fmt;

/// One tradable instrument: symbol, display name and price.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stock {
    pub symbol: Symbol,
    pub name: String,
    pub price: Price,
}

impl Stock {
    pub fn new(symbol: impl Into<Symbol>, name: impl Into<String>, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
        }
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} @ {}", self.symbol, self.name, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let s = Stock::new("AAPL", "Apple Inc.", Price(170_45));
        assert_eq!(s.to_string(), "AAPL - Apple Inc. @ $170.45");
    }
}
