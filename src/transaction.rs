//! Transaction record

use chrono::{DateTime, Utc};
use std::fmt;

use crate::{Price, Quantity, Side, Symbol};

/// One completed buy or sell.
///
/// Created only by [`Ledger`](crate::Ledger) when a trade succeeds and never
/// modified afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    pub side: Side,
    pub symbol: Symbol,
    pub quantity: Quantity,
    /// Per-share price at execution
    pub price: Price,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(side: Side, symbol: Symbol, quantity: Quantity, price: Price) -> Self {
        Self {
            side,
            symbol,
            quantity,
            price,
            timestamp: Utc::now(),
        }
    }

    /// Price × quantity (cents), or `None` if it does not fit in a `Price`.
    #[inline]
    pub fn notional(&self) -> Option<Price> {
        self.price.checked_mul_qty(self.quantity)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} shares of {} @ {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.side,
            self.quantity,
            self.symbol,
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display() {
        let mut tx = Transaction::new(Side::Buy, Symbol::new("AAPL"), 10, Price(170_45));
        tx.timestamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            tx.to_string(),
            "2026-01-02 03:04:05 UTC: BUY 10 shares of AAPL @ $170.45"
        );
    }

    #[test]
    fn notional() {
        let tx = Transaction::new(Side::Sell, Symbol::new("AAPL"), 5, Price(170_45));
        assert_eq!(tx.notional(), Some(Price(852_25)));
    }

    #[test]
    fn notional_out_of_range() {
        let tx = Transaction::new(Side::Sell, Symbol::new("AAPL"), u64::MAX, Price(170_45));
        assert_eq!(tx.notional(), None);
        let tx = Transaction::new(Side::Sell, Symbol::new("AAPL"), 1 << 62, Price(170_45));
        assert_eq!(tx.notional(), None);
    }
}
