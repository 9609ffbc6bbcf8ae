//! Trade side: Buy or Sell

use std::fmt;

/// Direction of a trade against the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Past-tense verb used in confirmations ("Bought", "Sold").
    pub fn past_tense(self) -> &'static str {
        match self {
            Side::Buy => "Bought",
            Side::Sell => "Sold",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", Side::Buy), "BUY");
        assert_eq!(format!("{}", Side::Sell), "SELL");
    }

    #[test]
    fn past_tense() {
        assert_eq!(Side::Buy.past_tense(), "Bought");
        assert_eq!(Side::Sell.past_tense(), "Sold");
    }
}
