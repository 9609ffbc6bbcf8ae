//! Core types: Price, Quantity, Symbol

use std::fmt;
use std::str::FromStr;

/// Money in cents.
///
/// `Price(17045)` represents $170.45. Balances, share prices and valuations
/// all use this type, so repeated trades never accumulate float error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// `self * qty`, or `None` on overflow.
    #[inline]
    pub fn checked_mul_qty(self, qty: Quantity) -> Option<Price> {
        let qty = i64::try_from(qty).ok()?;
        self.0.checked_mul(qty).map(Price)
    }

    #[inline]
    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.0.checked_add(rhs.0).map(Price)
    }

    /// Plain `D.CC` rendering without the currency sign, as used in saved files.
    pub fn to_plain_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", abs / 100, abs % 100)
        } else {
            write!(f, "${}.{:02}", abs / 100, abs % 100)
        }
    }
}

/// Error from parsing a [`Price`] out of text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: '{0}'")]
pub struct ParsePriceError(pub String);

impl FromStr for Price {
    type Err = ParsePriceError;

    /// Accepts `D`, `D.C` or `D.CC`, optionally prefixed with `-` or `$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePriceError(s.to_string());
        let t = s.trim();
        let (neg, t) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t),
        };
        let t = t.strip_prefix('$').unwrap_or(t);

        let (whole, frac) = match t.split_once('.') {
            Some((w, f)) => (w, f),
            None => (t, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let whole: i64 = whole.parse().map_err(|_| err())?;
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };
        let total = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(err)?;
        Ok(Price(if neg { -total } else { total }))
    }
}

/// Number of shares. Never negative.
pub type Quantity = u64;

/// Ticker symbol, e.g. `AAPL`.
///
/// Comparison is case-sensitive; use [`Symbol::normalize`] on user input.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Symbol(s.into())
    }

    /// Trim and upper-case free text typed by a user.
    pub fn normalize(input: &str) -> Self {
        Symbol(input.trim().to_uppercase())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl std::borrow::Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}
