//! Ledger errors.

use crate::{Price, Quantity, Symbol};

/// Reasons a ledger operation was refused. The ledger is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Quantity must be greater than zero.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// The buy costs more than the cash balance.
    #[error("Insufficient balance! (needed {needed}, available {available})")]
    InsufficientBalance { needed: Price, available: Price },

    /// The sell asks for more shares than are held.
    #[error("Not enough shares to sell! ({symbol}: requested {requested}, owned {owned})")]
    InsufficientShares {
        symbol: Symbol,
        requested: Quantity,
        owned: Quantity,
    },

    /// A held symbol has no price in the market.
    #[error("no market price for held symbol {0}")]
    UnknownSymbol(Symbol),

    /// A share count or money amount for `symbol` would not fit its type.
    #[error("amount out of range for {symbol} (quantity {quantity})")]
    AmountOverflow { symbol: Symbol, quantity: Quantity },
}

impl LedgerError {
    /// Short message shown to the user at the menu.
    pub fn user_message(&self) -> &'static str {
        match self {
            LedgerError::ZeroQuantity => "Invalid quantity.",
            LedgerError::InsufficientBalance { .. } => "Insufficient balance!",
            LedgerError::InsufficientShares { .. } => "Not enough shares to sell!",
            LedgerError::UnknownSymbol(_) => "Cannot value portfolio: a held stock is not listed.",
            LedgerError::AmountOverflow { .. } => "Amount too large.",
        }
    }
}
