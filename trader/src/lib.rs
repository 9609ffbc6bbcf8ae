// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! stockbook-trader: interactive text-menu trading session over a stockbook ledger.
//!
//! Prompts for a username, opens a ledger with the configured starting
//! balance, and runs the numbered menu until the user exits. Trades, saves
//! and rejections are appended to a JSONL audit trail.

pub mod audit;
pub mod config;
pub mod error;
pub mod session;
