// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Integration tests driving the menu session end to end.

use std::path::Path;

use stockbook::persistence::load_portfolio;
use stockbook::{Ledger, Market, Price, Symbol};
use stockbook_trader::audit::AuditLog;
use stockbook_trader::session::{self, SessionSettings};

fn settings(save_dir: &Path) -> SessionSettings {
    SessionSettings {
        username: None,
        starting_balance: Price(10_000_00),
        save_dir: save_dir.to_path_buf(),
    }
}

fn drive(script: &str, save_dir: &Path, audit: Option<AuditLog>) -> (Ledger, String) {
    let mut out = Vec::new();
    let ledger = session::run(
        &Market::new(),
        &settings(save_dir),
        script.as_bytes(),
        &mut out,
        audit,
    )
    .unwrap();
    (ledger, String::from_utf8(out).unwrap())
}

fn audit_events(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["event"].as_str().unwrap().to_string()
        })
        .collect()
}

// ============================================================================
// Trading
// ============================================================================

#[test]
fn buy_ten_aapl() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\naapl\n10\n0\n", dir.path(), None);

    assert!(out.contains("Enter stock symbol to buy: "));
    assert!(out.contains("Enter quantity: "));
    assert!(out.contains("Bought 10 shares of AAPL"));
    assert_eq!(ledger.balance(), Price(8295_50));
    assert_eq!(ledger.holding("AAPL"), 10);
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn buy_then_sell_five() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\nAAPL\n10\n3\nAAPL\n5\n0\n", dir.path(), None);

    assert!(out.contains("Enter stock symbol to sell: "));
    assert!(out.contains("Sold 5 shares of AAPL"));
    assert_eq!(ledger.balance(), Price(9147_75));
    assert_eq!(ledger.holding("AAPL"), 5);
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn oversell_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\nAAPL\n10\n3\nAAPL\n20\n0\n", dir.path(), None);

    assert!(out.contains("Not enough shares to sell!"));
    assert_eq!(ledger.balance(), Price(8295_50));
    assert_eq!(ledger.holding("AAPL"), 10);
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn unaffordable_buy_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\nGOOGL\n1000\n0\n", dir.path(), None);

    assert!(out.contains("Insufficient balance!"));
    assert_eq!(ledger.balance(), Price(10_000_00));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn unknown_symbol_skips_quantity_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\nxyz\n0\n", dir.path(), None);

    assert!(out.contains("Invalid symbol."));
    assert!(!out.contains("Enter quantity: "));
    assert!(out.contains("Exiting..."));
    assert!(ledger.transactions().is_empty());
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn market_listing() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = drive("alice\n1\n0\n", dir.path(), None);

    assert!(out.contains("Market Data:"));
    assert!(out.contains("AAPL - Apple Inc. @ $170.45"));
    assert!(out.contains("GOOGL - Alphabet Inc. @ $2850.75"));
    assert!(out.contains("TSLA - Tesla Inc. @ $700.55"));
    assert!(out.contains("MSFT - Microsoft Corp. @ $350.00"));
}

#[test]
fn portfolio_report() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = drive("alice\n2\nAAPL\n10\n4\n0\n", dir.path(), None);

    assert!(out.contains("Portfolio for alice"));
    assert!(out.contains("Balance: $8295.50"));
    assert!(out.contains("AAPL: 10 shares @ $170.45 = $1704.50"));
    assert!(out.contains("Total Portfolio Value: $10000.00"));
}

#[test]
fn transaction_history() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = drive("alice\n5\n2\nTSLA\n1\n3\nTSLA\n1\n5\n0\n", dir.path(), None);

    assert!(out.contains("No transactions yet."));
    assert!(out.contains("BUY 1 shares of TSLA @ $700.55"));
    assert!(out.contains("SELL 1 shares of TSLA @ $700.55"));
    let buy_at = out.find("BUY 1 shares of TSLA").unwrap();
    let sell_at = out.find("SELL 1 shares of TSLA").unwrap();
    assert!(buy_at < sell_at);
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn save_writes_portfolio_file() {
    let dir = tempfile::tempdir().unwrap();
    let (ledger, out) = drive("alice\n2\nAAPL\n10\n6\n0\n", dir.path(), None);

    let path = dir.path().join("alice_portfolio.txt");
    assert!(out.contains("Portfolio saved to"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Balance: 8295.50\nAAPL 10\n"
    );

    let dump = load_portfolio(&path).unwrap();
    assert_eq!(dump.balance, ledger.balance());
    assert_eq!(dump.holdings, vec![(Symbol::new("AAPL"), 10)]);
}

#[test]
fn save_failure_does_not_end_session() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");
    let (ledger, out) = drive("alice\n6\n2\nMSFT\n1\n0\n", &missing, None);

    assert!(out.contains("Failed to save portfolio"));
    assert!(out.contains("Bought 1 shares of MSFT"));
    assert_eq!(ledger.holding("MSFT"), 1);
}

#[test]
fn no_file_without_explicit_save() {
    let dir = tempfile::tempdir().unwrap();
    drive("alice\n2\nAAPL\n1\n0\n", dir.path(), None);
    assert!(!dir.path().join("alice_portfolio.txt").exists());
}

// ============================================================================
// Audit trail
// ============================================================================

#[test]
fn audit_trail_records_session() {
    let dir = tempfile::tempdir().unwrap();
    let audit_path = dir.path().join("logs").join("audit.jsonl");
    let audit = AuditLog::open(&audit_path).unwrap();

    drive(
        "alice\n2\nAAPL\n10\n3\nAAPL\n99\n6\n0\n",
        dir.path(),
        Some(audit),
    );

    assert_eq!(
        audit_events(&audit_path),
        vec![
            "session_started",
            "trade_executed",
            "trade_rejected",
            "portfolio_saved",
            "session_ended",
        ]
    );
}

#[test]
fn audit_trail_records_save_failure() {
    let dir = tempfile::tempdir().unwrap();
    let audit_path = dir.path().join("audit.jsonl");
    let audit = AuditLog::open(&audit_path).unwrap();

    drive("bob\n6\n0\n", &dir.path().join("missing"), Some(audit));

    let events = audit_events(&audit_path);
    assert!(events.contains(&"save_failed".to_string()));
}
