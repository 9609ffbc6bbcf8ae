//! CLI entry point for the stockbook trader.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::warn;

use stockbook::Market;
use stockbook_trader::audit::AuditLog;
use stockbook_trader::config::Config;
use stockbook_trader::error::Error;
use stockbook_trader::session::{self, SessionSettings};

#[derive(Parser)]
#[command(name = "trader")]
#[command(about = "Text-menu stock trading simulator")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: trader.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Username; prompted for when omitted
    #[arg(long)]
    username: Option<String>,

    /// Directory for saved portfolios (overrides config)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Disable the JSONL audit trail
    #[arg(long)]
    no_audit: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let audit = if config.logging.enabled && !cli.no_audit {
        match AuditLog::open(&config.audit_path()) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("audit trail disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let settings = SessionSettings {
        username: cli.username,
        starting_balance: config.starting_balance(),
        save_dir: cli.save_dir.unwrap_or_else(|| config.save_dir()),
    };

    let market = Market::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(e) = session::run(&market, &settings, stdin.lock(), stdout.lock(), audit) {
        match &e {
            Error::Aborted(msg) => {
                eprintln!("\n{msg}");
                process::exit(0);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
