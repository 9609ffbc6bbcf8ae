//! Interactive menu session.
//!
//! Reads selections from any `BufRead` and writes prompts and results to any
//! `Write`, so the same loop drives a terminal and the integration tests.
//! All business rules live in [`stockbook::Ledger`]; this module only parses
//! input, resolves symbols against the [`Market`] and reports outcomes.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::{debug, info, warn};
use stockbook::{persistence, Ledger, Market, Price, Quantity, Side, Symbol, INITIAL_BALANCE};

use crate::audit::{AuditEvent, AuditLog};
use crate::error::{Error, Result};

/// One numbered menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ViewMarket,
    Buy,
    Sell,
    ViewPortfolio,
    ViewTransactions,
    Save,
    Exit,
}

impl MenuChoice {
    /// Parse a menu line (`"0"`..`"6"`, surrounding whitespace ignored).
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "1" => Some(Self::ViewMarket),
            "2" => Some(Self::Buy),
            "3" => Some(Self::Sell),
            "4" => Some(Self::ViewPortfolio),
            "5" => Some(Self::ViewTransactions),
            "6" => Some(Self::Save),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\
==== STOCK TRADING MENU ====
1. View Market Data
2. Buy Stock
3. Sell Stock
4. View Portfolio
5. View Transactions
6. Save Portfolio to File
0. Exit";

/// Settings fixed for the whole session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Skip the username prompt when set
    pub username: Option<String>,
    pub starting_balance: Price,
    /// Directory for `<username>_portfolio.txt`
    pub save_dir: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            username: None,
            starting_balance: INITIAL_BALANCE,
            save_dir: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run a full session: username prompt, menu loop, until `0` or end of input.
///
/// Returns the final ledger.
pub fn run<R: BufRead, W: Write>(
    market: &Market,
    settings: &SessionSettings,
    input: R,
    output: W,
    audit: Option<AuditLog>,
) -> Result<Ledger> {
    let mut term = Terminal { input, output };

    let username = match &settings.username {
        Some(name) => name.clone(),
        None => prompt_username(&mut term)?,
    };

    let mut session = Session {
        market,
        ledger: Ledger::new(username, settings.starting_balance),
        save_dir: settings.save_dir.clone(),
        term,
        audit,
    };
    session.run()?;
    Ok(session.ledger)
}

fn prompt_username<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<String> {
    loop {
        term.prompt("Enter your username: ")?;
        match term.read_line()? {
            None => return Err(Error::Aborted("no username entered".into())),
            Some(name) if name.is_empty() => term.say("Username must not be empty.")?,
            Some(name) => return Ok(name),
        }
    }
}

/// Line-oriented wrapper over the input and output streams.
struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

struct Session<'m, R, W> {
    market: &'m Market,
    ledger: Ledger,
    save_dir: PathBuf,
    term: Terminal<R, W>,
    audit: Option<AuditLog>,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        info!(
            "session started for {} with {}",
            self.ledger.owner(),
            self.ledger.balance()
        );
        self.audit(AuditEvent::session_started(&self.ledger));

        loop {
            self.term.say("")?;
            self.term.say(MENU)?;
            self.term.prompt("Choose option: ")?;

            let Some(line) = self.term.read_line()? else {
                debug!("end of input, leaving session");
                break;
            };

            let flow = match MenuChoice::parse(&line) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    self.term.say("Invalid option.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        info!(
            "session ended for {}: {} after {} transactions",
            self.ledger.owner(),
            self.ledger.balance(),
            self.ledger.transactions().len()
        );
        self.audit(AuditEvent::session_ended(&self.ledger));
        self.term.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::ViewMarket => self.show_market()?,
            MenuChoice::Buy => return self.trade(Side::Buy),
            MenuChoice::Sell => return self.trade(Side::Sell),
            MenuChoice::ViewPortfolio => self.show_portfolio()?,
            MenuChoice::ViewTransactions => self.show_transactions()?,
            MenuChoice::Save => self.save()?,
            MenuChoice::Exit => {
                self.term.say("Exiting...")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn show_market(&mut self) -> Result<()> {
        self.term.say("\nMarket Data:")?;
        for stock in self.market.list() {
            self.term.say(stock)?;
        }
        Ok(())
    }

    fn trade(&mut self, side: Side) -> Result<Flow> {
        let verb = match side {
            Side::Buy => "buy",
            Side::Sell => "sell",
        };
        self.term.prompt(&format!("Enter stock symbol to {verb}: "))?;
        let Some(raw) = self.term.read_line()? else {
            return Ok(Flow::Exit);
        };

        let symbol = Symbol::normalize(&raw);
        let market = self.market;
        let Some(stock) = market.lookup(symbol.as_str()) else {
            debug!("unknown symbol '{symbol}'");
            self.term.say("Invalid symbol.")?;
            return Ok(Flow::Continue);
        };

        self.term.prompt("Enter quantity: ")?;
        let Some(raw_qty) = self.term.read_line()? else {
            return Ok(Flow::Exit);
        };
        let Ok(qty) = raw_qty.parse::<Quantity>() else {
            self.term.say("Invalid quantity.")?;
            return Ok(Flow::Continue);
        };

        let result = match side {
            Side::Buy => self.ledger.buy(stock, qty),
            Side::Sell => self.ledger.sell(stock, qty),
        }
        .cloned();

        match result {
            Ok(tx) => {
                debug!("{tx}");
                self.term.say(format_args!(
                    "{} {} shares of {}",
                    side.past_tense(),
                    tx.quantity,
                    tx.symbol
                ))?;
                self.audit(AuditEvent::trade_executed(&tx, self.ledger.balance()));
            }
            Err(err) => {
                debug!("{side} {qty} {symbol} refused: {err}");
                self.term.say(err.user_message())?;
                self.audit(AuditEvent::trade_rejected(side, &symbol, qty, &err));
            }
        }
        Ok(Flow::Continue)
    }

    fn show_portfolio(&mut self) -> Result<()> {
        let valuation = match self.ledger.valuation(self.market) {
            Ok(v) => v,
            Err(err) => {
                warn!("cannot value portfolio: {err}");
                self.term.say(err.user_message())?;
                return Ok(());
            }
        };

        self.term.say(format_args!("\nPortfolio for {}", valuation.owner))?;
        self.term.say(format_args!("Balance: {}", valuation.balance))?;
        for line in &valuation.holdings {
            self.term.say(format_args!(
                "{}: {} shares @ {} = {}",
                line.symbol, line.quantity, line.price, line.value
            ))?;
        }
        self.term
            .say(format_args!("Total Portfolio Value: {}", valuation.total))?;
        Ok(())
    }

    fn show_transactions(&mut self) -> Result<()> {
        self.term.say("\nTransaction History:")?;
        if self.ledger.transactions().is_empty() {
            self.term.say("No transactions yet.")?;
        }
        for tx in self.ledger.transactions() {
            writeln!(self.term.output, "{tx}")?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let path = self
            .save_dir
            .join(persistence::portfolio_file_name(self.ledger.owner()));

        match self.ledger.persist(&path) {
            Ok(()) => {
                info!("portfolio saved to {}", path.display());
                self.term
                    .say(format_args!("Portfolio saved to {}", path.display()))?;
                self.audit(AuditEvent::portfolio_saved(&path, &self.ledger));
            }
            Err(err) => {
                warn!("failed to save portfolio to {}: {err}", path.display());
                self.term
                    .say(format_args!("Failed to save portfolio: {err}"))?;
                self.audit(AuditEvent::save_failed(&path, &err));
            }
        }
        Ok(())
    }

    /// Append to the audit trail if auditing is on. Failures are logged, never fatal.
    fn audit(&mut self, event: AuditEvent) {
        if let Some(audit) = self.audit.as_mut() {
            if let Err(e) = audit.append(&event) {
                warn!("{e}");
            }
        }
    }
}
