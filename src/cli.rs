//! This module contains the interactive prompt and its command language
//!
//! Input lines parse into an explicit [`Command`] before anything runs, so
//! the command surface is a closed set rather than string matching spread
//! around the loop. [`Session`] executes commands against the collection
//! loaded by the most recent import and renders every outcome, success or
//! failure, as text for the prompt; fatal errors never abort the session.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::io::{self, Format};
use crate::ledger::{balances, transactions_for, Transaction};

const PROMPT: &str = "> ";

const NOTHING_LOADED: &str = "No transactions loaded. Import a file first.";

const USAGE: &str = "Commands:
  list all              show the net balance of every account
  list <account>        show every transaction for one account
  import <file> [fmt]   load transactions from a csv, json or xml file
  export <file> [fmt]   write the loaded transactions to a file
  help                  show this message
  quit                  leave the prompt";

/// The commands the prompt understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  ListAll,
  List(String),
  Import(PathBuf, Option<Format>),
  Export(PathBuf, Option<Format>),
  Help,
  Quit,
}

/// Raised when an input line does not parse as a [`Command`].
#[derive(Debug, PartialEq, Eq, Error)]
#[error("unrecognized command {0:?}; type `help` for the command list")]
pub struct InvalidCommand(String);

impl Command {
  /// Parses a single input line. The command word is case-insensitive;
  /// account names keep their exact spelling and may contain spaces.
  pub fn parse(line: &str) -> Result<Command, InvalidCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
      "list" if rest.eq_ignore_ascii_case("all") => Ok(Command::ListAll),
      "list" if !rest.is_empty() => Ok(Command::List(rest.to_string())),
      "import" if !rest.is_empty() => {
        let (path, format) = split_format(rest);
        Ok(Command::Import(path, format))
      }
      "export" if !rest.is_empty() => {
        let (path, format) = split_format(rest);
        Ok(Command::Export(path, format))
      }
      "help" if rest.is_empty() => Ok(Command::Help),
      "quit" | "exit" if rest.is_empty() => Ok(Command::Quit),
      _ => Err(InvalidCommand(line.to_string())),
    }
  }
}

/// Splits an optional trailing format name off a path argument, so that
/// `export out.dat json` names its encoding while `import my file.csv` keeps
/// the whole text as the path.
fn split_format(argument: &str) -> (PathBuf, Option<Format>) {
  if let Some((path, last)) = argument.rsplit_once(char::is_whitespace) {
    if let Ok(format) = last.parse::<Format>() {
      return (PathBuf::from(path.trim()), Some(format));
    }
  }
  (PathBuf::from(argument), None)
}

/// Holds the collection loaded by the most recent successful import, if any.
#[derive(Default)]
pub struct Session {
  transactions: Option<Vec<Transaction>>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  /// Executes one command and returns the text to show at the prompt.
  /// Import diagnostics go to the log in full and are summarized in the
  /// returned text.
  pub fn execute(&mut self, command: Command) -> String {
    match command {
      Command::ListAll => self.list_all(),
      Command::List(account) => self.list_account(&account),
      Command::Import(path, format) => self.import(&path, format),
      Command::Export(path, format) => self.export(&path, format),
      Command::Help => USAGE.to_string(),
      Command::Quit => "Goodbye.".to_string(),
    }
  }

  fn list_all(&self) -> String {
    match &self.transactions {
      None => NOTHING_LOADED.to_string(),
      Some(transactions) => balances(transactions)
        .iter()
        .map(|(account, amount)| format!("{}: {}", account, amount.round_dp(2)))
        .collect::<Vec<_>>()
        .join("\n"),
    }
  }

  fn list_account(&self, account: &str) -> String {
    match &self.transactions {
      None => NOTHING_LOADED.to_string(),
      Some(transactions) => {
        let found = transactions_for(transactions, account);
        if found.is_empty() {
          format!("No transactions found for {}.", account)
        } else {
          found
            .into_iter()
            .map(render_transaction)
            .collect::<Vec<_>>()
            .join("\n")
        }
      }
    }
  }

  fn import(&mut self, path: &Path, format: Option<Format>) -> String {
    match io::load(path, format) {
      Ok(import) => {
        for diagnostic in &import.diagnostics {
          warn!("{}: skipped {}", path.display(), diagnostic);
        }
        let summary = if import.diagnostics.is_empty() {
          format!(
            "Imported {} transactions from {}.",
            import.transactions.len(),
            path.display()
          )
        } else {
          format!(
            "Imported {} transactions from {}; skipped {} malformed records, see the log.",
            import.transactions.len(),
            path.display(),
            import.diagnostics.len()
          )
        };
        info!("{}", summary);
        self.transactions = Some(import.transactions);
        summary
      }
      Err(err) => {
        error!("import of {} failed: {}", path.display(), err);
        format!("Import failed: {}.", err)
      }
    }
  }

  fn export(&self, path: &Path, format: Option<Format>) -> String {
    match &self.transactions {
      None => NOTHING_LOADED.to_string(),
      Some(transactions) => match io::export(transactions, path, format) {
        Ok(()) => {
          let summary = format!(
            "Exported {} transactions to {}.",
            transactions.len(),
            path.display()
          );
          info!("{}", summary);
          summary
        }
        Err(err) => {
          error!("export to {} failed: {}", path.display(), err);
          format!("Export failed: {}.", err)
        }
      },
    }
  }
}

/// One listing line per transaction, in the delimited date convention, with
/// the amount rounded for presentation only.
fn render_transaction(transaction: &Transaction) -> String {
  format!(
    "Date: {} | From: {} | To: {} | Narrative: {} | Amount: {}",
    transaction.date.format("%d/%m/%Y"),
    transaction.from_account,
    transaction.to_account,
    transaction.narrative,
    transaction.amount.round_dp(2)
  )
}

/// Runs the prompt until `quit` or end of input. When a startup file is
/// given it is imported before the first prompt, as if by an `import`
/// command.
pub fn run(startup_import: Option<PathBuf>) -> Result<()> {
  let mut session = Session::new();
  println!("SupportBank ready. Type `help` for the command list.");
  if let Some(path) = startup_import {
    println!("{}", session.execute(Command::Import(path, None)));
  }

  let mut editor = DefaultEditor::new()?;
  loop {
    match editor.readline(PROMPT) {
      Ok(line) => {
        let line = line.trim();
        if line.is_empty() {
          continue;
        }
        let _ = editor.add_history_entry(line);
        match Command::parse(line) {
          Ok(Command::Quit) => {
            println!("Goodbye.");
            break;
          }
          Ok(command) => println!("{}", session.execute(command)),
          Err(err) => println!("{}", err),
        }
      }
      Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
      Err(err) => return Err(err.into()),
    }
  }
  Ok(())
}
