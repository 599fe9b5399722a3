use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::Transaction;

/// Interface to read transactions from an external source.
pub trait TransactionsReader {
  /// Consume the whole source and return the transactions it holds, in
  /// source order, together with one [`Diagnostic`] per skipped record.
  /// Either the full source is read or a fatal [`ImportError`] comes back;
  /// a partial collection never escapes.
  fn read_transactions(&mut self) -> Result<Import, ImportError>;
}

/// The outcome of a successful import.
#[derive(Debug, Default, PartialEq)]
pub struct Import {
  pub transactions: Vec<Transaction>,
  pub diagnostics: Vec<Diagnostic>,
}

/// A warning describing one skipped input record.
///
/// Only the delimited encoding skips records; the tree encodings fail the
/// whole import on the first malformed record instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  /// 1-based position of the record among the data records of its source.
  pub record: usize,
  pub warning: RecordWarning,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "record {}: {}", self.record, self.warning)
  }
}

/// The per-record failures an import can recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordWarning {
  #[error("invalid date")]
  InvalidDate,
  #[error("amount is not a number")]
  InvalidAmount,
}

/// Fatal import failures. Any of these aborts the import and leaves the
/// caller's collection untouched.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("unsupported format: {0}")]
  UnsupportedFormat(String),

  #[error("malformed input: {0}")]
  Structural(String),

  #[error("failed to read source: {0}")]
  Io(#[from] std::io::Error),
}
