use thiserror::Error;

use crate::ledger::Transaction;

/// Interface for rendering a transaction collection into an external target.
pub trait TransactionsWriter {
  /// Write every transaction in collection order, using the field layout and
  /// date convention of the target encoding, and return whether the
  /// operation was successful or not.
  fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<(), ExportError>;
}

/// Fatal export failures. An export either writes the whole collection or
/// returns one of these.
#[derive(Debug, Error)]
pub enum ExportError {
  #[error("unsupported format: {0}")]
  UnsupportedFormat(String),

  #[error("failed to write target: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to serialize record: {0}")]
  Csv(#[from] csv::Error),

  #[error("failed to serialize record: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to serialize record: {0}")]
  Xml(#[from] quick_xml::Error),
}
