//! This module contains all the components needed to read and write transaction files
//!
//! The [`reader`] and [`writer`] modules define the [`TransactionsReader`] and
//! [`TransactionsWriter`] interfaces; the [`csv`], [`json`] and [`xml`] modules
//! each implement both for one encoding. [`load`] and [`export`] pick the
//! implementation through the [`Format`] tag, derived from the file extension
//! unless the caller names a format explicitly.
//!
//! Each encoding module owns its serde records and its date convention. They
//! are intentionally duplicated from the domain model to decouple the IO
//! details from the domain logic and allow their evolution independently.

mod csv;
mod format;
mod json;
mod reader;
mod writer;
mod xml;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::ledger::Transaction;

pub use format::{Format, UnknownFormat};
pub use reader::{Diagnostic, Import, ImportError, RecordWarning, TransactionsReader};
pub use writer::{ExportError, TransactionsWriter};

pub use self::csv::{CsvTransactionsReader, CsvTransactionsWriter};
pub use json::{JsonTransactionsReader, JsonTransactionsWriter};
pub use xml::{XmlTransactionsReader, XmlTransactionsWriter};

/// Loads the transaction collection held in the file at `path`.
///
/// The encoding is taken from `format` when given, otherwise derived from the
/// file extension. The source is consumed in full: the returned [`Import`]
/// carries the transactions in source order plus one diagnostic per record
/// the delimited encoding skipped.
pub fn load(path: impl AsRef<Path>, format: Option<Format>) -> Result<Import, ImportError> {
  let path = path.as_ref();
  if !path.is_file() {
    return Err(ImportError::NotFound(path.to_path_buf()));
  }
  let format = match format {
    Some(format) => format,
    None => Format::from_path(path)
      .ok_or_else(|| ImportError::UnsupportedFormat(describe_extension(path)))?,
  };

  let source = BufReader::new(File::open(path)?);
  let mut reader: Box<dyn TransactionsReader> = match format {
    Format::Csv => Box::new(CsvTransactionsReader::new(source)),
    Format::Json => Box::new(JsonTransactionsReader::new(source)),
    Format::Xml => Box::new(XmlTransactionsReader::new(source)),
  };
  reader.read_transactions()
}

/// Writes `transactions` to the file at `path`, replacing whatever was there.
///
/// The encoding is selected the same way as in [`load`]. The written document
/// reads back as an identical collection through the matching reader.
pub fn export(
  transactions: &[Transaction],
  path: impl AsRef<Path>,
  format: Option<Format>,
) -> Result<(), ExportError> {
  let path = path.as_ref();
  let format = match format {
    Some(format) => format,
    None => Format::from_path(path)
      .ok_or_else(|| ExportError::UnsupportedFormat(describe_extension(path)))?,
  };

  let mut target = BufWriter::new(File::create(path)?);
  {
    let mut writer: Box<dyn TransactionsWriter + '_> = match format {
      Format::Csv => Box::new(CsvTransactionsWriter::new(&mut target)),
      Format::Json => Box::new(JsonTransactionsWriter::new(&mut target)),
      Format::Xml => Box::new(XmlTransactionsWriter::new(&mut target)),
    };
    writer.write_transactions(transactions)?;
  }
  target.flush()?;
  Ok(())
}

fn describe_extension(path: &Path) -> String {
  match path.extension() {
    Some(extension) => extension.to_string_lossy().into_owned(),
    None => path.display().to_string(),
  }
}
