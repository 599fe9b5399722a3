use std::io::{Read, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::Trim;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

use super::reader::{Diagnostic, Import, ImportError, RecordWarning, TransactionsReader};
use super::writer::{ExportError, TransactionsWriter};

/// Date convention of the delimited encoding. Each encoding owns its own
/// convention; none of them share a parser.
const DATE_FORMAT: &str = "%d/%m/%Y";

const HEADER: [&str; 5] = ["Date", "FromAccount", "ToAccount", "Narrative", "Amount"];

/// One row of the delimited encoding. Columns are positional; the date and
/// amount stay raw text here so their validation can skip a single record
/// instead of failing the whole file.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct CsvRecord {
  date: String,
  from_account: String,
  to_account: String,
  narrative: String,
  amount: String,
}

impl TryFrom<CsvRecord> for Transaction {
  type Error = RecordWarning;

  fn try_from(record: CsvRecord) -> Result<Self, Self::Error> {
    let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
      .map_err(|_| RecordWarning::InvalidDate)?;
    let amount =
      Decimal::from_str(&record.amount).map_err(|_| RecordWarning::InvalidAmount)?;
    Ok(Transaction {
      date,
      from_account: record.from_account,
      to_account: record.to_account,
      narrative: record.narrative,
      amount,
    })
  }
}

impl From<&Transaction> for CsvRecord {
  fn from(transaction: &Transaction) -> Self {
    CsvRecord {
      date: transaction.date.format(DATE_FORMAT).to_string(),
      from_account: transaction.from_account.clone(),
      to_account: transaction.to_account.clone(),
      narrative: transaction.narrative.clone(),
      amount: transaction.amount.to_string(),
    }
  }
}

/// Implementation of [`TransactionsReader`] for the delimited encoding.
///
/// The first row is always taken for a header and dropped, whatever it
/// contains. A record with an unparseable date or amount is skipped with a
/// [`Diagnostic`] carrying its 1-based position among the data records; a
/// record with the wrong column count fails the whole import.
pub struct CsvTransactionsReader<R>(R);

impl<R: Read> CsvTransactionsReader<R> {
  pub fn new(reader: R) -> Self {
    Self(reader)
  }
}

impl<R: Read> TransactionsReader for CsvTransactionsReader<R> {
  fn read_transactions(&mut self) -> Result<Import, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
      .has_headers(true)
      .trim(Trim::All)
      .from_reader(&mut self.0);

    let mut import = Import::default();
    for (position, record) in reader.records().enumerate() {
      let record = record.map_err(|err| ImportError::Structural(err.to_string()))?;
      let record = record
        .deserialize::<CsvRecord>(None)
        .map_err(|err| ImportError::Structural(err.to_string()))?;
      match Transaction::try_from(record) {
        Ok(transaction) => import.transactions.push(transaction),
        Err(warning) => import.diagnostics.push(Diagnostic {
          record: position + 1,
          warning,
        }),
      }
    }
    Ok(import)
  }
}

/// Implementation of [`TransactionsWriter`] for the delimited encoding. The
/// header row is written even for an empty collection.
pub struct CsvTransactionsWriter<W>(W);

impl<W: Write> CsvTransactionsWriter<W> {
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

impl<W: Write> TransactionsWriter for CsvTransactionsWriter<W> {
  fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(&mut self.0);

    writer.write_record(HEADER)?;
    for transaction in transactions {
      writer.serialize(CsvRecord::from(transaction))?;
    }
    writer.flush()?;
    Ok(())
  }
}
