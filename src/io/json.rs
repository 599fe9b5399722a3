use std::io::{Read, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

use super::reader::{Import, ImportError, TransactionsReader};
use super::writer::{ExportError, TransactionsWriter};

/// One transaction object of the structured-object encoding. Dates use the
/// calendar ISO form; the amount is accepted as a number or a numeric string
/// and always written back as a numeric string.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct JsonRecord {
  date: NaiveDate,
  from_account: String,
  to_account: String,
  narrative: String,
  amount: Decimal,
}

impl From<JsonRecord> for Transaction {
  fn from(record: JsonRecord) -> Self {
    Transaction {
      date: record.date,
      from_account: record.from_account,
      to_account: record.to_account,
      narrative: record.narrative,
      amount: record.amount,
    }
  }
}

impl From<&Transaction> for JsonRecord {
  fn from(transaction: &Transaction) -> Self {
    JsonRecord {
      date: transaction.date,
      from_account: transaction.from_account.clone(),
      to_account: transaction.to_account.clone(),
      narrative: transaction.narrative.clone(),
      amount: transaction.amount,
    }
  }
}

/// Implementation of [`TransactionsReader`] for the structured-object
/// encoding. The source is trusted to be well formed: a missing field, an
/// unparseable date or a non-numeric amount fails the whole import, and no
/// per-record diagnostics are ever produced.
pub struct JsonTransactionsReader<R>(R);

impl<R: Read> JsonTransactionsReader<R> {
  pub fn new(reader: R) -> Self {
    Self(reader)
  }
}

impl<R: Read> TransactionsReader for JsonTransactionsReader<R> {
  fn read_transactions(&mut self) -> Result<Import, ImportError> {
    let records: Vec<JsonRecord> = serde_json::from_reader(&mut self.0).map_err(|err| {
      if err.is_io() {
        ImportError::Io(err.into())
      } else {
        ImportError::Structural(err.to_string())
      }
    })?;

    Ok(Import {
      transactions: records.into_iter().map(Transaction::from).collect(),
      diagnostics: Vec::new(),
    })
  }
}

/// Implementation of [`TransactionsWriter`] for the structured-object
/// encoding.
pub struct JsonTransactionsWriter<W>(W);

impl<W: Write> JsonTransactionsWriter<W> {
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

impl<W: Write> TransactionsWriter for JsonTransactionsWriter<W> {
  fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<(), ExportError> {
    let records: Vec<JsonRecord> = transactions.iter().map(JsonRecord::from).collect();
    serde_json::to_writer_pretty(&mut self.0, &records)?;
    self.0.write_all(b"\n")?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {

  use indoc::indoc;
  use rust_decimal_macros::dec;

  use super::*;

  fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
  }

  fn read(input: &str) -> Result<Import, ImportError> {
    JsonTransactionsReader::new(input.as_bytes()).read_transactions()
  }

  #[test]
  fn read_transactions_success() {
    let input = indoc! { r#"
      [
        {
          "Date": "2022-04-01",
          "FromAccount": "Alice",
          "ToAccount": "Bob",
          "Narrative": "lunch",
          "Amount": "10.70"
        },
        {
          "Date": "2022-04-15",
          "FromAccount": "Bob",
          "ToAccount": "Carol",
          "Narrative": "book voucher",
          "Amount": 25.5
        }
      ]
    "# };

    let import = read(input).unwrap();

    assert!(import.diagnostics.is_empty());
    assert_eq!(
      import.transactions,
      vec![
        Transaction::new(date(2022, 4, 1), "Alice", "Bob", "lunch", dec!(10.70)),
        Transaction::new(date(2022, 4, 15), "Bob", "Carol", "book voucher", dec!(25.5)),
      ]
    );
  }

  #[test]
  fn read_transactions_empty_array() {
    let import = read("[]").unwrap();

    assert_eq!(import, Import::default());
  }

  #[test]
  fn read_transactions_missing_field_fails() {
    let input = indoc! { r#"
      [
        {
          "Date": "2022-04-01",
          "FromAccount": "Alice",
          "Narrative": "lunch",
          "Amount": "10.70"
        }
      ]
    "# };

    assert!(matches!(read(input), Err(ImportError::Structural(_))));
  }

  #[test]
  fn read_transactions_malformed_date_fails() {
    let input = indoc! { r#"
      [
        {
          "Date": "01/04/2022",
          "FromAccount": "Alice",
          "ToAccount": "Bob",
          "Narrative": "lunch",
          "Amount": "10.70"
        }
      ]
    "# };

    assert!(matches!(read(input), Err(ImportError::Structural(_))));
  }

  #[test]
  fn read_transactions_non_numeric_amount_fails() {
    let input = indoc! { r#"
      [
        {
          "Date": "2022-04-01",
          "FromAccount": "Alice",
          "ToAccount": "Bob",
          "Narrative": "lunch",
          "Amount": "ten"
        }
      ]
    "# };

    assert!(matches!(read(input), Err(ImportError::Structural(_))));
  }

  #[test]
  fn read_transactions_truncated_document_fails() {
    let input = r#"[{"Date": "2022-04-01","#;

    assert!(matches!(read(input), Err(ImportError::Structural(_))));
  }

  #[test]
  fn write_transactions_success() {
    let transactions = vec![Transaction::new(
      date(2022, 4, 1),
      "Alice",
      "Bob",
      "lunch",
      dec!(10.70),
    )];
    let mut buffer = Vec::<u8>::new();

    JsonTransactionsWriter::new(&mut buffer)
      .write_transactions(&transactions)
      .unwrap();

    assert_eq!(
      String::from_utf8_lossy(&buffer),
      indoc! { r#"
        [
          {
            "Date": "2022-04-01",
            "FromAccount": "Alice",
            "ToAccount": "Bob",
            "Narrative": "lunch",
            "Amount": "10.70"
          }
        ]
      "# }
    );
  }

  #[test]
  fn write_transactions_empty_collection() {
    let mut buffer = Vec::<u8>::new();

    JsonTransactionsWriter::new(&mut buffer)
      .write_transactions(&[])
      .unwrap();

    assert_eq!(String::from_utf8_lossy(&buffer), "[]\n");
  }

  #[test]
  fn written_collection_reads_back_identical() {
    let transactions = vec![
      Transaction::new(date(2022, 4, 1), "Alice", "Bob", "lunch", dec!(10.70)),
      Transaction::new(date(2022, 4, 15), "Bob", "Carol", "", dec!(0.01)),
    ];
    let mut buffer = Vec::<u8>::new();

    JsonTransactionsWriter::new(&mut buffer)
      .write_transactions(&transactions)
      .unwrap();
    let import = JsonTransactionsReader::new(buffer.as_slice())
      .read_transactions()
      .unwrap();

    assert_eq!(import.transactions, transactions);
  }
}
