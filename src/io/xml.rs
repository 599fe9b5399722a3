use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rust_decimal::Decimal;

use crate::ledger::Transaction;

use super::reader::{Import, ImportError, TransactionsReader};
use super::writer::{ExportError, TransactionsWriter};

const ROOT: &str = "TransactionList";
const RECORD: &str = "SupportTransaction";
const DATE_ATTRIBUTE: &str = "Date";
const NARRATIVE: &str = "Description";
const AMOUNT: &str = "Value";
const PARTIES: &str = "Parties";
const FROM: &str = "From";
const TO: &str = "To";

/// Day zero of the markup-tree date convention. Offsets count calendar days
/// from here, so offset 1 is 1900-01-01.
fn epoch() -> NaiveDate {
  NaiveDate::from_ymd_opt(1899, 12, 31).unwrap()
}

fn date_from_offset(offset: i64) -> Option<NaiveDate> {
  epoch().checked_add_signed(Duration::try_days(offset)?)
}

fn offset_from_date(date: NaiveDate) -> i64 {
  date.signed_duration_since(epoch()).num_days()
}

/// A transaction element as found in the document, before validation.
///
/// Reading is positional: the first child is the narrative, the second the
/// amount, and the third holds the two account entries. Element names are
/// not checked, matching how the listing treats the document as a shape
/// rather than a schema.
struct RawRecord {
  date: String,
  children: Vec<RawChild>,
}

#[derive(Default)]
struct RawChild {
  text: String,
  children: Vec<String>,
}

impl RawRecord {
  fn with_date(element: &BytesStart) -> Result<RawRecord, ImportError> {
    let attribute = element
      .try_get_attribute(DATE_ATTRIBUTE)
      .map_err(|err| ImportError::Structural(err.to_string()))?
      .ok_or_else(|| {
        ImportError::Structural("transaction element is missing its Date attribute".to_string())
      })?;
    let date = attribute
      .unescape_value()
      .map_err(|err| ImportError::Structural(err.to_string()))?
      .into_owned();
    Ok(RawRecord {
      date,
      children: Vec::new(),
    })
  }

  fn into_transaction(self, position: usize) -> Result<Transaction, ImportError> {
    let offset = i64::from_str(self.date.trim()).map_err(|_| {
      ImportError::Structural(format!(
        "transaction {}: date offset {:?} is not an integer",
        position, self.date
      ))
    })?;
    let date = date_from_offset(offset).ok_or_else(|| {
      ImportError::Structural(format!(
        "transaction {}: date offset {} is out of range",
        position, offset
      ))
    })?;

    let mut children = self.children.into_iter();
    let narrative = children
      .next()
      .ok_or_else(|| missing(position, "narrative element"))?;
    let amount = children
      .next()
      .ok_or_else(|| missing(position, "amount element"))?;
    let parties = children
      .next()
      .ok_or_else(|| missing(position, "parties element"))?;

    let amount = Decimal::from_str(amount.text.trim()).map_err(|_| {
      ImportError::Structural(format!(
        "transaction {}: amount {:?} is not a number",
        position,
        amount.text.trim()
      ))
    })?;

    let mut accounts = parties.children.into_iter();
    let from_account = accounts
      .next()
      .ok_or_else(|| missing(position, "sending account entry"))?;
    let to_account = accounts
      .next()
      .ok_or_else(|| missing(position, "receiving account entry"))?;

    Ok(Transaction {
      date,
      from_account: from_account.trim().to_string(),
      to_account: to_account.trim().to_string(),
      narrative: narrative.text.trim().to_string(),
      amount,
    })
  }
}

fn missing(position: usize, what: &str) -> ImportError {
  ImportError::Structural(format!("transaction {}: missing {}", position, what))
}

fn read_error(err: quick_xml::Error) -> ImportError {
  match err {
    quick_xml::Error::Io(err) => {
      ImportError::Io(std::io::Error::new(err.kind(), err.to_string()))
    }
    other => ImportError::Structural(other.to_string()),
  }
}

/// Implementation of [`TransactionsReader`] for the markup-tree encoding.
///
/// Like the structured-object encoding, the source is trusted to be well
/// formed; the first malformed record fails the whole import. Dates are
/// integer day offsets carried by an attribute on each transaction element.
pub struct XmlTransactionsReader<R>(R);

impl<R: BufRead> XmlTransactionsReader<R> {
  pub fn new(reader: R) -> Self {
    Self(reader)
  }
}

impl<R: BufRead> TransactionsReader for XmlTransactionsReader<R> {
  fn read_transactions(&mut self) -> Result<Import, ImportError> {
    let mut reader = Reader::from_reader(&mut self.0);
    let mut buffer = Vec::new();
    let mut transactions = Vec::new();

    // Number of currently open elements: 1 while inside the document root,
    // 2 inside a transaction, 3 inside one of its children, 4 inside an
    // account entry. Anything deeper carries no meaning and is ignored.
    let mut depth = 0usize;
    let mut record: Option<RawRecord> = None;

    loop {
      match reader.read_event_into(&mut buffer) {
        Ok(Event::Start(element)) => {
          match depth {
            0 => {}
            1 => record = Some(RawRecord::with_date(&element)?),
            2 => {
              if let Some(record) = record.as_mut() {
                record.children.push(RawChild::default());
              }
            }
            3 => {
              if let Some(child) = record.as_mut().and_then(|r| r.children.last_mut()) {
                child.children.push(String::new());
              }
            }
            _ => {}
          }
          depth += 1;
        }
        Ok(Event::Empty(element)) => match depth {
          1 => {
            let empty = RawRecord::with_date(&element)?;
            transactions.push(empty.into_transaction(transactions.len() + 1)?);
          }
          2 => {
            if let Some(record) = record.as_mut() {
              record.children.push(RawChild::default());
            }
          }
          3 => {
            if let Some(child) = record.as_mut().and_then(|r| r.children.last_mut()) {
              child.children.push(String::new());
            }
          }
          _ => {}
        },
        Ok(Event::Text(text)) => {
          let text = text
            .unescape()
            .map_err(|err| ImportError::Structural(err.to_string()))?;
          append_text(&mut record, depth, &text);
        }
        Ok(Event::CData(data)) => {
          let text = String::from_utf8_lossy(&data).into_owned();
          append_text(&mut record, depth, &text);
        }
        Ok(Event::End(_)) => {
          depth = depth.checked_sub(1).ok_or_else(|| {
            ImportError::Structural("unexpected closing tag".to_string())
          })?;
          if depth == 1 {
            if let Some(record) = record.take() {
              transactions.push(record.into_transaction(transactions.len() + 1)?);
            }
          }
        }
        Ok(Event::Eof) => {
          if depth != 0 || record.is_some() {
            return Err(ImportError::Structural(
              "unexpected end of document".to_string(),
            ));
          }
          break;
        }
        Ok(_) => {}
        Err(err) => return Err(read_error(err)),
      }
      buffer.clear();
    }

    Ok(Import {
      transactions,
      diagnostics: Vec::new(),
    })
  }
}

fn append_text(record: &mut Option<RawRecord>, depth: usize, text: &str) {
  match depth {
    3 => {
      if let Some(child) = record.as_mut().and_then(|r| r.children.last_mut()) {
        child.text.push_str(text);
      }
    }
    4 => {
      if let Some(entry) = record
        .as_mut()
        .and_then(|r| r.children.last_mut())
        .and_then(|c| c.children.last_mut())
      {
        entry.push_str(text);
      }
    }
    _ => {}
  }
}

/// Implementation of [`TransactionsWriter`] for the markup-tree encoding.
/// Written documents always use the canonical element names, whatever names
/// the collection was originally read from.
pub struct XmlTransactionsWriter<W>(W);

impl<W: Write> XmlTransactionsWriter<W> {
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

impl<W: Write> TransactionsWriter for XmlTransactionsWriter<W> {
  fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<(), ExportError> {
    {
      let mut writer = Writer::new_with_indent(&mut self.0, b' ', 2);
      writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
      writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
      for transaction in transactions {
        let offset = offset_from_date(transaction.date).to_string();
        let mut element = BytesStart::new(RECORD);
        element.push_attribute((DATE_ATTRIBUTE, offset.as_str()));
        writer.write_event(Event::Start(element))?;

        write_text_element(&mut writer, NARRATIVE, &transaction.narrative)?;
        write_text_element(&mut writer, AMOUNT, &transaction.amount.to_string())?;

        writer.write_event(Event::Start(BytesStart::new(PARTIES)))?;
        write_text_element(&mut writer, FROM, &transaction.from_account)?;
        write_text_element(&mut writer, TO, &transaction.to_account)?;
        writer.write_event(Event::End(BytesEnd::new(PARTIES)))?;

        writer.write_event(Event::End(BytesEnd::new(RECORD)))?;
      }
      writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    }
    self.0.write_all(b"\n")?;
    Ok(())
  }
}

fn write_text_element<W: Write>(
  writer: &mut Writer<W>,
  name: &str,
  text: &str,
) -> Result<(), quick_xml::Error> {
  writer.write_event(Event::Start(BytesStart::new(name)))?;
  writer.write_event(Event::Text(BytesText::new(text)))?;
  writer.write_event(Event::End(BytesEnd::new(name)))?;
  Ok(())
}
