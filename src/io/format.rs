use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// The file encodings the bank can read and write.
///
/// Readers and writers are picked by this tag alone; file contents are never
/// sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  /// Comma-separated rows with a fixed five column layout.
  Csv,
  /// An array of objects, one object per transaction.
  Json,
  /// An element tree, one element per transaction.
  Xml,
}

/// Raised when a name is not one of the supported format names.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("unknown format: {0}")]
pub struct UnknownFormat(pub String);

impl Format {
  /// Derives the format from the file extension of `path`, ignoring case.
  pub fn from_path(path: &Path) -> Option<Format> {
    let extension = path.extension()?.to_str()?;
    extension.parse().ok()
  }
}

impl FromStr for Format {
  type Err = UnknownFormat;

  fn from_str(name: &str) -> Result<Self, Self::Err> {
    match name.to_ascii_lowercase().as_str() {
      "csv" => Ok(Format::Csv),
      "json" => Ok(Format::Json),
      "xml" => Ok(Format::Xml),
      _ => Err(UnknownFormat(name.to_string())),
    }
  }
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Format::Csv => "csv",
      Format::Json => "json",
      Format::Xml => "xml",
    };
    f.write_str(name)
  }
}

#[cfg(test)]
mod tests {

  use super::*;

  #[test]
  fn format_from_path() {
    let cases = vec![
      ("transactions.csv", Some(Format::Csv)),
      ("Transactions2013.json", Some(Format::Json)),
      ("data/Transactions2012.xml", Some(Format::Xml)),
      ("SHOUTY.CSV", Some(Format::Csv)),
      ("notes.txt", None),
      ("no-extension", None),
    ];

    for (path, expected) in cases {
      assert_eq!(Format::from_path(Path::new(path)), expected, "path: {}", path);
    }
  }

  #[test]
  fn format_from_name() {
    assert_eq!("csv".parse(), Ok(Format::Csv));
    assert_eq!("JSON".parse(), Ok(Format::Json));
    assert_eq!("Xml".parse(), Ok(Format::Xml));
    assert_eq!(
      "yaml".parse::<Format>(),
      Err(UnknownFormat("yaml".to_string()))
    );
  }

  #[test]
  fn format_displays_lowercase_name() {
    assert_eq!(Format::Csv.to_string(), "csv");
    assert_eq!(Format::Json.to_string(), "json");
    assert_eq!(Format::Xml.to_string(), "xml");
  }
}
