//! SupportBank keeps track of who owes what within a shared ledger
//!
//! Transaction records come in three file encodings: delimited rows (CSV),
//! an array of objects (JSON) and an element tree (XML). Whatever the
//! source, records normalize into the single in-memory [`Transaction`]
//! model, and the loaded collection answers two questions: the net balance
//! of every account and the full listing of one account. A collection can
//! be written back out in any of the supported encodings.
//!
//! [`load`] and [`export`] are the file-level entry points; [`balances`] and
//! [`transactions_for`] are the queries over a loaded collection. The
//! interactive prompt in [`cli`] is a thin consumer of those four
//! operations.

pub mod cli;
pub mod io;
pub mod ledger;

pub use io::{
  export, load, Diagnostic, ExportError, Format, Import, ImportError, RecordWarning,
};
pub use ledger::{balances, transactions_for, AccountId, Balances, Transaction};
