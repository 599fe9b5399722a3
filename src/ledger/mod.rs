//! This module contains the in-memory domain model and the queries over it
//!
//! Every supported file encoding normalizes into the same [`Transaction`]
//! record. The [`balances`] fold and the [`transactions_for`] listing are
//! pure functions over an immutable transaction collection; they rebuild
//! their results on every call and never mutate the input.

mod balance;
mod query;
mod transaction;

pub use balance::{balances, Balances};
pub use query::transactions_for;
pub use transaction::{AccountId, Transaction};
