use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::transaction::{AccountId, Transaction};

/// Mapping from account name to its signed net balance, ordered by name.
///
/// A positive balance means the account received more than it sent.
pub type Balances = BTreeMap<AccountId, Decimal>;

/// Folds a transaction collection into the net balance of every account.
///
/// Each transaction subtracts its amount from the sender and adds it to the
/// receiver, so the balances of any collection always sum to zero. An account
/// shows up as soon as it appears on either side of a transaction. The input
/// is left untouched and the result is rebuilt on every call.
pub fn balances(transactions: &[Transaction]) -> Balances {
  let mut balances = Balances::new();
  for transaction in transactions {
    *balances
      .entry(transaction.from_account.clone())
      .or_insert(Decimal::ZERO) -= transaction.amount;
    *balances
      .entry(transaction.to_account.clone())
      .or_insert(Decimal::ZERO) += transaction.amount;
  }
  balances
}
