use super::transaction::Transaction;

/// Returns the transactions in which `account` is the sender or the receiver,
/// in collection order.
///
/// The account name must match exactly, including case. An empty result means
/// the account is unknown; callers turn that into a message rather than an
/// error.
pub fn transactions_for<'a>(
  transactions: &'a [Transaction],
  account: &str,
) -> Vec<&'a Transaction> {
  transactions
    .iter()
    .filter(|transaction| {
      transaction.from_account == account || transaction.to_account == account
    })
    .collect()
}

#[cfg(test)]
mod tests {

  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  use super::*;

  fn transaction(from_account: &str, to_account: &str, narrative: &str) -> Transaction {
    let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    Transaction::new(date, from_account, to_account, narrative, dec!(1.00))
  }

  #[test]
  fn transactions_for_matches_both_sides_in_order() {
    let transactions = vec![
      transaction("Alice", "Bob", "lunch"),
      transaction("Carol", "Dan", "stationery"),
      transaction("Bob", "Alice", "coffee"),
    ];

    let found = transactions_for(&transactions, "Alice");

    assert_eq!(found, vec![&transactions[0], &transactions[2]]);
  }

  #[test]
  fn transactions_for_unknown_account_is_empty() {
    let transactions = vec![transaction("Alice", "Bob", "lunch")];

    assert!(transactions_for(&transactions, "Mallory").is_empty());
  }

  #[test]
  fn transactions_for_is_case_sensitive() {
    let transactions = vec![transaction("Alice", "Bob", "lunch")];

    assert!(transactions_for(&transactions, "alice").is_empty());
  }

  #[test]
  fn transactions_for_empty_collection_is_empty() {
    assert!(transactions_for(&[], "Alice").is_empty());
  }
}
