use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Alias for the name identifying an account.
///
/// Accounts are free text and exist only by appearing in a transaction;
/// there is no registry of valid names anywhere.
pub type AccountId = String;

/// A single movement of money between two accounts.
///
/// The amount is the magnitude moved from `from_account` to `to_account`;
/// whether it counts for or against an account is decided at aggregation
/// time. Once constructed, a transaction never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
  pub date: NaiveDate,
  pub from_account: AccountId,
  pub to_account: AccountId,
  pub narrative: String,
  pub amount: Decimal,
}

impl Transaction {
  pub fn new(
    date: NaiveDate,
    from_account: impl Into<AccountId>,
    to_account: impl Into<AccountId>,
    narrative: impl Into<String>,
    amount: Decimal,
  ) -> Self {
    Self {
      date,
      from_account: from_account.into(),
      to_account: to_account.into(),
      narrative: narrative.into(),
      amount,
    }
  }
}

#[cfg(test)]
mod tests {

  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn new_transaction() {
    let date = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
    let transaction = Transaction::new(date, "Alice", "Bob", "lunch", dec!(10.00));

    assert_eq!(
      transaction,
      Transaction {
        date,
        from_account: "Alice".to_string(),
        to_account: "Bob".to_string(),
        narrative: "lunch".to_string(),
        amount: dec!(10.00),
      }
    );
  }
}
