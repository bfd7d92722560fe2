use {
    bigdecimal::BigDecimal,
    chrono::{DateTime, Utc},
    std::{fmt, str::FromStr},
};

/// Caller-chosen identifier of an account. Only positive values can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; the unrecognised (upper-cased) text is returned as the error.
impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.as_str() {
            "CREDIT" => Ok(TransactionType::Credit),
            "DEBIT" => Ok(TransactionType::Debit),
            _ => Err(upper),
        }
    }
}

/// A request to move funds on one account, still in its textual form.
#[derive(Debug, Clone)]
pub struct TransactionInstruction {
    pub account_id: AccountId,
    pub transaction_type: String,
    pub funds: String,
    pub external_transaction_id: String,
}

/// Record of a credit or debit that has already been applied to its account.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub external_id: String,
    pub transaction_type: TransactionType,
    pub funds: BigDecimal,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_is_case_insensitive() {
        assert_eq!("credit".parse::<TransactionType>(), Ok(TransactionType::Credit));
        assert_eq!("Debit".parse::<TransactionType>(), Ok(TransactionType::Debit));
        assert_eq!("DEBIT".parse::<TransactionType>(), Ok(TransactionType::Debit));
    }

    #[test]
    fn test_unknown_transaction_type_is_echoed_upper_case() {
        assert_eq!(
            "refund".parse::<TransactionType>(),
            Err("REFUND".to_string())
        );
    }

    #[test]
    fn test_account_id_validity() {
        assert!(AccountId(1).is_valid());
        assert!(!AccountId(0).is_valid());
        assert!(!AccountId(-7).is_valid());
    }
}
