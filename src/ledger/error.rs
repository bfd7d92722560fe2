use {crate::models::AccountId, bigdecimal::BigDecimal, thiserror::Error};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unexpected accountId {0}: accountId should be a non-zero positive integer number")]
    InvalidId(i64),
    #[error("account with id:{0} already registered")]
    AccountAlreadyExists(AccountId),
    #[error("account with id:{0} does not exist")]
    AccountNotFound(AccountId),
    #[error("unexpected zero or negative funds amount: {0}")]
    InvalidFunds(BigDecimal),
    #[error("not enough balance")]
    InsufficientFunds,
    #[error("Failed to acquire account balance lock")]
    FailedToAcquireAccountLock,
}
