use {crate::ledger::error::LedgerError, thiserror::Error};

#[derive(Debug, Error)]
pub enum TransactionProcessorError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("unexpected transaction type: {0}")]
    UnknownTransactionType(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
