use {
    crate::{
        models::{AccountId, Transaction, TransactionInstruction},
        transaction_processor::error::TransactionProcessorError,
    },
    bigdecimal::BigDecimal,
};

pub trait TransactionProcessorInterface {
    /// Registers a new account with a zero balance.
    fn register_account(&self, id: i64) -> Result<AccountId, TransactionProcessorError>;

    /// Reads the current balance of an account.
    fn get_balance(&self, id: AccountId) -> Result<BigDecimal, TransactionProcessorError>;

    /// Applies a credit or debit and records it once the account accepted it.
    fn register_transaction(
        &self,
        instruction: TransactionInstruction,
    ) -> Result<Transaction, TransactionProcessorError>;

    /// Looks up a recorded transaction by its generated identifier.
    fn get_transaction(&self, transaction_id: &str) -> Option<Transaction>;
}
