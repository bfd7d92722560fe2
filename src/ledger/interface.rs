use {
    crate::{
        ledger::{account::Account, error::LedgerError},
        models::AccountId,
    },
    std::sync::Arc,
};

pub trait LedgerInterface {
    /// Creates a new zero-balance account under the caller-supplied id.
    fn register_account(&self, id: i64) -> Result<AccountId, LedgerError>;

    /// Gets a shared handle to an account by its id.
    fn get_account(&self, id: AccountId) -> Result<Arc<Account>, LedgerError>;
}
