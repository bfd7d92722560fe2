pub mod account;
pub mod error;
pub mod interface;
use {
    crate::{
        ledger::{account::Account, error::LedgerError, interface::LedgerInterface},
        models::AccountId,
    },
    dashmap::{DashMap, mapref::entry::Entry},
    std::sync::Arc,
};

/// Account store. Each account carries its own balance lock; the map itself
/// is only locked per shard while an entry is inserted or looked up.
#[derive(Default)]
pub struct Ledger {
    pub accounts: DashMap<AccountId, Arc<Account>>,
}

impl Ledger {
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl LedgerInterface for Ledger {
    fn register_account(&self, id: i64) -> Result<AccountId, LedgerError> {
        let account_id = AccountId(id);
        if !account_id.is_valid() {
            return Err(LedgerError::InvalidId(id));
        }

        match self.accounts.entry(account_id) {
            Entry::Occupied(_) => Err(LedgerError::AccountAlreadyExists(account_id)),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Account::new()));
                Ok(account_id)
            }
        }
    }

    fn get_account(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        match self.accounts.get(&id) {
            Some(entry) => Ok(Arc::clone(entry.value())),
            None => Err(LedgerError::AccountNotFound(id)),
        }
    }
}
