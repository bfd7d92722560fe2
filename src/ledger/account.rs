//! Balance holder guarded by its own lock, so that accounts never contend with each other.

use {
    crate::ledger::error::LedgerError,
    bigdecimal::{BigDecimal, Zero},
    std::sync::{Mutex, MutexGuard},
};

#[derive(Debug, Default)]
pub struct Account {
    // Never negative.
    balance: Mutex<BigDecimal>,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire_balance_lock(&self) -> Result<MutexGuard<'_, BigDecimal>, LedgerError> {
        self.balance
            .lock()
            .map_err(|_| LedgerError::FailedToAcquireAccountLock)
    }

    /// Returns a snapshot of the current balance.
    pub fn read(&self) -> Result<BigDecimal, LedgerError> {
        Ok(self.acquire_balance_lock()?.clone())
    }

    /// Adds `funds` to the balance. Funds must be strictly positive.
    pub fn credit(&self, funds: &BigDecimal) -> Result<(), LedgerError> {
        if !is_positive(funds) {
            return Err(LedgerError::InvalidFunds(funds.clone()));
        }

        let mut balance = self.acquire_balance_lock()?;
        *balance = &*balance + funds;

        Ok(())
    }

    /// Subtracts `funds` from the balance, refusing to go below zero.
    pub fn debit(&self, funds: &BigDecimal) -> Result<(), LedgerError> {
        if !is_positive(funds) {
            return Err(LedgerError::InvalidFunds(funds.clone()));
        }

        let mut balance = self.acquire_balance_lock()?;
        let future_balance = &*balance - funds;
        if future_balance < BigDecimal::zero() {
            return Err(LedgerError::InsufficientFunds);
        }
        *balance = future_balance;

        Ok(())
    }
}

fn is_positive(funds: &BigDecimal) -> bool {
    *funds > BigDecimal::zero()
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr, std::thread};

    const PI: &str = "3.141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117";

    fn pi() -> BigDecimal {
        BigDecimal::from_str(PI).unwrap()
    }

    #[test]
    fn test_new_account_has_zero_balance() {
        let account = Account::new();
        assert_eq!(account.read().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_credit_accumulates_exactly() {
        let account = Account::new();
        let iterations = 200_000;

        for _ in 0..iterations {
            account.credit(&pi()).unwrap();
        }

        assert_eq!(account.read().unwrap(), pi() * BigDecimal::from(iterations));
    }

    // Full two million credits; slow in debug builds, run with `cargo test --release -- --ignored`.
    #[test]
    #[ignore]
    fn test_credit_accumulates_exactly_two_million_times() {
        let account = Account::new();
        let funds = pi();
        let iterations = 2_000_000;

        for _ in 0..iterations {
            account.credit(&funds).unwrap();
        }

        assert_eq!(account.read().unwrap(), &funds * BigDecimal::from(iterations));
    }

    #[test]
    fn test_concurrent_credits_are_not_lost() {
        let account = Account::new();
        let funds = pi();
        let threads = 8;
        let per_thread = 10_000;

        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        account.credit(&funds).unwrap();
                    }
                });
            }
        });

        let expected = &funds * BigDecimal::from(threads * per_thread);
        assert_eq!(account.read().unwrap(), expected);
    }

    #[test]
    fn test_concurrent_debits_drain_to_zero() {
        let account = Account::new();
        let funds = pi();
        let threads = 8;
        let per_thread = 10_000;
        account
            .credit(&(&funds * BigDecimal::from(threads * per_thread)))
            .unwrap();

        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        account.debit(&funds).unwrap();
                    }
                });
            }
        });

        assert_eq!(account.read().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_concurrent_credit_debit_and_read_preserve_balance() {
        let account = Account::new();
        let funds = pi();
        let threads = 4;
        let per_thread = 10_000;
        let initial = &funds * BigDecimal::from(threads * per_thread);
        account.credit(&initial).unwrap();

        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        account.credit(&funds).unwrap();
                    }
                });
                s.spawn(|| {
                    for _ in 0..per_thread {
                        account.debit(&funds).unwrap();
                    }
                });
                s.spawn(|| {
                    for _ in 0..per_thread {
                        assert!(account.read().unwrap() >= BigDecimal::zero());
                    }
                });
            }
        });

        assert_eq!(account.read().unwrap(), initial);
    }

    #[test]
    fn test_credit_rejects_non_positive_funds() {
        let account = Account::new();

        assert!(matches!(
            account.credit(&BigDecimal::zero()),
            Err(LedgerError::InvalidFunds(_))
        ));
        assert!(matches!(
            account.credit(&-pi()),
            Err(LedgerError::InvalidFunds(_))
        ));
        assert_eq!(account.read().unwrap(), BigDecimal::zero());

        account.credit(&pi()).unwrap();
        assert_eq!(account.read().unwrap(), pi());
    }

    #[test]
    fn test_debit_rejects_non_positive_funds() {
        let account = Account::new();
        account.credit(&pi()).unwrap();

        assert!(matches!(
            account.debit(&BigDecimal::zero()),
            Err(LedgerError::InvalidFunds(_))
        ));
        assert!(matches!(
            account.debit(&-pi()),
            Err(LedgerError::InvalidFunds(_))
        ));
        assert_eq!(account.read().unwrap(), pi());

        account.debit(&pi()).unwrap();
        assert_eq!(account.read().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_debit_fails_when_not_enough_balance() {
        let account = Account::new();

        assert!(matches!(
            account.debit(&pi()),
            Err(LedgerError::InsufficientFunds)
        ));
        assert_eq!(account.read().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_read_is_idempotent() {
        let account = Account::new();
        account.credit(&BigDecimal::from_str("100.5").unwrap()).unwrap();

        let first = account.read().unwrap();
        let second = account.read().unwrap();

        assert_eq!(first, second);
        assert_eq!(first, BigDecimal::from_str("100.50").unwrap());
    }
}
