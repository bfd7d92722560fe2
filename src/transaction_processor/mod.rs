//! Transaction Processor module for applying credits and debits to accounts.
//! This module interacts with the Ledger module and keeps the history of
//! every transaction the ledger accepted.

pub mod error;
pub mod interface;

use {
    crate::{
        ledger::{Ledger, interface::LedgerInterface},
        models::{AccountId, Transaction, TransactionInstruction, TransactionType},
        transaction_processor::{
            error::TransactionProcessorError, interface::TransactionProcessorInterface,
        },
    },
    bigdecimal::BigDecimal,
    dashmap::DashMap,
    std::{
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
    },
};

const TRANSACTION_ID_SEPARATOR: char = '-';

/// Largest accepted `|scale|`: at most this many fractional digits, or this many
/// implied trailing zeros for a positive exponent. Keeps plain rendering and
/// rescaling during addition bounded by the request size.
pub const MAX_FUNDS_SCALE: i64 = 1_000;

pub struct TransactionProcessor {
    ledger: Arc<Ledger>,
    // Keyed by generated transaction id; every key is written exactly once.
    pub transactions: DashMap<String, Transaction>,
    transaction_counter: AtomicU64,
}

impl TransactionProcessor {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        TransactionProcessor {
            ledger,
            transactions: DashMap::new(),
            transaction_counter: AtomicU64::new(0),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// `<external-id>-<counter>`, unique even when external ids collide.
    fn next_transaction_id(&self, external_transaction_id: &str) -> String {
        let sequence = self.transaction_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{external_transaction_id}{TRANSACTION_ID_SEPARATOR}{sequence}")
    }
}

fn parse_funds(funds: &str) -> Result<BigDecimal, TransactionProcessorError> {
    let value = BigDecimal::from_str(funds.trim()).map_err(|e| {
        TransactionProcessorError::MalformedInput(format!("unexpected funds value '{funds}': {e}"))
    })?;

    let (_, scale) = value.as_bigint_and_exponent();
    if !(-MAX_FUNDS_SCALE..=MAX_FUNDS_SCALE).contains(&scale) {
        return Err(TransactionProcessorError::MalformedInput(format!(
            "unexpected funds value '{funds}': exponent out of range (scale must be within ±{MAX_FUNDS_SCALE})"
        )));
    }

    Ok(value)
}

impl TransactionProcessorInterface for TransactionProcessor {
    fn register_account(&self, id: i64) -> Result<AccountId, TransactionProcessorError> {
        Ok(self.ledger.register_account(id)?)
    }

    fn get_balance(&self, id: AccountId) -> Result<BigDecimal, TransactionProcessorError> {
        Ok(self.ledger.get_account(id)?.read()?)
    }

    fn register_transaction(
        &self,
        instruction: TransactionInstruction,
    ) -> Result<Transaction, TransactionProcessorError> {
        let funds = parse_funds(&instruction.funds)?;
        let account = self.ledger.get_account(instruction.account_id)?;

        let transaction_type = TransactionType::from_str(&instruction.transaction_type)
            .map_err(TransactionProcessorError::UnknownTransactionType)?;

        match transaction_type {
            TransactionType::Credit => account.credit(&funds)?,
            TransactionType::Debit => account.debit(&funds)?,
        }

        let transaction = Transaction {
            id: self.next_transaction_id(&instruction.external_transaction_id),
            external_id: instruction.external_transaction_id,
            transaction_type,
            funds,
            account_id: instruction.account_id,
            created_at: chrono::Utc::now(),
        };

        self.transactions
            .insert(transaction.id.clone(), transaction.clone());

        Ok(transaction)
    }

    fn get_transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.transactions
            .get(transaction_id)
            .map(|entry| entry.value().clone())
    }
}
