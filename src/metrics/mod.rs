use prometheus::{Counter, Histogram};

use crate::metrics::handler::{counter, histogram_fast_ops, histogram_slow_ops};
pub mod handler;
lazy_static::lazy_static!(
    pub static ref TRANSACTIONS_PROCESSED_TOTAL: Counter =
        counter("transactions_processed_total", "Total number of registered transactions");

    pub static ref TRANSACTIONS_FAILED_TOTAL: Counter =
        counter("transactions_failed_total", "Total number of rejected transactions");

    pub static ref ACCOUNTS_CREATED_TOTAL: Counter =
        counter("accounts_created_total", "Total number of registered accounts");

    pub static ref TRANSACTION_PROCESSING_TIME_SECONDS: Histogram =
        histogram_slow_ops("transaction_processing_time_seconds", "Total time spent registering transactions in seconds");

    pub static ref GET_BALANCE_TIME_SECONDS: Histogram =
        histogram_fast_ops("get_balance_time_seconds", "Total time spent getting account balance in seconds");
);
