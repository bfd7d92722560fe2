use crate::metrics::{
    ACCOUNTS_CREATED_TOTAL, GET_BALANCE_TIME_SECONDS, TRANSACTION_PROCESSING_TIME_SECONDS,
    TRANSACTIONS_FAILED_TOTAL, TRANSACTIONS_PROCESSED_TOTAL, handler::render_metrics,
};

use {
    crate::{
        config::HttpConfig,
        ledger::error::LedgerError,
        measure,
        models::{AccountId, Transaction, TransactionInstruction},
        transaction_processor::{
            TransactionProcessor, error::TransactionProcessorError,
            interface::TransactionProcessorInterface,
        },
    },
    axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    serde_json::{Value, json},
    std::sync::Arc,
    tokio::net::TcpListener,
    tracing::{error, info, warn},
};

const API_BASE_PATH: &str = "/AccountTransactionAPI";
const TRANSACTION_REGISTERED_SUCCESSFULLY: &str = "transaction registered successfully";

type SharedProcessor = Arc<TransactionProcessor>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTransactionRequest {
    account_id: Value,
    transaction_type: String,
    funds: Value,
    external_transaction_id: String,
}

impl TryFrom<RegisterTransactionRequest> for TransactionInstruction {
    type Error = TransactionProcessorError;

    fn try_from(req: RegisterTransactionRequest) -> Result<Self, Self::Error> {
        Ok(TransactionInstruction {
            account_id: parse_account_id(&numeric_text("accountId", &req.account_id)?)?,
            transaction_type: req.transaction_type,
            funds: numeric_text("funds", &req.funds)?,
            external_transaction_id: req.external_transaction_id,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountBalanceResponse {
    account_id: i64,
    balance: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTransactionResponse {
    message: &'static str,
    transaction_id: String,
    external_transaction_id: String,
    transaction_type: &'static str,
    account_id: i64,
    funds: String,
}

impl From<Transaction> for RegisterTransactionResponse {
    fn from(transaction: Transaction) -> Self {
        RegisterTransactionResponse {
            message: TRANSACTION_REGISTERED_SUCCESSFULLY,
            transaction_id: transaction.id,
            external_transaction_id: transaction.external_id,
            transaction_type: transaction.transaction_type.as_str(),
            account_id: transaction.account_id.0,
            funds: transaction.funds.to_plain_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponse {
    transaction_id: String,
    external_transaction_id: String,
    transaction_type: &'static str,
    account_id: i64,
    funds: String,
    created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        TransactionResponse {
            transaction_id: transaction.id,
            external_transaction_id: transaction.external_id,
            transaction_type: transaction.transaction_type.as_str(),
            account_id: transaction.account_id.0,
            funds: transaction.funds.to_plain_string(),
            created_at: transaction.created_at,
        }
    }
}

/// Accepts a JSON number or string; numbers keep their exact source text.
fn numeric_text(field: &str, value: &Value) -> Result<String, TransactionProcessorError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(TransactionProcessorError::MalformedInput(format!(
            "{field} must be a number or a numeric string, got {other}"
        ))),
    }
}

fn parse_account_id(text: &str) -> Result<AccountId, TransactionProcessorError> {
    text.trim().parse::<i64>().map(AccountId).map_err(|_| {
        TransactionProcessorError::MalformedInput(format!(
            "unexpected accountId '{text}': accountId should be an integer number"
        ))
    })
}

fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn processor_error_to_response(err: TransactionProcessorError) -> Response {
    let code = match &err {
        TransactionProcessorError::Ledger(ledger_error) => match ledger_error {
            LedgerError::InvalidId(_) => "invalid_id",
            LedgerError::AccountAlreadyExists(_) => "account_already_exists",
            LedgerError::AccountNotFound(_) => "account_not_found",
            LedgerError::InvalidFunds(_) => "invalid_funds",
            LedgerError::InsufficientFunds => "insufficient_funds",
            LedgerError::FailedToAcquireAccountLock => {
                error!("Internal ledger failure: {}", err);
                return json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    err.to_string(),
                );
            }
        },
        TransactionProcessorError::UnknownTransactionType(_) => "unknown_transaction_type",
        TransactionProcessorError::MalformedInput(_) => "malformed_input",
    };

    json_error(StatusCode::BAD_REQUEST, code, err.to_string())
}

async fn register_account(
    State(processor): State<SharedProcessor>,
    Path(account_id): Path<String>,
) -> Response {
    let result = parse_account_id(&account_id)
        .and_then(|id| processor.register_account(id.0))
        .and_then(|id| Ok((id, processor.get_balance(id)?)));

    match result {
        Ok((id, balance)) => {
            ACCOUNTS_CREATED_TOTAL.inc();
            info!("Registered account {}", id);
            Json(AccountBalanceResponse {
                account_id: id.0,
                balance: balance.to_plain_string(),
            })
            .into_response()
        }
        Err(e) => {
            warn!("Could not register account {}: {}", account_id, e);
            processor_error_to_response(e)
        }
    }
}

async fn get_account_balance(
    State(processor): State<SharedProcessor>,
    Path(account_id): Path<String>,
) -> Response {
    let result = measure!(GET_BALANCE_TIME_SECONDS, {
        parse_account_id(&account_id)
            .and_then(|id| Ok((id, processor.get_balance(id)?)))
    });

    match result {
        Ok((id, balance)) => Json(AccountBalanceResponse {
            account_id: id.0,
            balance: balance.to_plain_string(),
        })
        .into_response(),
        Err(e) => {
            warn!("Could not get balance of account {}: {}", account_id, e);
            processor_error_to_response(e)
        }
    }
}

async fn register_transaction(State(processor): State<SharedProcessor>, body: String) -> Response {
    let result = measure!(TRANSACTION_PROCESSING_TIME_SECONDS, {
        serde_json::from_str::<RegisterTransactionRequest>(&body)
            .map_err(|e| TransactionProcessorError::MalformedInput(e.to_string()))
            .and_then(TransactionInstruction::try_from)
            .and_then(|instruction| processor.register_transaction(instruction))
    });

    match result {
        Ok(transaction) => {
            TRANSACTIONS_PROCESSED_TOTAL.inc();
            info!(
                "Registered {} transaction {} on account {}",
                transaction.transaction_type, transaction.id, transaction.account_id
            );
            Json(RegisterTransactionResponse::from(transaction)).into_response()
        }
        Err(e) => {
            TRANSACTIONS_FAILED_TOTAL.inc();
            warn!("could not register transaction. {}", e);
            processor_error_to_response(e)
        }
    }
}

async fn get_transaction(
    State(processor): State<SharedProcessor>,
    Path(transaction_id): Path<String>,
) -> Response {
    match processor.get_transaction(&transaction_id) {
        Some(transaction) => Json(TransactionResponse::from(transaction)).into_response(),
        None => json_error(
            StatusCode::NOT_FOUND,
            "transaction_not_found",
            format!("transaction with id:{transaction_id} does not exist"),
        ),
    }
}

async fn metrics_handler() -> String {
    render_metrics()
}

pub fn router(processor: SharedProcessor) -> Router {
    let api = Router::new()
        .route(
            "/register-account/accountId/{account_id}",
            post(register_account),
        )
        .route(
            "/get-account-balance/accountId/{account_id}",
            get(get_account_balance),
        )
        .route("/register-transaction", post(register_transaction))
        .route("/transaction/{transaction_id}", get(get_transaction));

    Router::new()
        .nest(API_BASE_PATH, api)
        .route("/metrics", get(metrics_handler))
        .with_state(processor)
}

pub async fn start_http_service(
    config: HttpConfig,
    processor: SharedProcessor,
    mut shutdown_receiver: tokio::sync::broadcast::Receiver<()>,
) {
    let address = format!("{}:{}", config.address, config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Could not bind HTTP server to {}: {}", address, e);
            return;
        }
    };

    let shutdown = async move {
        shutdown_receiver.recv().await.ok();
        info!("HTTP server is shutting down...");
    };

    info!("Initializing HTTP server at {}", address);

    if let Err(e) = axum::serve(listener, router(processor))
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!("Error in HTTP server: {}", e);
    }
}
