use {
    clap::Parser,
    rand::{Rng, SeedableRng},
    reqwest::Client,
    serde_json::{Value, json},
    std::time::Duration,
    tracing::{error, info, warn},
    wallet_ledger::{config::WalletClientConfig, logging::init_logging},
};

#[derive(Parser, Debug)]
#[command(version, about = "Load generator for the wallet ledger HTTP API", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "client.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = WalletClientConfig::from_file(&args.config)
        .map_err(|e| format!("Failed to load client configuration file: {}", e))?;

    init_logging(&config.logging, config.debug)?;

    let base_url = format!(
        "http://{}:{}/AccountTransactionAPI",
        config.http.address, config.http.port
    );
    let client = Client::new();

    for account_id in 1..=config.accounts {
        let response = client
            .post(format!("{base_url}/register-account/accountId/{account_id}"))
            .send()
            .await?;
        if response.status().is_success() {
            info!("Registered account {}", account_id);
        } else {
            warn!(
                "Account {} not registered: {}",
                account_id,
                response.text().await.unwrap_or_default()
            );
        }
    }

    let mut join_handles = Vec::new();
    for i in 0..config.tasks {
        let handle = tokio::spawn(run_worker(
            i,
            client.clone(),
            base_url.clone(),
            config.clone(),
        ));
        join_handles.push(handle);
    }

    info!("Starting load generator with {} tasks...", config.tasks);
    for handle in join_handles {
        if let Err(e) = handle.await {
            error!("One of the worker tasks failed: {}", e);
        };
    }
    Ok(())
}

async fn run_worker(
    worker_id: u32,
    client: Client,
    base_url: String,
    config: WalletClientConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut rng = rand::rngs::StdRng::from_os_rng();
    let mut sequence: u64 = 0;

    loop {
        let operation_chance = rng.random_range(0..100);
        let account_id = rng.random_range(1..=config.accounts);

        if operation_chance < config.credit_chance + config.debit_chance {
            let transaction_type = if operation_chance < config.credit_chance {
                "CREDIT"
            } else {
                "DEBIT"
            };
            let funds = format!(
                "{}.{:02}",
                rng.random_range(0..500u32),
                rng.random_range(1..100u32)
            );
            sequence += 1;

            let request = json!({
                "accountId": account_id,
                "transactionType": transaction_type,
                "funds": funds,
                "externalTransactionId": format!("worker{worker_id}-{sequence}"),
            });

            let Ok(response) = client
                .post(format!("{base_url}/register-transaction"))
                .json(&request)
                .send()
                .await
            else {
                continue;
            };

            if response.status().is_success() {
                let body: Value = response.json().await?;
                info!(
                    "[Worker {}] {} {} on account {} as {}",
                    worker_id, transaction_type, funds, account_id, body["transactionId"]
                );
            } else {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                warn!(
                    "[Worker {}] {} {} on account {} rejected: {}",
                    worker_id, transaction_type, funds, account_id, body["message"]
                );
            }
        } else {
            let Ok(response) = client
                .get(format!("{base_url}/get-account-balance/accountId/{account_id}"))
                .send()
                .await
            else {
                continue;
            };

            let body: Value = response.json().await.unwrap_or(Value::Null);
            info!(
                "[Worker {}] Balance of account {}: {}",
                worker_id, account_id, body["balance"]
            );
        }
        tokio::time::sleep(Duration::from_millis(config.request_interval_ms)).await;
    }
}
