use {
    crate::{
        http_server::start_http_service, ledger::Ledger, logging::init_logging,
        transaction_processor::TransactionProcessor,
    },
    std::sync::Arc,
    tokio::signal::ctrl_c,
    tracing::{error, info},
};

pub mod config;
pub mod http_server;
pub mod ledger;
pub mod logging;
mod macros;
pub mod metrics;
pub mod models;
pub mod transaction_processor;

pub struct WalletLedger {
    pub transaction_processor: Arc<TransactionProcessor>,
    pub config: config::WalletServerConfig,
    ledger: Arc<Ledger>,
}

impl WalletLedger {
    pub fn new(config: config::WalletServerConfig) -> Self {
        let ledger = Arc::new(Ledger::default());

        let transaction_processor = Arc::new(TransactionProcessor::new(ledger.clone()));

        WalletLedger {
            transaction_processor,
            config,
            ledger,
        }
    }

    pub async fn run(&mut self) -> Result<(), String> {
        init_logging(&self.config.logging, self.config.debug)
            .map_err(|e| format!("Failed to initialize logging: {e}"))?;

        let (shutdown_sender, _) = tokio::sync::broadcast::channel::<()>(1);
        let mut services = tokio::task::JoinSet::new();

        info!(
            "Initializing with {} accounts and {} transactions",
            self.ledger.account_count(),
            self.transaction_processor.transaction_count()
        );

        {
            let http_processor = Arc::clone(&self.transaction_processor);
            let http_config = self.config.http.clone();
            let shutdown_receiver = shutdown_sender.subscribe();
            services.spawn(async move {
                start_http_service(http_config, http_processor, shutdown_receiver).await
            })
        };

        tokio::select! {
            _ = ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping services...");
                shutdown_sender.send(()).map_err(|e| e.to_string())?;
                while services.join_next().await.is_some() {}

                tracing::info!(
                    "Stopped with {} accounts and {} transactions",
                    self.ledger.account_count(),
                    self.transaction_processor.transaction_count()
                );
            }
            Some(res) = services.join_next() => {
                error!("HTTP service stopped unexpectedly: {:?}", res);
            }
        }

        Ok(())
    }
}
