use {
    clap::Parser,
    tracing::error,
    wallet_ledger::{WalletLedger, config::WalletServerConfig},
};

#[derive(Parser)]
#[command(version, about = "In-memory wallet ledger HTTP service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match WalletServerConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load server config file: {e}");
            return;
        }
    };

    let mut app = WalletLedger::new(config);

    if let Err(e) = app.run().await {
        error!("Wallet ledger failed to run: {}", e);
        eprintln!("Wallet ledger failed to run: {e}");
    }
}
