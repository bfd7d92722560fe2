use config::{Config, ConfigError, Environment, File, FileFormat};

const ENV_PREFIX: &str = "WALLET";

fn load<T: serde::de::DeserializeOwned>(config_path: &str) -> Result<T, ConfigError> {
    let builder = Config::builder()
        .add_source(File::new(config_path, FileFormat::Toml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct WalletServerConfig {
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub debug: bool,
}

impl WalletServerConfig {
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        load(config_path)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct WalletClientConfig {
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub debug: bool,
    pub tasks: u32,
    pub accounts: i64,
    pub credit_chance: u32,
    pub debit_chance: u32,
    pub request_interval_ms: u64,
}

impl WalletClientConfig {
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        load(config_path)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct LoggingConfig {
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: "logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs};

    #[test]
    fn test_server_config_from_file() {
        let path = std::env::temp_dir().join("wallet_ledger_server_config_test.toml");
        fs::write(
            &path,
            "debug = true\n[http]\naddress = \"0.0.0.0\"\nport = 9000\n",
        )
        .unwrap();

        let config = WalletServerConfig::from_file(path.to_str().unwrap()).unwrap();

        assert!(config.debug);
        assert_eq!(config.http.address, "0.0.0.0");
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.logging.directory, "logs");
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(WalletServerConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
