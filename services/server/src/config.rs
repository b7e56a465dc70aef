use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

/// PIN used when `ROSTER_PIN` is unset. Suitable for local use only.
pub const DEFAULT_PIN: &str = "1234";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub pin: String,
    pub data_dir: PathBuf,
    pub seed_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("ROSTER_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()?;

        let pin = std::env::var("ROSTER_PIN").unwrap_or_else(|_| DEFAULT_PIN.to_string());

        let data_dir = std::env::var("ROSTER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let seed_dir = std::env::var("ROSTER_SEED_DIR").map(PathBuf::from).ok();

        let log_level = std::env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            listen_addr,
            pin,
            data_dir,
            seed_dir,
            log_level,
        })
    }

    /// True when running with the built-in PIN.
    pub fn uses_default_pin(&self) -> bool {
        self.pin == DEFAULT_PIN
    }
}
