use color_eyre::eyre::{eyre, WrapErr};
use std::{net::SocketAddr, path::PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PRODUCT_NAMES_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub storage_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub product_names_limit: u32,
}

impl Config {
    /// Reads the configuration from the environment. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honored.
    pub fn from_env() -> color_eyre::Result<Self> {
        let api_base_url = normalize_base_url(
            &std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        );
        if api_base_url.is_empty() {
            return Err(eyre!("API_BASE_URL must not be empty"));
        }

        let storage_dir = std::env::var("STORAGE_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| String::from("127.0.0.1:3000"))
            .parse::<SocketAddr>()
            .wrap_err("BIND_ADDR is not a socket address")?;

        let product_names_limit = match std::env::var("PRODUCT_NAMES_LIMIT") {
            Ok(raw) => raw
                .parse::<u32>()
                .wrap_err("PRODUCT_NAMES_LIMIT is not a number")?,
            Err(_) => DEFAULT_PRODUCT_NAMES_LIMIT,
        };

        Ok(Self {
            api_base_url,
            storage_dir,
            bind_addr,
            product_names_limit,
        })
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
