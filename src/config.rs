use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub data_file: PathBuf,
    pub jwt_secret: String,
    pub admin_token_ttl: usize,

    pub toast_dismiss_ms: u64,
    pub log_dir: PathBuf,

    pub api_prefix: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .parse()
        .with_context(|| format!("{key} must be a valid number"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            data_file: var_or("DATA_FILE", "data/storage.json").into(),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            admin_token_ttl: parse_or("ADMIN_TOKEN_TTL", "3600")?, // 1 hour

            toast_dismiss_ms: parse_or("TOAST_DISMISS_MS", "4000")?,
            log_dir: var_or("LOG_DIR", "logs").into(),

            api_prefix: var_or("API_PREFIX", "/api/v1"),
        })
    }
}
