//! Runtime configuration from the environment (and `.env`, when present).

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("HOST:PORT is not a socket address: {0}")]
    InvalidAddr(String),
}

/// Where todos are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    Memory,
    Sqlite(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub database: Database,
}

impl Config {
    /// Read `HOST`, `PORT` and `DATABASE_PATH`, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };
        let addr = format!("{host}:{port}");
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr(addr))?;

        let database = match lookup("DATABASE_PATH").as_deref().map(str::trim) {
            None | Some("") | Some(":memory:") => Database::Memory,
            Some(path) => Database::Sqlite(PathBuf::from(path)),
        };

        Ok(Config { addr, database })
    }
}
