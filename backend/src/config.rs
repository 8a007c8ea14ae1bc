//! Server configuration from the environment
//!
//! `.env` files are loaded by the binary before [`ServerConfig::from_env`] runs.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:pigeon_chess.db?mode=rwc` |
//! | `BIND_ADDR` | `0.0.0.0:3000` |
//! | `ALLOW_SPECTATORS` | `true` |

use std::net::SocketAddr;

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:pigeon_chess.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Applied when a host does not say whether spectators may join
    pub allow_spectators: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_text = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: bind_text.clone(),
                message: e.to_string(),
            })?;

        let allow_spectators = match lookup("ALLOW_SPECTATORS") {
            None => true,
            Some(text) => parse_flag(&text).ok_or_else(|| ConfigError::InvalidValue {
                key: "ALLOW_SPECTATORS",
                value: text.clone(),
                message: "expected true or false".to_string(),
            })?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            allow_spectators,
        })
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
