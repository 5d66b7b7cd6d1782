use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Wipe listings and load demo data on startup.
    pub seed_database: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            seed_database: env::var("SEED_DATABASE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> crate::error::Result<SocketAddr> {
        let host: IpAddr = self.server_host.parse().map_err(|e| {
            AppError::Configuration(format!(
                "SERVER_HOST must be an IP address, got {:?}: {}",
                self.server_host, e
            ))
        })?;
        Ok(SocketAddr::new(host, self.server_port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn test_socket_addr() {
        let mut config = test_config();
        config.server_host = "127.0.0.1".to_string();
        config.server_port = 5000;

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let mut config = test_config();
        config.server_host = "localhost".to_string();

        let err = config.socket_addr().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
