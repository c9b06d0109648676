//! Process configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;

pub const DEFAULT_PORT: u16 = 2022;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:clinic.db";
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SERVER_PORT must be a port number, got '{0}'")]
    InvalidPort(String),
    #[error("SERVER_HOST must be an IP address, got '{0}'")]
    InvalidHost(String),
    #[error("CLIENT_ORIGIN is not a valid origin: '{0}'")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    /// Origin allowed by CORS, normally where the UI is served from
    pub client_origin: HeaderValue,
    /// Built UI to serve for any path outside `/rpc`
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            client_origin: HeaderValue::from_static(DEFAULT_CLIENT_ORIGIN),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("SERVER_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            config.database_url = url;
        }
        if let Some(origin) = lookup("CLIENT_ORIGIN") {
            config.client_origin = parse_origin(&origin)?;
        }
        config.static_dir = lookup("STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let trimmed = origin.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidOrigin(origin.to_string()));
    }
    HeaderValue::from_str(trimmed).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 2022);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:2022");
        assert_eq!(config.database_url, "sqlite:clinic.db");
        assert_eq!(config.client_origin, "http://localhost:8080");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "3100"),
            ("SERVER_HOST", "0.0.0.0"),
            ("DATABASE_URL", "sqlite:/var/lib/clinic/records.db"),
            ("CLIENT_ORIGIN", "https://clinic.example.org/"),
            ("STATIC_DIR", "../frontend/dist"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3100");
        assert_eq!(config.database_url, "sqlite:/var/lib/clinic/records.db");
        assert_eq!(config.client_origin, "https://clinic.example.org");
        assert_eq!(config.static_dir, Some(PathBuf::from("../frontend/dist")));
    }

    #[test]
    fn test_invalid_values_fail() {
        let err = config_from(&[("SERVER_PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "SERVER_PORT must be a port number, got 'http'");

        assert!(matches!(
            config_from(&[("SERVER_PORT", "70000")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            config_from(&[("SERVER_HOST", "localhost")]),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            config_from(&[("CLIENT_ORIGIN", "localhost:8080")]),
            Err(ConfigError::InvalidOrigin(_))
        ));
    }
}
