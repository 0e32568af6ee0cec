//! Configuration resolution for castmap-api
//!
//! Upstream API key priority: ENV → TOML.
//! Listen address: `bind_address` from TOML, with the port optionally
//! replaced by the `--port` command-line flag.

use castmap_common::config::TomlConfig;
use castmap_common::{Error, Result};
use std::net::SocketAddr;
use tracing::{info, warn};

/// Environment variable holding the upstream API key
pub const API_KEY_ENV_VAR: &str = "CASTMAP_API_KEY";

/// Resolve the upstream API key from ENV or TOML
pub fn resolve_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV_VAR).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .upstream
        .api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Upstream API key found in environment and TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("Upstream API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Upstream API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(format!(
        "Upstream API key not configured. Please configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: [upstream] api_key = \"your-key\"",
        API_KEY_ENV_VAR
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Listen address from TOML, with an optional port override
pub fn resolve_bind_address(toml_config: &TomlConfig, port_override: Option<u16>) -> Result<SocketAddr> {
    let mut addr: SocketAddr = toml_config.bind_address.parse().map_err(|e| {
        Error::InvalidInput(format!(
            "bind_address {:?} is not a socket address: {}",
            toml_config.bind_address, e
        ))
    })?;

    if let Some(port) = port_override {
        addr.set_port(port);
    }

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> TomlConfig {
        TomlConfig::from_toml_str(&format!("{}\n[[movies]]\nname = \"Thor\"\nid = 10195\n", extra)).unwrap()
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc123"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    fn test_bind_address_default() {
        let addr = resolve_bind_address(&config(""), None).unwrap();
        assert_eq!(addr, "127.0.0.1:5780".parse().unwrap());
    }

    #[test]
    fn test_port_override() {
        let addr = resolve_bind_address(&config("bind_address = \"0.0.0.0:8000\""), Some(9001)).unwrap();
        assert_eq!(addr, "0.0.0.0:9001".parse().unwrap());
    }

    #[test]
    fn test_invalid_bind_address() {
        let err = resolve_bind_address(&config("bind_address = \"localhost\""), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
