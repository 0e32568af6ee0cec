//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CASTMAP_CONFIG";

/// File name looked up in the platform config directory and the working directory
pub const CONFIG_FILE_NAME: &str = "castmap.toml";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5780";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// One movie to fetch credits for, in fetch order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MovieRef {
    /// Display title used for every appearance in this movie
    pub name: String,
    /// Upstream movie identifier
    pub id: u64,
}

/// Upstream credit service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// API key (ENV `CASTMAP_API_KEY` takes priority, see castmap-api config)
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Role-label matching thresholds on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum order-insensitive token-set score
    pub token_set_threshold: u8,
    /// Minimum full-string edit ratio
    pub edit_ratio_threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            token_set_threshold: 80,
            edit_ratio_threshold: 50,
        }
    }
}

/// TOML configuration file contents
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Movies in the order their credits are requested
    #[serde(default)]
    pub movies: Vec<MovieRef>,
    /// Performers of interest; everyone else is excluded from every view
    #[serde(default)]
    pub performers: Vec<String>,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl TomlConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("token_set_threshold", self.matching.token_set_threshold),
            ("edit_ratio_threshold", self.matching.edit_ratio_threshold),
        ] {
            if value > 100 {
                return Err(Error::Config(format!(
                    "matching.{} must be within 0..=100 (got {})",
                    name, value
                )));
            }
        }

        if self.movies.is_empty() {
            return Err(Error::Config("At least one [[movies]] entry is required".to_string()));
        }

        let mut seen = HashSet::new();
        for movie in &self.movies {
            if !seen.insert(movie.id) {
                return Err(Error::Config(format!(
                    "Duplicate movie id {} ({})",
                    movie.id, movie.name
                )));
            }
        }

        if self.upstream.request_timeout_secs == 0 {
            return Err(Error::Config(
                "upstream.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read and validate a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = TomlConfig::from_toml_str(&content)?;

    info!(
        path = %path.display(),
        movies = config.movies.len(),
        performers = config.performers.len(),
        "Loaded configuration"
    );

    Ok(config)
}

/// Config file resolution with priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `CASTMAP_CONFIG`
/// 3. `<platform config dir>/castmap/castmap.toml` if it exists
/// 4. `./castmap.toml` (fallback)
pub struct ConfigPathResolver {
    cli_arg: Option<PathBuf>,
}

impl ConfigPathResolver {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self { cli_arg }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("Config path from command line: {}", path.display());
            return path.clone();
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                debug!("Config path from {}: {}", CONFIG_ENV_VAR, path);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = dirs::config_dir().map(|d| d.join("castmap").join(CONFIG_FILE_NAME)) {
            if path.exists() {
                debug!("Config path from platform config dir: {}", path.display());
                return path;
            }
        }

        PathBuf::from(CONFIG_FILE_NAME)
    }
}
