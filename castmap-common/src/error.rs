//! Common error types for castmap

use thiserror::Error;

/// Common result type for castmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across castmap crates
#[derive(Error, Debug)]
pub enum Error {
    /// TOML document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
