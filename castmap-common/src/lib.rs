//! # castmap Common Library
//!
//! Shared code for the castmap services:
//! - Error type and result alias
//! - TOML configuration model, loading and validation
//! - Configuration file path resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
