//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use thiserror::Error;

use dynvar_core::RegisterError;

pub use schema::{DynVarConfig, InitValue, ServerSection, VarConfig};

/// Startup failures. None of these reach a client; the binary exits on them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Register(#[from] RegisterError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub fn load_from_file(path: &str) -> Result<DynVarConfig> {
    let s = fs::read_to_string(path)?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DynVarConfig> {
    let cfg: DynVarConfig = serde_yaml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}
