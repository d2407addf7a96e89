use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use super::{ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynVarConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub vars: Vec<VarConfig>,
}

impl DynVarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;

        let mut seen = HashSet::new();
        for v in &self.vars {
            if v.name.is_empty() {
                return Err(ConfigError::Invalid("vars[].name must not be empty".into()));
            }
            if !seen.insert(v.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate var name: {}", v.name)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Mount point of the view/set endpoint.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.listen is not a socket address: {}",
                self.listen
            )));
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::Invalid("server.path must start with '/'".into()));
        }
        if self.path == "/healthz" {
            return Err(ConfigError::Invalid("server.path collides with /healthz".into()));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_path() -> String {
    "/debug/vars".into()
}

/// One variable seeded at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarConfig {
    pub name: String,
    pub init: InitValue,
}

/// `{ kind: int|float|string, value: ... }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum InitValue {
    Int(i64),
    Float(f64),
    String(String),
}
