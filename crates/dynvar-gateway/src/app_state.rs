//! Shared application state for the gateway binary.

use std::sync::Arc;

use dynvar_core::Registry;

use crate::config::{DynVarConfig, InitValue, Result};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: DynVarConfig,
    registry: Arc<Registry>,
}

impl AppState {
    /// Build state with a fresh registry seeded from `cfg.vars`.
    pub fn new(cfg: DynVarConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Seed an existing registry, e.g. one the host already populated.
    pub fn with_registry(cfg: DynVarConfig, registry: Arc<Registry>) -> Result<Self> {
        for v in &cfg.vars {
            let seeded = match &v.init {
                InitValue::Int(i) => registry.new_int(*i, &v.name).map(drop),
                InitValue::Float(f) => registry.new_float(*f, &v.name).map(drop),
                InitValue::String(s) => registry.new_string(s, &v.name).map(drop),
            };
            seeded?;
        }
        tracing::info!(vars = cfg.vars.len(), "registry seeded");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
        })
    }

    pub fn cfg(&self) -> &DynVarConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }
}
