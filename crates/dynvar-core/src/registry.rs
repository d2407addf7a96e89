//! Name -> variable registry.
//!
//! - `vars`: name -> `Var`, read without the index lock (lookups, sets)
//! - `names`: every registered name, kept sorted for deterministic walks
//!
//! Insertion touches both under the `names` write lock, so a walk never sees a
//! name that is missing from `vars` or vice versa. Entries are never removed.

use std::sync::{Arc, OnceLock, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::RegisterError;
use crate::var::{FloatVar, IntVar, StrVar, Var};

#[derive(Debug, Default)]
pub struct Registry {
    vars: DashMap<String, Var>,
    names: RwLock<Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            vars: DashMap::new(),
            names: RwLock::new(Vec::new()),
        }
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Publish `var` under `name`.
    ///
    /// Fails on an empty or already-registered name; the existing entry is left
    /// untouched. Treat the error as fatal.
    pub fn register(&self, name: &str, var: Var) -> Result<(), RegisterError> {
        if name.is_empty() {
            return Err(RegisterError::EmptyName);
        }

        // Index poisoning can only happen between two complete states.
        let mut names = self.names.write().unwrap_or_else(|e| e.into_inner());

        match self.vars.entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::error!(name = %name, "duplicate var registration");
                return Err(RegisterError::Duplicate(name.to_string()));
            }
            Entry::Vacant(slot) => {
                tracing::debug!(name = %name, kind = %var.kind(), "var registered");
                slot.insert(var);
            }
        }

        let pos = names.binary_search_by(|n| n.as_str().cmp(name)).unwrap_or_else(|p| p);
        names.insert(pos, name.to_string());
        Ok(())
    }

    pub fn new_int(&self, value: i64, name: &str) -> Result<Arc<IntVar>, RegisterError> {
        let v = Arc::new(IntVar::new(value));
        self.register(name, Var::Int(Arc::clone(&v)))?;
        Ok(v)
    }

    pub fn new_float(&self, value: f64, name: &str) -> Result<Arc<FloatVar>, RegisterError> {
        let v = Arc::new(FloatVar::new(value));
        self.register(name, Var::Float(Arc::clone(&v)))?;
        Ok(v)
    }

    pub fn new_string(&self, value: &str, name: &str) -> Result<Arc<StrVar>, RegisterError> {
        let v = Arc::new(StrVar::new(value));
        self.register(name, Var::Str(Arc::clone(&v)))?;
        Ok(v)
    }

    pub fn get(&self, name: &str) -> Option<Var> {
        self.vars.get(name).map(|r| r.value().clone())
    }

    /// Call `f` for every entry in ascending name order.
    ///
    /// The index read lock is held for the whole traversal: registrations wait,
    /// value updates do not. `f` must not register new variables.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Var),
    {
        let names = self.names.read().unwrap_or_else(|e| e.into_inner());
        for name in names.iter() {
            let Some(var) = self.get(name) else { continue };
            f(name, &var);
        }
    }

    /// Sorted snapshot of all names.
    pub fn names(&self) -> Vec<String> {
        self.names.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
