//! Variable kinds.
//!
//! Each kind stores its value so that readers always observe a complete
//! value written by some finished store: `i64` and `f64` (as bits) live in
//! atomics, strings behind a lock that only ever swaps an `Arc<str>`.
//!
//! `render` produces a valid JSON scalar. `parse_and_set` takes plain text:
//! for strings the input is stored verbatim, it is not JSON-decoded.

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{DynVarError, Result};

/// The closed set of variable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Float,
    String,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed 64-bit integer variable.
#[derive(Debug)]
pub struct IntVar {
    v: AtomicI64,
}

impl IntVar {
    pub(crate) fn new(value: i64) -> Self {
        Self { v: AtomicI64::new(value) }
    }

    pub fn value(&self) -> i64 {
        self.v.load(Ordering::Acquire)
    }

    pub fn set(&self, value: i64) {
        self.v.store(value, Ordering::Release);
    }

    pub fn render(&self) -> String {
        self.value().to_string()
    }

    pub fn parse_and_set(&self, s: &str) -> Result<()> {
        let v = s.parse::<i64>().map_err(|_| parse_err(Kind::Int, s))?;
        self.set(v);
        Ok(())
    }
}

/// 64-bit float variable, stored as raw bits.
#[derive(Debug)]
pub struct FloatVar {
    bits: AtomicU64,
}

impl FloatVar {
    pub(crate) fn new(value: f64) -> Self {
        Self { bits: AtomicU64::new(value.to_bits()) }
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Shortest round-trip decimal. NaN and infinities render as `null`.
    pub fn render(&self) -> String {
        format_float(self.value())
    }

    pub fn parse_and_set(&self, s: &str) -> Result<()> {
        let v = s.parse::<f64>().map_err(|_| parse_err(Kind::Float, s))?;
        self.set(v);
        Ok(())
    }
}

/// UTF-8 string variable.
#[derive(Debug)]
pub struct StrVar {
    s: RwLock<Arc<str>>,
}

impl StrVar {
    pub(crate) fn new(value: &str) -> Self {
        Self { s: RwLock::new(Arc::from(value)) }
    }

    /// Unquoted current value.
    pub fn value(&self) -> Arc<str> {
        // Writers only swap the Arc, so a poisoned lock still holds a whole value.
        let guard = self.s.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn set(&self, value: &str) {
        let next: Arc<str> = Arc::from(value);
        let mut guard = self.s.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    /// JSON-quoted form.
    pub fn render(&self) -> String {
        let v = self.value();
        serde_json::to_string(&*v).unwrap_or_else(|_| "\"\"".to_string())
    }

    /// Never fails; `s` is stored as-is.
    pub fn parse_and_set(&self, s: &str) -> Result<()> {
        self.set(s);
        Ok(())
    }
}

/// `%g`-style shortest form: plain decimal for exponents in [-4, 21),
/// otherwise `d.ddde±XX` with at least two exponent digits.
fn format_float(x: f64) -> String {
    if !x.is_finite() {
        return "null".to_string();
    }
    let sci = format!("{x:e}");
    let Some((mant, exp)) = sci.split_once('e') else {
        return x.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..21).contains(&exp) {
        return x.to_string();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mant}e{sign}{:02}", exp.unsigned_abs())
}

fn parse_err(kind: Kind, input: &str) -> DynVarError {
    DynVarError::Parse { kind, input: input.to_string() }
}

/// A registered variable: a shared handle to one of the three kinds.
#[derive(Debug, Clone)]
pub enum Var {
    Int(Arc<IntVar>),
    Float(Arc<FloatVar>),
    Str(Arc<StrVar>),
}

impl Var {
    pub fn kind(&self) -> Kind {
        match self {
            Var::Int(_) => Kind::Int,
            Var::Float(_) => Kind::Float,
            Var::Str(_) => Kind::String,
        }
    }

    /// Current value as a JSON scalar literal.
    pub fn render(&self) -> String {
        match self {
            Var::Int(v) => v.render(),
            Var::Float(v) => v.render(),
            Var::Str(v) => v.render(),
        }
    }

    /// Replace the value from text. On error the old value is kept.
    pub fn parse_and_set(&self, s: &str) -> Result<()> {
        match self {
            Var::Int(v) => v.parse_and_set(s),
            Var::Float(v) => v.parse_and_set(s),
            Var::Str(v) => v.parse_and_set(s),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
