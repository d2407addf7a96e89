//! dynvar core: named runtime variables and the registry that publishes them.
//!
//! A variable is an integer, float, or string scalar that can be read and
//! replaced concurrently. Variables are registered once under a unique name
//! and live as long as their registry. The HTTP surface lives in
//! `dynvar-gateway`; nothing here depends on a runtime or transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Duplicate names
//! come back as `RegisterError`, which callers treat as a startup failure.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod registry;
pub mod var;

pub use error::{ClientCode, DynVarError, RegisterError, Result};
pub use registry::Registry;
pub use var::{FloatVar, IntVar, Kind, StrVar, Var};
