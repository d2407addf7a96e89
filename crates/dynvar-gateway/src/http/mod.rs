//! HTTP surface over a `Registry`.

pub mod vars;

pub use vars::{handle, routes, ApiError, VarsQuery};
