//! Top-level facade crate for dynvar.
//!
//! Re-exports the registry and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use dynvar_core::*;
}

pub mod gateway {
    pub use dynvar_gateway::*;
}
