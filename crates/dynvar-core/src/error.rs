//! Error types shared by the registry and the gateway.

use thiserror::Error;

use crate::var::Kind;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed query or unparseable value.
    BadRequest,
    /// No variable with that name.
    NotFound,
}

impl ClientCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DynVarError>;

/// Recoverable request errors, all handled at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynVarError {
    /// The message lacks a closing parenthesis; clients match on it verbatim.
    #[error("unknown format: {0:?} (want 'json' or 'text'")]
    UnknownFormat(String),
    #[error("missing parameter: {0}")]
    MissingParam(&'static str),
    #[error("unknown var: {0}")]
    NotFound(String),
    #[error("invalid {kind} value: {input:?}")]
    Parse { kind: Kind, input: String },
}

impl DynVarError {
    /// Map to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DynVarError::UnknownFormat(_)
            | DynVarError::MissingParam(_)
            | DynVarError::Parse { .. } => ClientCode::BadRequest,
            DynVarError::NotFound(_) => ClientCode::NotFound,
        }
    }
}

/// Registration failure. Always a programming mistake: callers must abort
/// startup on it instead of carrying on with a half-populated registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use]
pub enum RegisterError {
    #[error("dynvar: reuse of exported var name: {0}")]
    Duplicate(String),
    #[error("dynvar: empty var name")]
    EmptyName,
}
