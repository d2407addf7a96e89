//! dynvar gateway library entry.
//!
//! Serves a `dynvar_core::Registry` over HTTP: `GET` views every variable as
//! JSON or text, `POST ?name=&value=` replaces one value. Hosts can mount
//! `http::routes` into their own router; the bundled binary wires it up from
//! a YAML config together with `/healthz`.

pub mod app_state;
pub mod config;
pub mod http;
pub mod ops;
pub mod router;
