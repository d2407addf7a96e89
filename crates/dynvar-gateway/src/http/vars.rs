//! View/set handler.
//!
//! - `GET  ?format=json|text` : every variable, sorted by name
//! - `POST ?name=N&value=V`   : replace one value (V is plain text)
//! - anything else            : 405

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;

use dynvar_core::error::{ClientCode, DynVarError, Result};
use dynvar_core::Registry;

const JSON_CT: &str = "application/json; charset=utf-8";
const TEXT_CT: &str = "text/plain; charset=utf-8";

/// Query parameters; the first occurrence of a repeated key wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VarsQuery {
    pub format: String,
    pub name: String,
    pub value: String,
}

impl VarsQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut out = Self::default();
        let (mut format, mut name, mut value) = (false, false, false);
        for (k, v) in pairs {
            let (slot, seen) = match k.as_str() {
                "format" => (&mut out.format, &mut format),
                "name" => (&mut out.name, &mut name),
                "value" => (&mut out.value, &mut value),
                _ => continue,
            };
            if !*seen {
                *slot = v;
                *seen = true;
            }
        }
        out
    }

    /// Parse the request URI's query string.
    pub fn from_uri(uri: &Uri) -> Self {
        match Query::<Vec<(String, String)>>::try_from_uri(uri) {
            Ok(Query(pairs)) => Self::from_pairs(pairs),
            Err(e) => {
                tracing::debug!(error = %e, "unparseable query string");
                Self::default()
            }
        }
    }
}

/// Mountable router serving the registry at `path`.
pub fn routes(path: &str, registry: Arc<Registry>) -> Router {
    Router::new().route(path, any(handle)).with_state(registry)
}

pub async fn handle(State(registry): State<Arc<Registry>>, method: Method, uri: Uri) -> Response {
    let res = match method {
        Method::GET => view(&registry, &VarsQuery::from_uri(&uri).format),
        Method::POST => {
            let q = VarsQuery::from_uri(&uri);
            set(&registry, &q.name, &q.value).map(|()| StatusCode::OK.into_response())
        }
        _ => {
            return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, POST")]).into_response();
        }
    };

    match res {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(%method, code = e.client_code().as_str(), error = %e, "dynvar request rejected");
            ApiError(e).into_response()
        }
    }
}

fn view(registry: &Registry, format: &str) -> Result<Response> {
    match format {
        "" | "json" => Ok(([(header::CONTENT_TYPE, JSON_CT)], render_json(registry)).into_response()),
        "text" => Ok(([(header::CONTENT_TYPE, TEXT_CT)], render_text(registry)).into_response()),
        other => Err(DynVarError::UnknownFormat(other.to_string())),
    }
}

fn set(registry: &Registry, name: &str, value: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DynVarError::MissingParam("name"));
    }
    if value.is_empty() {
        return Err(DynVarError::MissingParam("value"));
    }

    let var = registry
        .get(name)
        .ok_or_else(|| DynVarError::NotFound(name.to_string()))?;
    var.parse_and_set(value)?;

    tracing::info!(name = %name, kind = %var.kind(), "dynvar updated");
    Ok(())
}

/// `{\n"a": 1,\n"b": "x"\n}\n`
pub fn render_json(registry: &Registry) -> String {
    let mut out = String::from("{\n");
    let mut first = true;
    registry.walk(|name, var| {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        let key = serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""));
        let _ = write!(out, "{key}: {}", var.render());
    });
    out.push_str("\n}\n");
    out
}

/// `a: 1,\nb: "x"`
pub fn render_text(registry: &Registry) -> String {
    let mut out = String::new();
    let mut first = true;
    registry.walk(|name, var| {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        let _ = write!(out, "{name}: {}", var.render());
    });
    out
}

/// HTTP mapping of `DynVarError`.
///
/// Only the format error carries a body; everything else is status-only.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DynVarError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
        };
        match self.0 {
            DynVarError::UnknownFormat(_) => {
                (status, [(header::CONTENT_TYPE, TEXT_CT)], format!("{}\n", self.0)).into_response()
            }
            _ => status.into_response(),
        }
    }
}
