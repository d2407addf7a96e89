//! Axum router wiring for the standalone binary.

use axum::{routing::get, Router};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .merge(http::routes(&state.cfg().server.path, state.registry()))
}
