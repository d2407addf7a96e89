//! dynvar gateway binary.
//!
//! - Loads `DYNVAR_CONFIG` (default `dynvar.yaml`)
//! - Seeds the registry from `vars`
//! - Serves the view/set endpoint at `server.path` plus `/healthz`

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use dynvar_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("DYNVAR_CONFIG").unwrap_or_else(|_| "dynvar.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    // Duplicate names end up here; refuse to start with a partial registry.
    let state = app_state::AppState::new(cfg).expect("registry init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "dynvar-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
