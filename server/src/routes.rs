//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console talks to the external IAM service directly from the browser,
//! so this server exposes no API of its own: Leptos SSR for every console
//! route, the compiled bundle under `/pkg`, and a health probe.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ServerError;
use crate::config::ServerConfig;

/// Load Leptos options from the workspace metadata, applying env overrides.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_options(config: &ServerConfig) -> Result<LeptosOptions, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Leptos(e.to_string()))?;
    let mut options = conf.leptos_options;
    options.site_addr = config.bind_addr();
    if let Some(root) = &config.site_root {
        options.site_root = root.to_string_lossy().into();
    }
    Ok(options)
}

fn probe_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Leptos SSR console plus static assets and the health probe.
pub fn app(leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options.clone());

    // Compiled WASM, JS and CSS live under the site root's /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    probe_routes()
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
