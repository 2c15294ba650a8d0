//! HTTP application wiring (axum router + services).
//!
//! - `services.rs`: shared state (identity, tokens, record collections)
//! - `routes/`: one file per resource; every handler goes through the gate
//! - `dto.rs`: request bodies and stored records
//! - `validators.rs`: body validators for the write routes
//! - `store.rs`, `identity.rs`: in-memory stand-ins for the external stores

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod identity;
pub mod routes;
pub mod services;
pub mod store;
pub mod validators;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(AppServices::from_config(config)?);
    Ok(router_with(services))
}

/// Router over already-built services.
pub fn router_with(services: Arc<AppServices>) -> Router {
    routes::router().with_state(services).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(middleware::panic_response)),
    )
}
