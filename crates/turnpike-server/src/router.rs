//! Axum router construction
//!
//! Exactly two routes are served:
//! - `POST /server` -- turn exchange
//! - `/health` (any method) -- liveness probe
//!
//! Everything else gets the router's default 404 (or 405 for a wrong method).

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::exchange::{ExchangeHandler, handle_turn};
use crate::health::health;
use crate::observer::ExchangeObserver;
use crate::strategy::Strategy;

pub const EXCHANGE_PATH: &str = "/server";
pub const HEALTH_PATH: &str = "/health";

/// Build the router for a handler
///
/// A panic anywhere in a handler becomes a 500 instead of a reset connection.
pub fn build_router<S: Strategy, O: ExchangeObserver>(handler: ExchangeHandler<S, O>) -> Router {
    Router::new()
        .route(EXCHANGE_PATH, post(handle_turn::<S, O>))
        .route(HEALTH_PATH, any(health))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(Arc::new(handler))
}
