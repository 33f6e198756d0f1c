//! # turnpike-server
//!
//! HTTP endpoint that lets a game engine drive an agent one turn at a time.
//!
//! This crate provides:
//! - `Strategy` trait for plugging in decision logic
//! - `ExchangeObserver` hooks around each exchange
//! - The `/server` turn exchange and `/health` probe
//! - Listener startup and shutdown

pub mod error;
pub mod exchange;
pub mod health;
pub mod listener;
pub mod observer;
pub mod router;
pub mod strategy;

pub use error::{ExchangeError, StartError};
pub use exchange::ExchangeHandler;
pub use listener::{RunningServer, shutdown_signal};
pub use observer::{ExchangeObserver, NoopObserver};
pub use strategy::{IdleStrategy, Strategy};

use axum::Router;

/// Turn exchange server
pub struct TurnServer<S: Strategy, O: ExchangeObserver = NoopObserver> {
    /// Exchange handler serving `/server`
    handler: ExchangeHandler<S, O>,
}

impl<S: Strategy> TurnServer<S> {
    /// Create a new server around the given strategy
    pub fn new(strategy: S) -> Self {
        Self {
            handler: ExchangeHandler::new(strategy),
        }
    }
}

impl<S: Strategy, O: ExchangeObserver> TurnServer<S, O> {
    /// Attach receive/send hooks
    pub fn with_observer<P: ExchangeObserver>(self, observer: P) -> TurnServer<S, P> {
        TurnServer {
            handler: self.handler.with_observer(observer),
        }
    }

    /// Cap the size of an incoming turn
    pub fn max_turn_bytes(self, max_turn_bytes: usize) -> Self {
        Self {
            handler: self.handler.with_max_turn_bytes(max_turn_bytes),
        }
    }

    /// Build the router without binding, e.g. to drive it in-process
    pub fn into_router(self) -> Router {
        router::build_router(self.handler)
    }

    /// Bind `port` on all interfaces and start serving in the background
    pub async fn start(self, port: u16) -> Result<RunningServer, StartError> {
        listener::start(port, self.into_router()).await
    }
}
