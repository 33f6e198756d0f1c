//! Turn exchange handler
//!
//! One exchange runs these phases in order, stopping at the first failure:
//! receive the body, decode a [`Turn`], run `on_receive`, ask the
//! [`Strategy`], encode the [`Decision`], write it with an exact
//! `Content-Length`, then run `on_send` once the body has been handed off.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use http_body::{Frame, SizeHint};
use tokio::task::JoinError;
use tracing::{debug, info, warn};
use turnpike_core::{Decision, DecisionError, DecisionResult, Turn, decode_turn, encode_decision};

use crate::error::ExchangeError;
use crate::observer::{ExchangeObserver, NoopObserver, dispatch_send, notify_receive, panic_message};
use crate::strategy::Strategy;

/// Largest turn body accepted by default (64MB)
pub const DEFAULT_MAX_TURN_BYTES: usize = 64 * 1024 * 1024;

/// Content type of encoded decisions
pub const DECISION_CONTENT_TYPE: &str = "application/octet-stream";

/// Runs the receive-decide-respond cycle for `/server`
///
/// Holds no per-request state; concurrent exchanges share only the strategy
/// and observer.
pub struct ExchangeHandler<S: Strategy, O: ExchangeObserver = NoopObserver> {
    strategy: Arc<S>,
    observer: Arc<O>,
    max_turn_bytes: usize,
}

impl<S: Strategy> ExchangeHandler<S> {
    /// Create a handler with no observer
    pub fn new(strategy: S) -> Self {
        Self {
            strategy: Arc::new(strategy),
            observer: Arc::new(NoopObserver),
            max_turn_bytes: DEFAULT_MAX_TURN_BYTES,
        }
    }
}

impl<S: Strategy, O: ExchangeObserver> ExchangeHandler<S, O> {
    /// Replace the observer
    pub fn with_observer<P: ExchangeObserver>(self, observer: P) -> ExchangeHandler<S, P> {
        ExchangeHandler {
            strategy: self.strategy,
            observer: Arc::new(observer),
            max_turn_bytes: self.max_turn_bytes,
        }
    }

    /// Cap the request body size
    pub fn with_max_turn_bytes(mut self, max_turn_bytes: usize) -> Self {
        self.max_turn_bytes = max_turn_bytes;
        self
    }

    /// Run one exchange over a raw request body
    pub async fn exchange(&self, body: Body) -> Result<Response, ExchangeError> {
        let bytes = axum::body::to_bytes(body, self.max_turn_bytes)
            .await
            .map_err(|e| ExchangeError::Receive(e.to_string()))?;
        debug!("Turn body: {} bytes", bytes.len());

        let turn = decode_turn(&bytes)?;
        info!("Received turn for player {}", turn.player_name);
        if let Some(tick) = turn.game_state.tick() {
            debug!("Turn tick {}", tick);
        }
        notify_receive(self.observer.as_ref(), &turn);

        let decision = self.decide(turn).await?;

        let encoded = encode_decision(&decision)?;
        Ok(self.respond(decision, encoded))
    }

    /// Run the strategy on the blocking pool
    async fn decide(&self, turn: Turn) -> DecisionResult<Decision> {
        let strategy = Arc::clone(&self.strategy);
        tokio::task::spawn_blocking(move || strategy.compute(&turn.player_name, &turn.game_state))
            .await
            .map_err(|e| DecisionError::Panicked(join_error_message(e)))?
    }

    fn respond(&self, decision: Decision, encoded: Vec<u8>) -> Response {
        let len = encoded.len();
        let body = DecisionBody {
            data: Some(Bytes::from(encoded)),
            sent: Some((decision, Arc::clone(&self.observer))),
        };

        let mut response = Response::new(Body::new(body));
        *response.status_mut() = StatusCode::OK;
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(DECISION_CONTENT_TYPE),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        response
    }
}

/// Axum handler for `POST /server`
pub async fn handle_turn<S: Strategy, O: ExchangeObserver>(
    State(handler): State<Arc<ExchangeHandler<S, O>>>,
    body: Body,
) -> Response {
    match handler.exchange(body).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Turn exchange failed: {}", e);
            e.into_response()
        }
    }
}

fn join_error_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(err) => err.to_string(),
    }
}

/// Single-frame response body that reports the decision as sent once the
/// frame has been taken by the connection
///
/// The exact size hint keeps the response on fixed-length framing.
struct DecisionBody<O: ExchangeObserver> {
    data: Option<Bytes>,
    sent: Option<(Decision, Arc<O>)>,
}

impl<O: ExchangeObserver> DecisionBody<O> {
    fn finish(&mut self) {
        if let Some((decision, observer)) = self.sent.take() {
            dispatch_send(observer, decision);
        }
    }
}

impl<O: ExchangeObserver> http_body::Body for DecisionBody<O> {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        match this.data.take() {
            Some(data) => Poll::Ready(Some(Ok(Frame::data(data)))),
            None => {
                this.finish();
                Poll::Ready(None)
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        let remaining = self.data.as_ref().map_or(0, |data| data.len() as u64);
        SizeHint::with_exact(remaining)
    }
}

impl<O: ExchangeObserver> Drop for DecisionBody<O> {
    fn drop(&mut self) {
        // The connection may stop polling once the last byte is out;
        // a body dropped before its frame was taken was never sent.
        if self.data.is_none() {
            self.finish();
        } else if let Some((decision, _)) = self.sent.take() {
            warn!(
                "Discarded {:?} decision: connection closed before it was written",
                decision.decision_type
            );
        }
    }
}
