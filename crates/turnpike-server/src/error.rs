//! Error types for the exchange server
//!
//! [`ExchangeError`] covers every way a single `/server` request can fail and
//! converts into an HTTP response via its [`IntoResponse`] implementation.
//! [`StartError`] is the only error that reaches the process.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use turnpike_core::{DecisionError, DecodeError, EncodeError};

/// Failure of one turn exchange, tagged by phase
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Request body could not be read
    #[error("Receive error: {0}")]
    Receive(String),

    /// Body is not a valid turn
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Strategy did not produce a decision
    #[error("Decision error: {0}")]
    Decision(#[from] DecisionError),

    /// Decision could not be serialized
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ExchangeError {
    /// HTTP status reported to the engine for this failure
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Receive(_) => StatusCode::BAD_REQUEST,
            Self::Decode(_) | Self::Decision(_) | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Listener could not be started
#[derive(Debug, Error)]
pub enum StartError {
    /// Port in use, not permitted, or otherwise unbindable
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Socket bound but its address could not be read back
    #[error("Failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}
