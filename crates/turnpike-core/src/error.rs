//! Error types for each phase of a turn exchange

use thiserror::Error;

/// Result of decoding a turn from the wire
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result of asking a strategy for a decision
pub type DecisionResult<T> = std::result::Result<T, DecisionError>;

/// Result of encoding a decision for the wire
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Request body could not be turned into a message
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing was sent
    #[error("Empty message")]
    Empty,

    /// Bytes are not a valid message
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// A complete message was followed by extra bytes
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}

impl From<rmp_serde::decode::Error> for DecodeError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// Strategy failed to produce a decision
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Strategy rejected the game state
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Strategy failed for its own reasons
    #[error("Strategy failed: {0}")]
    Failed(String),

    /// Strategy panicked while computing
    #[error("Strategy panicked: {0}")]
    Panicked(String),
}

/// Decision could not be serialized
#[derive(Debug, Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(pub String);

impl From<rmp_serde::encode::Error> for EncodeError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        EncodeError(err.to_string())
    }
}

/// Observer hook failed
#[derive(Debug, Error)]
#[error("Hook error: {0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        HookError(message.into())
    }
}
