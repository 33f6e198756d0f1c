//! # turnpike-core
//!
//! Core types for the turnpike turn exchange.
//!
//! This crate provides the foundational types shared by the server and by
//! anything speaking to it:
//! - Turn and game state payloads sent by the engine
//! - Decisions returned by the agent
//! - Error types for each phase of an exchange
//! - MessagePack wire codec

pub mod codec;
pub mod decision;
pub mod error;
pub mod turn;

pub use codec::{decode_decision, decode_turn, encode_decision, encode_turn};
pub use decision::{Decision, DecisionType, Position};
pub use error::{
    DecisionError, DecisionResult, DecodeError, DecodeResult, EncodeError, EncodeResult, HookError,
};
pub use turn::{GameState, PlayerName, Turn};
