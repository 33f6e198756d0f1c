//! Wire codec for engine <-> agent messages
//!
//! Messages are serialized using MessagePack with named fields, so either
//! side can add optional fields without breaking the other.

use crate::decision::Decision;
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::turn::Turn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Decode a turn sent by the engine
pub fn decode_turn(bytes: &[u8]) -> DecodeResult<Turn> {
    decode(bytes)
}

/// Encode a decision for the engine
pub fn encode_decision(decision: &Decision) -> EncodeResult<Vec<u8>> {
    encode(decision)
}

/// Encode a turn (engine side)
pub fn encode_turn(turn: &Turn) -> EncodeResult<Vec<u8>> {
    encode(turn)
}

/// Decode a decision (engine side)
pub fn decode_decision(bytes: &[u8]) -> DecodeResult<Decision> {
    decode(bytes)
}

fn encode<T: Serialize>(msg: &T) -> EncodeResult<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(msg)?)
}

/// Decode exactly one message; the whole buffer must be consumed
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> DecodeResult<T> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut rest = bytes;
    let mut de = rmp_serde::Deserializer::new(&mut rest);
    let msg: T = Deserialize::deserialize(&mut de)?;

    if !rest.is_empty() {
        return Err(DecodeError::TrailingBytes(rest.len()));
    }

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Position;
    use crate::turn::GameState;

    fn sample_turn() -> Turn {
        Turn::new(
            "alice",
            GameState::new(serde_json::json!({
                "tick": 17,
                "boards": { "pvp": { "width": 8, "height": 8 } },
                "players": ["alice", "bob"],
                "fog": 0.25
            })),
        )
    }

    #[test]
    fn test_turn_survives_the_wire() {
        let turn = sample_turn();
        let bytes = encode_turn(&turn).unwrap();
        let decoded = decode_turn(&bytes).unwrap();

        assert_eq!(decoded, turn);
        assert_eq!(decoded.game_state.tick(), Some(17));
    }

    #[test]
    fn test_decision_survives_the_wire() {
        let decision = Decision::attack(Position::new(1, -2, "pvp"));
        let bytes = encode_decision(&decision).unwrap();
        assert_eq!(decode_decision(&bytes).unwrap(), decision);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(decode_turn(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decode_turn(b"not a turn");
        assert!(matches!(result, Err(DecodeError::Malformed(_))), "{:?}", result);

        // 0xc1 is never used by MessagePack
        assert!(matches!(decode_turn(&[0xc1]), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_truncated_turn_rejected() {
        let bytes = encode_turn(&sample_turn()).unwrap();
        let cut = &bytes[..bytes.len() / 2];
        assert!(matches!(decode_turn(cut), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_turn(&sample_turn()).unwrap();
        bytes.extend_from_slice(&[0x00, 0x01]);

        match decode_turn(&bytes) {
            Err(DecodeError::TrailingBytes(n)) => assert_eq!(n, 2),
            other => panic!("Expected TrailingBytes, got {:?}", other),
        }
    }

    #[test]
    fn test_decision_is_not_a_turn() {
        let bytes = encode_decision(&Decision::none()).unwrap();
        assert!(decode_turn(&bytes).is_err());
    }
}
