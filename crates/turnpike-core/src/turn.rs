//! Turn types

use serde::{Deserialize, Serialize};

/// Identifier of the player a turn is addressed to
pub type PlayerName = String;

/// One decision point sent by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Player the engine expects a decision for
    pub player_name: PlayerName,

    /// Snapshot of the game at this decision point
    pub game_state: GameState,
}

impl Turn {
    pub fn new(player_name: impl Into<PlayerName>, game_state: GameState) -> Self {
        Self {
            player_name: player_name.into(),
            game_state,
        }
    }
}

/// Game state snapshot (game-specific contents)
///
/// The exchange never looks inside; only the strategy interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState(pub serde_json::Value);

impl GameState {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Engine tick, if the snapshot carries a numeric `tick` field
    pub fn tick(&self) -> Option<u64> {
        self.0.get("tick").and_then(serde_json::Value::as_u64)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for GameState {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
