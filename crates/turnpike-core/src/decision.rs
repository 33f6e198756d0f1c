//! Decision types

use serde::{Deserialize, Serialize};

/// Kind of action the agent takes on its turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionType {
    /// Do nothing this turn
    #[default]
    None,
    /// Walk towards a position
    Move,
    /// Attack whatever stands on a position
    Attack,
    /// Equip an inventory item
    Equip,
    /// Pick up an item lying on the current tile
    Pickup,
    /// Drop an inventory item
    Drop,
}

/// Tile on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub board_id: String,
}

impl Position {
    pub fn new(x: i32, y: i32, board_id: impl Into<String>) -> Self {
        Self {
            x,
            y,
            board_id: board_id.into(),
        }
    }
}

/// The agent's answer to a turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub decision_type: DecisionType,

    /// Target tile for `Move` and `Attack`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Position>,

    /// Inventory slot for `Equip`, `Pickup` and `Drop`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl Decision {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn move_to(position: Position) -> Self {
        Self::targeted(DecisionType::Move, position)
    }

    pub fn attack(position: Position) -> Self {
        Self::targeted(DecisionType::Attack, position)
    }

    pub fn equip(index: i32) -> Self {
        Self::indexed(DecisionType::Equip, index)
    }

    pub fn pickup(index: i32) -> Self {
        Self::indexed(DecisionType::Pickup, index)
    }

    pub fn drop_item(index: i32) -> Self {
        Self::indexed(DecisionType::Drop, index)
    }

    fn targeted(decision_type: DecisionType, position: Position) -> Self {
        Self {
            decision_type,
            target_position: Some(position),
            index: None,
        }
    }

    fn indexed(decision_type: DecisionType, index: i32) -> Self {
        Self {
            decision_type,
            target_position: None,
            index: Some(index),
        }
    }
}
