//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use turnpike_core::{
    Decision, DecisionError, DecisionResult, GameState, HookError, Position, Turn, encode_turn,
};
use turnpike_server::{ExchangeObserver, Strategy};

/// Ordered record of what happened during exchanges
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Strategy that counts calls and moves the player onto a board named after them
#[derive(Clone, Default)]
pub struct SpyStrategy {
    pub calls: Arc<AtomicUsize>,
    pub log: EventLog,
}

impl SpyStrategy {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Strategy for SpyStrategy {
    fn compute(&self, player_name: &str, game_state: &GameState) -> DecisionResult<Decision> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("compute:{}", player_name));

        if player_name == "mallory" {
            return Err(DecisionError::Failed("refusing to play".into()));
        }
        if let Some(delay_ms) = game_state.as_value().get("think_ms").and_then(|v| v.as_u64()) {
            std::thread::sleep(std::time::Duration::from_millis(delay_ms));
        }

        let x = game_state.tick().unwrap_or(0) as i32;
        Ok(Decision::move_to(Position::new(x, 0, player_name)))
    }
}

/// Observer that records hook calls and signals each send
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub log: EventLog,
    pub sent: Arc<Notify>,
    pub fail_hooks: bool,
    pub panic_on_receive: bool,
    pub panic_on_send: bool,
}

impl ExchangeObserver for RecordingObserver {
    fn on_receive(&self, turn: &Turn) -> Result<(), HookError> {
        self.log.push(format!("receive:{}", turn.player_name));
        if self.panic_on_receive {
            panic!("receive hook blew up");
        }
        if self.fail_hooks {
            return Err(HookError::new("receive hook exploded"));
        }
        Ok(())
    }

    fn on_send(&self, decision: &Decision) -> Result<(), HookError> {
        let board = decision
            .target_position
            .as_ref()
            .map(|p| p.board_id.clone())
            .unwrap_or_default();
        self.log.push(format!("send:{}", board));
        self.sent.notify_one();
        if self.panic_on_send {
            panic!("send hook blew up");
        }
        if self.fail_hooks {
            return Err(HookError::new("send hook exploded"));
        }
        Ok(())
    }
}

pub fn turn_bytes(player: &str, state: serde_json::Value) -> Vec<u8> {
    encode_turn(&Turn::new(player, GameState::new(state))).unwrap()
}
