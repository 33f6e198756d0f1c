//! Strategy trait

use turnpike_core::{Decision, DecisionResult, GameState};

/// Trait for implementing an agent's decision logic
///
/// Implement this trait to plug game logic into the exchange. `compute` is
/// called once per turn on the blocking thread pool, possibly from several
/// threads at once, so any internal state must be synchronized.
pub trait Strategy: Send + Sync + 'static {
    /// Choose an action for `player_name` given the current game state
    fn compute(&self, player_name: &str, game_state: &GameState) -> DecisionResult<Decision>;
}

impl<F> Strategy for F
where
    F: Fn(&str, &GameState) -> DecisionResult<Decision> + Send + Sync + 'static,
{
    fn compute(&self, player_name: &str, game_state: &GameState) -> DecisionResult<Decision> {
        self(player_name, game_state)
    }
}

/// Strategy that never acts
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleStrategy;

impl Strategy for IdleStrategy {
    fn compute(&self, _player_name: &str, _game_state: &GameState) -> DecisionResult<Decision> {
        Ok(Decision::none())
    }
}
