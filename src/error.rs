use crate::sim::battle::Side;
use thiserror::Error;

/// Errors the engine can surface to callers.
///
/// Game-logic outcomes (misses, immunities, failing to act) are never errors;
/// they appear in the event log. These variants cover malformed input,
/// rejected before any battle state is mutated, plus misuse of a finished
/// battle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid combatant '{name}': {reason}")]
    InvalidCombatant { name: String, reason: String },

    #[error("invalid move '{name}': {reason}")]
    InvalidMove { name: String, reason: String },

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("unknown move '{0}'")]
    UnknownMove(String),

    #[error("side {side} has no team members")]
    EmptyTeam { side: Side },

    #[error("side {side} selected move slot {slot}, but only {available} moves are known")]
    NoSuchMoveSlot {
        side: Side,
        slot: usize,
        available: usize,
    },

    #[error("side {side} selected '{name}', which has no PP remaining")]
    NoPpRemaining { side: Side, name: String },

    #[error("the battle is already over")]
    BattleOver,
}
