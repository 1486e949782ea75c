//! Deterministic, seedable turn-based battle resolution.
//!
//! The main entry point for step-based battles is [`engine::BattleEngine`];
//! [`roster`] loads teams from JSON and [`sim::ai`] provides action policies
//! for auto-resolved battles.

pub mod battle_log;
pub mod data;
pub mod engine;
pub mod error;
pub mod roster;
pub mod sim;

pub use roster::{load_teams, parse_teams};

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle_log::{BattleEvent, BattleLog};
    pub use crate::data::moves::{Condition, MoveCategory, StatusEffect};
    pub use crate::data::types::Type;
    pub use crate::engine::{BattleEngine, TurnResult};
    pub use crate::error::EngineError;
    pub use crate::roster::{load_teams, parse_teams};
    pub use crate::sim::ai::{BattlePolicy, FirstUsableMove, RandomPolicy};
    pub use crate::sim::battle::{Action, BattleRules, BattleState, Outcome, Side};
    pub use crate::sim::combatant::Combatant;
    pub use crate::sim::moves::{Move, MoveSlot};
    pub use crate::sim::stats::StatsSet;
}
