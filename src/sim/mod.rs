pub mod ai;
pub mod battle;
pub mod combatant;
pub mod damage;
pub mod moves;
pub mod stats;

pub use ai::{BattlePolicy, FirstUsableMove, RandomPolicy};
pub use battle::{Action, BattleRules, BattleState, Outcome, Side};
pub use combatant::{Combatant, StatusCondition};
pub use damage::DamageRoll;
pub use moves::{Move, MoveSlot};
pub use stats::StatsSet;
