//! Immutable battle data: the type chart plus the built-in species and move
//! tables the engine falls back to when the caller does not supply its own
//! combatant definitions.

pub mod moves;
pub mod species;
pub mod types;
