use crate::data::moves::Condition;
use crate::data::species::get_species;
use crate::data::types::Type;
use crate::error::EngineError;
use crate::sim::moves::{Move, MoveSlot};
use crate::sim::stats::StatsSet;
use std::sync::Arc;

/// An active affliction with its remaining duration in turns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusCondition {
    pub condition: Condition,
    /// Always >= 1 while the condition is present; it is cleared when the
    /// end-of-turn decrement reaches 0.
    pub remaining_turns: u8,
}

/// A battle participant snapshot. Constructed once per battle entry;
/// `current_hp` and `status` are the only fields the engine mutates.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub name: String,
    pub level: u8,
    pub stats: StatsSet,
    pub current_hp: u16,
    pub types: Vec<Type>,
    pub moves: Vec<MoveSlot>,
    pub status: Option<StatusCondition>,
}

impl Combatant {
    /// Build a combatant from fully resolved parts, validating the
    /// construction invariants before anything enters a battle.
    pub fn new(
        name: impl Into<String>,
        level: u8,
        stats: StatsSet,
        types: Vec<Type>,
        moves: Vec<Arc<Move>>,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        let fail = |reason: &str| {
            Err(EngineError::InvalidCombatant {
                name: name.clone(),
                reason: reason.to_string(),
            })
        };
        if level == 0 {
            return fail("level must be at least 1");
        }
        if !stats.all_positive() {
            return fail("all stats must be positive");
        }
        if types.is_empty() || types.len() > 2 {
            return fail("a combatant has 1 or 2 types");
        }
        if types.len() == 2 && types[0] == types[1] {
            return fail("duplicate type tag");
        }
        if moves.is_empty() || moves.len() > 4 {
            return fail("a combatant knows 1 to 4 moves");
        }
        Ok(Self {
            name,
            level,
            current_hp: stats.hp,
            stats,
            types,
            moves: moves.into_iter().map(MoveSlot::new).collect(),
            status: None,
        })
    }

    /// Build a combatant from the built-in species and move tables.
    pub fn from_species(species: &str, level: u8, moves: &[&str]) -> Result<Self, EngineError> {
        let data =
            get_species(species).ok_or_else(|| EngineError::UnknownSpecies(species.to_string()))?;
        let resolved = moves
            .iter()
            .map(|name| Move::builtin(name).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            data.name,
            level,
            StatsSet::from_base(&data.base, level),
            data.types.to_vec(),
            resolved,
        )
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, clamping at 0.
    pub fn take_damage(&mut self, damage: u16) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    /// Restore HP, clamping at the maximum.
    pub fn heal(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.stats.hp);
    }

    pub fn has_type(&self, type_tag: Type) -> bool {
        self.types.contains(&type_tag)
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.status.map(|s| s.condition) == Some(condition)
    }

    /// Try to afflict this combatant. Fails (returns `false`) if a condition
    /// is already present (conditions never stack or overwrite) or if the
    /// combatant's typing is immune.
    pub fn apply_status(&mut self, condition: Condition, turns: u8) -> bool {
        if self.status.is_some() || turns == 0 {
            return false;
        }
        if self.is_status_immune(condition) {
            return false;
        }
        self.status = Some(StatusCondition {
            condition,
            remaining_turns: turns,
        });
        true
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    fn is_status_immune(&self, condition: Condition) -> bool {
        match condition {
            Condition::Burn => self.has_type(Type::Fire),
            Condition::Paralysis => self.has_type(Type::Electric),
            Condition::Poison => self.has_type(Type::Poison) || self.has_type(Type::Steel),
        }
    }

    /// Speed after status penalties. Re-derived every turn by the turn-order
    /// logic; paralysis halves speed when the rule is enabled.
    pub fn effective_speed(&self, paralysis_halves_speed: bool) -> u16 {
        let mut spe = self.stats.spe;
        if paralysis_halves_speed && self.has_condition(Condition::Paralysis) {
            spe /= 2;
        }
        spe
    }
}
