use crate::data::moves::{MoveCategory, MoveData, StatusEffect, ACCURACY_NEVER_MISS};
use crate::data::types::Type;
use crate::error::EngineError;
use std::sync::Arc;

/// A validated, immutable move definition. Combatants that know the same move
/// share one `Arc<Move>`; per-combatant mutable state (PP) lives on the
/// [`MoveSlot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    pub name: String,
    pub move_type: Type,
    pub category: MoveCategory,
    /// 0 for non-damaging moves.
    pub power: u16,
    /// 0..=100, or [`ACCURACY_NEVER_MISS`] and above to skip the roll.
    pub accuracy: u16,
    /// Usage limit; `None` means unlimited.
    pub pp: Option<u8>,
    pub effect: Option<StatusEffect>,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        move_type: Type,
        category: MoveCategory,
        power: u16,
        accuracy: u16,
        pp: Option<u8>,
        effect: Option<StatusEffect>,
    ) -> Result<Self, EngineError> {
        let mv = Self {
            name: name.into(),
            move_type,
            category,
            power,
            accuracy,
            pp,
            effect,
        };
        mv.validate()?;
        Ok(mv)
    }

    /// Look up a built-in move definition by name.
    pub fn builtin(name: &str) -> Result<Self, EngineError> {
        let data = crate::data::moves::get_move(name)
            .ok_or_else(|| EngineError::UnknownMove(name.to_string()))?;
        Ok(Self::from(data))
    }

    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status) && self.power > 0
    }

    pub fn never_misses(&self) -> bool {
        self.accuracy >= ACCURACY_NEVER_MISS
    }

    fn validate(&self) -> Result<(), EngineError> {
        let fail = |reason: &str| {
            Err(EngineError::InvalidMove {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };
        if self.name.is_empty() {
            return fail("empty name");
        }
        match self.category {
            MoveCategory::Status if self.power > 0 => {
                return fail("status moves must have power 0");
            }
            MoveCategory::Physical | MoveCategory::Special if self.power == 0 => {
                return fail("damaging category with power 0");
            }
            _ => {}
        }
        if self.accuracy > 100 && self.accuracy < ACCURACY_NEVER_MISS {
            return fail("accuracy must be 0..=100 or the never-miss sentinel");
        }
        if let Some(effect) = &self.effect {
            if effect.chance == 0 || effect.chance > 100 {
                return fail("status effect chance must be 1..=100");
            }
            if effect.turns == 0 {
                return fail("status effect must last at least one turn");
            }
        }
        if self.pp == Some(0) {
            return fail("pp, if limited, must start above 0");
        }
        Ok(())
    }
}

impl From<&'static MoveData> for Move {
    fn from(data: &'static MoveData) -> Self {
        // Table entries are checked by the data module's tests; no re-validation.
        Self {
            name: data.name.to_string(),
            move_type: data.move_type,
            category: data.category,
            power: data.power,
            accuracy: data.accuracy,
            pp: Some(data.pp),
            effect: data.effect,
        }
    }
}

/// One of a combatant's up-to-four known moves: a shared definition plus the
/// remaining PP for this combatant.
#[derive(Clone, Debug)]
pub struct MoveSlot {
    pub data: Arc<Move>,
    pub pp: Option<u8>,
}

impl MoveSlot {
    pub fn new(data: Arc<Move>) -> Self {
        let pp = data.pp;
        Self { data, pp }
    }

    pub fn usable(&self) -> bool {
        self.pp.map_or(true, |pp| pp > 0)
    }

    pub(crate) fn spend_pp(&mut self) {
        if let Some(pp) = self.pp.as_mut() {
            *pp = pp.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moves::Condition;

    #[test]
    fn powered_status_move_is_rejected() {
        let result = Move::new("Bad Wave", Type::Electric, MoveCategory::Status, 40, 100, None, None);
        assert!(matches!(result, Err(EngineError::InvalidMove { .. })));
    }

    #[test]
    fn powerless_attack_is_rejected() {
        let result = Move::new("Dud", Type::Normal, MoveCategory::Physical, 0, 100, None, None);
        assert!(matches!(result, Err(EngineError::InvalidMove { .. })));
    }

    #[test]
    fn accuracy_gap_between_100_and_sentinel_is_rejected() {
        let result = Move::new("Wonky", Type::Normal, MoveCategory::Physical, 40, 150, None, None);
        assert!(result.is_err());
        let sentinel = Move::new("Sure Hit", Type::Normal, MoveCategory::Physical, 40, 999, None, None)
            .expect("sentinel accuracy is legal");
        assert!(sentinel.never_misses());
    }

    #[test]
    fn zero_turn_status_effect_is_rejected() {
        let effect = StatusEffect {
            condition: Condition::Burn,
            chance: 100,
            turns: 0,
        };
        let result = Move::new("Flicker", Type::Fire, MoveCategory::Status, 0, 100, None, Some(effect));
        assert!(result.is_err());
    }

    #[test]
    fn move_slots_track_pp_independently_of_the_shared_definition() {
        let mv = Arc::new(Move::builtin("tackle").expect("builtin move"));
        let mut slot_a = MoveSlot::new(Arc::clone(&mv));
        let slot_b = MoveSlot::new(Arc::clone(&mv));
        slot_a.spend_pp();
        assert_eq!(slot_a.pp, Some(34));
        assert_eq!(slot_b.pp, Some(35));
        assert_eq!(mv.pp, Some(35));
    }

    #[test]
    fn unlimited_pp_slots_are_always_usable() {
        let mv = Arc::new(
            Move::new("Gnaw", Type::Normal, MoveCategory::Physical, 30, 100, None, None).unwrap(),
        );
        let mut slot = MoveSlot::new(mv);
        for _ in 0..1000 {
            slot.spend_pp();
        }
        assert!(slot.usable());
    }
}
