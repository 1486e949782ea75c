use crate::data::moves::Condition;
use crate::sim::battle::{Outcome, Side};
use serde::Serialize;
use serde_json::json;

/// One discrete thing that happened during resolution. Presentation layers
/// replay these in order to animate a turn; every sub-step of a turn emits
/// exactly one event.
///
/// `side` always names the combatant the event is about: the actor for
/// `MoveUsed`/`Missed`/`FullyParalyzed`/`Fled`, the target for damage and
/// status events.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    TurnStarted {
        turn: u32,
    },
    MoveUsed {
        side: Side,
        user: String,
        move_name: String,
    },
    /// A paralyzed combatant lost its action for the turn. Distinct from a
    /// miss: no accuracy roll happened.
    FullyParalyzed {
        side: Side,
        name: String,
    },
    Missed {
        side: Side,
        move_name: String,
    },
    /// The move connected but the target's typing is immune.
    NoEffect {
        side: Side,
        target: String,
    },
    DamageDealt {
        side: Side,
        target: String,
        amount: u16,
        remaining_hp: u16,
        critical: bool,
        stab: bool,
        type_multiplier: f32,
    },
    StatusApplied {
        side: Side,
        target: String,
        condition: Condition,
        turns: u8,
    },
    /// End-of-turn chip damage from poison or burn.
    StatusTicked {
        side: Side,
        target: String,
        condition: Condition,
        damage: u16,
        remaining_hp: u16,
    },
    StatusCleared {
        side: Side,
        target: String,
        condition: Condition,
    },
    Fainted {
        side: Side,
        name: String,
    },
    SwitchedIn {
        side: Side,
        name: String,
        remaining_hp: u16,
        max_hp: u16,
    },
    Fled {
        side: Side,
    },
    BattleEnded {
        outcome: Outcome,
    },
}

/// Append-only record of everything that happened in a battle.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events appended at or after `start`; used to slice out a single turn.
    pub fn since(&self, start: usize) -> &[BattleEvent] {
        &self.events[start.min(self.events.len())..]
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "events": self.events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_serializes_with_event_tags() {
        let mut log = BattleLog::new();
        log.push(BattleEvent::TurnStarted { turn: 1 });
        log.push(BattleEvent::Fled { side: Side::B });
        let value = log.to_json();
        let events = value["events"].as_array().expect("array");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "turn_started");
        assert_eq!(events[1]["side"], "b");
    }

    #[test]
    fn since_slices_out_a_suffix() {
        let mut log = BattleLog::new();
        log.push(BattleEvent::TurnStarted { turn: 1 });
        log.push(BattleEvent::TurnStarted { turn: 2 });
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(99).is_empty());
    }
}
