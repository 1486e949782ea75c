use crate::battle_log::{BattleEvent, BattleLog};
use crate::data::moves::Condition;
use crate::error::EngineError;
use crate::sim::combatant::Combatant;
use crate::sim::damage::roll_damage;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Chance that a paralyzed combatant loses its action for the turn.
pub const PARALYSIS_SKIP_CHANCE: f64 = 0.25;

/// Battle participant identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// What a side chose to do this turn. The engine substitutes fainted
/// combatants on its own; fleeing is only ever reported, never initiated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Move(usize),
    Flee,
}

/// Tunable rule set. The defaults follow the most explicit variant of the
/// source behavior; see DESIGN.md for the knobs.
#[derive(Clone, Copy, Debug)]
pub struct BattleRules {
    /// Burned attackers deal half physical damage.
    pub burn_weakens_physical: bool,
    /// Paralysis halves effective speed for turn ordering.
    pub paralysis_halves_speed: bool,
    /// Turn cap for full-battle resolution; exceeding it ends the battle as
    /// [`Outcome::Exhausted`].
    pub turn_limit: u32,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            burn_weakens_physical: true,
            paralysis_halves_speed: true,
            turn_limit: 500,
        }
    }
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    SideAWins,
    SideBWins,
    /// Both sides ran out of combatants in the same turn.
    Draw,
    /// The named side fled; the battle ends immediately.
    Fled(Side),
    /// The turn cap was reached, or neither side had a usable action left.
    Exhausted,
}

/// Live record of an in-progress battle: active combatant and bench per side,
/// the turn counter, and the append-only event log.
#[derive(Clone, Debug)]
pub struct BattleState {
    pub active_a: Combatant,
    pub active_b: Combatant,
    pub bench_a: Vec<Combatant>,
    pub bench_b: Vec<Combatant>,
    pub turn: u32,
    pub log: BattleLog,
}

impl BattleState {
    pub fn new(active_a: Combatant, active_b: Combatant) -> Self {
        Self::new_with_bench(active_a, active_b, Vec::new(), Vec::new())
    }

    pub fn new_with_bench(
        active_a: Combatant,
        active_b: Combatant,
        bench_a: Vec<Combatant>,
        bench_b: Vec<Combatant>,
    ) -> Self {
        Self {
            active_a,
            active_b,
            bench_a,
            bench_b,
            turn: 0,
            log: BattleLog::new(),
        }
    }

    pub fn active(&self, side: Side) -> &Combatant {
        match side {
            Side::A => &self.active_a,
            Side::B => &self.active_b,
        }
    }

    pub fn bench(&self, side: Side) -> &[Combatant] {
        match side {
            Side::A => &self.bench_a,
            Side::B => &self.bench_b,
        }
    }

    /// The side still has a combatant able to fight.
    pub fn side_has_available(&self, side: Side) -> bool {
        if !self.active(side).is_fainted() {
            return true;
        }
        self.bench(side).iter().any(|c| !c.is_fainted())
    }
}

/// Move slots the side can legally select this turn (slot exists and has PP).
/// `Action::Flee` is always legal and never listed.
pub fn legal_actions(state: &BattleState, side: Side) -> Vec<Action> {
    state
        .active(side)
        .moves
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| slot.usable().then_some(Action::Move(idx)))
        .collect()
}

/// Decide which side acts first this turn: strictly higher effective speed
/// wins, a tie is a fair coin flip. Re-derived every turn because status can
/// change effective speed.
pub fn determine_order(
    state: &BattleState,
    rules: &BattleRules,
    rng: &mut impl Rng,
) -> [Side; 2] {
    let spe_a = state.active_a.effective_speed(rules.paralysis_halves_speed);
    let spe_b = state.active_b.effective_speed(rules.paralysis_halves_speed);
    let a_first = if spe_a != spe_b {
        spe_a > spe_b
    } else {
        rng.gen_bool(0.5)
    };
    if a_first {
        [Side::A, Side::B]
    } else {
        [Side::B, Side::A]
    }
}

/// Resolve one full exchange. Both actions are validated before anything is
/// mutated; after that, every sub-step appends one event to the state's log.
/// Returns the terminal outcome if this turn ended the battle.
pub fn resolve_turn(
    state: &mut BattleState,
    rules: &BattleRules,
    action_a: Action,
    action_b: Action,
    rng: &mut impl Rng,
) -> Result<Option<Outcome>, EngineError> {
    validate_action(state, Side::A, action_a)?;
    validate_action(state, Side::B, action_b)?;

    state.turn += 1;
    state.log.push(BattleEvent::TurnStarted { turn: state.turn });

    // A flee ends the encounter before any move resolves. If both sides
    // flee, side A's is processed first.
    for (side, action) in [(Side::A, action_a), (Side::B, action_b)] {
        if matches!(action, Action::Flee) {
            let outcome = Outcome::Fled(side);
            state.log.push(BattleEvent::Fled { side });
            state.log.push(BattleEvent::BattleEnded { outcome });
            return Ok(Some(outcome));
        }
    }

    for side in determine_order(state, rules, rng) {
        // The opponent may have acted first and knocked this side out.
        if state.active(side).is_fainted() {
            continue;
        }
        let action = match side {
            Side::A => action_a,
            Side::B => action_b,
        };
        if let Action::Move(slot) = action {
            execute_move(state, side, slot, rules, rng);
        }
    }

    tick_statuses(state);
    for side in [Side::A, Side::B] {
        if state.active(side).is_fainted() {
            send_next(state, side);
        }
    }

    let outcome = battle_outcome(state);
    if let Some(outcome) = outcome {
        state.log.push(BattleEvent::BattleEnded { outcome });
    }
    Ok(outcome)
}

pub(crate) fn battle_outcome(state: &BattleState) -> Option<Outcome> {
    let a_available = state.side_has_available(Side::A);
    let b_available = state.side_has_available(Side::B);
    match (a_available, b_available) {
        (false, false) => Some(Outcome::Draw),
        (false, true) => Some(Outcome::SideBWins),
        (true, false) => Some(Outcome::SideAWins),
        (true, true) => None,
    }
}

fn validate_action(state: &BattleState, side: Side, action: Action) -> Result<(), EngineError> {
    let Action::Move(slot) = action else {
        return Ok(());
    };
    let active = state.active(side);
    let Some(chosen) = active.moves.get(slot) else {
        return Err(EngineError::NoSuchMoveSlot {
            side,
            slot,
            available: active.moves.len(),
        });
    };
    if !chosen.usable() {
        return Err(EngineError::NoPpRemaining {
            side,
            name: chosen.data.name.clone(),
        });
    }
    Ok(())
}

fn execute_move(
    state: &mut BattleState,
    side: Side,
    slot: usize,
    rules: &BattleRules,
    rng: &mut impl Rng,
) {
    let BattleState {
        active_a,
        active_b,
        log,
        ..
    } = state;
    let (attacker, defender) = match side {
        Side::A => (active_a, active_b),
        Side::B => (active_b, active_a),
    };

    if attacker.has_condition(Condition::Paralysis) && rng.gen_bool(PARALYSIS_SKIP_CHANCE) {
        log.push(BattleEvent::FullyParalyzed {
            side,
            name: attacker.name.clone(),
        });
        return;
    }

    attacker.moves[slot].spend_pp();
    let mv = attacker.moves[slot].data.clone();
    log.push(BattleEvent::MoveUsed {
        side,
        user: attacker.name.clone(),
        move_name: mv.name.clone(),
    });

    if !mv.never_misses() {
        let draw: u16 = rng.gen_range(1..=100);
        if draw > mv.accuracy {
            log.push(BattleEvent::Missed {
                side,
                move_name: mv.name.clone(),
            });
            return;
        }
    }

    let target_side = side.opponent();
    if mv.is_damaging() {
        let roll = roll_damage(attacker, defender, &mv, rules, rng);
        if roll.type_multiplier == 0.0 {
            log.push(BattleEvent::NoEffect {
                side: target_side,
                target: defender.name.clone(),
            });
            return;
        }
        defender.take_damage(roll.amount);
        log.push(BattleEvent::DamageDealt {
            side: target_side,
            target: defender.name.clone(),
            amount: roll.amount,
            remaining_hp: defender.current_hp,
            critical: roll.critical,
            stab: roll.stab,
            type_multiplier: roll.type_multiplier,
        });
        if defender.is_fainted() {
            log.push(BattleEvent::Fainted {
                side: target_side,
                name: defender.name.clone(),
            });
            return;
        }
        if let Some(effect) = mv.effect {
            // Rolled independently of the damage randomness; only lands if
            // the target carries no condition already.
            if rng.gen_bool(f64::from(effect.chance) / 100.0)
                && defender.apply_status(effect.condition, effect.turns)
            {
                log.push(BattleEvent::StatusApplied {
                    side: target_side,
                    target: defender.name.clone(),
                    condition: effect.condition,
                    turns: effect.turns,
                });
            }
        }
    } else {
        let applied = mv.effect.is_some_and(|effect| {
            rng.gen_bool(f64::from(effect.chance) / 100.0)
                && defender.apply_status(effect.condition, effect.turns)
        });
        match (applied, mv.effect) {
            (true, Some(effect)) => log.push(BattleEvent::StatusApplied {
                side: target_side,
                target: defender.name.clone(),
                condition: effect.condition,
                turns: effect.turns,
            }),
            _ => log.push(BattleEvent::NoEffect {
                side: target_side,
                target: defender.name.clone(),
            }),
        }
    }
}

/// End-of-turn chip damage and duration bookkeeping for both survivors.
fn tick_statuses(state: &mut BattleState) {
    let BattleState {
        active_a,
        active_b,
        log,
        ..
    } = state;
    for (side, combatant) in [(Side::A, &mut *active_a), (Side::B, &mut *active_b)] {
        if combatant.is_fainted() {
            continue;
        }
        let Some(mut status) = combatant.status else {
            continue;
        };
        let chip = match status.condition {
            Condition::Poison => (combatant.stats.hp / 8).max(1),
            Condition::Burn => (combatant.stats.hp / 16).max(1),
            Condition::Paralysis => 0,
        };
        if chip > 0 {
            combatant.take_damage(chip);
            log.push(BattleEvent::StatusTicked {
                side,
                target: combatant.name.clone(),
                condition: status.condition,
                damage: chip,
                remaining_hp: combatant.current_hp,
            });
            if combatant.is_fainted() {
                log.push(BattleEvent::Fainted {
                    side,
                    name: combatant.name.clone(),
                });
                continue;
            }
        }
        status.remaining_turns -= 1;
        if status.remaining_turns == 0 {
            combatant.clear_status();
            log.push(BattleEvent::StatusCleared {
                side,
                target: combatant.name.clone(),
                condition: status.condition,
            });
        } else {
            combatant.status = Some(status);
        }
    }
}

/// Substitute the next living bench member for a fainted active combatant.
fn send_next(state: &mut BattleState, side: Side) -> bool {
    let BattleState {
        active_a,
        active_b,
        bench_a,
        bench_b,
        log,
        ..
    } = state;
    let (active, bench) = match side {
        Side::A => (active_a, bench_a),
        Side::B => (active_b, bench_b),
    };
    let Some(idx) = bench.iter().position(|c| !c.is_fainted()) else {
        return false;
    };
    std::mem::swap(active, &mut bench[idx]);
    log.push(BattleEvent::SwitchedIn {
        side,
        name: active.name.clone(),
        remaining_hp: active.current_hp,
        max_hp: active.stats.hp,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn duel(a: Combatant, b: Combatant) -> BattleState {
        BattleState::new(a, b)
    }

    fn mon(species: &str, moves: &[&str]) -> Combatant {
        Combatant::from_species(species, 50, moves).expect("valid species")
    }

    #[test]
    fn faster_side_always_acts_first() {
        // pikachu spe 95 vs snorlax spe 35 at level 50
        let state = duel(mon("pikachu", &["tackle"]), mon("snorlax", &["tackle"]));
        let rules = BattleRules::default();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert_eq!(determine_order(&state, &rules, &mut rng), [Side::A, Side::B]);
        }
    }

    #[test]
    fn speed_ties_flip_a_fair_coin() {
        let state = duel(mon("pikachu", &["tackle"]), mon("pikachu", &["tackle"]));
        let rules = BattleRules::default();
        let mut firsts = [0u32, 0u32];
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            match determine_order(&state, &rules, &mut rng) {
                [Side::A, _] => firsts[0] += 1,
                [Side::B, _] => firsts[1] += 1,
            }
        }
        assert!(firsts[0] > 50 && firsts[1] > 50, "{firsts:?}");
    }

    #[test]
    fn invalid_slot_is_rejected_before_any_mutation() {
        let mut state = duel(mon("pikachu", &["tackle"]), mon("rattata", &["tackle"]));
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let err = resolve_turn(&mut state, &rules, Action::Move(3), Action::Move(0), &mut rng);
        assert!(matches!(err, Err(EngineError::NoSuchMoveSlot { slot: 3, .. })));
        assert_eq!(state.turn, 0);
        assert!(state.log.is_empty());
        assert_eq!(state.active_b.current_hp, state.active_b.stats.hp);
    }

    #[test]
    fn exhausted_pp_is_rejected() {
        let mut a = mon("pikachu", &["hydropump"]); // 5 pp
        a.moves[0].pp = Some(0);
        let mut state = duel(a, mon("rattata", &["tackle"]));
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let err = resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng);
        assert!(matches!(err, Err(EngineError::NoPpRemaining { side: Side::A, .. })));
    }

    #[test]
    fn flee_ends_the_battle_before_moves_resolve() {
        let mut state = duel(mon("pikachu", &["thunderbolt"]), mon("rattata", &["tackle"]));
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let outcome = resolve_turn(&mut state, &rules, Action::Move(0), Action::Flee, &mut rng)
            .expect("valid actions");
        assert_eq!(outcome, Some(Outcome::Fled(Side::B)));
        assert_eq!(state.active_b.current_hp, state.active_b.stats.hp);
        assert!(state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Fled { side: Side::B })));
    }

    #[test]
    fn fainted_actor_loses_its_action() {
        // Gyarados outspeeds and one-shots Rattata before it can move.
        let a = Combatant::from_species("gyarados", 80, &["surf"]).unwrap();
        let b = Combatant::from_species("rattata", 5, &["tackle"]).unwrap();
        let mut state = duel(a, b);
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let outcome = resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng)
            .expect("valid actions");
        assert_eq!(outcome, Some(Outcome::SideAWins));
        // Rattata never got to use Tackle.
        assert!(!state.log.events().iter().any(
            |e| matches!(e, BattleEvent::MoveUsed { side: Side::B, .. })
        ));
        assert_eq!(state.active_a.current_hp, state.active_a.stats.hp);
    }

    #[test]
    fn poison_ticks_an_eighth_of_max_hp() {
        let mut b = mon("snorlax", &["tackle"]);
        assert!(b.apply_status(Condition::Poison, 5));
        let max_hp = b.stats.hp;
        let mut state = duel(mon("pikachu", &["swift"]), b);
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let hp_before_turn = state.active_b.current_hp;
        resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng)
            .expect("valid actions");
        let tick = state
            .log
            .events()
            .iter()
            .find_map(|e| match e {
                BattleEvent::StatusTicked { damage, condition, .. } => {
                    assert_eq!(*condition, Condition::Poison);
                    Some(*damage)
                }
                _ => None,
            })
            .expect("poison ticked");
        assert_eq!(tick, (max_hp / 8).max(1));
        assert!(state.active_b.current_hp < hp_before_turn);
    }

    #[test]
    fn status_duration_ticks_down_and_clears() {
        let mut b = mon("snorlax", &["tackle"]);
        assert!(b.apply_status(Condition::Paralysis, 2));
        let mut state = duel(mon("pikachu", &["swift"]), b);
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(11);
        resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng).unwrap();
        assert_eq!(state.active_b.status.unwrap().remaining_turns, 1);
        resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng).unwrap();
        assert!(state.active_b.status.is_none());
        assert!(state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::StatusCleared { .. })));
    }

    #[test]
    fn fainted_active_is_replaced_by_next_living_bench_member() {
        let lead = Combatant::from_species("rattata", 5, &["tackle"]).unwrap();
        let second = Combatant::from_species("pidgey", 40, &["wingattack"]).unwrap();
        let third = Combatant::from_species("geodude", 40, &["tackle"]).unwrap();
        let mut state = BattleState::new_with_bench(
            mon("charizard", &["flamethrower"]),
            lead,
            Vec::new(),
            vec![second, third],
        );
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let outcome =
            resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng).unwrap();
        assert_eq!(outcome, None, "bench members remain");
        assert_eq!(state.active_b.name, "Pidgey");
        assert!(state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::SwitchedIn { side: Side::B, .. })));
    }

    #[test]
    fn never_miss_moves_skip_the_accuracy_roll() {
        // Swift at the sentinel accuracy may never produce a Missed event.
        let mut state = duel(mon("pikachu", &["swift"]), mon("snorlax", &["tackle"]));
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..20 {
            if resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng)
                .unwrap()
                .is_some()
            {
                break;
            }
        }
        assert!(!state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Missed { side: Side::A, .. })));
    }

    #[test]
    fn ground_immunity_reports_no_effect_and_no_damage() {
        // Electric vs Geodude (rock/ground): immune.
        let mut state = duel(mon("pikachu", &["thunderbolt"]), mon("geodude", &["tackle"]));
        let rules = BattleRules::default();
        let mut rng = SmallRng::seed_from_u64(1);
        resolve_turn(&mut state, &rules, Action::Move(0), Action::Move(0), &mut rng).unwrap();
        assert!(state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::NoEffect { side: Side::B, .. })));
        assert!(!state.log.events().iter().any(|e| matches!(
            e,
            BattleEvent::DamageDealt { side: Side::B, .. }
        )));
    }

    #[test]
    fn legal_actions_lists_only_usable_slots() {
        let mut a = mon("pikachu", &["thunderbolt", "tackle"]);
        a.moves[0].pp = Some(0);
        let state = duel(a, mon("rattata", &["tackle"]));
        assert_eq!(legal_actions(&state, Side::A), vec![Action::Move(1)]);
    }
}
