//! High-level battle engine wrapper for step-based and auto-resolved battles.

use crate::battle_log::{BattleEvent, BattleLog};
use crate::error::EngineError;
use crate::sim::ai::BattlePolicy;
use crate::sim::battle::{
    self, battle_outcome, legal_actions, Action, BattleRules, BattleState, Outcome, Side,
};
use crate::sim::combatant::Combatant;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Result of a single engine step: the events this turn appended to the log,
/// and the terminal outcome if the battle ended.
#[derive(Clone, Debug)]
pub struct TurnResult {
    pub events: Vec<BattleEvent>,
    pub outcome: Option<Outcome>,
}

/// Step-based battle engine. Owns the state, the rule set and the random
/// stream; a given seed and action sequence always replays the same battle.
pub struct BattleEngine<R: Rng = SmallRng> {
    state: BattleState,
    rules: BattleRules,
    rng: R,
    outcome: Option<Outcome>,
}

impl BattleEngine<SmallRng> {
    /// Create an engine from two teams with the default rules and a seeded
    /// random stream. Each side's first living member starts active.
    pub fn from_seed(
        team_a: Vec<Combatant>,
        team_b: Vec<Combatant>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(
            team_a,
            team_b,
            BattleRules::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> BattleEngine<R> {
    /// Create an engine with explicit rules and an externally built random
    /// source.
    pub fn with_rng(
        team_a: Vec<Combatant>,
        team_b: Vec<Combatant>,
        rules: BattleRules,
        rng: R,
    ) -> Result<Self, EngineError> {
        let (active_a, bench_a) = split_lead(team_a, Side::A)?;
        let (active_b, bench_b) = split_lead(team_b, Side::B)?;
        Ok(Self {
            state: BattleState::new_with_bench(active_a, active_b, bench_a, bench_b),
            rules,
            rng,
            outcome: None,
        })
    }

    /// Advance the battle by one turn using the provided actions.
    ///
    /// Both actions are validated before any state changes; an invalid action
    /// leaves the battle untouched. Calling this after the battle has ended
    /// is an error.
    pub fn resolve_turn(
        &mut self,
        action_a: Action,
        action_b: Action,
    ) -> Result<TurnResult, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::BattleOver);
        }
        let start = self.state.log.len();
        let outcome =
            battle::resolve_turn(&mut self.state, &self.rules, action_a, action_b, &mut self.rng)?;
        self.outcome = outcome;
        Ok(TurnResult {
            events: self.state.log.since(start).to_vec(),
            outcome,
        })
    }

    /// Play the battle out to its end, asking each policy for an action every
    /// turn. Ends as [`Outcome::Exhausted`] when the turn cap is reached or
    /// when a side has no usable move left.
    pub fn resolve_battle(
        &mut self,
        policy_a: &mut dyn BattlePolicy,
        policy_b: &mut dyn BattlePolicy,
    ) -> Result<Outcome, EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::BattleOver);
        }
        // A side may already be out of combatants at call time.
        if let Some(outcome) = battle_outcome(&self.state) {
            self.finish(outcome);
            return Ok(outcome);
        }
        loop {
            if self.state.turn >= self.rules.turn_limit {
                self.finish(Outcome::Exhausted);
                return Ok(Outcome::Exhausted);
            }
            let legal_a = legal_actions(&self.state, Side::A);
            let legal_b = legal_actions(&self.state, Side::B);
            if legal_a.is_empty() || legal_b.is_empty() {
                self.finish(Outcome::Exhausted);
                return Ok(Outcome::Exhausted);
            }
            let action_a = policy_a.choose_action(&self.state, Side::A, &legal_a);
            let action_b = policy_b.choose_action(&self.state, Side::B, &legal_b);
            let outcome =
                battle::resolve_turn(&mut self.state, &self.rules, action_a, action_b, &mut self.rng)?;
            if let Some(outcome) = outcome {
                self.outcome = Some(outcome);
                return Ok(outcome);
            }
        }
    }

    /// Move slots the side can legally select this turn.
    pub fn legal_actions(&self, side: Side) -> Vec<Action> {
        legal_actions(&self.state, side)
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn log(&self) -> &BattleLog {
        &self.state.log
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.log.push(BattleEvent::BattleEnded { outcome });
        self.outcome = Some(outcome);
    }
}

/// Split a team into its lead (the first living member, or the first member
/// if none live) and the bench, preserving team order.
fn split_lead(mut team: Vec<Combatant>, side: Side) -> Result<(Combatant, Vec<Combatant>), EngineError> {
    if team.is_empty() {
        return Err(EngineError::EmptyTeam { side });
    }
    let lead = team.iter().position(|c| !c.is_fainted()).unwrap_or(0);
    let active = team.remove(lead);
    Ok((active, team))
}
