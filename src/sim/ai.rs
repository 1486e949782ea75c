use crate::sim::battle::{Action, BattleState, Side};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Action selector for auto-resolved battles. `legal` holds the usable move
/// slots for `side` this turn and is never empty when this is called.
pub trait BattlePolicy {
    fn choose_action(&mut self, state: &BattleState, side: Side, legal: &[Action]) -> Action;
}

/// Always picks the lowest usable move slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstUsableMove;

impl BattlePolicy for FirstUsableMove {
    fn choose_action(&mut self, _state: &BattleState, _side: Side, legal: &[Action]) -> Action {
        *legal.first().unwrap_or(&Action::Move(0))
    }
}

/// Picks uniformly among the legal actions, with its own seeded stream so
/// policy choices never perturb the engine's randomness.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattlePolicy for RandomPolicy {
    fn choose_action(&mut self, _state: &BattleState, _side: Side, legal: &[Action]) -> Action {
        *legal.choose(&mut self.rng).unwrap_or(&Action::Move(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::battle::{legal_actions, BattleState};
    use crate::sim::combatant::Combatant;

    fn state() -> BattleState {
        BattleState::new(
            Combatant::from_species("pikachu", 50, &["thundershock", "tackle"]).unwrap(),
            Combatant::from_species("squirtle", 50, &["watergun"]).unwrap(),
        )
    }

    #[test]
    fn first_usable_move_prefers_the_lowest_slot() {
        let state = state();
        let legal = legal_actions(&state, Side::A);
        let mut policy = FirstUsableMove;
        assert_eq!(policy.choose_action(&state, Side::A, &legal), Action::Move(0));
    }

    #[test]
    fn random_policy_is_deterministic_per_seed() {
        let state = state();
        let legal = legal_actions(&state, Side::A);
        let picks: Vec<Action> = (0..10)
            .map(|_| RandomPolicy::new(42).choose_action(&state, Side::A, &legal))
            .collect();
        assert!(picks.windows(2).all(|w| w[0] == w[1]));
    }
}
