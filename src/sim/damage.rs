use crate::data::moves::{Condition, MoveCategory};
use crate::data::types::combined_effectiveness;
use crate::sim::battle::BattleRules;
use crate::sim::combatant::Combatant;
use crate::sim::moves::Move;
use rand::Rng;

/// Probability of a critical hit (6.25%), drawn independently of every other
/// random factor.
pub const CRIT_CHANCE: f64 = 0.0625;

/// Lower bound of the uniform damage spread.
pub const MIN_RANDOM_FACTOR: f32 = 0.85;

/// Same-type attack bonus multiplier.
pub const STAB_MULTIPLIER: f32 = 1.5;

/// Outcome of one damage computation, with the factors that went into it so
/// the event log can report them.
#[derive(Clone, Copy, Debug)]
pub struct DamageRoll {
    pub amount: u16,
    pub critical: bool,
    pub stab: bool,
    pub type_multiplier: f32,
}

/// The closed-form damage formula with every random factor pinned by the
/// caller. A zero type multiplier is an immunity and deals 0; any other hit
/// deals at least 1.
pub fn damage_amount(
    level: u8,
    power: u16,
    attack: u16,
    defense: u16,
    random_factor: f32,
    stab: bool,
    type_multiplier: f32,
    critical: bool,
) -> u16 {
    if type_multiplier == 0.0 || power == 0 {
        return 0;
    }
    let level = level as f32;
    let defense = defense.max(1) as f32;
    let base = ((2.0 * level / 5.0 + 2.0) * power as f32 * attack as f32 / defense) / 50.0 + 2.0;
    let stab = if stab { STAB_MULTIPLIER } else { 1.0 };
    let critical = if critical { 2.0 } else { 1.0 };
    let total = base * random_factor * stab * type_multiplier * critical;
    (total.floor() as u16).max(1)
}

/// Roll a full damage computation for `mv` from `attacker` into `defender`,
/// drawing the damage spread and the critical check from the injected RNG.
pub fn roll_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    rules: &BattleRules,
    rng: &mut impl Rng,
) -> DamageRoll {
    let (attack, defense) = match mv.category {
        MoveCategory::Physical => (attacker.stats.atk, defender.stats.def),
        MoveCategory::Special => (attacker.stats.spa, defender.stats.spd),
        MoveCategory::Status => (0, 1),
    };
    let stab = attacker.has_type(mv.move_type);
    let type_multiplier = combined_effectiveness(mv.move_type, &defender.types);
    let random_factor = rng.gen_range(MIN_RANDOM_FACTOR..=1.0);
    let critical = rng.gen_bool(CRIT_CHANCE);
    let mut amount = damage_amount(
        attacker.level,
        mv.power,
        attack,
        defense,
        random_factor,
        stab,
        type_multiplier,
        critical,
    );
    // Burned attackers deal half physical damage, applied after the
    // floor/clamp. The rule is configurable; source variants disagree.
    if amount > 0
        && rules.burn_weakens_physical
        && matches!(mv.category, MoveCategory::Physical)
        && attacker.has_condition(Condition::Burn)
    {
        amount = (amount / 2).max(1);
    }
    DamageRoll {
        amount,
        critical,
        stab,
        type_multiplier,
    }
}
