use crate::data::types::Type;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accuracy values at or above this sentinel never roll an accuracy check.
pub const ACCURACY_NEVER_MISS: u16 = 999;

/// Which stat pair a damaging move is resolved against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Persistent afflictions a move can inflict.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Paralysis,
    Poison,
    Burn,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::Paralysis => "paralysis",
            Condition::Poison => "poison",
            Condition::Burn => "burn",
        };
        f.write_str(name)
    }
}

/// Status infliction rider on a move: rolled independently after a successful
/// hit (or as the whole effect of a status-category move).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub condition: Condition,
    /// Probability of infliction in percent, 1..=100.
    pub chance: u8,
    /// Turns the condition lasts once applied, >= 1.
    pub turns: u8,
}

/// A built-in move definition. The runtime [`Move`](crate::sim::moves::Move)
/// value type is constructed from these (or from roster files) and validated
/// on the way in.
#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub move_type: Type,
    pub category: MoveCategory,
    pub power: u16,
    pub accuracy: u16,
    pub pp: u8,
    pub effect: Option<StatusEffect>,
}

/// Hard-coded fallback move table, keyed by normalized id.
static MOVEDEX: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => MoveData {
        name: "Tackle",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: 100,
        pp: 35,
        effect: None,
    },
    "scratch" => MoveData {
        name: "Scratch",
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: 100,
        pp: 35,
        effect: None,
    },
    "swift" => MoveData {
        name: "Swift",
        move_type: Type::Normal,
        category: MoveCategory::Special,
        power: 60,
        accuracy: ACCURACY_NEVER_MISS,
        pp: 20,
        effect: None,
    },
    "ember" => MoveData {
        name: "Ember",
        move_type: Type::Fire,
        category: MoveCategory::Special,
        power: 40,
        accuracy: 100,
        pp: 25,
        effect: Some(StatusEffect { condition: Condition::Burn, chance: 10, turns: 5 }),
    },
    "flamethrower" => MoveData {
        name: "Flamethrower",
        move_type: Type::Fire,
        category: MoveCategory::Special,
        power: 90,
        accuracy: 100,
        pp: 15,
        effect: Some(StatusEffect { condition: Condition::Burn, chance: 10, turns: 5 }),
    },
    "firepunch" => MoveData {
        name: "Fire Punch",
        move_type: Type::Fire,
        category: MoveCategory::Physical,
        power: 75,
        accuracy: 100,
        pp: 15,
        effect: Some(StatusEffect { condition: Condition::Burn, chance: 10, turns: 5 }),
    },
    "watergun" => MoveData {
        name: "Water Gun",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 40,
        accuracy: 100,
        pp: 25,
        effect: None,
    },
    "surf" => MoveData {
        name: "Surf",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 90,
        accuracy: 100,
        pp: 15,
        effect: None,
    },
    "hydropump" => MoveData {
        name: "Hydro Pump",
        move_type: Type::Water,
        category: MoveCategory::Special,
        power: 110,
        accuracy: 80,
        pp: 5,
        effect: None,
    },
    "thundershock" => MoveData {
        name: "Thunder Shock",
        move_type: Type::Electric,
        category: MoveCategory::Special,
        power: 40,
        accuracy: 100,
        pp: 30,
        effect: Some(StatusEffect { condition: Condition::Paralysis, chance: 10, turns: 4 }),
    },
    "thunderbolt" => MoveData {
        name: "Thunderbolt",
        move_type: Type::Electric,
        category: MoveCategory::Special,
        power: 90,
        accuracy: 100,
        pp: 15,
        effect: Some(StatusEffect { condition: Condition::Paralysis, chance: 10, turns: 4 }),
    },
    "thunderwave" => MoveData {
        name: "Thunder Wave",
        move_type: Type::Electric,
        category: MoveCategory::Status,
        power: 0,
        accuracy: 90,
        pp: 20,
        effect: Some(StatusEffect { condition: Condition::Paralysis, chance: 100, turns: 4 }),
    },
    "vinewhip" => MoveData {
        name: "Vine Whip",
        move_type: Type::Grass,
        category: MoveCategory::Physical,
        power: 45,
        accuracy: 100,
        pp: 25,
        effect: None,
    },
    "razorleaf" => MoveData {
        name: "Razor Leaf",
        move_type: Type::Grass,
        category: MoveCategory::Physical,
        power: 55,
        accuracy: 95,
        pp: 25,
        effect: None,
    },
    "poisonsting" => MoveData {
        name: "Poison Sting",
        move_type: Type::Poison,
        category: MoveCategory::Physical,
        power: 15,
        accuracy: 100,
        pp: 35,
        effect: Some(StatusEffect { condition: Condition::Poison, chance: 30, turns: 5 }),
    },
    "sludgebomb" => MoveData {
        name: "Sludge Bomb",
        move_type: Type::Poison,
        category: MoveCategory::Special,
        power: 90,
        accuracy: 100,
        pp: 10,
        effect: Some(StatusEffect { condition: Condition::Poison, chance: 30, turns: 5 }),
    },
    "poisonpowder" => MoveData {
        name: "Poison Powder",
        move_type: Type::Poison,
        category: MoveCategory::Status,
        power: 0,
        accuracy: 75,
        pp: 35,
        effect: Some(StatusEffect { condition: Condition::Poison, chance: 100, turns: 5 }),
    },
    "willowisp" => MoveData {
        name: "Will-O-Wisp",
        move_type: Type::Fire,
        category: MoveCategory::Status,
        power: 0,
        accuracy: 85,
        pp: 15,
        effect: Some(StatusEffect { condition: Condition::Burn, chance: 100, turns: 5 }),
    },
    "earthquake" => MoveData {
        name: "Earthquake",
        move_type: Type::Ground,
        category: MoveCategory::Physical,
        power: 100,
        accuracy: 100,
        pp: 10,
        effect: None,
    },
    "wingattack" => MoveData {
        name: "Wing Attack",
        move_type: Type::Flying,
        category: MoveCategory::Physical,
        power: 60,
        accuracy: 100,
        pp: 35,
        effect: None,
    },
    "aerialace" => MoveData {
        name: "Aerial Ace",
        move_type: Type::Flying,
        category: MoveCategory::Physical,
        power: 60,
        accuracy: ACCURACY_NEVER_MISS,
        pp: 20,
        effect: None,
    },
    "rockslide" => MoveData {
        name: "Rock Slide",
        move_type: Type::Rock,
        category: MoveCategory::Physical,
        power: 75,
        accuracy: 90,
        pp: 10,
        effect: None,
    },
};

/// Look up a built-in move. Lookup is case- and punctuation-insensitive
/// ("Thunder Wave", "thunderwave" and "THUNDERWAVE" all resolve).
pub fn get_move(name: &str) -> Option<&'static MoveData> {
    MOVEDEX.get(normalize_id(name).as_str())
}

pub(crate) fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
