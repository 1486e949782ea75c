use crate::data::moves::normalize_id;
use crate::data::types::Type;
use phf::phf_map;

/// Base stat block of a species, before level scaling.
#[derive(Clone, Copy, Debug)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

/// A built-in species record: base stats plus 1-2 types.
#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub base: BaseStats,
    pub types: &'static [Type],
}

/// Hard-coded fallback species table, keyed by normalized id.
static DEX: phf::Map<&'static str, SpeciesData> = phf_map! {
    "pikachu" => SpeciesData {
        name: "Pikachu",
        base: BaseStats { hp: 35, atk: 55, def: 40, spa: 50, spd: 50, spe: 90 },
        types: &[Type::Electric],
    },
    "charmander" => SpeciesData {
        name: "Charmander",
        base: BaseStats { hp: 39, atk: 52, def: 43, spa: 60, spd: 50, spe: 65 },
        types: &[Type::Fire],
    },
    "charizard" => SpeciesData {
        name: "Charizard",
        base: BaseStats { hp: 78, atk: 84, def: 78, spa: 109, spd: 85, spe: 100 },
        types: &[Type::Fire, Type::Flying],
    },
    "squirtle" => SpeciesData {
        name: "Squirtle",
        base: BaseStats { hp: 44, atk: 48, def: 65, spa: 50, spd: 64, spe: 43 },
        types: &[Type::Water],
    },
    "blastoise" => SpeciesData {
        name: "Blastoise",
        base: BaseStats { hp: 79, atk: 83, def: 100, spa: 85, spd: 105, spe: 78 },
        types: &[Type::Water],
    },
    "bulbasaur" => SpeciesData {
        name: "Bulbasaur",
        base: BaseStats { hp: 45, atk: 49, def: 49, spa: 65, spd: 65, spe: 45 },
        types: &[Type::Grass, Type::Poison],
    },
    "venusaur" => SpeciesData {
        name: "Venusaur",
        base: BaseStats { hp: 80, atk: 82, def: 83, spa: 100, spd: 100, spe: 80 },
        types: &[Type::Grass, Type::Poison],
    },
    "geodude" => SpeciesData {
        name: "Geodude",
        base: BaseStats { hp: 40, atk: 80, def: 100, spa: 30, spd: 30, spe: 20 },
        types: &[Type::Rock, Type::Ground],
    },
    "onix" => SpeciesData {
        name: "Onix",
        base: BaseStats { hp: 35, atk: 45, def: 160, spa: 30, spd: 45, spe: 70 },
        types: &[Type::Rock, Type::Ground],
    },
    "pidgey" => SpeciesData {
        name: "Pidgey",
        base: BaseStats { hp: 40, atk: 45, def: 40, spa: 35, spd: 35, spe: 56 },
        types: &[Type::Normal, Type::Flying],
    },
    "gyarados" => SpeciesData {
        name: "Gyarados",
        base: BaseStats { hp: 95, atk: 125, def: 79, spa: 60, spd: 100, spe: 81 },
        types: &[Type::Water, Type::Flying],
    },
    "gengar" => SpeciesData {
        name: "Gengar",
        base: BaseStats { hp: 60, atk: 65, def: 60, spa: 130, spd: 75, spe: 110 },
        types: &[Type::Ghost, Type::Poison],
    },
    "snorlax" => SpeciesData {
        name: "Snorlax",
        base: BaseStats { hp: 160, atk: 110, def: 65, spa: 65, spd: 110, spe: 30 },
        types: &[Type::Normal],
    },
    "rattata" => SpeciesData {
        name: "Rattata",
        base: BaseStats { hp: 30, atk: 56, def: 35, spa: 25, spd: 35, spe: 72 },
        types: &[Type::Normal],
    },
};

/// Look up a built-in species by name, ignoring case and punctuation.
pub fn get_species(name: &str) -> Option<&'static SpeciesData> {
    DEX.get(normalize_id(name).as_str())
}
