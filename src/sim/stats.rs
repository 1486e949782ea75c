use crate::data::species::BaseStats;
use serde::{Deserialize, Serialize};

/// A combatant's resolved stat block. `hp` is the maximum; the live value is
/// tracked on the combatant itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    /// Scale a species' base stats to a level using the classic formula
    /// (no EVs, IVs or natures).
    pub fn from_base(base: &BaseStats, level: u8) -> Self {
        Self {
            hp: calc_hp(base.hp, level),
            atk: calc_stat(base.atk, level),
            def: calc_stat(base.def, level),
            spa: calc_stat(base.spa, level),
            spd: calc_stat(base.spd, level),
            spe: calc_stat(base.spe, level),
        }
    }

    pub(crate) fn all_positive(&self) -> bool {
        self.hp >= 1
            && self.atk >= 1
            && self.def >= 1
            && self.spa >= 1
            && self.spd >= 1
            && self.spe >= 1
    }
}

pub fn calc_hp(base: u16, level: u8) -> u16 {
    // Widened so base * 2 * level cannot overflow at level 255.
    ((base as u32 * 2 * level as u32) / 100) as u16 + level as u16 + 10
}

pub fn calc_stat(base: u16, level: u8) -> u16 {
    (((base as u32 * 2 * level as u32) / 100) as u16 + 5).max(1)
}
