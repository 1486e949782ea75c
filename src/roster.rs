//! JSON roster files: two teams of combatants, each either a built-in
//! species reference or a fully spelled-out stat block and move list.

use crate::data::moves::{Condition, MoveCategory, StatusEffect};
use crate::data::types::Type;
use crate::sim::combatant::Combatant;
use crate::sim::moves::Move;
use crate::sim::stats::StatsSet;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

fn default_accuracy() -> u16 {
    100
}

fn default_level() -> u8 {
    50
}

fn default_chance() -> u8 {
    100
}

fn default_turns() -> u8 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusDef {
    pub condition: Condition,
    #[serde(default = "default_chance")]
    pub chance: u8,
    #[serde(default = "default_turns")]
    pub turns: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineMove {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u16,
    #[serde(default = "default_accuracy")]
    pub accuracy: u16,
    #[serde(default)]
    pub pp: Option<u8>,
    #[serde(default)]
    pub effect: Option<StatusDef>,
}

/// A move entry is either the name of a built-in move or an inline
/// definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MoveDef {
    Named(String),
    Inline(InlineMove),
}

impl MoveDef {
    fn build(&self) -> anyhow::Result<Move> {
        let mv = match self {
            MoveDef::Named(name) => Move::builtin(name)?,
            MoveDef::Inline(def) => Move::new(
                def.name.clone(),
                def.move_type,
                def.category,
                def.power,
                def.accuracy,
                def.pp,
                def.effect.as_ref().map(|e| StatusEffect {
                    condition: e.condition,
                    chance: e.chance,
                    turns: e.turns,
                }),
            )?,
        };
        Ok(mv)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombatantDef {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Final stat block. When omitted, `name` must be a built-in species and
    /// stats are derived from its base values at `level`.
    #[serde(default)]
    pub stats: Option<StatsSet>,
    #[serde(default)]
    pub types: Vec<Type>,
    pub moves: Vec<MoveDef>,
}

impl CombatantDef {
    pub fn build(&self) -> anyhow::Result<Combatant> {
        let moves = self
            .moves
            .iter()
            .map(|def| def.build().map(Arc::new))
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("invalid move for combatant {:?}", self.name))?;
        let combatant = match &self.stats {
            Some(stats) => {
                Combatant::new(self.name.clone(), self.level, *stats, self.types.clone(), moves)?
            }
            None => {
                let data = crate::data::species::get_species(&self.name)
                    .ok_or_else(|| crate::error::EngineError::UnknownSpecies(self.name.clone()))?;
                Combatant::new(
                    data.name,
                    self.level,
                    StatsSet::from_base(&data.base, self.level),
                    data.types.to_vec(),
                    moves,
                )?
            }
        };
        Ok(combatant)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsFile {
    pub team_a: Vec<CombatantDef>,
    pub team_b: Vec<CombatantDef>,
}

fn build_team(defs: &[CombatantDef], label: &str) -> anyhow::Result<Vec<Combatant>> {
    defs.iter()
        .map(CombatantDef::build)
        .collect::<anyhow::Result<Vec<_>>>()
        .with_context(|| format!("invalid combatant in {label}"))
}

/// Parse a roster from in-memory JSON and validate every entry.
pub fn parse_teams(raw: &str) -> anyhow::Result<(Vec<Combatant>, Vec<Combatant>)> {
    let parsed: TeamsFile = serde_json::from_str(raw).context("failed to parse teams JSON")?;
    let team_a = build_team(&parsed.team_a, "teamA")?;
    let team_b = build_team(&parsed.team_b, "teamB")?;
    Ok((team_a, team_b))
}

/// Read and parse a roster file from disk.
pub fn load_teams(path: &Path) -> anyhow::Result<(Vec<Combatant>, Vec<Combatant>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read teams file at {}", path.display()))?;
    parse_teams(&raw).with_context(|| format!("in teams file {}", path.display()))
}
