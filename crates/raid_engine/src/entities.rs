//! Combatant blueprints.
//!
//! `RaiderConfig` is a builder for a raider or boss. Call `build()` with the
//! slot it will occupy to get a [`Raider`] ready for a [`RaidState`].
//!
//! [`RaidState`]: crate::state::RaidState

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{SpeciesCatalog, SpeciesData};
use crate::core_data::{StatId, StatTable};
use crate::error::Result;
use crate::natures::Nature;
use crate::rolls::CumulativeRolls;
use crate::state::{Raider, ShieldData};
use crate::types::Type;

/// Default IVs (perfect)
pub const DEFAULT_IVS: [u8; 6] = [31, 31, 31, 31, 31, 31];

/// Default EVs (none)
pub const DEFAULT_EVS: [u8; 6] = [0, 0, 0, 0, 0, 0];

/// Raids are fought at level 100.
pub const DEFAULT_LEVEL: u8 = 100;

const MAX_EV: u8 = 252;
const MAX_EV_TOTAL: u16 = 510;

/// Blueprint for a combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RaiderConfig {
    /// Species name, looked up in the species catalog
    pub species: String,

    /// Display role ("Raider 1", "Tera Raid Boss", ...)
    pub role: String,

    /// Level (1-100)
    pub level: u8,

    /// Individual Values [HP, Atk, Def, SpA, SpD, Spe] (0-31)
    pub ivs: [u8; 6],

    /// Effort Values [HP, Atk, Def, SpA, SpD, Spe]
    pub evs: [u8; 6],

    pub nature: Nature,

    /// Ability (if None, uses species' first ability)
    pub ability: Option<String>,

    pub item: Option<String>,
    pub moves: Vec<String>,

    /// Boss-only actions
    pub extra_moves: Vec<String>,

    pub tera_type: Option<Type>,

    /// Percent applied to the HP stat
    pub boss_multiplier: u16,

    pub shield: Option<ShieldData>,
}

impl Default for RaiderConfig {
    fn default() -> Self {
        Self {
            species: String::new(),
            role: String::new(),
            level: DEFAULT_LEVEL,
            ivs: DEFAULT_IVS,
            evs: DEFAULT_EVS,
            nature: Nature::default(),
            ability: None,
            item: None,
            moves: Vec::new(),
            extra_moves: Vec::new(),
            tera_type: None,
            boss_multiplier: 100,
            shield: None,
        }
    }
}

impl RaiderConfig {
    pub fn new(species: &str) -> Self {
        Self {
            species: species.to_string(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 100);
        self
    }

    pub fn ivs(mut self, ivs: [u8; 6]) -> Self {
        self.ivs = ivs.map(|v| v.min(31));
        self
    }

    /// Set EVs. Each is capped at 252 and the total at 510, filled in stat order.
    pub fn evs(mut self, evs: [u8; 6]) -> Self {
        self.evs = clamp_evs(evs);
        self
    }

    pub fn nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }

    pub fn ability(mut self, ability: &str) -> Self {
        self.ability = Some(ability.to_string());
        self
    }

    pub fn item(mut self, item: &str) -> Self {
        self.item = Some(item.to_string());
        self
    }

    pub fn moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn extra_moves(mut self, moves: &[&str]) -> Self {
        self.extra_moves = moves.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn tera_type(mut self, tera_type: Type) -> Self {
        self.tera_type = Some(tera_type);
        self
    }

    pub fn boss_multiplier(mut self, percent: u16) -> Self {
        self.boss_multiplier = percent.max(1);
        self
    }

    pub fn shield(mut self, shield: ShieldData) -> Self {
        self.shield = Some(shield);
        self
    }

    // ========================================================================
    // Stat Calculation
    // ========================================================================

    /// Stats before the boss multiplier.
    pub fn calculate_stats(&self, species: &SpeciesData) -> StatTable {
        let base = species.base_stats;
        let level = self.level as u32;

        let mut stats = StatTable::default();
        stats.hp = self.calculate_hp(species, level);
        for (i, stat) in StatId::BATTLE.into_iter().enumerate() {
            stats.set(stat, self.calculate_stat(i + 1, stat, base.get(stat) as u32, level));
        }
        stats
    }

    fn calculate_hp(&self, species: &SpeciesData, level: u32) -> u16 {
        // Shedinja always has 1 HP
        if species.name == "Shedinja" {
            return 1;
        }

        let base = species.base_stats.hp as u32;
        let iv = self.ivs[0] as u32;
        let ev = self.evs[0] as u32;

        let hp = ((2 * base + iv + ev / 4) * level / 100) + level + 10;
        hp as u16
    }

    fn calculate_stat(&self, index: usize, stat: StatId, base: u32, level: u32) -> u16 {
        let iv = self.ivs[index] as u32;
        let ev = self.evs[index] as u32;

        let raw = ((2 * base + iv + ev / 4) * level / 100) + 5;

        // 9 = -10%, 10 = neutral, 11 = +10%
        let modifier = self.nature.stat_modifier(stat) as u32;
        ((raw * modifier) / 10) as u16
    }

    /// HP after the boss multiplier.
    pub fn max_hp(&self, raw_hp: u16) -> u32 {
        raw_hp as u32 * self.boss_multiplier as u32 / 100
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Build against the built-in species catalog.
    pub fn build(&self, id: usize) -> Result<Raider> {
        self.build_with(SpeciesCatalog::builtin(), id)
    }

    pub fn build_with(&self, catalog: &SpeciesCatalog, id: usize) -> Result<Raider> {
        let species = catalog.get(&self.species)?;
        Ok(self.build_from(&species, id))
    }

    fn build_from(&self, species: &Arc<SpeciesData>, id: usize) -> Raider {
        let stats = self.calculate_stats(species);
        let max_hp = self.max_hp(stats.hp).max(1);
        let ability = self
            .ability
            .clone()
            .or_else(|| species.primary_ability().map(str::to_string));

        let mut rolls = CumulativeRolls::new();
        if let Some(item) = self.item.as_deref() {
            // Berries without an HP rewrite are simply not registered.
            rolls.add_sequential_condition(item);
        }
        if ability.as_deref() == Some("Sturdy") {
            rolls.add_persistent_condition("Sturdy");
        }

        log::debug!(
            "built {} ({}) in slot {} with {} HP",
            species.name,
            self.role,
            id,
            max_hp
        );

        Raider {
            id,
            role: self.role.clone(),
            name: species.name.clone(),
            level: self.level,
            types: species.types.clone(),
            weight_kg: species.weight_kg,
            boss_multiplier: self.boss_multiplier,
            stats,
            max_hp,
            cur_hp: max_hp,
            nature: self.nature,
            ability,
            item: self.item.clone(),
            tera_type: self.tera_type,
            shield: self.shield,
            moves: self.moves.clone(),
            extra_moves: self.extra_moves.clone(),
            rolls,
            ..Default::default()
        }
    }
}

fn clamp_evs(evs: [u8; 6]) -> [u8; 6] {
    let mut out = [0u8; 6];
    let mut total: u16 = 0;
    for (slot, ev) in out.iter_mut().zip(evs) {
        let remaining = MAX_EV_TOTAL.saturating_sub(total).min(MAX_EV as u16) as u8;
        *slot = ev.min(MAX_EV).min(remaining);
        total += *slot as u16;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolls::RollCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_garchomp_jolly_stats() {
        let raider = RaiderConfig::new("Garchomp")
            .nature(Nature::Jolly)
            .evs([4, 252, 0, 0, 0, 252])
            .build(1)
            .unwrap();
        // 108/130/95/80/85/102 base
        assert_eq!(raider.stats.hp, 358);
        assert_eq!(raider.stats.atk, 359);
        assert_eq!(raider.stats.spa, 176);
        assert_eq!(raider.stats.spe, 333);
        assert_eq!(raider.max_hp, 358);
        assert_eq!(raider.cur_hp, 358);
        assert_eq!(raider.types, vec![Type::Dragon, Type::Ground]);
    }

    #[test]
    fn test_boss_multiplier_scales_hp_only() {
        let plain = RaiderConfig::new("Garchomp").build(0).unwrap();
        let boss = RaiderConfig::new("Garchomp")
            .boss_multiplier(500)
            .build(0)
            .unwrap();
        assert_eq!(boss.stats.hp, plain.stats.hp);
        assert_eq!(boss.max_hp, plain.stats.hp as u32 * 5);
        assert_eq!(boss.stats.atk, plain.stats.atk);
    }

    #[test]
    fn test_shedinja_has_one_hp() {
        let raider = RaiderConfig::new("Shedinja")
            .evs([252, 0, 0, 0, 0, 0])
            .build(2)
            .unwrap();
        assert_eq!(raider.max_hp, 1);
    }

    #[rstest]
    #[case([255, 255, 255, 0, 0, 0], [252, 252, 6, 0, 0, 0])]
    #[case([100, 100, 100, 100, 100, 100], [100, 100, 100, 100, 100, 10])]
    #[case([0, 252, 0, 0, 4, 252], [0, 252, 0, 0, 4, 252])]
    fn test_evs_clamped(#[case] input: [u8; 6], #[case] expected: [u8; 6]) {
        assert_eq!(RaiderConfig::new("Eevee").evs(input).evs, expected);
    }

    #[test]
    fn test_default_ability_comes_from_species() {
        let species = SpeciesCatalog::builtin().get("Garchomp").unwrap();
        let raider = RaiderConfig::new("Garchomp").build(1).unwrap();
        assert_eq!(raider.ability.as_deref(), species.primary_ability());

        let custom = RaiderConfig::new("Garchomp").ability("Rough Skin").build(1).unwrap();
        assert_eq!(custom.ability.as_deref(), Some("Rough Skin"));
    }

    #[test]
    fn test_sash_and_sturdy_register_conditions() {
        let raider = RaiderConfig::new("Tyranitar")
            .ability("Sturdy")
            .item("Focus Sash")
            .build(1)
            .unwrap();
        assert_eq!(raider.rolls.sequential_conditions(), &[RollCondition::FocusSash]);
        assert_eq!(raider.rolls.persistent_conditions(), &[RollCondition::Sturdy]);
    }

    #[test]
    fn test_sitrus_registers_but_leftovers_does_not() {
        let sitrus = RaiderConfig::new("Blissey").item("Sitrus Berry").build(1).unwrap();
        assert_eq!(sitrus.rolls.sequential_conditions(), &[RollCondition::SitrusBerry]);

        let leftovers = RaiderConfig::new("Blissey").item("Leftovers").build(1).unwrap();
        assert!(leftovers.rolls.sequential_conditions().is_empty());
    }

    #[test]
    fn test_unknown_species_is_an_error() {
        assert!(RaiderConfig::new("Missingno").build(1).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: RaiderConfig = serde_json::from_str(
            r#"{"species": "Pikachu", "role": "Raider 1", "nature": "Timid", "moves": ["Thunderbolt"]}"#,
        )
        .unwrap();
        assert_eq!(config.level, 100);
        assert_eq!(config.ivs, DEFAULT_IVS);
        assert_eq!(config.nature, Nature::Timid);
        let raider = config.build(3).unwrap();
        assert_eq!(raider.id, 3);
        assert_eq!(raider.role, "Raider 1");
        assert_eq!(raider.moves, vec!["Thunderbolt".to_string()]);
    }
}
