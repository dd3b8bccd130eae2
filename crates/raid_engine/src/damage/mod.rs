//! Single-hit damage calculator.
//!
//! The calculation follows the cartridge formula:
//! 1. **Base Damage**: `floor(floor(floor(2 * Level / 5 + 2) * Power * Atk / Def) / 50) + 2`
//! 2. **Modifier Chain**: 4096-scale multipliers applied in a fixed order
//!
//! [`calculate`] never touches a battle state. Callers apply the returned
//! damage themselves.

mod context;
pub mod description;
pub mod fixed;
mod modifiers;
pub mod power;

pub use context::DamageContext;
pub use description::RawDesc;

use serde::{Deserialize, Serialize};

use crate::abilities;
use crate::abilities::implementations::stat_modifiers::ignores_burn;
use crate::core_data::{MoveCategory, MoveData, Status};
use crate::mechanics::{defender_effectiveness, get_all_rolls, get_base_damage, get_final_damage, Generation};
use crate::state::{Field, Raider, Terrain, Weather};
use crate::types::{Type, NEUTRAL};

/// Damage of one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Damage {
    /// Fixed-damage moves (and immunities, as zero).
    Fixed(u32),
    /// One value per random roll, lowest first.
    Rolls([u32; 16]),
}

impl Damage {
    pub const ZERO: Damage = Damage::Fixed(0);

    pub fn min(&self) -> u32 {
        match self {
            Damage::Fixed(d) => *d,
            Damage::Rolls(rolls) => rolls[0],
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            Damage::Fixed(d) => *d,
            Damage::Rolls(rolls) => rolls[15],
        }
    }

    /// Every possible value, one per equally likely outcome.
    pub fn values(&self) -> Vec<u32> {
        match self {
            Damage::Fixed(d) => vec![*d],
            Damage::Rolls(rolls) => rolls.to_vec(),
        }
    }

    /// Floor of the mean over all rolls.
    pub fn average(&self) -> u32 {
        match self {
            Damage::Fixed(d) => *d,
            Damage::Rolls(rolls) => (rolls.iter().map(|&d| d as u64).sum::<u64>() / 16) as u32,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.max() == 0
    }
}

/// Per-hit switches the caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageOptions {
    pub is_crit: bool,
    /// 1-based hit number within a multi-hit move.
    pub hit_index: u8,
    /// The hit lands through a protection move at a quarter of its damage.
    pub through_protect: bool,
}

impl Default for DamageOptions {
    fn default() -> Self {
        Self {
            is_crit: false,
            hit_index: 1,
            through_protect: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageResult {
    pub damage: Damage,
    /// 4-scale, 4 = neutral.
    pub effectiveness: u8,
    pub move_type: Type,
    pub category: MoveCategory,
    /// Base power after every modifier.
    pub base_power: u32,
    pub is_crit: bool,
    /// The defender's ability took the hit (Volt Absorb, Flash Fire...).
    #[serde(default)]
    pub absorbed: bool,
    pub description: String,
}

// ============================================================================
// Immunities
// ============================================================================

/// Whether the hit is blocked outright. Notes the cause in `desc`.
fn is_blocked(ctx: &DamageContext<'_>, desc: &mut RawDesc) -> bool {
    if ctx.effectiveness == 0 {
        return true;
    }
    let name = ctx.move_data.name.as_str();

    if ctx.move_type == Type::Ground && !ctx.defender_grounded && name != "Thousand Arrows" {
        if ctx.defender_has_ability("Levitate") {
            desc.defender_ability = Some("Levitate".to_string());
        } else if ctx.defender.has_item("Air Balloon") {
            desc.defender_item = Some("Air Balloon".to_string());
        }
        return true;
    }

    let weather = ctx.field.effective_weather();
    let evaporated = weather == Some(Weather::HarshSunshine) && ctx.move_type == Type::Water;
    let doused = weather == Some(Weather::HeavyRain) && ctx.move_type == Type::Fire;
    if evaporated || doused {
        desc.weather = weather;
        return true;
    }

    let priority = match ctx
        .attacker
        .active_ability()
        .and_then(abilities::hooks)
        .and_then(|h| h.on_modify_priority)
    {
        Some(hook) => hook(ctx.attacker, ctx.move_data, ctx.move_data.priority),
        None => ctx.move_data.priority,
    };
    if priority > 0 && ctx.defender_grounded && ctx.field.has_terrain(Terrain::Psychic) {
        desc.terrain = Some(Terrain::Psychic);
        return true;
    }

    let immune = ability_immune(ctx);
    if immune {
        desc.defender_ability = ctx.defender_ability().map(str::to_string);
    }
    immune
}

pub(crate) fn ability_immune(ctx: &DamageContext<'_>) -> bool {
    ctx.defender_ability()
        .and_then(abilities::hooks)
        .and_then(|h| h.on_type_immunity)
        .is_some_and(|hook| hook(ctx))
}

fn finish(damage: Damage, base_power: u32, desc: &RawDesc, ctx: &DamageContext<'_>) -> DamageResult {
    DamageResult {
        damage,
        effectiveness: ctx.effectiveness,
        move_type: ctx.move_type,
        category: ctx.category,
        base_power,
        is_crit: ctx.is_crit,
        absorbed: false,
        description: desc.build(damage.min(), damage.max(), ctx.defender.max_hp),
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Damage of one hit of `move_data` from `attacker` against `defender`.
///
/// `field` is the attacker's field with the defender's side filled in
/// (see [`RaidState::move_field`](crate::state::RaidState::move_field)).
pub fn calculate(
    gen: Generation,
    attacker: &Raider,
    defender: &Raider,
    move_data: &MoveData,
    field: &Field,
    options: &DamageOptions,
) -> DamageResult {
    let mut ctx = DamageContext::new(gen, attacker, defender, move_data, field);
    ctx.hit_index = options.hit_index.max(1);

    ctx.move_type = power::move_type(&ctx);
    let changed = attacker
        .active_ability()
        .and_then(abilities::hooks)
        .and_then(|h| h.on_modify_type)
        .and_then(|hook| hook(move_data, ctx.move_type));
    if let Some(move_type) = changed {
        ctx.move_type = move_type;
        ctx.type_changed = true;
    }
    ctx.category = power::move_category(&ctx);
    ctx.effectiveness = if ctx.move_type == Type::Unknown {
        NEUTRAL
    } else {
        defender_effectiveness(attacker, defender, move_data, ctx.move_type, field)
    };
    ctx.is_crit = options.is_crit && !ctx.defender_has_ability("Battle Armor") && !ctx.defender_has_ability("Shell Armor");
    ctx.base_power = power::base_power(&ctx);

    let mut desc = RawDesc {
        attack_stat: "Atk",
        defense_stat: "Def",
        attacker_name: attacker.display_name(),
        attacker_tera: attacker.tera_type.filter(|_| attacker.is_tera),
        move_name: move_data.name.clone(),
        move_bp: power::is_variable_power(&move_data.name).then_some(ctx.base_power),
        move_type: (ctx.move_type != move_data.move_type && ctx.move_type != Type::Unknown).then_some(ctx.move_type),
        defender_name: defender.display_name(),
        defender_tera: defender.tera_type.filter(|_| defender.is_tera),
        ..Default::default()
    };

    if ctx.category == MoveCategory::Status {
        return finish(Damage::ZERO, 0, &desc, &ctx);
    }
    if is_blocked(&ctx, &mut desc) {
        let mut result = finish(Damage::ZERO, 0, &desc, &ctx);
        result.absorbed = ctx.effectiveness > 0 && ability_immune(&ctx);
        return result;
    }
    if let Some(fixed) = fixed::get_fixed_damage(&ctx) {
        return finish(Damage::Fixed(fixed), 0, &desc, &ctx);
    }

    let base_power = modifiers::compute_base_power(&ctx, &mut desc);
    if base_power == 0 {
        return finish(Damage::ZERO, 0, &desc, &ctx);
    }
    let attack = modifiers::compute_attack(&ctx, &mut desc);
    let defense = modifiers::compute_defense(&ctx, &mut desc);
    let base = get_base_damage(attacker.level as u32, base_power, attack, defense);
    let base = modifiers::apply_pre_random(&ctx, base, &mut desc);

    let stab = if ctx.move_type == Type::Unknown { 4096 } else { ctx.stab_modifier() };
    let burned = attacker.has_status(Status::Burn) && ctx.is_physical() && !ignores_burn(&ctx);
    desc.is_burned = burned;
    desc.is_protected = options.through_protect;
    let final_mod = modifiers::compute_final_modifier(&ctx, &mut desc);

    let mut rolls = [0u32; 16];
    for (i, roll) in rolls.iter_mut().enumerate() {
        *roll = get_final_damage(
            base,
            i as u8,
            ctx.effectiveness,
            burned,
            stab,
            final_mod,
            options.through_protect,
        );
    }
    log::trace!(
        "{} {}: bp {} atk {} def {} base {} rolls {:?}",
        attacker.display_name(),
        move_data.name,
        base_power,
        attack,
        defense,
        base,
        rolls
    );
    finish(Damage::Rolls(rolls), base_power, &desc, &ctx)
}

/// Pre-roll base damage for the plain formula, without any modifier.
pub fn raw_rolls(level: u32, base_power: u32, attack: u32, defense: u32) -> [u32; 16] {
    get_all_rolls(get_base_damage(level, base_power, attack, defense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::StatTable;

    fn mon(name: &str, types: &[Type], stats: StatTable, max_hp: u32) -> Raider {
        Raider {
            name: name.to_string(),
            types: types.to_vec(),
            stats,
            max_hp,
            cur_hp: max_hp,
            ..Default::default()
        }
    }

    fn tackle(power: u16, move_type: Type) -> MoveData {
        MoveData {
            power,
            move_type,
            category: MoveCategory::Physical,
            accuracy: Some(100),
            ..MoveData::unknown("Strength")
        }
    }

    #[test]
    fn test_neutral_hit_matches_formula() {
        // floor(floor(42 * 80 * 300 / 200) / 50) + 2 = 102
        let attacker = mon("Snorlax", &[Type::Water], StatTable { atk: 300, ..StatTable::splat(100) }, 300);
        let defender = mon("Tyranitar", &[Type::Normal], StatTable { def: 200, ..StatTable::splat(100) }, 400);
        let field = Field::new();
        let result = calculate(
            Generation::Gen9,
            &attacker,
            &defender,
            &tackle(80, Type::Normal),
            &field,
            &DamageOptions::default(),
        );
        assert_eq!(get_base_damage(100, 80, 300, 200), 102);
        assert_eq!(result.damage, Damage::Rolls(raw_rolls(100, 80, 300, 200)));
        assert_eq!(result.damage.min(), 86);
        assert_eq!(result.damage.max(), 102);
    }

    #[test]
    fn test_ghost_immunity_is_zero() {
        let attacker = mon("Snorlax", &[Type::Normal], StatTable::splat(100), 300);
        let defender = mon("Gengar", &[Type::Ghost], StatTable::splat(100), 300);
        let field = Field::new();
        let result = calculate(
            Generation::Gen9,
            &attacker,
            &defender,
            &tackle(80, Type::Normal),
            &field,
            &DamageOptions::default(),
        );
        assert!(result.damage.is_zero());
        assert_eq!(result.effectiveness, 0);
    }

    #[test]
    fn test_levitate_blocks_ground() {
        let attacker = mon("Garchomp", &[Type::Dragon], StatTable::splat(100), 300);
        let mut defender = mon("Bronzong", &[Type::Steel, Type::Psychic], StatTable::splat(100), 300);
        defender.ability = Some("Levitate".to_string());
        let field = Field::new();
        let result = calculate(
            Generation::Gen9,
            &attacker,
            &defender,
            &tackle(100, Type::Ground),
            &field,
            &DamageOptions::default(),
        );
        assert!(result.damage.is_zero());
        assert!(result.description.contains("Levitate"));
    }

    #[test]
    fn test_crit_and_stab_raise_damage() {
        let attacker = mon("Garchomp", &[Type::Ground], StatTable::splat(200), 300);
        let defender = mon("Boss", &[Type::Normal], StatTable::splat(200), 600);
        let field = Field::new();
        let mv = tackle(100, Type::Ground);
        let plain = calculate(Generation::Gen9, &attacker, &defender, &mv, &field, &DamageOptions::default());
        let crit = calculate(
            Generation::Gen9,
            &attacker,
            &defender,
            &mv,
            &field,
            &DamageOptions {
                is_crit: true,
                ..Default::default()
            },
        );
        assert!(crit.damage.max() > plain.damage.max());
        assert!(crit.description.ends_with(&format!(
            "on a critical hit: {}-{} ({} - {}%)",
            crit.damage.min(),
            crit.damage.max(),
            description::format_percent(crit.damage.min(), 600),
            description::format_percent(crit.damage.max(), 600)
        )));
    }

    #[test]
    fn test_seismic_toss_fixed() {
        let mut attacker = mon("Blissey", &[Type::Normal], StatTable::splat(100), 600);
        attacker.id = 1;
        let defender = mon("Dondozo", &[Type::Normal], StatTable::splat(100), 1000);
        let field = Field::new();
        let mv = MoveData {
            move_type: Type::Fighting,
            category: MoveCategory::Physical,
            ..MoveData::unknown("Seismic Toss")
        };
        let result = calculate(Generation::Gen9, &attacker, &defender, &mv, &field, &DamageOptions::default());
        assert_eq!(result.damage, Damage::Fixed(100));
        assert_eq!(result.description, "Blissey Seismic Toss vs. Boss Dondozo: 100-100 (10 - 10%)");
    }

    #[test]
    fn test_status_move_does_nothing() {
        let attacker = mon("A", &[Type::Normal], StatTable::splat(100), 100);
        let defender = mon("B", &[Type::Normal], StatTable::splat(100), 100);
        let field = Field::new();
        let mv = MoveData::unknown("Growl");
        let result = calculate(Generation::Gen9, &attacker, &defender, &mv, &field, &DamageOptions::default());
        assert_eq!(result.damage, Damage::ZERO);
    }

    #[test]
    fn test_average_roll() {
        let damage = Damage::Rolls([1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 3]);
        assert_eq!(damage.average(), 1);
        assert_eq!(Damage::Fixed(7).average(), 7);
    }
}
