//! Item hook implementations.

use crate::core_data::{BoostId, Boosts, MoveCategory, MoveFlags, Status};
use crate::damage::DamageContext;
use crate::error::Result;
use crate::mechanics::is_super_effective;
use crate::state::{Flags, HitInfo, RaidState};
use crate::types::{Type, NEUTRAL};

/// Type-boosting held items (plates and the like are not modeled).
pub const TYPE_BOOSTERS: [(&str, Type); 18] = [
    ("Silk Scarf", Type::Normal),
    ("Black Belt", Type::Fighting),
    ("Sharp Beak", Type::Flying),
    ("Poison Barb", Type::Poison),
    ("Soft Sand", Type::Ground),
    ("Hard Stone", Type::Rock),
    ("Silver Powder", Type::Bug),
    ("Spell Tag", Type::Ghost),
    ("Metal Coat", Type::Steel),
    ("Charcoal", Type::Fire),
    ("Mystic Water", Type::Water),
    ("Miracle Seed", Type::Grass),
    ("Magnet", Type::Electric),
    ("Twisted Spoon", Type::Psychic),
    ("Never-Melt Ice", Type::Ice),
    ("Dragon Fang", Type::Dragon),
    ("Black Glasses", Type::Dark),
    ("Fairy Feather", Type::Fairy),
];

/// Berries that halve one super-effective hit (Chilan works on any Normal hit).
pub const RESIST_BERRIES: [(&str, Type); 18] = [
    ("Chilan Berry", Type::Normal),
    ("Chople Berry", Type::Fighting),
    ("Coba Berry", Type::Flying),
    ("Kebia Berry", Type::Poison),
    ("Shuca Berry", Type::Ground),
    ("Charti Berry", Type::Rock),
    ("Tanga Berry", Type::Bug),
    ("Kasib Berry", Type::Ghost),
    ("Babiri Berry", Type::Steel),
    ("Occa Berry", Type::Fire),
    ("Passho Berry", Type::Water),
    ("Rindo Berry", Type::Grass),
    ("Wacan Berry", Type::Electric),
    ("Payapa Berry", Type::Psychic),
    ("Yache Berry", Type::Ice),
    ("Haban Berry", Type::Dragon),
    ("Colbur Berry", Type::Dark),
    ("Roseli Berry", Type::Fairy),
];

fn item_type(table: &[(&str, Type)], item: Option<&str>) -> Option<Type> {
    let item = item?;
    table.iter().find(|(name, _)| *name == item).map(|&(_, t)| t)
}

fn resist_berry_triggers(berry_type: Type, move_type: Type, effectiveness: u8) -> bool {
    berry_type == move_type && (berry_type == Type::Normal || effectiveness > NEUTRAL)
}

// =============================================================================
// Base power
// =============================================================================

// Type boosters: 1.2x
pub fn on_modify_base_power_type_booster(ctx: &DamageContext<'_>) -> Option<u16> {
    let boosted = item_type(&TYPE_BOOSTERS, ctx.attacker.active_item())?;
    (boosted == ctx.move_type).then_some(4915)
}

pub fn on_modify_base_power_muscle_band(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(4505)
}

pub fn on_modify_base_power_wise_glasses(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_special().then_some(4505)
}

pub fn on_modify_base_power_punching_glove(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::PUNCH).then_some(4506)
}

// =============================================================================
// Stats
// =============================================================================

pub fn on_modify_attack_choice_band(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(6144)
}

pub fn on_modify_attack_choice_specs(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_special().then_some(6144)
}

// Light Ball: 2x Atk and SpA for Pikachu.
pub fn on_modify_attack_light_ball(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.attacker.name.starts_with("Pikachu").then_some(8192)
}

// Thick Club: 2x Atk for Cubone or Marowak.
pub fn on_modify_attack_thick_club(ctx: &DamageContext<'_>) -> Option<u16> {
    let species = ctx.attacker.name.as_str();
    let holder = species == "Cubone" || species.starts_with("Marowak");
    (holder && ctx.is_physical()).then_some(8192)
}

// Eviolite: 1.5x Def and SpD. Holders are assumed to be able to evolve.
pub fn on_modify_defense_eviolite(_ctx: &DamageContext<'_>) -> Option<u16> {
    Some(6144)
}

// Assault Vest: 1.5x SpD. The status-move lock is enforced by move selection.
pub fn on_modify_defense_assault_vest(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_special().then_some(6144)
}

// =============================================================================
// Final damage
// =============================================================================

pub fn on_final_modifier_life_orb(_ctx: &DamageContext<'_>) -> Option<u16> {
    Some(5324)
}

pub fn on_final_modifier_expert_belt(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.effectiveness > NEUTRAL).then_some(4915)
}

/// Metronome: +20% per consecutive use, up to 2x.
pub fn on_final_modifier_metronome(ctx: &DamageContext<'_>) -> Option<u16> {
    let repeats = ctx.attacker.move_repeated.min(5) as u16;
    (repeats > 0).then_some(4096 + 819 * repeats)
}

pub fn on_foe_final_modifier_resist_berry(ctx: &DamageContext<'_>) -> Option<u16> {
    let berry_type = item_type(&RESIST_BERRIES, ctx.defender.active_item())?;
    if !resist_berry_triggers(berry_type, ctx.move_type, ctx.effectiveness) {
        return None;
    }
    if ctx.defender.has_ability("Ripen") {
        Some(1024)
    } else {
        Some(2048)
    }
}

// =============================================================================
// Reactions
// =============================================================================

fn consume_and_boost(
    state: &mut RaidState,
    id: usize,
    changes: &[(BoostId, i8)],
    flags: &mut Flags,
) -> Result<()> {
    let item = state.consume_item(id, flags)?.unwrap_or_default();
    let name = state.raider(id)?.display_name();
    flags.push(id, format!("{} used its {}", name, item));
    let mut boosts = Boosts::default();
    for &(stat, stages) in changes {
        boosts.set(stat, stages);
    }
    state.apply_stat_change(id, boosts, Some(id), flags)?;
    Ok(())
}

pub fn on_damaged_weakness_policy(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if is_super_effective(hit.effectiveness) {
        consume_and_boost(state, id, &[(BoostId::Atk, 2), (BoostId::Spa, 2)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_absorb_bulb(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Water {
        consume_and_boost(state, id, &[(BoostId::Spa, 1)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_cell_battery(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Electric {
        consume_and_boost(state, id, &[(BoostId::Atk, 1)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_luminous_moss(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Water {
        consume_and_boost(state, id, &[(BoostId::Spd, 1)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_snowball(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Ice {
        consume_and_boost(state, id, &[(BoostId::Atk, 1)], flags)?;
    }
    Ok(())
}

fn berry_stages(state: &RaidState, id: usize) -> Result<i8> {
    Ok(if state.raider(id)?.has_ability("Ripen") { 2 } else { 1 })
}

pub fn on_damaged_kee_berry(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.category == MoveCategory::Physical {
        let stages = berry_stages(state, id)?;
        consume_and_boost(state, id, &[(BoostId::Def, stages)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_maranga_berry(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.category == MoveCategory::Special {
        let stages = berry_stages(state, id)?;
        consume_and_boost(state, id, &[(BoostId::Spd, stages)], flags)?;
    }
    Ok(())
}

pub fn on_damaged_air_balloon(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    state.consume_item(id, flags)?;
    let name = state.raider(id)?.display_name();
    flags.push(id, format!("{}'s Air Balloon popped", name));
    Ok(())
}

/// The berry already halved the hit; it is used up here.
pub fn on_damaged_resist_berry(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    let item = state.raider(id)?.active_item().map(str::to_string);
    let Some(berry_type) = item_type(&RESIST_BERRIES, item.as_deref()) else {
        return Ok(());
    };
    if resist_berry_triggers(berry_type, hit.move_type, hit.effectiveness) {
        state.consume_item(id, flags)?;
        let name = state.raider(id)?.display_name();
        flags.push(id, format!("{} weakened the hit with its {}", name, item.unwrap_or_default()));
    }
    Ok(())
}

pub fn on_contact_rocky_helmet(state: &mut RaidState, holder: usize, attacker: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(attacker)?;
    if raider.is_fainted() {
        return Ok(());
    }
    let damage = (raider.max_hp / 6).max(1) as i64;
    let name = raider.display_name();
    let holder_name = state.raider(holder)?.display_name();
    flags.push(attacker, format!("{} was hurt by {}'s Rocky Helmet", name, holder_name));
    state.apply_damage(attacker, damage, None, None, flags)
}

// =============================================================================
// End of turn
// =============================================================================

pub fn on_end_of_turn_leftovers(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let heal = (state.raider(id)?.max_hp / 16).max(1) as i64;
    state.apply_healing(id, heal, flags)
}

// Black Sludge heals Poison types and hurts everyone else.
pub fn on_end_of_turn_black_sludge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    if raider.has_type(Type::Poison) {
        let heal = (raider.max_hp / 16).max(1) as i64;
        state.apply_healing(id, heal, flags)
    } else {
        let damage = (raider.max_hp / 8).max(1) as i64;
        state.apply_damage(id, damage, None, None, flags)
    }
}

pub fn on_end_of_turn_flame_orb(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.apply_status(id, Status::Burn, None, flags)?;
    Ok(())
}

pub fn on_end_of_turn_toxic_orb(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.apply_status(id, Status::Toxic, None, flags)?;
    Ok(())
}

pub fn on_switch_in_air_balloon(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let name = state.raider(id)?.display_name();
    flags.push(id, format!("{} floats in the air with its Air Balloon", name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{MoveData, StatTable};
    use crate::mechanics::Generation;
    use crate::state::{Field, Raider};

    fn holder(item: &str) -> Raider {
        Raider {
            max_hp: 160,
            cur_hp: 160,
            stats: StatTable::splat(100),
            item: Some(item.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resist_berry_needs_super_effective() {
        let attacker = Raider::default();
        let defender = holder("Yache Berry");
        let field = Field::new();
        let ice_beam = MoveData {
            move_type: Type::Ice,
            category: MoveCategory::Special,
            ..MoveData::unknown("Ice Beam")
        };
        let mut ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &ice_beam, &field);
        ctx.effectiveness = 8;
        assert_eq!(on_foe_final_modifier_resist_berry(&ctx), Some(2048));
        ctx.effectiveness = 4;
        assert_eq!(on_foe_final_modifier_resist_berry(&ctx), None);
    }

    #[test]
    fn test_metronome_ramp() {
        let mut attacker = holder("Metronome");
        let defender = Raider::default();
        let field = Field::new();
        let mv = MoveData::unknown("Dragon Claw");
        attacker.move_repeated = 2;
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(on_final_modifier_metronome(&ctx), Some(5734));
        attacker.move_repeated = 9;
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(on_final_modifier_metronome(&ctx), Some(8191));
    }

    #[test]
    fn test_black_sludge_hurts_non_poison() {
        let mut state = RaidState::new(Generation::Gen9, vec![Raider::default(), holder("Black Sludge")]);
        let mut flags = Flags::new(2);
        on_end_of_turn_black_sludge(&mut state, 1, &mut flags).unwrap();
        assert_eq!(state.raiders[1].cur_hp, 140);
    }
}
