//! Abilities that make the holder immune to a move, and what they do with the
//! absorbed hit.
//!
//! `on_type_immunity` decides whether the move is blocked; `on_absorb` runs
//! on the holder afterwards.

use crate::core_data::{BoostId, Boosts, MoveFlags};
use crate::damage::DamageContext;
use crate::error::Result;
use crate::state::{Flags, RaidState, Volatiles};
use crate::types::{Type, NEUTRAL};

// =============================================================================
// Checks
// =============================================================================

pub fn flash_fire(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Fire
}

/// Volt Absorb, Lightning Rod, Motor Drive
pub fn electric_immune(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Electric
}

/// Water Absorb, Storm Drain, Dry Skin
pub fn water_immune(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Water
}

pub fn sap_sipper(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Grass
}

pub fn earth_eater(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Ground
}

pub fn well_baked_body(ctx: &DamageContext<'_>) -> bool {
    ctx.move_type == Type::Fire
}

pub fn wind_rider(ctx: &DamageContext<'_>) -> bool {
    ctx.has_flag(MoveFlags::WIND)
}

pub fn bulletproof(ctx: &DamageContext<'_>) -> bool {
    ctx.has_flag(MoveFlags::BULLET)
}

pub fn soundproof(ctx: &DamageContext<'_>) -> bool {
    ctx.has_flag(MoveFlags::SOUND)
}

pub fn overcoat(ctx: &DamageContext<'_>) -> bool {
    ctx.has_flag(MoveFlags::POWDER)
}

/// Only super-effective hits land.
pub fn wonder_guard(ctx: &DamageContext<'_>) -> bool {
    !ctx.move_data.is_status() && ctx.effectiveness <= NEUTRAL
}

// =============================================================================
// Absorb effects
// =============================================================================

fn heal_quarter(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let heal = state.raider(id)?.max_hp as i64 / 4;
    state.apply_healing(id, heal, flags)
}

fn raise(state: &mut RaidState, id: usize, stat: BoostId, stages: i8, flags: &mut Flags) -> Result<()> {
    state.apply_stat_change(id, Boosts::single(stat, stages), Some(id), flags)?;
    Ok(())
}

pub fn absorb_heal(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    heal_quarter(state, id, flags)
}

pub fn absorb_flash_fire(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider_mut(id)?;
    if !raider.volatile.has(Volatiles::FLASH_FIRE) {
        raider.volatile.set(Volatiles::FLASH_FIRE, true);
        flags.push(id, format!("{}'s Fire-type moves were powered up", raider.display_name()));
    }
    Ok(())
}

pub fn absorb_special_attack(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    raise(state, id, BoostId::Spa, 1, flags)
}

pub fn absorb_speed(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    raise(state, id, BoostId::Spe, 1, flags)
}

/// Sap Sipper, Wind Rider
pub fn absorb_attack(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    raise(state, id, BoostId::Atk, 1, flags)
}

pub fn absorb_defense(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    raise(state, id, BoostId::Def, 2, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{MoveCategory, MoveData, StatTable};
    use crate::mechanics::Generation;
    use crate::state::{Field, Raider};

    #[test]
    fn test_wonder_guard_lets_super_effective_through() {
        let attacker = Raider::default();
        let defender = Raider::default();
        let field = Field::new();
        let mv = MoveData {
            category: MoveCategory::Physical,
            ..MoveData::unknown("Shadow Claw")
        };
        let mut ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        ctx.effectiveness = 4;
        assert!(wonder_guard(&ctx));
        ctx.effectiveness = 8;
        assert!(!wonder_guard(&ctx));
    }

    #[test]
    fn test_absorb_heal_quarter() {
        let raider = Raider {
            max_hp: 200,
            cur_hp: 100,
            stats: StatTable::splat(100),
            ..Default::default()
        };
        let mut state = RaidState::new(Generation::Gen9, vec![Raider::default(), raider]);
        let mut flags = Flags::new(2);
        absorb_heal(&mut state, 1, &mut flags).unwrap();
        assert_eq!(state.raiders[1].cur_hp, 150);
    }
}
