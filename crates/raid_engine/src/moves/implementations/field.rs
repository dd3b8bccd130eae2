//! Moves that reshape the field or the target itself.

use crate::core_data::{Ailment, BoostId, Boosts};
use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, Volatiles};
use crate::types::Type;

use super::display_name;

// =============================================================================
// Try checks
// =============================================================================

/// Soak fails on a terastallized target or one that is already pure Water.
///
/// Only the tera flag is checked, not the tera type: a target with a Water
/// tera type that has not terastallized is still soaked.
pub fn try_soak(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let target = state.raider(ctx.target).ok()?;
    if target.is_tera || target.types == [Type::Water] {
        return Some("But it failed!".to_string());
    }
    None
}

pub fn try_transform(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    let target = state.raider(ctx.target).ok()?;
    if user.volatile.has(Volatiles::TRANSFORMED) || target.volatile.has(Volatiles::TRANSFORMED) {
        return Some("But it failed!".to_string());
    }
    None
}

// =============================================================================
// Effects
// =============================================================================

/// Clears the target side's screens and hazards, the user side's hazards and
/// any terrain, then lowers the target's evasion.
pub fn defog(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    state.clear_side(ctx.target, true, true)?;
    state.clear_side(ctx.user, false, true)?;
    if state.raider(ctx.user)?.field.terrain.is_some() {
        state.apply_terrain(None, Some(ctx.user), flags)?;
    }
    if ctx.landed_on(ctx.target) {
        state.apply_stat_change(ctx.target, Boosts::single(BoostId::Evasion, -1), Some(ctx.user), flags)?;
    }
    Ok(())
}

pub fn smack_down(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.damaged(ctx.target) {
        return Ok(());
    }
    let target = state.raider_mut(ctx.target)?;
    if !target.volatile.has(Volatiles::SMACKED_DOWN) {
        target.volatile.set(Volatiles::SMACKED_DOWN, true);
        flags.push(ctx.target, format!("{} fell straight down", target.display_name()));
    }
    Ok(())
}

pub fn soak(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let target = state.raider_mut(ctx.target)?;
    target.types = vec![Type::Water];
    flags.push(ctx.target, format!("{} transformed into the Water type", target.display_name()));
    Ok(())
}

pub fn transform(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    state.transform(ctx.user, ctx.target, flags)
}

pub fn aqua_ring(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    if !user.volatile.has(Volatiles::AQUA_RING) {
        user.volatile.set(Volatiles::AQUA_RING, true);
        flags.push(ctx.user, format!("{} surrounded itself with a veil of water", user.display_name()));
    }
    Ok(())
}

pub fn ingrain(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !state.apply_volatile_status(ctx.user, Ailment::Ingrain, Some(ctx.user), flags)? {
        log::debug!("{} is already rooted", display_name(state, ctx.user)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::MoveData;
    use crate::mechanics::Generation;
    use crate::moves::MoveOptions;
    use crate::state::{Raider, SideCounter, SideFlags, Terrain};

    fn state() -> RaidState {
        let boss = Raider {
            max_hp: 400,
            cur_hp: 400,
            types: vec![Type::Dragon, Type::Ground],
            ..Default::default()
        };
        let raider = Raider {
            max_hp: 100,
            cur_hp: 100,
            ..Default::default()
        };
        RaidState::new(Generation::Gen9, vec![boss, raider])
    }

    fn run(state: &mut RaidState, damage: i64, apply: crate::moves::hooks::OnApply) {
        let data = MoveData::unknown("Test");
        let options = MoveOptions::default();
        let damage = vec![damage, 0];
        let ctx = EffectContext {
            move_data: &data,
            user: 1,
            target: 0,
            affected: &[0],
            damage: &damage,
            is_crit: false,
            options: &options,
        };
        let mut flags = Flags::new(state.len());
        apply(state, &ctx, &mut flags).unwrap();
    }

    #[test]
    fn test_defog_clears_screens_and_terrain() {
        let mut s = state();
        s.raiders[0].field.attacker_side.reflect = 5;
        s.raiders[1].field.attacker_side.set(SideFlags::STEALTH_ROCK, true);
        s.raiders[1].field.attacker_side.light_screen = 3;
        for raider in &mut s.raiders {
            raider.field.set_terrain(Some(Terrain::Psychic), 5);
        }
        run(&mut s, 0, defog);
        assert!(!s.raiders[0].field.attacker_side.is_active(SideCounter::Reflect));
        assert!(!s.raiders[1].field.attacker_side.has(SideFlags::STEALTH_ROCK));
        // the user's own screens stay up
        assert_eq!(s.raiders[1].field.attacker_side.light_screen, 3);
        assert!(s.raiders.iter().all(|r| r.field.terrain.is_none()));
        assert_eq!(s.raiders[0].boosts.evasion, -1);
    }

    #[test]
    fn test_soak_guard_checks_tera_flag() {
        let mut s = state();
        let data = MoveData::unknown("Soak");
        let options = MoveOptions::default();
        let ctx = EffectContext {
            move_data: &data,
            user: 1,
            target: 0,
            affected: &[0],
            damage: &[0, 0],
            is_crit: false,
            options: &options,
        };
        assert_eq!(try_soak(&s, &ctx), None);
        s.raiders[0].is_tera = true;
        assert!(try_soak(&s, &ctx).is_some());
    }

    #[test]
    fn test_soak_sets_pure_water() {
        let mut s = state();
        run(&mut s, 0, soak);
        assert_eq!(s.raiders[0].types, vec![Type::Water]);
    }

    #[test]
    fn test_smack_down_needs_a_hit() {
        let mut s = state();
        run(&mut s, 0, smack_down);
        assert!(!s.raiders[0].volatile.has(Volatiles::SMACKED_DOWN));
        run(&mut s, 12, smack_down);
        assert!(s.raiders[0].volatile.has(Volatiles::SMACKED_DOWN));
    }
}
