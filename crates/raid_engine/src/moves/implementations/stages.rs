//! Moves that copy, swap or reset stat stages.

use crate::core_data::{BoostId, Boosts};
use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, SideFlags};

use super::display_name;

fn swap_stages(state: &mut RaidState, ctx: &EffectContext<'_>, stats: &[BoostId], flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let mut own = state.raider(ctx.user)?.boosts;
    let mut theirs = state.raider(ctx.target)?.boosts;
    for &stat in stats {
        let (a, b) = (own.get(stat), theirs.get(stat));
        own.set(stat, b);
        theirs.set(stat, a);
    }
    state.raider_mut(ctx.user)?.boosts = own;
    state.raider_mut(ctx.target)?.boosts = theirs;
    flags.push(
        ctx.user,
        format!("{} swapped stat changes with {}", display_name(state, ctx.user)?, display_name(state, ctx.target)?),
    );
    Ok(())
}

// =============================================================================
// Try checks
// =============================================================================

pub fn try_belly_drum(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    if user.cur_hp <= user.max_hp / 2 || user.boosts.atk >= 6 {
        return Some("But it failed!".to_string());
    }
    None
}

pub fn try_stockpile(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    if user.stockpile >= 3 {
        return Some(format!("{} can't stockpile any more", user.display_name()));
    }
    None
}

pub fn try_focus_energy(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    if user.is_pumped {
        return Some("But it failed!".to_string());
    }
    None
}

// =============================================================================
// Effects
// =============================================================================

pub fn psych_up(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let boosts = state.raider(ctx.target)?.boosts;
    state.raider_mut(ctx.user)?.boosts = boosts;
    flags.push(
        ctx.user,
        format!("{} copied {}'s stat changes", display_name(state, ctx.user)?, display_name(state, ctx.target)?),
    );
    Ok(())
}

pub fn power_swap(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    swap_stages(state, ctx, &[BoostId::Atk, BoostId::Spa], flags)
}

pub fn guard_swap(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    swap_stages(state, ctx, &[BoostId::Def, BoostId::Spd], flags)
}

pub fn heart_swap(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    swap_stages(state, ctx, &BoostId::ALL, flags)
}

/// Swaps raw Speed, not stages.
pub fn speed_swap(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let own = state.raider(ctx.user)?.stats.spe;
    let theirs = state.raider(ctx.target)?.stats.spe;
    state.raider_mut(ctx.user)?.stats.spe = theirs;
    state.raider_mut(ctx.target)?.stats.spe = own;
    flags.push(ctx.user, format!("{} swapped Speed with its target", display_name(state, ctx.user)?));
    Ok(())
}

/// Swaps the user's raw Attack and Defense.
pub fn power_trick(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    std::mem::swap(&mut user.stats.atk, &mut user.stats.def);
    flags.push(ctx.user, format!("{} switched its Attack and Defense", user.display_name()));
    Ok(())
}

pub fn haze(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    for raider in &mut state.raiders {
        raider.boosts = Boosts::default();
    }
    flags.push(ctx.user, "All stat changes were eliminated");
    Ok(())
}

pub fn clear_smog(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.damaged(ctx.target) {
        return Ok(());
    }
    let target = state.raider_mut(ctx.target)?;
    target.boosts = Boosts::default();
    flags.push(ctx.target, format!("{}'s stat changes were removed", target.display_name()));
    Ok(())
}

pub fn belly_drum(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let half = (state.raider(ctx.user)?.max_hp / 2) as i64;
    state.apply_damage(ctx.user, half, None, None, flags)?;
    state.apply_stat_change(ctx.user, Boosts::single(BoostId::Atk, 12), Some(ctx.user), flags)?;
    Ok(())
}

pub fn stockpile(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    user.stockpile += 1;
    flags.push(ctx.user, format!("{} stockpiled {}", user.display_name(), user.stockpile));
    let boosts = Boosts {
        def: 1,
        spd: 1,
        ..Default::default()
    };
    state.apply_stat_change(ctx.user, boosts, Some(ctx.user), flags)?;
    Ok(())
}

pub fn focus_energy(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    user.is_pumped = true;
    flags.push(ctx.user, format!("{} is getting pumped", user.display_name()));
    Ok(())
}

pub fn charge(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    state.raider_mut(ctx.user)?.field.attacker_side.set(SideFlags::CHARGED, true);
    state.apply_stat_change(ctx.user, Boosts::single(BoostId::Spd, 1), Some(ctx.user), flags)?;
    Ok(())
}

pub fn tidy_up(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    for id in [ctx.user, ctx.target] {
        state.clear_side(id, false, true)?;
    }
    let boosts = Boosts {
        atk: 1,
        spe: 1,
        ..Default::default()
    };
    state.apply_stat_change(ctx.user, boosts, Some(ctx.user), flags)?;
    Ok(())
}
