//! Raid boss actions. They never target anything; each reshapes the raid.

use crate::core_data::Boosts;
use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, ShieldData, BOSS};

/// Clears every raider's raised stages.
pub fn remove_stat_boosts(state: &mut RaidState, _ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    for id in state.opponents(BOSS) {
        let raider = state.raider_mut(id)?;
        if raider.boosts.positive().is_zero() {
            continue;
        }
        raider.boosts = raider.boosts.negative();
        flags.push(id, format!("{}'s stat boosts were removed", raider.display_name()));
    }
    Ok(())
}

/// Clears the boss's lowered stages and its status.
pub fn remove_negative_effects(state: &mut RaidState, _ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let boss = state.raider_mut(BOSS)?;
    boss.boosts = boss.boosts.positive();
    boss.status = None;
    boss.toxic_counter = 0;
    boss.volatile.sleep_turns = 0;
    flags.push(BOSS, format!("{} removed its negative effects", boss.display_name()));
    Ok(())
}

pub fn activate_shield(state: &mut RaidState, _ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let boss = state.raider_mut(BOSS)?;
    if boss.shield.is_none() {
        boss.shield = Some(ShieldData::default());
    }
    if !boss.shield_active {
        boss.shield_active = true;
        flags.push(BOSS, format!("{} put up a tera shield", boss.display_name()));
    }
    Ok(())
}

pub fn steal_tera_charge(state: &mut RaidState, _ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    for id in state.opponents(BOSS) {
        let raider = state.raider_mut(id)?;
        if raider.tera_charge > 0 {
            raider.tera_charge -= 1;
            flags.push(id, format!("{} lost a Tera Orb charge", raider.display_name()));
        }
    }
    Ok(())
}
