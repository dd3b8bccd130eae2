//! Switch-in abilities that act on stat stages or copy another combatant.

use crate::core_data::{BoostId, Boosts, StatId};
use crate::error::Result;
use crate::mechanics::get_modified_stat;
use crate::state::{Flags, RaidState, BOSS};

/// Abilities that ignore Intimidate (Gen 8+).
const INTIMIDATE_IMMUNE: [&str; 4] = ["Inner Focus", "Oblivious", "Own Tempo", "Scrappy"];

pub fn intimidate(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    for target in state.opponents(id) {
        let raider = state.raider(target)?;
        if raider.is_fainted() || raider.has_any_ability(&INTIMIDATE_IMMUNE) {
            continue;
        }
        if raider.has_ability("Guard Dog") {
            state.apply_stat_change(target, Boosts::single(BoostId::Atk, 1), Some(target), flags)?;
        } else {
            state.apply_stat_change(target, Boosts::single(BoostId::Atk, -1), Some(id), flags)?;
        }

        let raider = state.raider(target)?;
        let rattled = raider.has_ability("Rattled");
        let adrenaline = raider.has_item("Adrenaline Orb");
        if rattled || adrenaline {
            state.apply_stat_change(target, Boosts::single(BoostId::Spe, 1), Some(target), flags)?;
        }
        if adrenaline {
            state.consume_item(target, flags)?;
        }
    }
    Ok(())
}

pub fn supersweet_syrup(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    for target in state.opponents(id) {
        state.apply_stat_change(target, Boosts::single(BoostId::Evasion, -1), Some(id), flags)?;
    }
    Ok(())
}

/// Raise Atk if the opponents' combined Defense is lower than their Special
/// Defense, SpA otherwise.
pub fn download(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let gen = state.gen;
    let (mut def, mut spd) = (0u32, 0u32);
    for target in state.opponents(id) {
        let raider = state.raider(target)?;
        def += get_modified_stat(raider.stat(StatId::Def), raider.boosts.def, gen);
        spd += get_modified_stat(raider.stat(StatId::Spd), raider.boosts.spd, gen);
    }
    let stat = if def < spd { BoostId::Atk } else { BoostId::Spa };
    state.apply_stat_change(id, Boosts::single(stat, 1), Some(id), flags)?;
    Ok(())
}

pub fn intrepid_sword(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.apply_stat_change(id, Boosts::single(BoostId::Atk, 1), Some(id), flags)?;
    Ok(())
}

pub fn dauntless_shield(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.apply_stat_change(id, Boosts::single(BoostId::Def, 1), Some(id), flags)?;
    Ok(())
}

/// Slow Start is active from the moment the holder enters.
pub fn slow_start(state: &mut RaidState, id: usize, _flags: &mut Flags) -> Result<()> {
    state.raider_mut(id)?.ability_on = true;
    Ok(())
}

pub fn screen_cleaner(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.clear_side(id, true, false)?;
    for target in state.opponents(id) {
        state.clear_side(target, true, false)?;
    }
    flags.push(id, "All screens were removed");
    Ok(())
}

/// Copy the boss's ability (raiders) or the first raider's (the boss).
pub fn trace(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let target = if id == BOSS { 1 } else { BOSS };
    let Some(ability) = state.raider(target)?.ability.clone() else {
        return Ok(());
    };
    if matches!(ability.as_str(), "Trace" | "Imposter" | "Commander") {
        return Ok(());
    }
    state.change_ability(id, Some(ability), flags)
}

pub fn imposter(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let target = if id == BOSS { 1 } else { BOSS };
    if target >= state.len() {
        return Ok(());
    }
    state.transform(id, target, flags)
}

/// Heal each ally by a quarter of its max HP.
pub fn hospitality(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    for ally in state.allies(id) {
        let heal = state.raider(ally)?.max_hp as i64 / 4;
        state.apply_healing(ally, heal, flags)?;
    }
    Ok(())
}
