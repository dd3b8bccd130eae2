//! Abilities that react to being hit.

use crate::core_data::{BoostId, Boosts, MoveCategory, MoveFlags};
use crate::error::Result;
use crate::state::{Flags, HitInfo, RaidState, SideFlags, Terrain, Weather};
use crate::types::Type;

fn boost(state: &mut RaidState, id: usize, changes: &[(BoostId, i8)], flags: &mut Flags) -> Result<()> {
    let mut boosts = Boosts::default();
    for &(stat, stages) in changes {
        boosts.set(stat, stages);
    }
    state.apply_stat_change(id, boosts, Some(id), flags)?;
    Ok(())
}

/// Whether this hit took the holder from above half HP to half or below.
fn crossed_half(state: &RaidState, id: usize, hit: &HitInfo) -> Result<bool> {
    let raider = state.raider(id)?;
    let before = (raider.cur_hp + hit.damage).min(raider.max_hp);
    Ok(2 * before > raider.max_hp && 2 * raider.cur_hp <= raider.max_hp)
}

// =============================================================================
// on_damaged
// =============================================================================

pub fn weak_armor(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.category == MoveCategory::Physical {
        boost(state, id, &[(BoostId::Def, -1), (BoostId::Spe, 2)], flags)?;
    }
    Ok(())
}

pub fn stamina(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    boost(state, id, &[(BoostId::Def, 1)], flags)
}

pub fn justified(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Dark {
        boost(state, id, &[(BoostId::Atk, 1)], flags)?;
    }
    Ok(())
}

pub fn rattled(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if matches!(hit.move_type, Type::Bug | Type::Ghost | Type::Dark) {
        boost(state, id, &[(BoostId::Spe, 1)], flags)?;
    }
    Ok(())
}

pub fn water_compaction(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Water {
        boost(state, id, &[(BoostId::Def, 2)], flags)?;
    }
    Ok(())
}

pub fn steam_engine(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if matches!(hit.move_type, Type::Fire | Type::Water) {
        boost(state, id, &[(BoostId::Spe, 6)], flags)?;
    }
    Ok(())
}

pub fn thermal_exchange(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.move_type == Type::Fire {
        boost(state, id, &[(BoostId::Atk, 1)], flags)?;
    }
    Ok(())
}

/// Anger Point: a critical hit maxes Attack.
pub fn anger_point(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.is_crit {
        boost(state, id, &[(BoostId::Atk, 12)], flags)?;
    }
    Ok(())
}

pub fn anger_shell(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if crossed_half(state, id, hit)? {
        let changes = [
            (BoostId::Atk, 1),
            (BoostId::Spa, 1),
            (BoostId::Spe, 1),
            (BoostId::Def, -1),
            (BoostId::Spd, -1),
        ];
        boost(state, id, &changes, flags)?;
    }
    Ok(())
}

pub fn berserk(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if crossed_half(state, id, hit)? {
        boost(state, id, &[(BoostId::Spa, 1)], flags)?;
    }
    Ok(())
}

pub fn cotton_down(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    for target in state.opponents(id) {
        state.apply_stat_change(target, Boosts::single(BoostId::Spe, -1), Some(id), flags)?;
    }
    Ok(())
}

pub fn seed_sower(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    state.apply_terrain(Some(Terrain::Grassy), Some(id), flags)?;
    Ok(())
}

pub fn sand_spit(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    state.apply_weather(Some(Weather::Sand), Some(id), flags)?;
    Ok(())
}

fn charge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider_mut(id)?;
    raider.field.attacker_side.set(SideFlags::CHARGED, true);
    flags.push(id, format!("{} became charged", raider.display_name()));
    Ok(())
}

pub fn electromorphosis(state: &mut RaidState, id: usize, _hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    charge(state, id, flags)
}

pub fn wind_power(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
    if hit.flags.contains(MoveFlags::WIND) {
        charge(state, id, flags)?;
    }
    Ok(())
}

// =============================================================================
// on_contact
// =============================================================================

/// Rough Skin / Iron Barbs: the attacker loses 1/8 of its max HP.
pub fn rough_skin(state: &mut RaidState, holder: usize, attacker: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(attacker)?;
    if raider.is_fainted() {
        return Ok(());
    }
    let damage = (raider.max_hp / 8).max(1) as i64;
    let name = raider.display_name();
    let holder_name = state.raider(holder)?.display_name();
    flags.push(attacker, format!("{} was hurt by {}'s barbs", name, holder_name));
    state.apply_damage(attacker, damage, None, None, flags)
}

/// Gooey / Tangling Hair
pub fn gooey(state: &mut RaidState, holder: usize, attacker: usize, flags: &mut Flags) -> Result<()> {
    state.apply_stat_change(attacker, Boosts::single(BoostId::Spe, -1), Some(holder), flags)?;
    Ok(())
}

/// Mummy / Lingering Aroma spread to the attacker.
pub fn mummy(state: &mut RaidState, holder: usize, attacker: usize, flags: &mut Flags) -> Result<()> {
    let ability = state.raider(holder)?.ability.clone();
    if state.raider(attacker)?.ability == ability {
        return Ok(());
    }
    state.change_ability(attacker, ability, flags)
}
