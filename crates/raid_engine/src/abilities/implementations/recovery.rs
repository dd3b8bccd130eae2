//! End-of-turn ability effects.

use crate::core_data::{BoostId, Boosts, Status};
use crate::error::Result;
use crate::state::{Flags, RaidState, Weather};

fn fraction(state: &RaidState, id: usize, denominator: u32) -> Result<i64> {
    Ok((state.raider(id)?.max_hp / denominator).max(1) as i64)
}

pub fn speed_boost(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    state.apply_stat_change(id, Boosts::single(BoostId::Spe, 1), Some(id), flags)?;
    Ok(())
}

pub fn rain_dish(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    if state.raider(id)?.field.is_rain() {
        let heal = fraction(state, id, 16)?;
        state.apply_healing(id, heal, flags)?;
    }
    Ok(())
}

pub fn ice_body(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    if state.raider(id)?.field.has_weather(&[Weather::Snow, Weather::Hail]) {
        let heal = fraction(state, id, 16)?;
        state.apply_healing(id, heal, flags)?;
    }
    Ok(())
}

/// Dry Skin: heals in rain, hurts in sun.
pub fn dry_skin(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let field = &state.raider(id)?.field;
    let (rain, sun) = (field.is_rain(), field.is_sun());
    let amount = fraction(state, id, 8)?;
    if rain {
        state.apply_healing(id, amount, flags)?;
    } else if sun {
        state.apply_damage(id, amount, None, None, flags)?;
    }
    Ok(())
}

pub fn solar_power(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    if state.raider(id)?.field.is_sun() {
        let amount = fraction(state, id, 8)?;
        state.apply_damage(id, amount, None, None, flags)?;
    }
    Ok(())
}

/// Poison Heal: recovers 1/8 instead of taking poison damage.
pub fn poison_heal(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    if state.raider(id)?.status.is_some_and(Status::is_poison) {
        let heal = fraction(state, id, 8)?;
        state.apply_healing(id, heal, flags)?;
    }
    Ok(())
}

pub fn hydration(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider_mut(id)?;
    if raider.status.is_some() && raider.field.is_rain() {
        raider.status = None;
        raider.toxic_counter = 0;
        raider.volatile.sleep_turns = 0;
        flags.push(id, format!("{} was cured by Hydration", raider.display_name()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::StatTable;
    use crate::mechanics::Generation;
    use crate::state::Raider;

    #[test]
    fn test_dry_skin_by_weather() {
        let raider = Raider {
            max_hp: 160,
            cur_hp: 100,
            stats: StatTable::splat(100),
            ..Default::default()
        };
        let mut state = RaidState::new(Generation::Gen9, vec![Raider::default(), raider]);
        let mut flags = Flags::new(2);
        state.raiders[1].field.weather = Some(Weather::Rain);
        dry_skin(&mut state, 1, &mut flags).unwrap();
        assert_eq!(state.raiders[1].cur_hp, 120);
        state.raiders[1].field.weather = Some(Weather::Sun);
        dry_skin(&mut state, 1, &mut flags).unwrap();
        assert_eq!(state.raiders[1].cur_hp, 100);
    }
}
