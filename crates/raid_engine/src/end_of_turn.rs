//! Residual effects once both moves of a turn have resolved.
//!
//! Runs for the acting raider and the boss only; the other raiders' lanes
//! keep their own timeline and are untouched until they act.

use crate::abilities;
use crate::core_data::{BoostId, Boosts, Status};
use crate::error::Result;
use crate::items;
use crate::mechanics::is_grounded;
use crate::state::{Flags, RaidState, SideFlags, Terrain, Volatiles, Weather};
use crate::types::Type;

const SAND_IMMUNE_ABILITIES: [&str; 5] = ["Sand Veil", "Sand Rush", "Sand Force", "Overcoat", "Magic Guard"];
const HAIL_IMMUNE_ABILITIES: [&str; 4] = ["Ice Body", "Snow Cloak", "Overcoat", "Magic Guard"];

fn fraction(state: &RaidState, id: usize, denominator: u32) -> Result<i64> {
    Ok((state.raider(id)?.max_hp / denominator).max(1) as i64)
}

fn hurt(state: &mut RaidState, id: usize, amount: i64, reason: &str, flags: &mut Flags) -> Result<()> {
    let name = state.raider(id)?.display_name();
    flags.push(id, format!("{} was hurt by {}", name, reason));
    state.apply_damage(id, amount, None, None, flags)
}

fn weather_chip(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    let gen = state.gen;
    let weather = raider.field.effective_weather();
    let chipped = match weather {
        Some(Weather::Sand) => {
            ![Type::Rock, Type::Ground, Type::Steel].iter().any(|&t| raider.has_type(t))
                && !raider.has_any_ability(&SAND_IMMUNE_ABILITIES)
                && !raider.has_item("Safety Goggles")
        }
        Some(Weather::Hail) if gen.num() < 9 => {
            !raider.has_type(Type::Ice)
                && !raider.has_any_ability(&HAIL_IMMUNE_ABILITIES)
                && !raider.has_item("Safety Goggles")
        }
        _ => false,
    };
    if let (true, Some(weather)) = (chipped, weather) {
        let amount = fraction(state, id, 16)?;
        hurt(state, id, amount, weather.name(), flags)?;
    }
    Ok(())
}

fn grassy_heal(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    if raider.field.has_terrain(Terrain::Grassy) && is_grounded(raider, &raider.field) {
        let amount = fraction(state, id, 16)?;
        state.apply_healing(id, amount, flags)?;
    }
    Ok(())
}

fn status_damage(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let gen = state.gen;
    let raider = state.raider_mut(id)?;
    if raider.has_ability("Magic Guard") {
        return Ok(());
    }
    let max_hp = raider.max_hp as i64;
    let amount = match raider.status {
        Some(Status::Burn) => {
            let denominator = if gen.num() >= 7 { 16 } else { 8 };
            let denominator = if raider.has_ability("Heatproof") { denominator * 2 } else { denominator };
            Some((max_hp / denominator).max(1))
        }
        Some(Status::Poison) if !raider.has_ability("Poison Heal") => Some((max_hp / 8).max(1)),
        Some(Status::Toxic) if !raider.has_ability("Poison Heal") => {
            raider.toxic_counter = (raider.toxic_counter + 1).min(15);
            Some((max_hp * raider.toxic_counter as i64 / 16).max(1))
        }
        _ => None,
    };
    if let Some(amount) = amount {
        let reason = match raider.status {
            Some(Status::Burn) => "its burn",
            _ => "poison",
        };
        hurt(state, id, amount, reason, flags)?;
    }
    Ok(())
}

fn leech_seed(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    if !raider.field.attacker_side.has(SideFlags::SEEDED) || raider.has_ability("Magic Guard") {
        return Ok(());
    }
    let seeder = raider.volatile.leech_seeder;
    let amount = fraction(state, id, 8)?.min(raider.cur_hp as i64);
    hurt(state, id, amount, "Leech Seed", flags)?;

    let Some(seeder) = seeder.filter(|&s| s != id) else {
        return Ok(());
    };
    if state.raider(id)?.has_ability("Liquid Ooze") {
        hurt(state, seeder, amount, "the liquid ooze", flags)
    } else {
        let heal = if state.raider(seeder)?.has_item("Big Root") {
            amount * 13 / 10
        } else {
            amount
        };
        state.apply_healing(seeder, heal, flags)
    }
}

fn salt_cure(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    if !raider.volatile.has(Volatiles::SALT_CURED) || raider.has_ability("Magic Guard") {
        return Ok(());
    }
    let denominator = if raider.has_type(Type::Water) || raider.has_type(Type::Steel) {
        4
    } else {
        8
    };
    let amount = fraction(state, id, denominator)?;
    hurt(state, id, amount, "Salt Cure", flags)
}

fn rooted_heal(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    let sources = [Volatiles::INGRAINED, Volatiles::AQUA_RING]
        .iter()
        .filter(|&&v| raider.volatile.has(v))
        .count() as i64;
    if sources == 0 {
        return Ok(());
    }
    let big_root = raider.has_item("Big Root");
    let mut amount = fraction(state, id, 16)?;
    if big_root {
        amount = amount * 13 / 10;
    }
    state.apply_healing(id, amount * sources, flags)
}

fn run_hooks(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider(id)?;
    let ability_hook = raider
        .active_ability()
        .and_then(abilities::hooks)
        .and_then(|h| h.on_end_of_turn);
    let item_hook = raider
        .active_item()
        .and_then(items::hooks)
        .and_then(|h| h.on_end_of_turn);
    if let Some(hook) = ability_hook {
        hook(state, id, flags)?;
    }
    if let Some(hook) = item_hook {
        if !state.raider(id)?.is_fainted() {
            hook(state, id, flags)?;
        }
    }
    Ok(())
}

fn drowsiness(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let raider = state.raider_mut(id)?;
    if !raider.volatile.has(Volatiles::DROWSY) {
        return Ok(());
    }
    raider.volatile.yawn_turns = raider.volatile.yawn_turns.saturating_sub(1);
    if raider.volatile.yawn_turns == 0 {
        raider.volatile.set(Volatiles::DROWSY, false);
        state.apply_status(id, Status::Sleep, None, flags)?;
    }
    Ok(())
}

fn syrup_bomb(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    if state.raider(id)?.volatile.has(Volatiles::SYRUP_BOMBED) {
        state.apply_stat_change(id, Boosts::single(BoostId::Spe, -1), None, flags)?;
    }
    Ok(())
}

/// Residual damage, healing and timers for one combatant.
pub fn resolve_for(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    let steps: [fn(&mut RaidState, usize, &mut Flags) -> Result<()>; 9] = [
        weather_chip,
        grassy_heal,
        status_damage,
        leech_seed,
        salt_cure,
        rooted_heal,
        run_hooks,
        drowsiness,
        syrup_bomb,
    ];
    for step in steps {
        if state.raider(id)?.is_fainted() {
            break;
        }
        step(state, id, flags)?;
    }
    state.raider_mut(id)?.volatile.tick_turn_end();
    Ok(())
}

/// End-of-turn pass for the acting raider and the boss, ending with the
/// turn counters of both fields.
pub fn resolve(state: &mut RaidState, raider: usize, flags: &mut Flags) -> Result<()> {
    let mut ids = vec![crate::state::BOSS];
    if raider != crate::state::BOSS {
        ids.push(raider);
    }
    for &id in &ids {
        resolve_for(state, id, flags)?;
    }
    for &id in &ids {
        state.raider_mut(id)?.field.decrement_turns();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::StatTable;
    use crate::mechanics::Generation;
    use crate::state::Raider;
    use pretty_assertions::assert_eq;

    fn raider(name: &str, types: &[Type], hp: u32) -> Raider {
        Raider {
            name: name.to_string(),
            types: types.to_vec(),
            stats: StatTable::from_array([hp as u16, 100, 100, 100, 100, 100]),
            max_hp: hp,
            cur_hp: hp,
            ..Default::default()
        }
    }

    fn state() -> RaidState {
        RaidState::new(
            Generation::Gen9,
            vec![
                raider("Dondozo", &[Type::Water], 1600),
                raider("Amoonguss", &[Type::Grass, Type::Poison], 160),
            ],
        )
    }

    #[test]
    fn test_sand_chips_non_immune_types() {
        let mut s = state();
        for r in &mut s.raiders {
            r.field.set_weather(Some(Weather::Sand), 5);
        }
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[0].cur_hp, 1500);
        assert_eq!(s.raiders[1].cur_hp, 150);
        assert_eq!(s.raiders[1].field.weather_turns, 4);
    }

    #[test]
    fn test_toxic_ramps_up() {
        let mut s = state();
        s.raiders[0].status = Some(Status::Toxic);
        s.raiders[0].toxic_counter = 0;
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[0].cur_hp, 1500);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[0].cur_hp, 1300);
    }

    #[test]
    fn test_magic_guard_ignores_burn() {
        let mut s = state();
        s.raiders[1].status = Some(Status::Burn);
        s.raiders[1].ability = Some("Magic Guard".to_string());
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[1].cur_hp, 160);
    }

    #[test]
    fn test_leech_seed_drains_to_seeder() {
        let mut s = state();
        s.raiders[1].cur_hp = 100;
        s.raiders[0].field.attacker_side.set(SideFlags::SEEDED, true);
        s.raiders[0].volatile.leech_seeder = Some(1);
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[0].cur_hp, 1400);
        assert_eq!(s.raiders[1].cur_hp, 160);
    }

    #[test]
    fn test_salt_cure_hits_water_harder() {
        let mut s = state();
        s.raiders[0].volatile.set(Volatiles::SALT_CURED, true);
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[0].cur_hp, 1200);
    }

    #[test]
    fn test_yawn_puts_to_sleep_after_a_turn() {
        let mut s = state();
        s.raiders[1].volatile.set(Volatiles::DROWSY, true);
        s.raiders[1].volatile.yawn_turns = 2;
        let mut flags = Flags::new(2);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[1].status, None);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[1].status, Some(Status::Sleep));
        assert!(!s.raiders[1].volatile.has(Volatiles::DROWSY));
    }

    #[test]
    fn test_untouched_lane_keeps_its_counters() {
        let mut s = state();
        s.raiders.push(raider("Blissey", &[Type::Normal], 600));
        s = RaidState::new(Generation::Gen9, s.raiders);
        s.raiders[2].field.attacker_side.reflect = 5;
        s.raiders[1].field.attacker_side.reflect = 5;
        let mut flags = Flags::new(3);
        resolve(&mut s, 1, &mut flags).unwrap();
        assert_eq!(s.raiders[1].field.attacker_side.reflect, 4);
        assert_eq!(s.raiders[2].field.attacker_side.reflect, 5);
    }
}
