//! Stat stages, final speed and Protosynthesis / Quark Drive stat selection.

use crate::core_data::{BoostId, Boosts, StatId, Status};
use crate::mechanics::formula::{apply_boost, chain_mods, of32, pokeround, SPEED_BOUNDS};
use crate::mechanics::Generation;
use crate::state::{Field, Raider, Terrain, Weather};

/// Gen 1-2 stage multipliers for raised stats, as (num, den).
const LEGACY_RAISE: [(u32, u32); 7] = [(2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (7, 2), (8, 2)];
/// Gen 1-2 stage multipliers for lowered stats, in percent.
const LEGACY_DROP: [u32; 7] = [100, 66, 50, 40, 33, 28, 25];

/// Apply a stat stage to a raw stat.
///
/// Gen 1-2 use the percentage table and clamp to [1, 999]; later generations
/// use the 2/(2-n) table with 16-bit wrapping.
pub fn get_modified_stat(stat: u32, stage: i8, gen: Generation) -> u32 {
    let stage = stage.clamp(-6, 6);
    if gen.uses_legacy_stages() {
        let value = if stage >= 0 {
            let (num, den) = LEGACY_RAISE[stage as usize];
            stat * num / den
        } else {
            stat * LEGACY_DROP[(-stage) as usize] / 100
        };
        return value.clamp(1, 999);
    }
    apply_boost(stat, stage)
}

/// Items that halve speed.
const SPEED_HALVING_ITEMS: [&str; 7] = [
    "Iron Ball",
    "Macho Brace",
    "Power Anklet",
    "Power Band",
    "Power Belt",
    "Power Bracer",
    "Power Lens",
];

/// Speed after stages and every speed modifier.
///
/// `field.attacker_side` must be the combatant's own side.
pub fn get_final_speed(gen: Generation, raider: &Raider, field: &Field) -> u32 {
    let weather = field.effective_weather();
    let terrain = field.effective_terrain();
    let mut speed = get_modified_stat(raider.stat(StatId::Spe), raider.boosts.spe, gen);

    let mut mods: Vec<u16> = Vec::new();
    if field.attacker_side.tailwind > 0 {
        mods.push(8192);
    }

    let sun = weather.is_some_and(Weather::is_sun);
    let rain = weather.is_some_and(Weather::is_rain);
    if (raider.has_ability("Unburden") && raider.ability_on)
        || (raider.has_ability("Chlorophyll") && sun)
        || (raider.has_ability("Sand Rush") && weather == Some(Weather::Sand))
        || (raider.has_ability("Swift Swim") && rain)
        || (raider.has_ability("Slush Rush") && matches!(weather, Some(Weather::Hail | Weather::Snow)))
        || (raider.has_ability("Surge Surfer") && terrain == Some(Terrain::Electric))
    {
        mods.push(8192);
    } else if raider.has_ability("Quick Feet") && raider.status.is_some() {
        mods.push(6144);
    } else if raider.has_ability("Slow Start") && raider.ability_on {
        mods.push(2048);
    } else if raider.is_qp_active()
        && get_qp_boosted_stat(raider, field.is_wonder_room(), gen) == StatId::Spe
    {
        mods.push(6144);
    }

    if raider.has_item("Choice Scarf") {
        mods.push(6144);
    } else if raider
        .active_item()
        .is_some_and(|item| SPEED_HALVING_ITEMS.contains(&item))
    {
        mods.push(2048);
    } else if raider.has_item("Quick Powder") && raider.name == "Ditto" {
        mods.push(8192);
    }

    let chained = chain_mods(&mods, SPEED_BOUNDS.0, SPEED_BOUNDS.1);
    speed = pokeround(of32(speed as u64 * chained as u64), 4096);

    if raider.has_status(Status::Paralysis) && !raider.has_ability("Quick Feet") {
        speed = of32(speed as u64 * gen.paralysis_speed_percent() as u64) / 100;
    }

    speed.min(gen.speed_cap())
}

/// The stat Protosynthesis / Quark Drive boosts: an explicit choice, or the
/// highest staged stat (ties resolved in Atk, Def, SpA, SpD, Spe order).
///
/// Under Wonder Room the Def / SpD choice is swapped.
pub fn get_qp_boosted_stat(raider: &Raider, wonder_room: bool, gen: Generation) -> StatId {
    let best = match raider.boosted_stat {
        Some(stat) => stat,
        None => {
            let mut best = StatId::Atk;
            let mut best_value = get_modified_stat(raider.stat(best), raider.boosts.stat(best), gen);
            for stat in [StatId::Def, StatId::Spa, StatId::Spd, StatId::Spe] {
                let value = get_modified_stat(raider.stat(stat), raider.boosts.stat(stat), gen);
                if value > best_value {
                    best = stat;
                    best_value = value;
                }
            }
            best
        }
    };
    if wonder_room {
        return match best {
            StatId::Def => StatId::Spd,
            StatId::Spd => StatId::Def,
            other => other,
        };
    }
    best
}

/// Sum of raised stages (Stored Power, Power Trip). Gen 9 counts accuracy and
/// evasion too.
pub fn count_boosts(gen: Generation, boosts: &Boosts) -> u32 {
    let stats: &[BoostId] = match gen {
        Generation::Gen1 => &[BoostId::Atk, BoostId::Def, BoostId::Spa, BoostId::Spe],
        Generation::Gen9 => &BoostId::ALL,
        _ => &[BoostId::Atk, BoostId::Def, BoostId::Spa, BoostId::Spd, BoostId::Spe],
    };
    stats
        .iter()
        .map(|&id| boosts.get(id).max(0) as u32)
        .sum()
}

/// Weight after Heavy Metal, Light Metal and Float Stone.
pub fn effective_weight(raider: &Raider) -> f64 {
    let factor = if raider.has_ability("Heavy Metal") {
        2.0
    } else if raider.has_ability("Light Metal") || raider.has_item("Float Stone") {
        0.5
    } else {
        1.0
    };
    raider.weight_kg * factor
}
