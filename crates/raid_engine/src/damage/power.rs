//! Move-specific type, category and base power.
//!
//! These run before any ability or item hook sees the move, so the hooks
//! always observe the final type and the unmodified variable power.

use crate::core_data::{MoveCategory, StatId};
use crate::damage::context::DamageContext;
use crate::mechanics::stats::effective_weight;
use crate::mechanics::{count_boosts, get_final_speed, get_modified_stat};
use crate::state::{Terrain, Weather};
use crate::types::Type;

/// Moves whose power is computed here rather than read from the catalog.
pub fn is_variable_power(name: &str) -> bool {
    matches!(
        name,
        "Low Kick"
            | "Grass Knot"
            | "Heavy Slam"
            | "Heat Crash"
            | "Eruption"
            | "Water Spout"
            | "Dragon Energy"
            | "Flail"
            | "Reversal"
            | "Stored Power"
            | "Power Trip"
            | "Punishment"
            | "Gyro Ball"
            | "Electro Ball"
            | "Crush Grip"
            | "Wring Out"
            | "Hard Press"
            | "Rage Fist"
            | "Return"
            | "Frustration"
            | "Fling"
    )
}

// ============================================================================
// Type
// ============================================================================

/// Type of the move before -ate abilities.
pub fn move_type(ctx: &DamageContext<'_>) -> Type {
    let attacker = ctx.attacker;
    match ctx.move_data.name.as_str() {
        "Weather Ball" => match ctx.field.effective_weather() {
            Some(w) if w.is_sun() => Type::Fire,
            Some(w) if w.is_rain() => Type::Water,
            Some(Weather::Sand) => Type::Rock,
            Some(Weather::Snow | Weather::Hail) => Type::Ice,
            _ => Type::Normal,
        },
        "Terrain Pulse" if ctx.attacker_grounded => match ctx.field.effective_terrain() {
            Some(Terrain::Electric) => Type::Electric,
            Some(Terrain::Grassy) => Type::Grass,
            Some(Terrain::Misty) => Type::Fairy,
            Some(Terrain::Psychic) => Type::Psychic,
            None => Type::Normal,
        },
        "Tera Blast" | "Tera Starstorm" if attacker.is_tera => {
            attacker.tera_type.unwrap_or(ctx.move_data.move_type)
        }
        "Revelation Dance" => {
            if attacker.is_tera {
                attacker.tera_type.unwrap_or(Type::Normal)
            } else {
                attacker.types.first().copied().unwrap_or(Type::Normal)
            }
        }
        "Struggle" => Type::Unknown,
        _ => ctx.move_data.move_type,
    }
}

// ============================================================================
// Category
// ============================================================================

fn staged(ctx: &DamageContext<'_>, stat: StatId, attacker: bool) -> u32 {
    let raider = if attacker { ctx.attacker } else { ctx.defender };
    get_modified_stat(raider.stat(stat), raider.boosts.stat(stat), ctx.gen)
}

/// Category after Tera Blast, Photon Geyser and Shell Side Arm pick a side.
pub fn move_category(ctx: &DamageContext<'_>) -> MoveCategory {
    let data = ctx.move_data;
    match data.name.as_str() {
        "Tera Blast" if !ctx.attacker.is_tera => data.category,
        "Tera Blast" | "Photon Geyser" | "Tera Starstorm" => {
            if staged(ctx, StatId::Atk, true) > staged(ctx, StatId::Spa, true) {
                MoveCategory::Physical
            } else {
                MoveCategory::Special
            }
        }
        "Shell Side Arm" => {
            let physical = staged(ctx, StatId::Atk, true) as f64 / staged(ctx, StatId::Def, false).max(1) as f64;
            let special = staged(ctx, StatId::Spa, true) as f64 / staged(ctx, StatId::Spd, false).max(1) as f64;
            if physical > special {
                MoveCategory::Physical
            } else {
                MoveCategory::Special
            }
        }
        _ => data.category,
    }
}

// ============================================================================
// Base power
// ============================================================================

fn weight_power(weight: f64) -> u32 {
    match weight {
        w if w >= 200.0 => 120,
        w if w >= 100.0 => 100,
        w if w >= 50.0 => 80,
        w if w >= 25.0 => 60,
        w if w >= 10.0 => 40,
        _ => 20,
    }
}

fn weight_ratio_power(ratio: f64) -> u32 {
    match ratio {
        r if r >= 5.0 => 120,
        r if r >= 4.0 => 100,
        r if r >= 3.0 => 80,
        r if r >= 2.0 => 60,
        _ => 40,
    }
}

fn flail_power(cur: u32, max: u32) -> u32 {
    match 48 * cur / max.max(1) {
        0..=1 => 200,
        2..=4 => 150,
        5..=9 => 100,
        10..=16 => 80,
        17..=32 => 40,
        _ => 20,
    }
}

/// Fling power of a held item. 0 means Fling fails.
pub fn fling_power(item: Option<&str>) -> u32 {
    let Some(item) = item else {
        return 0;
    };
    match item {
        "Iron Ball" => 130,
        "Hard Stone" | "Room Service" => 100,
        "Poison Barb" | "Dragon Fang" => 70,
        "Sharp Beak" | "Rocky Helmet" | "Eviolite" => 60,
        "Black Belt" | "Black Sludge" | "Mystic Water" | "Never-Melt Ice" | "Spell Tag"
        | "Twisted Spoon" | "Miracle Seed" | "Magnet" | "Charcoal" => 30,
        "Light Ball" | "Flame Orb" | "Toxic Orb" | "Life Orb" | "Booster Energy" => 30,
        name if name.ends_with("Berry") => 10,
        "White Herb" | "Mental Herb" | "Power Herb" | "Mirror Herb" | "Choice Band" | "Choice Specs"
        | "Choice Scarf" | "Focus Sash" | "Leftovers" | "Silk Scarf" | "Expert Belt" | "Wide Lens"
        | "Shell Bell" | "Soft Sand" | "Loaded Dice" | "Covert Cloak" | "Clear Amulet" => 10,
        _ => 30,
    }
}

/// Base power before the modifier chain. 0 means the move does no damage.
pub fn base_power(ctx: &DamageContext<'_>) -> u32 {
    let attacker = ctx.attacker;
    let defender = ctx.defender;
    let data = ctx.move_data;
    let catalog = data.power as u32;

    match data.name.as_str() {
        // ====================================================================
        // Weight
        // ====================================================================
        "Low Kick" | "Grass Knot" => weight_power(effective_weight(defender)),
        "Heavy Slam" | "Heat Crash" => {
            let target = effective_weight(defender).max(0.1);
            weight_ratio_power(effective_weight(attacker) / target)
        }

        // ====================================================================
        // HP
        // ====================================================================
        "Eruption" | "Water Spout" | "Dragon Energy" => {
            (150 * attacker.cur_hp / attacker.max_hp.max(1)).max(1)
        }
        "Flail" | "Reversal" => flail_power(attacker.cur_hp, attacker.max_hp),
        "Crush Grip" | "Wring Out" => {
            let power = 120 * defender.cur_hp as u64 / defender.max_hp.max(1) as u64;
            (power as u32).max(1)
        }
        "Hard Press" => {
            let power = 100 * defender.cur_hp as u64 / defender.max_hp.max(1) as u64;
            (power as u32).max(1)
        }

        // ====================================================================
        // Stages and speed
        // ====================================================================
        "Stored Power" | "Power Trip" => 20 + 20 * count_boosts(ctx.gen, &attacker.boosts),
        "Punishment" => (60 + 20 * count_boosts(ctx.gen, &defender.boosts)).min(200),
        "Gyro Ball" => {
            let own = get_final_speed(ctx.gen, attacker, ctx.field).max(1);
            let target = get_final_speed(ctx.gen, defender, &ctx.field.swapped());
            (25 * target / own + 1).min(150)
        }
        "Electro Ball" => {
            let own = get_final_speed(ctx.gen, attacker, ctx.field);
            let target = get_final_speed(ctx.gen, defender, &ctx.field.swapped()).max(1);
            match own / target {
                0 => 40,
                1 => 60,
                2 => 80,
                3 => 120,
                _ => 150,
            }
        }

        // ====================================================================
        // Field
        // ====================================================================
        "Weather Ball" if ctx.field.effective_weather().is_some_and(|w| w != Weather::StrongWinds) => {
            catalog * 2
        }
        "Terrain Pulse" if ctx.attacker_grounded && ctx.field.effective_terrain().is_some() => catalog * 2,

        // ====================================================================
        // Battle history
        // ====================================================================
        "Rage Fist" => (50 + 50 * attacker.hits_taken).min(350),
        "Triple Axel" => catalog * ctx.hit_index.max(1) as u32,
        "Triple Kick" => catalog * ctx.hit_index.max(1) as u32,
        "Return" | "Frustration" => 102,
        "Fling" => fling_power(attacker.active_item()),

        "Tera Blast" if attacker.is_tera && attacker.tera_type == Some(Type::Stellar) => 100,
        _ => catalog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{Boosts, MoveData};
    use crate::mechanics::Generation;
    use crate::state::{Field, Raider};

    fn named(name: &str, power: u16) -> MoveData {
        MoveData {
            power,
            category: MoveCategory::Physical,
            ..MoveData::unknown(name)
        }
    }

    #[test]
    fn test_weight_moves() {
        let attacker = Raider {
            weight_kg: 95.0,
            ..Default::default()
        };
        let defender = Raider {
            weight_kg: 202.0,
            ..Default::default()
        };
        let field = Field::new();
        let low_kick = named("Low Kick", 0);
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &low_kick, &field);
        assert_eq!(base_power(&ctx), 120);

        let heavy_slam = named("Heavy Slam", 0);
        let ctx = DamageContext::new(Generation::Gen9, &defender, &attacker, &heavy_slam, &field);
        assert_eq!(base_power(&ctx), 60);
    }

    #[test]
    fn test_fling_power_follows_item() {
        assert_eq!(fling_power(None), 0);
        assert_eq!(fling_power(Some("Iron Ball")), 130);
        assert_eq!(fling_power(Some("Sitrus Berry")), 10);
        assert_eq!(fling_power(Some("Flame Orb")), 30);
    }

    #[test]
    fn test_flail_thresholds() {
        assert_eq!(flail_power(1, 100), 200);
        assert_eq!(flail_power(10, 100), 150);
        assert_eq!(flail_power(100, 100), 20);
    }

    #[test]
    fn test_stored_power_counts_raised_stages() {
        let attacker = Raider {
            boosts: Boosts {
                spa: 2,
                spd: 2,
                atk: -1,
                ..Default::default()
            },
            ..Default::default()
        };
        let defender = Raider::default();
        let field = Field::new();
        let stored_power = named("Stored Power", 20);
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &stored_power, &field);
        assert_eq!(base_power(&ctx), 100);
    }

    #[test]
    fn test_weather_ball_type_and_power() {
        let attacker = Raider::default();
        let defender = Raider::default();
        let mut field = Field::new();
        field.set_weather(Some(Weather::Rain), 5);
        let weather_ball = named("Weather Ball", 50);
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &weather_ball, &field);
        assert_eq!(move_type(&ctx), Type::Water);
        assert_eq!(base_power(&ctx), 100);
    }

    #[test]
    fn test_tera_blast_category_follows_stats() {
        let mut attacker = Raider {
            tera_type: Some(Type::Fire),
            is_tera: true,
            ..Default::default()
        };
        attacker.stats.atk = 200;
        attacker.stats.spa = 100;
        let defender = Raider::default();
        let field = Field::new();
        let tera_blast = MoveData {
            power: 80,
            category: MoveCategory::Special,
            move_type: Type::Normal,
            ..MoveData::unknown("Tera Blast")
        };
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &tera_blast, &field);
        assert_eq!(move_category(&ctx), MoveCategory::Physical);
        assert_eq!(move_type(&ctx), Type::Fire);
    }
}
