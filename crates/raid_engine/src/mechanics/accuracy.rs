//! Hit and critical-hit probabilities.

use crate::core_data::{MoveData, MoveFlags, Status};
use crate::mechanics::formula::{acc_eva_ratio, apply_modifier};
use crate::mechanics::Generation;
use crate::state::{Field, Raider, SideFlags, Volatiles, Weather};
use crate::types::Type;

/// Abilities that let the attacker ignore the target's ability.
pub const MOLD_BREAKERS: [&str; 3] = ["Mold Breaker", "Teravolt", "Turboblaze"];

/// Probability in [0, 1] that the move lands.
pub fn hit_chance(attacker: &Raider, defender: &Raider, move_data: &MoveData, field: &Field) -> f64 {
    let Some(base) = move_data.accuracy else {
        return 1.0;
    };
    if move_data.has_flag(MoveFlags::SURE_HIT)
        || attacker.has_ability("No Guard")
        || defender.has_ability("No Guard")
    {
        return 1.0;
    }
    if move_data.name == "Toxic" && attacker.has_type(Type::Poison) {
        return 1.0;
    }

    let weather = field.effective_weather();
    let mut accuracy = base as u32;
    match move_data.name.as_str() {
        "Thunder" | "Hurricane" => {
            if weather.is_some_and(Weather::is_rain) {
                return 1.0;
            }
            if weather.is_some_and(Weather::is_sun) {
                accuracy = 50;
            }
        }
        "Blizzard" if matches!(weather, Some(Weather::Hail | Weather::Snow)) => return 1.0,
        _ => {}
    }

    let ignores_evasion = attacker.has_any_ability(&["Unaware", "Keen Eye", "Mind's Eye"]);
    let evasion = if ignores_evasion { 0 } else { defender.boosts.evasion };
    let evasion = if field.defender_side.has(SideFlags::FORESIGHT) {
        evasion.min(0)
    } else {
        evasion
    };
    let stage = (attacker.boosts.accuracy - evasion).clamp(-6, 6);
    let (num, den) = acc_eva_ratio(stage);
    accuracy = accuracy * num / den;

    let mold_breaker = attacker.has_any_ability(&MOLD_BREAKERS);
    let mut mods: Vec<u16> = Vec::new();
    if attacker.has_ability("Compound Eyes") {
        mods.push(5325);
    }
    if attacker.has_ability("Hustle") && move_data.is_physical() {
        mods.push(3277);
    }
    if attacker.has_ability("Victory Star") {
        mods.push(4506);
    }
    if attacker.has_item("Wide Lens") {
        mods.push(4505);
    }
    if field.is_gravity() {
        mods.push(6840);
    }
    if defender.has_item("Bright Powder") {
        mods.push(3686);
    }
    if !mold_breaker {
        if (defender.has_ability("Sand Veil") && weather == Some(Weather::Sand))
            || (defender.has_ability("Snow Cloak")
                && matches!(weather, Some(Weather::Hail | Weather::Snow)))
        {
            mods.push(3277);
        }
        if defender.has_ability("Tangled Feet") && defender.volatile.has(Volatiles::CONFUSED) {
            mods.push(2048);
        }
    }
    for m in mods {
        accuracy = apply_modifier(accuracy, m);
    }

    (accuracy.min(100) as f64) / 100.0
}

/// Probability in [0, 1] of a critical hit.
pub fn crit_chance(gen: Generation, attacker: &Raider, defender: &Raider, move_data: &MoveData) -> f64 {
    if move_data.is_status() {
        return 0.0;
    }
    let mold_breaker = attacker.has_any_ability(&MOLD_BREAKERS);
    if !mold_breaker && defender.has_any_ability(&["Battle Armor", "Shell Armor"]) {
        return 0.0;
    }
    if move_data.crit_rate >= 3 {
        return 1.0;
    }
    if attacker.has_ability("Merciless")
        && defender.status.is_some_and(Status::is_poison)
    {
        return 1.0;
    }

    let mut stage = move_data.crit_rate as usize;
    if attacker.is_pumped {
        stage += 2;
    }
    if attacker.has_ability("Super Luck") {
        stage += 1;
    }
    if attacker.has_item("Scope Lens") || attacker.has_item("Razor Claw") {
        stage += 1;
    }
    let denominators = gen.crit_denominators();
    1.0 / denominators[stage.min(denominators.len() - 1)] as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_with(name: &str, accuracy: Option<u8>) -> MoveData {
        MoveData {
            accuracy,
            ..MoveData::unknown(name)
        }
    }

    #[test]
    fn test_sure_hit_and_stages() {
        let attacker = Raider::default();
        let mut defender = Raider::default();
        let field = Field::new();
        assert_eq!(hit_chance(&attacker, &defender, &move_with("Swift", None), &field), 1.0);
        assert_eq!(hit_chance(&attacker, &defender, &move_with("Stone Edge", Some(80)), &field), 0.8);
        defender.boosts.evasion = 1;
        assert_eq!(hit_chance(&attacker, &defender, &move_with("Tackle", Some(100)), &field), 0.75);
    }

    #[test]
    fn test_weather_accuracy() {
        let attacker = Raider::default();
        let defender = Raider::default();
        let mut field = Field::new();
        let thunder = move_with("Thunder", Some(70));
        field.set_weather(Some(Weather::Rain), 5);
        assert_eq!(hit_chance(&attacker, &defender, &thunder, &field), 1.0);
        field.set_weather(Some(Weather::Sun), 5);
        assert_eq!(hit_chance(&attacker, &defender, &thunder, &field), 0.5);
    }

    #[test]
    fn test_crit_stages() {
        let gen = Generation::Gen9;
        let mut attacker = Raider::default();
        let defender = Raider::default();
        let mv = MoveData {
            category: crate::core_data::MoveCategory::Physical,
            ..MoveData::unknown("Tackle")
        };
        assert_eq!(crit_chance(gen, &attacker, &defender, &mv), 1.0 / 24.0);
        attacker.is_pumped = true;
        assert_eq!(crit_chance(gen, &attacker, &defender, &mv), 0.5);
        attacker.item = Some("Scope Lens".to_string());
        assert_eq!(crit_chance(gen, &attacker, &defender, &mv), 1.0);
    }
}
