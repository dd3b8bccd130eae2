//! Type effectiveness with move- and field-specific exceptions.

use crate::core_data::MoveData;
use crate::state::{Field, Raider, SideFlags, Volatiles, Weather};
use crate::types::{combine_effectiveness, type_effectiveness, Type, NEUTRAL};

/// Effectiveness (4-scale) of a move against a single defending type.
///
/// * `ignore_immunity` - Normal/Fighting hit Ghost (Scrappy, Foresight, Ring Target)
/// * `grounded` - Ground hits Flying (Gravity, Iron Ball, Smack Down)
pub fn move_effectiveness(
    move_name: &str,
    move_type: Type,
    defending: Type,
    ignore_immunity: bool,
    grounded: bool,
) -> u8 {
    if move_name == "Freeze-Dry" && defending == Type::Water {
        return 8;
    }

    let eff = if move_name == "Flying Press" {
        combine_effectiveness(
            type_effectiveness(Type::Fighting, defending),
            type_effectiveness(Type::Flying, defending),
        )
    } else {
        type_effectiveness(move_type, defending)
    };

    if eff == 0 {
        let ghost_hit = ignore_immunity
            && defending == Type::Ghost
            && matches!(move_type, Type::Normal | Type::Fighting);
        let ground_hit = grounded && defending == Type::Flying && move_type == Type::Ground;
        if ghost_hit || ground_hit {
            return NEUTRAL;
        }
    }
    eff
}

/// Whether the combatant is affected by terrain and Ground moves.
pub fn is_grounded(raider: &Raider, field: &Field) -> bool {
    if field.is_gravity()
        || raider.has_item("Iron Ball")
        || raider.volatile.has(Volatiles::SMACKED_DOWN)
        || raider.volatile.has(Volatiles::INGRAINED)
    {
        return true;
    }
    let roosted = raider.last_move.as_deref() == Some("Roost");
    let flying = raider.has_type(Type::Flying) && !roosted;
    !(flying || raider.has_ability("Levitate") || raider.has_item("Air Balloon"))
}

/// Total effectiveness (4-scale) of `move_type` from `attacker` against `defender`.
pub fn defender_effectiveness(
    attacker: &Raider,
    defender: &Raider,
    move_data: &MoveData,
    move_type: Type,
    field: &Field,
) -> u8 {
    if move_data.name == "Tera Blast" && move_type == Type::Stellar {
        return if defender.is_tera { 8 } else { NEUTRAL };
    }

    let ignore_immunity = attacker.has_any_ability(&["Scrappy", "Mind's Eye"])
        || field.defender_side.has(SideFlags::FORESIGHT)
        || defender.has_item("Ring Target");
    let forced_ground = field.is_gravity()
        || defender.has_item("Iron Ball")
        || defender.volatile.has(Volatiles::SMACKED_DOWN)
        || defender.volatile.has(Volatiles::INGRAINED);
    let strong_winds = field.has_weather(&[Weather::StrongWinds]);

    let mut eff = NEUTRAL;
    for defending in defender.effective_types() {
        let mut single = move_effectiveness(
            &move_data.name,
            move_type,
            defending,
            ignore_immunity,
            forced_ground,
        );
        if move_data.name == "Thousand Arrows" && defending == Type::Flying && single == 0 {
            single = NEUTRAL;
        }
        if strong_winds && defending == Type::Flying && single > NEUTRAL {
            single = NEUTRAL;
        }
        eff = combine_effectiveness(eff, single);
    }

    if move_type == Type::Fire && defender.volatile.has(Volatiles::TAR_SHOT) {
        eff = eff.saturating_mul(2);
    }
    eff
}

#[inline]
pub fn is_super_effective(effectiveness: u8) -> bool {
    effectiveness > NEUTRAL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_types(types: &[Type]) -> Raider {
        Raider {
            types: types.to_vec(),
            ..Default::default()
        }
    }

    fn data(name: &str) -> MoveData {
        MoveData::unknown(name)
    }

    #[test]
    fn test_freeze_dry_and_flying_press() {
        assert_eq!(move_effectiveness("Freeze-Dry", Type::Ice, Type::Water, false, false), 8);
        assert_eq!(move_effectiveness("Ice Beam", Type::Ice, Type::Water, false, false), 2);
        // Fighting is neutral on Grass, Flying is super effective
        assert_eq!(
            move_effectiveness("Flying Press", Type::Fighting, Type::Grass, false, false),
            8
        );
    }

    #[test]
    fn test_ring_target_and_gravity() {
        assert_eq!(move_effectiveness("Tackle", Type::Normal, Type::Ghost, true, false), 4);
        assert_eq!(move_effectiveness("Earthquake", Type::Ground, Type::Flying, false, true), 4);
        assert_eq!(move_effectiveness("Earthquake", Type::Ground, Type::Flying, false, false), 0);
    }

    #[test]
    fn test_defender_tera_and_tar_shot() {
        let attacker = with_types(&[Type::Water]);
        let mut defender = with_types(&[Type::Grass]);
        let field = Field::new();
        let mv = data("Flamethrower");
        assert_eq!(defender_effectiveness(&attacker, &defender, &mv, Type::Fire, &field), 8);
        defender.volatile.set(Volatiles::TAR_SHOT, true);
        assert_eq!(defender_effectiveness(&attacker, &defender, &mv, Type::Fire, &field), 16);

        defender.tera_type = Some(Type::Water);
        defender.is_tera = true;
        assert_eq!(defender_effectiveness(&attacker, &defender, &mv, Type::Fire, &field), 4);
    }

    #[test]
    fn test_grounded() {
        let field = Field::new();
        let mut flyer = with_types(&[Type::Flying]);
        assert!(!is_grounded(&flyer, &field));
        flyer.item = Some("Iron Ball".to_string());
        assert!(is_grounded(&flyer, &field));
        let mut floater = with_types(&[Type::Ghost]);
        floater.ability = Some("Levitate".to_string());
        assert!(!is_grounded(&floater, &field));
    }
}
