use super::*;
use crate::core_data::{MoveCategory, MoveData};
use crate::damage::DamageContext;
use crate::mechanics::Generation;
use crate::state::{Field, Raider};
use crate::types::Type;

#[test]
fn test_registry_lookup() {
    assert!(hooks("Intimidate").and_then(|h| h.on_switch_in).is_some());
    assert!(hooks("Multiscale").and_then(|h| h.on_foe_final_modifier).is_some());
    assert!(hooks("Run Away").is_none());
}

#[test]
fn test_shared_hooks_behave_alike() {
    let attacker = Raider::default();
    let defender = Raider {
        max_hp: 100,
        cur_hp: 100,
        ..Default::default()
    };
    let field = Field::new();
    let mv = MoveData {
        move_type: Type::Ice,
        category: MoveCategory::Special,
        ..MoveData::unknown("Ice Beam")
    };
    let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
    for name in ["Multiscale", "Shadow Shield"] {
        let hook = hooks(name).and_then(|h| h.on_foe_final_modifier).unwrap();
        assert_eq!(hook(&ctx), Some(2048));
    }
}

#[test]
fn test_ate_ability_pairs_type_and_power() {
    let entry = hooks("Pixilate").unwrap();
    assert!(entry.on_modify_type.is_some());
    assert!(entry.on_modify_base_power.is_some());
}
