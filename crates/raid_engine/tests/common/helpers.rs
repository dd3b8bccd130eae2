//! Builders for small raid states.

use raid_engine::{Generation, RaidState, Raider, RaiderConfig, StatTable, Type};

/// A bare combatant with hand-picked stats, no ability and no item.
pub fn plain_raider(name: &str, hp: u32, speed: u16) -> Raider {
    Raider {
        name: name.to_string(),
        types: vec![Type::Normal],
        stats: StatTable::from_array([hp as u16, 150, 150, 150, 150, speed]),
        max_hp: hp,
        cur_hp: hp,
        ..Default::default()
    }
}

/// A boss plus one raider per entry, all built from the species catalog.
pub fn built_state(boss: RaiderConfig, raiders: Vec<RaiderConfig>) -> RaidState {
    let mut all = vec![boss.role("Tera Raid Boss").build(0).expect("boss builds")];
    for (i, config) in raiders.into_iter().enumerate() {
        let id = i + 1;
        let raider = config
            .role(&format!("Raider {}", id))
            .build(id)
            .expect("raider builds");
        all.push(raider);
    }
    RaidState::new(Generation::Gen9, all)
}

/// Boss plus two plain raiders: the boss is slowest, slot 2 fastest.
pub fn three_slot_state() -> RaidState {
    RaidState::new(
        Generation::Gen9,
        vec![
            plain_raider("Blissey", 3000, 60),
            plain_raider("Eevee", 250, 90),
            plain_raider("Pikachu", 200, 140),
        ],
    )
}
