use crate::core_data::{MoveData, MoveFlags};
use crate::state::Raider;
use crate::types::Type;

pub fn prankster(_raider: &Raider, move_data: &MoveData, base: i8) -> i8 {
    if move_data.is_status() {
        base + 1
    } else {
        base
    }
}

pub fn gale_wings(raider: &Raider, move_data: &MoveData, base: i8) -> i8 {
    // Gen 7+: only at full HP
    if raider.is_full_hp() && move_data.move_type == Type::Flying {
        base + 1
    } else {
        base
    }
}

pub fn triage(_raider: &Raider, move_data: &MoveData, base: i8) -> i8 {
    if move_data.has_flag(MoveFlags::HEAL) || move_data.drain > 0 {
        base + 3
    } else {
        base
    }
}
