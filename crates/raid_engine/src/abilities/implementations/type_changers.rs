//! Abilities that change a move's type (-ate abilities, Normalize, Liquid Voice).

use crate::core_data::{MoveData, MoveFlags};
use crate::types::Type;

/// Moves whose type is decided elsewhere and that -ate abilities leave alone.
const FIXED_TYPE_MOVES: [&str; 8] = [
    "Hidden Power",
    "Judgment",
    "Multi-Attack",
    "Natural Gift",
    "Revelation Dance",
    "Techno Blast",
    "Terrain Pulse",
    "Weather Ball",
];

fn normal_to(move_data: &MoveData, move_type: Type, to: Type) -> Option<Type> {
    if move_type == Type::Normal && !move_data.is_status() && !FIXED_TYPE_MOVES.contains(&move_data.name.as_str()) {
        Some(to)
    } else {
        None
    }
}

pub fn pixilate(move_data: &MoveData, move_type: Type) -> Option<Type> {
    normal_to(move_data, move_type, Type::Fairy)
}

pub fn aerilate(move_data: &MoveData, move_type: Type) -> Option<Type> {
    normal_to(move_data, move_type, Type::Flying)
}

pub fn refrigerate(move_data: &MoveData, move_type: Type) -> Option<Type> {
    normal_to(move_data, move_type, Type::Ice)
}

pub fn galvanize(move_data: &MoveData, move_type: Type) -> Option<Type> {
    normal_to(move_data, move_type, Type::Electric)
}

pub fn normalize(move_data: &MoveData, move_type: Type) -> Option<Type> {
    if move_type == Type::Normal || move_data.is_status() || FIXED_TYPE_MOVES.contains(&move_data.name.as_str()) {
        None
    } else {
        Some(Type::Normal)
    }
}

pub fn liquid_voice(move_data: &MoveData, move_type: Type) -> Option<Type> {
    if move_data.has_flag(MoveFlags::SOUND) && move_type != Type::Water {
        Some(Type::Water)
    } else {
        None
    }
}
