//! Elemental types and the type chart.
//!
//! Effectiveness is expressed on a 4-scale so that every product of two
//! single-type matchups stays an integer: 0 = immune, 1 = 0.25x, 2 = 0.5x,
//! 4 = neutral, 8 = 2x, 16 = 4x.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
    Stellar = 18,
    #[serde(other)]
    Unknown = 255,
}

impl Default for Type {
    fn default() -> Self {
        Type::Normal
    }
}

/// Neutral effectiveness on the 4-scale.
pub const NEUTRAL: u8 = 4;

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fighting => "Fighting",
            Type::Flying => "Flying",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Rock => "Rock",
            Type::Bug => "Bug",
            Type::Ghost => "Ghost",
            Type::Steel => "Steel",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Grass => "Grass",
            Type::Electric => "Electric",
            Type::Psychic => "Psychic",
            Type::Ice => "Ice",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Fairy => "Fairy",
            Type::Stellar => "Stellar",
            Type::Unknown => "???",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Type> {
        let lower = name.trim().to_ascii_lowercase();
        Type::ALL
            .iter()
            .copied()
            .chain(std::iter::once(Type::Stellar))
            .find(|t| t.name().to_ascii_lowercase() == lower)
    }
}

/// Effectiveness of one attacking type against one defending type (4-scale).
pub fn type_effectiveness(attacking: Type, defending: Type) -> u8 {
    use Type::*;

    const SUPER: u8 = 8;
    const RESIST: u8 = 2;
    const IMMUNE: u8 = 0;

    if matches!(attacking, Stellar | Unknown) || matches!(defending, Stellar | Unknown) {
        return NEUTRAL;
    }

    match (attacking, defending) {
        // ====================================================================
        // Immunities
        // ====================================================================
        (Normal, Ghost)
        | (Fighting, Ghost)
        | (Poison, Steel)
        | (Ground, Flying)
        | (Ghost, Normal)
        | (Electric, Ground)
        | (Psychic, Dark)
        | (Dragon, Fairy) => IMMUNE,

        // ====================================================================
        // Super effective
        // ====================================================================
        (Fighting, Normal | Rock | Steel | Ice | Dark)
        | (Flying, Fighting | Bug | Grass)
        | (Poison, Grass | Fairy)
        | (Ground, Poison | Rock | Steel | Fire | Electric)
        | (Rock, Flying | Bug | Fire | Ice)
        | (Bug, Grass | Psychic | Dark)
        | (Ghost, Ghost | Psychic)
        | (Steel, Rock | Ice | Fairy)
        | (Fire, Bug | Steel | Grass | Ice)
        | (Water, Ground | Rock | Fire)
        | (Grass, Ground | Rock | Water)
        | (Electric, Flying | Water)
        | (Psychic, Fighting | Poison)
        | (Ice, Flying | Ground | Grass | Dragon)
        | (Dragon, Dragon)
        | (Dark, Ghost | Psychic)
        | (Fairy, Fighting | Dragon | Dark) => SUPER,

        // ====================================================================
        // Resisted
        // ====================================================================
        (Normal, Rock | Steel)
        | (Fighting, Flying | Poison | Bug | Psychic | Fairy)
        | (Flying, Rock | Steel | Electric)
        | (Poison, Poison | Ground | Rock | Ghost)
        | (Ground, Bug | Grass)
        | (Rock, Fighting | Ground | Steel)
        | (Bug, Fighting | Flying | Poison | Ghost | Steel | Fire | Fairy)
        | (Ghost, Dark)
        | (Steel, Steel | Fire | Water | Electric)
        | (Fire, Rock | Fire | Water | Dragon)
        | (Water, Water | Grass | Dragon)
        | (Grass, Flying | Poison | Bug | Steel | Fire | Grass | Dragon)
        | (Electric, Grass | Electric | Dragon)
        | (Psychic, Steel | Psychic)
        | (Ice, Steel | Fire | Water | Ice)
        | (Dragon, Steel)
        | (Dark, Fighting | Dark | Fairy)
        | (Fairy, Poison | Steel | Fire) => RESIST,

        _ => NEUTRAL,
    }
}

/// Combine per-type multipliers (4-scale) into one 4-scale value.
#[inline]
pub fn combine_effectiveness(first: u8, second: u8) -> u8 {
    ((first as u16 * second as u16) / 4) as u8
}
