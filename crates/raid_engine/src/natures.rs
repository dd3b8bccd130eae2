//! The 25 natures and their stat multipliers.

use serde::{Deserialize, Serialize};

use crate::core_data::StatId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    #[default]
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    /// Natures are laid out in a 5x5 grid: row = raised stat, column = lowered stat.
    fn grid_position(self) -> (usize, usize) {
        let index = self as usize;
        (index / 5, index % 5)
    }

    fn grid_stat(index: usize) -> StatId {
        match index {
            0 => StatId::Atk,
            1 => StatId::Def,
            2 => StatId::Spe,
            3 => StatId::Spa,
            _ => StatId::Spd,
        }
    }

    /// Stat raised by 10%, if any.
    pub fn plus(self) -> Option<StatId> {
        let (row, col) = self.grid_position();
        (row != col).then(|| Self::grid_stat(row))
    }

    /// Stat lowered by 10%, if any.
    pub fn minus(self) -> Option<StatId> {
        let (row, col) = self.grid_position();
        (row != col).then(|| Self::grid_stat(col))
    }

    /// Multiplier in tenths (9 = -10%, 10 = neutral, 11 = +10%).
    pub fn stat_modifier(self, stat: StatId) -> u8 {
        if self.plus() == Some(stat) {
            11
        } else if self.minus() == Some(stat) {
            9
        } else {
            10
        }
    }

    pub fn from_name(name: &str) -> Option<Nature> {
        let lower = name.trim().to_ascii_lowercase();
        Nature::ALL
            .iter()
            .copied()
            .find(|n| format!("{:?}", n).to_ascii_lowercase() == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_grid() {
        assert_eq!(Nature::Adamant.plus(), Some(StatId::Atk));
        assert_eq!(Nature::Adamant.minus(), Some(StatId::Spa));
        assert_eq!(Nature::Timid.plus(), Some(StatId::Spe));
        assert_eq!(Nature::Timid.minus(), Some(StatId::Atk));
        assert_eq!(Nature::Modest.plus(), Some(StatId::Spa));
        assert_eq!(Nature::Calm.plus(), Some(StatId::Spd));
        assert_eq!(Nature::Calm.minus(), Some(StatId::Atk));
        assert_eq!(Nature::Serious.plus(), None);
        assert_eq!(Nature::Brave.minus(), Some(StatId::Spe));
    }

    #[test]
    fn test_stat_modifier() {
        assert_eq!(Nature::Jolly.stat_modifier(StatId::Spe), 11);
        assert_eq!(Nature::Jolly.stat_modifier(StatId::Spa), 9);
        assert_eq!(Nature::Jolly.stat_modifier(StatId::Atk), 10);
        assert_eq!(Nature::from_name("jolly"), Some(Nature::Jolly));
    }
}
