//! Generation ruleset.
//!
//! The engine is built around Generation 9 raid rules; the few formulas that
//! change with older generations branch on this value. It is passed into every
//! entry point instead of being read from global state.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    Gen1,
    Gen2,
    Gen3,
    Gen4,
    Gen5,
    Gen6,
    Gen7,
    Gen8,
    #[default]
    Gen9,
}

impl Generation {
    pub const fn num(self) -> u8 {
        match self {
            Generation::Gen1 => 1,
            Generation::Gen2 => 2,
            Generation::Gen3 => 3,
            Generation::Gen4 => 4,
            Generation::Gen5 => 5,
            Generation::Gen6 => 6,
            Generation::Gen7 => 7,
            Generation::Gen8 => 8,
            Generation::Gen9 => 9,
        }
    }

    pub const fn from_num(num: u8) -> Option<Self> {
        match num {
            1 => Some(Generation::Gen1),
            2 => Some(Generation::Gen2),
            3 => Some(Generation::Gen3),
            4 => Some(Generation::Gen4),
            5 => Some(Generation::Gen5),
            6 => Some(Generation::Gen6),
            7 => Some(Generation::Gen7),
            8 => Some(Generation::Gen8),
            9 => Some(Generation::Gen9),
            _ => None,
        }
    }

    /// Gen 1-2 use the percentage stage table and cap stats at 999.
    pub const fn uses_legacy_stages(self) -> bool {
        self.num() < 3
    }

    /// Speed kept under paralysis, in percent.
    pub const fn paralysis_speed_percent(self) -> u32 {
        if self.num() < 7 {
            25
        } else {
            50
        }
    }

    pub const fn speed_cap(self) -> u32 {
        if self.num() <= 2 {
            999
        } else {
            10000
        }
    }

    /// Critical hit denominators per stage (1/n).
    pub const fn crit_denominators(self) -> [u32; 4] {
        if self.num() >= 7 {
            [24, 8, 2, 1]
        } else {
            [16, 8, 2, 1]
        }
    }

    /// Critical hit multiplier as (num, den).
    pub const fn crit_multiplier(self) -> (u32, u32) {
        if self.num() >= 6 {
            (3, 2)
        } else {
            (2, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for n in 1..=9 {
            assert_eq!(Generation::from_num(n).map(Generation::num), Some(n));
        }
        assert_eq!(Generation::from_num(10), None);
        assert_eq!(Generation::default(), Generation::Gen9);
    }

    #[test]
    fn test_rules() {
        assert_eq!(Generation::Gen6.paralysis_speed_percent(), 25);
        assert_eq!(Generation::Gen9.paralysis_speed_percent(), 50);
        assert_eq!(Generation::Gen2.speed_cap(), 999);
        assert!(Generation::Gen2.uses_legacy_stages());
        assert!(!Generation::Gen3.uses_legacy_stages());
    }
}
