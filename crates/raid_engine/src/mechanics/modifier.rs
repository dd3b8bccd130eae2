use serde::{Deserialize, Serialize};

/// A 4096-scale multiplier (4096 = 1.0x).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Modifier(pub u16);

impl Modifier {
    pub const ONE: Self = Self(4096);

    pub const HALF: Self = Self(2048);

    pub const DOUBLE: Self = Self(8192);

    pub const ONE_POINT_FIVE: Self = Self(6144);

    pub const ONE_POINT_TWO: Self = Self(4915);

    /// Standard 1.3x (Sheer Force, Tough Claws, Punching Glove...).
    pub const ONE_POINT_THREE: Self = Self(5325);

    /// Life Orb and Big Root use 5324 rather than 5325.
    pub const LIFE_ORB: Self = Self(5324);

    pub const THREE_QUARTERS: Self = Self(3072);

    pub const ONE_QUARTER: Self = Self(1024);

    /// Screens in single-target play.
    pub const SCREENS: Self = Self(2048);

    pub const fn new(val: u16) -> Self {
        Self(val)
    }

    pub const fn val(self) -> u16 {
        self.0
    }

    /// Build from a percentage (e.g. 30 -> 1229).
    pub fn from_percent(percent: u32) -> Self {
        Self(((percent * 4096 + 50) / 100).min(u16::MAX as u32) as u16)
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Self::ONE
    }
}

/// Create a Modifier from a float literal: `round(val * 4096)`.
#[macro_export]
macro_rules! modifier {
    ($val:expr) => {
        $crate::mechanics::Modifier::new(($val * 4096.0 + 0.5) as u16)
    };
}
