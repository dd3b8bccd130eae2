//! Core damage formula and integer math.
//!
//! Every function here reproduces the cartridge's truncation and overflow
//! behaviour. Intermediate products are computed in `u64` and then wrapped
//! with [`of32`] so that results match the game bit for bit.

/// 16-bit overflow wrapping.
#[inline]
pub const fn of16(value: u32) -> u32 {
    value & 0xFFFF
}

/// 32-bit overflow wrapping.
#[inline]
pub const fn of32(value: u64) -> u32 {
    (value & 0xFFFF_FFFF) as u32
}

/// Game Freak's rounding ("pokeRound") of `value / divisor`.
///
/// Rounds up only when the fractional part is strictly greater than 0.5.
#[inline]
pub fn pokeround(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    let quotient = value / divisor;
    let remainder = value % divisor;

    // 0.5 exactly rounds DOWN
    if remainder > divisor / 2 {
        quotient + 1
    } else {
        quotient
    }
}

/// `pokeround(value * modifier / 4096)`
#[inline]
pub fn apply_modifier(value: u32, modifier: u16) -> u32 {
    if modifier == 4096 {
        return value;
    }
    let product = of32(value as u64 * modifier as u64);
    pokeround(product, 4096)
}

/// `floor(value * num / den)`, used where the game truncates instead of rounding
/// (critical hits, stat stages).
#[inline]
pub fn apply_modifier_floor(value: u32, modifier_num: u32, modifier_den: u32) -> u32 {
    if modifier_den == 0 {
        return 0;
    }
    of32(value as u64 * modifier_num as u64) / modifier_den
}

// ============================================================================
// Modifier chains
// ============================================================================

/// Bounds for each chained-modifier site, as `(lower, upper)`.
pub const BASE_POWER_BOUNDS: (u32, u32) = (41, 2_097_152);
pub const STAT_BOUNDS: (u32, u32) = (410, 131_072);
pub const FINAL_BOUNDS: (u32, u32) = (41, 131_072);
pub const SPEED_BOUNDS: (u32, u32) = (410, 131_172);

/// Chain 4096-scale modifiers into one.
///
/// Each step is `(M * mod + 2048) >> 12`; the result is clamped to
/// `[lower, upper]`.
pub fn chain_mods(modifiers: &[u16], lower: u32, upper: u32) -> u32 {
    let mut result: u64 = 4096;

    for &modifier in modifiers {
        if modifier != 4096 {
            result = (result * modifier as u64 + 2048) >> 12;
        }
    }

    (result.min(upper as u64) as u32).max(lower)
}

// ============================================================================
// Damage formula
// ============================================================================

/// Base damage before any modifier.
///
/// `floor(floor(floor(2 * Level / 5 + 2) * Power * Atk / Def) / 50) + 2`
///
/// Defense is treated as at least 1.
pub fn get_base_damage(level: u32, base_power: u32, attack: u32, defense: u32) -> u32 {
    let defense = defense.max(1);
    let level_factor = 2 * level / 5 + 2;

    let numerator = of32(level_factor as u64 * base_power as u64);
    let numerator = of32(numerator as u64 * attack as u64);
    let after_defense = numerator / defense;

    after_defense / 50 + 2
}

/// Damage for one random roll (0 = 85%, 15 = 100%).
#[inline]
pub fn apply_random_roll(base_damage: u32, roll_index: u8) -> u32 {
    let roll = 85 + (roll_index.min(15) as u32);
    of32(base_damage as u64 * roll as u64) / 100
}

/// All 16 random rolls of a base damage value.
pub fn get_all_rolls(base_damage: u32) -> [u32; 16] {
    let mut rolls = [0u32; 16];
    for (i, roll) in rolls.iter_mut().enumerate() {
        *roll = apply_random_roll(base_damage, i as u8);
    }
    rolls
}

/// Final damage for a single roll.
///
/// Order: random roll, STAB, effectiveness, burn, protect, final modifier.
///
/// * `effectiveness` - 4-scale (4 = neutral)
/// * `stab` / `final_mod` - 4096-scale
/// * `protect` - the hit went through a protection move at 0.25x
///
/// The result is at least 1 and wrapped to 16 bits.
pub fn get_final_damage(
    base_damage: u32,
    roll_index: u8,
    effectiveness: u8,
    is_burned: bool,
    stab: u16,
    final_mod: u32,
    protect: bool,
) -> u32 {
    let mut damage = apply_random_roll(base_damage, roll_index);

    if stab != 4096 {
        damage = pokeround(of32(damage as u64 * stab as u64), 4096);
    }

    damage = of32(damage as u64 * effectiveness as u64) / 4;

    if is_burned {
        damage /= 2;
    }

    if protect {
        damage = pokeround(of32(damage as u64 * 1024), 4096);
    }

    let scaled = of32(damage as u64 * final_mod as u64);
    let damage = if scaled < 4096 { 1 } else { pokeround(scaled, 4096) };

    of16(damage)
}

// ============================================================================
// Stat stages
// ============================================================================

/// Boost multiplier table. Index 0 = -6, index 6 = 0, index 12 = +6.
const BOOST_TABLE: [(u32, u32); 13] = [
    (2, 8), // -6: 0.25x
    (2, 7), // -5
    (2, 6), // -4
    (2, 5), // -3
    (2, 4), // -2: 0.5x
    (2, 3), // -1
    (2, 2), //  0
    (3, 2), // +1: 1.5x
    (4, 2), // +2
    (5, 2), // +3
    (6, 2), // +4
    (7, 2), // +5
    (8, 2), // +6: 4x
];

/// Apply a stat stage: `floor(OF16(stat * num) / den)`.
pub fn apply_boost(stat: u32, stage: i8) -> u32 {
    let index = (stage.clamp(-6, 6) + 6) as usize;
    let (num, den) = BOOST_TABLE[index];
    of16(stat * num) / den
}

/// Accuracy/evasion stage table. Index 0 = -6, index 12 = +6.
const ACC_EVA_TABLE: [(u32, u32); 13] = [
    (3, 9),
    (3, 8),
    (3, 7),
    (3, 6),
    (3, 5),
    (3, 4),
    (3, 3),
    (4, 3),
    (5, 3),
    (6, 3),
    (7, 3),
    (8, 3),
    (9, 3),
];

/// Accuracy/evasion stage as a `(num, den)` ratio.
pub fn acc_eva_ratio(stage: i8) -> (u32, u32) {
    ACC_EVA_TABLE[(stage.clamp(-6, 6) + 6) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of16() {
        assert_eq!(of16(100), 100);
        assert_eq!(of16(65535), 65535);
        assert_eq!(of16(65536), 0);
        assert_eq!(of16(65537), 1);
    }

    #[test]
    fn test_pokeround() {
        // Exact 0.5 rounds down
        assert_eq!(pokeround(2048, 4096), 0);
        assert_eq!(pokeround(2049, 4096), 1);
        assert_eq!(pokeround(6144, 4096), 1);
        assert_eq!(pokeround(6145, 4096), 2);
        assert_eq!(pokeround(15, 10), 1);
        assert_eq!(pokeround(16, 10), 2);
    }

    #[test]
    fn test_apply_modifier() {
        assert_eq!(apply_modifier(100, 4096), 100);
        assert_eq!(apply_modifier(100, 6144), 150);
        assert_eq!(apply_modifier(100, 2048), 50);
        assert_eq!(apply_modifier(101, 2048), 50); // 50.5 -> 50
        assert_eq!(apply_modifier_floor(99, 3, 2), 148);
    }

    #[test]
    fn test_chain_mods() {
        assert_eq!(chain_mods(&[6144], 41, 131_072), 6144);
        // 1.5x * 1.5x = 2.25x
        assert_eq!(chain_mods(&[6144, 6144], 41, 131_072), 9216);
        // 1.3x * 1.2x: (4096*5325+2048)>>12 = 5325; (5325*4915+2048)>>12 = 6390
        assert_eq!(chain_mods(&[5325, 4915], 41, 131_072), 6390);
        // Clamped at both ends
        assert_eq!(chain_mods(&[1], 410, 131_072), 410);
        assert_eq!(chain_mods(&[8192; 8], 410, 131_172), 131_172);
        assert_eq!(chain_mods(&[], 41, 131_072), 4096);
    }

    #[test]
    fn test_base_damage() {
        // floor(2*100/5+2) = 42; 42*80 = 3360; *300 = 1008000; /200 = 5040; /50 = 100; +2
        assert_eq!(get_base_damage(100, 80, 300, 200), 102);
        // Level 50, 90 power, 100/100: 22*90*100/100 = 1980; /50 = 39; +2
        assert_eq!(get_base_damage(50, 90, 100, 100), 41);
        // Zero defense behaves as 1
        assert_eq!(get_base_damage(50, 90, 100, 0), get_base_damage(50, 90, 100, 1));
    }

    #[test]
    fn test_random_rolls() {
        let rolls = get_all_rolls(100);
        assert_eq!(rolls[0], 85);
        assert_eq!(rolls[15], 100);
    }

    #[test]
    fn test_final_damage_neutral() {
        // No modifiers: final damage equals the random roll
        for i in 0..16u8 {
            assert_eq!(
                get_final_damage(102, i, 4, false, 4096, 4096, false),
                apply_random_roll(102, i)
            );
        }
    }

    #[test]
    fn test_final_damage_modifiers() {
        // 100 base, max roll: 100 -> STAB 150 -> 2x 300 -> burn 150
        assert_eq!(get_final_damage(100, 15, 8, true, 6144, 4096, false), 150);
        // Through protect: 100 * 1024 / 4096 = 25
        assert_eq!(get_final_damage(100, 15, 4, false, 4096, 4096, true), 25);
        // Immune still floors at 1 (callers short-circuit immunity)
        assert_eq!(get_final_damage(100, 15, 0, false, 4096, 4096, false), 1);
        // Final modifier of 0.5x: 100 * 2048 / 4096 = 50
        assert_eq!(get_final_damage(100, 15, 4, false, 4096, 2048, false), 50);
    }

    #[test]
    fn test_boost_application() {
        assert_eq!(apply_boost(100, 0), 100);
        assert_eq!(apply_boost(100, 1), 150);
        assert_eq!(apply_boost(100, 6), 400);
        assert_eq!(apply_boost(100, -1), 66);
        assert_eq!(apply_boost(100, -6), 25);
        assert_eq!(apply_boost(100, 9), 400);
    }
}
