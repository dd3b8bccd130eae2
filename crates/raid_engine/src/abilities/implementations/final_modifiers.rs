//! Final damage modifiers from abilities.

use crate::core_data::MoveFlags;
use crate::damage::DamageContext;
use crate::types::{Type, NEUTRAL};

// =============================================================================
// Attacker
// =============================================================================

/// Tinted Lens: doubles not-very-effective damage
pub fn tinted_lens(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.effectiveness < NEUTRAL).then_some(8192)
}

pub fn sniper(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_crit.then_some(6144)
}

pub fn neuroforce(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.effectiveness > NEUTRAL).then_some(5120)
}

// =============================================================================
// Defender
// =============================================================================

/// Multiscale / Shadow Shield: halves damage at full HP
pub fn multiscale(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.defender.is_full_hp().then_some(2048)
}

/// Filter / Solid Rock / Prism Armor
pub fn filter(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.effectiveness > NEUTRAL).then_some(3072)
}

/// Fluffy halves contact damage and doubles Fire damage; both can apply.
pub fn fluffy(ctx: &DamageContext<'_>) -> Option<u16> {
    match (ctx.makes_contact(), ctx.move_type == Type::Fire) {
        (true, true) => None,
        (true, false) => Some(2048),
        (false, true) => Some(8192),
        (false, false) => None,
    }
}

pub fn ice_scales(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_special().then_some(2048)
}

pub fn punk_rock_defense(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::SOUND).then_some(2048)
}
