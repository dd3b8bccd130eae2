//! Base power modifying abilities.
//!
//! These are called via `on_modify_base_power` (attacker) or
//! `on_foe_base_power` (defender) and return a 4096-scale modifier that is
//! chained with the other base power modifiers.

use crate::core_data::{EffectCategory, MoveFlags, Status};
use crate::damage::DamageContext;
use crate::state::Weather;
use crate::types::Type;

/// Crash-damage moves Reckless also boosts.
const CRASH_MOVES: [&str; 3] = ["Jump Kick", "High Jump Kick", "Axe Kick"];

/// Whether Sheer Force strips something from this move.
pub fn has_secondary_effect(ctx: &DamageContext<'_>) -> bool {
    let data = ctx.move_data;
    data.flinch_chance > 0
        || matches!(
            data.effect,
            EffectCategory::DamageAilment | EffectCategory::DamageLower | EffectCategory::DamageRaise
        )
}

/// Technician: 1.5x power for moves with BP <= 60
pub fn technician(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.base_power <= 60).then_some(6144)
}

/// Iron Fist: 1.2x power for punch moves
pub fn iron_fist(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::PUNCH).then_some(4915)
}

/// Tough Claws: 1.3x power for contact moves
pub fn tough_claws(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.makes_contact().then_some(5325)
}

pub fn strong_jaw(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::BITE).then_some(6144)
}

pub fn mega_launcher(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::PULSE).then_some(6144)
}

pub fn sharpness(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::SLICING).then_some(6144)
}

pub fn punk_rock(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.has_flag(MoveFlags::SOUND).then_some(5325)
}

/// Reckless: 1.2x for recoil and crash moves
pub fn reckless(ctx: &DamageContext<'_>) -> Option<u16> {
    let recoil = ctx.move_data.drain < 0 || CRASH_MOVES.contains(&ctx.move_data.name.as_str());
    recoil.then_some(4915)
}

pub fn sheer_force(ctx: &DamageContext<'_>) -> Option<u16> {
    has_secondary_effect(ctx).then_some(5325)
}

/// Sand Force: 1.3x for Rock/Ground/Steel moves in Sandstorm
pub fn sand_force(ctx: &DamageContext<'_>) -> Option<u16> {
    let sand = ctx.field.has_weather(&[Weather::Sand]);
    let boosted = matches!(ctx.move_type, Type::Rock | Type::Ground | Type::Steel);
    (sand && boosted).then_some(5325)
}

/// Aerilate and the other -ate abilities: 1.2x when they changed the type
pub fn ate_boost(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.type_changed.then_some(4915)
}

pub fn normalize(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Normal).then_some(4915)
}

pub fn toxic_boost(ctx: &DamageContext<'_>) -> Option<u16> {
    let poisoned = ctx.attacker.status.is_some_and(Status::is_poison);
    (poisoned && ctx.is_physical()).then_some(6144)
}

pub fn flare_boost(ctx: &DamageContext<'_>) -> Option<u16> {
    let burned = ctx.attacker.has_status(Status::Burn);
    (burned && ctx.is_special()).then_some(6144)
}

/// Dry Skin (defender): Fire moves hit 1.25x harder
pub fn dry_skin_foe(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Fire).then_some(5120)
}
