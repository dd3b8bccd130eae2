//! Attack and defense modifying abilities, and stage-change rewrites.

use crate::core_data::StatId;
use crate::damage::DamageContext;
use crate::mechanics::get_qp_boosted_stat;
use crate::state::{Terrain, Volatiles};
use crate::types::Type;

// =============================================================================
// Attacker
// =============================================================================

/// Huge Power / Pure Power: 2x Attack
pub fn huge_power(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(8192)
}

/// Guts: 1.5x Attack while statused (burn drop is skipped separately)
pub fn guts(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.attacker.status.is_some()).then_some(6144)
}

pub fn hustle(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(6144)
}

pub fn gorilla_tactics(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(6144)
}

pub fn solar_power(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_special() && ctx.field.is_sun()).then_some(6144)
}

/// Flower Gift: 1.5x Attack in sun
pub fn flower_gift(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.field.is_sun()).then_some(6144)
}

pub fn defeatist(ctx: &DamageContext<'_>) -> Option<u16> {
    (2 * ctx.attacker.cur_hp <= ctx.attacker.max_hp).then_some(2048)
}

pub fn slow_start(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.attacker.ability_on).then_some(2048)
}

fn pinch(ctx: &DamageContext<'_>, boosted: Type) -> Option<u16> {
    let low = 3 * ctx.attacker.cur_hp <= ctx.attacker.max_hp;
    (low && ctx.move_type == boosted).then_some(6144)
}

pub fn overgrow(ctx: &DamageContext<'_>) -> Option<u16> {
    pinch(ctx, Type::Grass)
}

pub fn blaze(ctx: &DamageContext<'_>) -> Option<u16> {
    pinch(ctx, Type::Fire)
}

pub fn torrent(ctx: &DamageContext<'_>) -> Option<u16> {
    pinch(ctx, Type::Water)
}

pub fn swarm(ctx: &DamageContext<'_>) -> Option<u16> {
    pinch(ctx, Type::Bug)
}

pub fn flash_fire(ctx: &DamageContext<'_>) -> Option<u16> {
    let active = ctx.attacker.volatile.has(Volatiles::FLASH_FIRE);
    (active && ctx.move_type == Type::Fire).then_some(6144)
}

pub fn steelworker(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Steel).then_some(6144)
}

pub fn transistor(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Electric).then_some(5325)
}

pub fn dragons_maw(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Dragon).then_some(6144)
}

pub fn rocky_payload(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Rock).then_some(6144)
}

pub fn water_bubble(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Water).then_some(8192)
}

pub fn orichalcum_pulse(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.field.is_sun()).then_some(5461)
}

pub fn hadron_engine(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_special() && ctx.field.has_terrain(Terrain::Electric)).then_some(5461)
}

/// Protosynthesis / Quark Drive on the attacking stat.
pub fn qp_attack(ctx: &DamageContext<'_>) -> Option<u16> {
    if !ctx.attacker.is_qp_active() {
        return None;
    }
    let boosted = get_qp_boosted_stat(ctx.attacker, ctx.field.is_wonder_room(), ctx.gen);
    let wanted = if ctx.is_physical() { StatId::Atk } else { StatId::Spa };
    (boosted == wanted).then_some(5325)
}

// =============================================================================
// Defender
// =============================================================================

/// Protosynthesis / Quark Drive on the defending stat.
pub fn qp_defense(ctx: &DamageContext<'_>) -> Option<u16> {
    if !ctx.defender.is_qp_active() {
        return None;
    }
    let boosted = get_qp_boosted_stat(ctx.defender, ctx.field.is_wonder_room(), ctx.gen);
    let wanted = if ctx.is_physical() { StatId::Def } else { StatId::Spd };
    (boosted == wanted).then_some(5325)
}

pub fn marvel_scale(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.defender.status.is_some()).then_some(6144)
}

pub fn fur_coat(ctx: &DamageContext<'_>) -> Option<u16> {
    ctx.is_physical().then_some(8192)
}

pub fn grass_pelt(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_physical() && ctx.field.has_terrain(Terrain::Grassy)).then_some(6144)
}

/// Flower Gift on the defender: 1.5x Special Defense in sun
pub fn flower_gift_defense(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.is_special() && ctx.field.is_sun()).then_some(6144)
}

/// Thick Fat: halves the attacker's stat for Fire and Ice moves
pub fn thick_fat(ctx: &DamageContext<'_>) -> Option<u16> {
    matches!(ctx.move_type, Type::Fire | Type::Ice).then_some(2048)
}

pub fn heatproof(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Fire).then_some(2048)
}

pub fn water_bubble_foe(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Fire).then_some(2048)
}

pub fn purifying_salt(ctx: &DamageContext<'_>) -> Option<u16> {
    (ctx.move_type == Type::Ghost).then_some(2048)
}

// =============================================================================
// Stage changes
// =============================================================================

pub fn simple(change: i8) -> i8 {
    change.saturating_mul(2)
}

pub fn contrary(change: i8) -> i8 {
    change.saturating_neg()
}

/// Status-driven reasons an attacker's burn does not halve damage.
pub fn ignores_burn(ctx: &DamageContext<'_>) -> bool {
    ctx.attacker.has_ability("Guts") || ctx.move_data.name == "Facade"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{MoveCategory, MoveData, Status};
    use crate::mechanics::Generation;
    use crate::state::{Field, Raider};

    #[test]
    fn test_pinch_abilities() {
        let mut attacker = Raider {
            max_hp: 300,
            cur_hp: 101,
            ..Default::default()
        };
        let defender = Raider::default();
        let field = Field::new();
        let mv = MoveData {
            move_type: Type::Fire,
            category: MoveCategory::Special,
            ..MoveData::unknown("Flamethrower")
        };
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(blaze(&ctx), None);
        attacker.cur_hp = 100;
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(blaze(&ctx), Some(6144));
        assert_eq!(torrent(&ctx), None);
    }

    #[test]
    fn test_stage_rewrites() {
        assert_eq!(simple(2), 4);
        assert_eq!(contrary(-1), 1);
    }

    #[test]
    fn test_guts_needs_status() {
        let mut attacker = Raider::default();
        let defender = Raider::default();
        let field = Field::new();
        let mv = MoveData {
            category: MoveCategory::Physical,
            ..MoveData::unknown("Facade")
        };
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(guts(&ctx), None);
        attacker.status = Some(Status::Burn);
        let ctx = DamageContext::new(Generation::Gen9, &attacker, &defender, &mv, &field);
        assert_eq!(guts(&ctx), Some(6144));
    }
}
