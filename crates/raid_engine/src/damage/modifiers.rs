//! Damage modifier pipeline.
//!
//! Each function is one phase of the calculation. Modifiers are collected
//! on the 4096 scale in the cartridge's order and chained once per phase;
//! whatever applied is noted in the [`RawDesc`].

use crate::abilities::{self, hooks::OnModifier, AbilityHooks};
use crate::core_data::StatId;
use crate::damage::context::DamageContext;
use crate::damage::description::RawDesc;
use crate::items::{self, ItemHooks};
use crate::mechanics::formula::{
    apply_modifier, apply_modifier_floor, BASE_POWER_BOUNDS, FINAL_BOUNDS, STAT_BOUNDS,
};
use crate::mechanics::{chain_mods, get_modified_stat, of16, of32, pokeround};
use crate::state::{FieldAbilities, SideFlags, Terrain, Weather};
use crate::types::Type;

/// Moves that ignore the target's stat stages.
const STAGE_PIERCING: [&str; 3] = ["Chip Away", "Sacred Sword", "Darkest Lariat"];

/// Special moves that hit the physical Defense stat.
const PHYSICAL_HITTING: [&str; 3] = ["Psyshock", "Psystrike", "Secret Sword"];

// ============================================================================
// Hook helpers
// ============================================================================

fn attacker_ability(ctx: &DamageContext<'_>) -> Option<&'static AbilityHooks> {
    ctx.attacker.active_ability().and_then(abilities::hooks)
}

fn defender_ability(ctx: &DamageContext<'_>) -> Option<&'static AbilityHooks> {
    ctx.defender_ability().and_then(abilities::hooks)
}

fn attacker_item(ctx: &DamageContext<'_>) -> Option<&'static ItemHooks> {
    ctx.attacker.active_item().and_then(items::hooks)
}

fn defender_item(ctx: &DamageContext<'_>) -> Option<&'static ItemHooks> {
    ctx.defender.active_item().and_then(items::hooks)
}

/// Run a modifier hook; `true` if it contributed a modifier.
fn run_hook(ctx: &DamageContext<'_>, hook: Option<OnModifier>, mods: &mut Vec<u16>) -> bool {
    match hook.and_then(|hook| hook(ctx)) {
        Some(modifier) if modifier != 4096 => {
            mods.push(modifier);
            true
        }
        _ => false,
    }
}

fn note(slot: &mut Option<String>, name: Option<&str>) {
    if let Some(name) = name {
        *slot = Some(name.to_string());
    }
}

fn apply_chain(value: u32, mods: &[u16], bounds: (u32, u32)) -> u32 {
    let chained = chain_mods(mods, bounds.0, bounds.1);
    pokeround(of32(value as u64 * chained as u64), 4096).max(1)
}

// ============================================================================
// Phase 1: Base Power
// ============================================================================

/// Power-doubling and halving conditions tied to a single move.
fn move_power_modifier(ctx: &DamageContext<'_>) -> Option<u16> {
    let attacker = ctx.attacker;
    let defender = ctx.defender;
    let field = ctx.field;
    let terrain = field.effective_terrain();

    let applies = match ctx.move_data.name.as_str() {
        "Knock Off" => return defender.item.is_some().then_some(6144),
        "Venoshock" => defender.status.is_some_and(|s| s.is_poison()),
        "Hex" | "Infernal Parade" => defender.status.is_some() || defender.has_ability("Comatose"),
        "Brine" => 2 * defender.cur_hp <= defender.max_hp,
        "Facade" => attacker.status.is_some_and(|s| s != crate::core_data::Status::Sleep),
        "Acrobatics" => attacker.item.is_none() || attacker.has_item("Flying Gem"),
        "Rising Voltage" => terrain == Some(Terrain::Electric) && ctx.defender_grounded,
        "Solar Beam" | "Solar Blade" => {
            let dim = field.has_weather(&[Weather::Rain, Weather::HeavyRain, Weather::Sand, Weather::Snow, Weather::Hail]);
            return dim.then_some(2048);
        }
        "Psyblade" => return (terrain == Some(Terrain::Electric)).then_some(6144),
        "Misty Explosion" => {
            return (terrain == Some(Terrain::Misty) && ctx.attacker_grounded).then_some(6144)
        }
        "Expanding Force" => {
            return (terrain == Some(Terrain::Psychic) && ctx.attacker_grounded).then_some(6144)
        }
        "Grav Apple" => return field.is_gravity().then_some(6144),
        "Collision Course" | "Electro Drift" => {
            return crate::mechanics::is_super_effective(ctx.effectiveness).then_some(5461)
        }
        _ => false,
    };
    applies.then_some(8192)
}

pub fn compute_base_power(ctx: &DamageContext<'_>, desc: &mut RawDesc) -> u32 {
    if ctx.base_power == 0 {
        return 0;
    }
    let mut mods: Vec<u16> = Vec::with_capacity(8);

    if run_hook(ctx, attacker_ability(ctx).and_then(|h| h.on_modify_base_power), &mut mods) {
        note(&mut desc.attacker_ability, ctx.attacker.active_ability());
    }
    if run_hook(ctx, defender_ability(ctx).and_then(|h| h.on_foe_base_power), &mut mods) {
        note(&mut desc.defender_ability, ctx.defender_ability());
    }

    let side = &ctx.field.attacker_side;
    if side.has(SideFlags::HELPING_HAND) {
        mods.push(6144);
        desc.is_helping_hand = true;
    }
    if side.has(SideFlags::CHARGED) && ctx.move_type == Type::Electric {
        mods.push(8192);
    }
    if side.has(SideFlags::BATTERY) && ctx.is_special() {
        mods.push(5325);
    }
    if side.has(SideFlags::POWER_SPOT) {
        mods.push(5325);
    }
    if side.has(SideFlags::STEELY_SPIRIT) && ctx.move_type == Type::Steel {
        mods.push(6144);
    }

    let auras = ctx.field.abilities;
    let aura = (ctx.move_type == Type::Fairy && auras.contains(FieldAbilities::FAIRY_AURA))
        || (ctx.move_type == Type::Dark && auras.contains(FieldAbilities::DARK_AURA));
    if aura {
        mods.push(if auras.contains(FieldAbilities::AURA_BREAK) { 3072 } else { 5448 });
    }

    if let Some(terrain) = ctx.field.effective_terrain() {
        let boosted = match terrain {
            Terrain::Electric => Some(Type::Electric),
            Terrain::Grassy => Some(Type::Grass),
            Terrain::Psychic => Some(Type::Psychic),
            Terrain::Misty => None,
        };
        if ctx.attacker_grounded && boosted == Some(ctx.move_type) {
            mods.push(5325);
            desc.terrain = Some(terrain);
        }
        let weakened = match terrain {
            Terrain::Misty => ctx.move_type == Type::Dragon,
            Terrain::Grassy => matches!(ctx.move_data.name.as_str(), "Earthquake" | "Bulldoze"),
            _ => false,
        };
        if weakened && ctx.defender_grounded {
            mods.push(2048);
            desc.terrain = Some(terrain);
        }
    }

    if let Some(modifier) = move_power_modifier(ctx) {
        mods.push(modifier);
    }

    if run_hook(ctx, attacker_item(ctx).and_then(|h| h.on_modify_base_power), &mut mods) {
        note(&mut desc.attacker_item, ctx.attacker.active_item());
    }

    let mut bp = of16(apply_chain(ctx.base_power, &mods, BASE_POWER_BOUNDS));

    // Terastallized moves of the tera type hit with at least 60 power.
    let attacker = ctx.attacker;
    let tera_move = attacker.is_tera
        && attacker.tera_type == Some(ctx.move_type)
        && ctx.move_type != Type::Stellar;
    if tera_move && bp < 60 && ctx.move_data.priority <= 0 && !ctx.move_data.is_multi_hit() {
        bp = 60;
    }
    bp
}

// ============================================================================
// Phase 2: Effective Stats
// ============================================================================

pub fn compute_attack(ctx: &DamageContext<'_>, desc: &mut RawDesc) -> u32 {
    let (source, stat) = match ctx.move_data.name.as_str() {
        "Foul Play" => (ctx.defender, StatId::Atk),
        "Body Press" => (ctx.attacker, StatId::Def),
        _ if ctx.is_physical() => (ctx.attacker, StatId::Atk),
        _ => (ctx.attacker, StatId::Spa),
    };
    desc.attack_stat = stat.short_name();

    let raw = source.stat(stat);
    let stage = source.boosts.stat(stat);
    let mut attack = if stage != 0 && ctx.defender_has_ability("Unaware") {
        note(&mut desc.defender_ability, ctx.defender_ability());
        raw
    } else if ctx.is_crit && stage < 0 {
        raw
    } else {
        desc.attacker_boost = stage;
        get_modified_stat(raw, stage, ctx.gen)
    };

    let mut mods: Vec<u16> = Vec::with_capacity(6);
    if run_hook(ctx, attacker_ability(ctx).and_then(|h| h.on_modify_attack), &mut mods) {
        note(&mut desc.attacker_ability, ctx.attacker.active_ability());
    }
    if run_hook(ctx, defender_ability(ctx).and_then(|h| h.on_foe_attack), &mut mods) {
        note(&mut desc.defender_ability, ctx.defender_ability());
    }
    if run_hook(ctx, attacker_item(ctx).and_then(|h| h.on_modify_attack), &mut mods) {
        note(&mut desc.attacker_item, ctx.attacker.active_item());
    }

    let ruin = ctx.field.abilities;
    let tablets = ruin.contains(FieldAbilities::TABLETS_OF_RUIN)
        && ctx.is_physical()
        && !ctx.attacker.has_ability("Tablets of Ruin");
    let vessel = ruin.contains(FieldAbilities::VESSEL_OF_RUIN)
        && ctx.is_special()
        && !ctx.attacker.has_ability("Vessel of Ruin");
    if tablets || vessel {
        mods.push(3072);
    }
    if ctx.field.attacker_side.atk_cheer > 0 {
        mods.push(6144);
    }

    attack = apply_chain(attack, &mods, STAT_BOUNDS);
    attack
}

pub fn compute_defense(ctx: &DamageContext<'_>, desc: &mut RawDesc) -> u32 {
    let name = ctx.move_data.name.as_str();
    let hits_physical = ctx.is_physical() || PHYSICAL_HITTING.contains(&name);
    let mut stat = if hits_physical { StatId::Def } else { StatId::Spd };
    if ctx.field.is_wonder_room() {
        stat = if stat == StatId::Def { StatId::Spd } else { StatId::Def };
    }
    desc.defense_stat = stat.short_name();

    let defender = ctx.defender;
    let raw = defender.stat(stat);
    let stage = defender.boosts.stat(stat);
    let ignores_stages = ctx.attacker.has_ability("Unaware") || STAGE_PIERCING.contains(&name);
    let mut defense = if stage != 0 && ignores_stages {
        if ctx.attacker.has_ability("Unaware") {
            note(&mut desc.attacker_ability, Some("Unaware"));
        }
        raw
    } else if ctx.is_crit && stage > 0 {
        raw
    } else {
        desc.defender_boost = stage;
        get_modified_stat(raw, stage, ctx.gen)
    };

    let sand = ctx.field.has_weather(&[Weather::Sand]) && defender.has_type(Type::Rock) && !hits_physical;
    let snow = ctx.field.has_weather(&[Weather::Snow]) && defender.has_type(Type::Ice) && hits_physical;
    if sand || snow {
        defense = pokeround(defense * 3, 2);
        desc.weather = ctx.field.effective_weather();
    }

    let mut mods: Vec<u16> = Vec::with_capacity(6);
    if run_hook(ctx, defender_ability(ctx).and_then(|h| h.on_modify_defense), &mut mods) {
        note(&mut desc.defender_ability, ctx.defender_ability());
    }
    if run_hook(ctx, defender_item(ctx).and_then(|h| h.on_modify_defense), &mut mods) {
        note(&mut desc.defender_item, defender.active_item());
    }

    let ruin = ctx.field.abilities;
    let sword = ruin.contains(FieldAbilities::SWORD_OF_RUIN)
        && hits_physical
        && !defender.has_ability("Sword of Ruin");
    let beads = ruin.contains(FieldAbilities::BEADS_OF_RUIN)
        && !hits_physical
        && !defender.has_ability("Beads of Ruin");
    if sword || beads {
        mods.push(3072);
    }
    if ctx.field.defender_side.def_cheer > 0 {
        mods.push(6144);
    }

    apply_chain(defense, &mods, STAT_BOUNDS)
}

// ============================================================================
// Phase 3: Pre-Random Modifiers
// ============================================================================

/// Weather and critical-hit adjustments to the base damage.
pub fn apply_pre_random(ctx: &DamageContext<'_>, base_damage: u32, desc: &mut RawDesc) -> u32 {
    let mut damage = base_damage;

    let weather = if ctx.defender.has_item("Utility Umbrella") {
        None
    } else {
        ctx.field.effective_weather()
    };
    let modifier = match weather {
        Some(w) if w.is_sun() => match ctx.move_type {
            Type::Fire => Some(6144),
            Type::Water if ctx.move_data.name == "Hydro Steam" => Some(6144),
            Type::Water => Some(2048),
            _ => None,
        },
        Some(w) if w.is_rain() => match ctx.move_type {
            Type::Water => Some(6144),
            Type::Fire => Some(2048),
            _ => None,
        },
        _ => None,
    };
    if let Some(modifier) = modifier {
        damage = apply_modifier(damage, modifier);
        desc.weather = weather;
    }

    if ctx.is_crit {
        let (num, den) = ctx.gen.crit_multiplier();
        damage = apply_modifier_floor(damage, num, den);
        desc.is_critical = true;
    }
    damage
}

// ============================================================================
// Phase 4: Final Damage
// ============================================================================

/// The chained final modifier applied to every roll.
pub fn compute_final_modifier(ctx: &DamageContext<'_>, desc: &mut RawDesc) -> u32 {
    let mut mods: Vec<u16> = Vec::with_capacity(8);
    let side = &ctx.field.defender_side;

    if !ctx.is_crit && !ctx.attacker.has_ability("Infiltrator") {
        if side.aurora_veil > 0 {
            mods.push(2048);
            desc.is_aurora_veil = true;
        } else if side.reflect > 0 && ctx.is_physical() {
            mods.push(2048);
            desc.is_reflect = true;
        } else if side.light_screen > 0 && ctx.is_special() {
            mods.push(2048);
            desc.is_light_screen = true;
        }
    }

    if run_hook(ctx, attacker_ability(ctx).and_then(|h| h.on_final_modifier), &mut mods) {
        note(&mut desc.attacker_ability, ctx.attacker.active_ability());
    }
    if run_hook(ctx, defender_ability(ctx).and_then(|h| h.on_foe_final_modifier), &mut mods) {
        note(&mut desc.defender_ability, ctx.defender_ability());
    }
    if side.has(SideFlags::FRIEND_GUARD) {
        mods.push(3072);
        desc.is_friend_guard = true;
    }
    if run_hook(ctx, attacker_item(ctx).and_then(|h| h.on_final_modifier), &mut mods) {
        note(&mut desc.attacker_item, ctx.attacker.active_item());
    }
    if run_hook(ctx, defender_item(ctx).and_then(|h| h.on_foe_final_modifier), &mut mods) {
        note(&mut desc.defender_item, ctx.defender.active_item());
    }

    let defender = ctx.defender;
    if defender.shield_active {
        let shield = defender.shield.unwrap_or_default();
        let reduction = if ctx.attacker.is_tera {
            shield.tera_reduction
        } else {
            shield.reduction
        };
        mods.push(reduction.val());
        desc.is_shielded = true;
    }

    chain_mods(&mods, FINAL_BOUNDS.0, FINAL_BOUNDS.1)
}
