use crate::damage::context::DamageContext;

/// Damage of a move that ignores stats, or `None` for regular moves.
///
/// Type immunities are checked by the caller before this runs.
pub fn get_fixed_damage(ctx: &DamageContext<'_>) -> Option<u32> {
    let attacker = ctx.attacker;
    let defender = ctx.defender;

    match ctx.move_data.name.as_str() {
        // ====================================================================
        // Level-based fixed damage
        // ====================================================================
        "Seismic Toss" | "Night Shade" => Some(attacker.level as u32),

        // ====================================================================
        // Constant fixed damage
        // ====================================================================
        "Sonic Boom" => Some(20),
        "Dragon Rage" => Some(40),

        // ====================================================================
        // HP-based damage
        // ====================================================================
        "Super Fang" | "Nature's Madness" | "Ruination" => Some((defender.cur_hp / 2).max(1)),
        "Guardian of Alola" => Some((defender.cur_hp * 3 / 4).max(1)),
        "Endeavor" => Some(defender.cur_hp.saturating_sub(attacker.cur_hp)),
        "Final Gambit" => Some(attacker.cur_hp),

        _ => None,
    }
}
