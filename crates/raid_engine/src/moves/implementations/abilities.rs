//! Moves that replace, copy or suppress abilities.

use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState};

use super::display_name;

/// Abilities that can never be replaced or suppressed.
pub const PERSISTENT_ABILITIES: [&str; 14] = [
    "Multitype",
    "Stance Change",
    "Schooling",
    "Comatose",
    "Shields Down",
    "Disguise",
    "RKS System",
    "Battle Bond",
    "Power Construct",
    "Ice Face",
    "Gulp Missile",
    "Zero to Hero",
    "Commander",
    "Tera Shift",
];

/// Abilities that cannot be copied onto another combatant.
pub const UNCOPYABLE_ABILITIES: [&str; 14] = [
    "Trace",
    "Receiver",
    "Power of Alchemy",
    "Imposter",
    "Flower Gift",
    "Forecast",
    "Illusion",
    "Hunger Switch",
    "Neutralizing Gas",
    "Wonder Guard",
    "Zen Mode",
    "Protosynthesis",
    "Quark Drive",
    "Tera Shell",
];

fn ability(state: &RaidState, id: usize) -> Option<String> {
    state.raider(id).ok().and_then(|r| r.ability.clone())
}

fn is_persistent(ability: Option<&str>) -> bool {
    ability.is_some_and(|a| PERSISTENT_ABILITIES.contains(&a))
}

fn is_uncopyable(ability: Option<&str>) -> bool {
    ability.is_some_and(|a| PERSISTENT_ABILITIES.contains(&a) || UNCOPYABLE_ABILITIES.contains(&a))
}

fn failure() -> Option<String> {
    Some("But it failed!".to_string())
}

// =============================================================================
// Try checks
// =============================================================================

pub fn try_skill_swap(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let own = ability(state, ctx.user);
    let theirs = ability(state, ctx.target);
    let blocked = |a: Option<&str>| is_persistent(a) || a.is_some_and(|a| UNCOPYABLE_ABILITIES.contains(&a));
    if blocked(own.as_deref()) || blocked(theirs.as_deref()) {
        return failure();
    }
    None
}

pub fn try_role_play(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let own = ability(state, ctx.user);
    let theirs = ability(state, ctx.target);
    if is_persistent(own.as_deref()) || is_uncopyable(theirs.as_deref()) || own == theirs {
        return failure();
    }
    None
}

pub fn try_entrainment(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let own = ability(state, ctx.user);
    let theirs = ability(state, ctx.target);
    if is_uncopyable(own.as_deref())
        || is_persistent(theirs.as_deref())
        || theirs.as_deref() == Some("Truant")
        || own == theirs
    {
        return failure();
    }
    None
}

/// Worry Seed and Simple Beam: the replacement must differ and the target's
/// ability must not be persistent.
fn try_replace(state: &RaidState, ctx: &EffectContext<'_>, replacement: &str) -> Option<String> {
    let theirs = ability(state, ctx.target);
    if is_persistent(theirs.as_deref())
        || theirs.as_deref() == Some("Truant")
        || theirs.as_deref() == Some(replacement)
    {
        return failure();
    }
    None
}

pub fn try_worry_seed(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    try_replace(state, ctx, "Insomnia")
}

pub fn try_simple_beam(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    try_replace(state, ctx, "Simple")
}

pub fn try_gastro_acid(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let target = state.raider(ctx.target).ok()?;
    if target.ability_nullified || is_persistent(target.ability.as_deref()) {
        return failure();
    }
    None
}

pub fn try_doodle(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let theirs = ability(state, ctx.target);
    if is_uncopyable(theirs.as_deref()) {
        return failure();
    }
    None
}

// =============================================================================
// Effects
// =============================================================================

pub fn skill_swap(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let own = ability(state, ctx.user);
    let theirs = ability(state, ctx.target);
    flags.push(
        ctx.user,
        format!(
            "{} swapped abilities with {}",
            display_name(state, ctx.user)?,
            display_name(state, ctx.target)?
        ),
    );
    state.change_ability(ctx.user, theirs, flags)?;
    state.change_ability(ctx.target, own, flags)
}

pub fn role_play(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let theirs = ability(state, ctx.target);
    state.change_ability(ctx.user, theirs, flags)
}

pub fn entrainment(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let own = ability(state, ctx.user);
    state.change_ability(ctx.target, own, flags)
}

pub fn worry_seed(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    state.change_ability(ctx.target, Some("Insomnia".to_string()), flags)?;
    let target = state.raider_mut(ctx.target)?;
    if target.has_status(crate::core_data::Status::Sleep) {
        target.status = None;
        target.volatile.sleep_turns = 0;
        flags.push(ctx.target, format!("{} woke up", target.display_name()));
    }
    Ok(())
}

pub fn simple_beam(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    state.change_ability(ctx.target, Some("Simple".to_string()), flags)
}

pub fn gastro_acid(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let target = state.raider_mut(ctx.target)?;
    target.ability_nullified = true;
    target.ability_on = false;
    target.rolls.remove_persistent_condition("Sturdy");
    flags.push(ctx.target, format!("{}'s ability was suppressed", target.display_name()));
    Ok(())
}

/// Doodle: the user and its allies copy the target's ability.
pub fn doodle(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let theirs = ability(state, ctx.target);
    for id in state.side_of(ctx.user) {
        let own = ability(state, id);
        if own == theirs || is_persistent(own.as_deref()) || state.raider(id)?.is_fainted() {
            continue;
        }
        state.change_ability(id, theirs.clone(), flags)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::MoveData;
    use crate::mechanics::Generation;
    use crate::moves::MoveOptions;
    use crate::state::Raider;

    fn state_with(user: &str, target: &str) -> RaidState {
        let boss = Raider {
            ability: Some(target.to_string()),
            max_hp: 100,
            cur_hp: 100,
            ..Default::default()
        };
        let raider = Raider {
            ability: Some(user.to_string()),
            max_hp: 100,
            cur_hp: 100,
            ..Default::default()
        };
        RaidState::new(Generation::Gen9, vec![boss, raider])
    }

    fn run(
        state: &mut RaidState,
        name: &str,
        try_fn: Option<crate::moves::hooks::OnTry>,
        apply: crate::moves::hooks::OnApply,
    ) -> Option<String> {
        let data = MoveData::unknown(name);
        let options = MoveOptions::default();
        let damage = vec![0; state.len()];
        let ctx = EffectContext {
            move_data: &data,
            user: 1,
            target: 0,
            affected: &[0],
            damage: &damage,
            is_crit: false,
            options: &options,
        };
        if let Some(reason) = try_fn.and_then(|f| f(state, &ctx)) {
            return Some(reason);
        }
        let mut flags = Flags::new(state.len());
        apply(state, &ctx, &mut flags).unwrap();
        None
    }

    #[test]
    fn test_skill_swap_exchanges_abilities() {
        let mut state = state_with("Intimidate", "Levitate");
        assert_eq!(run(&mut state, "Skill Swap", Some(try_skill_swap), skill_swap), None);
        assert_eq!(state.raiders[1].ability.as_deref(), Some("Levitate"));
        assert_eq!(state.raiders[0].ability.as_deref(), Some("Intimidate"));
    }

    #[test]
    fn test_worry_seed_fails_on_persistent_ability() {
        let mut state = state_with("Intimidate", "Comatose");
        assert!(run(&mut state, "Worry Seed", Some(try_worry_seed), worry_seed).is_some());
        assert_eq!(state.raiders[0].ability.as_deref(), Some("Comatose"));
    }

    #[test]
    fn test_simple_beam_replaces_ability() {
        let mut state = state_with("Intimidate", "Pressure");
        run(&mut state, "Simple Beam", Some(try_simple_beam), simple_beam);
        assert_eq!(state.raiders[0].ability.as_deref(), Some("Simple"));
    }

    #[test]
    fn test_gastro_acid_nullifies() {
        let mut state = state_with("Intimidate", "Sturdy");
        run(&mut state, "Gastro Acid", Some(try_gastro_acid), gastro_acid);
        assert!(state.raiders[0].ability_nullified);
        assert!(run(&mut state, "Gastro Acid", Some(try_gastro_acid), gastro_acid).is_some());
    }

    #[test]
    fn test_role_play_rejects_uncopyable() {
        let mut state = state_with("Intimidate", "Wonder Guard");
        assert!(run(&mut state, "Role Play", Some(try_role_play), role_play).is_some());
    }
}
