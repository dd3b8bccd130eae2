//! Moves that take, swap, give or throw held items.

use crate::core_data::{BoostId, Boosts, Status};
use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, Volatiles};

use super::display_name;

const STAT_BERRIES: [(&str, BoostId); 5] = [
    ("Liechi Berry", BoostId::Atk),
    ("Ganlon Berry", BoostId::Def),
    ("Petaya Berry", BoostId::Spa),
    ("Apicot Berry", BoostId::Spd),
    ("Salac Berry", BoostId::Spe),
];

fn cures(berry: &str, status: Status) -> bool {
    match berry {
        "Lum Berry" => true,
        "Cheri Berry" => status == Status::Paralysis,
        "Chesto Berry" => status == Status::Sleep,
        "Pecha Berry" => status.is_poison(),
        "Rawst Berry" => status == Status::Burn,
        "Aspear Berry" => status == Status::Freeze,
        _ => false,
    }
}

/// A berry's effect on `id` without the usual HP or status trigger
/// (Bug Bite eats it, Fling throws it).
pub fn berry_effect(state: &mut RaidState, id: usize, berry: &str, flags: &mut Flags) -> Result<()> {
    let raider = state.raider_mut(id)?;
    if raider.is_fainted() {
        return Ok(());
    }
    if let Some(status) = raider.status.filter(|&s| cures(berry, s)) {
        raider.status = None;
        raider.toxic_counter = 0;
        raider.volatile.sleep_turns = 0;
        flags.push(id, format!("{} was cured of {}", raider.display_name(), status.name()));
    }
    if matches!(berry, "Lum Berry" | "Persim Berry") && raider.volatile.has(Volatiles::CONFUSED) {
        raider.volatile.set(Volatiles::CONFUSED, false);
        raider.volatile.confusion_turns = 0;
        flags.push(id, format!("{} snapped out of confusion", raider.display_name()));
    }
    let max_hp = raider.max_hp as i64;
    match berry {
        "Sitrus Berry" => state.apply_healing(id, max_hp / 4, flags)?,
        "Oran Berry" => state.apply_healing(id, 10, flags)?,
        name => {
            if let Some(&(_, stat)) = STAT_BERRIES.iter().find(|(b, _)| *b == name) {
                state.apply_stat_change(id, Boosts::single(stat, 1), Some(id), flags)?;
            }
        }
    }
    Ok(())
}

/// What a flung item does to the target.
pub fn fling_effect(
    state: &mut RaidState,
    id: usize,
    item: &str,
    source: usize,
    flags: &mut Flags,
) -> Result<()> {
    match item {
        "Light Ball" => {
            state.apply_status(id, Status::Paralysis, Some(source), flags)?;
        }
        "Flame Orb" => {
            state.apply_status(id, Status::Burn, Some(source), flags)?;
        }
        "Toxic Orb" => {
            state.apply_status(id, Status::Toxic, Some(source), flags)?;
        }
        "Poison Barb" => {
            state.apply_status(id, Status::Poison, Some(source), flags)?;
        }
        "White Herb" => {
            let raider = state.raider_mut(id)?;
            for stat in BoostId::ALL {
                let stage = raider.boosts.get(stat);
                raider.boosts.set(stat, stage.max(0));
            }
        }
        "Mental Herb" => {
            let raider = state.raider_mut(id)?;
            raider.volatile.set(Volatiles::TAUNTED | Volatiles::ENCORED | Volatiles::HEAL_BLOCKED, false);
            raider.volatile.taunt_turns = 0;
            raider.volatile.encore_turns = 0;
            raider.volatile.heal_block_turns = 0;
        }
        berry if berry.ends_with(" Berry") => berry_effect(state, id, berry, flags)?,
        _ => {}
    }
    Ok(())
}

/// Move an item between two hands without triggering Symbiosis.
fn set_item(state: &mut RaidState, id: usize, item: Option<String>) -> Result<()> {
    let raider = state.raider_mut(id)?;
    if let Some(old) = raider.item.take() {
        raider.rolls.remove_sequential_condition(&old);
    }
    if let Some(new) = &item {
        raider.rolls.add_sequential_condition(new);
    }
    if raider.has_ability("Unburden") {
        raider.ability_on = item.is_none();
    }
    raider.item = item;
    Ok(())
}

// =============================================================================
// Try checks
// =============================================================================

pub fn try_trick(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    let target = state.raider(ctx.target).ok()?;
    let sticky = target.has_ability("Sticky Hold");
    if (user.item.is_none() && target.item.is_none()) || sticky {
        return Some("But it failed!".to_string());
    }
    None
}

pub fn try_bestow(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    let target = state.raider(ctx.target).ok()?;
    if user.item.is_none() || target.item.is_some() {
        return Some("But it failed!".to_string());
    }
    None
}

pub fn try_fling(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    if crate::damage::power::fling_power(user.active_item()) == 0 {
        return Some(format!("{} has nothing to fling", user.display_name()));
    }
    None
}

// =============================================================================
// Effects
// =============================================================================

pub fn knock_off(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let target = state.raider(ctx.target)?;
    if !ctx.damaged(ctx.target) || target.item.is_none() || target.has_ability("Sticky Hold") {
        return Ok(());
    }
    let user_name = display_name(state, ctx.user)?;
    let target_name = target.display_name();
    if let Some(item) = state.lose_item(ctx.target, flags)? {
        flags.push(ctx.target, format!("{} knocked off {}'s {}", user_name, target_name, item));
    }
    Ok(())
}

pub fn thief(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider(ctx.user)?;
    let target = state.raider(ctx.target)?;
    if !ctx.damaged(ctx.target) || user.item.is_some() || target.item.is_none() || target.has_ability("Sticky Hold") {
        return Ok(());
    }
    if let Some(item) = state.lose_item(ctx.target, flags)? {
        state.receive_item(ctx.user, item, flags)?;
    }
    Ok(())
}

pub fn bug_bite(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let target = state.raider(ctx.target)?;
    if !ctx.damaged(ctx.target) || !target.holds_berry() {
        return Ok(());
    }
    if let Some(berry) = state.lose_item(ctx.target, flags)? {
        flags.push(ctx.user, format!("{} ate the {}", display_name(state, ctx.user)?, berry));
        berry_effect(state, ctx.user, &berry, flags)?;
    }
    Ok(())
}

pub fn incinerate(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let target = state.raider(ctx.target)?;
    if !ctx.damaged(ctx.target) || !target.holds_berry() {
        return Ok(());
    }
    if let Some(berry) = state.lose_item(ctx.target, flags)? {
        flags.push(ctx.target, format!("{}'s {} was burnt up", display_name(state, ctx.target)?, berry));
    }
    Ok(())
}

/// Trick and Switcheroo.
pub fn trick(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if !ctx.landed_on(ctx.target) {
        return Ok(());
    }
    let own = state.raider(ctx.user)?.item.clone();
    let theirs = state.raider(ctx.target)?.item.clone();
    set_item(state, ctx.user, theirs.clone())?;
    set_item(state, ctx.target, own.clone())?;
    for (id, item) in [(ctx.user, theirs), (ctx.target, own)] {
        if let Some(item) = item {
            flags.push(id, format!("{} obtained {}", display_name(state, id)?, item));
        }
        state.check_hp_berries(id, flags)?;
        state.update_qp(id, flags)?;
    }
    Ok(())
}

pub fn bestow(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let Some(item) = state.raider(ctx.user)?.item.clone() else {
        return Ok(());
    };
    set_item(state, ctx.user, None)?;
    state.receive_item(ctx.target, item, flags)?;
    Ok(())
}

pub fn fling(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let Some(item) = state.lose_item(ctx.user, flags)? else {
        return Ok(());
    };
    flags.push(ctx.user, format!("{} flung its {}", display_name(state, ctx.user)?, item));
    if ctx.damaged(ctx.target) {
        fling_effect(state, ctx.target, &item, ctx.user, flags)?;
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

    fn state(user_item: Option<&str>, target_item: Option<&str>) -> RaidState {
        let boss = Raider {
            item: target_item.map(str::to_string),
            max_hp: 400,
            cur_hp: 400,
            ..Default::default()
        };
        let raider = Raider {
            item: user_item.map(str::to_string),
            max_hp: 100,
            cur_hp: 40,
            ..Default::default()
        };
        RaidState::new(Generation::Gen9, vec![boss, raider])
    }

    fn apply(state: &mut RaidState, name: &str, damage: i64, handler: crate::moves::hooks::OnApply) {
        let data = MoveData::unknown(name);
        let options = MoveOptions::default();
        let dealt = vec![damage, 0];
        let ctx = EffectContext {
            move_data: &data,
            user: 1,
            target: 0,
            affected: &[0],
            damage: &dealt,
            is_crit: false,
            options: &options,
        };
        let mut flags = Flags::new(2);
        handler(state, &ctx, &mut flags).unwrap();
    }

    #[test]
    fn test_knock_off_needs_damage() {
        let mut s = state(None, Some("Leftovers"));
        apply(&mut s, "Knock Off", 0, knock_off);
        assert_eq!(s.raiders[0].item.as_deref(), Some("Leftovers"));
        apply(&mut s, "Knock Off", 30, knock_off);
        assert_eq!(s.raiders[0].item, None);
    }

    #[test]
    fn test_trick_swaps_items() {
        let mut s = state(Some("Choice Scarf"), Some("Leftovers"));
        apply(&mut s, "Trick", 0, trick);
        assert_eq!(s.raiders[1].item.as_deref(), Some("Leftovers"));
        assert_eq!(s.raiders[0].item.as_deref(), Some("Choice Scarf"));
    }

    #[test]
    fn test_bug_bite_eats_sitrus() {
        let mut s = state(None, Some("Sitrus Berry"));
        apply(&mut s, "Bug Bite", 10, bug_bite);
        assert_eq!(s.raiders[0].item, None);
        assert_eq!(s.raiders[1].cur_hp, 65);
    }

    #[test]
    fn test_fling_flame_orb_burns() {
        let mut s = state(Some("Flame Orb"), None);
        apply(&mut s, "Fling", 20, fling);
        assert_eq!(s.raiders[1].item, None);
        assert_eq!(s.raiders[0].status, Some(Status::Burn));
    }

    #[test]
    fn test_bestow_gives_item() {
        let mut s = state(Some("Sitrus Berry"), None);
        apply(&mut s, "Bestow", 0, bestow);
        assert_eq!(s.raiders[1].item, None);
        assert_eq!(s.raiders[0].item.as_deref(), Some("Sitrus Berry"));
    }
}
