//! Protect and the other moves that guard a side for one turn.

use crate::error::Result;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, SideFlags};

use super::display_name;

const PROTECTION_MOVES: [&str; 5] = ["Protect", "Detect", "Endure", "Wide Guard", "Quick Guard"];

fn guard_side(state: &mut RaidState, id: usize, flag: SideFlags, label: &str, flags: &mut Flags) -> Result<()> {
    for member in state.side_of(id) {
        state.raider_mut(member)?.field.attacker_side.set(flag, true);
    }
    flags.push(id, format!("{} protected its side", label));
    Ok(())
}

/// Fake Out only works on the user's first action.
pub fn try_fake_out(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    user.last_move.as_ref().map(|_| "But it failed!".to_string())
}

/// Protect and Detect guard only the user. Consecutive use is not rolled;
/// it is flagged instead.
pub fn protect(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    if user.last_move.as_deref().is_some_and(|m| PROTECTION_MOVES.contains(&m)) {
        flags.push(ctx.user, "Consecutive protection may fail");
    }
    user.field.attacker_side.set(SideFlags::PROTECTED, true);
    flags.push(ctx.user, format!("{} protected itself", user.display_name()));
    Ok(())
}

pub fn endure(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    user.is_endure = true;
    user.rolls.add_persistent_condition("Endure");
    flags.push(ctx.user, format!("{} braced itself", user.display_name()));
    Ok(())
}

pub fn wide_guard(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    guard_side(state, ctx.user, SideFlags::WIDE_GUARD, "Wide Guard", flags)
}

pub fn quick_guard(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    guard_side(state, ctx.user, SideFlags::QUICK_GUARD, "Quick Guard", flags)
}

pub fn helping_hand(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    if ctx.target == ctx.user {
        return Ok(());
    }
    state.raider_mut(ctx.target)?.field.attacker_side.set(SideFlags::HELPING_HAND, true);
    flags.push(
        ctx.target,
        format!("{} is ready to help {}", display_name(state, ctx.user)?, display_name(state, ctx.target)?),
    );
    Ok(())
}
