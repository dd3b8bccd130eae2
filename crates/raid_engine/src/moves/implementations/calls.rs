//! Moves that call another move.
//!
//! The turn swaps Instruct and Copycat for the move they call before
//! anything executes. When they reach the engine there was nothing to call.

use crate::moves::hooks::EffectContext;
use crate::state::RaidState;

pub fn try_instruct(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let target = state.raider(ctx.target).ok()?;
    Some(format!("{} has no move to repeat", target.display_name()))
}

pub fn try_copycat(_state: &RaidState, _ctx: &EffectContext<'_>) -> Option<String> {
    Some("There was no move to copy".to_string())
}
