//! Move hook type definitions.
//!
//! Moves whose effect is more than damage plus catalog data register a
//! [`MoveHooks`] entry. `on_try` can stop the move before anything lands;
//! `on_apply` runs after damage and secondary effects.

use crate::core_data::MoveData;
use crate::error::Result;
use crate::moves::MoveOptions;
use crate::state::{Flags, RaidState};

/// What a move handler gets to see about the move being executed.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub move_data: &'a MoveData,
    pub user: usize,
    pub target: usize,
    /// Slots the move landed on (after protection and immunities).
    pub affected: &'a [usize],
    /// HP lost per slot so far in this move.
    pub damage: &'a [i64],
    pub is_crit: bool,
    pub options: &'a MoveOptions,
}

impl EffectContext<'_> {
    pub fn landed_on(&self, id: usize) -> bool {
        self.affected.contains(&id)
    }

    /// The move dealt damage to `id`.
    pub fn damaged(&self, id: usize) -> bool {
        self.damage.get(id).is_some_and(|&d| d > 0)
    }
}

/// Checked before any target is hit. Returns why the move fails.
pub type OnTry = fn(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String>;

/// The move's own effect.
pub type OnApply = fn(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()>;

#[derive(Clone, Copy, Default)]
pub struct MoveHooks {
    pub on_try: Option<OnTry>,
    pub on_apply: Option<OnApply>,
    /// Raid boss action; any other slot using it is an illegal action.
    pub boss_action: bool,
}

impl MoveHooks {
    /// Empty hooks (default)
    pub const NONE: Self = Self {
        on_try: None,
        on_apply: None,
        boss_action: false,
    };
}
