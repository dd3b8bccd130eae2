//! Handlers for moves with their own rules, grouped by what they touch.

pub mod abilities;
pub mod boss;
pub mod calls;
pub mod field;
pub mod items;
pub mod protection;
pub mod recovery;
pub mod stages;

use crate::error::Result;
use crate::state::{Flags, RaidState};

pub(crate) fn display_name(state: &RaidState, id: usize) -> Result<String> {
    Ok(state.raider(id)?.display_name())
}

pub(crate) fn fail(flags: &mut Flags, id: usize) {
    flags.push(id, "But it failed!");
}
