//! Move execution.
//!
//! Catalog data drives the common path (damage, drain, healing, stat
//! changes, ailments). Field-setting moves are looked up in
//! [`FIELD_EFFECTS`]; anything with bespoke behavior registers
//! [`MoveHooks`] in [`MOVE_REGISTRY`].

mod engine;
pub mod hooks;
pub mod implementations;
mod options;
pub mod registry;
mod result;

pub use engine::{move_priority, RaidMove, MOST_DAMAGING, NO_MOVE, OPTIMAL_MOVE};
pub use hooks::{EffectContext, MoveHooks};
pub use options::{MoveOptions, RollChoice};
pub use registry::{FieldEffect, FIELD_EFFECTS, MOVE_REGISTRY};
pub use result::MoveResult;

/// Hooks for a move, if it has any.
pub fn hooks(name: &str) -> Option<&'static MoveHooks> {
    MOVE_REGISTRY.get(name)
}

/// Field change a move makes, if it is a field-setting move.
pub fn field_effect(name: &str) -> Option<FieldEffect> {
    FIELD_EFFECTS.get(name).copied()
}
