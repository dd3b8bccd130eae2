//! raid_engine - Tera Raid battle resolution engine
//!
//! Resolves raid turns against a boss deterministically while tracking the
//! full distribution of damage rolls each combatant has taken, so KO chances
//! stay exact across many turns. Every resolution step returns a new
//! [`RaidState`]; inputs are never mutated.

/// Type definitions and type chart
pub mod types;

/// Nature definitions and stat modifiers
pub mod natures;

/// Stats, stages, statuses and move records
pub mod core_data;

/// Engine error type
pub mod error;

/// Move and species catalogs
pub mod catalog;

/// Generation-aware formulas, effectiveness, speed and 4096-scale modifiers
pub mod mechanics;

/// Damage calculation and descriptions
pub mod damage;

/// Damage roll distributions and conditional rewrites
pub mod rolls;

/// Raid state, combatants and fields
pub mod state;

/// Ability hooks
pub mod abilities;

/// Item hooks
pub mod items;

/// Move execution
pub mod moves;

/// Residual effects at the end of a turn
pub mod end_of_turn;

/// One raider action plus one boss action
pub mod turn;

/// Multi-turn battles
pub mod battle;

/// Combatant blueprints
pub mod entities;

// Re-export commonly used types
pub use battle::{BattleResult, BattleScript, RaidBattle, TurnGroup};
pub use catalog::{MoveCatalog, SpeciesCatalog};
pub use core_data::{Boosts, MoveData, StatId, StatTable, Status};
pub use entities::RaiderConfig;
pub use error::{EngineError, Result};
pub use mechanics::Generation;
pub use moves::{MoveOptions, MoveResult, RaidMove, RollChoice, MOST_DAMAGING, NO_MOVE, OPTIMAL_MOVE};
pub use natures::Nature;
pub use rolls::{CumulativeRolls, Distribution};
pub use state::{Field, Flags, RaidState, Raider, Weather, BOSS};
pub use turn::{BossMoveInfo, MoveInfo, RaidTurn, TurnInfo, TurnResult};
pub use types::Type;
