//! Base mechanics: integer math, stat stages, speed, type effectiveness,
//! accuracy and critical hits.
//!
//! Everything here is a pure function over value types; nothing mutates a
//! battle state.

pub mod accuracy;
pub mod effectiveness;
pub mod formula;
pub mod generations;
mod modifier;
pub mod stats;

pub use accuracy::{crit_chance, hit_chance};
pub use effectiveness::{defender_effectiveness, is_grounded, is_super_effective, move_effectiveness};
pub use formula::{
    apply_modifier, chain_mods, get_all_rolls, get_base_damage, get_final_damage, of16, of32,
    pokeround,
};
pub use generations::Generation;
pub use modifier::Modifier;
pub use stats::{count_boosts, get_final_speed, get_modified_stat, get_qp_boosted_stat};
