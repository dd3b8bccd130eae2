use crate::core_data::MoveData;
use crate::damage::DamageContext;
use crate::error::Result;
use crate::state::{Flags, HitInfo, RaidState, Raider};
use crate::types::Type;

/// Called when the holder enters the battle or gains the ability
pub type OnSwitchIn = fn(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()>;

/// Called during turn ordering to modify move priority
pub type OnModifyPriority = fn(raider: &Raider, move_data: &MoveData, priority: i8) -> i8;

/// Called before damage to change the move's type (-ate abilities)
pub type OnModifyType = fn(move_data: &MoveData, move_type: Type) -> Option<Type>;

/// Called on the defender; `true` means the hit is absorbed or blocked
pub type OnTypeImmunity = fn(ctx: &DamageContext<'_>) -> bool;

/// Side effect of an immunity that absorbed a move (Volt Absorb heals, Flash Fire powers up)
pub type OnAbsorb = fn(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()>;

/// Damage-phase modifier hook. Returns a 4096-scale multiplier, `None` for no change.
pub type OnModifier = fn(ctx: &DamageContext<'_>) -> Option<u16>;

/// Called on the defender after a damaging hit that left it standing
pub type OnDamaged = fn(state: &mut RaidState, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()>;

/// Called on the defender after each contact hit
pub type OnContact = fn(state: &mut RaidState, holder: usize, attacker: usize, flags: &mut Flags) -> Result<()>;

/// Called once per turn end
pub type OnEndOfTurn = fn(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()>;

/// Called when a stat boost is applied to modify the stage change
pub type OnStatChange = fn(change: i8) -> i8;

#[derive(Clone, Copy, Default)]
pub struct AbilityHooks {
    pub on_switch_in: Option<OnSwitchIn>,
    pub on_modify_priority: Option<OnModifyPriority>,
    pub on_modify_type: Option<OnModifyType>,
    pub on_type_immunity: Option<OnTypeImmunity>,
    pub on_absorb: Option<OnAbsorb>,
    pub on_modify_base_power: Option<OnModifier>,
    /// Holder is the defender (Dry Skin boosting Fire moves).
    pub on_foe_base_power: Option<OnModifier>,
    pub on_modify_attack: Option<OnModifier>,
    /// Holder is the defender (Thick Fat, Heatproof).
    pub on_foe_attack: Option<OnModifier>,
    pub on_modify_defense: Option<OnModifier>,
    pub on_final_modifier: Option<OnModifier>,
    /// Holder is the defender (Multiscale, Filter, Fluffy).
    pub on_foe_final_modifier: Option<OnModifier>,
    pub on_damaged: Option<OnDamaged>,
    pub on_contact: Option<OnContact>,
    pub on_end_of_turn: Option<OnEndOfTurn>,
    pub on_stat_change: Option<OnStatChange>,
}

impl AbilityHooks {
    /// Empty hooks (default)
    pub const NONE: Self = Self {
        on_switch_in: None,
        on_modify_priority: None,
        on_modify_type: None,
        on_type_immunity: None,
        on_absorb: None,
        on_modify_base_power: None,
        on_foe_base_power: None,
        on_modify_attack: None,
        on_foe_attack: None,
        on_modify_defense: None,
        on_final_modifier: None,
        on_foe_final_modifier: None,
        on_damaged: None,
        on_contact: None,
        on_end_of_turn: None,
        on_stat_change: None,
    };
}
