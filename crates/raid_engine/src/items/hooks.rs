use crate::abilities::hooks::{OnContact, OnDamaged, OnEndOfTurn, OnModifier, OnSwitchIn};

/// Item hooks share their signatures with the ability hooks.
#[derive(Clone, Copy, Default)]
pub struct ItemHooks {
    pub on_switch_in: Option<OnSwitchIn>,
    pub on_modify_base_power: Option<OnModifier>,
    pub on_modify_attack: Option<OnModifier>,
    pub on_modify_defense: Option<OnModifier>,
    pub on_final_modifier: Option<OnModifier>,
    /// Final modifier contributed by the defender's item (resist berries).
    pub on_foe_final_modifier: Option<OnModifier>,
    pub on_damaged: Option<OnDamaged>,
    pub on_contact: Option<OnContact>,
    pub on_end_of_turn: Option<OnEndOfTurn>,
}

impl ItemHooks {
    pub const NONE: Self = Self {
        on_switch_in: None,
        on_modify_base_power: None,
        on_modify_attack: None,
        on_modify_defense: None,
        on_final_modifier: None,
        on_foe_final_modifier: None,
        on_damaged: None,
        on_contact: None,
        on_end_of_turn: None,
    };
}
