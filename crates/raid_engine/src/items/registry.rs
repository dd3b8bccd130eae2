use phf::phf_map;

use crate::items::hooks::ItemHooks;
use crate::items::implementations::*;

pub static ITEM_REGISTRY: phf::Map<&'static str, ItemHooks> = phf_map! {
    // =========================================================================
    // Base Power
    // =========================================================================
    "Silk Scarf" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Black Belt" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Sharp Beak" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Poison Barb" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Soft Sand" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Hard Stone" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Silver Powder" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Spell Tag" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Metal Coat" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Charcoal" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Mystic Water" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Miracle Seed" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Magnet" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Twisted Spoon" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Never-Melt Ice" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Dragon Fang" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Black Glasses" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Fairy Feather" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_type_booster),
        ..ItemHooks::NONE
    },
    "Muscle Band" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_muscle_band),
        ..ItemHooks::NONE
    },
    "Wise Glasses" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_wise_glasses),
        ..ItemHooks::NONE
    },
    "Punching Glove" => ItemHooks {
        on_modify_base_power: Some(on_modify_base_power_punching_glove),
        ..ItemHooks::NONE
    },

    // =========================================================================
    // Stats
    // =========================================================================
    "Choice Band" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_choice_band),
        ..ItemHooks::NONE
    },
    "Choice Specs" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_choice_specs),
        ..ItemHooks::NONE
    },
    "Light Ball" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_light_ball),
        ..ItemHooks::NONE
    },
    "Thick Club" => ItemHooks {
        on_modify_attack: Some(on_modify_attack_thick_club),
        ..ItemHooks::NONE
    },
    "Eviolite" => ItemHooks {
        on_modify_defense: Some(on_modify_defense_eviolite),
        ..ItemHooks::NONE
    },
    "Assault Vest" => ItemHooks {
        on_modify_defense: Some(on_modify_defense_assault_vest),
        ..ItemHooks::NONE
    },

    // =========================================================================
    // Final Damage
    // =========================================================================
    "Life Orb" => ItemHooks {
        on_final_modifier: Some(on_final_modifier_life_orb),
        ..ItemHooks::NONE
    },
    "Expert Belt" => ItemHooks {
        on_final_modifier: Some(on_final_modifier_expert_belt),
        ..ItemHooks::NONE
    },
    "Metronome" => ItemHooks {
        on_final_modifier: Some(on_final_modifier_metronome),
        ..ItemHooks::NONE
    },
    "Chilan Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Chople Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Coba Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Kebia Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Shuca Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Charti Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Tanga Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Kasib Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Babiri Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Occa Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Passho Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Rindo Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Wacan Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Payapa Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Yache Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Haban Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Colbur Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },
    "Roseli Berry" => ItemHooks {
        on_foe_final_modifier: Some(on_foe_final_modifier_resist_berry),
        on_damaged: Some(on_damaged_resist_berry),
        ..ItemHooks::NONE
    },

    // =========================================================================
    // Reactions
    // =========================================================================
    "Weakness Policy" => ItemHooks {
        on_damaged: Some(on_damaged_weakness_policy),
        ..ItemHooks::NONE
    },
    "Absorb Bulb" => ItemHooks {
        on_damaged: Some(on_damaged_absorb_bulb),
        ..ItemHooks::NONE
    },
    "Cell Battery" => ItemHooks {
        on_damaged: Some(on_damaged_cell_battery),
        ..ItemHooks::NONE
    },
    "Luminous Moss" => ItemHooks {
        on_damaged: Some(on_damaged_luminous_moss),
        ..ItemHooks::NONE
    },
    "Snowball" => ItemHooks {
        on_damaged: Some(on_damaged_snowball),
        ..ItemHooks::NONE
    },
    "Kee Berry" => ItemHooks {
        on_damaged: Some(on_damaged_kee_berry),
        ..ItemHooks::NONE
    },
    "Maranga Berry" => ItemHooks {
        on_damaged: Some(on_damaged_maranga_berry),
        ..ItemHooks::NONE
    },
    "Air Balloon" => ItemHooks {
        on_switch_in: Some(on_switch_in_air_balloon),
        on_damaged: Some(on_damaged_air_balloon),
        ..ItemHooks::NONE
    },
    "Rocky Helmet" => ItemHooks {
        on_contact: Some(on_contact_rocky_helmet),
        ..ItemHooks::NONE
    },

    // =========================================================================
    // End of Turn
    // =========================================================================
    "Leftovers" => ItemHooks {
        on_end_of_turn: Some(on_end_of_turn_leftovers),
        ..ItemHooks::NONE
    },
    "Black Sludge" => ItemHooks {
        on_end_of_turn: Some(on_end_of_turn_black_sludge),
        ..ItemHooks::NONE
    },
    "Flame Orb" => ItemHooks {
        on_end_of_turn: Some(on_end_of_turn_flame_orb),
        ..ItemHooks::NONE
    },
    "Toxic Orb" => ItemHooks {
        on_end_of_turn: Some(on_end_of_turn_toxic_orb),
        ..ItemHooks::NONE
    },
};
