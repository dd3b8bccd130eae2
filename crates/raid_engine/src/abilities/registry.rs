use phf::phf_map;

use crate::abilities::hooks::AbilityHooks;
use crate::abilities::implementations::{
    damage_modifiers, final_modifiers, immunity, intimidate, priority, reactions, recovery,
    stat_modifiers, type_changers, weather_setters,
};

/// Hooks keyed by the ability's display name.
pub static ABILITY_REGISTRY: phf::Map<&'static str, AbilityHooks> = phf_map! {
    // =========================================================================
    // Weather / Terrain Setters
    // =========================================================================
    "Drizzle" => AbilityHooks {
        on_switch_in: Some(weather_setters::drizzle),
        ..AbilityHooks::NONE
    },
    "Drought" => AbilityHooks {
        on_switch_in: Some(weather_setters::drought),
        ..AbilityHooks::NONE
    },
    "Sand Stream" => AbilityHooks {
        on_switch_in: Some(weather_setters::sand_stream),
        ..AbilityHooks::NONE
    },
    "Snow Warning" => AbilityHooks {
        on_switch_in: Some(weather_setters::snow_warning),
        ..AbilityHooks::NONE
    },
    "Desolate Land" => AbilityHooks {
        on_switch_in: Some(weather_setters::desolate_land),
        ..AbilityHooks::NONE
    },
    "Primordial Sea" => AbilityHooks {
        on_switch_in: Some(weather_setters::primordial_sea),
        ..AbilityHooks::NONE
    },
    "Delta Stream" => AbilityHooks {
        on_switch_in: Some(weather_setters::delta_stream),
        ..AbilityHooks::NONE
    },
    "Electric Surge" => AbilityHooks {
        on_switch_in: Some(weather_setters::electric_surge),
        ..AbilityHooks::NONE
    },
    "Grassy Surge" => AbilityHooks {
        on_switch_in: Some(weather_setters::grassy_surge),
        ..AbilityHooks::NONE
    },
    "Misty Surge" => AbilityHooks {
        on_switch_in: Some(weather_setters::misty_surge),
        ..AbilityHooks::NONE
    },
    "Psychic Surge" => AbilityHooks {
        on_switch_in: Some(weather_setters::psychic_surge),
        ..AbilityHooks::NONE
    },
    "Orichalcum Pulse" => AbilityHooks {
        on_switch_in: Some(weather_setters::drought),
        on_modify_attack: Some(stat_modifiers::orichalcum_pulse),
        ..AbilityHooks::NONE
    },
    "Hadron Engine" => AbilityHooks {
        on_switch_in: Some(weather_setters::electric_surge),
        on_modify_attack: Some(stat_modifiers::hadron_engine),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Field-Wide Effects
    // =========================================================================
    "Sword of Ruin" => AbilityHooks {
        on_switch_in: Some(weather_setters::sword_of_ruin),
        ..AbilityHooks::NONE
    },
    "Beads of Ruin" => AbilityHooks {
        on_switch_in: Some(weather_setters::beads_of_ruin),
        ..AbilityHooks::NONE
    },
    "Tablets of Ruin" => AbilityHooks {
        on_switch_in: Some(weather_setters::tablets_of_ruin),
        ..AbilityHooks::NONE
    },
    "Vessel of Ruin" => AbilityHooks {
        on_switch_in: Some(weather_setters::vessel_of_ruin),
        ..AbilityHooks::NONE
    },
    "Fairy Aura" => AbilityHooks {
        on_switch_in: Some(weather_setters::fairy_aura),
        ..AbilityHooks::NONE
    },
    "Dark Aura" => AbilityHooks {
        on_switch_in: Some(weather_setters::dark_aura),
        ..AbilityHooks::NONE
    },
    "Aura Break" => AbilityHooks {
        on_switch_in: Some(weather_setters::aura_break),
        ..AbilityHooks::NONE
    },
    "Cloud Nine" => AbilityHooks {
        on_switch_in: Some(weather_setters::cloud_nine),
        ..AbilityHooks::NONE
    },
    "Air Lock" => AbilityHooks {
        on_switch_in: Some(weather_setters::cloud_nine),
        ..AbilityHooks::NONE
    },
    "Teraform Zero" => AbilityHooks {
        on_switch_in: Some(weather_setters::teraform_zero),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Switch-In Effects
    // =========================================================================
    "Intimidate" => AbilityHooks {
        on_switch_in: Some(intimidate::intimidate),
        ..AbilityHooks::NONE
    },
    "Supersweet Syrup" => AbilityHooks {
        on_switch_in: Some(intimidate::supersweet_syrup),
        ..AbilityHooks::NONE
    },
    "Download" => AbilityHooks {
        on_switch_in: Some(intimidate::download),
        ..AbilityHooks::NONE
    },
    "Intrepid Sword" => AbilityHooks {
        on_switch_in: Some(intimidate::intrepid_sword),
        ..AbilityHooks::NONE
    },
    "Dauntless Shield" => AbilityHooks {
        on_switch_in: Some(intimidate::dauntless_shield),
        ..AbilityHooks::NONE
    },
    "Slow Start" => AbilityHooks {
        on_switch_in: Some(intimidate::slow_start),
        on_modify_attack: Some(stat_modifiers::slow_start),
        ..AbilityHooks::NONE
    },
    "Screen Cleaner" => AbilityHooks {
        on_switch_in: Some(intimidate::screen_cleaner),
        ..AbilityHooks::NONE
    },
    "Trace" => AbilityHooks {
        on_switch_in: Some(intimidate::trace),
        ..AbilityHooks::NONE
    },
    "Imposter" => AbilityHooks {
        on_switch_in: Some(intimidate::imposter),
        ..AbilityHooks::NONE
    },
    "Hospitality" => AbilityHooks {
        on_switch_in: Some(intimidate::hospitality),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Priority Modifiers
    // =========================================================================
    "Prankster" => AbilityHooks {
        on_modify_priority: Some(priority::prankster),
        ..AbilityHooks::NONE
    },
    "Gale Wings" => AbilityHooks {
        on_modify_priority: Some(priority::gale_wings),
        ..AbilityHooks::NONE
    },
    "Triage" => AbilityHooks {
        on_modify_priority: Some(priority::triage),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Type Changers
    // =========================================================================
    "Pixilate" => AbilityHooks {
        on_modify_type: Some(type_changers::pixilate),
        on_modify_base_power: Some(damage_modifiers::ate_boost),
        ..AbilityHooks::NONE
    },
    "Aerilate" => AbilityHooks {
        on_modify_type: Some(type_changers::aerilate),
        on_modify_base_power: Some(damage_modifiers::ate_boost),
        ..AbilityHooks::NONE
    },
    "Refrigerate" => AbilityHooks {
        on_modify_type: Some(type_changers::refrigerate),
        on_modify_base_power: Some(damage_modifiers::ate_boost),
        ..AbilityHooks::NONE
    },
    "Galvanize" => AbilityHooks {
        on_modify_type: Some(type_changers::galvanize),
        on_modify_base_power: Some(damage_modifiers::ate_boost),
        ..AbilityHooks::NONE
    },
    "Normalize" => AbilityHooks {
        on_modify_type: Some(type_changers::normalize),
        on_modify_base_power: Some(damage_modifiers::normalize),
        ..AbilityHooks::NONE
    },
    "Liquid Voice" => AbilityHooks {
        on_modify_type: Some(type_changers::liquid_voice),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Base Power Modifiers
    // =========================================================================
    "Technician" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::technician),
        ..AbilityHooks::NONE
    },
    "Iron Fist" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::iron_fist),
        ..AbilityHooks::NONE
    },
    "Tough Claws" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::tough_claws),
        ..AbilityHooks::NONE
    },
    "Strong Jaw" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::strong_jaw),
        ..AbilityHooks::NONE
    },
    "Mega Launcher" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::mega_launcher),
        ..AbilityHooks::NONE
    },
    "Sharpness" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::sharpness),
        ..AbilityHooks::NONE
    },
    "Punk Rock" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::punk_rock),
        on_foe_final_modifier: Some(final_modifiers::punk_rock_defense),
        ..AbilityHooks::NONE
    },
    "Reckless" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::reckless),
        ..AbilityHooks::NONE
    },
    "Sheer Force" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::sheer_force),
        ..AbilityHooks::NONE
    },
    "Sand Force" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::sand_force),
        ..AbilityHooks::NONE
    },
    "Toxic Boost" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::toxic_boost),
        ..AbilityHooks::NONE
    },
    "Flare Boost" => AbilityHooks {
        on_modify_base_power: Some(damage_modifiers::flare_boost),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Stat Modifiers
    // =========================================================================
    "Huge Power" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::huge_power),
        ..AbilityHooks::NONE
    },
    "Pure Power" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::huge_power),
        ..AbilityHooks::NONE
    },
    "Guts" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::guts),
        ..AbilityHooks::NONE
    },
    "Hustle" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::hustle),
        ..AbilityHooks::NONE
    },
    "Gorilla Tactics" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::gorilla_tactics),
        ..AbilityHooks::NONE
    },
    "Solar Power" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::solar_power),
        on_end_of_turn: Some(recovery::solar_power),
        ..AbilityHooks::NONE
    },
    "Flower Gift" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::flower_gift),
        on_modify_defense: Some(stat_modifiers::flower_gift_defense),
        ..AbilityHooks::NONE
    },
    "Defeatist" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::defeatist),
        ..AbilityHooks::NONE
    },
    "Overgrow" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::overgrow),
        ..AbilityHooks::NONE
    },
    "Blaze" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::blaze),
        ..AbilityHooks::NONE
    },
    "Torrent" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::torrent),
        ..AbilityHooks::NONE
    },
    "Swarm" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::swarm),
        ..AbilityHooks::NONE
    },
    "Steelworker" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::steelworker),
        ..AbilityHooks::NONE
    },
    "Transistor" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::transistor),
        ..AbilityHooks::NONE
    },
    "Dragon's Maw" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::dragons_maw),
        ..AbilityHooks::NONE
    },
    "Rocky Payload" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::rocky_payload),
        ..AbilityHooks::NONE
    },
    "Water Bubble" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::water_bubble),
        on_foe_attack: Some(stat_modifiers::water_bubble_foe),
        ..AbilityHooks::NONE
    },
    "Protosynthesis" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::qp_attack),
        on_modify_defense: Some(stat_modifiers::qp_defense),
        ..AbilityHooks::NONE
    },
    "Quark Drive" => AbilityHooks {
        on_modify_attack: Some(stat_modifiers::qp_attack),
        on_modify_defense: Some(stat_modifiers::qp_defense),
        ..AbilityHooks::NONE
    },
    "Thick Fat" => AbilityHooks {
        on_foe_attack: Some(stat_modifiers::thick_fat),
        ..AbilityHooks::NONE
    },
    "Heatproof" => AbilityHooks {
        on_foe_attack: Some(stat_modifiers::heatproof),
        ..AbilityHooks::NONE
    },
    "Purifying Salt" => AbilityHooks {
        on_foe_attack: Some(stat_modifiers::purifying_salt),
        ..AbilityHooks::NONE
    },
    "Marvel Scale" => AbilityHooks {
        on_modify_defense: Some(stat_modifiers::marvel_scale),
        ..AbilityHooks::NONE
    },
    "Fur Coat" => AbilityHooks {
        on_modify_defense: Some(stat_modifiers::fur_coat),
        ..AbilityHooks::NONE
    },
    "Grass Pelt" => AbilityHooks {
        on_modify_defense: Some(stat_modifiers::grass_pelt),
        ..AbilityHooks::NONE
    },
    "Simple" => AbilityHooks {
        on_stat_change: Some(stat_modifiers::simple),
        ..AbilityHooks::NONE
    },
    "Contrary" => AbilityHooks {
        on_stat_change: Some(stat_modifiers::contrary),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Final Modifiers
    // =========================================================================
    "Tinted Lens" => AbilityHooks {
        on_final_modifier: Some(final_modifiers::tinted_lens),
        ..AbilityHooks::NONE
    },
    "Sniper" => AbilityHooks {
        on_final_modifier: Some(final_modifiers::sniper),
        ..AbilityHooks::NONE
    },
    "Neuroforce" => AbilityHooks {
        on_final_modifier: Some(final_modifiers::neuroforce),
        ..AbilityHooks::NONE
    },
    "Multiscale" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::multiscale),
        ..AbilityHooks::NONE
    },
    "Shadow Shield" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::multiscale),
        ..AbilityHooks::NONE
    },
    "Filter" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::filter),
        ..AbilityHooks::NONE
    },
    "Solid Rock" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::filter),
        ..AbilityHooks::NONE
    },
    "Prism Armor" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::filter),
        ..AbilityHooks::NONE
    },
    "Fluffy" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::fluffy),
        ..AbilityHooks::NONE
    },
    "Ice Scales" => AbilityHooks {
        on_foe_final_modifier: Some(final_modifiers::ice_scales),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Immunities
    // =========================================================================
    "Flash Fire" => AbilityHooks {
        on_type_immunity: Some(immunity::flash_fire),
        on_absorb: Some(immunity::absorb_flash_fire),
        on_modify_attack: Some(stat_modifiers::flash_fire),
        ..AbilityHooks::NONE
    },
    "Volt Absorb" => AbilityHooks {
        on_type_immunity: Some(immunity::electric_immune),
        on_absorb: Some(immunity::absorb_heal),
        ..AbilityHooks::NONE
    },
    "Lightning Rod" => AbilityHooks {
        on_type_immunity: Some(immunity::electric_immune),
        on_absorb: Some(immunity::absorb_special_attack),
        ..AbilityHooks::NONE
    },
    "Motor Drive" => AbilityHooks {
        on_type_immunity: Some(immunity::electric_immune),
        on_absorb: Some(immunity::absorb_speed),
        ..AbilityHooks::NONE
    },
    "Water Absorb" => AbilityHooks {
        on_type_immunity: Some(immunity::water_immune),
        on_absorb: Some(immunity::absorb_heal),
        ..AbilityHooks::NONE
    },
    "Storm Drain" => AbilityHooks {
        on_type_immunity: Some(immunity::water_immune),
        on_absorb: Some(immunity::absorb_special_attack),
        ..AbilityHooks::NONE
    },
    "Dry Skin" => AbilityHooks {
        on_type_immunity: Some(immunity::water_immune),
        on_absorb: Some(immunity::absorb_heal),
        on_foe_base_power: Some(damage_modifiers::dry_skin_foe),
        on_end_of_turn: Some(recovery::dry_skin),
        ..AbilityHooks::NONE
    },
    "Sap Sipper" => AbilityHooks {
        on_type_immunity: Some(immunity::sap_sipper),
        on_absorb: Some(immunity::absorb_attack),
        ..AbilityHooks::NONE
    },
    "Earth Eater" => AbilityHooks {
        on_type_immunity: Some(immunity::earth_eater),
        on_absorb: Some(immunity::absorb_heal),
        ..AbilityHooks::NONE
    },
    "Well-Baked Body" => AbilityHooks {
        on_type_immunity: Some(immunity::well_baked_body),
        on_absorb: Some(immunity::absorb_defense),
        ..AbilityHooks::NONE
    },
    "Wind Rider" => AbilityHooks {
        on_type_immunity: Some(immunity::wind_rider),
        on_absorb: Some(immunity::absorb_attack),
        ..AbilityHooks::NONE
    },
    "Bulletproof" => AbilityHooks {
        on_type_immunity: Some(immunity::bulletproof),
        ..AbilityHooks::NONE
    },
    "Soundproof" => AbilityHooks {
        on_type_immunity: Some(immunity::soundproof),
        ..AbilityHooks::NONE
    },
    "Overcoat" => AbilityHooks {
        on_type_immunity: Some(immunity::overcoat),
        ..AbilityHooks::NONE
    },
    "Wonder Guard" => AbilityHooks {
        on_type_immunity: Some(immunity::wonder_guard),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // Hit Reactions
    // =========================================================================
    "Weak Armor" => AbilityHooks {
        on_damaged: Some(reactions::weak_armor),
        ..AbilityHooks::NONE
    },
    "Stamina" => AbilityHooks {
        on_damaged: Some(reactions::stamina),
        ..AbilityHooks::NONE
    },
    "Justified" => AbilityHooks {
        on_damaged: Some(reactions::justified),
        ..AbilityHooks::NONE
    },
    "Rattled" => AbilityHooks {
        on_damaged: Some(reactions::rattled),
        ..AbilityHooks::NONE
    },
    "Water Compaction" => AbilityHooks {
        on_damaged: Some(reactions::water_compaction),
        ..AbilityHooks::NONE
    },
    "Steam Engine" => AbilityHooks {
        on_damaged: Some(reactions::steam_engine),
        ..AbilityHooks::NONE
    },
    "Thermal Exchange" => AbilityHooks {
        on_damaged: Some(reactions::thermal_exchange),
        ..AbilityHooks::NONE
    },
    "Anger Point" => AbilityHooks {
        on_damaged: Some(reactions::anger_point),
        ..AbilityHooks::NONE
    },
    "Anger Shell" => AbilityHooks {
        on_damaged: Some(reactions::anger_shell),
        ..AbilityHooks::NONE
    },
    "Berserk" => AbilityHooks {
        on_damaged: Some(reactions::berserk),
        ..AbilityHooks::NONE
    },
    "Cotton Down" => AbilityHooks {
        on_damaged: Some(reactions::cotton_down),
        ..AbilityHooks::NONE
    },
    "Seed Sower" => AbilityHooks {
        on_damaged: Some(reactions::seed_sower),
        ..AbilityHooks::NONE
    },
    "Sand Spit" => AbilityHooks {
        on_damaged: Some(reactions::sand_spit),
        ..AbilityHooks::NONE
    },
    "Electromorphosis" => AbilityHooks {
        on_damaged: Some(reactions::electromorphosis),
        ..AbilityHooks::NONE
    },
    "Wind Power" => AbilityHooks {
        on_damaged: Some(reactions::wind_power),
        ..AbilityHooks::NONE
    },
    "Rough Skin" => AbilityHooks {
        on_contact: Some(reactions::rough_skin),
        ..AbilityHooks::NONE
    },
    "Iron Barbs" => AbilityHooks {
        on_contact: Some(reactions::rough_skin),
        ..AbilityHooks::NONE
    },
    "Gooey" => AbilityHooks {
        on_contact: Some(reactions::gooey),
        ..AbilityHooks::NONE
    },
    "Tangling Hair" => AbilityHooks {
        on_contact: Some(reactions::gooey),
        ..AbilityHooks::NONE
    },
    "Mummy" => AbilityHooks {
        on_contact: Some(reactions::mummy),
        ..AbilityHooks::NONE
    },
    "Lingering Aroma" => AbilityHooks {
        on_contact: Some(reactions::mummy),
        ..AbilityHooks::NONE
    },

    // =========================================================================
    // End of Turn
    // =========================================================================
    "Speed Boost" => AbilityHooks {
        on_end_of_turn: Some(recovery::speed_boost),
        ..AbilityHooks::NONE
    },
    "Rain Dish" => AbilityHooks {
        on_end_of_turn: Some(recovery::rain_dish),
        ..AbilityHooks::NONE
    },
    "Ice Body" => AbilityHooks {
        on_end_of_turn: Some(recovery::ice_body),
        ..AbilityHooks::NONE
    },
    "Poison Heal" => AbilityHooks {
        on_end_of_turn: Some(recovery::poison_heal),
        ..AbilityHooks::NONE
    },
    "Hydration" => AbilityHooks {
        on_end_of_turn: Some(recovery::hydration),
        ..AbilityHooks::NONE
    },
};
