//! Damage calculation context.
//!
//! A `DamageContext` is assembled once per hit and handed to every ability
//! and item modifier hook. It only borrows the combatants; nothing in a
//! damage calculation mutates the battle state.

use crate::core_data::{MoveCategory, MoveData, MoveFlags};
use crate::mechanics::accuracy::MOLD_BREAKERS;
use crate::mechanics::Generation;
use crate::state::{Field, Raider};
use crate::types::Type;

/// Defender abilities that Mold Breaker cannot ignore.
const UNBREAKABLE: [&str; 4] = ["Shadow Shield", "Prism Armor", "Full Metal Body", "Comatose"];

pub struct DamageContext<'a> {
    pub gen: Generation,

    // ========================================================================
    // Participants
    // ========================================================================
    pub attacker: &'a Raider,
    pub defender: &'a Raider,
    /// The attacker's field, with the defender's side filled in.
    pub field: &'a Field,

    // ========================================================================
    // Move
    // ========================================================================
    pub move_data: &'a MoveData,
    /// Type after -ate abilities, Tera Blast, Weather Ball, etc.
    pub move_type: Type,
    /// Category after Photon Geyser / Tera Blast style switches.
    pub category: MoveCategory,
    /// Base power after move-specific adjustments, before modifier hooks.
    pub base_power: u32,
    /// 1-based hit number within a multi-hit move.
    pub hit_index: u8,
    /// An ability changed the move's type (-ate abilities).
    pub type_changed: bool,

    // ========================================================================
    // Flags
    // ========================================================================
    pub is_crit: bool,
    /// 4-scale effectiveness against the defender.
    pub effectiveness: u8,
    pub attacker_grounded: bool,
    pub defender_grounded: bool,
    /// Mold Breaker and friends.
    pub ignores_abilities: bool,
}

impl<'a> DamageContext<'a> {
    pub fn new(
        gen: Generation,
        attacker: &'a Raider,
        defender: &'a Raider,
        move_data: &'a MoveData,
        field: &'a Field,
    ) -> Self {
        Self {
            gen,
            attacker,
            defender,
            field,
            move_data,
            move_type: move_data.move_type,
            category: move_data.category,
            base_power: move_data.power as u32,
            hit_index: 1,
            type_changed: false,
            is_crit: false,
            effectiveness: crate::types::NEUTRAL,
            attacker_grounded: crate::mechanics::is_grounded(attacker, field),
            defender_grounded: crate::mechanics::is_grounded(defender, field),
            ignores_abilities: attacker.has_any_ability(&MOLD_BREAKERS),
        }
    }

    pub fn is_physical(&self) -> bool {
        self.category == MoveCategory::Physical
    }

    pub fn is_special(&self) -> bool {
        self.category == MoveCategory::Special
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.move_data.has_flag(flag)
    }

    pub fn makes_contact(&self) -> bool {
        let gloved = self.attacker.has_item("Punching Glove") && self.has_flag(MoveFlags::PUNCH);
        self.has_flag(MoveFlags::CONTACT) && !gloved && !self.attacker.has_item("Protective Pads")
    }

    /// The defender's ability unless Mold Breaker suppresses it.
    pub fn defender_ability(&self) -> Option<&'a str> {
        let ability = self.defender.active_ability()?;
        if self.ignores_abilities && !UNBREAKABLE.contains(&ability) {
            return None;
        }
        Some(ability)
    }

    pub fn defender_has_ability(&self, name: &str) -> bool {
        self.defender_ability() == Some(name)
    }

    /// Same-type attack bonus, accounting for terastallization.
    pub fn has_stab(&self) -> bool {
        if self.move_type == Type::Unknown {
            return false;
        }
        if self.attacker.has_original_type(self.move_type) {
            return true;
        }
        self.attacker.is_tera && self.attacker.tera_type == Some(self.move_type)
    }

    /// STAB multiplier on the 4096 scale.
    pub fn stab_modifier(&self) -> u16 {
        let original = self.attacker.has_original_type(self.move_type);
        let tera_match = self.attacker.is_tera && self.attacker.tera_type == Some(self.move_type);
        let adaptability = self.attacker.has_ability("Adaptability");
        if self.attacker.is_tera && self.attacker.tera_type == Some(Type::Stellar) {
            // Stellar boosts each type once; raid bosses are never hit twice by it.
            return if original { 8192 } else { 4915 };
        }
        match (original, tera_match, adaptability) {
            (true, true, true) => 9216,
            (true, true, false) | (_, true, true) | (true, false, true) => 8192,
            (true, false, false) | (false, true, false) => 6144,
            _ => 4096,
        }
    }
}
