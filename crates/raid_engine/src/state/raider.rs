//! A single combatant.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::core_data::{Boosts, StatId, StatTable, Status};
use crate::mechanics::Modifier;
use crate::natures::Nature;
use crate::rolls::{CumulativeRolls, RollHolder};
use crate::state::field::Field;
use crate::types::Type;

/// Slot of the raid boss.
pub const BOSS: usize = 0;

bitflags! {
    /// Volatile conditions. Timed ones keep their turns in [`VolatileStatus`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Volatiles: u32 {
        const CONFUSED = 1 << 0;
        const TAUNTED = 1 << 1;
        const ENCORED = 1 << 2;
        const DROWSY = 1 << 3;
        const HEAL_BLOCKED = 1 << 4;
        const SALT_CURED = 1 << 5;
        const SYRUP_BOMBED = 1 << 6;
        const THROAT_CHOPPED = 1 << 7;
        const TAR_SHOT = 1 << 8;
        const INGRAINED = 1 << 9;
        const SMACKED_DOWN = 1 << 10;
        const CHARGING = 1 << 11;
        const RECHARGING = 1 << 12;
        const TRANSFORMED = 1 << 13;
        const FLASH_FIRE = 1 << 14;
        const AQUA_RING = 1 << 15;
    }
}

/// Volatile flags plus the turns left on each timed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolatileStatus {
    pub flags: Volatiles,
    pub sleep_turns: u8,
    pub confusion_turns: u8,
    pub taunt_turns: u8,
    pub yawn_turns: u8,
    pub encore_turns: u8,
    pub heal_block_turns: u8,
    pub throat_chop_turns: u8,
    pub syrup_bomb_turns: u8,
    /// Slot healed by this combatant's Leech Seed drain.
    pub leech_seeder: Option<usize>,
}

impl VolatileStatus {
    pub fn has(&self, flag: Volatiles) -> bool {
        self.flags.contains(flag)
    }

    pub fn set(&mut self, flag: Volatiles, on: bool) {
        self.flags.set(flag, on);
    }

    fn tick(turns: &mut u8, flags: &mut Volatiles, flag: Volatiles) {
        if *turns > 0 {
            *turns -= 1;
            if *turns == 0 {
                flags.remove(flag);
            }
        }
    }

    /// Count down the end-of-turn timers. Drowsiness is handled by the caller
    /// since it turns into sleep.
    pub fn tick_turn_end(&mut self) {
        Self::tick(&mut self.taunt_turns, &mut self.flags, Volatiles::TAUNTED);
        Self::tick(&mut self.encore_turns, &mut self.flags, Volatiles::ENCORED);
        Self::tick(&mut self.heal_block_turns, &mut self.flags, Volatiles::HEAL_BLOCKED);
        Self::tick(&mut self.throat_chop_turns, &mut self.flags, Volatiles::THROAT_CHOPPED);
        Self::tick(&mut self.syrup_bomb_turns, &mut self.flags, Volatiles::SYRUP_BOMBED);
    }
}

/// Tera shield settings of a raid boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShieldData {
    /// The shield goes up once HP falls to this percentage.
    pub hp_trigger: u8,
    /// Damage multiplier (4096-scale) while the shield is up.
    pub reduction: Modifier,
    /// Multiplier for hits from a terastallized attacker.
    pub tera_reduction: Modifier,
}

impl Default for ShieldData {
    fn default() -> Self {
        Self {
            hp_trigger: 75,
            reduction: Modifier::new(820),
            tera_reduction: Modifier::new(1434),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Raider {
    pub id: usize,
    pub role: String,
    pub name: String,
    pub level: u8,
    pub types: Vec<Type>,
    pub weight_kg: f64,
    /// Percent applied to the raw HP stat.
    pub boss_multiplier: u16,

    /// Stats before stages. `hp` is the raw stat without the boss multiplier.
    pub stats: StatTable,
    pub max_hp: u32,
    pub cur_hp: u32,
    pub boosts: Boosts,
    pub nature: Nature,

    pub ability: Option<String>,
    pub ability_on: bool,
    pub ability_nullified: bool,
    pub item: Option<String>,

    pub status: Option<Status>,
    pub toxic_counter: u8,
    pub volatile: VolatileStatus,

    pub tera_type: Option<Type>,
    pub is_tera: bool,
    pub tera_charge: u8,
    pub shield: Option<ShieldData>,
    pub shield_active: bool,

    pub hits_taken: u32,
    pub times_fainted: u32,
    pub stockpile: u8,
    /// Focus Energy / Dragon Cheer.
    pub is_pumped: bool,
    /// Stat raised by Protosynthesis / Quark Drive.
    pub boosted_stat: Option<StatId>,
    pub used_booster_energy: bool,

    pub moves: Vec<String>,
    /// Boss-only actions.
    pub extra_moves: Vec<String>,
    pub is_endure: bool,
    pub is_choice_locked: bool,
    pub last_move: Option<String>,
    pub last_target: Option<usize>,
    /// Consecutive uses of `last_move`.
    pub move_repeated: u8,

    pub field: Field,
    pub rolls: CumulativeRolls,
}

impl Default for Raider {
    fn default() -> Self {
        Self {
            id: 0,
            role: String::new(),
            name: String::new(),
            level: 100,
            types: vec![Type::Normal],
            weight_kg: 0.0,
            boss_multiplier: 100,
            stats: StatTable::splat(1),
            max_hp: 1,
            cur_hp: 1,
            boosts: Boosts::default(),
            nature: Nature::default(),
            ability: None,
            ability_on: false,
            ability_nullified: false,
            item: None,
            status: None,
            toxic_counter: 0,
            volatile: VolatileStatus::default(),
            tera_type: None,
            is_tera: false,
            tera_charge: 0,
            shield: None,
            shield_active: false,
            hits_taken: 0,
            times_fainted: 0,
            stockpile: 0,
            is_pumped: false,
            boosted_stat: None,
            used_booster_energy: false,
            moves: Vec::new(),
            extra_moves: Vec::new(),
            is_endure: false,
            is_choice_locked: false,
            last_move: None,
            last_target: None,
            move_repeated: 0,
            field: Field::default(),
            rolls: CumulativeRolls::new(),
        }
    }
}

impl Raider {
    pub fn is_boss(&self) -> bool {
        self.id == BOSS
    }

    /// Stand-in ally filled by the game when fewer than four players join.
    pub fn is_npc(&self) -> bool {
        self.name == "NPC"
    }

    pub fn is_fainted(&self) -> bool {
        self.cur_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.cur_hp == self.max_hp
    }

    /// Lost HP as a delta on the lifetime tracker.
    pub fn hp_lost(&self) -> i64 {
        self.max_hp as i64 - self.cur_hp as i64
    }

    // ========================================================================
    // Ability / item
    // ========================================================================

    /// The ability in effect, if not suppressed.
    pub fn active_ability(&self) -> Option<&str> {
        if self.ability_nullified {
            return None;
        }
        self.ability.as_deref()
    }

    pub fn has_ability(&self, name: &str) -> bool {
        self.active_ability() == Some(name)
    }

    pub fn has_any_ability(&self, names: &[&str]) -> bool {
        self.active_ability().is_some_and(|a| names.contains(&a))
    }

    /// The held item if its effect is not suppressed by Magic Room or Klutz.
    pub fn active_item(&self) -> Option<&str> {
        if self.field.is_magic_room() || self.has_ability("Klutz") {
            return None;
        }
        self.item.as_deref()
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.active_item() == Some(name)
    }

    pub fn holds_berry(&self) -> bool {
        self.item.as_deref().is_some_and(|i| i.ends_with(" Berry"))
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Defensive types, accounting for terastallization.
    pub fn effective_types(&self) -> Vec<Type> {
        match self.tera_type {
            Some(tera) if self.is_tera && tera != Type::Stellar => vec![tera],
            _ => self.types.clone(),
        }
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.effective_types().contains(&t)
    }

    /// Whether the original (pre-tera) types contain `t`.
    pub fn has_original_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn has_status(&self, status: Status) -> bool {
        self.status == Some(status)
    }

    pub fn is_asleep(&self) -> bool {
        self.has_status(Status::Sleep) || self.has_ability("Comatose")
    }

    pub fn is_qp_active(&self) -> bool {
        self.ability_on && self.boosted_stat.is_some()
    }

    pub fn stat(&self, stat: StatId) -> u32 {
        match stat {
            StatId::Hp => self.max_hp,
            other => self.stats.get(other) as u32,
        }
    }

    pub fn roll_holder(&self) -> RollHolder {
        let mut holder = RollHolder::new(self.max_hp);
        holder.ripen = self.has_ability("Ripen");
        holder.gluttony = self.has_ability("Gluttony");
        holder
    }

    /// Display name used in descriptions.
    pub fn display_name(&self) -> String {
        if self.is_boss() {
            format!("Boss {}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tera_overrides_types() {
        let mut raider = Raider {
            types: vec![Type::Dragon, Type::Ground],
            tera_type: Some(Type::Steel),
            ..Default::default()
        };
        assert!(raider.has_type(Type::Ground));
        raider.is_tera = true;
        assert_eq!(raider.effective_types(), vec![Type::Steel]);
        assert!(raider.has_original_type(Type::Ground));
    }

    #[test]
    fn test_suppressed_ability_and_item() {
        let mut raider = Raider {
            ability: Some("Intimidate".to_string()),
            item: Some("Leftovers".to_string()),
            ..Default::default()
        };
        assert!(raider.has_ability("Intimidate"));
        raider.ability_nullified = true;
        assert!(!raider.has_ability("Intimidate"));

        assert!(raider.has_item("Leftovers"));
        raider.field.magic_room = 3;
        assert!(!raider.has_item("Leftovers"));
    }

    #[test]
    fn test_volatile_tick() {
        let mut volatile = VolatileStatus::default();
        volatile.set(Volatiles::TAUNTED, true);
        volatile.taunt_turns = 1;
        volatile.tick_turn_end();
        assert!(!volatile.has(Volatiles::TAUNTED));
    }
}
