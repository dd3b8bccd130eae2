//! Core data records shared by the catalogs, the state model and the engine.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::types::Type;

// ============================================================================
// Stats
// ============================================================================

/// Permanent stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatId {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl StatId {
    /// Stats that can carry a stage, in tie-break order.
    pub const BATTLE: [StatId; 5] = [StatId::Atk, StatId::Def, StatId::Spa, StatId::Spd, StatId::Spe];

    pub fn short_name(self) -> &'static str {
        match self {
            StatId::Hp => "HP",
            StatId::Atk => "Atk",
            StatId::Def => "Def",
            StatId::Spa => "SpA",
            StatId::Spd => "SpD",
            StatId::Spe => "Spe",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatTable {
    pub const fn splat(value: u16) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    pub fn get(&self, stat: StatId) -> u16 {
        match stat {
            StatId::Hp => self.hp,
            StatId::Atk => self.atk,
            StatId::Def => self.def,
            StatId::Spa => self.spa,
            StatId::Spd => self.spd,
            StatId::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: StatId, value: u16) {
        match stat {
            StatId::Hp => self.hp = value,
            StatId::Atk => self.atk = value,
            StatId::Def => self.def = value,
            StatId::Spa => self.spa = value,
            StatId::Spd => self.spd = value,
            StatId::Spe => self.spe = value,
        }
    }

    /// Array order: [HP, Atk, Def, SpA, SpD, Spe]
    pub fn from_array(values: [u16; 6]) -> Self {
        Self {
            hp: values[0],
            atk: values[1],
            def: values[2],
            spa: values[3],
            spd: values[4],
            spe: values[5],
        }
    }
}

/// Stats that can carry a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostId {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl BoostId {
    pub const ALL: [BoostId; 7] = [
        BoostId::Atk,
        BoostId::Def,
        BoostId::Spa,
        BoostId::Spd,
        BoostId::Spe,
        BoostId::Accuracy,
        BoostId::Evasion,
    ];

    pub fn stat(self) -> Option<StatId> {
        match self {
            BoostId::Atk => Some(StatId::Atk),
            BoostId::Def => Some(StatId::Def),
            BoostId::Spa => Some(StatId::Spa),
            BoostId::Spd => Some(StatId::Spd),
            BoostId::Spe => Some(StatId::Spe),
            BoostId::Accuracy | BoostId::Evasion => None,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            BoostId::Atk => "Atk",
            BoostId::Def => "Def",
            BoostId::Spa => "SpA",
            BoostId::Spd => "SpD",
            BoostId::Spe => "Spe",
            BoostId::Accuracy => "Acc",
            BoostId::Evasion => "Eva",
        }
    }
}

impl From<StatId> for BoostId {
    fn from(stat: StatId) -> Self {
        match stat {
            StatId::Atk | StatId::Hp => BoostId::Atk,
            StatId::Def => BoostId::Def,
            StatId::Spa => BoostId::Spa,
            StatId::Spd => BoostId::Spd,
            StatId::Spe => BoostId::Spe,
        }
    }
}

/// Stat stages, each in [-6, +6] once stored on a combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boosts {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl Boosts {
    pub fn get(&self, id: BoostId) -> i8 {
        match id {
            BoostId::Atk => self.atk,
            BoostId::Def => self.def,
            BoostId::Spa => self.spa,
            BoostId::Spd => self.spd,
            BoostId::Spe => self.spe,
            BoostId::Accuracy => self.accuracy,
            BoostId::Evasion => self.evasion,
        }
    }

    pub fn set(&mut self, id: BoostId, value: i8) {
        match id {
            BoostId::Atk => self.atk = value,
            BoostId::Def => self.def = value,
            BoostId::Spa => self.spa = value,
            BoostId::Spd => self.spd = value,
            BoostId::Spe => self.spe = value,
            BoostId::Accuracy => self.accuracy = value,
            BoostId::Evasion => self.evasion = value,
        }
    }

    pub fn stat(&self, stat: StatId) -> i8 {
        match stat {
            StatId::Hp => 0,
            other => self.get(other.into()),
        }
    }

    pub fn single(id: BoostId, value: i8) -> Self {
        let mut boosts = Self::default();
        boosts.set(id, value);
        boosts
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoostId, i8)> + '_ {
        BoostId::ALL.iter().map(move |&id| (id, self.get(id)))
    }

    /// Keep only the raised stages.
    pub fn positive(&self) -> Self {
        let mut out = *self;
        for id in BoostId::ALL {
            out.set(id, self.get(id).max(0));
        }
        out
    }

    /// Keep only the lowered stages.
    pub fn negative(&self) -> Self {
        let mut out = *self;
        for id in BoostId::ALL {
            out.set(id, self.get(id).min(0));
        }
        out
    }
}

/// Clamp a stage to [-6, +6].
#[inline]
pub fn safe_stat_stage(value: i32) -> i8 {
    value.clamp(-6, 6) as i8
}

// ============================================================================
// Status
// ============================================================================

/// Non-volatile status conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "par")]
    Paralysis,
    #[serde(rename = "psn")]
    Poison,
    #[serde(rename = "tox")]
    Toxic,
    #[serde(rename = "brn")]
    Burn,
    #[serde(rename = "frz")]
    Freeze,
    #[serde(rename = "slp")]
    Sleep,
}

impl Status {
    pub fn name(self) -> &'static str {
        match self {
            Status::Paralysis => "paralyzed",
            Status::Poison => "poisoned",
            Status::Toxic => "badly poisoned",
            Status::Burn => "burned",
            Status::Freeze => "frozen",
            Status::Sleep => "asleep",
        }
    }

    pub fn is_poison(self) -> bool {
        matches!(self, Status::Poison | Status::Toxic)
    }
}

/// Ailments a move may inflict: either a status or a volatile condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ailment {
    Paralysis,
    Poison,
    Toxic,
    Burn,
    Freeze,
    Sleep,
    Confusion,
    Infatuation,
    Trap,
    Nightmare,
    Torment,
    Disable,
    Yawn,
    HealBlock,
    NoTypeImmunity,
    LeechSeed,
    Embargo,
    PerishSong,
    Ingrain,
    Taunt,
    Encore,
    TarShot,
    SaltCure,
    SyrupBomb,
    ThroatChop,
    #[serde(other)]
    Unknown,
}

impl Ailment {
    pub fn status(self) -> Option<Status> {
        match self {
            Ailment::Paralysis => Some(Status::Paralysis),
            Ailment::Poison => Some(Status::Poison),
            Ailment::Toxic => Some(Status::Toxic),
            Ailment::Burn => Some(Status::Burn),
            Ailment::Freeze => Some(Status::Freeze),
            Ailment::Sleep => Some(Status::Sleep),
            _ => None,
        }
    }
}

// ============================================================================
// Moves
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    #[default]
    Status,
}

/// Who a move lands on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveTarget {
    SpecificMove,
    SelectedPokemonMeFirst,
    Ally,
    UsersField,
    UserOrAlly,
    OpponentsField,
    User,
    RandomOpponent,
    AllOtherPokemon,
    #[default]
    SelectedPokemon,
    AllOpponents,
    EntireField,
    UserAndAllies,
    AllPokemon,
    AllAllies,
    FaintingPokemon,
}

/// Broad effect category of a move record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    #[serde(rename = "damage")]
    Damage,
    #[serde(rename = "ailment")]
    Ailment,
    #[serde(rename = "net-good-stats")]
    NetGoodStats,
    #[serde(rename = "heal")]
    Heal,
    #[serde(rename = "damage+ailment")]
    DamageAilment,
    #[serde(rename = "swagger")]
    Swagger,
    #[serde(rename = "damage+lower")]
    DamageLower,
    #[serde(rename = "damage+raise")]
    DamageRaise,
    #[serde(rename = "damage+heal")]
    DamageHeal,
    #[serde(rename = "ohko")]
    Ohko,
    #[serde(rename = "whole-field-effect")]
    WholeFieldEffect,
    #[serde(rename = "field-effect")]
    FieldEffect,
    #[serde(rename = "force-switch")]
    ForceSwitch,
    #[default]
    #[serde(rename = "unique")]
    Unique,
}

impl EffectCategory {
    pub fn deals_damage(self) -> bool {
        matches!(
            self,
            EffectCategory::Damage
                | EffectCategory::DamageAilment
                | EffectCategory::DamageLower
                | EffectCategory::DamageRaise
                | EffectCategory::DamageHeal
                | EffectCategory::Ohko
        )
    }
}

bitflags! {
    /// Serialized as `"CONTACT | PROTECT"`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MoveFlags: u32 {
        const CONTACT = 1 << 0;
        const PROTECT = 1 << 1;
        const HEAL = 1 << 2;
        const BITE = 1 << 3;
        const PUNCH = 1 << 4;
        const SOUND = 1 << 5;
        const POWDER = 1 << 6;
        const BULLET = 1 << 7;
        const PULSE = 1 << 8;
        const WIND = 1 << 9;
        const SLICING = 1 << 10;
        const DANCE = 1 << 11;
        const DEFROST = 1 << 12;
        const CHARGE = 1 << 13;
        const RECHARGE = 1 << 14;
        const FAIL_COPYCAT = 1 << 15;
        const FAIL_INSTRUCT = 1 << 16;
        /// Lands through Protect at a quarter of its damage.
        const PIERCES_PROTECT = 1 << 17;
        /// Never misses and ignores evasion stages.
        const SURE_HIT = 1 << 18;
    }
}

/// One stat-stage change carried by a move record.
///
/// `change` is optional because catalog data occasionally omits it; the engine
/// logs and skips such entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: BoostId,
    #[serde(default, alias = "value")]
    pub change: Option<i8>,
}

/// A move record from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    pub effect: EffectCategory,
    pub target: MoveTarget,
    pub power: u16,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    pub priority: i8,
    /// Percent of damage dealt returned to the user; negative is recoil.
    pub drain: i8,
    /// Percent of max HP restored.
    pub healing: i8,
    /// Percent of the user's max HP lost after use.
    pub self_damage: i8,
    pub ailment: Option<Ailment>,
    /// 0 means guaranteed.
    pub ailment_chance: u8,
    pub stat_changes: Vec<StatChange>,
    /// 0 means guaranteed.
    pub stat_chance: u8,
    pub flinch_chance: u8,
    /// Extra critical-hit stages.
    pub crit_rate: u8,
    pub min_hits: u8,
    pub max_hits: u8,
    pub flags: MoveFlags,
    /// Only the boss may use this action.
    pub boss_only: bool,
}

impl MoveData {
    /// Placeholder record for names missing from the catalog.
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            move_type: Type::Unknown,
            target: MoveTarget::SelectedPokemon,
            ..Default::default()
        }
    }

    pub fn is_status(&self) -> bool {
        self.category == MoveCategory::Status
    }

    pub fn is_physical(&self) -> bool {
        self.category == MoveCategory::Physical
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_multi_hit(&self) -> bool {
        self.max_hits > 1
    }

    /// Whether the record should run the damage phase. Fixed-damage and
    /// variable-power moves carry a power of 0 but still hit.
    pub fn deals_damage(&self) -> bool {
        !self.is_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_data_from_json() {
        let json = r#"{
            "name": "Close Combat",
            "type": "Fighting",
            "category": "Physical",
            "effect": "damage+lower",
            "power": 120,
            "accuracy": 100,
            "statChanges": [{"stat": "def", "change": -1}, {"stat": "spd", "value": -1}],
            "flags": "CONTACT | PROTECT"
        }"#;
        let data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(data.move_type, Type::Fighting);
        assert_eq!(data.effect, EffectCategory::DamageLower);
        assert_eq!(data.stat_changes.len(), 2);
        assert_eq!(data.stat_changes[1].change, Some(-1));
        assert!(data.has_flag(MoveFlags::CONTACT));
        assert!(!data.has_flag(MoveFlags::SOUND));
        assert_eq!(data.target, MoveTarget::SelectedPokemon);
    }

    #[test]
    fn test_missing_stat_change_value() {
        let json = r#"{"name": "Odd", "statChanges": [{"stat": "atk"}]}"#;
        let data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(data.stat_changes[0].change, None);
    }

    #[test]
    fn test_boost_helpers() {
        let mut boosts = Boosts::default();
        boosts.set(BoostId::Atk, 2);
        boosts.set(BoostId::Def, -1);
        assert_eq!(boosts.positive().def, 0);
        assert_eq!(boosts.negative().atk, 0);
        assert_eq!(boosts.stat(StatId::Atk), 2);
        assert_eq!(safe_stat_stage(9), 6);
        assert_eq!(safe_stat_stage(-9), -6);
    }
}
