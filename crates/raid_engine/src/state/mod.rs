//! Battle-state model.
//!
//! A [`RaidState`] holds the boss (slot 0) and up to four raiders, each with
//! its own [`Field`] view. Move resolution clones the state and mutates only
//! the clone through the methods here, so every HP change also lands in the
//! combatant's lifetime roll tracker.

pub mod field;
pub mod raider;

pub use field::{
    Field, FieldAbilities, GameType, Room, Side, SideCounter, SideFlags, Terrain, Weather,
};
pub use raider::{Raider, ShieldData, VolatileStatus, Volatiles, BOSS};

use serde::{Deserialize, Serialize};

use crate::abilities;
use crate::core_data::{Ailment, BoostId, Boosts, MoveCategory, MoveFlags, StatId, Status};
use crate::error::{EngineError, Result};
use crate::items;
use crate::mechanics::{get_modified_stat, get_qp_boosted_stat, is_grounded, Generation};
use crate::rolls::Distribution;
use crate::types::Type;

// ============================================================================
// Flags
// ============================================================================

/// Per-slot annotations produced while resolving a move or a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(Vec<Vec<String>>);

impl Flags {
    pub fn new(slots: usize) -> Self {
        Self(vec![Vec::new(); slots])
    }

    pub fn push(&mut self, id: usize, message: impl Into<String>) {
        if id >= self.0.len() {
            self.0.resize(id + 1, Vec::new());
        }
        self.0[id].push(message.into());
    }

    pub fn get(&self, id: usize) -> &[String] {
        self.0.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }

    /// Append every slot of `other` after this one's entries.
    pub fn extend(&mut self, other: Flags) {
        for (id, messages) in other.0.into_iter().enumerate() {
            for message in messages {
                self.push(id, message);
            }
        }
    }

    pub fn into_inner(self) -> Vec<Vec<String>> {
        self.0
    }
}

/// What an on-damaged hook needs to know about the hit.
#[derive(Debug, Clone, PartialEq)]
pub struct HitInfo {
    pub attacker: usize,
    pub move_name: String,
    pub move_type: Type,
    pub category: MoveCategory,
    pub flags: MoveFlags,
    pub effectiveness: u8,
    pub is_crit: bool,
    /// HP taken by this hit, before any clamp.
    pub damage: u32,
}

impl HitInfo {
    pub fn makes_contact(&self) -> bool {
        self.flags.contains(MoveFlags::CONTACT)
    }
}

// ============================================================================
// RaidState
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidState {
    #[serde(default)]
    pub gen: Generation,
    pub raiders: Vec<Raider>,
}

/// Status-curing berries; `None` cures anything.
const CURE_BERRIES: [(&str, Option<Status>); 6] = [
    ("Lum Berry", None),
    ("Cheri Berry", Some(Status::Paralysis)),
    ("Chesto Berry", Some(Status::Sleep)),
    ("Rawst Berry", Some(Status::Burn)),
    ("Aspear Berry", Some(Status::Freeze)),
    ("Pecha Berry", Some(Status::Poison)),
];

const PINCH_BERRIES: [&str; 5] = ["Aguav Berry", "Figy Berry", "Iapapa Berry", "Mago Berry", "Wiki Berry"];

const STAT_BERRIES: [(&str, BoostId); 5] = [
    ("Liechi Berry", BoostId::Atk),
    ("Ganlon Berry", BoostId::Def),
    ("Petaya Berry", BoostId::Spa),
    ("Apicot Berry", BoostId::Spd),
    ("Salac Berry", BoostId::Spe),
];

const TERRAIN_SEEDS: [(&str, Terrain, BoostId); 4] = [
    ("Electric Seed", Terrain::Electric, BoostId::Def),
    ("Grassy Seed", Terrain::Grassy, BoostId::Def),
    ("Misty Seed", Terrain::Misty, BoostId::Spd),
    ("Psychic Seed", Terrain::Psychic, BoostId::Spd),
];

impl RaidState {
    /// Build a state, numbering combatants by position (slot 0 is the boss).
    pub fn new(gen: Generation, mut raiders: Vec<Raider>) -> Self {
        for (id, raider) in raiders.iter_mut().enumerate() {
            raider.id = id;
        }
        Self { gen, raiders }
    }

    pub fn len(&self) -> usize {
        self.raiders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raiders.is_empty()
    }

    pub fn raider(&self, id: usize) -> Result<&Raider> {
        self.raiders.get(id).ok_or(EngineError::InvalidSlot(id))
    }

    pub fn raider_mut(&mut self, id: usize) -> Result<&mut Raider> {
        self.raiders.get_mut(id).ok_or(EngineError::InvalidSlot(id))
    }

    pub fn boss(&self) -> Result<&Raider> {
        self.raider(BOSS)
    }

    /// Slots on the same side as `id`, excluding it.
    pub fn allies(&self, id: usize) -> Vec<usize> {
        if id == BOSS {
            return Vec::new();
        }
        (1..self.len()).filter(|&other| other != id).collect()
    }

    /// Slots on the other side.
    pub fn opponents(&self, id: usize) -> Vec<usize> {
        if id == BOSS {
            (1..self.len()).collect()
        } else {
            vec![BOSS]
        }
    }

    /// `id` and its allies.
    pub fn side_of(&self, id: usize) -> Vec<usize> {
        if id == BOSS {
            vec![BOSS]
        } else {
            (1..self.len()).collect()
        }
    }

    /// The attacker's field with the defender's own side as `defender_side`.
    pub fn move_field(&self, attacker: usize, defender: usize) -> Result<Field> {
        let mut field = self.raider(attacker)?.field.clone();
        if attacker != defender {
            field.defender_side = self.raider(defender)?.field.attacker_side.clone();
        }
        Ok(field)
    }

    fn ability_of(&self, id: usize) -> Option<String> {
        self.raiders
            .get(id)
            .and_then(|r| r.active_ability().map(str::to_string))
    }

    fn item_of(&self, id: usize) -> Option<String> {
        self.raiders
            .get(id)
            .and_then(|r| r.active_item().map(str::to_string))
    }

    // ========================================================================
    // HP
    // ========================================================================

    /// Deal `amount` HP of damage (negative heals without the heal-block
    /// check). `rolls` is the distribution fed to the lifetime tracker; when
    /// absent, `amount` is recorded as certain.
    ///
    /// The scalar HP is updated and the hit-reaction hooks run even if the
    /// tracker reports [`EngineError::DidNotConverge`], which is returned last.
    pub fn apply_damage(
        &mut self,
        id: usize,
        amount: i64,
        rolls: Option<&Distribution>,
        hit: Option<&HitInfo>,
        flags: &mut Flags,
    ) -> Result<()> {
        let raider = self.raider_mut(id)?;
        let holder = raider.roll_holder();
        let certain = Distribution::certain(amount);
        let dist = rolls.unwrap_or(&certain);
        let tracked = if hit.is_some() {
            raider.rolls.add_rolls(dist, &holder)
        } else {
            raider.rolls.add_indirect_rolls(dist, &holder)
        };

        let before = raider.cur_hp;
        let max = raider.max_hp;
        let mut after = (before as i64 - amount).clamp(0, max as i64) as u32;
        let mut used_sash = false;
        if amount > 0 && after == 0 && before > 0 {
            if raider.is_endure {
                after = 1;
                flags.push(id, format!("{} endured the hit", raider.display_name()));
            } else if before == max && hit.is_some() && raider.has_ability("Sturdy") {
                after = 1;
                flags.push(id, format!("{} held on with Sturdy", raider.display_name()));
            } else if before == max && hit.is_some() && raider.has_item("Focus Sash") {
                after = 1;
                used_sash = true;
                flags.push(id, format!("{} hung on using its Focus Sash", raider.display_name()));
            }
        }
        raider.cur_hp = after;
        if amount > 0 && hit.is_some() {
            raider.hits_taken += 1;
        }
        if before > 0 && after == 0 {
            raider.times_fainted += 1;
            flags.push(id, format!("{} fainted", raider.display_name()));
        }
        log::trace!("slot {} hp {} -> {}", id, before, after);

        if used_sash {
            self.consume_item(id, flags)?;
        }
        if amount > 0 && after > 0 {
            if let Some(hit) = hit {
                self.run_on_damaged(id, hit, flags)?;
            }
            self.check_hp_berries(id, flags)?;
            self.check_shield(id, before, flags)?;
        }
        tracked
    }

    /// Restore HP. Blocked by Heal Block; a fainted combatant stays fainted.
    pub fn apply_healing(&mut self, id: usize, amount: i64, flags: &mut Flags) -> Result<()> {
        let raider = self.raider_mut(id)?;
        if amount <= 0 || raider.is_fainted() {
            return Ok(());
        }
        if raider.volatile.has(Volatiles::HEAL_BLOCKED) {
            flags.push(id, format!("{} is prevented from healing", raider.display_name()));
            return Ok(());
        }
        let holder = raider.roll_holder();
        let tracked = raider
            .rolls
            .add_rolls(&Distribution::certain(-amount), &holder);
        raider.cur_hp = (raider.cur_hp as i64 + amount).min(raider.max_hp as i64) as u32;
        tracked
    }

    fn run_on_damaged(&mut self, id: usize, hit: &HitInfo, flags: &mut Flags) -> Result<()> {
        if let Some(hook) = self
            .ability_of(id)
            .and_then(|a| abilities::hooks(&a))
            .and_then(|h| h.on_damaged)
        {
            hook(self, id, hit, flags)?;
        }
        if let Some(hook) = self
            .item_of(id)
            .and_then(|i| items::hooks(&i))
            .and_then(|h| h.on_damaged)
        {
            hook(self, id, hit, flags)?;
        }
        Ok(())
    }

    /// Contact reactions of the defender, after each individual hit.
    pub fn run_on_contact(&mut self, defender: usize, attacker: usize, flags: &mut Flags) -> Result<()> {
        if self.raider(attacker)?.has_item("Protective Pads") {
            return Ok(());
        }
        if let Some(hook) = self
            .ability_of(defender)
            .and_then(|a| abilities::hooks(&a))
            .and_then(|h| h.on_contact)
        {
            hook(self, defender, attacker, flags)?;
        }
        if let Some(hook) = self
            .item_of(defender)
            .and_then(|i| items::hooks(&i))
            .and_then(|h| h.on_contact)
        {
            hook(self, defender, attacker, flags)?;
        }
        Ok(())
    }

    /// HP-threshold berries. Their healing is already modeled by the
    /// tracker's sequential conditions, so only the scalar HP moves here.
    pub fn check_hp_berries(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        let raider = self.raider(id)?;
        let Some(item) = raider.active_item().map(str::to_string) else {
            return Ok(());
        };
        if raider.is_fainted() {
            return Ok(());
        }
        let (cur, max) = (raider.cur_hp as i64, raider.max_hp as i64);
        let ripen = if raider.has_ability("Ripen") { 2 } else { 1 };
        let pinch = if raider.has_ability("Gluttony") { 2 } else { 4 };

        let heal = match item.as_str() {
            "Sitrus Berry" if 2 * cur <= max => Some(max * ripen / 4),
            "Oran Berry" if 2 * cur <= max => Some(10 * ripen),
            name if PINCH_BERRIES.contains(&name) && pinch * cur <= max => Some(max * ripen / 3),
            _ => None,
        };
        if let Some(heal) = heal {
            let raider = self.raider_mut(id)?;
            raider.cur_hp = (cur + heal).min(max) as u32;
            flags.push(id, format!("{} restored HP using its {}", raider.display_name(), item));
            return self.consume_item(id, flags).map(|_| ());
        }

        if let Some(&(_, stat)) = STAT_BERRIES.iter().find(|(name, _)| *name == item) {
            if pinch * cur <= max {
                self.consume_item(id, flags)?;
                self.apply_stat_change(id, Boosts::single(stat, ripen as i8), Some(id), flags)?;
            }
        }
        Ok(())
    }

    fn check_status_berry(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        let raider = self.raider(id)?;
        let Some(item) = raider.active_item().map(str::to_string) else {
            return Ok(());
        };
        let confused = raider.volatile.has(Volatiles::CONFUSED);
        let status = raider.status;
        let cures_status = status.is_some_and(|current| {
            CURE_BERRIES.iter().any(|&(name, cured)| {
                name == item
                    && match cured {
                        None => true,
                        Some(Status::Poison) => current.is_poison(),
                        Some(target) => target == current,
                    }
            })
        });
        let cures_confusion = confused && (item == "Persim Berry" || item == "Lum Berry");
        if !(cures_status || cures_confusion) {
            return Ok(());
        }
        let raider = self.raider_mut(id)?;
        if cures_status {
            raider.status = None;
            raider.toxic_counter = 0;
            raider.volatile.sleep_turns = 0;
        }
        if cures_confusion {
            raider.volatile.set(Volatiles::CONFUSED, false);
            raider.volatile.confusion_turns = 0;
        }
        flags.push(id, format!("{} was cured by its {}", raider.display_name(), item));
        self.consume_item(id, flags).map(|_| ())
    }

    /// Raise the boss shield the first time HP falls to the trigger.
    fn check_shield(&mut self, id: usize, hp_before: u32, flags: &mut Flags) -> Result<()> {
        let raider = self.raider_mut(id)?;
        let Some(shield) = raider.shield else {
            return Ok(());
        };
        if !raider.is_boss() || raider.shield_active {
            return Ok(());
        }
        let threshold = raider.max_hp as u64 * shield.hp_trigger as u64;
        let below = |hp: u32| (hp as u64) * 100 <= threshold;
        if !below(hp_before) && below(raider.cur_hp) {
            raider.shield_active = true;
            flags.push(id, format!("{} put up a tera shield", raider.display_name()));
        }
        Ok(())
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Inflict a non-volatile status. Returns whether it stuck.
    pub fn apply_status(
        &mut self,
        id: usize,
        status: Status,
        source: Option<usize>,
        flags: &mut Flags,
    ) -> Result<bool> {
        let raider = self.raider(id)?;
        if raider.is_fainted() || raider.status.is_some() {
            return Ok(false);
        }
        let from_opponent = source.is_some_and(|s| s != id);
        let corrosion = source
            .and_then(|s| self.raiders.get(s))
            .is_some_and(|s| s.has_ability("Corrosion"));
        let field = &raider.field;
        let grounded = is_grounded(raider, field);

        let type_immune = match status {
            Status::Burn => raider.has_type(Type::Fire),
            Status::Paralysis => raider.has_type(Type::Electric),
            Status::Poison | Status::Toxic => {
                !corrosion && (raider.has_type(Type::Poison) || raider.has_type(Type::Steel))
            }
            Status::Freeze => raider.has_type(Type::Ice) || field.is_sun(),
            Status::Sleep => false,
        };
        let ability_immune = match status {
            Status::Burn => raider.has_any_ability(&["Water Veil", "Water Bubble", "Thermal Exchange"]),
            Status::Paralysis => raider.has_ability("Limber"),
            Status::Poison | Status::Toxic => raider.has_any_ability(&["Immunity", "Pastel Veil"]),
            Status::Freeze => raider.has_ability("Magma Armor"),
            Status::Sleep => raider.has_any_ability(&["Insomnia", "Vital Spirit", "Sweet Veil"]),
        } || raider.has_any_ability(&["Comatose", "Purifying Salt"])
            || (raider.has_ability("Leaf Guard") && field.is_sun());
        let terrain_immune = grounded
            && (field.has_terrain(Terrain::Misty)
                || (status == Status::Sleep && field.has_terrain(Terrain::Electric)));
        let infiltrator = source
            .and_then(|s| self.raiders.get(s))
            .is_some_and(|s| s.has_ability("Infiltrator"));
        let safeguarded = from_opponent
            && field.attacker_side.is_active(SideCounter::Safeguard)
            && !infiltrator;

        if type_immune || ability_immune || terrain_immune || safeguarded {
            log::debug!("slot {} is immune to {:?}", id, status);
            return Ok(false);
        }

        let raider = self.raider_mut(id)?;
        raider.status = Some(status);
        match status {
            Status::Sleep => raider.volatile.sleep_turns = 3,
            Status::Toxic => raider.toxic_counter = 0,
            _ => {}
        }
        raider.volatile.set(Volatiles::DROWSY, false);
        flags.push(id, format!("{} was {}", raider.display_name(), status.name()));

        if let Some(src) = source.filter(|&s| s != id) {
            let synchronizes = self.raider(id)?.has_ability("Synchronize")
                && matches!(status, Status::Burn | Status::Paralysis | Status::Poison | Status::Toxic);
            if synchronizes {
                self.apply_status(src, status, Some(id), flags)?;
            }
        }
        self.check_status_berry(id, flags)?;
        Ok(true)
    }

    /// Inflict a volatile condition. Non-volatile ailments are forwarded to
    /// [`apply_status`](Self::apply_status).
    pub fn apply_volatile_status(
        &mut self,
        id: usize,
        ailment: Ailment,
        source: Option<usize>,
        flags: &mut Flags,
    ) -> Result<bool> {
        if let Some(status) = ailment.status() {
            return self.apply_status(id, status, source, flags);
        }
        let raider = self.raider(id)?;
        if raider.is_fainted() {
            return Ok(false);
        }
        let grounded = is_grounded(raider, &raider.field);
        let misty = grounded && raider.field.has_terrain(Terrain::Misty);
        let aroma_veil = raider.has_ability("Aroma Veil")
            || raider.field.attacker_side.has(SideFlags::AROMA_VEIL);
        let own_tempo = raider.has_ability("Own Tempo");
        let oblivious = raider.has_ability("Oblivious");
        let has_history = raider.last_move.is_some();
        let has_status = raider.status.is_some();
        let grass = raider.has_type(Type::Grass);
        let is_tera = raider.is_tera;
        let name = raider.display_name();

        let raider = self.raider_mut(id)?;
        let applied = match ailment {
            Ailment::Confusion => {
                if raider.volatile.has(Volatiles::CONFUSED) || misty || own_tempo {
                    false
                } else {
                    raider.volatile.set(Volatiles::CONFUSED, true);
                    raider.volatile.confusion_turns = 3;
                    true
                }
            }
            Ailment::Taunt => {
                if raider.volatile.has(Volatiles::TAUNTED) || aroma_veil || oblivious {
                    false
                } else {
                    raider.volatile.set(Volatiles::TAUNTED, true);
                    raider.volatile.taunt_turns = 3;
                    true
                }
            }
            Ailment::Encore => {
                if raider.volatile.has(Volatiles::ENCORED) || aroma_veil || !has_history {
                    false
                } else {
                    raider.volatile.set(Volatiles::ENCORED, true);
                    raider.volatile.encore_turns = 3;
                    true
                }
            }
            Ailment::Yawn => {
                if raider.volatile.has(Volatiles::DROWSY) || has_status || misty {
                    false
                } else {
                    raider.volatile.set(Volatiles::DROWSY, true);
                    raider.volatile.yawn_turns = 2;
                    true
                }
            }
            Ailment::HealBlock => {
                if raider.volatile.has(Volatiles::HEAL_BLOCKED) || aroma_veil {
                    false
                } else {
                    raider.volatile.set(Volatiles::HEAL_BLOCKED, true);
                    raider.volatile.heal_block_turns = 5;
                    true
                }
            }
            Ailment::SaltCure => {
                let fresh = !raider.volatile.has(Volatiles::SALT_CURED);
                raider.volatile.set(Volatiles::SALT_CURED, true);
                fresh
            }
            Ailment::SyrupBomb => {
                raider.volatile.set(Volatiles::SYRUP_BOMBED, true);
                raider.volatile.syrup_bomb_turns = 3;
                true
            }
            Ailment::ThroatChop => {
                raider.volatile.set(Volatiles::THROAT_CHOPPED, true);
                raider.volatile.throat_chop_turns = 2;
                true
            }
            Ailment::TarShot => {
                let fresh = !raider.volatile.has(Volatiles::TAR_SHOT) && !is_tera;
                if fresh {
                    raider.volatile.set(Volatiles::TAR_SHOT, true);
                }
                fresh
            }
            Ailment::Ingrain => {
                let fresh = !raider.volatile.has(Volatiles::INGRAINED);
                raider.volatile.set(Volatiles::INGRAINED, true);
                fresh
            }
            Ailment::LeechSeed => {
                if raider.field.attacker_side.has(SideFlags::SEEDED) || grass {
                    false
                } else {
                    raider.field.attacker_side.set(SideFlags::SEEDED, true);
                    raider.volatile.leech_seeder = source;
                    true
                }
            }
            Ailment::NoTypeImmunity => {
                raider.field.attacker_side.set(SideFlags::FORESIGHT, true);
                true
            }
            other => {
                log::debug!("volatile {:?} is not modeled", other);
                false
            }
        };

        if applied {
            flags.push(id, format!("{} is affected by {:?}", name, ailment));
            if ailment == Ailment::Confusion {
                self.check_status_berry(id, flags)?;
            }
        }
        Ok(applied)
    }

    // ========================================================================
    // Stat stages
    // ========================================================================

    /// Apply stage deltas through ability and item reactions. Returns the
    /// change that actually landed on `id`.
    pub fn apply_stat_change(
        &mut self,
        id: usize,
        boosts: Boosts,
        source: Option<usize>,
        flags: &mut Flags,
    ) -> Result<Boosts> {
        self.stat_change_inner(id, boosts, source, true, flags)
    }

    fn stat_change_inner(
        &mut self,
        id: usize,
        mut boosts: Boosts,
        source: Option<usize>,
        allow_mirror: bool,
        flags: &mut Flags,
    ) -> Result<Boosts> {
        let raider = self.raider(id)?;
        if raider.is_fainted() || boosts.is_zero() {
            return Ok(Boosts::default());
        }
        if let Some(hook) = raider
            .active_ability()
            .and_then(abilities::hooks)
            .and_then(|h| h.on_stat_change)
        {
            for (stat, change) in boosts.iter().collect::<Vec<_>>() {
                boosts.set(stat, hook(change));
            }
        }

        let from_opponent = source.is_some_and(|s| s != id);
        let mut reflected = Boosts::default();
        if from_opponent && !boosts.negative().is_zero() {
            let name = raider.display_name();
            let blocked = if raider.field.attacker_side.is_active(SideCounter::Mist) {
                Some("Mist".to_string())
            } else if raider.has_any_ability(&["Clear Body", "White Smoke", "Full Metal Body"]) {
                raider.active_ability().map(str::to_string)
            } else if raider.has_item("Clear Amulet") {
                Some("Clear Amulet".to_string())
            } else if raider.has_ability("Mirror Armor") {
                if allow_mirror {
                    reflected = boosts.negative();
                }
                Some("Mirror Armor".to_string())
            } else {
                None
            };
            if let Some(by) = blocked {
                flags.push(id, format!("{}'s stats were protected by {}", name, by));
                boosts = boosts.positive();
            } else {
                let guarded: &[(&str, BoostId)] = &[
                    ("Hyper Cutter", BoostId::Atk),
                    ("Big Pecks", BoostId::Def),
                    ("Keen Eye", BoostId::Accuracy),
                    ("Mind's Eye", BoostId::Accuracy),
                ];
                for &(ability, stat) in guarded {
                    if raider.has_ability(ability) && boosts.get(stat) < 0 {
                        boosts.set(stat, 0);
                    }
                }
            }
        }

        let raider = self.raider_mut(id)?;
        let mut diff = Boosts::default();
        for (stat, change) in boosts.iter().collect::<Vec<_>>() {
            if change == 0 {
                continue;
            }
            let old = raider.boosts.get(stat);
            let new = crate::core_data::safe_stat_stage(old as i32 + change as i32);
            raider.boosts.set(stat, new);
            diff.set(stat, new - old);
        }
        if !diff.is_zero() {
            flags.push(id, format!("{} {}", raider.display_name(), describe_boosts(&diff)));
        }

        if let Some(src) = source.filter(|_| !reflected.is_zero()) {
            self.stat_change_inner(src, reflected, Some(id), false, flags)?;
        }

        let lowered = !diff.negative().is_zero();
        if from_opponent && lowered {
            let raider = self.raider(id)?;
            let rebound = if raider.has_ability("Defiant") {
                Some(BoostId::Atk)
            } else if raider.has_ability("Competitive") {
                Some(BoostId::Spa)
            } else {
                None
            };
            if let Some(stat) = rebound {
                self.stat_change_inner(id, Boosts::single(stat, 2), Some(id), allow_mirror, flags)?;
            }
        }

        let raider = self.raider_mut(id)?;
        if raider.has_item("White Herb") && !raider.boosts.negative().is_zero() {
            for stat in BoostId::ALL {
                let stage = raider.boosts.get(stat);
                raider.boosts.set(stat, stage.max(0));
            }
            flags.push(id, format!("{} restored its stats with White Herb", raider.display_name()));
            self.consume_item(id, flags)?;
        }

        let raised = diff.positive();
        if allow_mirror && !raised.is_zero() {
            for other in self.opponents(id) {
                let Ok(opponent) = self.raider(other) else {
                    continue;
                };
                if opponent.is_fainted() {
                    continue;
                }
                let opportunist = opponent.has_ability("Opportunist");
                let mirror_herb = !opportunist && opponent.has_item("Mirror Herb");
                if opportunist || mirror_herb {
                    self.stat_change_inner(other, raised, Some(other), false, flags)?;
                }
                if mirror_herb {
                    self.consume_item(other, flags)?;
                }
            }
        }
        Ok(diff)
    }

    // ========================================================================
    // Field
    // ========================================================================

    /// Start (or clear) weather for every combatant.
    pub fn apply_weather(
        &mut self,
        weather: Option<Weather>,
        source: Option<usize>,
        flags: &mut Flags,
    ) -> Result<bool> {
        let current = self.raiders.first().and_then(|r| r.field.weather);
        if current == weather && weather.is_some() {
            return Ok(false);
        }
        if current.is_some_and(Weather::is_primal) && !weather.is_some_and(Weather::is_primal) {
            if let Some(src) = source {
                flags.push(src, "The weather did not change");
            }
            return Ok(false);
        }
        let extended = match (weather.and_then(Weather::extender), source) {
            (Some(rock), Some(src)) => self.raider(src)?.has_item(rock),
            _ => false,
        };
        let turns = match weather {
            Some(w) if w.is_primal() => 0,
            _ if extended => 8,
            _ => 5,
        };
        for raider in &mut self.raiders {
            raider.field.set_weather(weather, turns);
        }
        if let Some(src) = source {
            let message = match weather {
                Some(w) => format!("{} started", w.name()),
                None => "The weather cleared".to_string(),
            };
            flags.push(src, message);
        }
        for id in 0..self.len() {
            self.update_qp(id, flags)?;
        }
        Ok(true)
    }

    /// Start (or clear) terrain for every combatant.
    pub fn apply_terrain(
        &mut self,
        terrain: Option<Terrain>,
        source: Option<usize>,
        flags: &mut Flags,
    ) -> Result<bool> {
        let current = self.raiders.first().and_then(|r| r.field.terrain);
        if current == terrain && terrain.is_some() {
            return Ok(false);
        }
        let extended = match source {
            Some(src) => self.raider(src)?.has_item("Terrain Extender"),
            None => false,
        };
        let turns = if extended { 8 } else { 5 };
        for raider in &mut self.raiders {
            raider.field.set_terrain(terrain, turns);
        }
        if let Some(src) = source {
            let message = match terrain {
                Some(t) => format!("{} started", t.name()),
                None => "The terrain cleared".to_string(),
            };
            flags.push(src, message);
        }
        for id in 0..self.len() {
            self.check_seed(id, flags)?;
            self.update_qp(id, flags)?;
        }
        Ok(true)
    }

    /// Toggle a room for every combatant (re-using an active room ends it).
    pub fn apply_room(&mut self, room: Room, source: usize, flags: &mut Flags) -> Result<()> {
        let active = self.raider(source)?.field.room(room) > 0;
        let turns = if active { 0 } else { 5 };
        for raider in &mut self.raiders {
            *raider.field.room_mut(room) = turns;
        }
        let verb = if active { "ended" } else { "started" };
        flags.push(source, format!("{} {}", room.name(), verb));

        if room == Room::TrickRoom && !active {
            for id in 0..self.len() {
                if self.raider(id)?.has_item("Room Service") {
                    self.consume_item(id, flags)?;
                    self.apply_stat_change(id, Boosts::single(BoostId::Spe, -1), Some(id), flags)?;
                }
            }
        }
        Ok(())
    }

    /// Set a side counter for `id` and its allies. Screens last 8 turns with
    /// Light Clay.
    pub fn apply_side_counter(
        &mut self,
        id: usize,
        counter: SideCounter,
        flags: &mut Flags,
    ) -> Result<bool> {
        let raider = self.raider(id)?;
        if raider.field.attacker_side.is_active(counter) {
            return Ok(false);
        }
        let extended = counter.is_screen() && raider.has_item("Light Clay");
        let turns = if extended { 8 } else { counter.base_turns() };
        for member in self.side_of(id) {
            *self.raider_mut(member)?.field.attacker_side.counter_mut(counter) = turns;
        }
        flags.push(id, format!("{} was set for {} turns", counter.name(), turns));
        Ok(true)
    }

    /// Clear screens and hazards from every combatant on `id`'s side.
    pub fn clear_side(&mut self, id: usize, screens: bool, hazards: bool) -> Result<()> {
        for member in self.side_of(id) {
            let side = &mut self.raider_mut(member)?.field.attacker_side;
            if screens {
                side.clear_screens();
            }
            if hazards {
                side.clear_hazards();
            }
        }
        Ok(())
    }

    fn check_seed(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        let raider = self.raider(id)?;
        let Some(item) = raider.active_item() else {
            return Ok(());
        };
        let seed = TERRAIN_SEEDS
            .iter()
            .find(|(name, terrain, _)| *name == item && raider.field.has_terrain(*terrain));
        if let Some(&(_, _, stat)) = seed {
            self.consume_item(id, flags)?;
            self.apply_stat_change(id, Boosts::single(stat, 1), Some(id), flags)?;
        }
        Ok(())
    }

    /// Re-evaluate Protosynthesis / Quark Drive after weather, terrain or
    /// item changes.
    pub fn update_qp(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        let gen = self.gen;
        let raider = self.raider(id)?;
        let environment = if raider.has_ability("Protosynthesis") {
            raider.field.is_sun()
        } else if raider.has_ability("Quark Drive") {
            raider.field.has_terrain(Terrain::Electric)
        } else {
            return Ok(());
        };

        if raider.ability_on {
            if !environment && !raider.used_booster_energy {
                let raider = self.raider_mut(id)?;
                raider.ability_on = false;
                raider.boosted_stat = None;
                flags.push(id, format!("{}'s boost faded", raider.display_name()));
            }
            return Ok(());
        }

        if !environment {
            if !raider.has_item("Booster Energy") {
                return Ok(());
            }
            self.consume_item(id, flags)?;
            self.raider_mut(id)?.used_booster_energy = true;
        }
        let raider = self.raider_mut(id)?;
        let stat = get_qp_boosted_stat(raider, false, gen);
        raider.ability_on = true;
        raider.boosted_stat = Some(stat);
        let ability = raider.ability.clone().unwrap_or_default();
        flags.push(
            id,
            format!("{}'s {} boosted its {}", raider.display_name(), ability, stat.short_name()),
        );
        Ok(())
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn take_item(&mut self, id: usize, flags: &mut Flags, drop_conditions: bool) -> Result<Option<String>> {
        let raider = self.raider_mut(id)?;
        let Some(item) = raider.item.take() else {
            return Ok(None);
        };
        if drop_conditions {
            raider.rolls.remove_sequential_condition(&item);
        }
        if raider.has_ability("Unburden") {
            raider.ability_on = true;
        }
        self.symbiosis(id, flags)?;
        Ok(Some(item))
    }

    /// Remove the held item (Knock Off, Trick, Bug Bite). Roll conditions tied
    /// to it are dropped from the tracker.
    pub fn lose_item(&mut self, id: usize, flags: &mut Flags) -> Result<Option<String>> {
        self.take_item(id, flags, true)
    }

    /// Use up the held item. The tracker keeps its layers since the item's
    /// effect already happened in them.
    pub fn consume_item(&mut self, id: usize, flags: &mut Flags) -> Result<Option<String>> {
        let item = self.take_item(id, flags, false)?;
        if let Some(item) = &item {
            log::debug!("slot {} consumed {}", id, item);
        }
        Ok(item)
    }

    /// Give `item` to a combatant with an empty hand.
    pub fn receive_item(&mut self, id: usize, item: String, flags: &mut Flags) -> Result<bool> {
        let raider = self.raider_mut(id)?;
        if raider.item.is_some() || raider.is_fainted() {
            return Ok(false);
        }
        raider.rolls.add_sequential_condition(&item);
        if raider.has_ability("Unburden") {
            raider.ability_on = false;
        }
        flags.push(id, format!("{} obtained {}", raider.display_name(), item));
        raider.item = Some(item);
        self.check_hp_berries(id, flags)?;
        self.check_status_berry(id, flags)?;
        self.check_seed(id, flags)?;
        self.update_qp(id, flags)?;
        Ok(true)
    }

    /// An ally with Symbiosis hands over its item. The fastest one wins
    /// (slowest under Trick Room).
    fn symbiosis(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        let gen = self.gen;
        let trick_room = self.raider(id)?.field.is_trick_room();
        let mut givers: Vec<(usize, u32)> = self
            .allies(id)
            .into_iter()
            .filter_map(|ally| self.raiders.get(ally))
            .filter(|r| !r.is_fainted() && r.has_ability("Symbiosis") && r.item.is_some())
            .map(|r| (r.id, get_modified_stat(r.stat(StatId::Spe), r.boosts.spe, gen)))
            .collect();
        if givers.is_empty() || self.raider(id)?.is_fainted() {
            return Ok(());
        }
        givers.sort_by_key(|&(ally, speed)| (speed, std::cmp::Reverse(ally)));
        let giver = if trick_room { givers[0].0 } else { givers[givers.len() - 1].0 };

        let Some(item) = self.raider_mut(giver)?.item.take() else {
            return Ok(());
        };
        let name = self.raider(giver)?.display_name();
        flags.push(giver, format!("{} shared its {}", name, item));
        self.receive_item(id, item, flags)?;
        Ok(())
    }

    // ========================================================================
    // Ability / form
    // ========================================================================

    /// Replace the ability (Skill Swap, Entrainment, Worry Seed...). The new
    /// ability's switch-in effect fires.
    pub fn change_ability(&mut self, id: usize, ability: Option<String>, flags: &mut Flags) -> Result<()> {
        let raider = self.raider_mut(id)?;
        if raider.has_ability("Sturdy") {
            raider.rolls.remove_persistent_condition("Sturdy");
        }
        if raider.has_any_ability(&["Protosynthesis", "Quark Drive"]) {
            raider.boosted_stat = None;
        }
        raider.ability = ability;
        raider.ability_nullified = false;
        raider.ability_on = false;
        if raider.has_ability("Sturdy") {
            raider.rolls.add_persistent_condition("Sturdy");
        }
        if let Some(name) = raider.ability.clone() {
            flags.push(id, format!("{} acquired {}", raider.display_name(), name));
        }
        self.run_switch_in_ability(id, flags)?;
        self.update_qp(id, flags)
    }

    /// Copy the target's types, stats (except HP), stages, ability and moves.
    pub fn transform(&mut self, id: usize, target: usize, flags: &mut Flags) -> Result<()> {
        let source = self.raider(target)?.clone();
        let raider = self.raider_mut(id)?;
        if raider.volatile.has(Volatiles::TRANSFORMED) || source.volatile.has(Volatiles::TRANSFORMED) {
            return Ok(());
        }
        let hp = raider.stats.hp;
        raider.types = source.types.clone();
        raider.stats = source.stats;
        raider.stats.hp = hp;
        raider.boosts = source.boosts;
        raider.ability = source.ability.clone();
        raider.ability_on = false;
        raider.moves = source.moves.clone();
        raider.weight_kg = source.weight_kg;
        raider.volatile.set(Volatiles::TRANSFORMED, true);
        flags.push(id, format!("{} transformed into {}", raider.display_name(), source.name));
        Ok(())
    }

    fn run_switch_in_ability(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        if let Some(hook) = self
            .ability_of(id)
            .and_then(|a| abilities::hooks(&a))
            .and_then(|h| h.on_switch_in)
        {
            hook(self, id, flags)?;
        }
        Ok(())
    }

    /// Entry effects of ability and item.
    pub fn switch_in(&mut self, id: usize, flags: &mut Flags) -> Result<()> {
        self.run_switch_in_ability(id, flags)?;
        if let Some(hook) = self
            .item_of(id)
            .and_then(|i| items::hooks(&i))
            .and_then(|h| h.on_switch_in)
        {
            hook(self, id, flags)?;
        }
        self.check_seed(id, flags)?;
        self.update_qp(id, flags)
    }
}

/// "+1 Atk / -1 Def" style summary.
pub fn describe_boosts(boosts: &Boosts) -> String {
    boosts
        .iter()
        .filter(|(_, v)| *v != 0)
        .map(|(stat, v)| format!("{:+} {}", v, stat.short_name()))
        .collect::<Vec<_>>()
        .join(" / ")
}
