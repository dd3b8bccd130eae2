//! Single move execution.
//!
//! [`RaidMove::resolve`] clones the state and walks one move through its
//! phases: can-move checks, charging, targets, protection and immunities,
//! damage, drain and healing, flinch, stat changes, ailments, field effects,
//! the move's own handler, held-item follow-ups and move history. Every
//! early exit still leaves a description on the result.

use crate::abilities;
use crate::core_data::{Boosts, BoostId, EffectCategory, MoveData, MoveFlags, MoveTarget, Status};
use crate::damage::{self, DamageContext, DamageOptions, DamageResult};
use crate::error::{EngineError, Result};
use crate::mechanics::{apply_modifier, crit_chance, hit_chance};
use crate::moves::hooks::{EffectContext, MoveHooks};
use crate::moves::registry::FieldEffect;
use crate::moves::{MoveOptions, MoveResult};
use crate::rolls::{concat, Distribution};
use crate::state::{HitInfo, RaidState, SideFlags, Volatiles, Weather, BOSS};
use crate::types::Type;

/// Placeholder action: the combatant does nothing but its held items and
/// abilities still get a chance to react.
pub const NO_MOVE: &str = "(No Move)";

/// Boss action resolved by the turn to its strongest move.
pub const MOST_DAMAGING: &str = "(Most Damaging)";

/// Boss action chosen by [`crate::battle::optimize_boss_moves`] to hurt the
/// raiders most over the rest of the battle.
pub const OPTIMAL_MOVE: &str = "(Optimal Move)";

/// Priority after ability hooks (Prankster, Gale Wings, Triage).
pub fn move_priority(raider: &crate::state::Raider, move_data: &MoveData) -> i8 {
    match raider
        .active_ability()
        .and_then(abilities::hooks)
        .and_then(|h| h.on_modify_priority)
    {
        Some(hook) => hook(raider, move_data, move_data.priority),
        None => move_data.priority,
    }
}

fn is_spread(target: MoveTarget) -> bool {
    matches!(target, MoveTarget::AllOpponents | MoveTarget::AllOtherPokemon)
}

fn percent(chance: f64) -> String {
    let value = chance * 100.0;
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Swallow a roll tracker cap breach into the result; it is reported, not
/// fatal.
fn track(out: &mut MoveResult, result: Result<()>) -> Result<()> {
    match result {
        Err(EngineError::DidNotConverge { iterations }) => {
            log::warn!(
                "{}: roll distribution did not converge after {} iterations",
                out.move_name,
                iterations
            );
            let message = format!("Roll distribution did not converge after {} iterations", iterations);
            out.warnings.push(message.clone());
            out.anomalies.push(message);
            Ok(())
        }
        other => other,
    }
}

fn roll_values(result: &DamageResult) -> Vec<i64> {
    result.damage.values().into_iter().map(i64::from).collect()
}

/// One move from one combatant at one target.
#[derive(Debug, Clone)]
pub struct RaidMove<'a> {
    pub move_data: &'a MoveData,
    pub user: usize,
    /// Selected target. Self-targeting and field moves ignore it.
    pub target: usize,
    pub options: MoveOptions,
    /// An earlier move this turn made the user flinch.
    pub flinched: bool,
}

impl<'a> RaidMove<'a> {
    pub fn new(move_data: &'a MoveData, user: usize, target: usize) -> Self {
        Self {
            move_data,
            user,
            target,
            options: MoveOptions::default(),
            flinched: false,
        }
    }

    pub fn with_options(mut self, options: MoveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn flinched(mut self, flinched: bool) -> Self {
        self.flinched = flinched;
        self
    }

    fn hooks(&self) -> Option<&'static MoveHooks> {
        super::hooks(&self.move_data.name)
    }

    /// Execute the move against a clone of `state`.
    ///
    /// Only a caller contract violation (a raider using a boss action, a slot
    /// outside the state) is an error. Everything the game itself allows,
    /// including failures, lands in the returned [`MoveResult`].
    pub fn resolve(&self, state: &RaidState) -> Result<MoveResult> {
        let data = self.move_data;
        let boss_action = data.boss_only || self.hooks().is_some_and(|h| h.boss_action);
        if boss_action && self.user != BOSS {
            return Err(EngineError::IllegalAction(format!(
                "slot {} cannot use the boss action {}",
                self.user, data.name
            )));
        }
        state.raider(self.user)?;
        state.raider(self.target)?;

        let mut out = MoveResult::empty(state.clone(), &data.name, self.user, self.target);
        log::debug!(
            "slot {} uses {} on slot {}",
            self.user,
            data.name,
            self.target
        );

        if data.name == NO_MOVE {
            out.state.update_qp(self.user, &mut out.flags)?;
            out.state.check_hp_berries(self.user, &mut out.flags)?;
            return Ok(out);
        }

        if let Some(reason) = self.can_move(&mut out)? {
            out.flags.push(self.user, reason.clone());
            out.desc[self.user] = reason;
            return Ok(out);
        }
        if self.charge_turn(&mut out)? {
            self.finish_move(&mut out, false)?;
            return Ok(out);
        }

        let targets = self.targets(&out.state);
        let field_move = super::field_effect(&data.name).is_some();
        if targets.is_empty() && !field_move && !matches!(data.target, MoveTarget::UsersField
            | MoveTarget::OpponentsField
            | MoveTarget::EntireField
            | MoveTarget::AllPokemon
            | MoveTarget::FaintingPokemon)
        {
            out.flags.push(self.user, "But there was no target");
            out.desc[self.user] = out.fallback_line();
            self.finish_move(&mut out, false)?;
            return Ok(out);
        }

        let hooks = self.hooks();
        let affected_all = targets.clone();
        if let Some(on_try) = hooks.and_then(|h| h.on_try) {
            let ctx = EffectContext {
                move_data: data,
                user: self.user,
                target: self.target,
                affected: &affected_all,
                damage: &out.damage,
                is_crit: self.options.crit,
                options: &self.options,
            };
            if let Some(reason) = on_try(&out.state, &ctx) {
                out.flags.push(self.user, reason.clone());
                out.desc[self.user] = format!("{} ({})", out.fallback_line(), reason);
                self.finish_move(&mut out, false)?;
                return Ok(out);
            }
        }

        let mut affected = Vec::new();
        for &id in &targets {
            if let Some(through_protect) = self.check_blocked(&mut out, id)? {
                affected.push((id, through_protect));
            }
        }
        let affected_ids: Vec<usize> = affected.iter().map(|&(id, _)| id).collect();

        if data.deals_damage() {
            for &(id, through_protect) in &affected {
                let outcome = self.hit_target(&mut out, id, through_protect);
                match outcome {
                    Ok(()) => {}
                    Err(err @ EngineError::IllegalAction(_)) | Err(err @ EngineError::InvalidSlot(_)) => {
                        return Err(err)
                    }
                    Err(err) => {
                        log::warn!("{} against slot {} failed: {}", data.name, id, err);
                        out.anomalies.push(format!("{} against slot {}: {}", data.name, id, err));
                        out.desc[id] = out.fallback_line();
                    }
                }
            }
            if affected.is_empty() && out.desc.iter().all(String::is_empty) {
                out.desc[self.user] = out.fallback_line();
            }
        }

        let landed = !affected_ids.is_empty() || targets.is_empty();
        if landed {
            self.apply_drain(&mut out)?;
            self.apply_move_healing(&mut out, &affected_ids)?;
            self.apply_self_damage(&mut out)?;
            self.apply_flinch(&mut out, &affected_ids)?;
            self.apply_stat_changes(&mut out, &affected_ids)?;
            self.apply_ailment(&mut out, &affected_ids)?;
            self.apply_field_effect(&mut out)?;
            self.apply_unique(&mut out, &affected_ids)?;
            self.apply_item_followups(&mut out)?;
        }

        if out.desc.iter().all(String::is_empty) {
            out.desc[self.user] = out.fallback_line();
        }
        self.finish_move(&mut out, landed)?;
        Ok(out)
    }

    // ========================================================================
    // Can-move checks
    // ========================================================================

    /// Why the user cannot act, if it cannot. Warnings for chance-based
    /// failures (full paralysis, confusion) are recorded but the move goes on.
    fn can_move(&self, out: &mut MoveResult) -> Result<Option<String>> {
        let data = self.move_data;
        let raider = out.state.raider_mut(self.user)?;
        let name = raider.display_name();

        if raider.is_fainted() {
            return Ok(Some(format!("{} has fainted and cannot move", name)));
        }
        if raider.volatile.has(Volatiles::RECHARGING) {
            raider.volatile.set(Volatiles::RECHARGING, false);
            return Ok(Some(format!("{} must recharge", name)));
        }
        if self.flinched && !raider.has_ability("Inner Focus") {
            return Ok(Some(format!("{} flinched", name)));
        }

        match raider.status {
            Some(Status::Sleep) => {
                if raider.volatile.sleep_turns == 0 {
                    raider.status = None;
                    out.flags.push(self.user, format!("{} woke up", name));
                } else {
                    let step = if raider.has_ability("Early Bird") { 2 } else { 1 };
                    raider.volatile.sleep_turns = raider.volatile.sleep_turns.saturating_sub(step);
                    return Ok(Some(format!("{} is fast asleep", name)));
                }
            }
            Some(Status::Freeze) => {
                if data.has_flag(MoveFlags::DEFROST) {
                    raider.status = None;
                    out.flags.push(self.user, format!("{} thawed out", name));
                } else {
                    out.warnings.push(format!("{} has a 20% chance to thaw", name));
                    return Ok(Some(format!("{} is frozen solid", name)));
                }
            }
            Some(Status::Paralysis) => {
                out.warnings.push(format!("{} may be fully paralyzed (25%)", name));
            }
            _ => {}
        }

        if raider.volatile.has(Volatiles::CONFUSED) {
            raider.volatile.confusion_turns = raider.volatile.confusion_turns.saturating_sub(1);
            if raider.volatile.confusion_turns == 0 {
                raider.volatile.set(Volatiles::CONFUSED, false);
                out.flags.push(self.user, format!("{} snapped out of confusion", name));
            } else {
                out.warnings.push(format!("{} may hurt itself in confusion (33%)", name));
            }
        }

        if raider.volatile.has(Volatiles::TAUNTED) && data.is_status() {
            return Ok(Some(format!("{} can't use {} after the taunt", name, data.name)));
        }
        if raider.volatile.has(Volatiles::THROAT_CHOPPED) && data.has_flag(MoveFlags::SOUND) {
            return Ok(Some(format!("{} can't use {} after Throat Chop", name, data.name)));
        }
        if raider.volatile.has(Volatiles::HEAL_BLOCKED) && data.has_flag(MoveFlags::HEAL) {
            return Ok(Some(format!("{} can't use {} under Heal Block", name, data.name)));
        }
        Ok(None)
    }

    /// Two-turn moves. Returns `true` when this turn is spent charging.
    fn charge_turn(&self, out: &mut MoveResult) -> Result<bool> {
        let data = self.move_data;
        if !data.has_flag(MoveFlags::CHARGE) {
            return Ok(false);
        }
        let raider = out.state.raider_mut(self.user)?;
        if raider.volatile.has(Volatiles::CHARGING) {
            raider.volatile.set(Volatiles::CHARGING, false);
            return Ok(false);
        }
        let instant = match data.name.as_str() {
            "Solar Beam" | "Solar Blade" => raider.field.is_sun(),
            "Electro Shot" => raider.field.is_rain(),
            _ => false,
        };
        if instant {
            return Ok(false);
        }
        let name = raider.display_name();
        if raider.has_item("Power Herb") {
            out.state.consume_item(self.user, &mut out.flags)?;
            out.flags.push(self.user, format!("{} became fully charged due to its Power Herb", name));
            return Ok(false);
        }
        raider.volatile.set(Volatiles::CHARGING, true);
        let message = format!("{} is charging {}", name, data.name);
        out.flags.push(self.user, message.clone());
        out.desc[self.user] = message;
        Ok(true)
    }

    // ========================================================================
    // Targets, protection and immunities
    // ========================================================================

    fn targets(&self, state: &RaidState) -> Vec<usize> {
        let ids = match self.move_data.target {
            MoveTarget::User => vec![self.user],
            MoveTarget::AllAllies => state.allies(self.user),
            MoveTarget::UserAndAllies => state.side_of(self.user),
            MoveTarget::UsersField
            | MoveTarget::OpponentsField
            | MoveTarget::EntireField
            | MoveTarget::AllPokemon
            | MoveTarget::FaintingPokemon => Vec::new(),
            _ => vec![self.target],
        };
        ids.into_iter()
            .filter(|&id| state.raider(id).is_ok_and(|r| !r.is_fainted()))
            .collect()
    }

    /// `None` when the target is out of reach of the move; otherwise whether
    /// the hit goes through a protection move at reduced power.
    fn check_blocked(&self, out: &mut MoveResult, id: usize) -> Result<Option<bool>> {
        let data = self.move_data;
        if id == self.user {
            return Ok(Some(false));
        }
        let user = out.state.raider(self.user)?;
        let target = out.state.raider(id)?;
        let side = &target.field.attacker_side;
        let opponent = (id == BOSS) != (self.user == BOSS);
        let target_name = target.display_name();

        let mut through_protect = false;
        if opponent && data.has_flag(MoveFlags::PROTECT) {
            let guarded = if side.is_protected() {
                Some("Protect")
            } else if side.has(SideFlags::WIDE_GUARD) && is_spread(data.target) {
                Some("Wide Guard")
            } else if side.has(SideFlags::QUICK_GUARD) && move_priority(user, data) > 0 {
                Some("Quick Guard")
            } else {
                None
            };
            if let Some(guard) = guarded {
                if data.has_flag(MoveFlags::PIERCES_PROTECT) && guard == "Protect" {
                    through_protect = true;
                } else {
                    out.flags.push(id, format!("{} protected itself with {}", target_name, guard));
                    return Ok(None);
                }
            }
        }

        if data.is_status() && opponent {
            let powder_immune = data.has_flag(MoveFlags::POWDER)
                && (target.has_type(Type::Grass)
                    || target.has_ability("Overcoat")
                    || target.has_item("Safety Goggles"));
            let prankster_immune =
                user.has_ability("Prankster") && target.has_type(Type::Dark);
            let ground_immune = data.name == "Thunder Wave" && target.has_type(Type::Ground);
            let gold_immune = target.has_ability("Good as Gold");
            if powder_immune || prankster_immune || ground_immune || gold_immune {
                out.flags.push(id, format!("It doesn't affect {}", target_name));
                return Ok(None);
            }
            let field = out.state.move_field(self.user, id)?;
            let ctx = DamageContext::new(out.state.gen, user, target, data, &field);
            if damage::ability_immune(&ctx) {
                self.run_absorb(out, id)?;
                return Ok(None);
            }
            let accuracy = hit_chance(user, target, data, &field);
            if accuracy < 1.0 {
                out.warnings.push(format!(
                    "{} has a {}% chance to hit {}",
                    user.display_name(),
                    percent(accuracy),
                    target_name
                ));
            }
        }
        Ok(Some(through_protect))
    }

    fn run_absorb(&self, out: &mut MoveResult, id: usize) -> Result<()> {
        let target = out.state.raider(id)?;
        let name = target.display_name();
        let hook = target
            .active_ability()
            .and_then(abilities::hooks)
            .and_then(|h| h.on_absorb);
        let ability = target.active_ability().unwrap_or_default().to_string();
        out.flags.push(id, format!("{}'s {} absorbed the move", name, ability));
        if let Some(hook) = hook {
            let result = hook(&mut out.state, id, &mut out.flags);
            track(out, result)?;
        }
        Ok(())
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Number of hits for a variable-hit move.
    fn hit_count(&self, state: &RaidState) -> Result<u8> {
        let data = self.move_data;
        if !data.is_multi_hit() {
            return Ok(1);
        }
        let (min, max) = (data.min_hits.max(1), data.max_hits);
        if let Some(hits) = self.options.hits {
            return Ok(hits.clamp(min, max));
        }
        let user = state.raider(self.user)?;
        let hits = if min == max || user.has_ability("Skill Link") {
            max
        } else if user.has_item("Loaded Dice") {
            4
        } else {
            3
        };
        Ok(hits.clamp(min, max))
    }

    fn hit_target(&self, out: &mut MoveResult, id: usize, through_protect: bool) -> Result<()> {
        let data = self.move_data;
        let gen = out.state.gen;
        let hits = self.hit_count(&out.state)?;
        let mut landed = 0u8;
        let mut total = 0i64;
        let mut description = String::new();

        for hit in 1..=hits {
            let attacker = out.state.raider(self.user)?;
            let defender = out.state.raider(id)?;
            if attacker.is_fainted() || defender.is_fainted() {
                break;
            }
            let field = out.state.move_field(self.user, id)?;
            let accuracy = if hit == 1 {
                hit_chance(attacker, defender, data, &field)
            } else {
                1.0
            };
            let crit = if self.options.crit {
                1.0
            } else {
                crit_chance(gen, attacker, defender, data)
            };
            let options = DamageOptions {
                is_crit: crit >= 1.0,
                hit_index: hit,
                through_protect,
            };
            let result = damage::calculate(gen, attacker, defender, data, &field, &options);
            let defender_name = defender.display_name();
            let attacker_name = attacker.display_name();
            let contact = data.has_flag(MoveFlags::CONTACT)
                && !attacker.has_ability("Long Reach")
                && !(attacker.has_item("Punching Glove") && data.has_flag(MoveFlags::PUNCH));

            if result.absorbed {
                self.run_absorb(out, id)?;
                break;
            }
            if result.effectiveness == 0 || (hit == 1 && result.damage.is_zero()) {
                out.flags.push(id, format!("It doesn't affect {}", defender_name));
                description = result.description;
                break;
            }
            if accuracy <= 0.0 {
                out.flags.push(id, format!("{}'s attack missed", attacker_name));
                break;
            }

            let mut dist = Distribution::uniform(&roll_values(&result), 1.0);
            if crit > 0.0 && crit < 1.0 {
                let crit_result = damage::calculate(
                    gen,
                    attacker,
                    defender,
                    data,
                    &field,
                    &DamageOptions {
                        is_crit: true,
                        ..options
                    },
                );
                dist = concat(
                    &dist.scaled(1.0 - crit),
                    &Distribution::uniform(&roll_values(&crit_result), crit),
                );
                if hit == 1 {
                    out.warnings.push(format!(
                        "{} has a {}% chance to land a critical hit",
                        attacker_name,
                        percent(crit)
                    ));
                }
            }
            if accuracy < 1.0 {
                dist = concat(&dist.scaled(accuracy), &Distribution::uniform(&[0], 1.0 - accuracy));
                out.warnings.push(format!(
                    "{} has a {}% chance to hit {}",
                    attacker_name,
                    percent(accuracy),
                    defender_name
                ));
            }

            let amount = self.options.roll.pick(&result.damage.values()) as i64;
            let hit_info = HitInfo {
                attacker: self.user,
                move_name: data.name.clone(),
                move_type: result.move_type,
                category: result.category,
                flags: data.flags,
                effectiveness: result.effectiveness,
                is_crit: result.is_crit,
                damage: amount as u32,
            };
            let applied = out
                .state
                .apply_damage(id, amount, Some(&dist), Some(&hit_info), &mut out.flags);
            track(out, applied)?;
            out.damage[id] += amount;
            total += amount;
            landed += 1;
            description = result.description;

            if contact {
                out.state.run_on_contact(id, self.user, &mut out.flags)?;
            }
        }

        if hits > 1 && landed > 0 {
            description = format!("{} ({} hits, {} total)", description, landed, total);
        }
        out.desc[id] = description;
        Ok(())
    }

    // ========================================================================
    // HP effects
    // ========================================================================

    fn dealt(&self, out: &MoveResult) -> i64 {
        out.damage
            .iter()
            .enumerate()
            .filter(|&(id, _)| id != self.user)
            .map(|(_, &d)| d.max(0))
            .sum()
    }

    fn apply_drain(&self, out: &mut MoveResult) -> Result<()> {
        let drain = self.move_data.drain as i64;
        let dealt = self.dealt(out);
        if drain == 0 || dealt <= 0 {
            return Ok(());
        }
        let user = out.state.raider(self.user)?;
        if drain > 0 {
            let mut heal = (dealt * drain / 100).max(1);
            if user.has_item("Big Root") {
                heal = apply_modifier(heal as u32, 5324) as i64;
            }
            let oozed = (0..out.state.len()).any(|id| {
                id != self.user
                    && out.damage[id] > 0
                    && out.state.raider(id).is_ok_and(|r| r.has_ability("Liquid Ooze"))
            });
            if oozed {
                let result = out.state.apply_damage(self.user, heal, None, None, &mut out.flags);
                track(out, result)?;
                out.drain[self.user] -= heal;
                out.flags.push(self.user, "It sucked up the liquid ooze");
            } else {
                let before = out.state.raider(self.user)?.cur_hp as i64;
                let result = out.state.apply_healing(self.user, heal, &mut out.flags);
                track(out, result)?;
                out.drain[self.user] += out.state.raider(self.user)?.cur_hp as i64 - before;
            }
        } else {
            if user.has_any_ability(&["Rock Head", "Magic Guard"]) {
                return Ok(());
            }
            let recoil = (dealt * -drain / 100).max(1);
            let result = out.state.apply_damage(self.user, recoil, None, None, &mut out.flags);
            track(out, result)?;
            out.drain[self.user] -= recoil;
        }
        Ok(())
    }

    fn apply_move_healing(&self, out: &mut MoveResult, affected: &[usize]) -> Result<()> {
        let healing = self.move_data.healing as i64;
        if healing <= 0 || self.move_data.deals_damage() {
            return Ok(());
        }
        for &id in affected {
            let raider = out.state.raider(id)?;
            let before = raider.cur_hp as i64;
            let amount = raider.max_hp as i64 * healing / 100;
            let result = out.state.apply_healing(id, amount, &mut out.flags);
            track(out, result)?;
            out.healing[id] += out.state.raider(id)?.cur_hp as i64 - before;
        }
        Ok(())
    }

    fn apply_self_damage(&self, out: &mut MoveResult) -> Result<()> {
        let percent = self.move_data.self_damage as i64;
        if percent <= 0 {
            return Ok(());
        }
        let user = out.state.raider(self.user)?;
        if user.has_ability("Magic Guard") {
            return Ok(());
        }
        let amount = (user.max_hp as i64 * percent / 100).max(1);
        let result = out.state.apply_damage(self.user, amount, None, None, &mut out.flags);
        track(out, result)?;
        out.damage[self.user] += amount;
        Ok(())
    }

    // ========================================================================
    // Secondary effects
    // ========================================================================

    /// Sheer Force drops chance-based secondaries of damaging moves.
    fn secondaries_suppressed(&self, out: &MoveResult) -> Result<bool> {
        let data = self.move_data;
        let has_chance = (data.ailment_chance > 0 && data.ailment_chance < 100)
            || (data.stat_chance > 0 && data.stat_chance < 100)
            || data.flinch_chance > 0;
        Ok(data.deals_damage() && has_chance && out.state.raider(self.user)?.has_ability("Sheer Force"))
    }

    fn shielded_from_secondaries(&self, out: &MoveResult, id: usize) -> Result<bool> {
        if id == self.user || !self.move_data.deals_damage() {
            return Ok(false);
        }
        let target = out.state.raider(id)?;
        Ok(target.has_item("Covert Cloak") || target.has_ability("Shield Dust"))
    }

    fn apply_flinch(&self, out: &mut MoveResult, affected: &[usize]) -> Result<()> {
        let data = self.move_data;
        if !data.deals_damage() || self.secondaries_suppressed(out)? {
            return Ok(());
        }
        let user = out.state.raider(self.user)?;
        let mut chance = data.flinch_chance as u32;
        if chance == 0 && (user.has_item("King's Rock") || user.has_item("Razor Fang")) {
            chance = 10;
        }
        if chance == 0 {
            return Ok(());
        }
        for &id in affected {
            if id == self.user || out.damage[id] <= 0 || self.shielded_from_secondaries(out, id)? {
                continue;
            }
            let target = out.state.raider(id)?;
            if target.has_ability("Inner Focus") || target.is_fainted() {
                continue;
            }
            let name = target.display_name();
            if chance >= 100 || self.options.secondary_effects {
                out.causes_flinch[id] = true;
                out.flags.push(id, format!("{} will flinch", name));
            } else {
                out.warnings.push(format!("{} has a {}% chance to flinch", name, chance));
            }
        }
        Ok(())
    }

    fn apply_stat_changes(&self, out: &mut MoveResult, affected: &[usize]) -> Result<()> {
        let data = self.move_data;
        if data.stat_changes.is_empty() {
            return Ok(());
        }
        let mut boosts = Boosts::default();
        for change in &data.stat_changes {
            match change.change {
                Some(delta) => boosts.set(change.stat, boosts.get(change.stat) + delta),
                None => {
                    log::warn!("{}: stat change for {:?} has no value", data.name, change.stat);
                    out.anomalies
                        .push(format!("{}: stat change for {:?} has no value", data.name, change.stat));
                }
            }
        }
        if boosts.is_zero() {
            return Ok(());
        }

        let guaranteed = data.stat_chance == 0 || data.stat_chance >= 100;
        if !guaranteed && self.secondaries_suppressed(out)? {
            return Ok(());
        }
        let recipients: Vec<usize> = if data.effect == EffectCategory::DamageRaise {
            if self.dealt(out) > 0 {
                vec![self.user]
            } else {
                Vec::new()
            }
        } else {
            affected.to_vec()
        };

        for id in recipients {
            if data.deals_damage() && id != self.user {
                if out.damage[id] <= 0 || self.shielded_from_secondaries(out, id)? {
                    continue;
                }
            }
            if !guaranteed && !self.options.secondary_effects {
                let name = out.state.raider(id)?.display_name();
                out.warnings.push(format!(
                    "{}% chance for {} {}",
                    data.stat_chance,
                    name,
                    crate::state::describe_boosts(&boosts)
                ));
                continue;
            }
            out.state.apply_stat_change(id, boosts, Some(self.user), &mut out.flags)?;
        }
        Ok(())
    }

    fn apply_ailment(&self, out: &mut MoveResult, affected: &[usize]) -> Result<()> {
        let data = self.move_data;
        let Some(ailment) = data.ailment else {
            return Ok(());
        };
        let guaranteed = data.ailment_chance == 0 || data.ailment_chance >= 100;
        if !guaranteed && self.secondaries_suppressed(out)? {
            return Ok(());
        }
        for &id in affected {
            if data.deals_damage() && (out.damage[id] <= 0 || self.shielded_from_secondaries(out, id)?) {
                continue;
            }
            if !guaranteed && !self.options.secondary_effects {
                let name = out.state.raider(id)?.display_name();
                out.warnings.push(format!("{}% chance to inflict {:?} on {}", data.ailment_chance, ailment, name));
                continue;
            }
            let applied = out
                .state
                .apply_volatile_status(id, ailment, Some(self.user), &mut out.flags)?;
            if !applied && data.is_status() {
                out.flags.push(id, "But it failed!");
            }
        }
        Ok(())
    }

    fn apply_field_effect(&self, out: &mut MoveResult) -> Result<()> {
        let Some(effect) = super::field_effect(&self.move_data.name) else {
            return Ok(());
        };
        let user = self.user;
        let changed = match effect {
            FieldEffect::Weather(weather) => out.state.apply_weather(Some(weather), Some(user), &mut out.flags)?,
            FieldEffect::Terrain(terrain) => out.state.apply_terrain(Some(terrain), Some(user), &mut out.flags)?,
            FieldEffect::Room(room) => {
                out.state.apply_room(room, user, &mut out.flags)?;
                true
            }
            FieldEffect::Side(counter) => {
                let snowing = out
                    .state
                    .raider(user)?
                    .field
                    .has_weather(&[Weather::Snow, Weather::Hail]);
                if counter == crate::state::SideCounter::AuroraVeil && !snowing {
                    false
                } else {
                    out.state.apply_side_counter(user, counter, &mut out.flags)?
                }
            }
            FieldEffect::StealthRock => {
                let mut set = false;
                for id in out.state.opponents(user) {
                    let side = &mut out.state.raider_mut(id)?.field.attacker_side;
                    set |= !side.has(SideFlags::STEALTH_ROCK);
                    side.set(SideFlags::STEALTH_ROCK, true);
                }
                set
            }
            FieldEffect::Spikes => {
                let mut set = false;
                for id in out.state.opponents(user) {
                    let side = &mut out.state.raider_mut(id)?.field.attacker_side;
                    set |= side.spikes < 3;
                    side.spikes = (side.spikes + 1).min(3);
                }
                set
            }
        };
        if !changed {
            out.flags.push(user, "But it failed!");
        }
        Ok(())
    }

    /// The move's own handler. HP it moves is folded into the damage and
    /// healing arrays.
    fn apply_unique(&self, out: &mut MoveResult, affected: &[usize]) -> Result<()> {
        let data = self.move_data;
        let Some(apply) = self.hooks().and_then(|h| h.on_apply) else {
            let inert = data.effect == EffectCategory::Unique
                && !data.deals_damage()
                && super::field_effect(&data.name).is_none();
            if inert {
                log::warn!("{} has no modeled effect", data.name);
                out.anomalies.push(format!("{} has no modeled effect", data.name));
            }
            return Ok(());
        };
        let before: Vec<i64> = out.state.raiders.iter().map(|r| r.cur_hp as i64).collect();
        let ctx = EffectContext {
            move_data: data,
            user: self.user,
            target: self.target,
            affected,
            damage: &out.damage,
            is_crit: self.options.crit,
            options: &self.options,
        };
        let result = apply(&mut out.state, &ctx, &mut out.flags);
        track(out, result)?;
        for (id, &hp) in before.iter().enumerate() {
            let delta = out.state.raider(id)?.cur_hp as i64 - hp;
            if delta > 0 {
                out.healing[id] += delta;
            } else if delta < 0 {
                out.damage[id] -= delta;
            }
        }
        Ok(())
    }

    fn apply_item_followups(&self, out: &mut MoveResult) -> Result<()> {
        let data = self.move_data;
        let dealt = self.dealt(out);
        let user = out.state.raider(self.user)?;
        if user.is_fainted() {
            return Ok(());
        }
        let max_hp = user.max_hp as i64;
        let name = user.display_name();

        if dealt > 0 && user.has_item("Life Orb") && !user.has_ability("Magic Guard") {
            let recoil = (max_hp / 10).max(1);
            let result = out.state.apply_damage(self.user, recoil, None, None, &mut out.flags);
            track(out, result)?;
            out.damage[self.user] += recoil;
            out.flags.push(self.user, format!("{} lost some of its HP to Life Orb", name));
        } else if dealt > 0 && user.has_item("Shell Bell") {
            let before = user.cur_hp as i64;
            let result = out.state.apply_healing(self.user, (dealt / 8).max(1), &mut out.flags);
            track(out, result)?;
            out.healing[self.user] += out.state.raider(self.user)?.cur_hp as i64 - before;
        } else if data.has_flag(MoveFlags::SOUND) && user.has_item("Throat Spray") {
            out.state.consume_item(self.user, &mut out.flags)?;
            out.state
                .apply_stat_change(self.user, Boosts::single(BoostId::Spa, 1), Some(self.user), &mut out.flags)?;
        }
        Ok(())
    }

    // ========================================================================
    // History
    // ========================================================================

    fn finish_move(&self, out: &mut MoveResult, landed: bool) -> Result<()> {
        let data = self.move_data;
        let user = out.state.raider_mut(self.user)?;
        if user.last_move.as_deref() == Some(data.name.as_str()) {
            user.move_repeated = user.move_repeated.saturating_add(1);
        } else {
            user.move_repeated = 0;
        }
        user.last_move = Some(data.name.clone());
        user.last_target = Some(self.target);

        if landed && data.has_flag(MoveFlags::RECHARGE) {
            user.volatile.set(Volatiles::RECHARGING, true);
        }
        let choice_item = user.active_item().is_some_and(|i| i.starts_with("Choice "));
        if choice_item || user.has_ability("Gorilla Tactics") {
            user.is_choice_locked = true;
        }
        if data.deals_damage() {
            user.field.attacker_side.set(SideFlags::HELPING_HAND, false);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoveCatalog;
    use crate::core_data::{MoveCategory, StatTable};
    use crate::mechanics::Generation;
    use crate::moves::RollChoice;
    use crate::state::Raider;
    use pretty_assertions::assert_eq;

    fn raider(name: &str, types: &[Type], hp: u32) -> Raider {
        Raider {
            name: name.to_string(),
            types: types.to_vec(),
            stats: StatTable::from_array([hp as u16, 200, 150, 200, 150, 100]),
            max_hp: hp,
            cur_hp: hp,
            ..Default::default()
        }
    }

    fn state() -> RaidState {
        RaidState::new(
            Generation::Gen9,
            vec![
                raider("Tyranitar", &[Type::Rock, Type::Dark], 1000),
                raider("Garchomp", &[Type::Dragon, Type::Ground], 300),
                raider("Sylveon", &[Type::Fairy], 300),
            ],
        )
    }

    fn catalog_move(name: &str) -> MoveData {
        let (data, found) = MoveCatalog::builtin().resolve(name);
        assert!(found, "{} missing from catalog", name);
        (*data).clone()
    }

    fn max_roll() -> MoveOptions {
        MoveOptions {
            roll: RollChoice::Max,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_does_not_touch_input() {
        let s = state();
        let tackle = catalog_move("Tackle");
        let result = RaidMove::new(&tackle, 1, 0).resolve(&s).unwrap();
        assert_eq!(s, state());
        assert!(result.damage[0] > 0);
        assert_eq!(result.state.raiders[0].cur_hp as i64, 1000 - result.damage[0]);
    }

    #[test]
    fn test_boss_action_from_raider_is_illegal() {
        let s = state();
        let shield = catalog_move("Activate Shield");
        let err = RaidMove::new(&shield, 1, 0).resolve(&s).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction(_)));
        assert!(RaidMove::new(&shield, BOSS, 1).resolve(&s).is_ok());
    }

    #[test]
    fn test_invalid_slot_is_an_error() {
        let s = state();
        let tackle = catalog_move("Tackle");
        let err = RaidMove::new(&tackle, 1, 7).resolve(&s).unwrap_err();
        assert_eq!(err, EngineError::InvalidSlot(7));
    }

    #[test]
    fn test_unknown_move_falls_back_to_generic_line() {
        let s = state();
        let data = MoveData::unknown("Splash");
        let result = RaidMove::new(&data, 1, 0).resolve(&s).unwrap();
        assert_eq!(result.summary(), "Garchomp used Splash on Boss Tyranitar");
        assert_eq!(result.damage, vec![0, 0, 0]);
    }

    #[test]
    fn test_no_move_leaves_history_alone() {
        let s = state();
        let data = catalog_move(NO_MOVE);
        let result = RaidMove::new(&data, 1, 1).resolve(&s).unwrap();
        assert_eq!(result.state.raiders[1].last_move, None);
    }

    #[test]
    fn test_protect_blocks_damage() {
        let mut s = state();
        s.raiders[0].field.attacker_side.set(SideFlags::PROTECTED, true);
        let tackle = catalog_move("Tackle");
        let result = RaidMove::new(&tackle, 1, 0).resolve(&s).unwrap();
        assert_eq!(result.damage[0], 0);
        assert!(result.flags.get(0).iter().any(|f| f.contains("Protect")));
    }

    #[test]
    fn test_sleeping_user_cannot_move() {
        let mut s = state();
        s.raiders[1].status = Some(Status::Sleep);
        s.raiders[1].volatile.sleep_turns = 2;
        let tackle = catalog_move("Tackle");
        let result = RaidMove::new(&tackle, 1, 0).resolve(&s).unwrap();
        assert_eq!(result.damage[0], 0);
        assert_eq!(result.state.raiders[1].volatile.sleep_turns, 1);
        assert!(result.summary().contains("fast asleep"));
    }

    #[test]
    fn test_paralysis_only_warns() {
        let mut s = state();
        s.raiders[1].status = Some(Status::Paralysis);
        let tackle = catalog_move("Tackle");
        let result = RaidMove::new(&tackle, 1, 0).resolve(&s).unwrap();
        assert!(result.damage[0] > 0);
        assert!(result.warnings.iter().any(|w| w.contains("may be fully paralyzed")));
    }

    #[test]
    fn test_multi_hit_description_counts_hits() {
        let s = state();
        let bullet_seed = catalog_move("Bullet Seed");
        let options = MoveOptions {
            hits: Some(5),
            ..max_roll()
        };
        let result = RaidMove::new(&bullet_seed, 1, 0)
            .with_options(options)
            .resolve(&s)
            .unwrap();
        assert!(result.desc[0].contains("(5 hits,"), "{}", result.desc[0]);
        assert_eq!(result.state.raiders[0].hits_taken, 5);
    }

    #[test]
    fn test_recoil_follows_damage() {
        let s = state();
        let double_edge = catalog_move("Double-Edge");
        let result = RaidMove::new(&double_edge, 1, 0)
            .with_options(max_roll())
            .resolve(&s)
            .unwrap();
        assert!(result.drain[1] < 0);
        assert_eq!(result.drain[1], -(result.damage[0] * 33 / 100).max(1));
    }

    #[test]
    fn test_status_move_immunity() {
        let s = state();
        let thunder_wave = catalog_move("Thunder Wave");
        let result = RaidMove::new(&thunder_wave, 0, 1).resolve(&s).unwrap();
        assert_eq!(result.state.raiders[1].status, None);
        assert!(result.flags.get(1).iter().any(|f| f.contains("doesn't affect")));
    }

    #[test]
    fn test_self_boost_move() {
        let s = state();
        let swords_dance = catalog_move("Swords Dance");
        let result = RaidMove::new(&swords_dance, 1, 0).resolve(&s).unwrap();
        assert_eq!(result.state.raiders[1].boosts.atk, 2);
        assert_eq!(result.state.raiders[0].boosts.atk, 0);
    }

    #[test]
    fn test_reflect_sets_the_side_for_five_turns() {
        let s = state();
        let reflect = catalog_move("Reflect");
        let result = RaidMove::new(&reflect, 1, 0).resolve(&s).unwrap();
        assert_eq!(result.state.raiders[1].field.attacker_side.reflect, 5);
        assert_eq!(result.state.raiders[2].field.attacker_side.reflect, 5);
        assert_eq!(result.state.raiders[0].field.attacker_side.reflect, 0);
    }

    #[test]
    fn test_move_history_counts_repeats() {
        let s = state();
        let tackle = catalog_move("Tackle");
        let first = RaidMove::new(&tackle, 1, 0).resolve(&s).unwrap();
        assert_eq!(first.state.raiders[1].move_repeated, 0);
        let second = RaidMove::new(&tackle, 1, 0).resolve(&first.state).unwrap();
        assert_eq!(second.state.raiders[1].move_repeated, 1);
        assert_eq!(second.state.raiders[1].last_move.as_deref(), Some("Tackle"));
    }

    #[test]
    fn test_priority_hooks() {
        let prankster = Raider {
            ability: Some("Prankster".to_string()),
            ..Default::default()
        };
        let status = MoveData {
            category: MoveCategory::Status,
            ..MoveData::unknown("Thunder Wave")
        };
        assert_eq!(move_priority(&prankster, &status), 1);
        assert_eq!(move_priority(&Raider::default(), &status), 0);
    }

    #[test]
    fn test_missing_stat_value_is_an_anomaly() {
        let s = state();
        let data = MoveData {
            category: MoveCategory::Status,
            target: MoveTarget::User,
            effect: EffectCategory::NetGoodStats,
            stat_changes: vec![crate::core_data::StatChange {
                stat: BoostId::Atk,
                change: None,
            }],
            ..MoveData::unknown("Broken Dance")
        };
        let result = RaidMove::new(&data, 1, 1).resolve(&s).unwrap();
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.state.raiders[1].boosts.atk, 0);
    }
}
