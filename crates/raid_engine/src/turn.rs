//! One raid turn: a raider's action against the boss's action.
//!
//! The two moves are ordered by priority, then by final speed, then resolved
//! one after the other on successive states. The end-of-turn pass covers the
//! acting raider's lane and the boss.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::MoveCatalog;
use crate::core_data::{MoveData, MoveFlags};
use crate::damage::{self, DamageOptions};
use crate::end_of_turn;
use crate::error::{EngineError, Result};
use crate::mechanics::get_final_speed;
use crate::moves::{
    move_priority, MoveOptions, MoveResult, RaidMove, MOST_DAMAGING, NO_MOVE, OPTIMAL_MOVE,
};
use crate::state::{Flags, RaidState, SideFlags, BOSS};

fn no_move() -> String {
    NO_MOVE.to_string()
}

/// The raider's side of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInfo {
    pub user: usize,
    pub target: usize,
    #[serde(default = "no_move", rename = "move")]
    pub move_name: String,
    #[serde(default)]
    pub options: MoveOptions,
}

/// The boss's side of a turn. The boss always aims at the acting raider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossMoveInfo {
    #[serde(default = "no_move", rename = "move")]
    pub move_name: String,
    #[serde(default)]
    pub options: MoveOptions,
}

impl Default for BossMoveInfo {
    fn default() -> Self {
        Self {
            move_name: no_move(),
            options: MoveOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnInfo {
    pub raider: MoveInfo,
    #[serde(default)]
    pub boss: BossMoveInfo,
}

impl TurnInfo {
    pub fn new(user: usize, target: usize, raider_move: &str, boss_move: &str) -> Self {
        Self {
            raider: MoveInfo {
                user,
                target,
                move_name: raider_move.to_string(),
                options: MoveOptions::default(),
            },
            boss: BossMoveInfo {
                move_name: boss_move.to_string(),
                options: MoveOptions::default(),
            },
        }
    }

    pub fn with_options(mut self, raider: MoveOptions, boss: MoveOptions) -> Self {
        self.raider.options = raider;
        self.boss.options = boss;
        self
    }

    /// Both sides pass.
    pub fn is_idle(&self) -> bool {
        self.raider.move_name == NO_MOVE && self.boss.move_name == NO_MOVE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub state: RaidState,
    /// The actions as requested, before any substitution.
    pub info: TurnInfo,
    /// Turn counter as shown to players; idle turns do not advance it.
    #[serde(default)]
    pub turn_number: usize,
    /// Move results in execution order.
    pub results: Vec<MoveResult>,
    pub raider_moves_first: bool,
    /// Residual effects after both moves.
    pub end_of_turn_flags: Flags,
}

impl TurnResult {
    pub fn raider_result(&self) -> Option<&MoveResult> {
        self.results.iter().find(|r| r.user != BOSS || r.target == BOSS)
    }

    pub fn boss_result(&self) -> Option<&MoveResult> {
        self.results.iter().find(|r| r.user == BOSS && r.target != BOSS)
    }

    /// Whether the raider side actually acted.
    pub fn raider_acted(&self) -> bool {
        self.info.raider.move_name != NO_MOVE
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.results.iter().flat_map(|r| r.warnings.iter().map(String::as_str))
    }
}

/// A move as it will actually execute after Instruct, Copycat, choice lock
/// and "(Most Damaging)" were worked out.
struct Planned {
    data: Arc<MoveData>,
    user: usize,
    target: usize,
    options: MoveOptions,
    unknown: bool,
}

pub struct RaidTurn<'a> {
    info: &'a TurnInfo,
    catalog: &'a MoveCatalog,
    turn_number: usize,
}

impl<'a> RaidTurn<'a> {
    pub fn new(info: &'a TurnInfo) -> Self {
        Self {
            info,
            catalog: MoveCatalog::builtin(),
            turn_number: 0,
        }
    }

    pub fn with_turn_number(mut self, turn_number: usize) -> Self {
        self.turn_number = turn_number;
        self
    }

    pub fn with_catalog(mut self, catalog: &'a MoveCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Catalog record and whether it is a placeholder.
    fn lookup(&self, name: &str) -> (Arc<MoveData>, bool) {
        let (data, found) = self.catalog.resolve(name);
        (data, !found)
    }

    /// Resolve the turn against a clone of `state`.
    pub fn resolve(&self, state: &RaidState) -> Result<TurnResult> {
        let lane = self.info.raider.user;
        if lane == BOSS {
            return Err(EngineError::IllegalAction(
                "the boss acts through the boss action".to_string(),
            ));
        }
        state.raider(lane)?;
        state.raider(self.info.raider.target)?;

        let raider_move = self.plan_raider(state)?;
        let boss_move = self.plan_boss(state, lane)?;
        let raider_first = self.raider_moves_first(state, lane, &raider_move, &boss_move)?;
        log::debug!(
            "turn: slot {} {} / boss {} ({} first)",
            raider_move.user,
            raider_move.data.name,
            boss_move.data.name,
            if raider_first { "raider" } else { "boss" }
        );

        let (first, second) = if raider_first {
            (&raider_move, &boss_move)
        } else {
            (&boss_move, &raider_move)
        };
        let first_result = execute(first, state, false)?;
        let flinched = first_result.causes_flinch.get(second.user).copied().unwrap_or(false);
        let second_result = execute(second, &first_result.state, flinched)?;

        let mut next = second_result.state.clone();
        let mut flags = Flags::new(next.len());
        end_of_turn::resolve(&mut next, lane, &mut flags)?;
        for id in [lane, BOSS] {
            let raider = next.raider_mut(id)?;
            if raider.is_endure {
                raider.is_endure = false;
                raider.rolls.remove_persistent_condition("Endure");
            }
        }
        for id in 0..next.len() {
            next.raider_mut(id)?.field.attacker_side.set(
                SideFlags::PROTECTED | SideFlags::WIDE_GUARD | SideFlags::QUICK_GUARD,
                false,
            );
        }

        Ok(TurnResult {
            state: next,
            info: self.info.clone(),
            turn_number: self.turn_number,
            results: vec![first_result, second_result],
            raider_moves_first: raider_first,
            end_of_turn_flags: flags,
        })
    }

    // ========================================================================
    // Move substitution
    // ========================================================================

    fn plan_raider(&self, state: &RaidState) -> Result<Planned> {
        let info = &self.info.raider;
        let (data, unknown) = self.lookup(&info.move_name);
        let mut planned = Planned {
            data,
            user: info.user,
            target: info.target,
            options: info.options,
            unknown,
        };
        if planned.data.name == NO_MOVE {
            return Ok(planned);
        }

        let user = state.raider(info.user)?;
        let target = state.raider(info.target)?;
        let requested = planned.data.name.clone();
        match requested.as_str() {
            "Instruct" if info.target != BOSS => {
                let callable = target
                    .last_move
                    .as_deref()
                    .and_then(|name| self.catalog.get(name))
                    .filter(|m| !m.has_flag(MoveFlags::FAIL_INSTRUCT));
                if let Some(called) = callable {
                    planned.user = info.target;
                    planned.target = target.last_target.unwrap_or(info.target);
                    planned.data = called;
                }
            }
            "Copycat" => {
                let callable = target
                    .last_move
                    .as_deref()
                    .and_then(|name| self.catalog.get(name))
                    .filter(|m| !m.has_flag(MoveFlags::FAIL_COPYCAT));
                if let Some(called) = callable {
                    // Aimed back at the user when its last target is the one it copies.
                    planned.target = match user.last_target {
                        Some(last) if last == info.target => info.user,
                        Some(last) => last,
                        None => info.target,
                    };
                    planned.data = called;
                }
            }
            _ if user.is_choice_locked => {
                if let Some(locked) = user.last_move.as_deref().and_then(|name| self.catalog.get(name)) {
                    if locked.name != planned.data.name {
                        log::debug!("slot {} is locked into {}", info.user, locked.name);
                    }
                    planned.data = locked;
                }
            }
            _ => {}
        }
        Ok(planned)
    }

    fn plan_boss(&self, state: &RaidState, lane: usize) -> Result<Planned> {
        let info = &self.info.boss;
        let (mut data, unknown) = self.lookup(&info.move_name);
        if data.name == OPTIMAL_MOVE {
            log::debug!("{} outside the optimizer; using the strongest move", OPTIMAL_MOVE);
        }
        if data.name == MOST_DAMAGING || data.name == OPTIMAL_MOVE {
            data = self.most_damaging(state, lane, info.options)?;
        }
        Ok(Planned {
            data,
            user: BOSS,
            target: lane,
            options: info.options,
            unknown,
        })
    }

    /// The boss move that deals the most damage to `lane` under the chosen
    /// roll. Falls back to the first listed move, then to no move at all.
    fn most_damaging(&self, state: &RaidState, lane: usize, options: MoveOptions) -> Result<Arc<MoveData>> {
        let boss = state.raider(BOSS)?;
        let defender = state.raider(lane)?;
        let field = state.move_field(BOSS, lane)?;
        let damage_options = DamageOptions {
            is_crit: options.crit,
            ..DamageOptions::default()
        };

        let mut best: Option<(Arc<MoveData>, u32)> = None;
        for name in &boss.moves {
            let Some(candidate) = self.catalog.get(name) else {
                log::warn!("boss move {} is not in the catalog", name);
                continue;
            };
            let result = damage::calculate(state.gen, boss, defender, &candidate, &field, &damage_options);
            let amount = options.roll.pick_median(&result.damage.values());
            if best.as_ref().map_or(true, |(_, top)| amount > *top) {
                best = Some((candidate, amount));
            }
        }
        Ok(match best {
            Some((data, _)) => data,
            None => self.lookup(NO_MOVE).0,
        })
    }

    // ========================================================================
    // Order
    // ========================================================================

    fn raider_moves_first(
        &self,
        state: &RaidState,
        lane: usize,
        raider_move: &Planned,
        boss_move: &Planned,
    ) -> Result<bool> {
        let acting = state.raider(raider_move.user)?;
        let boss = state.raider(BOSS)?;
        let raider_priority = move_priority(acting, &raider_move.data);
        let boss_priority = move_priority(boss, &boss_move.data);
        if raider_priority != boss_priority {
            return Ok(raider_priority > boss_priority);
        }

        let raider = state.raider(lane)?;
        let raider_speed = get_final_speed(state.gen, raider, &raider.field);
        let boss_speed = get_final_speed(state.gen, boss, &boss.field);
        Ok(if boss.field.is_trick_room() {
            raider_speed < boss_speed
        } else {
            raider_speed > boss_speed
        })
    }
}

fn execute(planned: &Planned, state: &RaidState, flinched: bool) -> Result<MoveResult> {
    let mut result = RaidMove::new(&planned.data, planned.user, planned.target)
        .with_options(planned.options)
        .flinched(flinched)
        .resolve(state)?;
    if planned.unknown {
        result
            .anomalies
            .push(format!("{} is not in the move catalog", planned.data.name));
    }
    Ok(result)
}
