//! Multi-turn raid driver.
//!
//! A battle is a list of turn groups, each repeated a number of times. Before
//! the first group a turn-zero pass sorts everyone by speed, fires switch-in
//! effects in that order and then lets items and abilities react.
//!
//! Turn numbers count actions taken, so idle turns do not advance them. When
//! NPC allies fill the party, the first NPC cheers right after raider 1's
//! first move and every raider 1 action stands for a full round of NPC turns.

mod optimize;

pub use optimize::battle_score;

use serde::{Deserialize, Serialize};

use crate::catalog::{MoveCatalog, SpeciesCatalog};
use crate::entities::RaiderConfig;
use crate::error::{EngineError, Result};
use crate::mechanics::{get_final_speed, Generation};
use crate::moves::{MoveOptions, RaidMove, MOST_DAMAGING, NO_MOVE, OPTIMAL_MOVE};
use crate::state::{Flags, RaidState, BOSS};
use crate::turn::{RaidTurn, TurnInfo, TurnResult};

fn one() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnGroup {
    pub turns: Vec<TurnInfo>,
    #[serde(default = "one")]
    pub repeats: usize,
}

impl TurnGroup {
    pub fn once(turns: Vec<TurnInfo>) -> Self {
        Self { turns, repeats: 1 }
    }

    /// Whether any boss action here is left to the optimizer.
    pub fn wants_optimal_move(&self) -> bool {
        self.turns.iter().any(|t| t.boss.move_name == OPTIMAL_MOVE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub end_state: RaidState,
    pub turn_results: Vec<TurnResult>,
    /// Switch-in effects.
    pub turn_zero_flags: Flags,
    /// Item and ability reactions to the switch-in effects.
    pub turn_zero_reactions: Flags,
    /// Slots in the order their switch-in effects fired.
    pub turn_zero_order: Vec<usize>,
    pub turn_zero_state: RaidState,
}

impl BattleResult {
    /// Lifetime KO chance of a slot in percent, from its roll tracker.
    pub fn ko_chance(&self, id: usize) -> Result<f64> {
        let raider = self.end_state.raider(id)?;
        Ok(raider.rolls.ko_chance(raider.max_hp as i64))
    }

    /// Turns resolved, idle ones included.
    pub fn turn_count(&self) -> usize {
        self.turn_results.len()
    }
}

pub struct RaidBattle<'a> {
    starting_state: &'a RaidState,
    groups: &'a [TurnGroup],
    catalog: &'a MoveCatalog,
}

impl<'a> RaidBattle<'a> {
    pub fn new(starting_state: &'a RaidState, groups: &'a [TurnGroup]) -> Self {
        Self {
            starting_state,
            groups,
            catalog: MoveCatalog::builtin(),
        }
    }

    pub fn with_catalog(mut self, catalog: &'a MoveCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run turn zero and every group.
    pub fn resolve(&self) -> Result<BattleResult> {
        let mut state = self.starting_state.clone();
        let order = turn_zero_order(&state);

        let mut switch_flags = Flags::new(state.len());
        for &id in &order {
            state.switch_in(id, &mut switch_flags)?;
        }

        let mut reactions = Flags::new(state.len());
        let (no_move, _) = self.catalog.resolve(NO_MOVE);
        for &id in &order {
            let result = RaidMove::new(&no_move, id, id).resolve(&state)?;
            reactions.extend(result.flags);
            state = result.state;
        }
        log::debug!("turn zero order: {:?}", order);

        let turn_zero_state = state.clone();
        let (end_state, turn_results) = self.run_groups(state, &[])?;
        Ok(BattleResult {
            end_state,
            turn_results,
            turn_zero_flags: switch_flags,
            turn_zero_reactions: reactions,
            turn_zero_order: order,
            turn_zero_state,
        })
    }

    /// Continue an earlier battle with more groups. Turn zero is not rerun.
    pub fn resume(&self, previous: BattleResult) -> Result<BattleResult> {
        let (end_state, more) = self.run_groups(previous.end_state, &previous.turn_results)?;
        let mut turn_results = previous.turn_results;
        turn_results.extend(more);
        Ok(BattleResult {
            end_state,
            turn_results,
            ..previous
        })
    }

    fn run_groups(
        &self,
        mut state: RaidState,
        previous: &[TurnResult],
    ) -> Result<(RaidState, Vec<TurnResult>)> {
        let npcs = state.raiders.iter().filter(|r| r.is_npc()).count();
        let mut first_raider_moved = previous
            .iter()
            .any(|t| t.info.raider.user == 1 && t.raider_acted());
        let mut turn_number = next_turn_number(previous);

        let mut results = Vec::new();
        for (index, group) in self.groups.iter().enumerate() {
            for repeat in 0..group.repeats {
                for info in &group.turns {
                    log::trace!("group {} repeat {}: {:?}", index, repeat, info.raider.move_name);
                    let result = RaidTurn::new(info)
                        .with_catalog(self.catalog)
                        .with_turn_number(turn_number)
                        .resolve(&state)?;
                    state = result.state.clone();
                    let acted = result.raider_acted();
                    results.push(result);
                    if !acted {
                        continue;
                    }

                    if info.raider.user == 1 && npcs > 0 {
                        if !first_raider_moved {
                            if let Some(cheer) = self.npc_cheer(&state, info, turn_number)? {
                                state = cheer.state.clone();
                                results.push(cheer);
                            }
                            first_raider_moved = true;
                        }
                        turn_number += 1 + npcs;
                    } else {
                        turn_number += 1;
                    }
                }
            }
        }
        Ok((state, results))
    }

    /// The first NPC opens with Defense Cheer while the boss answers with
    /// its strongest move.
    fn npc_cheer(
        &self,
        state: &RaidState,
        trigger: &TurnInfo,
        turn_number: usize,
    ) -> Result<Option<TurnResult>> {
        let Some(npc) = state.raiders.iter().position(|r| r.is_npc() && r.id != BOSS) else {
            return Ok(None);
        };
        log::debug!("slot {} opens with Defense Cheer", npc);
        let info = TurnInfo::new(npc, npc, "Defense Cheer", MOST_DAMAGING)
            .with_options(MoveOptions::default(), trigger.boss.options);
        RaidTurn::new(&info)
            .with_catalog(self.catalog)
            .with_turn_number(turn_number)
            .resolve(state)
            .map(Some)
    }
}

/// Number the next turn after `previous` would get.
pub(crate) fn next_turn_number(previous: &[TurnResult]) -> usize {
    previous
        .last()
        .map_or(0, |t| t.turn_number + usize::from(t.raider_acted()))
}

/// A whole battle as a JSON document: the boss build first, then the raiders,
/// then the turn groups to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleScript {
    #[serde(default)]
    pub gen: Generation,
    pub raiders: Vec<RaiderConfig>,
    #[serde(default)]
    pub groups: Vec<TurnGroup>,
}

impl BattleScript {
    pub fn from_json(json: &str) -> Result<Self> {
        let script: BattleScript = serde_json::from_str(json)?;
        if script.raiders.len() < 2 {
            return Err(EngineError::Catalog(format!(
                "a battle needs a boss and at least one raider, got {} combatants",
                script.raiders.len()
            )));
        }
        Ok(script)
    }

    pub fn build_state(&self) -> Result<RaidState> {
        self.build_state_with(SpeciesCatalog::builtin())
    }

    pub fn build_state_with(&self, species: &SpeciesCatalog) -> Result<RaidState> {
        let raiders = self
            .raiders
            .iter()
            .enumerate()
            .map(|(id, config)| config.build_with(species, id))
            .collect::<Result<Vec<_>>>()?;
        Ok(RaidState::new(self.gen, raiders))
    }

    /// Build the starting state and run every group. Scripts that leave a
    /// boss action to [`OPTIMAL_MOVE`] go through the optimizer.
    pub fn run(&self) -> Result<BattleResult> {
        let state = self.build_state()?;
        let battle = RaidBattle::new(&state, &self.groups);
        if self.groups.iter().any(TurnGroup::wants_optimal_move) {
            battle.optimize()
        } else {
            battle.resolve()
        }
    }
}

/// Fastest first; equal speeds keep slot order.
fn turn_zero_order(state: &RaidState) -> Vec<usize> {
    let mut speeds: Vec<(usize, u32)> = state
        .raiders
        .iter()
        .enumerate()
        .map(|(id, r)| (id, get_final_speed(state.gen, r, &r.field)))
        .collect();
    speeds.sort_by(|a, b| b.1.cmp(&a.1));
    speeds.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::StatTable;
    use crate::mechanics::Generation;
    use crate::state::{Raider, Weather, BOSS};
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn raider(name: &str, hp: u32, speed: u16) -> Raider {
        Raider {
            name: name.to_string(),
            types: vec![Type::Normal],
            stats: StatTable::from_array([hp as u16, 120, 120, 120, 120, speed]),
            max_hp: hp,
            cur_hp: hp,
            ..Default::default()
        }
    }

    fn state() -> RaidState {
        RaidState::new(
            Generation::Gen9,
            vec![raider("Blissey", 3000, 60), raider("Eevee", 250, 90), raider("Pikachu", 200, 140)],
        )
    }

    #[test]
    fn test_turn_zero_sorts_by_speed() {
        let s = state();
        let result = RaidBattle::new(&s, &[]).resolve().unwrap();
        assert_eq!(result.turn_zero_order, vec![2, 1, 0]);
        assert!(result.turn_results.is_empty());
    }

    #[test]
    fn test_weather_setter_fires_on_switch_in() {
        let mut s = state();
        s.raiders[1].ability = Some("Drought".to_string());
        let result = RaidBattle::new(&s, &[]).resolve().unwrap();
        assert_eq!(result.end_state.raiders[1].field.weather, Some(Weather::Sun));
    }

    #[test]
    fn test_groups_repeat() {
        let s = state();
        let groups = vec![
            TurnGroup {
                turns: vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)],
                repeats: 3,
            },
            TurnGroup::once(vec![TurnInfo::new(2, BOSS, "Tackle", NO_MOVE)]),
        ];
        let result = RaidBattle::new(&s, &groups).resolve().unwrap();
        assert_eq!(result.turn_count(), 4);
        assert_eq!(result.end_state.raiders[1].move_repeated, 2);
        assert!(result.end_state.raiders[BOSS].cur_hp < 3000);
    }

    #[test]
    fn test_resume_appends_turns() {
        let s = state();
        let first = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)])];
        let second = vec![TurnGroup::once(vec![TurnInfo::new(2, BOSS, "Tackle", NO_MOVE)])];
        let earlier = RaidBattle::new(&s, &first).resolve().unwrap();
        let order = earlier.turn_zero_order.clone();
        let resumed = RaidBattle::new(&s, &second).resume(earlier).unwrap();
        assert_eq!(resumed.turn_count(), 2);
        assert_eq!(resumed.turn_zero_order, order);
    }

    #[test]
    fn test_certain_ko_shows_in_ko_chance() {
        let mut s = state();
        s.raiders[BOSS].cur_hp = 1;
        s.raiders[BOSS].rolls = crate::rolls::CumulativeRolls::starting_at(2999);
        let groups = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)])];
        let result = RaidBattle::new(&s, &groups).resolve().unwrap();
        assert_eq!(result.end_state.raiders[BOSS].cur_hp, 0);
        assert_eq!(result.ko_chance(BOSS).unwrap(), 100.0);
    }

    #[test]
    fn test_script_from_json() {
        let script = BattleScript::from_json(
            r#"{
                "raiders": [
                    {"species": "Blissey", "role": "Tera Raid Boss", "bossMultiplier": 300},
                    {"species": "Garchomp", "role": "Raider 1", "moves": ["Earthquake"]}
                ],
                "groups": [
                    {"turns": [{"raider": {"user": 1, "target": 0, "move": "Earthquake"}}], "repeats": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.gen, Generation::Gen9);
        let state = script.build_state().unwrap();
        assert_eq!(state.raiders[BOSS].max_hp, state.raiders[BOSS].stats.hp as u32 * 3);
        assert_eq!(state.raiders[1].id, 1);

        let result = script.run().unwrap();
        assert_eq!(result.turn_count(), 2);
        assert!(result.end_state.raiders[BOSS].cur_hp < state.raiders[BOSS].max_hp);
    }

    #[test]
    fn test_idle_turns_do_not_advance_the_counter() {
        let s = state();
        let groups = vec![TurnGroup::once(vec![
            TurnInfo::new(1, BOSS, "Tackle", NO_MOVE),
            TurnInfo::new(1, BOSS, NO_MOVE, NO_MOVE),
            TurnInfo::new(2, BOSS, "Tackle", NO_MOVE),
            TurnInfo::new(1, BOSS, "Tackle", NO_MOVE),
        ])];
        let result = RaidBattle::new(&s, &groups).resolve().unwrap();
        let numbers: Vec<usize> = result.turn_results.iter().map(|t| t.turn_number).collect();
        assert_eq!(numbers, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_resume_continues_numbering() {
        let s = state();
        let first = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)])];
        let second = vec![TurnGroup::once(vec![TurnInfo::new(2, BOSS, "Tackle", NO_MOVE)])];
        let earlier = RaidBattle::new(&s, &first).resolve().unwrap();
        let resumed = RaidBattle::new(&s, &second).resume(earlier).unwrap();
        assert_eq!(resumed.turn_results[1].turn_number, 1);
    }

    #[test]
    fn test_npc_cheers_after_first_raider_move() {
        let mut s = state();
        s.raiders[BOSS].moves = vec!["Tackle".to_string()];
        s.raiders[2].name = "NPC".to_string();
        let groups = vec![TurnGroup {
            turns: vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)],
            repeats: 2,
        }];
        let result = RaidBattle::new(&s, &groups).resolve().unwrap();
        assert_eq!(result.turn_count(), 3);

        let cheer = &result.turn_results[1];
        assert_eq!(cheer.info.raider.user, 2);
        assert_eq!(cheer.raider_result().unwrap().move_name, "Defense Cheer");
        assert_eq!(cheer.boss_result().unwrap().move_name, "Tackle");
        assert_eq!(cheer.turn_number, 0);

        // One raider action plus one NPC action per round.
        assert_eq!(result.turn_results[2].turn_number, 2);
        assert_eq!(result.turn_results[2].info.raider.user, 1);
    }

    #[test]
    fn test_no_cheer_without_npcs() {
        let s = state();
        let groups = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)])];
        let result = RaidBattle::new(&s, &groups).resolve().unwrap();
        assert_eq!(result.turn_count(), 1);
    }

    #[test]
    fn test_script_needs_two_combatants() {
        let err = BattleScript::from_json(r#"{"raiders": [{"species": "Blissey"}]}"#).unwrap_err();
        assert!(matches!(err, EngineError::Catalog(_)));
    }
}
