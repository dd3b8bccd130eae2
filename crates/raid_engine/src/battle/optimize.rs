//! Worst-case boss move selection.
//!
//! Every boss action left as [`OPTIMAL_MOVE`] branches the battle over the
//! boss's moves. A branch is only kept when it is the most or least damaging
//! choice, or when it changes something besides HP (stages, items, field,
//! turn order, a flinch). Once every branch has run to the end, the one that
//! scores worst for the raiders is returned.

use super::{next_turn_number, BattleResult, RaidBattle, TurnGroup};
use crate::error::{EngineError, Result};
use crate::moves::{NO_MOVE, OPTIMAL_MOVE};
use crate::state::{Field, RaidState, Raider, Side, BOSS};
use crate::turn::{RaidTurn, TurnInfo, TurnResult};

/// Turns up to and including one optimizer decision. The last chunk may end
/// without one.
type Chunk = Vec<TurnInfo>;

impl<'a> RaidBattle<'a> {
    /// Run the battle, replacing each [`OPTIMAL_MOVE`] with the boss move
    /// that leads to the worst outcome for the raiders.
    pub fn optimize(&self) -> Result<BattleResult> {
        let start = RaidBattle::new(self.starting_state, &[])
            .with_catalog(self.catalog)
            .resolve()?;
        let chunks = split_at_decisions(&expand_repeats(self.groups));
        let branches = self.branches(&chunks, vec![start])?;
        log::debug!("boss move optimization explored {} branches", branches.len());

        let mut best: Option<(f64, BattleResult)> = None;
        for branch in branches {
            let score = battle_score(&branch.end_state);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, branch));
            }
        }
        best.map(|(_, result)| result)
            .ok_or_else(|| EngineError::IllegalAction("no battle branch to pick from".to_string()))
    }

    fn branches(&self, chunks: &[Chunk], previous: Vec<BattleResult>) -> Result<Vec<BattleResult>> {
        let Some((chunk, rest)) = chunks.split_first() else {
            return Ok(previous);
        };
        let Some((decision, lead)) = chunk.split_last() else {
            return self.branches(rest, previous);
        };

        let mut out = Vec::new();
        for result in previous {
            if decision.boss.move_name != OPTIMAL_MOVE {
                out.push(self.continue_with(result, chunk.clone())?);
                continue;
            }

            let result = self.continue_with(result, lead.to_vec())?;
            let turn_number = next_turn_number(&result.turn_results);
            let picks = self.interesting_turns(&result.end_state, decision, turn_number)?;
            let split: Vec<BattleResult> = picks
                .into_iter()
                .map(|turn| {
                    let mut branch = result.clone();
                    branch.end_state = turn.state.clone();
                    branch.turn_results.push(turn);
                    branch
                })
                .collect();
            out.extend(self.branches(rest, split)?);
        }
        Ok(out)
    }

    fn continue_with(&self, previous: BattleResult, turns: Vec<TurnInfo>) -> Result<BattleResult> {
        if turns.is_empty() {
            return Ok(previous);
        }
        let groups = [TurnGroup::once(turns)];
        RaidBattle::new(self.starting_state, &groups)
            .with_catalog(self.catalog)
            .resume(previous)
    }

    /// Resolve `turn` once per boss move and keep the outcomes worth
    /// exploring further.
    fn interesting_turns(
        &self,
        state: &RaidState,
        turn: &TurnInfo,
        turn_number: usize,
    ) -> Result<Vec<TurnResult>> {
        let boss_moves = &state.raider(BOSS)?.moves;
        let candidates: Vec<&str> = if boss_moves.is_empty() {
            vec![NO_MOVE]
        } else {
            boss_moves.iter().map(String::as_str).collect()
        };

        let lane = turn.raider.user;
        let hp_before = state.raider(lane)?.cur_hp as i64;
        let mut results = Vec::with_capacity(candidates.len());
        let (mut most, mut least) = (0, 0);
        let (mut most_damage, mut least_damage) = (i64::MIN, i64::MAX);
        for (i, name) in candidates.iter().enumerate() {
            let mut info = turn.clone();
            info.boss.move_name = name.to_string();
            let result = RaidTurn::new(&info)
                .with_catalog(self.catalog)
                .with_turn_number(turn_number)
                .resolve(state)?;
            let damage = hp_before - result.state.raider(lane)?.cur_hp as i64;
            if damage > most_damage {
                most_damage = damage;
                most = i;
            }
            if damage < least_damage {
                least_damage = damage;
                least = i;
            }
            results.push(result);
        }

        let mut keep = vec![most];
        if least != most {
            keep.push(least);
        }
        for i in 0..results.len() {
            if i == most || i == least {
                continue;
            }
            if keep.iter().all(|&k| differs_beyond_hp(&results[k], &results[i])) {
                keep.push(i);
            }
        }

        let mut picked: Vec<Option<TurnResult>> = results.into_iter().map(Some).collect();
        Ok(keep.into_iter().filter_map(|i| picked[i].take()).collect())
    }
}

/// Higher is worse for the raiders: a surviving boss dominates, then raider
/// faints, then nonzero KO chances, then missing HP.
pub fn battle_score(state: &RaidState) -> f64 {
    let raiders = state.raiders.iter().filter(|r| r.id != BOSS);
    let boss_alive = state.raider(BOSS).is_ok_and(|b| !b.is_fainted());

    let mut faints = 0.0;
    let mut ko_chances = 0.0;
    let mut hp = 0.0;
    for raider in raiders {
        faints += raider.times_fainted as f64;
        let chance = raider.rolls.ko_chance(raider.max_hp as i64);
        if chance > 0.0 {
            ko_chances += chance.max(1.0);
        }
        hp += raider.cur_hp as f64;
    }
    let boss_term = if boss_alive { 1_000_000_000.0 } else { 0.0 };
    boss_term + faints * 1_000_000.0 + ko_chances * 5_000.0 - hp
}

fn expand_repeats(groups: &[TurnGroup]) -> Vec<TurnInfo> {
    groups
        .iter()
        .flat_map(|g| std::iter::repeat(&g.turns).take(g.repeats.max(1)))
        .flatten()
        .cloned()
        .collect()
}

fn split_at_decisions(turns: &[TurnInfo]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    for turn in turns {
        current.push(turn.clone());
        if turn.boss.move_name == OPTIMAL_MOVE {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn differs_beyond_hp(a: &TurnResult, b: &TurnResult) -> bool {
    let lane = b.info.raider.user;
    let flinched = |t: &TurnResult| {
        !t.raider_moves_first
            && t.results
                .first()
                .and_then(|r| r.causes_flinch.get(t.info.raider.user))
                .copied()
                .unwrap_or(false)
    };
    let raider_changed = match (a.state.raider(lane), b.state.raider(lane)) {
        (Ok(x), Ok(y)) => non_hp_changes(x, y),
        _ => false,
    };
    let boss_changed = match (a.state.raider(BOSS), b.state.raider(BOSS)) {
        (Ok(x), Ok(y)) => non_hp_changes(x, y),
        _ => false,
    };
    a.raider_moves_first != b.raider_moves_first
        || flinched(a) != flinched(b)
        || raider_changed
        || boss_changed
}

fn non_hp_changes(a: &Raider, b: &Raider) -> bool {
    let rage_fist = a.moves.iter().any(|m| m == "Rage Fist");
    a.boosts != b.boosts
        || a.item != b.item
        || a.status != b.status
        || a.ability != b.ability
        || a.ability_on != b.ability_on
        || a.ability_nullified != b.ability_nullified
        || a.is_tera != b.is_tera
        || a.boosted_stat != b.boosted_stat
        || a.is_pumped != b.is_pumped
        || a.times_fainted != b.times_fainted
        || a.volatile != b.volatile
        || a.is_endure != b.is_endure
        || a.is_choice_locked != b.is_choice_locked
        || (rage_fist && a.hits_taken != b.hits_taken)
        || field_changes(&a.field, &b.field)
}

fn field_changes(a: &Field, b: &Field) -> bool {
    a.terrain != b.terrain
        || a.weather != b.weather
        || (a.trick_room > 0) != (b.trick_room > 0)
        || (a.wonder_room > 0) != (b.wonder_room > 0)
        || (a.magic_room > 0) != (b.magic_room > 0)
        || a.abilities != b.abilities
        || side_changes(&a.attacker_side, &b.attacker_side)
}

fn side_changes(a: &Side, b: &Side) -> bool {
    let up = |s: &Side| {
        [
            s.reflect > 0,
            s.light_screen > 0,
            s.aurora_veil > 0,
            s.tailwind > 0,
            s.mist > 0,
            s.safeguard > 0,
        ]
    };
    up(a) != up(b) || a.flags != b.flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::StatTable;
    use crate::mechanics::Generation;
    use crate::moves::MOST_DAMAGING;
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn raider(name: &str, hp: u32, speed: u16) -> Raider {
        Raider {
            name: name.to_string(),
            types: vec![Type::Normal],
            stats: StatTable::from_array([hp as u16, 150, 120, 120, 120, speed]),
            max_hp: hp,
            cur_hp: hp,
            ..Default::default()
        }
    }

    fn state(boss_moves: &[&str]) -> RaidState {
        let mut boss = raider("Snorlax", 3000, 60);
        boss.moves = boss_moves.iter().map(|m| m.to_string()).collect();
        RaidState::new(Generation::Gen9, vec![boss, raider("Eevee", 1000, 90)])
    }

    fn boss_moves_used(result: &BattleResult) -> Vec<String> {
        result
            .turn_results
            .iter()
            .filter_map(|t| t.boss_result().map(|r| r.move_name.clone()))
            .collect()
    }

    #[test]
    fn test_split_at_decisions() {
        let turns = vec![
            TurnInfo::new(1, BOSS, "Tackle", NO_MOVE),
            TurnInfo::new(1, BOSS, "Tackle", OPTIMAL_MOVE),
            TurnInfo::new(1, BOSS, "Tackle", NO_MOVE),
            TurnInfo::new(1, BOSS, "Tackle", OPTIMAL_MOVE),
            TurnInfo::new(1, BOSS, "Tackle", MOST_DAMAGING),
        ];
        let chunks = split_at_decisions(&turns);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_expand_repeats() {
        let groups = vec![
            TurnGroup {
                turns: vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)],
                repeats: 3,
            },
            TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Growl", NO_MOVE)]),
        ];
        let turns = expand_repeats(&groups);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[3].raider.move_name, "Growl");
    }

    #[test]
    fn test_score_prefers_fainted_raiders() {
        let healthy = state(&[]);
        let mut fainted = healthy.clone();
        fainted.raiders[1].cur_hp = 0;
        fainted.raiders[1].times_fainted = 1;
        assert!(battle_score(&fainted) > battle_score(&healthy));

        let mut boss_down = healthy.clone();
        boss_down.raiders[BOSS].cur_hp = 0;
        assert!(battle_score(&boss_down) < battle_score(&healthy));
    }

    #[test]
    fn test_optimal_move_picks_the_strongest_attack() {
        let s = state(&["Tackle", "Body Slam"]);
        let groups = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, NO_MOVE, OPTIMAL_MOVE)])];
        let result = RaidBattle::new(&s, &groups).optimize().unwrap();
        assert_eq!(result.turn_count(), 1);
        assert_eq!(boss_moves_used(&result), vec!["Body Slam".to_string()]);
    }

    #[test]
    fn test_branches_follow_later_turns() {
        let s = state(&["Tackle", "Body Slam"]);
        let groups = vec![
            TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", OPTIMAL_MOVE)]),
            TurnGroup {
                turns: vec![TurnInfo::new(1, BOSS, "Tackle", OPTIMAL_MOVE)],
                repeats: 2,
            },
            TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", NO_MOVE)]),
        ];
        let result = RaidBattle::new(&s, &groups).optimize().unwrap();
        assert_eq!(result.turn_count(), 4);
        assert_eq!(
            boss_moves_used(&result)[..3].to_vec(),
            vec!["Body Slam".to_string(); 3]
        );
        let numbers: Vec<usize> = result.turn_results.iter().map(|t| t.turn_number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_without_decisions_matches_plain_run() {
        let s = state(&["Tackle"]);
        let groups = vec![TurnGroup::once(vec![TurnInfo::new(1, BOSS, "Tackle", "Tackle")])];
        let plain = RaidBattle::new(&s, &groups).resolve().unwrap();
        let optimized = RaidBattle::new(&s, &groups).optimize().unwrap();
        assert_eq!(plain, optimized);
    }

    #[test]
    fn test_status_move_survives_as_a_branch() {
        let s = state(&["Tackle", "Body Slam", "Growl"]);
        let turn = TurnInfo::new(1, BOSS, NO_MOVE, OPTIMAL_MOVE);
        let battle = RaidBattle::new(&s, &[]);
        let picks = battle.interesting_turns(&s, &turn, 0).unwrap();
        let names: Vec<String> = picks
            .iter()
            .filter_map(|t| t.boss_result().map(|r| r.move_name.clone()))
            .collect();
        assert_eq!(names[0], "Body Slam");
        assert!(names.contains(&"Growl".to_string()));
    }
}
