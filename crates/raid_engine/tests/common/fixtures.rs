//! Scenario fixture format.
//!
//! A fixture is a battle script plus a list of checks against the states it
//! produces. Checks without `afterTurn` look at the end state.

use raid_engine::{BattleResult, BattleScript, Flags, Raider, Status, Weather};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFixture {
    pub name: String,
    #[serde(default)]
    pub skip: bool,
    pub script: BattleScript,
    pub expect: Vec<Expectation>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Expectation {
    pub after_turn: Option<usize>,
    pub slot: usize,
    pub hp: Option<u32>,
    pub hp_below: Option<u32>,
    pub atk: Option<i8>,
    pub def: Option<i8>,
    pub status: Option<Status>,
    pub weather: Option<Weather>,
    pub weather_turns: Option<u8>,
    pub reflect: Option<u8>,
    /// Lifetime KO chance in percent.
    pub ko_chance: Option<f64>,
    /// A flag on this slot containing the text.
    pub flag: Option<String>,
    pub turn_count: Option<usize>,
    /// Move the boss ended up using on `afterTurn` (the last turn by default).
    pub boss_move: Option<String>,
}

impl Expectation {
    pub fn check(&self, result: &BattleResult) -> Result<(), String> {
        if let Some(count) = self.turn_count {
            if result.turn_count() != count {
                return Err(format!("expected {} turns, got {}", count, result.turn_count()));
            }
        }

        if let Some(expected) = &self.boss_move {
            let turn = match self.after_turn {
                Some(index) => result.turn_results.get(index),
                None => result.turn_results.last(),
            };
            let used = turn
                .and_then(|t| t.boss_result())
                .map(|r| r.move_name.as_str())
                .ok_or_else(|| "no boss move to check".to_string())?;
            if used != expected {
                return Err(format!("boss used {}, expected {}", used, expected));
            }
        }

        let state = match self.after_turn {
            Some(turn) => &result
                .turn_results
                .get(turn)
                .ok_or_else(|| format!("no turn {}", turn))?
                .state,
            None => &result.end_state,
        };
        let raider = state
            .raider(self.slot)
            .map_err(|e| format!("slot {}: {}", self.slot, e))?;

        self.check_raider(raider)?;

        if let Some(expected) = self.ko_chance {
            let chance = raider.rolls.ko_chance(raider.max_hp as i64);
            if (chance - expected).abs() > 1e-6 {
                return Err(format!("slot {} KO chance {} != {}", self.slot, chance, expected));
            }
        }

        if let Some(text) = &self.flag {
            let found = self.flags(result).iter().any(|flag| flag.contains(text.as_str()));
            if !found {
                return Err(format!(
                    "slot {} has no flag containing {:?}; flags: {:?}",
                    self.slot,
                    text,
                    self.flags(result)
                ));
            }
        }
        Ok(())
    }

    fn check_raider(&self, raider: &Raider) -> Result<(), String> {
        let slot = self.slot;
        if let Some(hp) = self.hp {
            if raider.cur_hp != hp {
                return Err(format!("slot {} HP {} != {}", slot, raider.cur_hp, hp));
            }
        }
        if let Some(limit) = self.hp_below {
            if raider.cur_hp >= limit {
                return Err(format!("slot {} HP {} not below {}", slot, raider.cur_hp, limit));
            }
        }
        if let Some(atk) = self.atk {
            if raider.boosts.atk != atk {
                return Err(format!("slot {} Atk stage {} != {}", slot, raider.boosts.atk, atk));
            }
        }
        if let Some(def) = self.def {
            if raider.boosts.def != def {
                return Err(format!("slot {} Def stage {} != {}", slot, raider.boosts.def, def));
            }
        }
        if self.status.is_some() && raider.status != self.status {
            return Err(format!("slot {} status {:?} != {:?}", slot, raider.status, self.status));
        }
        if self.weather.is_some() && raider.field.weather != self.weather {
            return Err(format!(
                "slot {} weather {:?} != {:?}",
                slot, raider.field.weather, self.weather
            ));
        }
        if let Some(turns) = self.weather_turns {
            if raider.field.weather_turns != turns {
                return Err(format!(
                    "slot {} weather turns {} != {}",
                    slot, raider.field.weather_turns, turns
                ));
            }
        }
        if let Some(reflect) = self.reflect {
            let actual = raider.field.attacker_side.reflect;
            if actual != reflect {
                return Err(format!("slot {} Reflect turns {} != {}", slot, actual, reflect));
            }
        }
        Ok(())
    }

    /// Every flag raised for this slot, turn zero included.
    fn flags(&self, result: &BattleResult) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        let mut take = |flags: &Flags| all.extend(flags.get(self.slot).iter().cloned());
        take(&result.turn_zero_flags);
        take(&result.turn_zero_reactions);
        for (index, turn) in result.turn_results.iter().enumerate() {
            if self.after_turn.is_some_and(|t| t != index) {
                continue;
            }
            for move_result in &turn.results {
                take(&move_result.flags);
            }
            take(&turn.end_of_turn_flags);
        }
        all
    }
}
