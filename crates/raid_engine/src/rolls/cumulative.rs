use serde::{Deserialize, Serialize};

use super::{combine, concat, round_significant, Distribution, RollCondition, RollHolder};
use crate::error::{EngineError, Result};

/// Upper bound on propagation passes for sequential-condition mass.
pub const MAX_FIXED_POINT_ITERATIONS: usize = 10;

/// Lifetime damage distribution of one combatant.
///
/// `rolls[0]` holds outcomes where no sequential condition has fired yet
/// (certain zero for a fresh tracker);
/// `rolls[i]` holds outcomes where the first `i` sequential conditions (e.g. a
/// Focus Sash, then a Sitrus Berry) have been used up. Persistent conditions
/// (Sturdy, Endure) apply to every layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeRolls {
    rolls: Vec<Distribution>,
    persistent: Vec<RollCondition>,
    sequential: Vec<RollCondition>,
    #[serde(default = "default_cap")]
    iteration_cap: usize,
}

fn default_cap() -> usize {
    MAX_FIXED_POINT_ITERATIONS
}

impl Default for CumulativeRolls {
    fn default() -> Self {
        Self::new()
    }
}

impl CumulativeRolls {
    pub fn new() -> Self {
        Self {
            rolls: vec![Distribution::certain(0)],
            persistent: Vec::new(),
            sequential: Vec::new(),
            iteration_cap: MAX_FIXED_POINT_ITERATIONS,
        }
    }

    /// Tracker for a combatant that has already lost `damage` HP.
    pub fn starting_at(damage: i64) -> Self {
        let mut rolls = Self::new();
        rolls.rolls[0] = Distribution::certain(damage.max(0));
        rolls
    }

    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = cap;
        self
    }

    pub fn layers(&self) -> &[Distribution] {
        &self.rolls
    }

    pub fn persistent_conditions(&self) -> &[RollCondition] {
        &self.persistent
    }

    pub fn sequential_conditions(&self) -> &[RollCondition] {
        &self.sequential
    }

    /// Returns `false` when the name carries no rewrite.
    pub fn add_persistent_condition(&mut self, name: &str) -> bool {
        match RollCondition::from_name(name) {
            Some(cond) => {
                self.persistent.push(cond);
                true
            }
            None => false,
        }
    }

    pub fn add_sequential_condition(&mut self, name: &str) -> bool {
        match RollCondition::from_name(name) {
            Some(cond) => {
                self.sequential.push(cond);
                self.rolls.push(Distribution::new());
                true
            }
            None => false,
        }
    }

    pub fn remove_persistent_condition(&mut self, name: &str) {
        if let Some(cond) = RollCondition::from_name(name) {
            self.persistent.retain(|c| *c != cond);
        }
    }

    /// Drop the first matching sequential condition, folding its layer into
    /// the one before it.
    pub fn remove_sequential_condition(&mut self, name: &str) {
        let Some(cond) = RollCondition::from_name(name) else {
            return;
        };
        if let Some(idx) = self.sequential.iter().position(|c| *c == cond) {
            self.sequential.remove(idx);
            let layer = self.rolls.remove(idx + 1);
            self.rolls[idx] = concat(&self.rolls[idx], &layer);
        }
    }

    /// Fold one more independent delta distribution into every layer.
    ///
    /// Mass caught by layer `i`'s sequential condition moves to layer `i + 1`,
    /// where the remaining conditions are applied to it in turn. The pass is
    /// repeated until no mass is in flight; exceeding the iteration cap leaves
    /// the best-effort result in place and returns
    /// [`EngineError::DidNotConverge`].
    pub fn add_rolls(&mut self, deltas: &Distribution, holder: &RollHolder) -> Result<()> {
        self.fold_rolls(deltas, holder, true)
    }

    /// Like [`add_rolls`](Self::add_rolls) for damage that is not a hit
    /// (recoil, weather, Life Orb). Sturdy and Focus Sash ignore it.
    pub fn add_indirect_rolls(&mut self, deltas: &Distribution, holder: &RollHolder) -> Result<()> {
        self.fold_rolls(deltas, holder, false)
    }

    /// The combatant fainted outright: every layer's mass moves to `max_hp`
    /// and no condition gets a say.
    pub fn faint(&mut self, max_hp: i64) {
        for layer in self.rolls.iter_mut() {
            let mass = layer.total_mass();
            *layer = if mass > 0.0 {
                Distribution::from_iter([(max_hp, mass)])
            } else {
                Distribution::new()
            };
        }
    }

    fn conditions_for(&self, from_hit: bool) -> (Vec<RollCondition>, Vec<Option<RollCondition>>) {
        let usable = |cond: &RollCondition| from_hit || !cond.needs_hit();
        let persistent = self.persistent.iter().copied().filter(usable).collect();
        let sequential = (0..self.rolls.len())
            .map(|i| self.sequential.get(i).copied().filter(usable))
            .collect();
        (persistent, sequential)
    }

    fn fold_rolls(&mut self, deltas: &Distribution, holder: &RollHolder, from_hit: bool) -> Result<()> {
        let max = holder.max_hp;
        let layer_count = self.rolls.len();
        let (persistent, sequential) = self.conditions_for(from_hit);

        let mut new_rolls = Vec::with_capacity(layer_count);
        let mut in_flight = Vec::with_capacity(layer_count);

        for (i, layer) in self.rolls.iter().enumerate() {
            // An emptied layer carries no mass; it is not a fresh start.
            if !layer.is_empty() {
                let out = combine(layer, deltas, 0, max, Some(holder), &persistent, sequential[i]);
                new_rolls.push(out.rolls);
                in_flight.push(out.sequential);
            } else {
                new_rolls.push(Distribution::new());
                in_flight.push(Distribution::new());
            }
        }

        let mut iterations = 0;
        while in_flight.iter().any(|d| !d.is_empty()) {
            if iterations >= self.iteration_cap {
                log::warn!(
                    "sequential roll conditions still moving mass after {} passes",
                    iterations
                );
                // Park unresolved mass in the layer it was heading to.
                for i in 0..layer_count {
                    let pending = std::mem::take(&mut in_flight[i]);
                    let target = (i + 1).min(layer_count - 1);
                    new_rolls[target] = concat(&new_rolls[target], &pending);
                }
                self.rolls = new_rolls;
                return Err(EngineError::DidNotConverge { iterations });
            }

            for i in 1..layer_count {
                let incoming = std::mem::take(&mut in_flight[i - 1]);
                if incoming.is_empty() {
                    continue;
                }
                let out = combine(
                    &incoming,
                    &Distribution::new(),
                    0,
                    max,
                    Some(holder),
                    &persistent,
                    sequential[i],
                );
                new_rolls[i] = concat(&new_rolls[i], &out.rolls);
                in_flight[i] = concat(&in_flight[i], &out.sequential);
            }
            // The last layer has no sequential condition; anything left there
            // can only come from a malformed state.
            if let Some(last) = in_flight.last_mut() {
                if !last.is_empty() {
                    let stray = std::mem::take(last);
                    let idx = layer_count - 1;
                    new_rolls[idx] = concat(&new_rolls[idx], &stray);
                }
            }
            iterations += 1;
        }

        self.rolls = new_rolls;
        Ok(())
    }

    /// All layers merged.
    pub fn combined(&self) -> Distribution {
        self.rolls
            .iter()
            .fold(Distribution::new(), |acc, layer| concat(&acc, layer))
    }

    pub fn total_mass(&self) -> f64 {
        self.rolls.iter().map(Distribution::total_mass).sum()
    }

    /// Percent chance (3 significant figures) that cumulative damage equals `hp`.
    pub fn ko_chance(&self, hp: i64) -> f64 {
        let total = self.total_mass();
        if total <= 0.0 {
            return 0.0;
        }
        let ko: f64 = self.rolls.iter().map(|layer| layer.get(hp)).sum();
        round_significant(ko / total * 100.0, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_plain_accumulation() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_rolls(&Distribution::uniform(&[40, 60], 1.0), &holder).unwrap();
        rolls.add_rolls(&Distribution::uniform(&[40, 60], 1.0), &holder).unwrap();
        // 80: 1/4, 100: 3/4 (100 and 120 both clamp)
        assert_eq!(rolls.ko_chance(100), 75.0);
        assert!((rolls.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_focus_sash_then_second_hit() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        assert!(rolls.add_sequential_condition("Focus Sash"));

        rolls.add_rolls(&Distribution::certain(150), &holder).unwrap();
        assert_eq!(rolls.ko_chance(100), 0.0);
        assert!((rolls.layers()[1].get(99) - 1.0).abs() < EPS);

        // The sash is spent; the next hit lands normally.
        rolls.add_rolls(&Distribution::certain(10), &holder).unwrap();
        assert_eq!(rolls.ko_chance(100), 100.0);
    }

    #[test]
    fn test_sash_then_sitrus_cascade() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_sequential_condition("Focus Sash");
        rolls.add_sequential_condition("Sitrus Berry");

        rolls.add_rolls(&Distribution::certain(150), &holder).unwrap();
        // Sash leaves 99 lost, then Sitrus restores 25 in the same step.
        assert!((rolls.layers()[2].get(74) - 1.0).abs() < EPS);
        assert!((rolls.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_persistent_sturdy_every_time_from_full() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_persistent_condition("Sturdy");
        rolls.add_rolls(&Distribution::certain(300), &holder).unwrap();
        assert_eq!(rolls.ko_chance(100), 0.0);
    }

    #[test]
    fn test_remove_sequential_merges_layer() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_sequential_condition("Focus Sash");
        rolls
            .add_rolls(&Distribution::uniform(&[50, 150], 1.0), &holder)
            .unwrap();
        rolls.remove_sequential_condition("Focus Sash");
        assert_eq!(rolls.layers().len(), 1);
        assert!((rolls.total_mass() - 1.0).abs() < EPS);
        assert!((rolls.layers()[0].get(99) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new().with_iteration_cap(0);
        rolls.add_sequential_condition("Focus Sash");
        let err = rolls
            .add_rolls(&Distribution::certain(150), &holder)
            .unwrap_err();
        assert_eq!(err, EngineError::DidNotConverge { iterations: 0 });
        // Mass is still accounted for.
        assert!((rolls.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_indirect_damage_skips_sash() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_sequential_condition("Focus Sash");
        rolls.add_indirect_rolls(&Distribution::certain(150), &holder).unwrap();
        assert_eq!(rolls.ko_chance(100), 100.0);
        assert!(rolls.layers()[1].is_empty());
    }

    #[test]
    fn test_indirect_damage_still_triggers_sitrus() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_sequential_condition("Sitrus Berry");
        rolls.add_indirect_rolls(&Distribution::certain(60), &holder).unwrap();
        assert!((rolls.layers()[1].get(35) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_faint_moves_every_layer_to_max() {
        let holder = RollHolder::new(100);
        let mut rolls = CumulativeRolls::new();
        rolls.add_sequential_condition("Focus Sash");
        rolls
            .add_rolls(&Distribution::uniform(&[40, 50, 60], 1.0), &holder)
            .unwrap();
        rolls.faint(100);
        assert_eq!(rolls.ko_chance(100), 100.0);
        assert!((rolls.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_condition_ignored() {
        let mut rolls = CumulativeRolls::new();
        assert!(!rolls.add_sequential_condition("Leftovers"));
        assert_eq!(rolls.layers().len(), 1);
    }
}
