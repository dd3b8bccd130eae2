//! Roll-distribution algebra.
//!
//! A [`Distribution`] maps an outcome (cumulative HP lost) to its probability
//! mass. Distributions are built from the 16 damage rolls of a hit, combined
//! across hits and turns, and queried for KO chances.
//!
//! # Architecture
//!
//! - [`roll_counts`] / [`add_rolls_to_counts`] convolve independent roll sets.
//! - [`concat`] sums mass per outcome (a mixture of branches).
//! - [`combine`] convolves two distributions through the holder's conditional
//!   rewrites and splits off mass caught by a sequential condition.
//! - [`CumulativeRolls`] is the per-combatant lifetime tracker built on top.
//!
//! Outcomes are kept in a `BTreeMap` so iteration, and therefore every
//! floating-point sum, happens in the same order on every run.

mod conditions;
mod cumulative;

pub use conditions::{RollCondition, RollHolder};
pub use cumulative::{CumulativeRolls, MAX_FIXED_POINT_ITERATIONS};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome -> probability mass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(BTreeMap<i64, f64>);

impl Distribution {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// All mass on a single outcome.
    pub fn certain(outcome: i64) -> Self {
        let mut dist = Self::new();
        dist.add(outcome, 1.0);
        dist
    }

    /// Uniform over the given rolls, total mass `chance`.
    pub fn uniform(rolls: &[i64], chance: f64) -> Self {
        let mut dist = Self::new();
        if rolls.is_empty() {
            return dist;
        }
        let each = chance / rolls.len() as f64;
        for &roll in rolls {
            dist.add(roll, each);
        }
        dist
    }

    pub fn add(&mut self, outcome: i64, mass: f64) {
        *self.0.entry(outcome).or_insert(0.0) += mass;
    }

    pub fn get(&self, outcome: i64) -> f64 {
        self.0.get(&outcome).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    pub fn total_mass(&self) -> f64 {
        self.0.values().sum()
    }

    /// Every mass multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|(&k, &v)| (k, v * factor)).collect())
    }

    pub fn min_outcome(&self) -> Option<i64> {
        self.0.keys().next().copied()
    }

    pub fn max_outcome(&self) -> Option<i64> {
        self.0.keys().next_back().copied()
    }

    /// An empty distribution stands for "nothing happened yet".
    fn or_certain_zero(&self) -> Self {
        if self.is_empty() {
            Self::certain(0)
        } else {
            self.clone()
        }
    }
}

impl FromIterator<(i64, f64)> for Distribution {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        let mut dist = Self::new();
        for (k, v) in iter {
            dist.add(k, v);
        }
        dist
    }
}

#[inline]
fn clamp_outcome(value: i64, min: i64, max: i64) -> i64 {
    value.min(max).max(min)
}

/// Convolve `new_rolls` (each weighted `chance / len`) into `counts`.
///
/// An empty `counts` is treated as certain zero. Outcomes already at `max`
/// stay there: a fainted combatant cannot be healed back.
pub fn add_rolls_to_counts(
    counts: &Distribution,
    new_rolls: &[i64],
    min: i64,
    max: i64,
    chance: Option<f64>,
) -> Distribution {
    if new_rolls.is_empty() {
        return counts.clone();
    }
    let roll_chance = chance.unwrap_or(1.0) / new_rolls.len() as f64;
    let prev = counts.or_certain_zero();

    let mut out = Distribution::new();
    for &roll in new_rolls {
        for (prev_roll, prev_mass) in prev.iter() {
            let combined = if prev_roll >= max {
                max
            } else {
                clamp_outcome(roll + prev_roll, min, max)
            };
            out.add(combined, prev_mass * roll_chance);
        }
    }
    out
}

/// Fold several independent roll sets into one distribution.
pub fn roll_counts(rolls: &[Vec<i64>], min: i64, max: i64, chances: Option<&[f64]>) -> Distribution {
    let mut counts = Distribution::new();
    for (i, set) in rolls.iter().enumerate() {
        let chance = chances.and_then(|c| c.get(i).copied());
        counts = add_rolls_to_counts(&counts, set, min, max, chance);
    }
    counts
}

/// Sum mass per outcome.
pub fn concat(a: &Distribution, b: &Distribution) -> Distribution {
    let mut out = a.clone();
    for (k, v) in b.iter() {
        out.add(k, v);
    }
    out
}

/// Output of [`combine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Combined {
    /// Mass that stays in the current condition layer.
    pub rolls: Distribution,
    /// Mass caught (and rewritten) by the sequential condition.
    pub sequential: Distribution,
}

/// Convolve `a` (prior outcomes) with `b` (new deltas).
///
/// Each pair's outcome is clamped to `[min, max]` (prior outcomes already at
/// `max` stay fainted), rewritten by every persistent condition in order, and
/// routed to [`Combined::sequential`] when the sequential condition fires.
/// Empty inputs behave as certain zero.
pub fn combine(
    a: &Distribution,
    b: &Distribution,
    min: i64,
    max: i64,
    holder: Option<&RollHolder>,
    persistent: &[RollCondition],
    sequential: Option<RollCondition>,
) -> Combined {
    let a = a.or_certain_zero();
    let b = b.or_certain_zero();
    let mut result = Combined::default();

    for (a_roll, a_mass) in a.iter() {
        for (b_roll, b_mass) in b.iter() {
            let mut outcome = if a_roll == max {
                max
            } else {
                clamp_outcome(a_roll + b_roll, min, max)
            };
            let mass = a_mass * b_mass;

            let Some(holder) = holder else {
                result.rolls.add(outcome, mass);
                continue;
            };

            for cond in persistent {
                if cond.applies(outcome, a_roll, holder) {
                    outcome = cond.roll(outcome, holder);
                }
            }

            match sequential {
                Some(seq) if seq.applies(outcome, a_roll, holder) => {
                    let rewritten = clamp_outcome(seq.roll(outcome, holder), min, max);
                    result.sequential.add(rewritten, mass);
                }
                _ => result.rolls.add(outcome, mass),
            }
        }
    }
    result
}

/// Percent chance (3 significant figures) that the outcome equals `hp`.
pub fn ko_chance(dist: &Distribution, hp: i64) -> f64 {
    let total = dist.total_mass();
    if total <= 0.0 {
        return 0.0;
    }
    round_significant(dist.get(hp) / total * 100.0, 3)
}

pub(crate) fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_single_set_is_uniform() {
        let dist = roll_counts(&[vec![10, 11, 12, 13]], 0, 100, None);
        assert_eq!(dist.len(), 4);
        assert!((dist.get(11) - 0.25).abs() < EPS);
        assert!((dist.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_two_hits_convolve() {
        let dist = roll_counts(&[vec![1, 2], vec![1, 2]], 0, 100, None);
        assert!((dist.get(2) - 0.25).abs() < EPS);
        assert!((dist.get(3) - 0.5).abs() < EPS);
        assert!((dist.get(4) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_weighted_sets_multiply_mass() {
        let dist = roll_counts(&[vec![5, 6], vec![0]], 0, 100, Some(&[0.5, 0.8]));
        assert!((dist.total_mass() - 0.4).abs() < EPS);
    }

    #[test]
    fn test_fainted_stays_fainted() {
        let prior = Distribution::certain(100);
        let healed = add_rolls_to_counts(&prior, &[-30], 0, 100, None);
        assert!((healed.get(100) - 1.0).abs() < EPS);

        let combined = combine(&prior, &Distribution::certain(-30), 0, 100, None, &[], None);
        assert!((combined.rolls.get(100) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_clamps_to_bounds() {
        let dist = roll_counts(&[vec![150]], 0, 100, None);
        assert!((dist.get(100) - 1.0).abs() < EPS);
        let dist = roll_counts(&[vec![-20]], 0, 100, None);
        assert!((dist.get(0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_concat() {
        let a = Distribution::uniform(&[1, 2], 0.5);
        let b = Distribution::uniform(&[2, 3], 0.5);
        let c = concat(&a, &b);
        assert!((c.get(2) - 0.5).abs() < EPS);
        assert!((c.total_mass() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_combine_routes_sequential_mass() {
        let holder = RollHolder::new(100);
        let hit = Distribution::uniform(&[90, 110], 1.0);
        let out = combine(
            &Distribution::new(),
            &hit,
            0,
            100,
            Some(&holder),
            &[],
            Some(RollCondition::FocusSash),
        );
        assert!((out.rolls.get(90) - 0.5).abs() < EPS);
        assert!((out.sequential.get(99) - 0.5).abs() < EPS);
        assert_eq!(out.rolls.get(100), 0.0);
    }

    #[test]
    fn test_combine_persistent_endure() {
        let holder = RollHolder::new(100);
        let out = combine(
            &Distribution::certain(50),
            &Distribution::uniform(&[40, 60], 1.0),
            0,
            100,
            Some(&holder),
            &[RollCondition::Endure],
            None,
        );
        assert!((out.rolls.get(90) - 0.5).abs() < EPS);
        assert!((out.rolls.get(99) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_ko_chance() {
        let dist = Distribution::uniform(&[50, 100, 100], 1.0);
        assert_eq!(ko_chance(&dist, 100), 66.7);
        assert_eq!(ko_chance(&Distribution::new(), 100), 0.0);
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(12.3456, 3), 12.3);
        assert_eq!(round_significant(0.012345, 3), 0.0123);
        assert_eq!(round_significant(100.0, 3), 100.0);
    }
}
