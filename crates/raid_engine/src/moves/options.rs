use serde::{Deserialize, Serialize};

/// Which roll the scalar HP follows. The lifetime roll tracker always sees
/// every roll regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollChoice {
    Min,
    #[default]
    Avg,
    Max,
}

impl RollChoice {
    /// Pick a value out of rolls sorted lowest first.
    pub fn pick(self, rolls: &[u32]) -> u32 {
        match self {
            RollChoice::Min => rolls.first().copied().unwrap_or(0),
            RollChoice::Max => rolls.last().copied().unwrap_or(0),
            RollChoice::Avg => {
                if rolls.is_empty() {
                    return 0;
                }
                (rolls.iter().map(|&r| r as u64).sum::<u64>() / rolls.len() as u64) as u32
            }
        }
    }

    /// Like [`pick`](Self::pick), but `Avg` takes the middle roll. Used to
    /// rank candidate moves against each other.
    pub fn pick_median(self, rolls: &[u32]) -> u32 {
        match self {
            RollChoice::Avg => rolls.get(rolls.len() / 2).copied().unwrap_or(0),
            other => other.pick(rolls),
        }
    }
}

/// Per-action switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    /// Force a critical hit.
    pub crit: bool,
    pub roll: RollChoice,
    /// Apply chance-based secondary effects as if they happened.
    pub secondary_effects: bool,
    /// Hit count for variable-hit moves, clamped to the move's range.
    pub hits: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_choice_pick() {
        let rolls = [85, 86, 90, 100];
        assert_eq!(RollChoice::Min.pick(&rolls), 85);
        assert_eq!(RollChoice::Max.pick(&rolls), 100);
        assert_eq!(RollChoice::Avg.pick(&rolls), 90);
        assert_eq!(RollChoice::Avg.pick(&[]), 0);
    }

    #[test]
    fn test_median_pick_skews_with_outliers() {
        let rolls = [10, 11, 12, 100];
        assert_eq!(RollChoice::Avg.pick(&rolls), 33);
        assert_eq!(RollChoice::Avg.pick_median(&rolls), 12);
        assert_eq!(RollChoice::Max.pick_median(&rolls), 100);
        assert_eq!(RollChoice::Avg.pick_median(&[]), 0);
    }

    #[test]
    fn test_options_from_json() {
        let options: MoveOptions = serde_json::from_str(r#"{"crit": true, "roll": "max"}"#).unwrap();
        assert!(options.crit);
        assert_eq!(options.roll, RollChoice::Max);
        assert!(!options.secondary_effects);
        assert_eq!(options.hits, None);
    }
}
