use serde::{Deserialize, Serialize};

use crate::state::{Flags, RaidState};

/// Everything one move execution produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    /// State after the move. The input state is never touched.
    pub state: RaidState,
    pub move_name: String,
    pub user: usize,
    pub target: usize,
    /// HP lost per slot, following the chosen roll.
    pub damage: Vec<i64>,
    /// HP restored per slot by the move's healing.
    pub healing: Vec<i64>,
    /// HP restored (positive) or lost to recoil (negative) by the user.
    pub drain: Vec<i64>,
    /// Damage description per slot, empty where nothing was calculated.
    pub desc: Vec<String>,
    pub flags: Flags,
    pub causes_flinch: Vec<bool>,
    pub warnings: Vec<String>,
    /// Data problems that were skipped (unknown move, stat change without a
    /// value, roll tracker cap).
    pub anomalies: Vec<String>,
}

impl MoveResult {
    pub(crate) fn empty(state: RaidState, move_name: &str, user: usize, target: usize) -> Self {
        let slots = state.len();
        Self {
            state,
            move_name: move_name.to_string(),
            user,
            target,
            damage: vec![0; slots],
            healing: vec![0; slots],
            drain: vec![0; slots],
            desc: vec![String::new(); slots],
            flags: Flags::new(slots),
            causes_flinch: vec![false; slots],
            warnings: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    /// The first non-empty description, or the generic fallback line.
    pub fn summary(&self) -> String {
        self.desc
            .iter()
            .find(|d| !d.is_empty())
            .cloned()
            .unwrap_or_else(|| self.fallback_line())
    }

    pub(crate) fn fallback_line(&self) -> String {
        let name = |id: usize| {
            self.state
                .raider(id)
                .map(|r| r.display_name())
                .unwrap_or_else(|_| format!("slot {}", id))
        };
        if self.user == self.target {
            format!("{} used {}", name(self.user), self.move_name)
        } else {
            format!("{} used {} on {}", name(self.user), self.move_name, name(self.target))
        }
    }
}
