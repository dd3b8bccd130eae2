//! Smogon-style damage descriptions.
//!
//! The calculator fills a [`RawDesc`] while it works; only modifiers that
//! actually applied leave a trace, so the text lists exactly what mattered:
//!
//! `+1 Atk Choice Band Garchomp Earthquake vs. Boss Tyranitar: 120-142 (30.1 - 35.7%)`

use crate::state::{Terrain, Weather};
use crate::types::Type;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDesc {
    pub attacker_boost: i8,
    pub attack_stat: &'static str,
    pub attacker_item: Option<String>,
    pub attacker_ability: Option<String>,
    pub is_burned: bool,
    pub attacker_name: String,
    pub is_helping_hand: bool,
    pub attacker_tera: Option<Type>,
    pub move_name: String,
    /// Shown for variable-power moves.
    pub move_bp: Option<u32>,
    /// Shown when an ability or the move itself changed the type.
    pub move_type: Option<Type>,
    pub hits: Option<u8>,

    pub defender_boost: i8,
    pub defense_stat: &'static str,
    pub defender_item: Option<String>,
    pub defender_ability: Option<String>,
    pub defender_tera: Option<Type>,
    pub defender_name: String,

    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub is_reflect: bool,
    pub is_light_screen: bool,
    pub is_aurora_veil: bool,
    pub is_friend_guard: bool,
    pub is_shielded: bool,
    pub is_protected: bool,
    pub is_critical: bool,
}

/// Tenths of a percent, printed without a trailing `.0`.
pub fn format_percent(damage: u32, max_hp: u32) -> String {
    let tenths = damage as u64 * 1000 / max_hp.max(1) as u64;
    if tenths % 10 == 0 {
        format!("{}", tenths / 10)
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

fn push_boost(out: &mut String, boost: i8, stat: &str) {
    if boost != 0 {
        out.push_str(&format!("{:+} {} ", boost, stat));
    }
}

impl RawDesc {
    fn attacker_part(&self) -> String {
        let mut out = String::new();
        push_boost(&mut out, self.attacker_boost, self.attack_stat);
        if let Some(item) = &self.attacker_item {
            out.push_str(item);
            out.push(' ');
        }
        if let Some(ability) = &self.attacker_ability {
            out.push_str(ability);
            out.push(' ');
        }
        if self.is_burned {
            out.push_str("burned ");
        }
        out.push_str(&self.attacker_name);
        if self.is_helping_hand {
            out.push_str(" Helping Hand");
        }
        if let Some(tera) = self.attacker_tera {
            out.push_str(&format!(" Tera {}", tera.name()));
        }
        out.push(' ');
        out.push_str(&self.move_name);
        if let Some(bp) = self.move_bp {
            out.push_str(&format!(" ({} BP)", bp));
        }
        if let Some(move_type) = self.move_type {
            out.push_str(&format!(" ({})", move_type.name()));
        }
        if let Some(hits) = self.hits {
            out.push_str(&format!(" ({} hits)", hits));
        }
        out
    }

    fn defender_part(&self) -> String {
        let mut out = String::new();
        push_boost(&mut out, self.defender_boost, self.defense_stat);
        if let Some(item) = &self.defender_item {
            out.push_str(item);
            out.push(' ');
        }
        if let Some(ability) = &self.defender_ability {
            out.push_str(ability);
            out.push(' ');
        }
        if let Some(tera) = self.defender_tera {
            out.push_str(&format!("Tera {} ", tera.name()));
        }
        out.push_str(&self.defender_name);

        if let Some(weather) = self.weather {
            out.push_str(&format!(" in {}", weather.name()));
        }
        if let Some(terrain) = self.terrain {
            out.push_str(&format!(" in {} Terrain", terrain.name()));
        }
        if self.is_reflect {
            out.push_str(" through Reflect");
        } else if self.is_light_screen {
            out.push_str(" through Light Screen");
        } else if self.is_aurora_veil {
            out.push_str(" through Aurora Veil");
        }
        if self.is_friend_guard {
            out.push_str(" with an ally's Friend Guard");
        }
        if self.is_shielded {
            out.push_str(" behind a tera shield");
        }
        if self.is_protected {
            out.push_str(" through Protect");
        }
        if self.is_critical {
            out.push_str(" on a critical hit");
        }
        out
    }

    /// Full description with the damage range against `max_hp`.
    pub fn build(&self, min: u32, max: u32, max_hp: u32) -> String {
        format!(
            "{} vs. {}: {}-{} ({} - {}%)",
            self.attacker_part(),
            self.defender_part(),
            min,
            max,
            format_percent(min, max_hp),
            format_percent(max, max_hp),
        )
    }
}
