//! Field and side conditions.
//!
//! Every combatant owns a [`Field`]. Its `attacker_side` holds the conditions
//! of that combatant's own side; `defender_side` is filled in with the
//! opponent's side whenever a move is resolved. Whole-field conditions are
//! replicated on every field, and counters are stored as turns remaining
//! (0 = inactive).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Snow,
    Hail,
    HarshSunshine,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    pub fn is_sun(self) -> bool {
        matches!(self, Weather::Sun | Weather::HarshSunshine)
    }

    pub fn is_rain(self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }

    /// Weathers set by primal abilities; regular weather cannot replace them.
    pub fn is_primal(self) -> bool {
        matches!(
            self,
            Weather::HarshSunshine | Weather::HeavyRain | Weather::StrongWinds
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sand",
            Weather::Snow => "Snow",
            Weather::Hail => "Hail",
            Weather::HarshSunshine => "Harsh Sunshine",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }

    /// Item that extends this weather to 8 turns.
    pub fn extender(self) -> Option<&'static str> {
        match self {
            Weather::Sun => Some("Heat Rock"),
            Weather::Rain => Some("Damp Rock"),
            Weather::Sand => Some("Smooth Rock"),
            Weather::Snow | Weather::Hail => Some("Icy Rock"),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    pub fn name(self) -> &'static str {
        match self {
            Terrain::Electric => "Electric",
            Terrain::Grassy => "Grassy",
            Terrain::Misty => "Misty",
            Terrain::Psychic => "Psychic",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    Singles,
    Doubles,
}

/// Timed whole-field effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    MagicRoom,
    WonderRoom,
    Gravity,
    TrickRoom,
}

impl Room {
    pub fn name(self) -> &'static str {
        match self {
            Room::MagicRoom => "Magic Room",
            Room::WonderRoom => "Wonder Room",
            Room::Gravity => "Gravity",
            Room::TrickRoom => "Trick Room",
        }
    }
}

/// Timed side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideCounter {
    Reflect,
    LightScreen,
    AuroraVeil,
    Tailwind,
    Mist,
    Safeguard,
    AttackCheer,
    DefenseCheer,
}

impl SideCounter {
    pub const ALL: [SideCounter; 8] = [
        SideCounter::Reflect,
        SideCounter::LightScreen,
        SideCounter::AuroraVeil,
        SideCounter::Tailwind,
        SideCounter::Mist,
        SideCounter::Safeguard,
        SideCounter::AttackCheer,
        SideCounter::DefenseCheer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SideCounter::Reflect => "Reflect",
            SideCounter::LightScreen => "Light Screen",
            SideCounter::AuroraVeil => "Aurora Veil",
            SideCounter::Tailwind => "Tailwind",
            SideCounter::Mist => "Mist",
            SideCounter::Safeguard => "Safeguard",
            SideCounter::AttackCheer => "Attack Cheer",
            SideCounter::DefenseCheer => "Defense Cheer",
        }
    }

    pub fn base_turns(self) -> u8 {
        match self {
            SideCounter::Tailwind => 4,
            SideCounter::AttackCheer | SideCounter::DefenseCheer => 3,
            _ => 5,
        }
    }

    /// Screens last 8 turns with Light Clay.
    pub fn is_screen(self) -> bool {
        matches!(
            self,
            SideCounter::Reflect | SideCounter::LightScreen | SideCounter::AuroraVeil
        )
    }
}

bitflags! {
    /// Untimed side conditions.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SideFlags: u32 {
        const PROTECTED = 1 << 0;
        const WIDE_GUARD = 1 << 1;
        const QUICK_GUARD = 1 << 2;
        const SEEDED = 1 << 3;
        const FORESIGHT = 1 << 4;
        const HELPING_HAND = 1 << 5;
        const CHARGED = 1 << 6;
        const FRIEND_GUARD = 1 << 7;
        const BATTERY = 1 << 8;
        const POWER_SPOT = 1 << 9;
        const FLOWER_GIFT = 1 << 10;
        const STEELY_SPIRIT = 1 << 11;
        const AROMA_VEIL = 1 << 12;
        const FLOWER_VEIL = 1 << 13;
        const STEALTH_ROCK = 1 << 14;
        // FIXME: Battery and Power Spot are only set from data today; nothing
        // grants them during a battle.
    }
}

bitflags! {
    /// Field-wide ability effects.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FieldAbilities: u16 {
        const SWORD_OF_RUIN = 1 << 0;
        const BEADS_OF_RUIN = 1 << 1;
        const TABLETS_OF_RUIN = 1 << 2;
        const VESSEL_OF_RUIN = 1 << 3;
        const FAIRY_AURA = 1 << 4;
        const DARK_AURA = 1 << 5;
        const AURA_BREAK = 1 << 6;
        const CLOUD_NINE = 1 << 7;
        const TERAFORM_ZERO = 1 << 8;
    }
}

// ============================================================================
// Side
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Side {
    pub reflect: u8,
    pub light_screen: u8,
    pub aurora_veil: u8,
    pub tailwind: u8,
    pub mist: u8,
    pub safeguard: u8,
    pub atk_cheer: u8,
    pub def_cheer: u8,
    /// Spikes layers (0-3).
    pub spikes: u8,
    pub flags: SideFlags,
}

impl Side {
    pub fn counter(&self, counter: SideCounter) -> u8 {
        match counter {
            SideCounter::Reflect => self.reflect,
            SideCounter::LightScreen => self.light_screen,
            SideCounter::AuroraVeil => self.aurora_veil,
            SideCounter::Tailwind => self.tailwind,
            SideCounter::Mist => self.mist,
            SideCounter::Safeguard => self.safeguard,
            SideCounter::AttackCheer => self.atk_cheer,
            SideCounter::DefenseCheer => self.def_cheer,
        }
    }

    pub fn counter_mut(&mut self, counter: SideCounter) -> &mut u8 {
        match counter {
            SideCounter::Reflect => &mut self.reflect,
            SideCounter::LightScreen => &mut self.light_screen,
            SideCounter::AuroraVeil => &mut self.aurora_veil,
            SideCounter::Tailwind => &mut self.tailwind,
            SideCounter::Mist => &mut self.mist,
            SideCounter::Safeguard => &mut self.safeguard,
            SideCounter::AttackCheer => &mut self.atk_cheer,
            SideCounter::DefenseCheer => &mut self.def_cheer,
        }
    }

    pub fn is_active(&self, counter: SideCounter) -> bool {
        self.counter(counter) > 0
    }

    pub fn has(&self, flag: SideFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set(&mut self, flag: SideFlags, on: bool) {
        self.flags.set(flag, on);
    }

    pub fn is_protected(&self) -> bool {
        self.has(SideFlags::PROTECTED)
    }

    pub fn clear_screens(&mut self) {
        self.reflect = 0;
        self.light_screen = 0;
        self.aurora_veil = 0;
    }

    pub fn clear_hazards(&mut self) {
        self.spikes = 0;
        self.flags.remove(SideFlags::STEALTH_ROCK);
    }

    /// Tick every active counter down by one.
    pub fn decrement_counters(&mut self) {
        for counter in SideCounter::ALL {
            let turns = self.counter_mut(counter);
            *turns = turns.saturating_sub(1);
        }
    }

    /// Flags that only last for the turn they were set in.
    pub fn clear_turn_flags(&mut self) {
        self.flags.remove(
            SideFlags::PROTECTED
                | SideFlags::WIDE_GUARD
                | SideFlags::QUICK_GUARD
                | SideFlags::HELPING_HAND,
        );
    }
}

// ============================================================================
// Field
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    pub game_type: GameType,

    pub weather: Option<Weather>,
    /// 0 with a weather set means it does not expire.
    pub weather_turns: u8,
    pub terrain: Option<Terrain>,
    pub terrain_turns: u8,

    pub magic_room: u8,
    pub wonder_room: u8,
    pub gravity: u8,
    pub trick_room: u8,

    pub abilities: FieldAbilities,

    /// Conditions on this combatant's own side.
    pub attacker_side: Side,
    /// Conditions on the opposing side, filled in per move.
    pub defender_side: Side,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Weather in effect, accounting for Cloud Nine / Air Lock and Teraform Zero.
    pub fn effective_weather(&self) -> Option<Weather> {
        if self
            .abilities
            .intersects(FieldAbilities::CLOUD_NINE | FieldAbilities::TERAFORM_ZERO)
        {
            return None;
        }
        self.weather
    }

    pub fn has_weather(&self, weathers: &[Weather]) -> bool {
        self.effective_weather()
            .is_some_and(|w| weathers.contains(&w))
    }

    pub fn is_sun(&self) -> bool {
        self.effective_weather().is_some_and(Weather::is_sun)
    }

    pub fn is_rain(&self) -> bool {
        self.effective_weather().is_some_and(Weather::is_rain)
    }

    pub fn effective_terrain(&self) -> Option<Terrain> {
        if self.abilities.contains(FieldAbilities::TERAFORM_ZERO) {
            return None;
        }
        self.terrain
    }

    pub fn has_terrain(&self, terrain: Terrain) -> bool {
        self.effective_terrain() == Some(terrain)
    }

    pub fn room(&self, room: Room) -> u8 {
        match room {
            Room::MagicRoom => self.magic_room,
            Room::WonderRoom => self.wonder_room,
            Room::Gravity => self.gravity,
            Room::TrickRoom => self.trick_room,
        }
    }

    pub fn room_mut(&mut self, room: Room) -> &mut u8 {
        match room {
            Room::MagicRoom => &mut self.magic_room,
            Room::WonderRoom => &mut self.wonder_room,
            Room::Gravity => &mut self.gravity,
            Room::TrickRoom => &mut self.trick_room,
        }
    }

    pub fn is_magic_room(&self) -> bool {
        self.magic_room > 0
    }

    pub fn is_wonder_room(&self) -> bool {
        self.wonder_room > 0
    }

    pub fn is_gravity(&self) -> bool {
        self.gravity > 0
    }

    pub fn is_trick_room(&self) -> bool {
        self.trick_room > 0
    }

    pub fn has_ability_effect(&self, effect: FieldAbilities) -> bool {
        self.abilities.contains(effect)
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    pub fn set_weather(&mut self, weather: Option<Weather>, turns: u8) {
        self.weather = weather;
        self.weather_turns = if weather.is_some() { turns } else { 0 };
    }

    pub fn set_terrain(&mut self, terrain: Option<Terrain>, turns: u8) {
        self.terrain = terrain;
        self.terrain_turns = if terrain.is_some() { turns } else { 0 };
    }

    /// Swap the attacker and defender sides in place.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.attacker_side, &mut self.defender_side);
    }

    pub fn swapped(&self) -> Self {
        let mut field = self.clone();
        field.swap();
        field
    }

    /// Tick every timed condition down by one. Weather and terrain with a
    /// turn count expire when it reaches zero.
    pub fn decrement_turns(&mut self) {
        if self.weather.is_some() && self.weather_turns > 0 {
            self.weather_turns -= 1;
            if self.weather_turns == 0 {
                self.weather = None;
            }
        }
        if self.terrain.is_some() && self.terrain_turns > 0 {
            self.terrain_turns -= 1;
            if self.terrain_turns == 0 {
                self.terrain = None;
            }
        }
        for room in [Room::MagicRoom, Room::WonderRoom, Room::Gravity, Room::TrickRoom] {
            let turns = self.room_mut(room);
            *turns = turns.saturating_sub(1);
        }
        self.attacker_side.decrement_counters();
        self.defender_side.decrement_counters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_nine_hides_weather() {
        let mut field = Field::new();
        field.set_weather(Some(Weather::Rain), 5);
        assert!(field.is_rain());
        field.abilities.insert(FieldAbilities::CLOUD_NINE);
        assert!(!field.is_rain());
        assert!(!field.has_weather(&[Weather::Rain]));
    }

    #[test]
    fn test_teraform_zero_hides_terrain() {
        let mut field = Field::new();
        field.set_terrain(Some(Terrain::Grassy), 5);
        assert!(field.has_terrain(Terrain::Grassy));
        field.abilities.insert(FieldAbilities::TERAFORM_ZERO);
        assert!(!field.has_terrain(Terrain::Grassy));
    }

    #[test]
    fn test_decrement_expires() {
        let mut field = Field::new();
        field.set_weather(Some(Weather::Sun), 1);
        field.trick_room = 2;
        field.attacker_side.reflect = 5;
        field.decrement_turns();
        assert_eq!(field.weather, None);
        assert_eq!(field.trick_room, 1);
        assert_eq!(field.attacker_side.reflect, 4);
        field.decrement_turns();
        field.decrement_turns();
        assert_eq!(field.trick_room, 0);
    }

    #[test]
    fn test_permanent_weather() {
        let mut field = Field::new();
        field.set_weather(Some(Weather::Sand), 0);
        field.decrement_turns();
        assert_eq!(field.weather, Some(Weather::Sand));
    }

    #[test]
    fn test_swap_sides() {
        let mut field = Field::new();
        field.attacker_side.tailwind = 3;
        field.swap();
        assert_eq!(field.defender_side.tailwind, 3);
        assert_eq!(field.attacker_side.tailwind, 0);
    }
}
