//! Move registries, keyed by display name.

use phf::phf_map;

use super::hooks::MoveHooks;
use super::implementations::{abilities, boss, calls, field, items, protection, recovery, stages};
use crate::state::{Room, SideCounter, Terrain, Weather};

/// What a field-changing move sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEffect {
    Weather(Weather),
    Terrain(Terrain),
    Room(Room),
    Side(SideCounter),
    StealthRock,
    Spikes,
}

pub static FIELD_EFFECTS: phf::Map<&'static str, FieldEffect> = phf_map! {
    "Sunny Day" => FieldEffect::Weather(Weather::Sun),
    "Rain Dance" => FieldEffect::Weather(Weather::Rain),
    "Sandstorm" => FieldEffect::Weather(Weather::Sand),
    "Snowscape" => FieldEffect::Weather(Weather::Snow),
    "Hail" => FieldEffect::Weather(Weather::Hail),

    "Electric Terrain" => FieldEffect::Terrain(Terrain::Electric),
    "Grassy Terrain" => FieldEffect::Terrain(Terrain::Grassy),
    "Misty Terrain" => FieldEffect::Terrain(Terrain::Misty),
    "Psychic Terrain" => FieldEffect::Terrain(Terrain::Psychic),

    "Trick Room" => FieldEffect::Room(Room::TrickRoom),
    "Magic Room" => FieldEffect::Room(Room::MagicRoom),
    "Wonder Room" => FieldEffect::Room(Room::WonderRoom),
    "Gravity" => FieldEffect::Room(Room::Gravity),

    "Reflect" => FieldEffect::Side(SideCounter::Reflect),
    "Light Screen" => FieldEffect::Side(SideCounter::LightScreen),
    "Aurora Veil" => FieldEffect::Side(SideCounter::AuroraVeil),
    "Tailwind" => FieldEffect::Side(SideCounter::Tailwind),
    "Mist" => FieldEffect::Side(SideCounter::Mist),
    "Safeguard" => FieldEffect::Side(SideCounter::Safeguard),
    "Attack Cheer" => FieldEffect::Side(SideCounter::AttackCheer),
    "Defense Cheer" => FieldEffect::Side(SideCounter::DefenseCheer),

    "Stealth Rock" => FieldEffect::StealthRock,
    "Spikes" => FieldEffect::Spikes,
};

pub static MOVE_REGISTRY: phf::Map<&'static str, MoveHooks> = phf_map! {
    // ==========================================================================
    // Abilities
    // ==========================================================================
    "Skill Swap" => MoveHooks {
        on_try: Some(abilities::try_skill_swap),
        on_apply: Some(abilities::skill_swap),
        ..MoveHooks::NONE
    },
    "Role Play" => MoveHooks {
        on_try: Some(abilities::try_role_play),
        on_apply: Some(abilities::role_play),
        ..MoveHooks::NONE
    },
    "Entrainment" => MoveHooks {
        on_try: Some(abilities::try_entrainment),
        on_apply: Some(abilities::entrainment),
        ..MoveHooks::NONE
    },
    "Worry Seed" => MoveHooks {
        on_try: Some(abilities::try_worry_seed),
        on_apply: Some(abilities::worry_seed),
        ..MoveHooks::NONE
    },
    "Simple Beam" => MoveHooks {
        on_try: Some(abilities::try_simple_beam),
        on_apply: Some(abilities::simple_beam),
        ..MoveHooks::NONE
    },
    "Gastro Acid" => MoveHooks {
        on_try: Some(abilities::try_gastro_acid),
        on_apply: Some(abilities::gastro_acid),
        ..MoveHooks::NONE
    },
    "Doodle" => MoveHooks {
        on_try: Some(abilities::try_doodle),
        on_apply: Some(abilities::doodle),
        ..MoveHooks::NONE
    },

    // ==========================================================================
    // Items
    // ==========================================================================
    "Knock Off" => MoveHooks { on_apply: Some(items::knock_off), ..MoveHooks::NONE },
    "Thief" => MoveHooks { on_apply: Some(items::thief), ..MoveHooks::NONE },
    "Covet" => MoveHooks { on_apply: Some(items::thief), ..MoveHooks::NONE },
    "Bug Bite" => MoveHooks { on_apply: Some(items::bug_bite), ..MoveHooks::NONE },
    "Pluck" => MoveHooks { on_apply: Some(items::bug_bite), ..MoveHooks::NONE },
    "Incinerate" => MoveHooks { on_apply: Some(items::incinerate), ..MoveHooks::NONE },
    "Trick" => MoveHooks {
        on_try: Some(items::try_trick),
        on_apply: Some(items::trick),
        ..MoveHooks::NONE
    },
    "Switcheroo" => MoveHooks {
        on_try: Some(items::try_trick),
        on_apply: Some(items::trick),
        ..MoveHooks::NONE
    },
    "Bestow" => MoveHooks {
        on_try: Some(items::try_bestow),
        on_apply: Some(items::bestow),
        ..MoveHooks::NONE
    },
    "Fling" => MoveHooks {
        on_try: Some(items::try_fling),
        on_apply: Some(items::fling),
        ..MoveHooks::NONE
    },

    // ==========================================================================
    // Stat stages
    // ==========================================================================
    "Psych Up" => MoveHooks { on_apply: Some(stages::psych_up), ..MoveHooks::NONE },
    "Power Swap" => MoveHooks { on_apply: Some(stages::power_swap), ..MoveHooks::NONE },
    "Guard Swap" => MoveHooks { on_apply: Some(stages::guard_swap), ..MoveHooks::NONE },
    "Heart Swap" => MoveHooks { on_apply: Some(stages::heart_swap), ..MoveHooks::NONE },
    "Speed Swap" => MoveHooks { on_apply: Some(stages::speed_swap), ..MoveHooks::NONE },
    "Power Trick" => MoveHooks { on_apply: Some(stages::power_trick), ..MoveHooks::NONE },
    "Haze" => MoveHooks { on_apply: Some(stages::haze), ..MoveHooks::NONE },
    "Clear Smog" => MoveHooks { on_apply: Some(stages::clear_smog), ..MoveHooks::NONE },
    "Belly Drum" => MoveHooks {
        on_try: Some(stages::try_belly_drum),
        on_apply: Some(stages::belly_drum),
        ..MoveHooks::NONE
    },
    "Stockpile" => MoveHooks {
        on_try: Some(stages::try_stockpile),
        on_apply: Some(stages::stockpile),
        ..MoveHooks::NONE
    },
    "Focus Energy" => MoveHooks {
        on_try: Some(stages::try_focus_energy),
        on_apply: Some(stages::focus_energy),
        ..MoveHooks::NONE
    },
    "Charge" => MoveHooks { on_apply: Some(stages::charge), ..MoveHooks::NONE },
    "Tidy Up" => MoveHooks { on_apply: Some(stages::tidy_up), ..MoveHooks::NONE },

    // ==========================================================================
    // Protection
    // ==========================================================================
    "Protect" => MoveHooks { on_apply: Some(protection::protect), ..MoveHooks::NONE },
    "Detect" => MoveHooks { on_apply: Some(protection::protect), ..MoveHooks::NONE },
    "Endure" => MoveHooks { on_apply: Some(protection::endure), ..MoveHooks::NONE },
    "Wide Guard" => MoveHooks { on_apply: Some(protection::wide_guard), ..MoveHooks::NONE },
    "Quick Guard" => MoveHooks { on_apply: Some(protection::quick_guard), ..MoveHooks::NONE },
    "Helping Hand" => MoveHooks { on_apply: Some(protection::helping_hand), ..MoveHooks::NONE },
    "Fake Out" => MoveHooks { on_try: Some(protection::try_fake_out), ..MoveHooks::NONE },

    // ==========================================================================
    // Field and form
    // ==========================================================================
    "Defog" => MoveHooks { on_apply: Some(field::defog), ..MoveHooks::NONE },
    "Smack Down" => MoveHooks { on_apply: Some(field::smack_down), ..MoveHooks::NONE },
    "Thousand Arrows" => MoveHooks { on_apply: Some(field::smack_down), ..MoveHooks::NONE },
    "Soak" => MoveHooks {
        on_try: Some(field::try_soak),
        on_apply: Some(field::soak),
        ..MoveHooks::NONE
    },
    "Transform" => MoveHooks {
        on_try: Some(field::try_transform),
        on_apply: Some(field::transform),
        ..MoveHooks::NONE
    },
    "Aqua Ring" => MoveHooks { on_apply: Some(field::aqua_ring), ..MoveHooks::NONE },
    "Ingrain" => MoveHooks { on_apply: Some(field::ingrain), ..MoveHooks::NONE },

    // ==========================================================================
    // Called moves
    // ==========================================================================
    "Instruct" => MoveHooks { on_try: Some(calls::try_instruct), ..MoveHooks::NONE },
    "Copycat" => MoveHooks { on_try: Some(calls::try_copycat), ..MoveHooks::NONE },

    // ==========================================================================
    // Recovery
    // ==========================================================================
    "Rest" => MoveHooks {
        on_try: Some(recovery::try_rest),
        on_apply: Some(recovery::rest),
        ..MoveHooks::NONE
    },
    "Heal Cheer" => MoveHooks { on_apply: Some(recovery::heal_cheer), ..MoveHooks::NONE },
    "Explosion" => MoveHooks { on_apply: Some(recovery::explosion), ..MoveHooks::NONE },
    "Self-Destruct" => MoveHooks { on_apply: Some(recovery::explosion), ..MoveHooks::NONE },

    // ==========================================================================
    // Raid boss actions
    // ==========================================================================
    "Remove Stat Boosts" => MoveHooks {
        on_apply: Some(boss::remove_stat_boosts),
        boss_action: true,
        ..MoveHooks::NONE
    },
    "Remove Negative Effects" => MoveHooks {
        on_apply: Some(boss::remove_negative_effects),
        boss_action: true,
        ..MoveHooks::NONE
    },
    "Activate Shield" => MoveHooks {
        on_apply: Some(boss::activate_shield),
        boss_action: true,
        ..MoveHooks::NONE
    },
    "Steal Tera Charge" => MoveHooks {
        on_apply: Some(boss::steal_tera_charge),
        boss_action: true,
        ..MoveHooks::NONE
    },
};
