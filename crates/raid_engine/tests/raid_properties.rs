//! Properties every resolution step must keep, checked over small grids of
//! inputs.

mod common;

use common::helpers::{built_state, plain_raider, three_slot_state};
use pretty_assertions::assert_eq;
use raid_engine::core_data::BoostId;
use raid_engine::mechanics::get_base_damage;
use raid_engine::rolls::{combine, RollHolder};
use raid_engine::state::{SideCounter, Weather};
use raid_engine::{
    Boosts, CumulativeRolls, Distribution, Flags, Generation, Nature, RaidState, RaidTurn,
    RaiderConfig, TurnInfo, BOSS, NO_MOVE,
};
use rstest::rstest;

// ============================================================================
// Determinism
// ============================================================================

#[rstest]
#[case("Tackle", "Tackle")]
#[case("Bullet Seed", "Earthquake")]
#[case("Swords Dance", "Thunder Wave")]
#[case("Double-Edge", NO_MOVE)]
fn resolving_twice_gives_identical_output(#[case] raider_move: &str, #[case] boss_move: &str) {
    let state = three_slot_state();
    let info = TurnInfo::new(1, BOSS, raider_move, boss_move);

    let first = RaidTurn::new(&info).resolve(&state).unwrap();
    let second = RaidTurn::new(&info).resolve(&state).unwrap();
    assert_eq!(first, second);
    assert_eq!(state, three_slot_state());
}

// ============================================================================
// Probability conservation
// ============================================================================

#[rstest]
#[case(vec![10, 20, 30], vec![5, 15])]
#[case(vec![0], vec![40, 60, 80, 120])]
#[case(vec![95, 99], vec![1, 2, 3])]
fn combine_conserves_mass(#[case] a: Vec<i64>, #[case] b: Vec<i64>) {
    let a = Distribution::uniform(&a, 0.6);
    let b = Distribution::uniform(&b, 0.5);
    let out = combine(&a, &b, 0, 100, None, &[], None);
    let total = out.rolls.total_mass() + out.sequential.total_mass();
    assert!((total - 0.3).abs() < 1e-9, "total mass {}", total);
}

#[rstest]
#[case("Focus Sash")]
#[case("Sitrus Berry")]
#[case("Oran Berry")]
fn tracker_conserves_mass_through_conditions(#[case] item: &str) {
    let mut rolls = CumulativeRolls::new();
    rolls.add_sequential_condition(item);
    let holder = RollHolder::new(100);
    for _ in 0..3 {
        rolls
            .add_rolls(&Distribution::uniform(&[20, 35, 50, 65], 1.0), &holder)
            .unwrap();
    }
    assert!((rolls.total_mass() - 1.0).abs() < 1e-9);
}

// ============================================================================
// HP clamping
// ============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(249)]
#[case(250)]
#[case(10_000)]
fn damage_keeps_hp_in_range(#[case] amount: i64) {
    let mut state = three_slot_state();
    let mut flags = Flags::new(state.len());
    state.apply_damage(1, amount, None, None, &mut flags).unwrap();

    let raider = &state.raiders[1];
    assert_eq!(raider.cur_hp as i64, (250 - amount).max(0));
    assert!(raider.cur_hp <= raider.max_hp);
}

#[rstest]
#[case(10)]
#[case(500)]
fn healing_never_exceeds_max(#[case] amount: i64) {
    let mut state = three_slot_state();
    let mut flags = Flags::new(state.len());
    state.apply_damage(1, 100, None, None, &mut flags).unwrap();
    state.apply_healing(1, amount, &mut flags).unwrap();
    assert_eq!(state.raiders[1].cur_hp as i64, (150 + amount).min(250));
}

// ============================================================================
// Stage clamp
// ============================================================================

#[rstest]
#[case(&[2, 2, 2, 2], 6)]
#[case(&[-6, -6, 1], -5)]
#[case(&[12], 6)]
#[case(&[3, -12, 4], -2)]
fn stages_clamp_to_six(#[case] deltas: &[i8], #[case] expected: i8) {
    let mut state = three_slot_state();
    let mut flags = Flags::new(state.len());
    for &delta in deltas {
        state
            .apply_stat_change(1, Boosts::single(BoostId::Atk, delta), Some(1), &mut flags)
            .unwrap();
        let stage = state.raiders[1].boosts.atk;
        assert!((-6..=6).contains(&stage));
    }
    assert_eq!(state.raiders[1].boosts.atk, expected);
}

// ============================================================================
// Idle turn
// ============================================================================

#[test]
fn idle_turn_only_ticks_timers() {
    let mut state = three_slot_state();
    for raider in state.raiders.iter_mut() {
        raider.field.set_weather(Some(Weather::Sun), 5);
        raider.field.attacker_side.spikes = 1;
    }
    state.raiders[1].field.attacker_side.reflect = 3;
    state.raiders[2].field.attacker_side.reflect = 3;

    let info = TurnInfo::new(1, BOSS, NO_MOVE, NO_MOVE);
    assert!(info.is_idle());
    let next = RaidTurn::new(&info).resolve(&state).unwrap().state;

    for id in 0..state.len() {
        let (before, after) = (&state.raiders[id], &next.raiders[id]);
        assert_eq!(after.cur_hp, before.cur_hp);
        assert_eq!(after.boosts, before.boosts);
        assert_eq!(after.stats, before.stats);
        assert_eq!(after.field.attacker_side.spikes, 1);
    }
    // Lane 1 and the boss tick, slot 2 keeps its own timeline.
    assert_eq!(next.raiders[1].field.weather_turns, 4);
    assert_eq!(next.raiders[BOSS].field.weather_turns, 4);
    assert_eq!(next.raiders[2].field.weather_turns, 5);
    assert_eq!(next.raiders[1].field.attacker_side.reflect, 2);
    assert_eq!(next.raiders[2].field.attacker_side.reflect, 3);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn base_damage_matches_hand_calculation() {
    // floor(floor(42 * 80 * 300 / 200) / 50) + 2
    assert_eq!(get_base_damage(100, 80, 300, 200), 102);

    let attacker = RaiderConfig::new("Garchomp")
        .nature(Nature::Adamant)
        .evs([0, 252, 0, 0, 0, 0])
        .build(1)
        .unwrap();
    assert_eq!(attacker.stats.atk, 394);
}

#[rstest]
#[case(0, true)]
#[case(5, false)]
fn trick_room_reverses_order(#[case] trick_room: u8, #[case] raider_first: bool) {
    let mut state = three_slot_state();
    state.raiders[BOSS].field.trick_room = trick_room;
    let info = TurnInfo::new(1, BOSS, "Tackle", "Tackle");
    let result = RaidTurn::new(&info).resolve(&state).unwrap();
    assert_eq!(result.raider_moves_first, raider_first);
}

#[test]
fn focus_sash_moves_mass_to_one_hp() {
    let mut rolls = CumulativeRolls::new();
    rolls.add_sequential_condition("Focus Sash");
    let holder = RollHolder::new(100);
    let hits: Vec<i64> = (90..=110).collect();
    rolls.add_rolls(&Distribution::uniform(&hits, 1.0), &holder).unwrap();

    let combined = rolls.combined();
    assert_eq!(combined.get(100), 0.0);
    assert!((combined.get(99) - 12.0 / 21.0).abs() < 1e-9);
    assert_eq!(rolls.ko_chance(100), 0.0);
}

#[test]
fn focus_sash_holds_against_a_real_hit() {
    let state = built_state(
        RaiderConfig::new("Garchomp")
            .nature(Nature::Adamant)
            .evs([0, 252, 0, 0, 0, 0]),
        vec![RaiderConfig::new("Pikachu").item("Focus Sash")],
    );
    let info = TurnInfo::new(1, BOSS, NO_MOVE, "Close Combat");
    let result = RaidTurn::new(&info).resolve(&state).unwrap();

    let pikachu = &result.state.raiders[1];
    assert_eq!(pikachu.cur_hp, 1);
    assert_eq!(pikachu.item, None);
    assert_eq!(pikachu.rolls.ko_chance(pikachu.max_hp as i64), 0.0);
}

#[rstest]
#[case(None, 5)]
#[case(Some("Light Clay"), 8)]
fn reflect_lasts_until_defog(#[case] item: Option<&str>, #[case] turns: u8) {
    let mut state = three_slot_state();
    state.raiders[1].item = item.map(str::to_string);
    let mut flags = Flags::new(state.len());
    state.apply_side_counter(1, SideCounter::Reflect, &mut flags).unwrap();
    assert_eq!(state.raiders[1].field.attacker_side.reflect, turns);
    assert_eq!(state.raiders[2].field.attacker_side.reflect, turns);

    let info = TurnInfo::new(1, BOSS, NO_MOVE, "Defog");
    let next = RaidTurn::new(&info).resolve(&state).unwrap().state;
    assert_eq!(next.raiders[1].field.attacker_side.reflect, 0);
    assert_eq!(next.raiders[2].field.attacker_side.reflect, 0);
}

#[test]
fn generation_is_carried_by_the_state() {
    let state = RaidState::new(Generation::Gen8, vec![plain_raider("Boss", 500, 50), plain_raider("A", 100, 50)]);
    let info = TurnInfo::new(1, BOSS, "Tackle", NO_MOVE);
    let next = RaidTurn::new(&info).resolve(&state).unwrap().state;
    assert_eq!(next.gen, Generation::Gen8);
}
