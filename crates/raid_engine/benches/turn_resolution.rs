//! Benchmarks for raid state cloning and single-turn resolution.
//!
//! Every move clones the state it starts from, so clone cost bounds how fast
//! long battles resolve.
//!
//! Run with:
//!   cargo bench --package raid_engine --bench turn_resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use raid_engine::{Nature, RaidState, RaidTurn, RaiderConfig, TurnInfo, BOSS, NO_MOVE};

/// A five-slot raid: boss plus four raiders.
fn setup_raid() -> RaidState {
    let boss = RaiderConfig::new("Tyranitar")
        .role("Tera Raid Boss")
        .nature(Nature::Adamant)
        .evs([0, 252, 0, 0, 0, 0])
        .boss_multiplier(3500)
        .moves(&["Crunch", "Stone Edge", "Earthquake", "Rock Slide"])
        .build(0);

    let raiders = [
        ("Garchomp", "Earthquake"),
        ("Lucario", "Close Combat"),
        ("Blissey", "Light Screen"),
        ("Pikachu", "Thunderbolt"),
    ];

    let mut all = Vec::new();
    if let Ok(boss) = boss {
        all.push(boss);
    }
    for (i, (species, attack)) in raiders.iter().enumerate() {
        if let Ok(raider) = RaiderConfig::new(species)
            .role(&format!("Raider {}", i + 1))
            .evs([4, 252, 0, 0, 0, 252])
            .moves(&[*attack])
            .build(i + 1)
        {
            all.push(raider);
        }
    }
    RaidState::new(Default::default(), all)
}

fn bench_state_clone(c: &mut Criterion) {
    let state = setup_raid();

    let mut group = c.benchmark_group("state_clone");
    group.throughput(Throughput::Elements(1));
    group.bench_function("five_slots", |b| b.iter(|| black_box(&state).clone()));
    group.finish();
}

fn bench_turn(c: &mut Criterion) {
    let state = setup_raid();
    let attack = TurnInfo::new(1, BOSS, "Earthquake", "Crunch");
    let most_damaging = TurnInfo::new(2, BOSS, "Close Combat", "(Most Damaging)");
    let idle = TurnInfo::new(3, BOSS, NO_MOVE, NO_MOVE);

    let mut group = c.benchmark_group("turn_resolution");
    group.throughput(Throughput::Elements(1));
    group.bench_function("spread_attack", |b| {
        b.iter(|| RaidTurn::new(black_box(&attack)).resolve(black_box(&state)))
    });
    group.bench_function("most_damaging_boss", |b| {
        b.iter(|| RaidTurn::new(black_box(&most_damaging)).resolve(black_box(&state)))
    });
    group.bench_function("idle", |b| {
        b.iter(|| RaidTurn::new(black_box(&idle)).resolve(black_box(&state)))
    });
    group.finish();
}

criterion_group!(benches, bench_state_clone, bench_turn);
criterion_main!(benches);
