use anyhow::Context;
use clap::Args;
use raid_engine::{BattleResult, BattleScript, Flags, RaidState};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Battle script (JSON)
    pub script: PathBuf,

    /// Print the full battle result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Hide turn-zero and per-slot flags
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("cannot read {}", args.script.display()))?;
    let script = BattleScript::from_json(&text)
        .with_context(|| format!("cannot parse {}", args.script.display()))?;

    // Scripts with "(Optimal Move)" boss actions go through the optimizer.
    let result = script.run().context("battle failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&result, args.quiet)
}

fn print_report(result: &BattleResult, quiet: bool) -> anyhow::Result<()> {
    let start = &result.turn_zero_state;
    let order: Vec<String> = result
        .turn_zero_order
        .iter()
        .map(|&id| name(start, id))
        .collect();
    println!("Turn 0: {}", order.join(", "));
    if !quiet {
        print_flags(start, &result.turn_zero_flags);
        print_flags(start, &result.turn_zero_reactions);
    }

    for turn in &result.turn_results {
        println!();
        println!("Turn {}:", turn.turn_number + 1);
        for move_result in &turn.results {
            println!("  {}", move_result.summary());
            if !quiet {
                print_flags(&move_result.state, &move_result.flags);
            }
            for anomaly in &move_result.anomalies {
                println!("    ! {}", anomaly);
            }
        }
        for warning in turn.warnings() {
            println!("  warning: {}", warning);
        }
        if !quiet {
            print_flags(&turn.state, &turn.end_of_turn_flags);
        }
    }

    println!();
    println!("End:");
    for raider in &result.end_state.raiders {
        let percent = raider.cur_hp as f64 * 100.0 / raider.max_hp.max(1) as f64;
        println!(
            "  {:<24} {:>6}/{:<6} ({:.1}%)  KO chance {}%",
            raider.display_name(),
            raider.cur_hp,
            raider.max_hp,
            percent,
            result.ko_chance(raider.id)?
        );
    }
    Ok(())
}

fn print_flags(state: &RaidState, flags: &Flags) {
    for id in 0..flags.len() {
        for flag in flags.get(id) {
            println!("    [{}] {}", name(state, id), flag);
        }
    }
}

fn name(state: &RaidState, id: usize) -> String {
    state
        .raider(id)
        .map(|r| r.display_name())
        .unwrap_or_else(|_| format!("slot {}", id))
}
