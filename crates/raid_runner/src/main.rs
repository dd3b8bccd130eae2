//! Command-line raid resolver.
//!
//! Loads a JSON battle script, resolves it and prints what happened.
//!
//! Usage:
//!   cargo run -p raid_runner -- run battle.json
//!   cargo run -p raid_runner -- run battle.json --json
//!   cargo run -p raid_runner -- check-species Garchomp --nature Jolly
//!   cargo run -p raid_runner -- check-move "Close Combat"

mod cmd;
mod logger;

use clap::{Parser, Subcommand};
use cmd::{check, run};

#[derive(Parser)]
#[command(name = "raid_runner", version, about = "Resolve Tera Raid battle scripts")]
struct Cli {
    /// Log engine activity to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a battle script
    Run(run::RunArgs),

    /// Show the built stats of a species
    CheckSpecies(check::SpeciesArgs),

    /// Show a move's catalog record
    CheckMove(check::MoveArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::CheckSpecies(args) => check::species(args),
        Commands::CheckMove(args) => check::move_record(args),
    }
}
