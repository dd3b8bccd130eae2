use anyhow::{anyhow, Context};
use clap::Args;
use raid_engine::{MoveCatalog, Nature, RaiderConfig};

#[derive(Args, Debug)]
pub struct SpeciesArgs {
    pub species: String,

    #[arg(short, long)]
    pub nature: Option<String>,

    /// EVs as six comma-separated numbers (HP,Atk,Def,SpA,SpD,Spe)
    #[arg(short, long, value_delimiter = ',')]
    pub evs: Option<Vec<u8>>,

    /// Boss HP multiplier in percent
    #[arg(short, long, default_value_t = 100)]
    pub boss_multiplier: u16,
}

pub fn species(args: SpeciesArgs) -> anyhow::Result<()> {
    let mut config = RaiderConfig::new(&args.species).boss_multiplier(args.boss_multiplier);
    if let Some(name) = &args.nature {
        let nature = Nature::from_name(name).ok_or_else(|| anyhow!("unknown nature '{}'", name))?;
        config = config.nature(nature);
    }
    if let Some(evs) = &args.evs {
        let evs: [u8; 6] = evs
            .as_slice()
            .try_into()
            .map_err(|_| anyhow!("expected six EVs"))?;
        config = config.evs(evs);
    }

    let raider = config.build(0).with_context(|| format!("cannot build {}", args.species))?;
    let s = raider.stats;
    println!("{} ({:?})", raider.name, raider.types);
    println!("  ability: {}", raider.ability.as_deref().unwrap_or("-"));
    println!("  HP {} (max {})", s.hp, raider.max_hp);
    println!("  Atk {} / Def {} / SpA {} / SpD {} / Spe {}", s.atk, s.def, s.spa, s.spd, s.spe);
    Ok(())
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    pub name: String,
}

pub fn move_record(args: MoveArgs) -> anyhow::Result<()> {
    let record = MoveCatalog::builtin()
        .get(&args.name)
        .ok_or_else(|| anyhow!("'{}' is not in the move catalog", args.name))?;
    println!("{}", serde_json::to_string_pretty(record.as_ref())?);
    Ok(())
}
