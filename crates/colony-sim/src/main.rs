//! Colony Headless Harness
//!
//! Plays a saved colony one command at a time, or soak-tests the engine
//! in memory. Runs entirely in-process, no server and no rendering.
//!
//! Usage:
//!   colony-sim new --name Kepler
//!   colony-sim turn --count 10
//!   colony-sim build mine
//!   colony-sim status --json
//!   colony-sim soak --turns 500 --verbose

mod logging;
mod soak;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colony_core::persistence::FileStore;
use colony_core::prelude::*;

#[derive(Parser)]
#[command(
    name = "colony-sim",
    version,
    about = "Turn-based colony simulation, headless"
)]
struct Cli {
    /// JSON config file. Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Save file to play.
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    /// Fixed RNG seed. A resumed save mixes in its day.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Found a new colony and save it, replacing any existing save.
    New {
        #[arg(long)]
        name: Option<String>,
    },
    /// Play one or more turns.
    Turn {
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Construct a building: farm, purifier, generator, mine, habitat, hospital.
    Build { kind: String },
    /// Upgrade the building at INDEX (as listed by `status`).
    Upgrade { index: usize },
    /// Set a building to active, inactive or maintenance.
    SetStatus { index: usize, status: String },
    /// Take in a new colonist.
    Hire {
        #[arg(long)]
        name: Option<String>,
    },
    /// Give the colonist with ID a day off.
    Rest { id: u32 },
    /// Give the colonist with ID a new name.
    Rename { id: u32, name: String },
    /// Change a colonist's profession.
    Assign { id: u32, profession: String },
    /// Print colony statistics.
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Print the victory/defeat state.
    Check,
    /// Delete the save and found a new colony.
    Restart,
    /// Run many turns in memory and validate invariants after each.
    Soak {
        #[arg(long, default_value_t = 200)]
        turns: u32,
        #[arg(long)]
        verbose: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::New { name } => cmd_new(config, name),
        Command::Turn { count } => cmd_turn(config, count),
        Command::Build { kind } => cmd_action(config, |s| s.build(&kind)),
        Command::Upgrade { index } => cmd_action(config, |s| s.upgrade(index)),
        Command::SetStatus { index, status } => {
            cmd_action(config, |s| s.set_building_status(index, &status))
        }
        Command::Hire { name } => cmd_action(config, |s| s.hire(name.as_deref())),
        Command::Rest { id } => cmd_action(config, |s| s.rest(id)),
        Command::Rename { id, name } => cmd_action(config, |s| s.rename(id, &name)),
        Command::Assign { id, profession } => cmd_action(config, |s| s.assign(id, &profession)),
        Command::Status { json } => cmd_status(config, json),
        Command::Check => cmd_check(config),
        Command::Restart => cmd_restart(config),
        Command::Soak { turns, verbose } => {
            if soak::run(&config, turns, verbose) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(save) = &cli.save {
        config.save_path = save.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn open(config: GameConfig) -> Result<Session> {
    let path = config.save_path.clone();
    Session::load_game(config)?
        .ok_or_else(|| anyhow!("No saved game found at {}", path.display()))
}

fn cmd_new(mut config: GameConfig, name: Option<String>) -> Result<()> {
    if let Some(name) = name {
        config.colony_name = name;
    }
    let session = Session::new_game(config)?;
    session.save()?;
    println!("{}", session.colony());
    println!("Saved to {}", session.store().path().display());
    Ok(())
}

fn cmd_turn(config: GameConfig, count: u32) -> Result<()> {
    let autosave = config.autosave;
    let mut session = open(config)?;

    for _ in 0..count {
        let report = session.advance();
        print_report(&report);

        let conditions = session.conditions();
        if conditions.status != GameStatus::Active {
            println!("{}", conditions.message);
            break;
        }
    }
    if !autosave {
        session.save()?;
    }
    println!("{}", session.colony());
    Ok(())
}

fn cmd_action<F>(config: GameConfig, action: F) -> Result<()>
where
    F: FnOnce(&mut Session) -> Result<String, ColonyError>,
{
    let mut session = open(config)?;
    let message = action(&mut session)?;
    session.save()?;
    println!("{}", message);
    Ok(())
}

fn cmd_status(config: GameConfig, json: bool) -> Result<()> {
    let session = open(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session.statistics())?);
        return Ok(());
    }

    let colony = session.colony();
    println!("{}", colony);
    println!("Resources:");
    for resource in colony.resources().iter() {
        println!("  {} ({:.1}%)", resource, resource.percent_full());
    }
    println!("Buildings:");
    for (index, building) in colony.buildings().iter().enumerate() {
        println!("  [{}] {}", index, building);
    }
    println!(
        "Colonists (housing {}):",
        match colony.housing_capacity() {
            0 => "unlimited".to_string(),
            n => n.to_string(),
        }
    );
    for colonist in colony.colonists() {
        println!("  #{} {}", colonist.id(), colonist);
    }
    if let Some(event) = colony.history().last() {
        println!("Last event: {} - {}", event.name, event.description);
    }
    Ok(())
}

fn cmd_check(config: GameConfig) -> Result<()> {
    let session = open(config)?;
    let report = session.conditions();
    println!("{:?}", report.status);
    if !report.message.is_empty() {
        println!("{}", report.message);
    }
    Ok(())
}

fn cmd_restart(config: GameConfig) -> Result<()> {
    let session = match Session::load_game(config.clone()) {
        Ok(Some(mut session)) => {
            session.restart()?;
            session
        }
        Ok(None) => Session::new_game(config)?,
        Err(e) => {
            log::warn!("Discarding unreadable save: {}", e);
            FileStore::new(&config.save_path).delete()?;
            Session::new_game(config)?
        }
    };
    session.save()?;
    println!("{}", session.colony());
    Ok(())
}

fn print_report(report: &TurnReport) {
    println!("Day {}:", report.day);
    for (kind, amount) in &report.production {
        println!("  + {:.1} {}", amount, kind);
    }
    for (kind, amount) in &report.consumption {
        println!("  - {:.1} {}", amount, kind);
    }
    if let Some(event) = &report.event {
        println!("  Event: {}: {}", event.name, event.summary);
    }
    for alert in &report.alerts {
        println!("  ! {}", alert);
    }
}
