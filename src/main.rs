//! Nightfell - entry point
//!
//! Loads the world file, wires the action and mission engines together
//! and runs the blocking turn loop. Rendering here is a plain
//! line-oriented stand-in for the panel renderer.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use nightfell::action::{ActionEngine, TeamPrompt};
use nightfell::command::{Command, CommandCode};
use nightfell::core::config::GameConfig;
use nightfell::core::error::{GameError, Result};
use nightfell::core::types::{Direction, PlayerId};
use nightfell::game::GameState;
use nightfell::mission::MissionEngine;
use nightfell::persist::{load_game, save_game};
use nightfell::world::WorldModel;

/// Two-player cooperative haunted-manor text adventure
#[derive(Parser, Debug)]
#[command(name = "nightfell")]
#[command(about = "Two-player cooperative haunted-manor text adventure")]
struct Args {
    /// World data file to load
    world: PathBuf,

    /// Random seed for deterministic combat rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Write the log to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Blocking yes/no prompt on stdin for the Team command
struct StdinPrompt;

impl TeamPrompt for StdinPrompt {
    fn confirm(&mut self, world: &WorldModel, proposer: PlayerId, invitee: PlayerId) -> bool {
        let proposer_name = world
            .player(proposer)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let invitee_name = world.player(invitee).map(|p| p.name.as_str()).unwrap_or("?");
        println!();
        println!("{invitee_name}: {proposer_name} proposes to team up. Accept? (y/n)");

        loop {
            print!("{invitee_name}> ");
            if io::stdout().flush().is_err() {
                return false;
            }
            let mut answer = String::new();
            match io::stdin().read_line(&mut answer) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Answer y or n."),
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let config = GameConfig::default();
    config.validate().map_err(GameError::Config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting");

    let mut state = load_game(&args.world, config.clone())?;
    let mut engine = ActionEngine::new(config.clone(), seed);
    let mut prompt = StdinPrompt;
    MissionEngine::prime(&mut state);

    println!("=== NIGHTFELL ===");
    println!("Commands: move/m take/t drop/d chat/c attack/at inspect/i");
    println!("          recruit/r abandon/ab open/o use/u team/tm turn/tu");
    println!("          save/s load/l exit/e");

    let mut input = String::new();
    loop {
        render(&mut state);
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        let Some(command) = Command::parse(line) else {
            println!("Unknown command.");
            continue;
        };

        let actor = state.active_player_id();
        match command.code {
            CommandCode::Exit => {
                state.record_command(actor, command, true);
                println!("Goodbye.");
                break;
            }
            CommandCode::Save => {
                let ok = !command.arg0.is_empty()
                    && save_game(&state, Path::new(&command.arg0)).is_ok();
                if !ok {
                    println!("Could not save.");
                }
                state.record_command(actor, command, ok);
            }
            CommandCode::Load => {
                // A failed load keeps the current world untouched
                if command.arg0.is_empty() {
                    println!("Load needs a file name.");
                    state.record_command(actor, command, false);
                } else {
                    match load_game(Path::new(&command.arg0), config.clone()) {
                        Ok(loaded) => {
                            state = loaded;
                            let pid = state.active_player_id();
                            state.record_command(pid, command, true);
                        }
                        Err(error) => {
                            println!("Load failed: {error}");
                            state.record_command(actor, command, false);
                        }
                    }
                }
            }
            _ => {
                engine.resolve(&mut state, &command, &mut prompt);
                MissionEngine::advance(&mut state, actor);
            }
        }

        thread::sleep(Duration::from_millis(config.turn_pause_ms));
    }

    Ok(())
}

fn init_tracing(log: Option<&Path>) -> Result<()> {
    match log {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter("nightfell=debug")
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter("nightfell=info")
                .init();
        }
    }
    Ok(())
}

/// Minimal text rendering of the active player's view
fn render(state: &mut GameState) {
    let world = &state.world;
    let player = &world.players()[state.turn];
    let history = &state.histories[state.turn];

    println!();
    println!(
        "--- {} | hp {} | {} ---",
        player.name,
        player.health,
        if world.lights_on { "lights on" } else { "lights out" }
    );

    if let Some(space) = world.space(player.location) {
        println!("[{}]", space.name);
        for row in space.sprite.rows() {
            if !row.is_empty() {
                println!("  {row}");
            }
        }
        let exits: Vec<String> = Direction::ALL
            .iter()
            .filter_map(|&dir| {
                world.link_from(player.location, dir).map(|link| {
                    format!(
                        "{dir} ({}{})",
                        link.name,
                        if link.is_open { "" } else { ", closed" }
                    )
                })
            })
            .collect();
        if !exits.is_empty() {
            println!("exits: {}", exits.join(" / "));
        }
        let objects: Vec<&str> = space
            .objects
            .iter()
            .filter_map(|id| world.object(id).map(|o| o.name.as_str()))
            .collect();
        if !objects.is_empty() {
            println!("here: {}", objects.join(", "));
        }
        let characters: Vec<String> = space
            .characters
            .iter()
            .filter_map(|id| world.character(id))
            .map(|c| {
                if c.is_alive() {
                    c.name.clone()
                } else {
                    format!("{} (dead)", c.name)
                }
            })
            .collect();
        if !characters.is_empty() {
            println!("with you: {}", characters.join(", "));
        }
    }

    let pack: Vec<&str> = player
        .inventory
        .iter()
        .filter_map(|id| world.object(id).map(|o| o.name.as_str()))
        .collect();
    if pack.is_empty() {
        println!("pack (0/{}): empty", player.inventory.capacity());
    } else {
        println!(
            "pack ({}/{}): {}",
            pack.len(),
            player.inventory.capacity(),
            pack.join(", ")
        );
    }

    if history.display.show_message && !history.display.message.is_empty() {
        println!("* {}", history.display.message);
    }
    if !history.display.description.is_empty() {
        println!("~ {}", history.display.description);
    }
    if !history.display.objective.is_empty() {
        println!("objective: {}", history.display.objective);
    }

    // The message banner shows once per update
    state.histories[state.turn].display.show_message = false;
}
