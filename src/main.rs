//! Blackbox entry point
//!
//! Starts a round, fires the requested rays, and optionally scores guesses.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use blackbox::render::{json_view, log_line, render_board};
use blackbox::sim::ray_count;
use blackbox::{GameState, Settings};

#[derive(Debug, Parser)]
#[command(name = "blackbox", about = "Fire rays into a hidden box of atoms")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for atom placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of hidden atoms
    #[arg(long)]
    atoms: Option<usize>,

    /// Ray ids to fire, comma separated
    #[arg(long, value_delimiter = ',')]
    fire: Vec<u32>,

    /// Fire every unused ray
    #[arg(long)]
    all: bool,

    /// Atom guess as x,y (repeatable); submitting needs one per atom
    #[arg(long, value_parser = parse_cell)]
    guess: Vec<(i32, i32)>,

    /// Print the final state as JSON instead of text (atoms only after guessing)
    #[arg(long)]
    json: bool,
}

fn parse_cell(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(atoms) = cli.atoms {
        settings.atom_count = atoms;
    }
    settings.validate()?;

    let mut state = GameState::new(settings)?;
    state.start()?;
    log::info!("Blackbox starting (seed {})", state.rng_state.seed);

    let mut rays = cli.fire.clone();
    if cli.all {
        rays.extend(1..=ray_count(state.board.size()));
    }
    for id in rays {
        if cli.all && state.ray_used(id) {
            continue;
        }
        state.fire_ray(id)?;
    }

    if !cli.guess.is_empty() {
        for &(x, y) in &cli.guess {
            if !state.toggle_guess(x, y)? {
                bail!("cell ({x}, {y}) was guessed twice");
            }
        }
        state.submit()?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_view(&state))?);
        return Ok(());
    }

    for ray in &state.rays {
        println!("{}", log_line(ray));
    }
    println!();
    print!("{}", render_board(&state));
    if let Some(score) = state.score {
        println!();
        println!(
            "Score: {} ({} of {} atoms found, lower is better)",
            score.total,
            score.correct_guesses,
            state.settings.atom_count
        );
    }
    Ok(())
}
