//! `pandemic`: play the game in a terminal or watch the agent play it.
//!
//! Usage:
//!   pandemic                          - Interactive game, two players
//!   pandemic --players 4 --name Ana   - Name seats in order
//!   pandemic --autoplay --seed 7      - Agent plays every seat
//!   pandemic --map cities.txt         - Use a custom map
//!
//! Set `RUST_LOG=pandemic_ai=debug` to see outbreaks and agent rankings.

mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pandemic_ai::agent::{Agent, AgentConfig};
use pandemic_ai::board::{load_map, Topology};
use pandemic_ai::core::GameConfig;
use pandemic_ai::game::{GameState, PlayerSpec};

use crate::console::Console;

#[derive(Parser)]
#[command(name = "pandemic")]
#[command(about = "Cooperative disease-containment game with a lookahead advisor")]
#[command(version)]
struct Args {
    /// Map file (cities, `--`, edges); defaults to the built-in world map
    #[arg(long)]
    map: Option<PathBuf>,

    /// Seed for every shuffle; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of players (2 to 4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Player names, in seat order
    #[arg(long = "name")]
    names: Vec<String>,

    /// Epidemic cards in the player deck
    #[arg(long, default_value_t = 5)]
    epidemics: usize,

    /// Agent search depth (at most the actions left in a turn)
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Let the agent play every seat
    #[arg(long)]
    autoplay: bool,

    /// Stop autoplay after this many turns
    #[arg(long)]
    max_turns: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let topology = match &args.map {
        Some(path) => load_map(path).with_context(|| format!("loading map {}", path.display()))?,
        None => Topology::standard().context("loading the built-in map")?,
    };

    let seed = args.seed.unwrap_or_else(clock_seed);
    let roster: Vec<PlayerSpec> = PlayerSpec::roster(args.players)
        .into_iter()
        .enumerate()
        .map(|(i, spec)| match args.names.get(i) {
            Some(name) => spec.with_name(name.clone()),
            None => spec,
        })
        .collect();
    let config = GameConfig::default().with_epidemic_cards(args.epidemics);

    let state = GameState::new(Arc::new(topology), roster, config, seed).context("setting up the game")?;
    info!(seed, players = args.players, "Starting game");
    println!("Seed {}", seed);

    let agent = Agent::new(AgentConfig::default().with_max_depth(args.depth));
    let mut console = Console::new(state, agent);
    if args.autoplay {
        console.autoplay(args.max_turns)
    } else {
        console.run()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
