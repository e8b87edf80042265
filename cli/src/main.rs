use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tilepop_core::{Coord2, GameStatus, MoveResult, PlayEngine, Snapshot, TileGenerator};
use tracing_subscriber::filter::LevelFilter;

use crate::config::load_config;
use crate::policy::Policy;
use crate::session::{play_game, simulate};

mod config;
mod policy;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a single game, printing the board after every move
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Print a JSON snapshot per move instead of the board
        #[arg(long)]
        json: bool,
    },
    /// Play many seeded games and report aggregate results
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// How many games to play
        #[arg(short, long, default_value_t = 100)]
        games: u32,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GameArgs {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with board size, kinds, target score and move limit
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How the next click is chosen
    #[arg(short, long, value_enum, default_value_t)]
    policy: Policy,
}

impl GameArgs {
    fn seed(&self) -> u64 {
        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("seed: {}", seed);
        seed
    }
}

fn init_logging(verbose: &Verbosity<InfoLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbose);

    match cli.command {
        Command::Play { game, json } => run_play(&game, json),
        Command::Simulate { game, games, json } => run_simulate(&game, games, json),
    }
}

fn run_play(args: &GameArgs, json: bool) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed();
    let mut engine = PlayEngine::seeded(config, seed);
    let mut out = io::stdout().lock();

    if json {
        writeln!(out, "{}", serde_json::to_string(&Snapshot::from_engine(&engine))?)?;
    } else {
        writeln!(out, "{}\n", engine.grid())?;
    }

    let summary = play_game(&mut engine, seed, args.policy, |engine, origin, result| {
        if json {
            writeln!(out, "{}", serde_json::to_string(&Snapshot::from_engine(engine))?)?;
        } else {
            print_move(&mut out, engine, origin, result)?;
        }
        Ok(())
    })?;

    if !json {
        let verdict = match summary.status {
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::InProgress => "stuck",
        };
        writeln!(
            out,
            "Game {} with score {} after {} moves",
            verdict, summary.score, summary.moves_used
        )?;
    }
    Ok(())
}

fn print_move<G: TileGenerator>(
    out: &mut impl Write,
    engine: &PlayEngine<G>,
    origin: Coord2,
    result: &MoveResult,
) -> Result<()> {
    writeln!(
        out,
        "Move {}: cleared {} tiles at ({}, {}), score {}/{}, {} moves left",
        result.state.moves_used,
        result.cleared.len(),
        origin.0,
        origin.1,
        result.state.score,
        engine.config().target_score,
        engine.moves_left()
    )?;
    writeln!(out, "{}\n", engine.grid())?;
    Ok(())
}

fn run_simulate(args: &GameArgs, games: u32, json: bool) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed();
    let stats = simulate(config, seed, games, args.policy)?;

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        writeln!(out, "{}", stats)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepop_core::{GameConfig, Grid, ScriptedTileGenerator};

    #[test]
    fn move_line_names_the_clicked_tile() {
        let grid = Grid::from_rows(&["BAA", "BBA"]).unwrap();
        let config = GameConfig::new((3, 2), 2, 500, 10);
        let generator = ScriptedTileGenerator::from_indices(&[0, 1]);
        let mut engine = PlayEngine::with_grid(config, grid, generator).unwrap();
        let mut out = Vec::new();

        let result = engine.apply_move((2, 1)).unwrap();
        print_move(&mut out, &engine, (2, 1), &result).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Move 1: cleared 3 tiles at (2, 1), score 30/500"));
    }
}
