use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use snekfolio::terminal::{TerminalGuard, TerminalInput, TerminalRenderer};
use snekfolio::{Difficulty, FileStore, GameConfig, GameEngine, Runner};

#[derive(Debug, Parser)]
#[command(version, about = "Play snake in the terminal")]
struct Args {
    /// Field width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Field height in pixels, info bar included.
    #[arg(long, default_value_t = 440)]
    height: u32,
    /// Info bar height in pixels.
    #[arg(long, default_value_t = 40)]
    hud_height: u32,
    /// Pixels per grid cell.
    #[arg(long, default_value_t = 20)]
    cell_size: u32,
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,
    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Where to keep the high score.
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    #[arg(long, default_value = "snekfolio.log")]
    log_file: PathBuf,
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            hud_height: self.hud_height,
            cell_size: self.cell_size,
            difficulty: self.difficulty,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal is in raw mode while playing, so logs go to a file.
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, Config::default(), log_file).context("logger already set")?;
    info!("starting snekfolio");

    let store = match &args.high_score_file {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location().context("no home directory for the high score")?,
    };
    info!("high score kept in {}", store.path().display());

    let engine = GameEngine::new(&args.game_config(), store).context("invalid game settings")?;

    let final_score = {
        let _guard = TerminalGuard::enter()?;
        let mut runner = Runner::new(engine, TerminalRenderer::new(), TerminalInput);
        runner.run()?;
        let (engine, _, _) = runner.into_parts();
        (engine.score(), engine.high_score())
    };

    println!("Final score: {}  High score: {}", final_score.0, final_score.1);
    Ok(())
}
