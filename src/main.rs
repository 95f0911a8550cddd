mod app;
mod config;
mod consts;
mod food;
mod game;
mod input;
mod render;
mod snake;
mod term;
mod ticker;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};

use crate::config::Options;
use crate::consts::TICK_DELAY;
use crate::game::Game;
use crate::term::TermManager;
use crate::ticker::IntervalTicker;

fn main() -> Result<()> {
    let options = Options::parse();
    init_logging(&options)?;

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TermManager::new().context("cannot start the game in this terminal")?;
    term.setup().context("failed to set up the terminal")?;

    let mut game = Game::start(rng, IntervalTicker::new(TICK_DELAY), options.food_policy());
    let result = app::run(&mut game, &mut term);

    // The game loop owns the screen until here, so errors are only shown once it is restored.
    term.restore().context("failed to restore the terminal")?;
    result
}

fn init_logging(options: &Options) -> Result<()> {
    if let Some(path) = &options.log_file {
        let file = File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
        WriteLogger::init(options.log_level, Config::default(), file).context("failed to set up logging")?;
    }

    Ok(())
}
