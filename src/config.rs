use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::food::FoodPolicy;

/// Snake on a 40x40 board. Arrow keys (or WASD) to steer, R to restart after a crash, Esc or
/// Ctrl+C to quit.
#[derive(Debug, Parser)]
#[command(name = "gridsnake", version)]
pub struct Options {
    /// Seed for food placement, for replaying the same sequence of food.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Never place food underneath the snake.
    #[arg(long)]
    pub fair_food: bool,

    /// Write a log to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Options {
    pub fn food_policy(&self) -> FoodPolicy {
        if self.fair_food {
            FoodPolicy::AvoidSnake
        } else {
            FoodPolicy::Anywhere
        }
    }
}
