use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::consts::{BOARD_COLS, BOARD_ROWS, UNIT_SIZE};
use crate::snake::Position;

/// How a new piece of food picks its cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodPolicy {
    /// Any cell on the board, snake or not. Food can end up hidden under the body.
    Anywhere,
    /// Only cells the snake does not cover.
    AvoidSnake,
}

impl FoodPolicy {
    /// Picks the next food cell. `None` means there is nowhere left to put it, which can only
    /// happen with [`FoodPolicy::AvoidSnake`].
    pub fn place<R: Rng>(self, rng: &mut R, snake: &[Position]) -> Option<Position> {
        match self {
            FoodPolicy::Anywhere => Some(place_food(rng)),
            FoodPolicy::AvoidSnake => place_food_avoiding(rng, snake),
        }
    }
}

/// Two independent uniform draws, one per axis, scaled up to the cell size.
pub fn place_food<R: Rng>(rng: &mut R) -> Position {
    let x = rng.gen_range(0..BOARD_COLS) * UNIT_SIZE;
    let y = rng.gen_range(0..BOARD_ROWS) * UNIT_SIZE;
    Position::new(x, y)
}

fn place_food_avoiding<R: Rng>(rng: &mut R, snake: &[Position]) -> Option<Position> {
    let occupied: HashSet<Position> = snake.iter().copied().collect();

    let choices: Vec<Position> = (0..BOARD_ROWS)
        .flat_map(|row| (0..BOARD_COLS).map(move |col| Position::new(col * UNIT_SIZE, row * UNIT_SIZE)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    choices.choose(rng).copied()
}
