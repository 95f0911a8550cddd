//! Fixed board geometry and timing. None of these are configurable at runtime.

use std::time::Duration;

/// Board width, in pixel units.
pub const PANEL_WIDTH: i32 = 800;

/// Board height, in pixel units.
pub const PANEL_HEIGHT: i32 = 800;

/// Side length of one grid cell. Every snake segment and the food are one cell.
pub const UNIT_SIZE: i32 = 20;

pub const BOARD_COLS: i32 = PANEL_WIDTH / UNIT_SIZE;
pub const BOARD_ROWS: i32 = PANEL_HEIGHT / UNIT_SIZE;

/// Number of cells on the board, which is also the longest the snake can get.
pub const GAME_UNITS: usize = (BOARD_COLS * BOARD_ROWS) as usize;

/// Time between two snake movements.
pub const TICK_DELAY: Duration = Duration::from_millis(100);

pub const INITIAL_SNAKE_LENGTH: usize = 5;
