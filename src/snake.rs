use crate::consts::{GAME_UNITS, INITIAL_SNAKE_LENGTH, PANEL_HEIGHT, PANEL_WIDTH, UNIT_SIZE};
use Direction::*;

/// A grid-aligned point on the board, in pixel units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The position one cell away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position { x: self.x + dx * UNIT_SIZE, y: self.y + dy * UNIT_SIZE }
    }

    pub fn is_on_board(self) -> bool {
        (0..PANEL_WIDTH).contains(&self.x) && (0..PANEL_HEIGHT).contains(&self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake's body lives in a buffer allocated once for the longest possible snake, plus one
/// guard slot. Index 0 is the head; `body[..len]` is the active snake, anything past it is stale.
///
/// Both the shift and the self-collision scan run over `1..=len`, so they touch the guard slot at
/// `body[len]`. After a shift that slot holds the cell the tail just left, which is exactly where
/// the new tail ends up if the snake eats on this tick.
pub struct Snake {
    body: Box<[Position]>,
    len: usize,
    direction: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: vec![Position::ORIGIN; GAME_UNITS + 1].into_boxed_slice(),
            len: INITIAL_SNAKE_LENGTH,
            direction: Right,
        }
    }

    /// Back to the starting snake: initial length, coiled up at the origin, facing right.
    pub fn reset(&mut self) {
        self.body.fill(Position::ORIGIN);
        self.len = INITIAL_SNAKE_LENGTH;
        self.direction = Right;
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Active segments, head first.
    pub fn segments(&self) -> &[Position] {
        &self.body[..self.len]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns the snake unless `new_direction` would reverse it onto itself. Returns whether the
    /// turn was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => false,
            _ => {
                self.direction = new_direction;
                true
            }
        }
    }

    /// Shifts every segment back by one (including into the guard slot) and moves the head one
    /// cell in the current direction. Returns the new head.
    pub fn move_step(&mut self) -> Position {
        for i in (1..=self.len).rev() {
            self.body[i] = self.body[i - 1];
        }

        self.body[0] = self.body[0].step(self.direction);
        self.body[0]
    }

    /// Makes the guard slot part of the snake. Saturates at the board size, so the guard slot
    /// always exists.
    pub fn grow(&mut self) {
        if self.len < GAME_UNITS {
            self.len += 1;
        }
    }

    /// Whether the head shares a cell with any other segment, guard slot included.
    pub fn bites_itself(&self) -> bool {
        self.body[1..=self.len].contains(&self.head())
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Position], direction: Direction) -> Self {
        let mut snake = Snake::new();
        snake.body[..segments.len()].copy_from_slice(segments);
        snake.len = segments.len();
        snake.direction = direction;
        snake
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new()
    }
}
