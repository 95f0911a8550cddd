//! The game state and the rules that move it forward.
//!
//! [`Game`] owns everything a round of snake needs: the snake, the food, whether the round is
//! still on, the random source used for food and the tick source. Ticks and key presses reach it
//! one at a time through [`Game::handle`], so tests can drive it without a timer or a terminal.

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::food::FoodPolicy;
use crate::input::Key;
use crate::snake::{Position, Snake};
use crate::ticker::Ticker;

/// Everything the game reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    Key(Key),
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The round is over, nothing moved.
    Idle,
    Moved,
    Ate,
    Crashed(Crash),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

pub struct Game<R, T> {
    snake: Snake,
    food: Position,
    running: bool,
    rng: R,
    ticker: T,
    food_policy: FoodPolicy,
}

impl<R: Rng, T: Ticker> Game<R, T> {
    /// Sets up a fresh round and starts `ticker`.
    pub fn start(rng: R, ticker: T, food_policy: FoodPolicy) -> Self {
        let mut game = Game {
            snake: Snake::new(),
            food: Position::ORIGIN,
            running: true,
            rng,
            ticker,
            food_policy,
        };

        game.place_food();
        game.ticker.start();
        info!("game started, food policy {:?}", food_policy);
        game
    }

    /// Same reset as [`Game::start`], but resumes the existing ticker.
    pub fn restart(&mut self) {
        self.snake.reset();
        self.running = true;
        self.place_food();
        self.ticker.restart();
        info!("game restarted");
    }

    /// Feeds one event to the game. Returns whether the screen should be redrawn.
    pub fn handle(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Tick => {
                self.tick();
                true
            }
            GameEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Advances the round by one step: shift, move the head, eat, then check for crashes.
    pub fn tick(&mut self) -> Step {
        if !self.running {
            return Step::Idle;
        }

        let head = self.snake.move_step();
        trace!("head at ({}, {})", head.x, head.y);

        let mut step = Step::Moved;
        if head == self.food {
            self.snake.grow();
            self.place_food();
            step = Step::Ate;
        }

        let crash = if !head.is_on_board() {
            Some(Crash::Wall)
        } else if self.snake.bites_itself() {
            Some(Crash::Body)
        } else {
            None
        };

        if let Some(crash) = crash {
            self.running = false;
            self.ticker.stop();
            info!("game over: hit {:?} at length {}", crash, self.snake.len());
            step = Step::Crashed(crash);
        }

        step
    }

    /// Applies a key press. Turns wait for the next tick; restart only works once the round is
    /// over. Returns whether the screen should be redrawn.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if let Some(direction) = key.direction() {
            if !self.snake.set_direction(direction) {
                trace!("ignored turn to {:?} while heading {:?}", direction, self.snake.direction());
            }
            return false;
        }

        match key {
            Key::Restart if !self.running => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    /// Puts new food down, overwriting the old one.
    fn place_food(&mut self) {
        match self.food_policy.place(&mut self.rng, self.snake.segments()) {
            Some(food) => {
                debug!("food placed at ({}, {})", food.x, food.y);
                self.food = food;
            }
            None => warn!("no free cell for food, keeping it at ({}, {})", self.food.x, self.food.y),
        }
    }
}

impl<R, T> Game<R, T> {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_COLS, INITIAL_SNAKE_LENGTH, UNIT_SIZE};
    use crate::snake::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct ManualTicker {
        active: bool,
        starts: usize,
        stops: usize,
        restarts: usize,
    }

    impl Ticker for ManualTicker {
        fn start(&mut self) {
            self.active = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.active = false;
            self.stops += 1;
        }

        fn restart(&mut self) {
            self.active = true;
            self.restarts += 1;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    type TestGame = Game<StdRng, ManualTicker>;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn new_game() -> TestGame {
        Game::start(StdRng::seed_from_u64(42), ManualTicker::default(), FoodPolicy::Anywhere)
    }

    fn game_with(segments: &[Position], direction: Direction, food: Position) -> TestGame {
        let mut game = new_game();
        game.snake = Snake::from_segments(segments, direction);
        game.food = food;
        game
    }

    fn assert_on_grid(pos: Position) {
        assert!(pos.is_on_board());
        assert_eq!(pos.x % UNIT_SIZE, 0);
        assert_eq!(pos.y % UNIT_SIZE, 0);
    }

    #[test]
    fn start_sets_up_a_round() {
        let game = new_game();
        assert!(game.is_running());
        assert_eq!(game.snake().len(), INITIAL_SNAKE_LENGTH);
        assert!(game.snake().segments().iter().all(|&pos| pos == Position::ORIGIN));
        assert_eq!(game.snake().direction(), Direction::Right);
        assert_on_grid(game.food());
        assert!(game.ticker().is_active());
        assert_eq!(game.ticker().starts, 1);
    }

    #[test]
    fn tick_moves_the_head_in_the_committed_direction() {
        let body = [p(200, 200), p(180, 200), p(160, 200)];
        let mut game = game_with(&body, Direction::Right, p(0, 0));

        assert_eq!(game.tick(), Step::Moved);
        assert_eq!(game.snake().segments(), &[p(220, 200), p(200, 200), p(180, 200)]);

        game.handle_key(Key::Down);
        assert_eq!(game.tick(), Step::Moved);
        assert_eq!(game.snake().head(), p(220, 220));
    }

    #[test]
    fn eating_grows_and_replaces_the_food() {
        let body = [p(100, 100), p(80, 100), p(60, 100), p(40, 100), p(20, 100)];
        let mut game = game_with(&body, Direction::Right, p(120, 100));

        assert_eq!(game.tick(), Step::Ate);
        assert_eq!(game.snake().head(), p(120, 100));
        assert_eq!(game.snake().len(), 6);
        assert_eq!(game.snake().segments()[5], p(20, 100));
        assert!(game.is_running());
        assert_on_grid(game.food());
    }

    #[test]
    fn leaving_the_board_ends_the_round() {
        let mut game = game_with(&[p(0, 0), p(0, 0), p(0, 0), p(0, 0), p(0, 0)], Direction::Left, p(400, 400));

        assert_eq!(game.tick(), Step::Crashed(Crash::Wall));
        assert_eq!(game.snake().head(), p(-UNIT_SIZE, 0));
        assert!(!game.is_running());
        assert!(!game.ticker().is_active());
        assert_eq!(game.ticker().stops, 1);
    }

    #[test]
    fn runs_into_the_right_wall_after_crossing_the_board() {
        let mut game = new_game();
        for _ in 0..BOARD_COLS - 1 {
            assert!(matches!(game.tick(), Step::Moved | Step::Ate));
        }
        assert_eq!(game.snake().head(), p((BOARD_COLS - 1) * UNIT_SIZE, 0));
        assert_eq!(game.tick(), Step::Crashed(Crash::Wall));
    }

    #[test]
    fn short_snake_looping_into_its_tail_cell_crashes() {
        // Length 4 in a square: the head moves into the cell the tail leaves.
        let body = [p(100, 120), p(100, 100), p(120, 100), p(120, 120)];
        let mut game = game_with(&body, Direction::Down, p(400, 400));

        game.handle_key(Key::Right);
        assert_eq!(game.tick(), Step::Crashed(Crash::Body));
        assert_eq!(game.snake().head(), p(120, 120));
        assert!(!game.is_running());
        assert!(!game.ticker().is_active());
    }

    #[test]
    fn long_snake_turning_into_itself_crashes() {
        let body = [p(100, 100), p(100, 120), p(120, 120), p(120, 100), p(120, 80)];
        let mut game = game_with(&body, Direction::Up, p(400, 400));

        game.handle_key(Key::Right);
        assert_eq!(game.tick(), Step::Crashed(Crash::Body));
    }

    #[test]
    fn ticks_after_game_over_change_nothing() {
        let mut game = game_with(&[p(0, 0), p(20, 0)], Direction::Up, p(400, 400));
        assert_eq!(game.tick(), Step::Crashed(Crash::Wall));

        let segments = game.snake().segments().to_vec();
        let food = game.food();
        for _ in 0..5 {
            assert_eq!(game.tick(), Step::Idle);
            assert!(game.handle(GameEvent::Tick));
        }

        assert_eq!(game.snake().segments(), segments.as_slice());
        assert_eq!(game.food(), food);
        assert!(!game.is_running());
        assert_eq!(game.ticker().stops, 1);
    }

    #[test]
    fn reversal_keys_are_ignored() {
        for (current, attempted) in [
            (Direction::Left, Key::Right),
            (Direction::Right, Key::Left),
            (Direction::Up, Key::Down),
            (Direction::Down, Key::Up),
        ] {
            let mut game = game_with(&[p(200, 200)], current, p(0, 0));
            assert!(!game.handle_key(attempted));
            assert_eq!(game.snake().direction(), current);
        }
    }

    #[test]
    fn last_accepted_turn_in_a_tick_wins() {
        let mut game = game_with(&[p(200, 200), p(180, 200)], Direction::Right, p(0, 0));

        game.handle_key(Key::Up);
        game.handle_key(Key::Down);
        assert_eq!(game.snake().direction(), Direction::Up);

        game.tick();
        assert_eq!(game.snake().head(), p(200, 180));
    }

    #[test]
    fn restart_only_after_game_over() {
        let mut game = new_game();
        assert!(!game.handle(GameEvent::Key(Key::Restart)));
        game.tick();
        assert_eq!(game.snake().head(), p(UNIT_SIZE, 0));
        assert_eq!(game.ticker().restarts, 0);
    }

    #[test]
    fn restart_resets_the_round() {
        let mut game = game_with(&[p(300, 0), p(300, 20), p(300, 40)], Direction::Up, p(400, 400));
        game.tick();
        assert!(!game.is_running());

        assert!(game.handle(GameEvent::Key(Key::Restart)));

        assert!(game.is_running());
        assert_eq!(game.snake().len(), INITIAL_SNAKE_LENGTH);
        assert!(game.snake().segments().iter().all(|&pos| pos == Position::ORIGIN));
        assert_eq!(game.snake().direction(), Direction::Right);
        assert_on_grid(game.food());
        assert!(game.ticker().is_active());
        assert_eq!(game.ticker().starts, 1);
        assert_eq!(game.ticker().restarts, 1);

        assert!(matches!(game.tick(), Step::Moved | Step::Ate));
        assert_eq!(game.snake().head(), p(UNIT_SIZE, 0));
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut game = new_game();
        assert!(!game.handle(GameEvent::Key(Key::Other)));
        assert_eq!(game.snake().direction(), Direction::Right);
        assert!(game.is_running());
    }

    #[test]
    fn fair_food_never_lands_on_the_snake() {
        let mut game = Game::start(StdRng::seed_from_u64(9), ManualTicker::default(), FoodPolicy::AvoidSnake);
        let body: Vec<Position> = (0..BOARD_COLS).map(|col| p(col * UNIT_SIZE, 0)).rev().collect();
        game.snake = Snake::from_segments(&body, Direction::Down);

        for _ in 0..100 {
            game.place_food();
            assert!(!game.snake().segments().contains(&game.food()));
            assert_on_grid(game.food());
        }
    }
}
