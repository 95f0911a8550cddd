use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;
use rand::Rng;

use crate::game::{Game, GameEvent};
use crate::input::Command;
use crate::render;
use crate::term::TermManager;
use crate::ticker::IntervalTicker;

/// How long to wait for a key while the ticker is stopped (after a crash).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Runs the game until the player quits.
///
/// Keys and ticks are handled one at a time from this loop: it waits for a key until the next
/// tick is due, hands whatever arrived to the game, then fires the tick if its time has come.
pub fn run<R: Rng>(game: &mut Game<R, IntervalTicker>, term: &mut TermManager) -> Result<()> {
    term.present(&render::draw(game))?;

    loop {
        let timeout = game.ticker().time_until_due(Instant::now()).unwrap_or(IDLE_POLL);
        let mut redraw = false;

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(ev) => match Command::from(ev) {
                    Command::Quit => {
                        info!("quit at length {}", game.snake().len());
                        return Ok(());
                    }
                    Command::Game(key) => redraw |= game.handle(GameEvent::Key(key)),
                },
                Event::Resize(width, height) => {
                    term.resize(width, height)?;
                    redraw = true;
                }
                _ => {}
            }
        }

        if game.ticker_mut().fire(Instant::now()) {
            redraw |= game.handle(GameEvent::Tick);
        }

        if redraw {
            term.present(&render::draw(game))?;
        }
    }
}
