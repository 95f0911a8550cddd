//! Turns the game state into a list of things to draw. Nothing here touches the terminal.

use crate::consts::{PANEL_HEIGHT, UNIT_SIZE};
use crate::game::Game;
use crate::snake::Position;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const FOOD_COLOR: Rgb = Rgb(255, 0, 0);
pub const HEAD_COLOR: Rgb = Rgb(0, 255, 0);
pub const BODY_COLOR: Rgb = Rgb(45, 180, 0);
pub const TEXT_COLOR: Rgb = Rgb(255, 0, 0);

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RESTART_TEXT: &str = "Press 'R' to Restart";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Font {
    /// Large and bold.
    Headline,
    Caption,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    /// A filled shape covering the cell whose top-left corner is `at`.
    Fill { shape: Shape, at: Position, size: i32, color: Rgb },
    /// A line of text centered horizontally, with its baseline at `baseline`.
    Text { text: &'static str, baseline: i32, font: Font, color: Rgb },
}

/// Describes the current frame: the food and the snake while playing, the game over message
/// once the round has ended.
pub fn draw<R, T>(game: &Game<R, T>) -> Vec<DrawCommand> {
    if !game.is_running() {
        return game_over();
    }

    let segments = game.snake().segments();
    let mut commands = Vec::with_capacity(segments.len() + 1);

    commands.push(DrawCommand::Fill {
        shape: Shape::Circle,
        at: game.food(),
        size: UNIT_SIZE,
        color: FOOD_COLOR,
    });

    for (i, &at) in segments.iter().enumerate() {
        let color = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
        commands.push(DrawCommand::Fill { shape: Shape::Square, at, size: UNIT_SIZE, color });
    }

    commands
}

fn game_over() -> Vec<DrawCommand> {
    vec![
        DrawCommand::Text {
            text: GAME_OVER_TEXT,
            baseline: PANEL_HEIGHT / 2,
            font: Font::Headline,
            color: TEXT_COLOR,
        },
        DrawCommand::Text {
            text: RESTART_TEXT,
            baseline: PANEL_HEIGHT / 2 + 50,
            font: Font::Caption,
            color: TEXT_COLOR,
        },
    ]
}
