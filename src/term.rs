use std::io::{stdout, Stdout, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use log::{debug, warn};
use thiserror::Error;

use crate::consts::{BOARD_COLS, BOARD_ROWS, UNIT_SIZE};
use crate::render::{DrawCommand, Font, Rgb};

/// Terminal columns used by the board. One column per cell.
const FRAME_COLS: u16 = BOARD_COLS as u16;

/// Terminal rows used by the board. Every character shows two cells stacked on top of each other,
/// which keeps cells roughly square.
const FRAME_ROWS: u16 = (BOARD_ROWS as u16 + 1) / 2;

/// Smallest terminal that fits the board and its border.
pub const MIN_SIZE: (u16, u16) = (FRAME_COLS + 2, FRAME_ROWS + 2);

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal is {width}x{height}, the board needs at least {min_w}x{min_h}", min_w = MIN_SIZE.0, min_h = MIN_SIZE.1)]
    TooSmall { width: u16, height: u16 },
    #[error(transparent)]
    Terminal(#[from] crossterm::ErrorKind),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TermError>;

/// A line of overlay text, already placed on the character grid.
#[derive(Clone, Debug, PartialEq, Eq)]
struct TextLine {
    col: u16,
    row: u16,
    text: &'static str,
    color: Rgb,
    bold: bool,
}

/// One rasterised screen: a colour (or nothing) per board cell, plus overlay text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    cells: Vec<Option<Rgb>>,
    text: Vec<TextLine>,
}

impl Frame {
    pub fn blank() -> Self {
        Frame { cells: vec![None; BOARD_COLS as usize * BOARD_ROWS as usize], text: vec![] }
    }

    /// Paints `commands` in order, later ones on top. Shapes are snapped to whole cells, so a
    /// circle and a square of one cell look the same here. Anything off the board is dropped.
    pub fn rasterize(commands: &[DrawCommand]) -> Self {
        let mut frame = Frame::blank();

        for command in commands {
            match *command {
                DrawCommand::Fill { at, size, color, .. } => {
                    let cells = (size / UNIT_SIZE).max(1);
                    let (left, top) = (at.x.div_euclid(UNIT_SIZE), at.y.div_euclid(UNIT_SIZE));

                    for row in top..top + cells {
                        for col in left..left + cells {
                            frame.set(col, row, color);
                        }
                    }
                }
                DrawCommand::Text { text, baseline, font, color } => {
                    let width = text.chars().count() as u16;
                    let row = (baseline / UNIT_SIZE / 2).clamp(0, FRAME_ROWS as i32 - 1) as u16;
                    frame.text.push(TextLine {
                        col: FRAME_COLS.saturating_sub(width) / 2,
                        row,
                        text,
                        color,
                        bold: font == Font::Headline,
                    });
                }
            }
        }

        frame
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<Rgb> {
        Self::index(col, row).and_then(|i| self.cells[i])
    }

    fn set(&mut self, col: i32, row: i32, color: Rgb) {
        if let Some(i) = Self::index(col, row) {
            self.cells[i] = Some(color);
        }
    }

    fn index(col: i32, row: i32) -> Option<usize> {
        if (0..BOARD_COLS).contains(&col) && (0..BOARD_ROWS).contains(&row) {
            Some((row * BOARD_COLS + col) as usize)
        } else {
            None
        }
    }

    /// The two cells one character shows: (top, bottom).
    fn pair(&self, col: u16, row: u16) -> (Option<Rgb>, Option<Rgb>) {
        let (col, row) = (col as i32, row as i32 * 2);
        (self.cell(col, row), self.cell(col, row + 1))
    }
}

pub struct TermManager {
    stdout: Stdout,
    origin: (u16, u16),
    shown: Option<Frame>,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let origin = Self::origin_for(width, height)?;
        Ok(TermManager { stdout: stdout(), origin, shown: None, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Re-centres the board after the terminal changed size, repainting everything on the next
    /// frame.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.origin = Self::origin_for(width, height)?;
        debug!("terminal resized to {}x{}", width, height);
        self.clear()
    }

    /// Draws a frame, rewriting only the characters that differ from the last one shown. A change
    /// in overlay text repaints the whole board.
    pub fn present(&mut self, commands: &[DrawCommand]) -> Result<()> {
        let frame = Frame::rasterize(commands);
        let previous = match self.shown.take() {
            Some(prev) if prev.text == frame.text => Some(prev),
            _ => None,
        };

        for row in 0..FRAME_ROWS {
            for col in 0..FRAME_COLS {
                let pair = frame.pair(col, row);
                if previous.as_ref().map_or(true, |prev| prev.pair(col, row) != pair) {
                    self.print_pair((col, row), pair)?;
                }
            }
        }

        if previous.is_none() {
            for line in &frame.text {
                self.print_text(line)?;
            }
        }

        self.flush()?;
        self.shown = Some(frame);
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn origin_for(width: u16, height: u16) -> Result<(u16, u16)> {
        if width < MIN_SIZE.0 || height < MIN_SIZE.1 {
            return Err(TermError::TooSmall { width, height });
        }

        Ok(((width - MIN_SIZE.0) / 2, (height - MIN_SIZE.1) / 2))
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        self.shown = None;
        self.draw_borders()?;
        self.flush()
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = self.origin;
        let (right, bottom) = (left + MIN_SIZE.0 - 1, top + MIN_SIZE.1 - 1);

        for x in left..=right {
            let ch = if x == left || x == right { '+' } else { '-' };
            queue!(self.stdout, cursor::MoveTo(x, top), Print(ch), cursor::MoveTo(x, bottom), Print(ch))?;
        }

        for y in top + 1..bottom {
            queue!(self.stdout, cursor::MoveTo(left, y), Print('|'), cursor::MoveTo(right, y), Print('|'))?;
        }

        Ok(())
    }

    fn print_pair(&mut self, (col, row): (u16, u16), pair: (Option<Rgb>, Option<Rgb>)) -> Result<()> {
        let (fg, bg, ch) = match pair {
            (None, None) => (Color::Reset, Color::Reset, ' '),
            (Some(top), None) => (color(top), Color::Reset, UPPER_HALF),
            (None, Some(bottom)) => (color(bottom), Color::Reset, LOWER_HALF),
            (Some(top), Some(bottom)) => (color(top), color(bottom), UPPER_HALF),
        };

        let (x, y) = self.board_to_screen(col, row);
        queue!(self.stdout, cursor::MoveTo(x, y), SetForegroundColor(fg), SetBackgroundColor(bg), Print(ch))?;
        Ok(())
    }

    fn print_text(&mut self, line: &TextLine) -> Result<()> {
        let (x, y) = self.board_to_screen(line.col, line.row);
        queue!(self.stdout, cursor::MoveTo(x, y), ResetColor, SetForegroundColor(color(line.color)))?;
        if line.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.stdout, Print(line.text), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn board_to_screen(&self, col: u16, row: u16) -> (u16, u16) {
        (self.origin.0 + 1 + col, self.origin.1 + 1 + row)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("failed to restore the terminal: {}", err);
        }
    }
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}
