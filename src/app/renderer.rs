use std::{fmt, io::Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{maze::Position, session::MazeSession};

/// What a single maze cell looks like on screen, after overlays are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    /// Visited by the agent
    Trace,
    /// Part of the last route found
    Route,
    Agent,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Open => "  ".with(Color::Reset),
            Tile::Trace => "* ".with(Color::Red),
            Tile::Route => "🟪".with(Color::Magenta),
            Tile::Agent => "🔵".with(Color::Blue),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Compute the tile of every cell, row-major.
/// Layering from bottom to top: maze cell, trace, route (if shown), agent.
pub fn compose_tiles(session: &MazeSession, show_route: bool) -> Vec<Tile> {
    let grid = session.grid();
    let mut tiles = grid
        .cells()
        .iter()
        .map(|cell| if cell.is_path() { Tile::Open } else { Tile::Wall })
        .collect::<Vec<_>>();
    let index = |(x, y): Position| y as usize * grid.width() as usize + x as usize;

    for &coord in session.trace() {
        tiles[index(coord)] = Tile::Trace;
    }
    if show_route {
        for &coord in session.shortest_path() {
            tiles[index(coord)] = Tile::Route;
        }
    }
    tiles[index(session.agent())] = Tile::Agent;
    tiles
}

/// Draws a session to the terminal, rewriting only the tiles that changed since
/// the previous frame.
#[derive(Default)]
pub struct Renderer {
    last_frame: Option<Vec<Tile>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }

    /// Check if the terminal can hold a `width` x `height` maze plus the status line.
    pub fn fits_terminal(width: u16, height: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(term_width >= width.saturating_mul(Tile::WIDTH) && term_height > height)
    }

    /// Queue the tiles that differ from the previous frame and flush.
    /// Returns the number of tiles written.
    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        session: &MazeSession,
        show_route: bool,
    ) -> std::io::Result<usize> {
        let width = session.grid().width();
        let tiles = compose_tiles(session, show_route);

        if self.last_frame.is_none() {
            queue!(out, terminal::Clear(ClearType::All))?;
        }

        let mut written = 0;
        for (i, tile) in tiles.iter().enumerate() {
            let unchanged = self
                .last_frame
                .as_ref()
                .is_some_and(|last| last.get(i) == Some(tile));
            if unchanged {
                continue;
            }
            let (x, y) = ((i % width as usize) as u16, (i / width as usize) as u16);
            // Move the cursor to the tile and print it
            queue!(out, cursor::MoveTo(x * Tile::WIDTH, y), style::Print(tile))?;
            written += 1;
        }
        out.flush()?;

        self.last_frame = Some(tiles);
        Ok(written)
    }
}

/// Write a single status line at `row`, clearing what was there before.
/// The text is cut to the terminal width so it never wraps into the maze.
pub fn log_terminal<W: Write>(
    out: &mut W,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let max_width = terminal::size().map_or(usize::MAX, |(w, _)| w as usize);
    let (text, _) = text.unicode_truncate(max_width);
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine),
        style::PrintStyledContent(text.with(color).attribute(Attribute::Bold))
    )?;
    out.flush()
}
