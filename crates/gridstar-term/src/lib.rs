//! Terminal rendering for gridstar.
//!
//! Each [`CellState`] maps to one glyph through a [`GlyphSet`] table and,
//! when colour is enabled, to one foreground colour. Grids are printed
//! row-major, one row per line.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color as CtColor, Print, ResetColor, SetForegroundColor},
};

use gridstar_core::{CellState, Grid};

/// Glyph table indexed by [`CellState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: [&'static str; 6],
    separator: &'static str,
}

impl GlyphSet {
    /// Pictographs: mountain, traffic light, chequered flag and car, with a
    /// `0` filler for every other cell.
    pub const EMOJI: GlyphSet = GlyphSet {
        // Empty, Obstacle, Visited, Path, Start, Goal
        glyphs: ["0 ", "⛰️", "0 ", "🚗", "🚦", "🏁"],
        separator: " ",
    };

    /// Plain ASCII that also shows visited cells.
    pub const ASCII: GlyphSet = GlyphSet {
        glyphs: [".", "#", "o", "*", "S", "G"],
        separator: " ",
    };

    /// Glyph for `state`.
    #[inline]
    pub fn glyph(&self, state: CellState) -> &'static str {
        self.glyphs[state as usize]
    }

    #[inline]
    pub fn separator(&self) -> &'static str {
        self.separator
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Foreground colour for a cell state.
fn state_color(state: CellState) -> CtColor {
    match state {
        CellState::Empty => CtColor::Reset,
        CellState::Obstacle => CtColor::DarkGrey,
        CellState::Visited => CtColor::DarkYellow,
        CellState::Path => CtColor::Green,
        CellState::Start => CtColor::Cyan,
        CellState::Goal => CtColor::Red,
    }
}

/// Render `grid` to a plain string, one line per row.
pub fn render_to_string(grid: &Grid, glyphs: &GlyphSet) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        for (i, &c) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(glyphs.separator());
            }
            out.push_str(glyphs.glyph(c));
        }
        out.push('\n');
    }
    out
}

/// Writes grids to a terminal, optionally coloured.
pub struct TermRenderer {
    glyphs: GlyphSet,
    color: bool,
}

impl TermRenderer {
    /// Create a new renderer with colour enabled.
    pub fn new(glyphs: GlyphSet) -> Self {
        Self {
            glyphs,
            color: true,
        }
    }

    /// Configure whether colour escape sequences are emitted.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Write `grid` to `w` and flush.
    pub fn draw<W: Write>(&self, w: &mut W, grid: &Grid) -> io::Result<()> {
        if !self.color {
            w.write_all(render_to_string(grid, &self.glyphs).as_bytes())?;
            return w.flush();
        }

        for row in grid.rows() {
            for (i, &c) in row.iter().enumerate() {
                if i > 0 {
                    queue!(w, Print(self.glyphs.separator()))?;
                }
                queue!(
                    w,
                    SetForegroundColor(state_color(c)),
                    Print(self.glyphs.glyph(c)),
                    ResetColor
                )?;
            }
            queue!(w, Print("\n"))?;
        }
        w.flush()
    }
}
