//! Rendering collaborators driven by the board's changed-cell set.

use std::io::{self, Write};

use super::{Board, Coordinate};
use crate::schema::DisplayKind;

/// Receives changed cells each turn, then one `update` call.
pub trait Display {
    fn draw_cell(&mut self, coordinate: Coordinate, board: &Board);

    fn update(&mut self) -> io::Result<()>;
}

/// Draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplay;

impl Display for NoDisplay {
    fn draw_cell(&mut self, _coordinate: Coordinate, _board: &Board) {}

    fn update(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// ASCII frame renderer.
///
/// `#` wall, `x` lethal, `~` teleport, `.` plain; occupied cells show the
/// specimen count (`+` above nine). A frame is written every `interval`
/// updates.
pub struct TextDisplay<W: Write> {
    writer: W,
    width: usize,
    height: usize,
    frame: Vec<u8>,
    interval: u64,
    updates: u64,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(writer: W, width: usize, height: usize, interval: u64) -> Self {
        Self {
            writer,
            width,
            height,
            frame: vec![b' '; width * height],
            interval: interval.max(1),
            updates: 0,
        }
    }

    /// Character shown for `coordinate`.
    pub fn glyph(coordinate: Coordinate, board: &Board) -> u8 {
        let occupants = board.specimens_at(coordinate).len();
        if occupants > 9 {
            return b'+';
        }
        if occupants > 0 {
            return b'0' + occupants as u8;
        }
        let cell = board.lookup(coordinate);
        if cell.wall {
            b'#'
        } else if cell.lethal {
            b'x'
        } else if !cell.teleport.is_zero() {
            b'~'
        } else {
            b'.'
        }
    }

    /// Current frame, one line per row, top row (highest y) first.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            let row = &self.frame[y * self.width..(y + 1) * self.width];
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }

    /// Consume the display and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Display for TextDisplay<W> {
    fn draw_cell(&mut self, coordinate: Coordinate, board: &Board) {
        if board.is_out_of_bounds(coordinate) {
            return;
        }
        let index = coordinate.y as usize * self.width + coordinate.x as usize;
        if let Some(slot) = self.frame.get_mut(index) {
            *slot = Self::glyph(coordinate, board);
        }
    }

    fn update(&mut self) -> io::Result<()> {
        self.updates += 1;
        if self.updates % self.interval != 0 {
            return Ok(());
        }
        let frame = self.render();
        writeln!(self.writer, "{}", frame)?;
        self.writer.flush()
    }
}

/// Build the configured display for a `width x height` board.
pub fn display_for(kind: DisplayKind, width: usize, height: usize) -> Box<dyn Display> {
    match kind {
        DisplayKind::None => Box::new(NoDisplay),
        DisplayKind::Text { interval } => {
            Box::new(TextDisplay::new(io::stdout(), width, height, interval))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::board::tests::painted_board;
    use crate::compute::{Genome, Specimen, Trap};

    #[test]
    fn test_text_frame() {
        let mut board = painted_board(
            &[(2, Trap::Wall), (1, Trap::Mover(Coordinate::new(0, 1)))],
            4,
            &[(Coordinate::new(3, 0), 2), (Coordinate::new(5, 9), 1)],
        );
        board.add_specimen(Specimen::new(Genome::new(0), 0), Coordinate::new(0, 0));
        board.add_specimen(Specimen::new(Genome::new(1), 0), Coordinate::new(0, 0));
        board.advance_turn();

        let mut display = TextDisplay::new(Vec::new(), 10, 10, 1);
        for c in board.drain_changed_cells() {
            display.draw_cell(c, &board);
        }
        display.update().unwrap();

        let output = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], ".....~....");
        assert_eq!(lines[9], "2..#......");
    }

    #[test]
    fn test_interval_skips_frames() {
        let board = painted_board(&[], 4, &[]);
        let mut display = TextDisplay::new(Vec::new(), 10, 10, 3);
        display.draw_cell(Coordinate::new(0, 0), &board);
        display.update().unwrap();
        display.update().unwrap();
        assert!(display.writer.is_empty());
        display.update().unwrap();
        assert!(!display.writer.is_empty());
    }

    #[test]
    fn test_no_display_is_noop() {
        let board = painted_board(&[], 4, &[]);
        let mut display = NoDisplay;
        display.draw_cell(Coordinate::new(0, 0), &board);
        assert!(display.update().is_ok());
    }
}
