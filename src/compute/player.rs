//! Sensing window and the movement-strategy interface.

use super::{Board, Color, Coordinate, Genome, OUT_OF_BOUNDS_COLOR};
use crate::schema::PlayerKind;

/// Square window of colors centered on a specimen.
///
/// Rows run top to bottom (`dy` from `+d` down to `-d`), columns left to
/// right (`dx` from `-d` to `+d`), where `d = width / 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vision {
    width: usize,
    colors: Vec<Color>,
}

impl Vision {
    /// Sense the `width x width` window around `center`.
    pub fn sense(board: &Board, center: Coordinate, width: usize) -> Self {
        let distance = (width / 2) as i32;
        let mut colors = Vec::with_capacity(width * width);
        for dy in (-distance..=distance).rev() {
            for dx in -distance..=distance {
                colors.push(board.color_at(center + Coordinate::new(dx, dy)));
            }
        }
        Self { width, colors }
    }

    /// Build from row-major colors (top row first).
    pub fn from_rows(rows: &[Vec<Color>]) -> Self {
        Self {
            width: rows.len(),
            colors: rows.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Half the window width.
    #[inline]
    pub fn distance(&self) -> i32 {
        (self.width / 2) as i32
    }

    /// Color at offset `(dx, dy)` from the center; out-of-bounds outside the window.
    pub fn color(&self, dx: i32, dy: i32) -> Color {
        let d = self.distance();
        if dx.abs() > d || dy.abs() > d {
            return OUT_OF_BOUNDS_COLOR;
        }
        let row = (d - dy) as usize;
        let column = (dx + d) as usize;
        self.colors[row * self.width + column]
    }

    /// Rows of the window, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.colors.chunks(self.width.max(1))
    }
}

/// A movement strategy under evaluation.
///
/// Implementations must be pure: the same genome and vision always produce
/// the same direction, and nothing else is touched. Each component of the
/// returned direction must be in {-1, 0, 1}.
pub trait Player: Send + Sync {
    fn take_turn(&self, genome: Genome, vision: &Vision) -> Coordinate;

    /// Display name for reports.
    fn name(&self) -> &str;
}

/// Always steps right.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardPlayer;

impl Player for ForwardPlayer {
    fn take_turn(&self, _genome: Genome, _vision: &Vision) -> Coordinate {
        Coordinate::new(1, 0)
    }

    fn name(&self) -> &str {
        "Forward"
    }
}

/// Scores each color with bits read from the genome and steps toward the
/// best-scoring neighbor among the forward and vertical ones.
#[derive(Debug, Clone, Copy)]
pub struct ColorScorePlayer {
    genome_length: u32,
}

impl ColorScorePlayer {
    const SCORE_BITS: u32 = 4;
    const CANDIDATES: [Coordinate; 5] = [
        Coordinate::new(1, 0),
        Coordinate::new(1, 1),
        Coordinate::new(1, -1),
        Coordinate::new(0, 1),
        Coordinate::new(0, -1),
    ];

    pub fn new(genome_length: u32) -> Self {
        Self {
            genome_length: genome_length.max(1),
        }
    }

    /// Score the genome assigns to `color`.
    pub fn score(&self, genome: Genome, color: Color) -> u64 {
        let Ok(color) = u32::try_from(color) else {
            return 0;
        };
        let position = (color * Self::SCORE_BITS) % self.genome_length;
        genome.bits(position, Self::SCORE_BITS, self.genome_length)
    }
}

impl Player for ColorScorePlayer {
    fn take_turn(&self, genome: Genome, vision: &Vision) -> Coordinate {
        let mut best = Coordinate::ZERO;
        let mut best_score = None;
        for direction in Self::CANDIDATES {
            let color = vision.color(direction.x, direction.y);
            if color == OUT_OF_BOUNDS_COLOR {
                continue;
            }
            // Forward moves win ties over vertical ones.
            let score = self.score(genome, color) * 2 + u64::from(direction.x == 1);
            if best_score.is_none_or(|b| score > b) {
                best = direction;
                best_score = Some(score);
            }
        }
        best
    }

    fn name(&self) -> &str {
        "ColorScore"
    }
}

/// Build the configured player.
pub fn player_for(kind: PlayerKind, genome_length: u32) -> Box<dyn Player> {
    match kind {
        PlayerKind::Forward => Box::new(ForwardPlayer),
        PlayerKind::ColorScore => Box::new(ColorScorePlayer::new(genome_length)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::board::tests::painted_board;

    #[test]
    fn test_sense_orientation() {
        // Mark the cell above-left of the center and the one right of it.
        let center = Coordinate::new(5, 5);
        let board = painted_board(
            &[],
            4,
            &[
                (center + Coordinate::new(-1, 1), 1),
                (center + Coordinate::new(1, 0), 2),
            ],
        );
        let vision = Vision::sense(&board, center, 5);

        assert_eq!(vision.width(), 5);
        assert_eq!(vision.color(-1, 1), 1);
        assert_eq!(vision.color(1, 0), 2);

        let rows: Vec<&[Color]> = vision.rows().collect();
        assert_eq!(rows.len(), 5);
        // Row 1 is dy = +1, column 1 is dx = -1.
        assert_eq!(rows[1][1], 1);
        assert_eq!(rows[2][3], 2);
    }

    #[test]
    fn test_sense_off_board() {
        let board = painted_board(&[], 4, &[]);
        let vision = Vision::sense(&board, Coordinate::new(0, 0), 5);
        assert_eq!(vision.color(-1, 0), OUT_OF_BOUNDS_COLOR);
        assert_eq!(vision.color(0, -2), OUT_OF_BOUNDS_COLOR);
        assert_eq!(vision.color(2, 2), 4);
        assert_eq!(vision.color(3, 0), OUT_OF_BOUNDS_COLOR);
    }

    #[test]
    fn test_forward_player() {
        let vision = Vision::from_rows(&[vec![0; 3], vec![0; 3], vec![0; 3]]);
        assert_eq!(
            ForwardPlayer.take_turn(Genome::new(0), &vision),
            Coordinate::new(1, 0)
        );
    }

    #[test]
    fn test_color_score_prefers_high_score() {
        let player = ColorScorePlayer::new(8);
        // Color 0 reads bits 0..4 and color 1 bits 4..8.
        let genome = Genome::new(0b0000_1111);
        assert_eq!(player.score(genome, 0), 0b1111);
        assert_eq!(player.score(genome, 1), 0);

        let vision = Vision::from_rows(&[
            vec![1, 1, 0],
            vec![1, 1, 1],
            vec![1, 1, 1],
        ]);
        assert_eq!(player.take_turn(genome, &vision), Coordinate::new(1, 1));
    }

    #[test]
    fn test_color_score_avoids_edges() {
        let player = ColorScorePlayer::new(8);
        let o = OUT_OF_BOUNDS_COLOR;
        let vision = Vision::from_rows(&[vec![o, o, o], vec![1, 1, o], vec![1, 1, o]]);
        assert_eq!(
            player.take_turn(Genome::new(0), &vision),
            Coordinate::new(0, -1)
        );
    }

    #[test]
    fn test_player_directions_are_unit_steps() {
        let player = ColorScorePlayer::new(50);
        let vision = Vision::from_rows(&[
            vec![3, 1, 4, 1, 5],
            vec![9, 2, 6, 5, 3],
            vec![5, 8, 9, 7, 9],
            vec![3, 2, 3, 8, 4],
            vec![6, 2, 6, 4, 3],
        ]);
        for raw in [0u64, 1, 12345, Genome::max_value(50)] {
            assert!(player.take_turn(Genome::new(raw), &vision).is_unit_step());
        }
    }
}
