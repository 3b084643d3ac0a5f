//! Board grid, trap effects and the double-buffered specimen population.

use std::collections::{BTreeMap, BTreeSet};

use super::{Coordinate, GameRng, Specimen, Trap, TrapTable, assign_traps};
use crate::schema::BoardConfig;

/// Palette index of a cell.
pub type Color = i32;

/// Color reported for every coordinate outside the grid.
pub const OUT_OF_BOUNDS_COLOR: Color = -1;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    /// Entering this cell destroys the specimen.
    pub lethal: bool,
    /// Moves into this cell are rejected.
    pub wall: bool,
    /// Displacement applied to whoever ends a move here.
    pub teleport: Coordinate,
}

impl Cell {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            lethal: false,
            wall: false,
            teleport: Coordinate::ZERO,
        }
    }

    /// The shared cell standing in for everything outside the grid.
    pub fn out_of_bounds() -> Self {
        Self {
            lethal: true,
            ..Self::new(OUT_OF_BOUNDS_COLOR)
        }
    }
}

/// Specimens keyed by cell; several may share a cell.
///
/// Ordered so every walk over the population is reproducible.
pub type Population = BTreeMap<Coordinate, Vec<Specimen>>;

/// A generated board together with the specimens racing on it.
///
/// Cells are stored row-major: `cells[y * width + x]`.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Cell>,
    out_of_bounds: Cell,
    palette: Vec<Color>,
    safe_colors: Vec<Color>,
    traps: TrapTable,
    starting_coordinates: Vec<Coordinate>,
    specimens: Population,
    next_specimens: Population,
    changed_cells: BTreeSet<Coordinate>,
}

impl Board {
    /// Generate a board from `seed` and a (shuffled) color list.
    ///
    /// The same seed and color list always produce the same board.
    pub fn generate(seed: u64, colors: &[Color], config: &BoardConfig) -> Self {
        let mut rng = GameRng::new(seed);
        let (traps, safe_colors) = assign_traps(&mut rng, colors, &config.traps);
        assert!(
            !safe_colors.is_empty(),
            "no color left untrapped for the safe zone"
        );

        let mut grid = Vec::with_capacity(config.width * config.height);
        for _y in 0..config.height {
            for x in 0..config.width {
                let choices = if x < config.safe_zone_width {
                    &safe_colors[..]
                } else {
                    colors
                };
                grid.push(choices[rng.index(choices.len())]);
            }
        }

        Self::from_layout(config, colors.to_vec(), traps, grid)
    }

    /// Build a board from an explicit row-major color grid and trap table.
    ///
    /// `colors` must hold `width * height` entries.
    pub fn from_layout(
        config: &BoardConfig,
        palette: Vec<Color>,
        traps: TrapTable,
        colors: Vec<Color>,
    ) -> Self {
        assert_eq!(
            colors.len(),
            config.width * config.height,
            "color grid does not match board dimensions"
        );

        let safe_colors = palette
            .iter()
            .copied()
            .filter(|&color| traps.get(color) == Trap::None)
            .collect();

        let mut board = Self {
            config: config.clone(),
            cells: colors.into_iter().map(Cell::new).collect(),
            out_of_bounds: Cell::out_of_bounds(),
            palette,
            safe_colors,
            traps,
            starting_coordinates: Vec::new(),
            specimens: Population::new(),
            next_specimens: Population::new(),
            changed_cells: BTreeSet::new(),
        };
        board.apply_traps();
        board
    }

    /// Apply every cell's trap effect and mark the whole grid for drawing.
    fn apply_traps(&mut self) {
        for y in 0..self.config.height as i32 {
            for x in 0..self.config.width as i32 {
                let coordinate = Coordinate::new(x, y);
                self.changed_cells.insert(coordinate);

                match self.traps.get(self.color_at(coordinate)) {
                    Trap::Killer(direction) => {
                        if let Some(cell) = self.cell_mut(coordinate + direction) {
                            cell.lethal = true;
                        }
                    }
                    Trap::Mover(direction) => {
                        if let Some(cell) = self.cell_mut(coordinate) {
                            cell.teleport = direction;
                        }
                    }
                    Trap::Wall => {
                        if let Some(cell) = self.cell_mut(coordinate) {
                            cell.lethal = true;
                            cell.wall = true;
                        }
                    }
                    Trap::None => {}
                }
            }
        }
    }

    #[inline]
    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if self.is_out_of_bounds(coordinate) {
            None
        } else {
            Some(coordinate.y as usize * self.config.width + coordinate.x as usize)
        }
    }

    fn cell_mut(&mut self, coordinate: Coordinate) -> Option<&mut Cell> {
        let index = self.index(coordinate)?;
        self.cells.get_mut(index)
    }

    /// Board configuration.
    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Whether `coordinate` lies outside `[0, width) x [0, height)`.
    #[inline]
    pub fn is_out_of_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.x < 0
            || coordinate.y < 0
            || coordinate.x as usize >= self.config.width
            || coordinate.y as usize >= self.config.height
    }

    /// Whether `coordinate` is an in-bounds cell of the finish column.
    #[inline]
    pub fn is_finish(&self, coordinate: Coordinate) -> bool {
        coordinate.x as i64 == self.config.finish_column as i64
            && !self.is_out_of_bounds(coordinate)
    }

    /// Cell at `coordinate`, or the shared out-of-bounds cell.
    #[inline]
    pub fn lookup(&self, coordinate: Coordinate) -> &Cell {
        match self.index(coordinate) {
            Some(index) => &self.cells[index],
            None => &self.out_of_bounds,
        }
    }

    /// Color at `coordinate` (`OUT_OF_BOUNDS_COLOR` outside the grid).
    #[inline]
    pub fn color_at(&self, coordinate: Coordinate) -> Color {
        self.lookup(coordinate).color
    }

    /// Every color that may appear on the board.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Colors without a trap.
    pub fn safe_colors(&self) -> &[Color] {
        &self.safe_colors
    }

    /// Trap bound to `color`.
    #[inline]
    pub fn trap(&self, color: Color) -> Trap {
        self.traps.get(color)
    }

    /// Trap table indexed by color.
    pub fn traps(&self) -> &TrapTable {
        &self.traps
    }

    /// Validated starting coordinates.
    pub fn starting_coordinates(&self) -> &[Coordinate] {
        &self.starting_coordinates
    }

    pub fn set_starting_coordinates(&mut self, starts: Vec<Coordinate>) {
        self.starting_coordinates = starts;
    }

    /// Uniformly chosen starting coordinate.
    pub fn random_start(&self, rng: &mut GameRng) -> Option<Coordinate> {
        rng.choose_coordinate(&self.starting_coordinates)
    }

    /// Current population.
    pub fn specimens(&self) -> &Population {
        &self.specimens
    }

    /// Population being built for the next turn.
    pub fn pending_specimens(&self) -> &Population {
        &self.next_specimens
    }

    /// Specimens currently on `coordinate`.
    pub fn specimens_at(&self, coordinate: Coordinate) -> &[Specimen] {
        self.specimens
            .get(&coordinate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Flattened current population in stable order.
    pub fn population_snapshot(&self) -> Vec<(Coordinate, Specimen)> {
        self.specimens
            .iter()
            .flat_map(|(&coordinate, specimens)| specimens.iter().map(move |&s| (coordinate, s)))
            .collect()
    }

    /// Total number of specimens in the current population.
    pub fn population_size(&self) -> usize {
        self.specimens.values().map(Vec::len).sum()
    }

    /// Place `specimen` into the pending population at `coordinate`.
    pub fn add_specimen(&mut self, specimen: Specimen, coordinate: Coordinate) {
        self.next_specimens
            .entry(coordinate)
            .or_default()
            .push(specimen);
        self.changed_cells.insert(coordinate);
    }

    /// Replace the current population with the pending one.
    pub fn advance_turn(&mut self) {
        self.changed_cells.extend(self.next_specimens.keys().copied());
        self.changed_cells.extend(self.specimens.keys().copied());
        self.specimens = std::mem::take(&mut self.next_specimens);
    }

    /// Coordinates whose occupancy changed since the last call.
    pub fn drain_changed_cells(&mut self) -> BTreeSet<Coordinate> {
        std::mem::take(&mut self.changed_cells)
    }
}
