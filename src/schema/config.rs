//! Configuration types for Trap Race runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board geometry and trap layout.
    pub board: BoardConfig,
    /// Population size, lifespan and breeding cadence.
    pub population: PopulationConfig,
    /// Genome length and variation operators.
    pub genome: GenomeConfig,
    /// Number of independent boards played per run.
    #[serde(default = "default_boards")]
    pub boards: usize,
    /// Turns played on each board.
    #[serde(default = "default_turns")]
    pub turns: u64,
    /// Side length of the square vision window (must be odd).
    #[serde(default = "default_vision_width")]
    pub vision_width: usize,
    /// Movement strategy under evaluation.
    #[serde(default)]
    pub player: PlayerKind,
    /// Rendering backend.
    #[serde(default)]
    pub display: DisplayKind,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            population: PopulationConfig::default(),
            genome: GenomeConfig::default(),
            boards: default_boards(),
            turns: default_turns(),
            vision_width: default_vision_width(),
            player: PlayerKind::default(),
            display: DisplayKind::default(),
            random_seed: Some(13_722_829),
        }
    }
}

fn default_boards() -> usize {
    1
}
fn default_turns() -> u64 {
    10_000
}
fn default_vision_width() -> usize {
    5
}

/// Board geometry, finish line and trap counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Columns `x < safe_zone_width` only use untrapped colors.
    pub safe_zone_width: usize,
    /// Column specimens must reach to score.
    pub finish_column: usize,
    /// Bonus fitness granted each time a specimen scores.
    #[serde(default = "default_finish_bonus")]
    pub finish_bonus: u64,
    /// Number of colors that carry no trap.
    #[serde(default = "default_safe_colors")]
    pub safe_colors: usize,
    /// Trap instance counts.
    #[serde(default)]
    pub traps: TrapConfig,
    /// Boards generated before giving up on finding a reachable start.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 15,
            safe_zone_width: 3,
            finish_column: 49,
            finish_bonus: default_finish_bonus(),
            safe_colors: default_safe_colors(),
            traps: TrapConfig::default(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_finish_bonus() -> u64 {
    49
}
fn default_safe_colors() -> usize {
    8
}
fn default_max_attempts() -> usize {
    1000
}

/// Maximum number of colors bound to each trap kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapConfig {
    /// Colors whose neighbor in some direction is lethal.
    #[serde(default = "default_killers")]
    pub killers: usize,
    /// Colors that teleport whoever lands on them.
    #[serde(default = "default_movers")]
    pub movers: usize,
    /// Colors that cannot be entered.
    #[serde(default = "default_walls")]
    pub walls: usize,
    /// Largest teleport displacement along either axis.
    #[serde(default = "default_teleport_range")]
    pub teleport_range: i32,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            killers: default_killers(),
            movers: default_movers(),
            walls: default_walls(),
            teleport_range: default_teleport_range(),
        }
    }
}

fn default_killers() -> usize {
    2
}
fn default_movers() -> usize {
    4
}
fn default_walls() -> usize {
    2
}
fn default_teleport_range() -> i32 {
    4
}

impl TrapConfig {
    /// Total number of trapped colors.
    #[inline]
    pub fn total(&self) -> usize {
        self.killers + self.movers + self.walls
    }
}

/// Population and breeding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Specimens seeded onto each fresh board.
    #[serde(default = "default_initial")]
    pub initial: usize,
    /// Turns a specimen lives without scoring.
    #[serde(default = "default_lifespan")]
    pub lifespan: u64,
    /// Breeding events per turn (may be fractional).
    #[serde(default = "default_reproduction_rate")]
    pub reproduction_rate: f64,
    /// Parents sampled per breeding event.
    #[serde(default = "default_parents")]
    pub parents: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial: default_initial(),
            lifespan: default_lifespan(),
            reproduction_rate: default_reproduction_rate(),
            parents: default_parents(),
        }
    }
}

fn default_initial() -> usize {
    15
}
fn default_lifespan() -> u64 {
    100
}
fn default_reproduction_rate() -> f64 {
    10.0
}
fn default_parents() -> usize {
    2
}

/// Genome length and variation probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeConfig {
    /// Genome length in bits (1-64).
    #[serde(default = "default_genome_length")]
    pub length: u32,
    /// Probability of switching the copied parent at each bit.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Probability of flipping each copied bit.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            length: default_genome_length(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

fn default_genome_length() -> u32 {
    50
}
fn default_crossover_rate() -> f64 {
    0.1
}
fn default_mutation_rate() -> f64 {
    0.01
}

/// Built-in movement strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PlayerKind {
    /// Always step right.
    Forward,
    /// Genome-derived color preferences.
    #[default]
    ColorScore,
}

/// Rendering backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum DisplayKind {
    /// Draw nothing.
    #[default]
    None,
    /// ASCII frames on stdout every `interval` turns.
    Text { interval: u64 },
}

impl GameConfig {
    /// Number of distinct colors on the board (trapped + safe).
    #[inline]
    pub fn number_of_colors(&self) -> usize {
        self.board.traps.total() + self.board.safe_colors
    }

    /// Load configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        if board.width == 0 || board.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if board.finish_column >= board.width || board.finish_column < board.safe_zone_width {
            return Err(ConfigError::InvalidFinishColumn {
                column: board.finish_column,
                width: board.width,
            });
        }
        if board.safe_zone_width == 0 {
            return Err(ConfigError::InvalidSafeZone);
        }
        if board.safe_colors == 0 {
            return Err(ConfigError::NoSafeColors);
        }
        if board.max_attempts == 0 {
            return Err(ConfigError::InvalidAttempts);
        }
        let longest_side = board.width.max(board.height);
        let teleport_range = board.traps.teleport_range;
        if teleport_range < 0 || teleport_range as usize > longest_side {
            return Err(ConfigError::InvalidTeleportRange {
                range: teleport_range,
                limit: longest_side,
            });
        }

        let traps = &board.traps;
        let check_pool = |kind: &'static str, requested: usize, available: usize| {
            if requested > available {
                Err(ConfigError::TrapPoolExhausted {
                    kind,
                    requested,
                    available,
                })
            } else {
                Ok(())
            }
        };
        let range = traps.teleport_range as usize * 2 + 1;
        check_pool("killer", traps.killers, 8)?;
        check_pool("mover", traps.movers, range * range - 1)?;
        check_pool("wall", traps.walls, 9)?;

        if self.population.lifespan == 0 {
            return Err(ConfigError::InvalidLifespan);
        }
        if self.population.parents == 0 {
            return Err(ConfigError::InvalidParents);
        }
        let rate = self.population.reproduction_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidReproductionRate(rate));
        }

        if self.genome.length == 0 || self.genome.length > 64 {
            return Err(ConfigError::InvalidGenomeLength(self.genome.length));
        }
        let check_probability = |name: &'static str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability { name, value })
            }
        };
        check_probability("crossover_rate", self.genome.crossover_rate)?;
        check_probability("mutation_rate", self.genome.mutation_rate)?;

        if self.vision_width == 0 || self.vision_width % 2 == 0 {
            return Err(ConfigError::InvalidVisionWidth(self.vision_width));
        }
        if self.boards == 0 {
            return Err(ConfigError::NoBoards);
        }
        if let DisplayKind::Text { interval: 0 } = self.display {
            return Err(ConfigError::InvalidDisplayInterval);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Finish column {column} must lie right of the safe zone and inside width {width}")]
    InvalidFinishColumn { column: usize, width: usize },
    #[error("Safe zone must cover at least the starting column")]
    InvalidSafeZone,
    #[error("At least one safe color is required")]
    NoSafeColors,
    #[error("Board attempt limit must be non-zero")]
    InvalidAttempts,
    #[error("Teleport range must be within 0..={limit}, got {range}")]
    InvalidTeleportRange { range: i32, limit: usize },
    #[error("Requested {requested} {kind} traps but only {available} directions are available")]
    TrapPoolExhausted {
        kind: &'static str,
        requested: usize,
        available: usize,
    },
    #[error("Lifespan must be at least one turn")]
    InvalidLifespan,
    #[error("Parent count must be non-zero")]
    InvalidParents,
    #[error("Reproduction rate must be finite and non-negative, got {0}")]
    InvalidReproductionRate(f64),
    #[error("Genome length must be between 1 and 64 bits, got {0}")]
    InvalidGenomeLength(u32),
    #[error("Probability {name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Vision width must be odd and non-zero, got {0}")]
    InvalidVisionWidth(usize),
    #[error("At least one board is required")]
    NoBoards,
    #[error("Text display interval must be non-zero")]
    InvalidDisplayInterval,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
