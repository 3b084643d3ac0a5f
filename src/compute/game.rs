//! Run driver: boards, turns, breeding cadence, rendering and scoring.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    Board, Breeder, Color, Coordinate, Display, GameRng, NoDisplay, Player, ReproductionCounter,
    Specimen, TurnRules, generate_board, take_turn,
};
use crate::schema::{ConfigError, GameConfig};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("No board with a reachable start found after {attempts} attempts")]
    NoReachableBoard { attempts: usize },
    #[error("Board has no starting coordinates")]
    NoStartingCoordinates,
    #[error("Player returned invalid direction {direction}")]
    InvalidDirection { direction: Coordinate },
    #[error("Display failed: {0}")]
    Display(#[from] std::io::Error),
}

/// Why a board stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// All configured turns were played.
    TurnLimit,
    /// Too few specimens remained to pick distinct parents.
    PopulationCollapse,
}

/// Outcome of a single board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Zero-based board index within the run.
    pub board_number: usize,
    /// Seed of the accepted board.
    pub board_seed: u64,
    /// Turns actually played.
    pub turns_played: u64,
    /// Points scored, including specimens left on the finish line.
    pub points: u64,
    /// Population when the board stopped.
    pub final_population: usize,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the evaluated player.
    pub player: String,
    /// Points over every board.
    pub total_points: u64,
    /// Per-board results, in board order.
    pub boards: Vec<BoardSummary>,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
}

/// Progress report emitted while a board is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunProgress {
    pub board_number: usize,
    pub turn: u64,
    pub total_turns: u64,
    pub points: u64,
    pub population: usize,
}

/// Plays every board of a run with one player.
pub struct Game {
    config: GameConfig,
    player: Box<dyn Player>,
    rng: GameRng,
}

impl Game {
    /// Create a game after validating `config`.
    pub fn new(config: GameConfig, player: Box<dyn Player>) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.random_seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::random(),
        };
        Ok(Self {
            config,
            player,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shuffled palette plus one seed per board, drawn from the master RNG.
    fn plan(&mut self) -> (Vec<Color>, Vec<u64>) {
        let mut colors: Vec<Color> = (0..self.config.number_of_colors() as Color).collect();
        self.rng.shuffle(&mut colors);
        let seeds = (0..self.config.boards)
            .map(|_| self.rng.next_seed())
            .collect();
        (colors, seeds)
    }

    /// Play every board in parallel without rendering.
    ///
    /// Each board runs on its own RNG seeded from the master seed, so the
    /// result matches a sequential run.
    pub fn run(&mut self) -> Result<RunSummary, GameError> {
        let start = Instant::now();
        let (colors, seeds) = self.plan();
        let config = &self.config;
        let player = self.player.as_ref();

        let boards = seeds
            .par_iter()
            .enumerate()
            .map(|(board_number, &seed)| {
                run_board(
                    config,
                    player,
                    &colors,
                    board_number,
                    seed,
                    &mut NoDisplay,
                    &|_: &RunProgress| {},
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.summarize(boards, start))
    }

    /// Play every board in order, rendering to `display` and reporting progress.
    pub fn run_with_display<F>(
        &mut self,
        display: &mut dyn Display,
        callback: F,
    ) -> Result<RunSummary, GameError>
    where
        F: Fn(&RunProgress),
    {
        let start = Instant::now();
        let (colors, seeds) = self.plan();

        let mut boards = Vec::with_capacity(seeds.len());
        for (board_number, &seed) in seeds.iter().enumerate() {
            boards.push(run_board(
                &self.config,
                self.player.as_ref(),
                &colors,
                board_number,
                seed,
                display,
                &callback,
            )?);
        }

        Ok(self.summarize(boards, start))
    }

    fn summarize(&self, boards: Vec<BoardSummary>, start: Instant) -> RunSummary {
        let total_points = boards.iter().map(|b| b.points).sum();
        RunSummary {
            player: self.player.name().to_string(),
            total_points,
            boards,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        }
    }
}

/// Play a single board from `seed` to completion.
pub fn run_board(
    config: &GameConfig,
    player: &dyn Player,
    colors: &[Color],
    board_number: usize,
    seed: u64,
    display: &mut dyn Display,
    callback: &dyn Fn(&RunProgress),
) -> Result<BoardSummary, GameError> {
    log::info!("Running board #{}/{}", board_number + 1, config.boards);
    let start = Instant::now();
    let mut rng = GameRng::new(seed);
    let (mut board, board_seed) = generate_board(&mut rng, colors, &config.board)?;
    seed_population(&mut board, config, &mut rng)?;

    let rules = TurnRules {
        lifespan: config.population.lifespan,
        finish_bonus: config.board.finish_bonus,
        vision_width: config.vision_width,
    };
    let breeder = Breeder::new(&config.population, &config.genome);
    let mut counter = ReproductionCounter::new(config.population.reproduction_rate);
    let report_every = (config.turns / 100).max(1);

    let mut points = 0u64;
    let mut turns_played = 0u64;
    let mut stop_reason = StopReason::TurnLimit;

    for turn in 0..config.turns {
        let stats = take_turn(&mut board, turn, player, &rules, &mut rng)?;
        points += stats.scored as u64;
        turns_played = turn + 1;

        for coordinate in board.drain_changed_cells() {
            display.draw_cell(coordinate, &board);
        }
        display.update()?;

        if board.population_size() <= breeder.parents() {
            log::info!(
                "Board #{}: population collapsed on turn {}",
                board_number + 1,
                turn
            );
            stop_reason = StopReason::PopulationCollapse;
            break;
        }

        for _ in 0..counter.advance() {
            if breeder.breed(&mut board, turn, &mut rng).is_none() {
                log::debug!(
                    "Turn {}: breeding skipped, {} specimens for {} parents",
                    turn,
                    board.population_size(),
                    breeder.parents()
                );
            }
        }

        if turn % report_every == 0 {
            let progress = RunProgress {
                board_number,
                turn,
                total_turns: config.turns,
                points,
                population: board.population_size(),
            };
            log::info!(
                "{}% {:.2} sec - {} points - Population: {}",
                turn * 100 / config.turns,
                start.elapsed().as_secs_f64(),
                progress.points,
                progress.population
            );
            callback(&progress);
        }
    }

    // Specimens still standing on the finish line score once more.
    let finishers: usize = board
        .specimens()
        .iter()
        .filter(|(c, _)| board.is_finish(**c))
        .map(|(_, specimens)| specimens.len())
        .sum();
    points += finishers as u64;

    Ok(BoardSummary {
        board_number,
        board_seed,
        turns_played,
        points,
        final_population: board.population_size(),
        stop_reason,
    })
}

/// Seed the initial specimens onto random safe starts and make them current.
fn seed_population(
    board: &mut Board,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<(), GameError> {
    for _ in 0..config.population.initial {
        let genome = rng.genome(config.genome.length);
        let start = board
            .random_start(rng)
            .ok_or(GameError::NoStartingCoordinates)?;
        board.add_specimen(Specimen::new(genome, 0), start);
    }
    board.advance_turn();
    Ok(())
}
