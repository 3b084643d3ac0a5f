//! Fitness-proportional parent selection and bit-level offspring synthesis.

use super::{Board, Coordinate, GameRng, Genome, Specimen};
use crate::schema::{GenomeConfig, PopulationConfig};

/// Fitness of a specimen standing on `coordinate`. Always at least 1.
#[inline]
pub fn fitness(coordinate: Coordinate, specimen: &Specimen) -> u64 {
    coordinate.x.max(0) as u64 + specimen.bonus_fitness + 1
}

/// Walk `fitnesses` in order, skipping taken entries, subtracting each
/// fitness from `draw`; returns the entry at which the draw first goes
/// negative.
pub fn pick_weighted(fitnesses: &[u64], taken: &[bool], mut draw: u64) -> Option<usize> {
    for (index, &value) in fitnesses.iter().enumerate() {
        if taken.get(index).copied().unwrap_or(false) {
            continue;
        }
        if draw < value {
            return Some(index);
        }
        draw -= value;
    }
    None
}

/// Select up to `count` distinct indices, each with probability proportional
/// to its fitness among the entries not yet selected.
pub fn select_parents(fitnesses: &[u64], count: usize, rng: &mut GameRng) -> Vec<usize> {
    let mut taken = vec![false; fitnesses.len()];
    let mut total: u64 = fitnesses.iter().sum();
    let mut selected = Vec::with_capacity(count);

    for _ in 0..count {
        if total == 0 {
            break;
        }
        let draw = rng.below(total);
        let Some(index) = pick_weighted(fitnesses, &taken, draw) else {
            break;
        };
        taken[index] = true;
        total -= fitnesses[index];
        selected.push(index);
    }

    selected
}

/// Build a child genome bit by bit, most significant first.
///
/// One parent is active at a time; before each bit the active parent is
/// re-drawn with `crossover_rate`, and each copied bit flips with
/// `mutation_rate`.
pub fn synthesize(parents: &[Genome], config: &GenomeConfig, rng: &mut GameRng) -> Genome {
    assert!(!parents.is_empty(), "synthesis needs at least one parent");

    let mut active = parents[rng.index(parents.len())];
    let mut child = 0u64;
    for position in (0..config.length).rev() {
        if rng.chance(config.crossover_rate) {
            active = parents[rng.index(parents.len())];
        }
        let mut bit = active.bit_at(position);
        if rng.chance(config.mutation_rate) {
            bit ^= 1;
        }
        child = (child << 1) | bit;
    }

    assert!(
        child <= Genome::max_value(config.length),
        "offspring genome {child:#x} exceeds {} bits",
        config.length
    );
    Genome::new(child)
}

/// Accumulates a fractional breeding rate into whole breeding events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReproductionCounter {
    rate: f64,
    accumulated: f64,
}

impl ReproductionCounter {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            accumulated: 0.0,
        }
    }

    /// Add one turn's worth of rate; returns the breeding events it triggers.
    pub fn advance(&mut self) -> usize {
        self.accumulated += self.rate;
        let mut events = 0;
        while self.accumulated >= 1.0 {
            self.accumulated -= 1.0;
            events += 1;
        }
        events
    }
}

/// Samples parents from a board's current population and injects offspring.
#[derive(Debug, Clone)]
pub struct Breeder {
    parents: usize,
    genome: GenomeConfig,
}

impl Breeder {
    pub fn new(population: &PopulationConfig, genome: &GenomeConfig) -> Self {
        Self {
            parents: population.parents,
            genome: genome.clone(),
        }
    }

    /// Parents required per breeding event.
    #[inline]
    pub fn parents(&self) -> usize {
        self.parents
    }

    /// Run one breeding event born on `turn`.
    ///
    /// The child goes into the pending population at a random start. Returns
    /// `None` when the population cannot supply enough distinct parents.
    pub fn breed(&self, board: &mut Board, turn: u64, rng: &mut GameRng) -> Option<Genome> {
        let snapshot = board.population_snapshot();
        let fitnesses: Vec<u64> = snapshot.iter().map(|(c, s)| fitness(*c, s)).collect();

        let selected = select_parents(&fitnesses, self.parents, rng);
        if selected.len() < self.parents {
            return None;
        }
        let parents: Vec<Genome> = selected.iter().map(|&i| snapshot[i].1.genome).collect();

        let child = synthesize(&parents, &self.genome, rng);
        let start = board.random_start(rng)?;
        board.add_specimen(Specimen::new(child, turn), start);
        log::debug!("Turn {}: bred {:#x} at {}", turn, child.value(), start);
        Some(child)
    }
}
