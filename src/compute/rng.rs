//! Seeded random source threaded through board generation, turns and breeding.

use rand::prelude::*;

use super::{Coordinate, Genome};

/// Random number generator wrapper for gameplay.
///
/// Every consumer takes `&mut GameRng` explicitly, so a fixed seed always
/// replays the same draws in the same order.
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }

    /// Seed for a freshly generated board.
    pub fn board_seed(&mut self) -> u64 {
        self.rng.gen_range(0..10_000_000)
    }

    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }

    /// Uniform index into a collection of `len` items. `len` must be positive.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.r#gen::<f64>() < p
    }

    /// Uniformly random genome of `length` bits.
    pub fn genome(&mut self, length: u32) -> Genome {
        Genome::new(self.rng.r#gen::<u64>() & Genome::max_value(length))
    }

    /// Uniformly chosen coordinate, or `None` when `coordinates` is empty.
    pub fn choose_coordinate(&mut self, coordinates: &[Coordinate]) -> Option<Coordinate> {
        coordinates.choose(&mut self.rng).copied()
    }

    /// Up to `amount` distinct elements of `items`, in draw order.
    pub fn sample<T: Copy>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect()
    }

    /// Shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
