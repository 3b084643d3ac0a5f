//! Specimens and their fixed-length bit-string genomes.

use serde::{Deserialize, Serialize};

/// Fixed-length bit string steering a specimen's moves.
///
/// The length lives in the configuration; a genome of length `L` always
/// holds a value in `[0, 2^L - 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome(u64);

impl Genome {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw genome value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Largest value a genome of `length` bits may hold.
    #[inline]
    pub const fn max_value(length: u32) -> u64 {
        if length >= 64 {
            u64::MAX
        } else {
            (1u64 << length) - 1
        }
    }

    /// Bit at `position` (0 = least significant).
    #[inline]
    pub const fn bit_at(self, position: u32) -> u64 {
        (self.0 >> position) & 1
    }

    /// `count` bits starting at `position`, wrapping around a genome of `length` bits.
    pub fn bits(self, position: u32, count: u32, length: u32) -> u64 {
        (0..count).fold(0, |acc, offset| {
            (acc << 1) | self.bit_at((position + offset) % length)
        })
    }

    /// Rebuild a genome from bits given most-significant first.
    pub fn from_bits_msb_first<I: IntoIterator<Item = u64>>(bits: I) -> Self {
        Self(bits.into_iter().fold(0, |acc, bit| (acc << 1) | (bit & 1)))
    }
}

/// A genome-carrying agent occupying a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specimen {
    pub genome: Genome,
    /// Turn the specimen was born, or last scored.
    pub birth: u64,
    /// Accumulated bonus from reaching the finish line.
    pub bonus_fitness: u64,
}

impl Specimen {
    pub fn new(genome: Genome, birth: u64) -> Self {
        Self {
            genome,
            birth,
            bonus_fitness: 0,
        }
    }

    /// Turns lived since birth (or last score) as of `turn`.
    #[inline]
    pub fn age(&self, turn: u64) -> u64 {
        turn.saturating_sub(self.birth)
    }
}
