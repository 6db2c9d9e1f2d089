//! RNG module - seeded uniform randomness for spawning
//!
//! Every spawn draws a piece kind uniformly from the seven catalog entries and
//! a uniform number of counter-clockwise quarter turns in `0..4`. A small LCG
//! keeps games reproducible from a seed (tests and replays).

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from a 64-bit value (folds the high half in)
    pub fn from_seed_u64(seed: u64) -> Self {
        Self::new((seed ^ (seed >> 32)) as u32)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift so the result comes from the high bits; the low bits of
    /// a power-of-two LCG cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly chosen piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Uniformly chosen number of quarter turns in `0..4`
    pub fn next_turns(&mut self) -> u32 {
        self.next_range(4)
    }
}
