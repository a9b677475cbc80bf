//! RNG module - shuffle primitives for dealing
//!
//! The generator only needs uniform permutations. [`RandomSource`] is the seam
//! through which callers inject randomness: [`SimpleRng`] is a seeded LCG that makes
//! deals reproducible, and [`FixedOrder`] leaves every slice untouched so tests can
//! reason about the exact candidate order.

/// A source of uniform random indices.
pub trait RandomSource {
    /// Random value in `[0, max)`; returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32;

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (feeds `SimpleRng::new` to resume the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Scale from the high bits; the low bits of an LCG have short periods.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// A source that never reorders anything (`next_range(n) == n - 1`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl RandomSource for FixedOrder {
    fn next_range(&mut self, max: u32) -> u32 {
        max.saturating_sub(1)
    }
}
