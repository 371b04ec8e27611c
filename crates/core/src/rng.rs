//! RNG module - template selection for spawning
//!
//! Pieces are drawn uniformly from the shape catalog. A debug override pins
//! every spawn to one template, which keeps scripted sessions predictable.
//!
//! Also provides a simple LCG so that a seed fully determines a session.

use crate::shapes::template_count;

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

    /// Generate random value in range [0, max)
    ///
    /// The low bits of an LCG cycle quickly, so the high half is used.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }
}

/// Chooses the template for each spawned piece
#[derive(Debug, Clone)]
pub struct TemplatePicker {
    rng: SimpleRng,
    seed: u32,
    debug_template: Option<usize>,
}

impl TemplatePicker {
    pub fn new(seed: u32, debug_template: Option<usize>) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
            debug_template,
        }
    }

    /// Next template index, always inside the catalog
    pub fn draw(&mut self) -> usize {
        match self.debug_template {
            Some(id) if id < template_count() => id,
            Some(_) => 0,
            None => self.rng.next_range(template_count() as u32) as usize,
        }
    }

    /// Seed the picker was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn debug_template(&self) -> Option<usize> {
        self.debug_template
    }

    /// Rewind to the initial seed so a restart replays the same sequence
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
    }
}

impl Default for TemplatePicker {
    fn default() -> Self {
        Self::new(1, None)
    }
}
