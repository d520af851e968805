//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use lifeindex_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that do not depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays predetermined draws. `next_f64` pops from the float
/// sequence and `next_u32_range` from the integer sequence; an exhausted
/// sequence falls back to `min` / `0.0`. Tests read `f64_draws` to assert how
/// many times a roll actually happened.
#[derive(Debug, Default)]
pub struct SequenceRng {
    floats: Vec<f64>,
    ints: Vec<u32>,
    float_index: usize,
    int_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` that replays the given float draws.
    #[must_use]
    pub fn with_floats(floats: Vec<f64>) -> Self {
        Self {
            floats,
            ..Self::default()
        }
    }

    /// Create a new `SequenceRng` that replays the given integer draws.
    #[must_use]
    pub fn with_ints(ints: Vec<u32>) -> Self {
        Self {
            ints,
            ..Self::default()
        }
    }

    /// Number of `next_f64` calls made so far.
    #[must_use]
    pub fn f64_draws(&self) -> usize {
        self.float_index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.ints.get(self.int_index).copied().unwrap_or(min);
        self.int_index += 1;
        val.clamp(min, max.max(min))
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.floats.get(self.float_index).copied().unwrap_or(0.0);
        self.float_index += 1;
        val
    }
}
