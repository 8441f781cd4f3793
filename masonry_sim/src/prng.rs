// Deterministic, portable pseudo-random number generator.
//
// Implements SplitMix64 (Steele, Lea & Flood, 2014) — a single 64-bit
// counter state pushed through a finalizer. Hand-rolled with zero external
// dependencies, chosen for portability and to guarantee identical wild-bond
// walls across all platforms given the same seed.
//
// **Critical constraint: determinism.** Every method must produce identical
// output given the same prior state, regardless of platform, compiler
// version, or optimization level. No floating-point arithmetic in the
// generator, no stdlib PRNG, no source of non-determinism in this module.

use serde::{Deserialize, Serialize};

/// SplitMix64 PRNG — the sole source of randomness in the simulation.
///
/// Only wild bond generation draws from it; stretcher and Flemish walls are
/// fully determined by their dimensions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BondRng {
    state: u64,
}

impl BondRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    ///
    /// Plain modulo — the bias for the small bounds used here (≤ 100) is
    /// far below anything the bond patterns could exhibit.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }

    /// `true` with probability `percent / 100`.
    pub fn chance(&mut self, percent: u64) -> bool {
        self.next_below(100) < percent
    }
}
