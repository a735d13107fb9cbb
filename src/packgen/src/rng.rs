//! Deterministic seeded RNG for reproducible sampling.
//!
//! Batch runs must be replayable for auditing and re-minting, so every
//! sampling decision is driven by a generator derived purely from a seed
//! string: an FNV-style fold of the seed bytes into a 32-bit state, then a
//! mulberry32 permutation per draw. No entropy source is consulted.

/// A small, fast generator producing `f64` values in `[0, 1)`.
///
/// The same seed string always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Derive a generator from a seed string.
    pub fn from_seed(seed: &str) -> Self {
        let mut h: u32 = 2_166_136_261;
        for &b in seed.as_bytes() {
            h ^= u32::from(b);
            let spread = (h << 1)
                .wrapping_add(h << 4)
                .wrapping_add(h << 7)
                .wrapping_add(h << 8)
                .wrapping_add(h << 24);
            h = h.wrapping_add(spread);
        }
        Self {
            state: h.wrapping_add(0x6D2B_79F5),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        self.state = t;
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_f64() * len as f64) as usize
    }
}
