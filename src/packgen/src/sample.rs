//! Without-replacement and rarity-weighted sampling.

use crate::catalog::{Catalog, ImageItem, Rarity};
use crate::rng::SeededRng;
use std::collections::{HashMap, HashSet};

/// Sample up to `n` items from `pool` without replacement.
///
/// Returns fewer than `n` items only when the pool itself is smaller than
/// `n`. The caller's pool is never mutated; the shrinking working copy is
/// an index arena drained by swap-remove, so each draw is O(1).
pub fn sample_without_replacement(
    pool: &[ImageItem],
    n: usize,
    rng: &mut SeededRng,
) -> Vec<ImageItem> {
    let mut working: Vec<&ImageItem> = pool.iter().collect();
    let mut out = Vec::with_capacity(n.min(pool.len()));
    while out.len() < n && !working.is_empty() {
        let idx = rng.next_index(working.len());
        out.push(working.swap_remove(idx).clone());
    }
    out
}

/// Per-rarity pools for the weighted fill phase of one pack.
///
/// Only rarities named in the pack's distribution participate; items of
/// other rarities are reachable solely through the padding fallback.
/// Pools shrink by swap-remove as items are consumed, and the state is
/// local to one pack's composition.
pub struct WeightedPools {
    /// (rarity, configured weight, remaining items), in precedence order
    entries: Vec<(Rarity, f64, Vec<ImageItem>)>,
}

impl WeightedPools {
    /// Build pools from the catalog, excluding already-used item paths.
    pub fn new(
        catalog: &Catalog,
        distribution: &HashMap<Rarity, f64>,
        used: &HashSet<String>,
    ) -> Self {
        let mut entries = Vec::new();
        for &rarity in Rarity::ALL {
            if let Some(&weight) = distribution.get(&rarity) {
                let pool: Vec<ImageItem> = catalog
                    .pool(rarity)
                    .filter(|item| !used.contains(&item.path))
                    .cloned()
                    .collect();
                entries.push((rarity, weight, pool));
            }
        }
        Self { entries }
    }

    /// Items still available across all participating rarities
    pub fn total_remaining(&self) -> usize {
        self.entries.iter().map(|(_, _, pool)| pool.len()).sum()
    }

    /// Draw one item, weighted by rarity.
    ///
    /// A rarity's effective weight is its configured weight while its pool
    /// has items, and zero once drained - drained tiers can never be
    /// selected. When every effective weight is zero but items remain,
    /// the draw degrades to a uniform pick across everything left. This
    /// fallback-to-uniform policy is deliberate: it fills packs from
    /// whatever remains instead of failing the batch.
    ///
    /// Returns `None` only when nothing remains in any pool.
    pub fn draw(&mut self, rng: &mut SeededRng) -> Option<ImageItem> {
        let total_weight: f64 = self
            .entries
            .iter()
            .map(|(_, w, pool)| if pool.is_empty() { 0.0 } else { *w })
            .sum();

        if total_weight <= 0.0 {
            return self.draw_uniform(rng);
        }

        let mut roll = rng.next_f64() * total_weight;
        let mut selected = None;
        for (i, (_, weight, pool)) in self.entries.iter().enumerate() {
            let effective = if pool.is_empty() { 0.0 } else { *weight };
            if roll < effective {
                selected = Some(i);
                break;
            }
            roll -= effective;
        }

        // Float rounding can walk past every threshold; settle on the
        // last rarity that still has items.
        let selected = selected.or_else(|| {
            self.entries
                .iter()
                .rposition(|(_, _, pool)| !pool.is_empty())
        })?;

        let pool = &mut self.entries[selected].2;
        let idx = rng.next_index(pool.len());
        Some(pool.swap_remove(idx))
    }

    fn draw_uniform(&mut self, rng: &mut SeededRng) -> Option<ImageItem> {
        let remaining = self.total_remaining();
        if remaining == 0 {
            return None;
        }
        let mut idx = rng.next_index(remaining);
        for (_, _, pool) in &mut self.entries {
            if idx < pool.len() {
                return Some(pool.swap_remove(idx));
            }
            idx -= pool.len();
        }
        None
    }
}
