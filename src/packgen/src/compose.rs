//! Pack composition: guaranteed slots, weighted fill, then padding.

use crate::catalog::{Catalog, ImageItem, Rarity};
use crate::rng::SeededRng;
use crate::sample::{sample_without_replacement, WeightedPools};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Items per pack when neither the definition nor the caller says otherwise
pub const DEFAULT_ITEMS_PER_PACK: usize = 10;

/// One guaranteed-rarity rule: force at least `count` items of `rarity`
/// into every pack of this type, capped by pool availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuaranteedSlot {
    pub rarity: Rarity,
    #[serde(default = "default_slot_count")]
    pub count: usize,
}

fn default_slot_count() -> usize {
    1
}

/// Composition policy for one named pack type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackDefinition {
    /// Rarity slots filled before the weighted draw
    pub guaranteed: Vec<GuaranteedSlot>,
    /// Relative selection weight per rarity for the fill phase
    pub distribution: HashMap<Rarity, f64>,
    /// Pack size; falls back to the config-level or built-in default
    pub items_per_pack: Option<usize>,
}

/// One generated pack, as written to its output document.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPack {
    pub pack: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    pub items: Vec<ImageItem>,
    pub seed: String,
}

/// Assemble one pack's contents.
///
/// Order of operations:
/// 1. Guaranteed slots, sampled without replacement per rarity.
/// 2. `items_per_pack - picked` rarity-weighted draws over what remains.
/// 3. Padding from the global unused catalog, on a separate RNG stream
///    seeded `"<seed>-pad"` so padding never perturbs the primary
///    sequence.
/// 4. Truncate to `items_per_pack`.
///
/// No item path appears twice in the result. An empty catalog or empty
/// definition yields an empty pack; a guaranteed count larger than its
/// pool is silently capped. Exhaustion is never an error here - the pack
/// just comes out short.
pub fn compose_pack(
    catalog: &Catalog,
    def: &PackDefinition,
    seed: &str,
    items_per_pack: usize,
) -> Vec<ImageItem> {
    let mut rng = SeededRng::from_seed(seed);
    let mut picked: Vec<ImageItem> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for slot in &def.guaranteed {
        let available: Vec<ImageItem> = catalog
            .pool(slot.rarity)
            .filter(|item| !used.contains(&item.path))
            .cloned()
            .collect();
        let take = slot.count.min(available.len());
        for item in sample_without_replacement(&available, take, &mut rng) {
            used.insert(item.path.clone());
            picked.push(item);
        }
    }

    let remaining = items_per_pack.saturating_sub(picked.len());
    let mut pools = WeightedPools::new(catalog, &def.distribution, &used);
    for _ in 0..remaining {
        match pools.draw(&mut rng) {
            Some(item) => {
                used.insert(item.path.clone());
                picked.push(item);
            }
            None => break,
        }
    }

    if picked.len() < items_per_pack {
        let unused: Vec<ImageItem> = catalog
            .items()
            .iter()
            .filter(|item| !used.contains(&item.path))
            .cloned()
            .collect();
        let mut pad_rng = SeededRng::from_seed(&format!("{seed}-pad"));
        let shortfall = items_per_pack - picked.len();
        picked.extend(sample_without_replacement(&unused, shortfall, &mut pad_rng));
    }

    picked.truncate(items_per_pack);
    picked
}
