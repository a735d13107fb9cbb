//! # packgen
//!
//! Deterministic, rarity-weighted pack generation for NFT drops.
//!
//! This library provides functionality to:
//! - Scan an image catalog and classify items by rarity directory
//! - Compose fixed-size packs from guaranteed slots plus weighted fill
//! - Drive whole batches, emitting pack documents and a CSV ledger
//! - Build the mint-tracking pack log and per-token metadata documents
//!
//! All sampling is driven by seed strings, so a batch can be replayed
//! byte-for-byte for auditing and re-minting.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use packgen::{BatchOptions, Catalog, PackConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::scan(Path::new("assets/images/NFT"))?;
//! let config = PackConfig::load(Path::new("metadata/pack-config.json"))?;
//!
//! let summary = packgen::run_batch(&catalog, &config, &BatchOptions {
//!     out_dir: "metadata/generated/packs".into(),
//!     csv_path: "metadata/generated/packs.csv".into(),
//!     per_pack: None,
//!     count: 5,
//!     base_seed: "bulk-seed".to_string(),
//! })?;
//!
//! println!("generated {} packs", summary.rows.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod metadata;
pub mod packlog;
pub mod rng;
pub mod sample;

// Re-export commonly used items
#[doc(inline)]
pub use batch::{
    parse_ledger, run_batch, run_batch_at, sanitize_pack_name, BatchError, BatchOptions,
    BatchSummary, LedgerRow, LEDGER_HEADER,
};
#[doc(inline)]
pub use catalog::{Catalog, CatalogError, ImageItem, Rarity, IMAGE_EXTENSIONS};
#[doc(inline)]
pub use compose::{
    compose_pack, GeneratedPack, GuaranteedSlot, PackDefinition, DEFAULT_ITEMS_PER_PACK,
};
#[doc(inline)]
pub use config::{ConfigError, PackConfig};
#[doc(inline)]
pub use metadata::{generate_metadata, MetadataError, MetadataInputs};
#[doc(inline)]
pub use packlog::{build_pack_log, PackLog, PackLogEntry};
#[doc(inline)]
pub use rng::SeededRng;
#[doc(inline)]
pub use sample::{sample_without_replacement, WeightedPools};
