//! Catalog scan report command handler

use anyhow::{Context, Result};
use packgen::Catalog;
use std::path::Path;

/// Handle the scan command: print per-rarity counts for a catalog root
pub fn handle(images_root: &Path) -> Result<()> {
    let catalog = Catalog::scan(images_root)
        .with_context(|| format!("Failed to scan images under {}", images_root.display()))?;

    println!("Catalog: {}\n", images_root.display());
    println!("{:<12} {:>6}", "Rarity", "Items");
    println!("{}", "-".repeat(19));
    for (rarity, count) in catalog.rarity_counts() {
        println!("{:<12} {:>6}", rarity.name(), count);
    }
    println!("{}", "-".repeat(19));
    println!("{:<12} {:>6}", "Total", catalog.len());

    if catalog.is_empty() {
        println!("\nNo image files found - packs generated from this root would be empty.");
    }

    Ok(())
}
