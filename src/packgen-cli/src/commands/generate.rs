//! Bulk pack generation command handler

use anyhow::{bail, Context, Result};
use packgen::{run_batch, BatchOptions, Catalog, PackConfig};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::Path;

/// Handle the generate command
#[allow(clippy::too_many_arguments)]
pub fn handle(
    config_path: &Path,
    images_root: &Path,
    out_dir: &Path,
    csv_path: &Path,
    per_pack: Option<usize>,
    count: usize,
    seed: Option<String>,
) -> Result<()> {
    // Configuration problems are fatal before any generation begins
    let config = PackConfig::load(config_path)
        .with_context(|| format!("Failed to load pack config from {}", config_path.display()))?;
    let catalog = Catalog::scan(images_root)
        .with_context(|| format!("Failed to scan images under {}", images_root.display()))?;
    if catalog.is_empty() {
        bail!("No image files found under {}", images_root.display());
    }
    if config.packs.is_empty() {
        bail!("Pack config {} declares no pack types", config_path.display());
    }

    let base_seed = match seed {
        Some(seed) => seed,
        None => {
            let seed = random_seed();
            println!("No seed supplied, using random seed: {seed}");
            seed
        }
    };

    let summary = run_batch(
        &catalog,
        &config,
        &BatchOptions {
            out_dir: out_dir.to_path_buf(),
            csv_path: csv_path.to_path_buf(),
            per_pack,
            count,
            base_seed: base_seed.clone(),
        },
    )
    .context("Pack generation failed")?;

    for path in &summary.pack_files {
        println!("Wrote {}", path.display());
    }
    println!("Wrote CSV {}", csv_path.display());
    println!(
        "{} packs across {} pack types (seed: {})",
        summary.rows.len(),
        config.packs.len(),
        base_seed
    );

    Ok(())
}

/// Synthesize a seed from process-level randomness for unseeded runs.
/// The seed is printed so the run can still be replayed afterwards.
fn random_seed() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    format!("seed-{suffix}")
}
