//! Pack log command handler

use anyhow::{Context, Result};
use chrono::Utc;
use packgen::build_pack_log;
use std::fs;
use std::path::Path;

/// Handle the pack-log command: join the ledger with the generated pack
/// documents and write the mint-tracking manifest
pub fn handle(csv_path: &Path, packs_dir: &Path, out_path: &Path) -> Result<()> {
    let log = build_pack_log(csv_path, packs_dir, Utc::now())
        .with_context(|| format!("Failed to build pack log from {}", csv_path.display()))?;

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out_path, serde_json::to_string_pretty(&log)?)?;

    println!("Wrote pack log to {} ({} packs)", out_path.display(), log.total_packs);
    let unresolved = log.packs.iter().filter(|p| p.json_path.is_none()).count();
    if unresolved > 0 {
        println!("  {unresolved} rows had no matching pack document");
    }

    Ok(())
}
