//! Pack log: joins the CSV ledger against the generated pack documents
//! into one mint-tracking manifest.
//!
//! The minting collaborator works through this document, flipping
//! `minted` and appending transaction hashes as packs go on-chain.

use crate::batch::{parse_ledger, sanitize_pack_name, BatchError, LedgerRow};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One ledger row enriched with the location of its pack document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackLogEntry {
    pub pack_id: u64,
    pub pack_type: String,
    pub seed: String,
    pub items: Vec<String>,
    /// Resolved pack document path; `None` when no file matched the row
    pub json_path: Option<String>,
    pub minted: bool,
    pub minted_txs: Vec<String>,
}

/// The full mint-tracking manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackLog {
    pub created_at: String,
    pub csv: String,
    pub packs_dir: String,
    pub total_packs: usize,
    pub packs: Vec<PackLogEntry>,
}

/// Build a pack log by locating each ledger row's pack document in
/// `packs_dir`.
pub fn build_pack_log(
    csv_path: &Path,
    packs_dir: &Path,
    created_at: DateTime<Utc>,
) -> Result<PackLog, BatchError> {
    let rows = parse_ledger(csv_path)?;

    let packs = rows
        .into_iter()
        .map(|row| {
            let json_path = expected_document_name(&row)
                .map(|name| packs_dir.join(name))
                .filter(|p| p.is_file())
                .map(|p| resolve(&p));
            PackLogEntry {
                pack_id: row.pack_id,
                pack_type: row.pack_type,
                seed: row.seed,
                items: row.items,
                json_path,
                minted: false,
                minted_txs: Vec::new(),
            }
        })
        .collect::<Vec<_>>();

    Ok(PackLog {
        created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        csv: resolve(csv_path),
        packs_dir: resolve(packs_dir),
        total_packs: packs.len(),
        packs,
    })
}

/// Reconstruct the document filename the batch driver wrote for a row.
///
/// Per-pack seeds have the shape `<base>-<type>-<index>` and documents
/// are named `<sanitized type>-<base>-<index>.json`, so the base seed
/// falls out of stripping the type and index back off the row's seed.
/// Returns `None` for rows whose seed doesn't follow that shape.
fn expected_document_name(row: &LedgerRow) -> Option<String> {
    let index = row.seed.rsplit('-').next()?;
    let base = row
        .seed
        .strip_suffix(&format!("-{}-{}", row.pack_type, index))?;
    Some(format!(
        "{}-{}-{}.json",
        sanitize_pack_name(&row.pack_type),
        base,
        index
    ))
}

fn resolve(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
