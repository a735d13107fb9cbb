//! Batch driver: iterate pack types x count, emit pack documents and the
//! run-wide CSV ledger.

use crate::catalog::Catalog;
use crate::compose::{compose_pack, GeneratedPack, DEFAULT_ITEMS_PER_PACK};
use crate::config::PackConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// CSV header shared by the writer and the pack-log parser
pub const LEDGER_HEADER: &str = "packId,packType,seed,items";

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("batch I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize pack document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory receiving one JSON document per pack
    pub out_dir: PathBuf,
    /// Path of the CSV ledger
    pub csv_path: PathBuf,
    /// Overrides every definition's pack size when set
    pub per_pack: Option<usize>,
    /// Packs generated per pack type
    pub count: usize,
    /// Base seed; per-pack seeds derive from it
    pub base_seed: String,
}

/// One ledger row: a flattened summary of one generated pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// Monotonically increasing across the whole batch, starting at 1
    pub pack_id: u64,
    pub pack_type: String,
    pub seed: String,
    /// Filenames in pick order: guaranteed, weighted fill, padding
    pub items: Vec<String>,
}

impl LedgerRow {
    /// Render as a CSV line; the items field is double-quoted and
    /// semicolon-joined.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},\"{}\"",
            self.pack_id,
            self.pack_type,
            self.seed,
            self.items.join(";")
        )
    }

    /// Parse one data line of a ledger CSV. Returns `None` for lines that
    /// don't match the `packId,packType,seed,"a;b"` shape.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(4, ',');
        let pack_id = parts.next()?.parse().ok()?;
        let pack_type = parts.next()?.to_string();
        let seed = parts.next()?.to_string();
        let quoted = parts.next()?;
        let joined = quoted.strip_prefix('"')?.strip_suffix('"')?;
        let items = joined
            .split(';')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Some(Self {
            pack_id,
            pack_type,
            seed,
            items,
        })
    }
}

/// What a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub rows: Vec<LedgerRow>,
    /// Pack document paths, parallel to `rows`
    pub pack_files: Vec<PathBuf>,
}

/// Run a batch stamped with the current time.
pub fn run_batch(
    catalog: &Catalog,
    config: &PackConfig,
    opts: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    run_batch_at(catalog, config, opts, Utc::now())
}

/// Run a batch with an explicit generation timestamp.
///
/// The timestamp is the one non-derived input to the output bytes, so
/// injecting it makes runs byte-for-byte reproducible: identical catalog,
/// config, seed, count, and timestamp always yield identical pack
/// documents and ledger.
pub fn run_batch_at(
    catalog: &Catalog,
    config: &PackConfig,
    opts: &BatchOptions,
    generated_at: DateTime<Utc>,
) -> Result<BatchSummary, BatchError> {
    fs::create_dir_all(&opts.out_dir)?;

    let stamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut summary = BatchSummary::default();
    let mut pack_id: u64 = 1;

    for (name, def) in &config.packs {
        let items_per_pack = opts
            .per_pack
            .or(def.items_per_pack)
            .or(config.items_per_pack)
            .unwrap_or(DEFAULT_ITEMS_PER_PACK);

        for index in 1..=opts.count {
            let seed = format!("{}-{}-{}", opts.base_seed, name, index);
            let items = compose_pack(catalog, def, &seed, items_per_pack);

            let doc = GeneratedPack {
                pack: name.clone(),
                generated_at: stamp.clone(),
                items,
                seed: seed.clone(),
            };
            let out_path = opts.out_dir.join(format!(
                "{}-{}-{}.json",
                sanitize_pack_name(name),
                opts.base_seed,
                index
            ));
            fs::write(&out_path, serde_json::to_string_pretty(&doc)?)?;

            summary.rows.push(LedgerRow {
                pack_id,
                pack_type: name.clone(),
                seed,
                items: doc.items.iter().map(|i| i.filename.clone()).collect(),
            });
            summary.pack_files.push(out_path);
            pack_id += 1;
        }
    }

    write_ledger(&opts.csv_path, &summary.rows)?;
    Ok(summary)
}

/// Write the ledger CSV: header line plus one row per pack, in
/// generation order.
pub fn write_ledger(path: &Path, rows: &[LedgerRow]) -> Result<(), BatchError> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(LEDGER_HEADER.to_string());
    lines.extend(rows.iter().map(LedgerRow::to_csv_line));
    fs::write(path, lines.join("\n"))?;
    Ok(())
}

/// Read a ledger CSV back into rows, skipping the header and any
/// malformed lines.
pub fn parse_ledger(path: &Path) -> Result<Vec<LedgerRow>, BatchError> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .skip(1)
        .filter_map(LedgerRow::parse)
        .collect())
}

/// Pack-type names become filename-safe by collapsing whitespace runs to
/// underscores.
pub fn sanitize_pack_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageItem, Rarity};
    use crate::compose::{GuaranteedSlot, PackDefinition};
    use chrono::TimeZone;
    use std::collections::{BTreeMap, HashMap, HashSet};

    fn item(name: &str, rarity: Rarity) -> ImageItem {
        ImageItem {
            filename: format!("{name}.png"),
            path: format!("/cat/{rarity}/{name}.png"),
            rarity,
        }
    }

    /// Catalog and config from the ledger worked example: 3 Common,
    /// 1 Rare; one pack type guaranteeing the Rare plus one Common.
    fn example_setup() -> (Catalog, PackConfig) {
        let catalog = Catalog::from_items(vec![
            item("c1", Rarity::Common),
            item("c2", Rarity::Common),
            item("c3", Rarity::Common),
            item("r1", Rarity::Rare),
        ]);
        let mut packs = BTreeMap::new();
        packs.insert(
            "TypeName".to_string(),
            PackDefinition {
                guaranteed: vec![GuaranteedSlot { rarity: Rarity::Rare, count: 1 }],
                distribution: HashMap::from([(Rarity::Common, 1.0)]),
                items_per_pack: Some(2),
            },
        );
        (
            catalog,
            PackConfig {
                items_per_pack: None,
                packs,
            },
        )
    }

    fn opts(dir: &Path, seed: &str, count: usize) -> BatchOptions {
        BatchOptions {
            out_dir: dir.join("packs"),
            csv_path: dir.join("packs.csv"),
            per_pack: None,
            count,
            base_seed: seed.to_string(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_worked_example_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, config) = example_setup();
        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "s", 1), fixed_time()).unwrap();

        assert_eq!(summary.rows.len(), 1);
        let row = &summary.rows[0];
        assert_eq!(row.pack_id, 1);
        assert_eq!(row.pack_type, "TypeName");
        assert_eq!(row.seed, "s-TypeName-1");
        assert_eq!(row.items.len(), 2);
        // guaranteed Rare first, then exactly one Common
        assert_eq!(row.items[0], "r1.png");
        assert!(["c1.png", "c2.png", "c3.png"].contains(&row.items[1].as_str()));

        let csv = fs::read_to_string(dir.path().join("packs.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(LEDGER_HEADER));
        assert_eq!(
            lines.next(),
            Some(format!("1,TypeName,s-TypeName-1,\"r1.png;{}\"", row.items[1]).as_str())
        );
    }

    #[test]
    fn test_two_runs_are_byte_identical() {
        let (catalog, config) = example_setup();
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();

        let a = run_batch_at(&catalog, &config, &opts(dir_a.path(), "bulk-seed", 3), fixed_time())
            .unwrap();
        let b = run_batch_at(&catalog, &config, &opts(dir_b.path(), "bulk-seed", 3), fixed_time())
            .unwrap();

        assert_eq!(a.rows, b.rows);
        assert_eq!(
            fs::read(dir_a.path().join("packs.csv")).unwrap(),
            fs::read(dir_b.path().join("packs.csv")).unwrap()
        );
        for (fa, fb) in a.pack_files.iter().zip(&b.pack_files) {
            assert_eq!(fs::read(fa).unwrap(), fs::read(fb).unwrap());
        }
    }

    #[test]
    fn test_pack_ids_are_batch_wide() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut config) = example_setup();
        // Second pack type; BTreeMap order puts "Alpha" before "TypeName"
        config
            .packs
            .insert("Alpha Pack".to_string(), PackDefinition::default());

        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "s", 2), fixed_time()).unwrap();

        let ids: Vec<u64> = summary.rows.iter().map(|r| r.pack_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(summary.rows[0].pack_type, "Alpha Pack");
        assert_eq!(summary.rows[2].pack_type, "TypeName");
    }

    #[test]
    fn test_pack_file_names_sanitize_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, mut config) = example_setup();
        let def = config.packs.remove("TypeName").unwrap();
        config.packs.insert("Gold  Pack".to_string(), def);

        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "s", 1), fixed_time()).unwrap();
        let file_name = summary.pack_files[0].file_name().unwrap().to_string_lossy();
        assert_eq!(file_name, "Gold_Pack-s-1.json");
    }

    #[test]
    fn test_pack_document_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, config) = example_setup();
        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "s", 1), fixed_time()).unwrap();

        let raw = fs::read_to_string(&summary.pack_files[0]).unwrap();
        let doc: GeneratedPack = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.pack, "TypeName");
        assert_eq!(doc.seed, "s-TypeName-1");
        assert_eq!(doc.generated_at, "2024-05-01T12:00:00.000Z");

        // ledger row items match the document's filenames, in order
        let filenames: Vec<String> = doc.items.iter().map(|i| i.filename.clone()).collect();
        assert_eq!(filenames, summary.rows[0].items);
    }

    #[test]
    fn test_every_row_has_unique_items() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, config) = example_setup();
        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "many", 5), fixed_time()).unwrap();

        for row in &summary.rows {
            let unique: HashSet<&String> = row.items.iter().collect();
            assert_eq!(unique.len(), row.items.len());
        }
    }

    #[test]
    fn test_empty_catalog_produces_empty_packs() {
        let dir = tempfile::tempdir().unwrap();
        let (_, config) = example_setup();
        let summary = run_batch_at(
            &Catalog::default(),
            &config,
            &opts(dir.path(), "s", 2),
            fixed_time(),
        )
        .unwrap();

        assert_eq!(summary.rows.len(), 2);
        assert!(summary.rows.iter().all(|r| r.items.is_empty()));
    }

    #[test]
    fn test_per_pack_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, config) = example_setup();
        let mut o = opts(dir.path(), "s", 1);
        o.per_pack = Some(4);

        let summary = run_batch_at(&catalog, &config, &o, fixed_time()).unwrap();
        // catalog only holds 4 items, so the override is reachable
        assert_eq!(summary.rows[0].items.len(), 4);
    }

    #[test]
    fn test_ledger_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, config) = example_setup();
        let summary =
            run_batch_at(&catalog, &config, &opts(dir.path(), "rt", 3), fixed_time()).unwrap();

        let parsed = parse_ledger(&dir.path().join("packs.csv")).unwrap();
        assert_eq!(parsed, summary.rows);
    }

    #[test]
    fn test_ledger_row_parse_rejects_garbage() {
        assert!(LedgerRow::parse("not a row").is_none());
        assert!(LedgerRow::parse("x,Type,seed,\"a.png\"").is_none());
        assert!(LedgerRow::parse("1,Type,seed,unquoted").is_none());

        let row = LedgerRow::parse("7,Type,seed-7,\"a.png;b.png\"").unwrap();
        assert_eq!(row.pack_id, 7);
        assert_eq!(row.items, vec!["a.png", "b.png"]);

        // empty pack ledger row
        let row = LedgerRow::parse("1,Type,seed,\"\"").unwrap();
        assert!(row.items.is_empty());
    }
}
