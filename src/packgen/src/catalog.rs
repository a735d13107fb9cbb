//! Image catalog scanning and rarity classification.
//!
//! Walks a directory tree of collection artwork and classifies every image
//! by the rarity directory it lives under. The resulting [`Catalog`] is an
//! immutable value built once per run and shared by every pack composition.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors from catalog scanning
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("images root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("failed to scan images root: {0}")]
    Io(#[from] std::io::Error),
}

/// File extensions treated as catalog images (case-insensitive)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg", "gif"];

/// Rarity tiers, in precedence order.
///
/// A file nested under more than one matching directory name resolves to
/// the first tier in this order. `Unknown` is assigned when no ancestor
/// directory names a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Unknown,
}

impl Rarity {
    /// All tiers, in precedence order
    pub const ALL: &'static [Rarity] = &[
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Unknown,
    ];

    /// Tiers that can be named by a catalog directory
    pub const NAMED: &'static [Rarity] = &[
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Display label, matching the directory names used in catalogs
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Unknown => "Unknown",
        }
    }

    /// Look up a tier by directory name (exact match)
    pub fn from_dir_name(name: &str) -> Option<Rarity> {
        Rarity::NAMED.iter().copied().find(|r| r.name() == name)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog image, classified by rarity. Immutable once scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub filename: String,
    pub path: String,
    pub rarity: Rarity,
}

/// The scanned image catalog with a per-rarity index.
///
/// Items are kept in discovery order (lexicographic walk, so two scans of
/// the same tree see the same order). The catalog is read-only during pack
/// generation; per-pack "consumed" state lives in the sampler.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ImageItem>,
    by_rarity: HashMap<Rarity, Vec<usize>>,
}

impl Catalog {
    /// Scan a directory tree for image files.
    ///
    /// Rarity is inferred from the first ancestor directory whose name
    /// matches a tier, checked in [`Rarity::NAMED`] precedence order.
    pub fn scan(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::RootNotFound(root.to_path_buf()));
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !is_image(path) {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            items.push(ImageItem {
                filename,
                rarity: classify(path),
                path: path.to_string_lossy().into_owned(),
            });
        }

        Ok(Self::from_items(items))
    }

    /// Build a catalog from already-classified items (test fixtures,
    /// pre-scanned manifests)
    pub fn from_items(items: Vec<ImageItem>) -> Self {
        let mut by_rarity: HashMap<Rarity, Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            by_rarity.entry(item.rarity).or_default().push(i);
        }
        Self { items, by_rarity }
    }

    /// All items in discovery order
    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one rarity, in discovery order
    pub fn pool(&self, rarity: Rarity) -> impl Iterator<Item = &ImageItem> + '_ {
        self.by_rarity
            .get(&rarity)
            .into_iter()
            .flatten()
            .map(move |&i| &self.items[i])
    }

    /// Number of items of one rarity
    pub fn pool_len(&self, rarity: Rarity) -> usize {
        self.by_rarity.get(&rarity).map_or(0, Vec::len)
    }

    /// Per-rarity counts for every tier, in precedence order
    pub fn rarity_counts(&self) -> Vec<(Rarity, usize)> {
        Rarity::ALL
            .iter()
            .map(|&r| (r, self.pool_len(r)))
            .collect()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn classify(path: &Path) -> Rarity {
    let components: Vec<&str> = path.iter().filter_map(|c| c.to_str()).collect();
    for &rarity in Rarity::NAMED {
        if components.iter().any(|c| *c == rarity.name()) {
            return rarity;
        }
    }
    Rarity::Unknown
}
