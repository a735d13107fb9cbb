//! CLI argument definitions for packgen
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packgen")]
#[command(about = "Deterministic NFT pack generation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate packs in bulk and write the batch ledger
    #[command(visible_alias = "g")]
    Generate {
        /// Pack config JSON
        #[arg(long, default_value = "metadata/pack-config.json")]
        config: PathBuf,

        /// Root images folder
        #[arg(long, default_value = "assets/images/NFT")]
        images_root: PathBuf,

        /// Output directory for generated pack JSONs
        #[arg(long, default_value = "metadata/generated/packs")]
        out: PathBuf,

        /// CSV ledger output path
        #[arg(long, default_value = "metadata/generated/packs.csv")]
        csv: PathBuf,

        /// Items per pack (overrides the pack config)
        #[arg(long)]
        per_pack: Option<usize>,

        /// Number of packs to generate per pack type
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// Base seed for deterministic generation; a random seed is
        /// synthesized (and printed) when omitted
        #[arg(long)]
        seed: Option<String>,
    },

    /// Scan an image catalog and report per-rarity counts
    #[command(visible_alias = "s")]
    Scan {
        /// Root images folder
        #[arg(long, default_value = "assets/images/NFT")]
        images_root: PathBuf,
    },

    /// Join the ledger against generated pack documents into a mint log
    #[command(name = "pack-log", visible_alias = "l")]
    PackLog {
        /// CSV ledger produced by generate
        #[arg(long, default_value = "metadata/generated/packs.csv")]
        csv: PathBuf,

        /// Directory holding the generated pack JSONs
        #[arg(long, default_value = "metadata/generated/packs")]
        packs_dir: PathBuf,

        /// Pack log output path
        #[arg(long, default_value = "metadata/generated/pack-log.json")]
        out: PathBuf,
    },

    /// Generate per-token metadata documents from an images directory
    #[command(visible_alias = "m")]
    Metadata {
        /// Images directory (non-recursive)
        #[arg(long, default_value = "assets/images")]
        images: PathBuf,

        /// Output metadata directory
        #[arg(long, default_value = "metadata/generated")]
        out: PathBuf,

        /// Pins JSON mapping filename -> CID
        #[arg(long)]
        pins: Option<PathBuf>,

        /// Metadata template JSON to merge into every document
        #[arg(long)]
        template: Option<PathBuf>,

        /// Attributes mapping JSON (filename -> attributes array)
        #[arg(long)]
        attributes: Option<PathBuf>,
    },
}
