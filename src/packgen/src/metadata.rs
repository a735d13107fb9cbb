//! Collection metadata generation.
//!
//! Emits one token-metadata JSON document per image file, merging a
//! shared template with optional pin (`filename -> CID`) and attribute
//! maps. The pin map comes from the content-addressed storage
//! collaborator; filenames are the join key throughout.

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize metadata document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Extensions considered collection artwork for metadata purposes
pub const METADATA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg"];

/// Placeholder left in templates until a CID is known
pub const CID_PLACEHOLDER: &str = "<CID>";
/// Placeholder for the per-token filename in templates
pub const FILENAME_PLACEHOLDER: &str = "<FILENAME>";

/// Optional inputs merged into every generated document.
#[derive(Debug, Clone, Default)]
pub struct MetadataInputs {
    /// Base document; per-token fields are filled in where absent
    pub template: Map<String, Value>,
    /// `filename` (or stem) -> pinned content identifier
    pub pins: HashMap<String, String>,
    /// `filename` (or stem) -> attributes array
    pub attributes: HashMap<String, Value>,
}

/// Generate one metadata document per image directly under `images_dir`
/// (non-recursive), sorted by filename so token ids are stable.
///
/// A missing images directory yields zero documents, not an error.
/// Returns the written paths.
pub fn generate_metadata(
    images_dir: &Path,
    out_dir: &Path,
    inputs: &MetadataInputs,
) -> Result<Vec<PathBuf>, MetadataError> {
    let images = list_images(images_dir)?;
    if images.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(images.len());

    for (idx, filename) in images.iter().enumerate() {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());
        let id = format!("{:04}", idx + 1);

        let mut doc = inputs.template.clone();
        doc.entry("name".to_string())
            .or_insert_with(|| json!(format!("Collectible #{id}")));
        doc.entry("description".to_string())
            .or_insert_with(|| json!("On-chain collectible."));

        let image = resolve_image(&doc, &inputs.pins, filename, &stem);
        doc.insert("image".to_string(), json!(image));

        let attributes = inputs
            .attributes
            .get(filename)
            .or_else(|| inputs.attributes.get(&stem))
            .cloned();
        match attributes {
            Some(attrs) => {
                doc.insert("attributes".to_string(), attrs);
            }
            None => {
                doc.entry("attributes".to_string()).or_insert_with(|| json!([]));
            }
        }

        let out_path = out_dir.join(format!("{stem}.json"));
        fs::write(&out_path, serde_json::to_string_pretty(&Value::Object(doc))?)?;
        written.push(out_path);
    }

    Ok(written)
}

/// Resolve the document's `image` field.
///
/// Preference order: an explicit pin for the filename (or stem), then a
/// template image with the CID placeholder substituted, then the
/// template's literal image, then a local relative path usable for
/// previews.
fn resolve_image(
    doc: &Map<String, Value>,
    pins: &HashMap<String, String>,
    filename: &str,
    stem: &str,
) -> String {
    if let Some(cid) = pins.get(filename).or_else(|| pins.get(stem)) {
        return format!("ipfs://{cid}");
    }

    if let Some(Value::String(template_image)) = doc.get("image") {
        if template_image.contains(CID_PLACEHOLDER) {
            return template_image
                .replace(CID_PLACEHOLDER, "REPLACE_CID")
                .replace(FILENAME_PLACEHOLDER, filename);
        }
        return template_image.clone();
    }

    format!("assets/images/{filename}")
}

fn list_images(images_dir: &Path) -> Result<Vec<String>, MetadataError> {
    if !images_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut images: Vec<String> = fs::read_dir(images_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| METADATA_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
                .unwrap_or(false)
        })
        .collect();
    images.sort();
    Ok(images)
}
