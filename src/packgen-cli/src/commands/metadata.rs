//! Metadata generation command handler

use anyhow::{Context, Result};
use packgen::{generate_metadata, MetadataInputs};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Handle the metadata command
pub fn handle(
    images_dir: &Path,
    out_dir: &Path,
    pins: Option<&Path>,
    template: Option<&Path>,
    attributes: Option<&Path>,
) -> Result<()> {
    let mut inputs = MetadataInputs::default();

    // The auxiliary inputs are all optional; a missing or unparseable
    // file is warned about and skipped, never fatal.
    if let Some(Value::Object(map)) = template.and_then(load_optional_json) {
        inputs.template = map;
    }
    if let Some(value) = pins.and_then(load_optional_json) {
        match serde_json::from_value::<HashMap<String, String>>(value) {
            Ok(map) => inputs.pins = map,
            Err(_) => eprintln!("Pins file is not a filename -> CID map, ignoring"),
        }
    }
    if let Some(Value::Object(map)) = attributes.and_then(load_optional_json) {
        inputs.attributes = map.into_iter().collect();
    }

    let written = generate_metadata(images_dir, out_dir, &inputs)
        .with_context(|| format!("Failed to generate metadata into {}", out_dir.display()))?;

    println!("Generated {} metadata files to {}", written.len(), out_dir.display());
    Ok(())
}

fn load_optional_json(path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Could not parse {}, ignoring", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_optional_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_optional_json(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn test_load_optional_json_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{broken").unwrap();
        assert!(load_optional_json(&path).is_none());
    }

    #[test]
    fn test_handle_with_all_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("a.png"), b"").unwrap();

        let pins = dir.path().join("pins.json");
        fs::write(&pins, r#"{"a.png": "QmAAA"}"#).unwrap();
        let out = dir.path().join("out");

        handle(&images, &out, Some(&pins), None, None).unwrap();

        let doc = fs::read_to_string(out.join("a.json")).unwrap();
        assert!(doc.contains("ipfs://QmAAA"));
    }
}
