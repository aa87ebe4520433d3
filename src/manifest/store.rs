//! Manifest store - Write metadata.json

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

use crate::core::error::{SyncError, SyncResult};
use crate::manifest::meta::Manifest;

/// Indentation used for metadata.json
const INDENT: &[u8] = b"    ";

/// Serialize the manifest with four-space indentation
pub fn to_pretty_json(manifest: &Manifest, path: &Path) -> SyncResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    manifest
        .serialize(&mut serializer)
        .map_err(|e| SyncError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(buffer)
}

/// Write the manifest to `path`, replacing any existing file
pub fn write_manifest(path: &Path, manifest: &Manifest) -> SyncResult<()> {
    let json = to_pretty_json(manifest, path)?;
    fs::write(path, json).map_err(|e| SyncError::io("write manifest", path, e))?;
    tracing::debug!(
        "wrote manifest '{}' ({} names)",
        path.display(),
        manifest.number_of_games
    );
    Ok(())
}

/// Read a manifest back
#[cfg(test)]
pub fn read_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
