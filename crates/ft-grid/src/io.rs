//! Snapshot file loading.

use std::path::Path;

use crate::error::{GridError, GridResult};
use crate::snapshot::{Snapshot, SnapshotFile};

/// Parse one snapshot or a `snapshots:` list from YAML.
pub fn snapshots_from_yaml_str(content: &str) -> GridResult<Vec<Snapshot>> {
    let file: SnapshotFile = serde_yaml::from_str(content)?;
    checked(file)
}

/// Parse one snapshot or a `snapshots` list from JSON.
pub fn snapshots_from_json_str(content: &str) -> GridResult<Vec<Snapshot>> {
    let file: SnapshotFile = serde_json::from_str(content)?;
    checked(file)
}

/// Load snapshots from a file. `.json` files are read as JSON, everything
/// else as YAML.
pub fn load_snapshots(path: &Path) -> GridResult<Vec<Snapshot>> {
    let content = std::fs::read_to_string(path).map_err(|e| GridError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        snapshots_from_json_str(&content)
    } else {
        snapshots_from_yaml_str(&content)
    }
}

fn checked(file: SnapshotFile) -> GridResult<Vec<Snapshot>> {
    let snapshots = file.into_snapshots();
    for snapshot in &snapshots {
        snapshot.validate_structure()?;
    }
    Ok(snapshots)
}
