// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file helpers shared by the stores.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tok_core::TokError;
use tracing::{debug, warn};

/// Read and parse `path`.
///
/// A missing file is `None`. An unreadable or malformed file is logged and
/// also treated as `None`, so a damaged record never stops the caller.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no record on disk");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read record, ignoring it");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed record, ignoring it");
            None
        }
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
///
/// The data is written to a temporary file in the same directory, synced,
/// then renamed over the target. Parent directories are created as needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), TokError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .map_err(|e| TokError::storage(format!("create directory {}", dir.display()), e))?;

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| TokError::storage(format!("serialize {}", path.display()), e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| TokError::storage(format!("create temp file in {}", dir.display()), e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| TokError::storage(format!("write {}", path.display()), e))?;
    tmp.persist(path)
        .map_err(|e| TokError::storage(format!("replace {}", path.display()), e.error))?;

    debug!(path = %path.display(), bytes = json.len(), "record written");
    Ok(())
}
