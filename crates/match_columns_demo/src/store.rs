// SPDX-License-Identifier: MIT OR Apache-2.0
//! File-backed key-value store: one JSON file per slot.

use match_columns::KeyValueStore;
use std::path::PathBuf;

/// Stores each slot as `<root>/<slot>.json`.
///
/// I/O failures are logged and swallowed: a failed read behaves like an
/// absent slot and a failed write like no write at all, so the widget keeps
/// working without storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store under an explicit root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under `<platform data dir>/<app>`, falling back to the
    /// temporary directory when the platform reports no data dir.
    pub fn in_data_dir(app: &str) -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(app))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read slot '{key}': {e}");
                }
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            tracing::warn!("Failed to create store directory {}: {e}", self.root.display());
            return;
        }
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            tracing::warn!("Failed to write slot '{key}': {e}");
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = std::fs::remove_file(self.path_for(key)) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove slot '{key}': {e}");
            }
        }
    }
}
