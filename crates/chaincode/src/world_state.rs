//! World state persisted between harness runs
//!
//! The file is one JSON object mapping each key to its hex-encoded value.

use simpleapp_shim::MemoryStub;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateFileError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Value of key \"{key}\" is not valid hex: {source}")]
    Hex {
        key: String,
        #[source]
        source: hex::FromHexError,
    },
}

/// JSON file holding the committed world state
#[derive(Debug, Clone)]
pub struct WorldStateFile {
    path: PathBuf,
}

impl WorldStateFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved state into a fresh stub. A missing file is an empty ledger.
    pub fn load(&self) -> Result<MemoryStub, StateFileError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No state file, starting empty");
            return Ok(MemoryStub::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        let encoded: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|source| StateFileError::Json {
                path: self.path.clone(),
                source,
            })?;

        let mut state = BTreeMap::new();
        for (key, value) in encoded {
            let bytes = hex::decode(&value).map_err(|source| StateFileError::Hex {
                key: key.clone(),
                source,
            })?;
            state.insert(key, bytes);
        }

        tracing::debug!(path = %self.path.display(), keys = state.len(), "State loaded");
        Ok(MemoryStub::with_state(state))
    }

    /// Overwrite the file with the committed state of `stub`
    pub fn save(&self, stub: &MemoryStub) -> Result<(), StateFileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }

        let encoded: BTreeMap<&str, String> = stub
            .state()
            .iter()
            .map(|(key, value)| (key.as_str(), hex::encode(value)))
            .collect();
        let json = serde_json::to_string_pretty(&encoded).map_err(|source| StateFileError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| self.io(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io(source))?;

        tracing::debug!(path = %self.path.display(), keys = encoded.len(), "State saved");
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StateFileError {
        StateFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = TempDir::new().unwrap();
        let file = WorldStateFile::new(dir.path().join("state.json"));

        let stub = file.load().unwrap();
        assert!(stub.state().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let file = WorldStateFile::new(dir.path().join("nested/state.json"));

        let mut state = BTreeMap::new();
        state.insert("AccountTable:bob:".to_string(), b"{\"Balance\":1}".to_vec());
        state.insert("ConfigTable:Admin:".to_string(), vec![0x00, 0xff]);
        file.save(&MemoryStub::with_state(state.clone())).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\"ConfigTable:Admin:\": \"00ff\""));

        let loaded = file.load().unwrap();
        assert_eq!(loaded.state(), &state);
    }

    #[test]
    fn test_corrupt_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let file = WorldStateFile::new(&path);

        fs::write(&path, "not json").unwrap();
        assert!(matches!(file.load(), Err(StateFileError::Json { .. })));

        fs::write(&path, r#"{"k": "zz"}"#).unwrap();
        assert!(matches!(file.load(), Err(StateFileError::Hex { key, .. }) if key == "k"));
    }
}
