// src/session.rs
// =============================================================================
// Session state, in memory and on disk.
//
// In memory (Session):
// - the repository currently shown, if any
// - a generation counter; every root load and every reset bumps it, and a
//   response issued under an older generation is thrown away on arrival
//
// On disk (SessionStore):
// - one JSON file holding the last repository URL the user loaded
// - read on startup to pre-fill the input, removed on reset
//
// Rust concepts:
// - serde derive: the file format is just the struct
// - anyhow::Context: file errors say which file was involved
// =============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::github::RepositoryReference;

/// The in-memory session owned by the app
#[derive(Debug, Default)]
pub struct Session {
    reference: Option<RepositoryReference>,
    generation: u64,
}

impl Session {
    pub fn reference(&self) -> Option<&RepositoryReference> {
        self.reference.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Makes `reference` the active repository and returns the new generation
    pub fn start(&mut self, reference: RepositoryReference) -> u64 {
        self.generation += 1;
        self.reference = Some(reference);
        self.generation
    }

    /// Drops the active repository; everything in flight becomes stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.reference = None;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// What survives a restart
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub last_repository_url: Option<String>,
}

/// Reads and writes [`SessionState`] at a fixed path
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved state. A missing file is an empty state; a file that
    /// cannot be parsed is logged and treated as empty too.
    pub fn load(&self) -> Result<SessionState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionState::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                Ok(SessionState::default())
            }
        }
    }

    /// Remembers `url` as the last repository loaded
    pub fn save_url(&self, url: &str) -> Result<()> {
        self.save(&SessionState {
            last_repository_url: Some(url.to_string()),
        })
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Removes the saved state; already gone counts as success
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().unwrap(), SessionState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save_url("https://github.com/octocat/hello-world")
            .unwrap();

        let state = store.load().unwrap();
        assert_eq!(
            state.last_repository_url.as_deref(),
            Some("https://github.com/octocat/hello-world")
        );
    }

    #[test]
    fn test_clear_removes_state_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_url("https://github.com/a/b").unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap().last_repository_url, None);
    }

    #[test]
    fn test_corrupt_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "not json").unwrap();

        assert_eq!(store.load().unwrap(), SessionState::default());
    }

    #[test]
    fn test_generation_advances_on_start_and_reset() {
        let mut session = Session::default();
        let first = session.start(RepositoryReference {
            owner: "octocat".to_string(),
            name: "hello-world".to_string(),
        });
        assert!(session.is_current(first));

        session.reset();
        assert!(!session.is_current(first));
        assert!(session.reference().is_none());
    }
}
