//! JSON-file store of previously delivered problem identifiers.
//!
//! The record is a sorted, pretty-printed JSON array of integers so it
//! stays diffable in version control. Semantically it is a set: it only
//! ever grows, and this application never prunes it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Store for the set of problem identifiers already sent in prior runs.
pub struct UsedProblemStore {
    path: PathBuf,
}

impl UsedProblemStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the set of already-sent problem identifiers.
    ///
    /// A missing or unparsable file means a fresh start, never an error.
    pub async fn load(&self) -> HashSet<u64> {
        match self.try_load().await {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!(
                    "Could not read used problems from {:?}: {}. Starting with an empty set.",
                    self.path,
                    e
                );
                HashSet::new()
            }
        }
    }

    /// Inner loader with explicit errors, collapsed to empty in `load`.
    async fn try_load(&self) -> Result<HashSet<u64>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let ids: Vec<u64> = serde_json::from_slice(&bytes)?;
        Ok(ids.into_iter().collect())
    }

    /// Persist the set as a sorted JSON array.
    ///
    /// Unlike `load`, a write failure is fatal: losing this record would
    /// make the next run re-offer already-sent problems.
    pub async fn save(&self, ids: &HashSet<u64>) -> Result<()> {
        let mut sorted: Vec<u64> = ids.iter().copied().collect();
        sorted.sort_unstable();

        let bytes = serde_json::to_vec_pretty(&sorted)?;
        self.write_atomic(&bytes).await
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_in(tmp: &TempDir) -> UsedProblemStore {
        UsedProblemStore::new(tmp.path().join("used_problems.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        std::fs::write(store.path(), b"{not json").unwrap();
        assert!(store.load().await.is_empty());

        std::fs::write(store.path(), br#"["strings", "not", "ints"]"#).unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let ids: HashSet<u64> = [1000, 2557, 31415].into_iter().collect();
        store.save(&ids).await.unwrap();

        assert_eq!(store.load().await, ids);
    }

    #[tokio::test]
    async fn save_load_save_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let ids: HashSet<u64> = (1..50).map(|n| n * 37).collect();
        store.save(&ids).await.unwrap();
        let first = std::fs::read(store.path()).unwrap();

        let reloaded = store.load().await;
        store.save(&reloaded).await.unwrap();
        let second = std::fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn save_writes_sorted_ascending() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let ids: HashSet<u64> = [31415, 1000, 2557].into_iter().collect();
        store.save(&ids).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        let on_disk: Vec<u64> = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk, vec![1000, 2557, 31415]);
    }
}
