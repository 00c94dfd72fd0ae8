//! JSON file-based favorites slot.
//!
//! This module persists the favorites sequence as a plain JSON array in a
//! single file, using atomic writes (write-to-temp + rename) so the slot is
//! never left half-written after a crash. Reads are forgiving: a missing,
//! unreadable, or corrupt file loads as an empty sequence.

use crate::domain::{BibliofindError, FavoriteRecord, Result};
use crate::storage::backend::FavoriteStore;
use std::path::PathBuf;

/// JSON file storage for the favorites slot.
///
/// The file holds the serialized favorites sequence verbatim; ordering in
/// the file is the in-memory ordering (most recently favorited first).
pub struct JsonFavorites {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonFavorites {
    /// Creates a favorites slot backed by the given file.
    ///
    /// Parent directories are created eagerly; the file itself is created on
    /// first save.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing favorites storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }
}

impl FavoriteStore for JsonFavorites {
    fn load_favorites(&self) -> Vec<FavoriteRecord> {
        let _span = tracing::debug_span!("json_load_favorites").entered();

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(error = %e, "favorites slot absent or unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<FavoriteRecord>>(&contents) {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "favorites loaded");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "favorites slot corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn save_favorites(&mut self, favorites: &[FavoriteRecord]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_favorites", count = favorites.len()).entered();

        let json = serde_json::to_string(favorites)
            .map_err(|e| BibliofindError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("favorites saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(key: &str, title: &str) -> FavoriteRecord {
        FavoriteRecord {
            key: key.to_string(),
            title: title.to_string(),
            author_name: None,
            first_publish_year: None,
            cover_i: None,
        }
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFavorites::new(dir.path().join("favorites.json")).expect("store");
        assert!(store.load_favorites().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{not valid json").expect("write");

        let store = JsonFavorites::new(path).expect("store");
        assert!(store.load_favorites().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonFavorites::new(dir.path().join("favorites.json")).expect("store");

        let favorites = vec![favorite("/works/OL2W", "Second"), favorite("/works/OL1W", "First")];
        store.save_favorites(&favorites).expect("save");

        assert_eq!(store.load_favorites(), favorites);
    }

    #[test]
    fn save_overwrites_prior_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonFavorites::new(dir.path().join("favorites.json")).expect("store");

        store
            .save_favorites(&[favorite("/works/OL1W", "First"), favorite("OL9M", "Other")])
            .expect("save");
        store
            .save_favorites(&[favorite("/works/OL2W", "Second")])
            .expect("save");

        let loaded = store.load_favorites();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].key, "/works/OL2W");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("data").join("bibliofind").join("favorites.json");

        let mut store = JsonFavorites::new(nested).expect("store");
        store.save_favorites(&[favorite("k", "t")]).expect("save");
        assert_eq!(store.load_favorites().len(), 1);
    }
}
