//! Local file store for product images.
//!
//! Images are written under a single directory with generated, collision-free
//! names. The store never overwrites: every upload gets a fresh UUID name.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Saves and removes image files on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    /// Produce a unique stored filename with the given extension,
    /// e.g. `550e8400-e29b-41d4-a716-446655440000.png`.
    pub fn generate_name(&self, ext: &str) -> String {
        format!("{}.{ext}", uuid::Uuid::new_v4())
    }

    /// Write `bytes` as `name` inside `dir`, creating the directory first if
    /// it does not exist. Returns the full path of the written file.
    pub async fn save(&self, bytes: &[u8], name: &str, dir: &Path) -> Result<PathBuf, CoreError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CoreError::Storage(format!("creating {}: {e}", dir.display())))?;

        let path = dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("writing {}: {e}", path.display())))?;
        Ok(path)
    }

    /// Remove the file at `path`. A missing file is an error: callers only
    /// delete names they previously stored.
    pub async fn delete(&self, path: &Path) -> Result<(), CoreError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| CoreError::Storage(format!("removing {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_unique_and_keep_extension() {
        let store = FileStore::new();
        let a = store.generate_name("png");
        let b = store.generate_name("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn save_creates_directory_and_writes_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("images");
        let store = FileStore::new();

        let path = store.save(b"fake-png", "x.png", &dir).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"fake-png");
        assert_eq!(path, dir.join("x.png"));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new();

        let path = store.save(b"bytes", "y.jpg", tmp.path()).await.unwrap();
        store.delete(&path).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new();

        let err = store
            .delete(&tmp.path().join("never-stored.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
