//! Bookmarks kept as a JSON array on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::types::Bookmark;
use vastra_core::{Error, Result};

/// Ordered bookmark list; positions are the public identifiers.
pub struct BookmarkStore {
    file: PathBuf,
    bookmarks: RwLock<Vec<Bookmark>>,
}

impl BookmarkStore {
    /// Load bookmarks from `file`. A missing file starts empty; an
    /// unreadable or malformed one is an error and is left untouched.
    pub fn new(file: &Path) -> Result<Self> {
        let bookmarks = load_bookmarks(file)?;
        info!("BookmarkStore: {} bookmarks loaded", bookmarks.len());

        Ok(Self {
            file: file.to_path_buf(),
            bookmarks: RwLock::new(bookmarks),
        })
    }

    pub fn list(&self) -> Vec<Bookmark> {
        self.bookmarks.read().clone()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.read().is_empty()
    }

    /// Append a bookmark and persist. Returns its index.
    pub fn add(&self, bookmark: Bookmark) -> Result<usize> {
        let mut bookmarks = self.bookmarks.write();
        bookmarks.push(bookmark);
        if let Err(e) = self.save(&bookmarks) {
            bookmarks.pop();
            return Err(e);
        }
        Ok(bookmarks.len() - 1)
    }

    /// Remove the bookmark at `index` and persist.
    pub fn delete(&self, index: usize) -> Result<Bookmark> {
        let mut bookmarks = self.bookmarks.write();
        if index >= bookmarks.len() {
            return Err(Error::NotFound("Bookmark not found".into()));
        }
        let removed = bookmarks.remove(index);
        if let Err(e) = self.save(&bookmarks) {
            bookmarks.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Write to a sibling temp file, then rename over the real one.
    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let data = serde_json::to_string_pretty(bookmarks)?;
        let tmp = self.file.with_extension("json.tmp");
        std::fs::write(&tmp, data)
            .and_then(|_| std::fs::rename(&tmp, &self.file))
            .map_err(|e| {
                warn!("Failed to save bookmarks: {}", e);
                let _ = std::fs::remove_file(&tmp);
                Error::Storage(e.to_string())
            })
    }
}

fn load_bookmarks(path: &Path) -> Result<Vec<Bookmark>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::Storage(format!(
                "Cannot read bookmarks file {}: {}",
                path.display(),
                e
            )))
        }
    };
    serde_json::from_str(&data).map_err(|e| {
        Error::Storage(format!(
            "Malformed bookmarks file {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(title: &str) -> Bookmark {
        Bookmark {
            title: title.into(),
            content: "Pastel linen is trending for summer".into(),
            category: "trends".into(),
            tags: vec!["linen".into()],
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(&dir.path().join("bookmarks.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(&dir.path().join("bookmarks.json")).unwrap();

        assert_eq!(store.add(bookmark("first")).unwrap(), 0);
        assert_eq!(store.add(bookmark("second")).unwrap(), 1);

        let removed = store.delete(0).unwrap();
        assert_eq!(removed.title, "first");
        assert_eq!(store.list()[0].title, "second");
    }

    #[test]
    fn test_delete_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(&dir.path().join("bookmarks.json")).unwrap();
        store.add(bookmark("only")).unwrap();

        assert!(matches!(store.delete(1), Err(Error::NotFound(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");
        {
            let store = BookmarkStore::new(&file).unwrap();
            store.add(bookmark("kept")).unwrap();
        }

        let reloaded = BookmarkStore::new(&file).unwrap();
        assert_eq!(reloaded.list(), vec![bookmark("kept")]);
    }

    #[test]
    fn test_tags_default_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");
        std::fs::write(
            &file,
            r#"[{"title": "t", "content": "c", "category": "general"}]"#,
        )
        .unwrap();

        let store = BookmarkStore::new(&file).unwrap();
        assert!(store.list()[0].tags.is_empty());
    }

    #[test]
    fn test_malformed_file_is_rejected_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");
        let broken = r#"[{"title": "A", "content": "c", "category": "general"},]"#;
        std::fs::write(&file, broken).unwrap();

        assert!(matches!(BookmarkStore::new(&file), Err(Error::Storage(_))));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), broken);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");
        let store = BookmarkStore::new(&file).unwrap();
        store.add(bookmark("kept")).unwrap();

        assert!(file.exists());
        assert!(!file.with_extension("json.tmp").exists());
    }
}
