//! File name index built by walking the configured roots.

use crate::{Error, Result, extension_of};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub path: String,
    pub name: String,
    /// Lowercase, with leading dot
    pub extension: String,
}

impl IndexedFile {
    fn from_entry(entry: &DirEntry) -> Self {
        let path = entry.path().to_string_lossy().into_owned();
        Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            extension: extension_of(&path),
            path,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileIndex {
    files: Vec<IndexedFile>,
}

impl FileIndex {
    /// Walk every root, skipping hidden directories and any directory whose
    /// name is in `ignored`. `progress` is called after each root with
    /// (roots done, total roots, root).
    pub fn build(
        roots: &[PathBuf],
        ignored: &[String],
        max_depth: usize,
        mut progress: impl FnMut(usize, usize, &Path),
    ) -> Self {
        let ignored: HashSet<&str> = ignored.iter().map(String::as_str).collect();
        let mut files = Vec::new();

        for (done, root) in roots.iter().enumerate() {
            if !root.is_dir() {
                warn!("Index root {} is not a directory", root.display());
                progress(done + 1, roots.len(), root);
                continue;
            }

            let before = files.len();
            let walker = WalkDir::new(root)
                .max_depth(max_depth)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, &ignored));

            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        files.push(IndexedFile::from_entry(&entry));
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Skipping unreadable entry: {e}"),
                }
            }

            let indexed = files.len() - before;
            debug!("Indexed {indexed} files under {}", root.display());
            progress(done + 1, roots.len(), root);
        }

        info!("File index built: {} files", files.len());
        Self { files }
    }

    /// Load a previously saved index.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Index(format!("no index at {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the index for the next start.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    #[must_use]
    pub fn files(&self) -> &[IndexedFile] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_skipped(entry: &DirEntry, ignored: &HashSet<&str>) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || ignored.contains(name.as_ref())
}
