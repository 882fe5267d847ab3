//! Default local search collaborator: a walked file name index, fuzzy
//! ranking and image thumbnails. Hosts that have a better backend can
//! ignore this module and answer [`crate::HostBridge::search`] themselves.

mod fuzzy;
mod index;
pub mod thumbnail;

pub use fuzzy::{FuzzySearcher, matches_settings};
pub use index::{FileIndex, IndexedFile};

use crate::config::SearchConfig;
use crate::{Error, ImageData, ProgressKind, ProgressUpdate, Result, SearchResult};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// File search over an in-memory index. Blocking work runs on the tokio
/// blocking pool.
#[derive(Clone)]
pub struct LocalBackend {
    index: Arc<RwLock<FileIndex>>,
    config: SearchConfig,
    cache_path: Option<PathBuf>,
}

impl LocalBackend {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            index: Arc::new(RwLock::new(FileIndex::default())),
            config,
            cache_path: None,
        }
    }

    /// Persist the index at `path` and start from the copy saved there, if any.
    #[must_use]
    pub fn with_cache(mut self, path: PathBuf) -> Self {
        match FileIndex::load(&path) {
            Ok(index) => {
                info!("Loaded {} indexed files from cache", index.len());
                self.index = Arc::new(RwLock::new(index));
            }
            Err(e) => warn!("No usable index cache: {e}"),
        }
        self.cache_path = Some(path);
        self
    }

    #[must_use]
    pub fn indexed_files(&self) -> usize {
        self.index.read().map_or(0, |index| index.len())
    }

    /// Search file names.
    ///
    /// # Errors
    ///
    /// Returns an error if the search task fails.
    pub async fn search(&self, query: String) -> Result<Vec<SearchResult>> {
        let index = Arc::clone(&self.index);
        let limit = self.config.max_results;
        tokio::task::spawn_blocking(move || {
            let index = index
                .read()
                .map_err(|_| Error::Search("index lock poisoned".into()))?;
            Ok(FuzzySearcher::new(limit).search(&query, index.files()))
        })
        .await
        .map_err(|e| Error::Search(e.to_string()))?
    }

    /// Generate a thumbnail for an image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded.
    pub async fn thumbnail(&self, path: String) -> Result<Option<ImageData>> {
        tokio::task::spawn_blocking(move || thumbnail::generate(path.as_ref()))
            .await
            .map_err(|e| Error::Thumbnail(e.to_string()))?
    }

    /// Re-walk the configured roots, reporting indexing progress through
    /// `progress`. Returns the number of indexed files.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk task fails or the index cannot be stored.
    pub async fn rebuild<F>(&self, ignored: Vec<String>, progress: F) -> Result<usize>
    where
        F: Fn(ProgressUpdate) + Send + 'static,
    {
        let roots = self.config.roots.clone();
        let max_depth = self.config.max_depth;
        let cache_path = self.cache_path.clone();
        let slot = Arc::clone(&self.index);

        tokio::task::spawn_blocking(move || {
            let started = ProgressUpdate::new(ProgressKind::Indexing, 0, "Scanning files");
            progress(started);

            let index = FileIndex::build(&roots, &ignored, max_depth, |done, total, root| {
                let percent = i32::try_from(done * 100 / total.max(1)).unwrap_or(100);
                progress(ProgressUpdate::new(
                    ProgressKind::Indexing,
                    percent,
                    format!("Scanned {}", root.display()),
                ));
            });

            if let Some(path) = &cache_path
                && let Err(e) = index.save(path)
            {
                warn!("Failed to save index cache: {e}");
            }

            let count = index.len();
            *slot
                .write()
                .map_err(|_| Error::Index("index lock poisoned".into()))? = index;

            progress(ProgressUpdate::new(
                ProgressKind::Indexing,
                100,
                format!("Indexed {count} files"),
            ));
            Ok(count)
        })
        .await
        .map_err(|e| Error::Index(e.to_string()))?
    }
}
