use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/anything)
    pub config: PathBuf,

    /// Data directory (~/.local/share/anything)
    pub data: PathBuf,

    /// Cache directory (~/.cache/anything)
    pub cache: PathBuf,

    /// Launcher config file path
    pub config_file: PathBuf,

    /// User settings shared with the indexer
    pub settings_file: PathBuf,

    /// Cached file index
    pub index_cache: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the system's project directories cannot be determined.
    pub fn new() -> Result<Self> {
        let project = ProjectDirs::from("", "", "anything")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();
        let cache = project.cache_dir().to_path_buf();

        Ok(Self {
            config_file: config.join("config.json"),
            settings_file: config.join("settings.json"),
            index_cache: cache.join("file-index.json"),
            config,
            data,
            cache,
        })
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            settings_file: base.join("settings.json"),
            index_cache: base.join("file-index.json"),
            config: base.clone(),
            data: base.clone(),
            cache: base,
        }
    }

    /// Ensure all directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.data)?;
        std::fs::create_dir_all(&self.cache)?;
        Ok(())
    }
}
