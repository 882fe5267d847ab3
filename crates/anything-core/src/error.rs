use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Thumbnail error: {0}")]
    Thumbnail(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Index error: {0}")]
    Index(String),
}

pub type Result<T> = std::result::Result<T, Error>;
