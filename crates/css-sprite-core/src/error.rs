use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Source directory for group '{group}' is missing: {}", path.display())]
    SourceMissing { group: String, path: PathBuf },
    #[error("Output directory for group '{group}' is missing: {}", path.display())]
    OutputMissing { group: String, path: PathBuf },
    #[error("Nothing to compile for group '{group}'")]
    NothingToCompile { group: String },
    #[error("No decoder registered for extension '{0}'")]
    UnsupportedExtension(String),
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SpriteError>;
