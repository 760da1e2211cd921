//! Error types for the vocabulary pipeline.

use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a run.
///
/// A document without chapter markers is not an error: segmentation falls back
/// to a single chapter and the caller logs a warning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file or image folder does not exist
    #[error("Input path does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    /// Output folder does not exist
    #[error("Output folder does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),

    /// Direct text extraction from a PDF failed
    #[error("Text extraction failed for {}: {message}", path.display())]
    Extraction {
        /// Source document
        path: PathBuf,
        /// Collaborator message
        message: String,
    },

    /// OCR or page rasterization failed (fatal for the run)
    #[error("OCR failed for {}: {message}", path.display())]
    Ocr {
        /// Page image or source document
        path: PathBuf,
        /// Collaborator message
        message: String,
    },

    /// Chapter marker pattern does not compile
    #[error("Invalid chapter marker pattern: {0}")]
    InvalidMarkerPattern(#[from] regex::Error),

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Renderer rejected the export
    #[error("Render error: {0}")]
    Render(String),

    /// Output destination could not be written
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Output file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
