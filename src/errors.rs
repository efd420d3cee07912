use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the corner mask pipeline.
///
/// Each variant carries the context of its domain (filesystem, image codec,
/// argument validation) so callers can report the failing file and step
/// without parsing strings.
#[derive(Error, Debug)]
pub enum CornerMaskError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing error: {operation} failed (file: {path:?})")]
    ImageProcessing {
        path: PathBuf,
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {field} {reason}")]
    Validation { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CornerMaskError>;

impl CornerMaskError {
    pub(crate) fn file_system(
        path: impl Into<PathBuf>,
        operation: &str,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            path: path.into(),
            operation: operation.to_string(),
            source,
        }
    }

    pub(crate) fn image_processing(
        path: impl Into<PathBuf>,
        operation: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ImageProcessing {
            path: path.into(),
            operation: operation.to_string(),
            source: Box::new(source),
        }
    }
}

/// Convert I/O errors to filesystem errors.
///
/// Fallback for call sites without path context; code that knows the path
/// should build [`CornerMaskError::FileSystem`] directly.
impl From<std::io::Error> for CornerMaskError {
    fn from(err: std::io::Error) -> Self {
        Self::file_system("unknown", "unknown", err)
    }
}

/// Convert image crate errors to image processing errors.
impl From<image::ImageError> for CornerMaskError {
    fn from(err: image::ImageError) -> Self {
        Self::image_processing("unknown", "image processing", err)
    }
}
