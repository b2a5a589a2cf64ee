use thiserror::Error;

/// Errors surfaced by editing operations.
///
/// Every variant is a validation failure: the operation that produced it
/// left the document untouched.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no image is loaded")]
    NoImageLoaded,

    #[error("a polygon needs at least 3 vertices, got {count}")]
    TooFewPolygonVertices { count: usize },

    #[error("text to stamp is empty")]
    EmptyText,

    #[error("crop region is empty")]
    EmptyCropRegion,

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no font available for text rendering")]
    FontUnavailable,

    #[error("failed to read image: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid editor config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
