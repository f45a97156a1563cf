use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeoError {
    #[error("Invalid video reference: {reason}")]
    InvalidInput { reason: String },

    #[error("Metadata extraction failed for {url}: {reason}")]
    MetadataFailed { url: String, reason: String },

    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("Model response violates the output schema: {reason}")]
    SchemaViolation { reason: String },

    #[error("Thumbnail rendering failed: {reason}")]
    RenderFailure { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeoError>;
