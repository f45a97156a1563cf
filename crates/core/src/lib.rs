//! Tubeboost Core Library
//!
//! Turns a video URL's metadata and transcript into a schema-valid SEO plan
//! (tags, description, timestamps, ranked titles, thumbnail concepts) using
//! a remote or locally hosted language model, with a deterministic fallback
//! result on any generation failure and a local thumbnail preview renderer.

pub mod backend;
pub mod context;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod format;
pub mod prompt;
pub mod repair;
pub mod thumbnail;
pub mod types;

// Re-export commonly used items at crate root
pub use backend::{Backend, BackendConfig};
pub use context::{TRUNCATION_MARKER, build_context};
pub use engine::{generate, generate_with_config, try_generate, try_generate_with_config};
pub use error::{Result, SeoError};
pub use extract::{extract_metadata, extract_video_id, platform_for_url};
pub use fallback::fallback;
pub use format::{format_result_readable, format_timestamp};
pub use repair::{TAG_COUNT, repair_tags};
pub use thumbnail::{platform_image_size, render_preview, request_remote_thumbnail};
pub use types::{
    AnalysisResult, SeoBundle, ThumbnailConcept, ThumbnailSet, TimestampEntry, TitleCandidate,
    VideoContext,
};
