//! Transcript Extractor - A Rust CLI tool for turning YouTube videos into Markdown reports
//!
//! This library resolves a video reference (bare ID or URL), fetches the transcript and
//! video metadata from remote providers, and persists a timestamped Markdown document
//! with clickable per-line timestamps and an optional Korean translation.

pub mod cli;
pub mod config;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod transcript;
pub mod translate;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use metadata::{MetadataChain, VideoMetadata};
pub use pipeline::ExtractionPipeline;
pub use resolve::VideoId;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the extractor
#[derive(thiserror::Error, Debug)]
pub enum ExtractorError {
    #[error("Invalid video reference: {0}")]
    InvalidReference(String),

    #[error("Transcript unavailable for {0}: {1}")]
    TranscriptUnavailable(String, String),

    #[error("No metadata source succeeded for {0}")]
    MetadataUnavailable(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Failed to persist report: {0}")]
    PersistenceFailed(String),
}
