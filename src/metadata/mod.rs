use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::resolve::VideoId;
use crate::Result;

pub mod data_api;
pub mod oembed;

/// Title, channel, and watch URL for a video.
///
/// Either fully populated by a single source or replaced wholesale by
/// [`VideoMetadata::fallback`]; values from different sources are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub url: String,
}

impl VideoMetadata {
    /// Synthetic stand-in used when every source comes up empty
    pub fn fallback(id: &VideoId) -> Self {
        Self {
            title: id.to_string(),
            channel: "Unknown".to_string(),
            url: id.watch_url(),
        }
    }
}

/// Trait for looking up video metadata from a single source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up title and channel for a video
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata>;

    /// Name of this source, for logging
    fn source_name(&self) -> &'static str;
}

/// Ordered chain of metadata sources, tried in sequence until one succeeds.
///
/// A source succeeds when it returns metadata with a non-empty title; errors
/// and empty titles are absorbed and the next source is consulted. The chain
/// never fabricates values; an exhausted chain yields `None` and the caller
/// decides on defaults.
pub struct MetadataChain {
    sources: Vec<Box<dyn MetadataSource>>,
}

impl MetadataChain {
    /// Build the default chain: oEmbed scraping first, then the Data API
    /// when a key is configured
    pub fn new(client: &reqwest::Client, api_key: Option<String>) -> Self {
        let mut sources: Vec<Box<dyn MetadataSource>> =
            vec![Box::new(oembed::OembedSource::new(client.clone()))];

        if let Some(key) = api_key {
            sources.push(Box::new(data_api::DataApiSource::new(client.clone(), key)));
        } else {
            tracing::debug!("No API key configured; Data API metadata source disabled");
        }

        Self { sources }
    }

    /// Build a chain from an explicit source list
    pub fn with_sources(sources: Vec<Box<dyn MetadataSource>>) -> Self {
        Self { sources }
    }

    /// Try each source in order, short-circuiting on the first usable result
    pub async fn fetch(&self, id: &VideoId) -> Option<VideoMetadata> {
        for source in &self.sources {
            match source.fetch_metadata(id).await {
                Ok(metadata) if !metadata.title.is_empty() => {
                    tracing::debug!("Metadata for {} resolved via {}", id, source.source_name());
                    return Some(metadata);
                }
                Ok(_) => {
                    tracing::warn!(
                        "{} returned an empty title for {}; trying next source",
                        source.source_name(),
                        id
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "{} lookup failed for {}: {e:#}; trying next source",
                        source.source_name(),
                        id
                    );
                }
            }
        }
        None
    }
}
