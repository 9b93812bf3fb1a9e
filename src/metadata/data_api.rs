use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{MetadataSource, VideoMetadata};
use crate::resolve::VideoId;
use crate::{ExtractorError, Result};

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
}

/// Structured metadata source backed by the Data API v3 `videos` endpoint.
/// Requires an API key; the chain only registers it when one is configured.
pub struct DataApiSource {
    client: reqwest::Client,
    api_key: String,
}

impl DataApiSource {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl MetadataSource for DataApiSource {
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
        tracing::debug!("Querying Data API for {}", id);

        let response = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("part", "snippet"),
                ("id", id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: VideoListResponse = response
            .json()
            .await
            .context("Failed to parse Data API response")?;

        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ExtractorError::MetadataUnavailable(id.to_string()))?;

        Ok(VideoMetadata {
            title: item.snippet.title,
            channel: item.snippet.channel_title,
            url: id.watch_url(),
        })
    }

    fn source_name(&self) -> &'static str {
        "Data API"
    }
}
