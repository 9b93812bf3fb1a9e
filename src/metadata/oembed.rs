use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{MetadataSource, VideoMetadata};
use crate::resolve::VideoId;
use crate::Result;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
    author_name: String,
}

/// Keyless best-effort metadata source backed by the oEmbed endpoint
pub struct OembedSource {
    client: reqwest::Client,
}

impl OembedSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetadataSource for OembedSource {
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
        let watch_url = id.watch_url();
        tracing::debug!("Querying oEmbed for {}", id);

        let response = self
            .client
            .get(OEMBED_ENDPOINT)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;

        let body: OembedResponse = response
            .json()
            .await
            .context("Failed to parse oEmbed response")?;

        Ok(VideoMetadata {
            title: body.title,
            channel: body.author_name,
            url: watch_url,
        })
    }

    fn source_name(&self) -> &'static str {
        "oEmbed"
    }
}
