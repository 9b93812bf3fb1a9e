use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{TranscriptEntry, TranscriptSource};
use crate::resolve::VideoId;
use crate::{ExtractorError, Result};

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";

// The Android client gets caption track URLs without the throttling
// applied to the web client.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "19.09.37";

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct TracklistRenderer {
    #[serde(default, rename = "captionTracks")]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Transcript provider backed by the InnerTube `player` endpoint
pub struct InnerTubeSource {
    client: reqwest::Client,
}

impl InnerTubeSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn list_caption_tracks(&self, id: &VideoId) -> Result<Vec<CaptionTrack>> {
        tracing::debug!("Listing caption tracks for {}", id);

        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": id.as_str(),
        });

        let response = self
            .client
            .post(PLAYER_ENDPOINT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let player: PlayerResponse = response
            .json()
            .await
            .context("Failed to parse player response")?;

        Ok(player
            .captions
            .and_then(|c| c.renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default())
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptEntry>> {
        tracing::debug!("Fetching {} caption track", track.language_code);

        let url = format!("{}&fmt=json3", track.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        let transcript: Json3Transcript = response
            .json()
            .await
            .context("Failed to parse caption track")?;

        Ok(events_to_entries(transcript.events))
    }
}

/// Map json3 caption events to transcript entries, dropping textless events
fn events_to_entries(events: Vec<Json3Event>) -> Vec<TranscriptEntry> {
    events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ")
                .trim()
                .to_string();

            if text.is_empty() {
                return None;
            }

            Some(TranscriptEntry {
                start: event.t_start_ms as f64 / 1000.0,
                text,
            })
        })
        .collect()
}

/// Pick the first track matching the preference order, falling back to the
/// first available track of any language.
fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    for lang in languages {
        if let Some(track) = tracks.iter().find(|t| {
            t.language_code == *lang || t.language_code.starts_with(&format!("{}-", lang))
        }) {
            return Some(track);
        }
    }
    tracks.first()
}

/// Error for a video with no caption tracks at all. A malformed ID that fell
/// through the resolver also lands here; name it as such.
fn no_tracks_error(id: &VideoId) -> anyhow::Error {
    if id.looks_valid() {
        anyhow::anyhow!("No caption tracks available for {}", id)
    } else {
        ExtractorError::InvalidReference(id.to_string()).into()
    }
}

#[async_trait]
impl TranscriptSource for InnerTubeSource {
    async fn fetch_transcript(
        &self,
        id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<TranscriptEntry>> {
        let tracks = self.list_caption_tracks(id).await?;

        let track = select_track(&tracks, languages).ok_or_else(|| no_tracks_error(id))?;

        self.fetch_track(track).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.invalid/caption/{}", lang),
            language_code: lang.to_string(),
        }
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_track_prefers_language_order() {
        let tracks = vec![track("ko"), track("en")];
        let selected = select_track(&tracks, &langs(&["en", "ko"])).unwrap();
        assert_eq!(selected.language_code, "en");
    }

    #[test]
    fn test_select_track_matches_regional_variant() {
        let tracks = vec![track("en-US")];
        let selected = select_track(&tracks, &langs(&["en"])).unwrap();
        assert_eq!(selected.language_code, "en-US");
    }

    #[test]
    fn test_select_track_falls_back_to_first_available() {
        let tracks = vec![track("de"), track("fr")];
        let selected = select_track(&tracks, &langs(&["en", "ko"])).unwrap();
        assert_eq!(selected.language_code, "de");
    }

    #[test]
    fn test_select_track_empty() {
        assert!(select_track(&[], &langs(&["en"])).is_none());
    }

    #[test]
    fn test_no_tracks_error_names_malformed_reference() {
        let err = no_tracks_error(&crate::resolve::resolve("definitely not an id"));
        assert!(matches!(
            err.downcast_ref::<ExtractorError>(),
            Some(ExtractorError::InvalidReference(_))
        ));

        let err = no_tracks_error(&crate::resolve::resolve("dQw4w9WgXcQ"));
        assert!(err.downcast_ref::<ExtractorError>().is_none());
    }

    #[test]
    fn test_json3_parsing() {
        let raw = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello "}, {"utf8": "world"}]},
                {"tStartMs": 1200},
                {"tStartMs": 2500, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 4000, "segs": [{"utf8": "Second\nline"}]}
            ]
        }"#;

        let transcript: Json3Transcript = serde_json::from_str(raw).unwrap();
        let entries = events_to_entries(transcript.events);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Hello world");
        assert_eq!(entries[0].start, 0.0);
        assert_eq!(entries[1].text, "Second line");
        assert_eq!(entries[1].start, 4.0);
    }
}
