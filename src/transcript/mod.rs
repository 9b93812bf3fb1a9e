use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::resolve::VideoId;
use crate::translate::Translator;
use crate::utils::format_timestamp;
use crate::{ExtractorError, Result};

pub mod innertube;

/// Marker prepended to translated lines
pub const TRANSLATION_TAG: &str = "(한글 번역)";

/// Fixed placeholder emitted when translating a single entry fails
pub const TRANSLATION_ERROR_PLACEHOLDER: &str = "오류 발생";

/// One timed caption unit as returned by the transcript provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Start offset in seconds
    pub start: f64,

    /// Caption text
    pub text: String,
}

/// Per-entry translation outcome; a failure becomes a visible placeholder
/// line rather than aborting assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Failed,
}

impl TranslationOutcome {
    fn into_text(self) -> String {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Failed => TRANSLATION_ERROR_PLACEHOLDER.to_string(),
        }
    }
}

/// One rendered transcript line: a clickable timestamp plus text.
///
/// A translated entry yields a second line flagged with [`TRANSLATION_TAG`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// `HH:MM:SS` label
    pub timestamp: String,

    /// Watch URL with a `&t=<seconds>s` fragment
    pub deep_link: String,

    /// Original or translated text
    pub text: String,

    /// Whether this line carries a translation
    pub translated: bool,
}

impl FormattedLine {
    /// Markdown rendering: `[HH:MM:SS](deep-link) text`
    pub fn render(&self) -> String {
        if self.translated {
            format!(
                "[{}]({}) {} {}",
                self.timestamp, self.deep_link, TRANSLATION_TAG, self.text
            )
        } else {
            format!("[{}]({}) {}", self.timestamp, self.deep_link, self.text)
        }
    }
}

/// Trait for fetching a transcript from a remote provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript, honoring the language preference order.
    /// Fails when no caption track exists in any usable language.
    async fn fetch_transcript(
        &self,
        id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<TranscriptEntry>>;
}

/// Pairs transcript entries with clickable timestamps and, when requested,
/// a per-entry translation line
pub struct TranscriptAssembler {
    source: Box<dyn TranscriptSource>,
    translator: Box<dyn Translator>,
    languages: Vec<String>,
    target_language: String,
}

impl TranscriptAssembler {
    pub fn new(
        source: Box<dyn TranscriptSource>,
        translator: Box<dyn Translator>,
        languages: Vec<String>,
        target_language: String,
    ) -> Self {
        Self {
            source,
            translator,
            languages,
            target_language,
        }
    }

    /// Build the ordered sequence of formatted lines for a video.
    ///
    /// A provider failure or an empty transcript is fatal. Translation
    /// failures are entry-scoped: the affected entry gets a placeholder line
    /// and assembly continues.
    pub async fn assemble(&self, id: &VideoId, translate: bool) -> Result<Vec<FormattedLine>> {
        let entries = self
            .source
            .fetch_transcript(id, &self.languages)
            .await
            .map_err(|e| {
                ExtractorError::TranscriptUnavailable(id.to_string(), format!("{e:#}"))
            })?;

        if entries.is_empty() {
            return Err(ExtractorError::TranscriptUnavailable(
                id.to_string(),
                "provider returned no entries".to_string(),
            )
            .into());
        }

        tracing::debug!("Assembling {} transcript entries for {}", entries.len(), id);

        let base_url = id.watch_url();
        let mut lines = Vec::with_capacity(if translate {
            entries.len() * 2
        } else {
            entries.len()
        });

        for entry in &entries {
            let timestamp = format_timestamp(entry.start);
            let deep_link = format!("{}&t={}s", base_url, entry.start as u64);

            lines.push(FormattedLine {
                timestamp: timestamp.clone(),
                deep_link: deep_link.clone(),
                text: entry.text.clone(),
                translated: false,
            });

            if translate {
                let outcome = match self
                    .translator
                    .translate(&entry.text, &self.target_language)
                    .await
                {
                    Ok(text) => TranslationOutcome::Translated(text),
                    Err(e) => {
                        tracing::warn!(
                            "Translation failed at {} for {}: {e:#}",
                            timestamp,
                            id
                        );
                        TranslationOutcome::Failed
                    }
                };

                lines.push(FormattedLine {
                    timestamp,
                    deep_link,
                    text: outcome.into_text(),
                    translated: true,
                });
            }
        }

        Ok(lines)
    }
}
