use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use crate::{ExtractorError, Result};

const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Trait for translating a single piece of text to a target language
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` to the language named by an ISO 639-1 code
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// Translator backed by the keyless Google Translate web endpoint
pub struct GoogleTranslator {
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let response = self
            .client
            .get(TRANSLATE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await.context("Failed to parse translation response")?;

        parse_translation(&body)
    }
}

/// Extract the translated text from the gtx response.
/// Response shape: `[[[translated, original, ...], ...], ...]`
fn parse_translation(body: &Value) -> Result<String> {
    let chunks = body.get(0).and_then(Value::as_array).ok_or_else(|| {
        ExtractorError::TranslationFailed("unexpected response shape".to_string())
    })?;

    let mut translated = String::new();
    for chunk in chunks {
        if let Some(piece) = chunk.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    if translated.is_empty() {
        return Err(ExtractorError::TranslationFailed(
            "response contained no text".to_string(),
        )
        .into());
    }

    Ok(translated)
}
