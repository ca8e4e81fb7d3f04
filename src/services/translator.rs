// src/services/translator.rs
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Longest piece of text sent to the backend in one call.
pub const MAX_CHUNK_CHARS: usize = 4500;

pub const SOURCE_LANG: &str = "en";
pub const TARGET_LANG: &str = "pt";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected translation response: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate one chunk from English to Portuguese.
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Result of [`translate_text`]. On failure `text` is the untouched input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub error: Option<String>,
}

/// Translate text of any length, falling back to the input on failure.
pub async fn translate_text(backend: &dyn Translate, text: &str) -> Translation {
    match translate_chunked(backend, text).await {
        Ok(translated) => Translation {
            text: translated,
            error: None,
        },
        Err(err) => {
            warn!("Translation error: {}", err);
            Translation {
                text: text.to_string(),
                error: Some(format!("Translation error: {err}")),
            }
        }
    }
}

async fn translate_chunked(backend: &dyn Translate, text: &str) -> Result<String, TranslateError> {
    if text.chars().count() <= MAX_CHUNK_CHARS {
        return backend.translate(text).await;
    }

    let chunks = split_chunks(text, MAX_CHUNK_CHARS);
    debug!(chunks = chunks.len(), "translating in chunks");

    let mut translated = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        translated.push(backend.translate(chunk).await?);
    }
    Ok(translated.join(" ").trim().to_string())
}

/// Cut text into consecutive pieces of at most `size` characters.
pub fn split_chunks(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Backend for the public Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translate for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let response: Value = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", SOURCE_LANG),
                ("tl", TARGET_LANG),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_segments(&response)
    }
}

// Body looks like [[["Olá","Hello",...], ["mundo","world",...]], null, "en"].
fn parse_segments(response: &Value) -> Result<String, TranslateError> {
    let segments = response
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::UnexpectedResponse(response.to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
