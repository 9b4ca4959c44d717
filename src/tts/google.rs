use std::time::Duration;

use super::TtsEngine;
use crate::error::AppError;

/// Endpoint behind the gTTS family of libraries.
const GOOGLE_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// The endpoint rejects long inputs, so text is synthesized in chunks and the
/// returned MP3 streams concatenated.
const MAX_CHUNK_LEN: usize = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GoogleTtsEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTtsEngine {
    pub fn new() -> Self {
        Self::with_endpoint(GOOGLE_TTS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn fetch_chunk(&self, text: &str, language: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::TtsError(format!("Failed to reach TTS service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::TtsError(format!(
                "TTS service returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::TtsError(format!("Failed to read TTS response: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

impl Default for GoogleTtsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TtsEngine for GoogleTtsEngine {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, AppError> {
        let mut audio = Vec::new();
        for chunk in chunk_text(text, MAX_CHUNK_LEN) {
            audio.extend(self.fetch_chunk(&chunk, language).await?);
        }
        Ok(audio)
    }
}

/// Split text into chunks of at most `max_len` bytes on whitespace boundaries.
/// A single word longer than `max_len` is kept whole.
fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
