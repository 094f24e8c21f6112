use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{SpeechConfig, TranslateConfig};
use crate::error::{Result, TranslatorError};
use super::SpeechSynthesizer;

/// Longest chunk the TTS endpoint accepts in one request
const MAX_CHUNK_CHARS: usize = 100;

/// Speech synthesis through Google's `translate_tts` endpoint (MP3 output)
pub struct GoogleSpeech {
    client: Client,
    endpoint: String,
}

impl GoogleSpeech {
    pub fn new(config: &SpeechConfig, translate: &TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(translate.timeout_secs))
            .user_agent(translate.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_chunk(&self, chunk: &str, index: usize, total: usize, language: &str) -> Result<Vec<u8>> {
        let url = format!("{}/translate_tts", self.endpoint);
        let idx = index.to_string();
        let total_str = total.to_string();
        let len = chunk.chars().count().to_string();

        debug!("Requesting speech chunk {}/{} ({} chars)", index + 1, total, len);

        let response = self.client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total_str.as_str()),
                ("textlen", len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TranslatorError::Speech(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TranslatorError::Speech(format!(
                "Speech API error {} for language '{}'",
                response.status(),
                language
            )));
        }

        let bytes = response.bytes().await
            .map_err(|e| TranslatorError::Speech(format!("Failed to read audio: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let chunks = split_for_speech(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TranslatorError::Speech("No text to speak".to_string()));
        }

        // MP3 frames concatenate into a playable stream
        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, index, chunks.len(), language).await?);
        }
        Ok(audio)
    }
}

/// Split text into chunks of at most `max_chars` characters, preferring
/// whitespace boundaries and hard-splitting words that are too long.
fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
