use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, TranslatorError};
use crate::languages::AUTO_DETECT;
use super::{Detection, Translator};

/// Translator backed by Google's public `translate_a/single` web endpoint
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    async fn request(&self, text: &str, source_language: &str, target_language: &str) -> Result<Value> {
        let url = format!("{}/translate_a/single", self.config.endpoint.trim_end_matches('/'));

        debug!("Sending translation request to: {} ({}→{})", url, source_language, target_language);

        let response = self.client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslatorError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslatorError::Translation(format!(
                "Translation API error {}: {}", status, error_text
            )));
        }

        let body = response.text().await
            .map_err(|e| TranslatorError::Translation(format!("Failed to read response: {}", e)))?;

        debug!("Raw translation response: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| TranslatorError::Translation(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let value = self.request(text, source_language, target_language).await?;
        parse_translation(&value)
    }

    async fn detect(&self, text: &str) -> Result<Detection> {
        let value = self.request(text, AUTO_DETECT, "en").await
            .map_err(|e| TranslatorError::Detection(e.to_string()))?;
        parse_detection(&value)
    }
}

/// Join the translated sentence chunks of a `dt=t` response
///
/// The payload looks like `[[["Hola","Hello",null,null,10], ...], null, "en", ...]`.
fn parse_translation(value: &Value) -> Result<String> {
    let chunks = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslatorError::Translation("Response has no translation chunks".to_string()))?;

    let text: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslatorError::Translation("Empty translation received".to_string()));
    }

    Ok(text)
}

/// Read the detected source language and its confidence
///
/// The language sits at index 2. Confidence is at index 6, with the
/// per-language list at index 8 as a fallback.
fn parse_detection(value: &Value) -> Result<Detection> {
    let language = value
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| TranslatorError::Detection("Response has no detected language".to_string()))?;

    let confidence = value
        .get(6)
        .and_then(Value::as_f64)
        .or_else(|| {
            value
                .get(8)
                .and_then(|ld| ld.get(2))
                .and_then(|scores| scores.get(0))
                .and_then(Value::as_f64)
        })
        .unwrap_or(0.0);

    Ok(Detection::new(language, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_joins_chunks() {
        let value = json!([
            [["Bonjour. ", "Hello. ", null, null, 10], ["Comment ça va?", "How are you?", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&value).unwrap(), "Bonjour. Comment ça va?");
    }

    #[test]
    fn test_parse_translation_rejects_empty() {
        let value = json!([[["", "Hello", null, null, 10]], null, "en"]);
        assert!(matches!(parse_translation(&value), Err(TranslatorError::Translation(_))));

        let value = json!({"error": "bad request"});
        assert!(parse_translation(&value).is_err());
    }

    #[test]
    fn test_parse_detection_with_confidence() {
        let value = json!([[["Hello", "Hola", null, null, 10]], null, "es", null, null, null, 0.87, []]);
        let detection = parse_detection(&value).unwrap();
        assert_eq!(detection.language, "es");
        assert!((detection.confidence - 0.87).abs() < 1e-12);
    }

    #[test]
    fn test_parse_detection_language_list_fallback() {
        let value = json!([
            [["Hello", "Bonjour", null, null, 10]], null, "fr", null, null, null, null, [],
            [["fr"], null, [0.64], ["fr"]]
        ]);
        let detection = parse_detection(&value).unwrap();
        assert_eq!(detection.language, "fr");
        assert!((detection.confidence - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_parse_detection_without_language() {
        let value = json!([[["Hello", "Hello", null, null, 10]]]);
        assert!(matches!(parse_detection(&value), Err(TranslatorError::Detection(_))));
    }
}
