// External translation service
//
// The orchestrator talks to translation backends only through the
// `Translator` trait:
// - google: Google's public web endpoint (translation and detection)

pub mod google;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

pub use google::GoogleTranslator;
use crate::config::TranslateConfig;
use crate::error::Result;

/// Language reported by the detection service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language: String,
    /// Detector confidence in `[0, 1]`
    pub confidence: f64,
}

impl Detection {
    pub fn new(language: impl Into<String>, confidence: f64) -> Self {
        Self {
            language: language.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn is_low(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }

    pub fn percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Main trait for translation operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from a resolved source language to the target language
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;

    /// Detect the language of `text`
    async fn detect(&self, text: &str) -> Result<Detection>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the default translator implementation (Google web endpoint)
    pub fn create_default(config: TranslateConfig) -> Result<Box<dyn Translator>> {
        Ok(Box::new(GoogleTranslator::new(config)?))
    }
}
