use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, TranslatorError};

// Default values for fields added after the first config layout
fn default_alternatives_min_words() -> usize {
    3
}

fn default_detection_warning_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub translate: TranslateConfig,
    pub memory: MemoryConfig,
    pub confidence: ConfidenceConfig,
    pub history: HistoryConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Base URL of the translation web endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with translation and speech requests
    pub user_agent: String,
    /// Source language used when auto-detection fails
    pub fallback_language: String,
    /// Detector confidence (0..1) below which a warning is surfaced
    #[serde(default = "default_detection_warning_threshold")]
    pub detection_warning_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Minimum similarity (exclusive) for a history entry to count as a hit
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Lower clamp of the final score
    pub min: f64,
    /// Upper clamp of the final score
    pub max: f64,
    /// Lower bound of the sampled base score
    pub base_min: f64,
    /// Upper bound of the sampled base score
    pub base_max: f64,
    /// Word count above which the score is scaled down
    pub reference_word_count: usize,
    /// Multiplier applied to challenging language pairs
    pub challenging_pair_penalty: f64,
    /// Language pairs considered hard to translate, matched in either direction
    pub challenging_pairs: Vec<(String, String)>,
    /// Texts with at most this many words get no alternatives
    #[serde(default = "default_alternatives_min_words")]
    pub alternatives_min_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// JSON file holding the translation history
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the text-to-speech endpoint
    pub endpoint: String,
    /// Player used for synthesized audio
    pub player_binary: String,
    /// Arguments passed to the player before the audio file path
    pub player_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate: TranslateConfig {
                endpoint: "https://translate.googleapis.com".to_string(),
                timeout_secs: 30,
                user_agent: "smart-translator/0.1.0".to_string(),
                fallback_language: "en".to_string(),
                detection_warning_threshold: 0.5,
            },
            memory: MemoryConfig {
                similarity_threshold: 0.90,
            },
            confidence: ConfidenceConfig {
                min: 50.0,
                max: 95.0,
                base_min: 70.0,
                base_max: 95.0,
                reference_word_count: 100,
                challenging_pair_penalty: 0.9,
                challenging_pairs: [("ja", "en"), ("zh", "en"), ("ar", "en"), ("en", "hi"), ("hi", "en")]
                    .iter()
                    .map(|(src, dst)| (src.to_string(), dst.to_string()))
                    .collect(),
                alternatives_min_words: 3,
            },
            history: HistoryConfig {
                path: PathBuf::from("translation_history.json"),
            },
            speech: SpeechConfig {
                endpoint: "https://translate.google.com".to_string(),
                player_binary: "ffplay".to_string(),
                player_args: vec![
                    "-nodisp".to_string(),
                    "-autoexit".to_string(),
                    "-loglevel".to_string(),
                    "quiet".to_string(),
                ],
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslatorError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| TranslatorError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TranslatorError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslatorError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject policy values the scoring and lookup code cannot work with
    pub fn validate(&self) -> Result<()> {
        let threshold = self.memory.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(TranslatorError::Config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        let warning = self.translate.detection_warning_threshold;
        if !(0.0..=1.0).contains(&warning) {
            return Err(TranslatorError::Config(format!(
                "detection_warning_threshold must be within [0, 1], got {}",
                warning
            )));
        }

        let confidence = &self.confidence;
        if confidence.min > confidence.max {
            return Err(TranslatorError::Config(format!(
                "confidence bounds are inverted: [{}, {}]",
                confidence.min, confidence.max
            )));
        }
        if confidence.base_min > confidence.base_max {
            return Err(TranslatorError::Config(format!(
                "base confidence range is inverted: [{}, {}]",
                confidence.base_min, confidence.base_max
            )));
        }
        if confidence.reference_word_count == 0 {
            return Err(TranslatorError::Config(
                "reference_word_count must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
