use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Please enter text to translate")]
    EmptyInput,

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Language detection failed: {0}")]
    Detection(String),

    #[error("Text-to-speech failed: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
