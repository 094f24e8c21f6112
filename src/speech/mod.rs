// Text-to-speech
//
// Synthesis and playback sit behind two traits so the background task can be
// exercised without network or audio devices:
// - google: synthesis through Google's TTS endpoint
// - player: playback through an external command

pub mod google;
pub mod player;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use google::GoogleSpeech;
pub use player::CommandPlayer;
use crate::config::Config;
use crate::error::{Result, TranslatorError};

/// Turns text into encoded audio
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Plays an audio file to completion
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, audio_path: &Path) -> Result<()>;
}

/// A speech task that failed, reported on the side channel
#[derive(Debug)]
pub struct SpeechFailure {
    pub text: String,
    pub language: String,
    pub error: TranslatorError,
}

/// Launches fire-and-forget speech tasks.
///
/// Tasks own copies of their input and never touch translation state.
/// Failures are logged and sent to the receiver returned by [`SpeechService::new`].
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn AudioPlayer>,
    failures: mpsc::UnboundedSender<SpeechFailure>,
}

impl SpeechService {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
    ) -> (Self, mpsc::UnboundedReceiver<SpeechFailure>) {
        let (failures, receiver) = mpsc::unbounded_channel();
        (
            Self {
                synthesizer,
                player,
                failures,
            },
            receiver,
        )
    }

    /// Google synthesis with the configured command-line player
    pub fn from_config(config: &Config) -> Result<(Self, mpsc::UnboundedReceiver<SpeechFailure>)> {
        let synthesizer = GoogleSpeech::new(&config.speech, &config.translate)?;
        let player = CommandPlayer::new(&config.speech);
        Ok(Self::new(Arc::new(synthesizer), Arc::new(player)))
    }

    /// Speak `text` in the background
    pub fn speak(&self, text: &str, language: &str) -> JoinHandle<()> {
        let synthesizer = Arc::clone(&self.synthesizer);
        let player = Arc::clone(&self.player);
        let failures = self.failures.clone();
        let text = text.to_string();
        let language = language.to_string();

        tokio::spawn(async move {
            if let Err(e) = speak_once(synthesizer.as_ref(), player.as_ref(), &text, &language).await {
                error!("Text-to-speech failed: {}", e);
                // Receiver may already be gone; the failure is logged either way
                let _ = failures.send(SpeechFailure {
                    text,
                    language,
                    error: e,
                });
            }
        })
    }
}

/// Synthesize into a temporary MP3 file and play it.
///
/// The temporary file is removed when this returns, on success or failure.
pub async fn speak_once(
    synthesizer: &dyn SpeechSynthesizer,
    player: &dyn AudioPlayer,
    text: &str,
    language: &str,
) -> Result<()> {
    if text.trim().is_empty() {
        return Err(TranslatorError::Speech("No translation available to speak".to_string()));
    }

    info!("Synthesizing speech ({}, {} chars)", language, text.chars().count());
    let audio = synthesizer.synthesize(text, language).await?;

    let mut file = tempfile::Builder::new()
        .prefix("translation_audio")
        .suffix(".mp3")
        .tempfile()?;
    file.write_all(&audio)?;
    file.flush()?;

    player.play(file.path()).await
}
