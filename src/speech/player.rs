use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::SpeechConfig;
use crate::error::{Result, TranslatorError};
use super::AudioPlayer;

/// External player invocation
#[derive(Debug, Clone)]
pub struct PlaybackCommand {
    pub binary_path: String,
    pub args: Vec<String>,
}

impl PlaybackCommand {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
        }
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add the audio file to play
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.args.push(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Run the player and wait for playback to finish
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing playback command: {} {:?}", self.binary_path, self.args);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| TranslatorError::Speech(format!("Failed to execute {}: {}", self.binary_path, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranslatorError::Speech(format!(
                "Playback failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Plays audio files through a command-line player such as `ffplay`
pub struct CommandPlayer {
    binary_path: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            binary_path: config.player_binary.clone(),
            args: config.player_args.clone(),
        }
    }

    fn command_for(&self, audio_path: &Path) -> PlaybackCommand {
        PlaybackCommand::new(&self.binary_path)
            .args(self.args.iter().cloned())
            .input(audio_path)
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, audio_path: &Path) -> Result<()> {
        info!("Playing {}", audio_path.display());
        self.command_for(audio_path).execute().await
    }
}
