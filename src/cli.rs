use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// History file (overrides the configured path)
    #[arg(long)]
    pub history: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text, using the translation memory when possible
    Translate {
        /// Text to translate
        text: String,

        /// Source language code or name, or "auto" to detect it
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language code or name
        #[arg(short, long, default_value = "hi")]
        to: String,

        /// Speak the translation after printing it
        #[arg(long)]
        speak: bool,
    },

    /// Save a translation to the history
    Save {
        /// Original text
        #[arg(short, long)]
        source: String,

        /// Translated text
        #[arg(short = 'r', long)]
        translation: String,

        /// Source language code or name
        #[arg(short, long)]
        from: String,

        /// Target language code or name
        #[arg(short, long)]
        to: String,

        /// Confidence shown with the translation (estimated when omitted)
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Show translation history, newest first
    History {
        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Speak text aloud
    Speak {
        /// Text to speak
        text: String,

        /// Language code or name
        #[arg(short, long, default_value = "hi")]
        lang: String,
    },

    /// List supported languages
    Languages,

    /// Write the default configuration to a file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
