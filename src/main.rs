//! smart-translator - translation with a fuzzy translation memory
//!
//! Command-line front end: translates text through the orchestrator, shows
//! history, and speaks translations in the background.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smart_translator::cli::{Args, Commands};
use smart_translator::confidence::ConfidenceEstimator;
use smart_translator::config::Config;
use smart_translator::display::{render_history, render_outcome};
use smart_translator::history::HistoryStore;
use smart_translator::languages::{find_code, LanguageSelection, DEFAULT_LANGUAGE, LANGUAGES};
use smart_translator::orchestrator::{commit_translation, Orchestrator, TranslationRequest};
use smart_translator::speech::SpeechService;
use smart_translator::translate::TranslatorFactory;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the file writer alive until exit
    let _log_guard = setup_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };
    if let Some(history_path) = &args.history {
        config.history.path = history_path.clone();
    }

    match args.command {
        Commands::Translate { text, from, to, speak } => {
            let target = target_code(&to);
            let request = TranslationRequest::new(text, LanguageSelection::parse(&from), target);

            let translator = TranslatorFactory::create_default(config.translate.clone())?;
            let history = HistoryStore::load(&config.history.path);
            let mut orchestrator = Orchestrator::new(&config, translator, history);

            let outcome = orchestrator.translate(&request).await?;
            print!("{}", render_outcome(&outcome));

            if speak {
                speak_and_report(&config, &outcome.translated_text, &outcome.target_language).await?;
            }
        }
        Commands::Save { source, translation, from, to, confidence } => {
            let mut history = HistoryStore::load(&config.history.path);
            let estimator = ConfidenceEstimator::new(config.confidence.clone());

            let source_language = LanguageSelection::parse(&from).to_string();
            let target_language = target_code(&to);
            let confidence = confidence.unwrap_or_else(|| {
                estimator.estimate(&source, &translation, &source_language, &target_language)
            });
            commit_translation(
                &mut history,
                &estimator,
                &source,
                &translation,
                &source_language,
                &target_language,
                confidence,
            )?;
            println!("Translation saved to history! [AI Confidence: {:.0}%]", confidence);
        }
        Commands::History { limit } => {
            let history = HistoryStore::load(&config.history.path);
            print!("{}", render_history(history.records(), limit));
        }
        Commands::Speak { text, lang } => {
            speak_and_report(&config, &text, &target_code(&lang)).await?;
        }
        Commands::Languages => {
            for (code, name) in LANGUAGES {
                println!("{:<4} {}", code, name);
            }
        }
        Commands::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Run a speech task and print any failure it reports
async fn speak_and_report(config: &Config, text: &str, language: &str) -> Result<()> {
    let (speech, mut failures) = SpeechService::from_config(config)?;
    let task = speech.speak(text, language);
    drop(speech);

    // A CLI process would exit before playback finishes, so wait here
    task.await?;
    while let Some(failure) = failures.recv().await {
        eprintln!("Speech Error: {}", failure.error);
    }
    Ok(())
}

/// Resolve a target language, warning when it falls back to English
fn target_code(input: &str) -> String {
    match find_code(input) {
        Some(code) => code.to_string(),
        None => {
            warn!("Unknown language '{}', using '{}'", input, DEFAULT_LANGUAGE);
            DEFAULT_LANGUAGE.to_string()
        }
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = std::env::current_dir()?.join(".smart-translator").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "smart-translator.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::WARN };

    // Console output stays quiet so translations are readable
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - level: {}, file: {}", log_level, log_dir.join("smart-translator.log").display());

    Ok(guard)
}
