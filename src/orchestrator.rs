use serde::Serialize;
use tracing::{info, warn};

use crate::confidence::{Alternative, ConfidenceEstimator};
use crate::config::Config;
use crate::error::{Result, TranslatorError};
use crate::history::{HistoryStore, TranslationRecord};
use crate::languages::{LanguageSelection, AUTO_DETECT};
use crate::memory::TranslationMemory;
use crate::translate::{Detection, Translator};

/// A translation request coming from the presentation layer
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source: LanguageSelection,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: LanguageSelection, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            target: target.into(),
        }
    }
}

/// Where the translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranslationOrigin {
    /// Served from the translation memory, nothing recorded
    Memory,
    /// Produced by the external translator and recorded
    Fresh,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationOutcome {
    pub translated_text: String,
    pub confidence: f64,
    pub source_language: String,
    pub target_language: String,
    pub origin: TranslationOrigin,
    /// Detector result when the source language was auto-detected
    pub detection: Option<Detection>,
    /// Set when detection confidence fell below the warning threshold
    pub low_confidence_detection: bool,
    pub alternatives: Vec<Alternative>,
}

/// Runs translation requests against the memory, the external translator,
/// and the history store it owns.
pub struct Orchestrator {
    translator: Box<dyn Translator>,
    history: HistoryStore,
    memory: TranslationMemory,
    estimator: ConfidenceEstimator,
    fallback_language: String,
    detection_warning_threshold: f64,
}

impl Orchestrator {
    pub fn new(config: &Config, translator: Box<dyn Translator>, history: HistoryStore) -> Self {
        Self {
            translator,
            history,
            memory: TranslationMemory::new(&config.memory),
            estimator: ConfidenceEstimator::new(config.confidence.clone()),
            fallback_language: config.translate.fallback_language.clone(),
            detection_warning_threshold: config.translate.detection_warning_threshold,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn estimator(&self) -> &ConfidenceEstimator {
        &self.estimator
    }

    /// Translate a request: memory first, external translator on a miss
    pub async fn translate(&mut self, request: &TranslationRequest) -> Result<TranslationOutcome> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(TranslatorError::EmptyInput);
        }

        let (source_language, detection) = match &request.source {
            LanguageSelection::Auto => {
                let detection = self.detect_source(text).await;
                (detection.language.clone(), Some(detection))
            }
            LanguageSelection::Code(code) => (code.clone(), None),
        };
        let low_confidence_detection = detection
            .as_ref()
            .is_some_and(|d| d.is_low(self.detection_warning_threshold));
        let target_language = request.target.clone();

        let lookup = self.memory.lookup(text, &source_language, &target_language, self.history.records());
        if let Some(record) = lookup.hit {
            info!("Serving {}→{} translation from memory", source_language, target_language);
            return Ok(TranslationOutcome {
                translated_text: record.translated_text.clone(),
                confidence: lookup.confidence,
                source_language,
                target_language,
                origin: TranslationOrigin::Memory,
                detection,
                low_confidence_detection,
                alternatives: self.estimator.alternatives(text),
            });
        }

        info!("Dispatching {}→{} translation ({} chars)", source_language, target_language, text.chars().count());
        let translated_text = self.translator
            .translate(text, &source_language, &target_language)
            .await?;

        let confidence = self.estimator.estimate(text, &translated_text, &source_language, &target_language);
        self.history.append(TranslationRecord::new(
            text,
            translated_text.clone(),
            source_language.clone(),
            target_language.clone(),
            confidence,
        ))?;
        info!("Recorded translation with confidence {:.0}%", confidence);

        Ok(TranslationOutcome {
            translated_text,
            confidence,
            source_language,
            target_language,
            origin: TranslationOrigin::Fresh,
            detection,
            low_confidence_detection,
            alternatives: self.estimator.alternatives(text),
        })
    }

    /// Record a displayed result the user chose to keep
    pub fn commit(
        &mut self,
        source_text: &str,
        translated_text: &str,
        source_language: &str,
        target_language: &str,
        confidence: f64,
    ) -> Result<()> {
        commit_translation(
            &mut self.history,
            &self.estimator,
            source_text,
            translated_text,
            source_language,
            target_language,
            confidence,
        )
    }

    /// Detection never fails the request; errors fall back to the default language
    async fn detect_source(&self, text: &str) -> Detection {
        let detection = match self.translator.detect(text).await {
            Ok(detection) => detection,
            Err(e) => {
                warn!("Language detection failed, using '{}': {}", self.fallback_language, e);
                Detection::new(self.fallback_language.clone(), 0.0)
            }
        };

        if detection.is_low(self.detection_warning_threshold) {
            warn!(
                "Language detection confidence is low ({:.0}%) for '{}'",
                detection.percent(),
                detection.language
            );
        }
        detection
    }
}

/// Append a user-kept translation to `history`.
///
/// Needs no translator, so saving works offline. The confidence must be a
/// score the estimator could have produced; anything else is rejected before
/// the history is touched.
pub fn commit_translation(
    history: &mut HistoryStore,
    estimator: &ConfidenceEstimator,
    source_text: &str,
    translated_text: &str,
    source_language: &str,
    target_language: &str,
    confidence: f64,
) -> Result<()> {
    let source_text = source_text.trim();
    let translated_text = translated_text.trim();
    if source_text.is_empty() || translated_text.is_empty() {
        return Err(TranslatorError::History("No translation available to save".to_string()));
    }
    if source_language == AUTO_DETECT {
        return Err(TranslatorError::UnknownLanguage(
            "source language must be resolved before saving".to_string(),
        ));
    }
    if !estimator.is_within_bounds(confidence) {
        let (min, max) = estimator.bounds();
        return Err(TranslatorError::History(format!(
            "Confidence {} is outside [{}, {}]",
            confidence, min, max
        )));
    }

    history.append(TranslationRecord::new(
        source_text,
        translated_text,
        source_language,
        target_language,
        confidence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockTranslator;
    use tokio_test::{assert_err, assert_ok};

    fn orchestrator_with(translator: MockTranslator, dir: &tempfile::TempDir) -> Orchestrator {
        let history = HistoryStore::load(dir.path().join("history.json"));
        Orchestrator::new(&Config::default(), Box::new(translator), history)
    }

    fn code(code: &str) -> LanguageSelection {
        LanguageSelection::Code(code.to_string())
    }

    #[tokio::test]
    async fn test_fresh_translation_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text, src, dst| text == "Hello" && src == "en" && dst == "hi")
            .times(1)
            .returning(|_, _, _| Ok("नमस्ते".to_string()));
        translator.expect_detect().never();

        let mut orchestrator = orchestrator_with(translator, &dir);
        let outcome = assert_ok!(orchestrator.translate(&TranslationRequest::new("Hello", code("en"), "hi")).await);

        assert_eq!(outcome.origin, TranslationOrigin::Fresh);
        assert_eq!(outcome.translated_text, "नमस्ते");
        assert!((50.0..=95.0).contains(&outcome.confidence));

        let records = orchestrator.history().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_language, "en");
        assert_eq!(records[0].target_language, "hi");
        assert_eq!(records[0].translated_text, "नमस्ते");
        assert_eq!(records[0].confidence, outcome.confidence);

        let reloaded = HistoryStore::load(dir.path().join("history.json"));
        assert_eq!(reloaded.records(), records);
    }

    #[tokio::test]
    async fn test_memory_hit_skips_translator_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::load(dir.path().join("history.json"));
        history
            .append(TranslationRecord::new("Hello there", "नमस्ते वहाँ", "en", "hi", 80.0))
            .unwrap();

        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        let mut orchestrator = Orchestrator::new(&Config::default(), Box::new(translator), history);

        let outcome = orchestrator
            .translate(&TranslationRequest::new("Hello there!", code("en"), "hi"))
            .await
            .unwrap();

        assert_eq!(outcome.origin, TranslationOrigin::Memory);
        assert_eq!(outcome.translated_text, "नमस्ते वहाँ");
        assert_eq!(outcome.confidence, 80.0);
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_translator() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        translator.expect_detect().never();

        let mut orchestrator = orchestrator_with(translator, &dir);
        let result = orchestrator.translate(&TranslationRequest::new("  \n", LanguageSelection::Auto, "hi")).await;

        assert!(matches!(result, Err(TranslatorError::EmptyInput)));
        assert!(orchestrator.history().is_empty());
    }

    #[tokio::test]
    async fn test_translation_failure_leaves_history_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Err(TranslatorError::Translation("connection reset".to_string())));

        let mut orchestrator = orchestrator_with(translator, &dir);
        let error = assert_err!(orchestrator.translate(&TranslationRequest::new("Hello", code("en"), "fr")).await);

        assert!(error.to_string().contains("connection reset"));
        assert!(orchestrator.history().is_empty());
        assert!(!dir.path().join("history.json").exists());
    }

    #[tokio::test]
    async fn test_auto_detection_resolves_source_language() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator
            .expect_detect()
            .returning(|_| Ok(Detection::new("fr", 0.98)));
        translator
            .expect_translate()
            .withf(|_, src, _| src == "fr")
            .returning(|_, _, _| Ok("Good morning".to_string()));

        let mut orchestrator = orchestrator_with(translator, &dir);
        let outcome = orchestrator
            .translate(&TranslationRequest::new("Bonjour", LanguageSelection::Auto, "en"))
            .await
            .unwrap();

        assert_eq!(outcome.source_language, "fr");
        assert!(!outcome.low_confidence_detection);
        assert_eq!(outcome.detection.map(|d| d.confidence), Some(0.98));
        assert_eq!(orchestrator.history().records()[0].source_language, "fr");
    }

    #[tokio::test]
    async fn test_detection_failure_falls_back_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator
            .expect_detect()
            .returning(|_| Err(TranslatorError::Detection("timeout".to_string())));
        translator
            .expect_translate()
            .withf(|_, src, _| src == "en")
            .returning(|_, _, _| Ok("नमस्ते".to_string()));

        let mut orchestrator = orchestrator_with(translator, &dir);
        let outcome = orchestrator
            .translate(&TranslationRequest::new("Hello", LanguageSelection::Auto, "hi"))
            .await
            .unwrap();

        assert_eq!(outcome.source_language, "en");
        assert!(outcome.low_confidence_detection);
        assert_eq!(outcome.detection.map(|d| d.confidence), Some(0.0));
    }

    #[tokio::test]
    async fn test_detector_confidence_is_not_the_translation_confidence() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator.expect_detect().returning(|_| Ok(Detection::new("de", 0.3)));
        translator
            .expect_translate()
            .returning(|_, _, _| Ok("Hello".to_string()));

        let mut orchestrator = orchestrator_with(translator, &dir);
        let outcome = orchestrator
            .translate(&TranslationRequest::new("Hallo", LanguageSelection::Auto, "en"))
            .await
            .unwrap();

        assert!(outcome.low_confidence_detection);
        assert!(outcome.confidence >= 50.0);
    }

    #[tokio::test]
    async fn test_hit_requires_resolved_language_pair() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::load(dir.path().join("history.json"));
        history
            .append(TranslationRecord::new("Hello there", "नमस्ते वहाँ", "en", "hi", 80.0))
            .unwrap();

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Ok("Hola".to_string()));
        let mut orchestrator = Orchestrator::new(&Config::default(), Box::new(translator), history);

        let outcome = orchestrator
            .translate(&TranslationRequest::new("Hello there", code("en"), "es"))
            .await
            .unwrap();

        assert_eq!(outcome.origin, TranslationOrigin::Fresh);
        assert_eq!(orchestrator.history().len(), 2);
    }

    #[test]
    fn test_commit_appends_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = orchestrator_with(MockTranslator::new(), &dir);

        orchestrator.commit("Thank you", "धन्यवाद", "en", "hi", 88.0).unwrap();
        assert_eq!(orchestrator.history().len(), 1);
        assert_eq!(orchestrator.history().records()[0].confidence, 88.0);
    }

    #[test]
    fn test_commit_rejects_empty_and_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = orchestrator_with(MockTranslator::new(), &dir);

        assert!(orchestrator.commit("", "धन्यवाद", "en", "hi", 88.0).is_err());
        assert!(orchestrator.commit("Thank you", "  ", "en", "hi", 88.0).is_err());
        assert!(matches!(
            orchestrator.commit("Thank you", "धन्यवाद", "auto", "hi", 88.0),
            Err(TranslatorError::UnknownLanguage(_))
        ));
        assert!(orchestrator.history().is_empty());
    }

    #[test]
    fn test_commit_rejects_confidence_outside_estimator_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut orchestrator = orchestrator_with(MockTranslator::new(), &dir);
        orchestrator.commit("Thank you", "धन्यवाद", "en", "hi", 80.0).unwrap();

        for bad in [f64::NAN, f64::INFINITY, 0.0, -5.0, 96.0] {
            let error = assert_err!(orchestrator.commit("Good night", "शुभ रात्रि", "en", "hi", bad));
            assert!(matches!(error, TranslatorError::History(_)), "{} gave {:?}", bad, error);
        }

        assert_eq!(orchestrator.history().len(), 1);
        let reloaded = HistoryStore::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].confidence, 80.0);
    }

    #[test]
    fn test_commit_translation_without_translator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut history = HistoryStore::load(&path);
        let estimator = ConfidenceEstimator::default();

        assert_ok!(commit_translation(&mut history, &estimator, " Thank you ", "धन्यवाद", "en", "hi", 95.0));
        assert_err!(commit_translation(&mut history, &estimator, "Thanks", "धन्यवाद", "en", "hi", f64::NAN));

        let reloaded = HistoryStore::load(&path);
        assert_eq!(reloaded.records(), history.records());
        assert_eq!(reloaded.records()[0].source_text, "Thank you");
    }

    #[tokio::test]
    async fn test_unsaved_translation_is_not_served_from_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(2)
            .returning(|_, _, _| Ok("नमस्ते".to_string()));

        // A directory cannot be written as the history file
        let history = HistoryStore::load(dir.path());
        let mut orchestrator = Orchestrator::new(&Config::default(), Box::new(translator), history);
        let request = TranslationRequest::new("Hello", code("en"), "hi");

        assert_err!(orchestrator.translate(&request).await);
        assert!(orchestrator.history().is_empty());

        let second = orchestrator.translate(&request).await;
        assert!(!matches!(second, Ok(TranslationOutcome { origin: TranslationOrigin::Memory, .. })));
        assert!(orchestrator.history().is_empty());
    }
}
