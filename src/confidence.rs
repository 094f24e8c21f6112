//! Synthetic confidence scoring.
//!
//! The score is a placeholder heuristic, not a calibrated quality signal: a
//! base value is sampled at random, scaled down for long inputs and for
//! language pairs known to be difficult, then clamped.

use rand::Rng;
use serde::Serialize;

use crate::config::ConfidenceConfig;

/// Simulated alternative rendering offered next to the main translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub label: &'static str,
    pub quality_score: f64,
}

const ALTERNATIVE_STYLES: [(&str, f64, f64); 3] = [
    ("Formal translation", 65.0, 85.0),
    ("Casual translation", 70.0, 90.0),
    ("Idiomatic translation", 75.0, 95.0),
];

#[derive(Debug, Clone)]
pub struct ConfidenceEstimator {
    config: ConfidenceConfig,
}

impl ConfidenceEstimator {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Score a translation with a freshly sampled base
    pub fn estimate(
        &self,
        source_text: &str,
        translated_text: &str,
        source_language: &str,
        target_language: &str,
    ) -> f64 {
        self.estimate_with_rng(
            &mut rand::thread_rng(),
            source_text,
            translated_text,
            source_language,
            target_language,
        )
    }

    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        source_text: &str,
        _translated_text: &str,
        source_language: &str,
        target_language: &str,
    ) -> f64 {
        let base = rng.gen_range(self.config.base_min..=self.config.base_max);
        self.score_with_base(base, source_text, source_language, target_language)
    }

    /// Deterministic part of the heuristic, applied to a given base score
    pub fn score_with_base(
        &self,
        base: f64,
        source_text: &str,
        source_language: &str,
        target_language: &str,
    ) -> f64 {
        let mut score = base * self.length_factor(source_text);

        if self.is_challenging_pair(source_language, target_language) {
            score *= self.config.challenging_pair_penalty;
        }

        score.clamp(self.config.min, self.config.max)
    }

    /// Whether a score could have come out of this estimator
    pub fn is_within_bounds(&self, confidence: f64) -> bool {
        confidence.is_finite() && (self.config.min..=self.config.max).contains(&confidence)
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.config.min, self.config.max)
    }

    /// `min(1, reference / words)`, with at least one word assumed
    pub fn length_factor(&self, source_text: &str) -> f64 {
        let words = word_count(source_text).max(1);
        (self.config.reference_word_count as f64 / words as f64).min(1.0)
    }

    /// Whether the pair, in either direction, is in the challenging set
    pub fn is_challenging_pair(&self, source_language: &str, target_language: &str) -> bool {
        self.config.challenging_pairs.iter().any(|(a, b)| {
            (a == source_language && b == target_language)
                || (a == target_language && b == source_language)
        })
    }

    /// Simulated alternatives; short texts get none
    pub fn alternatives(&self, source_text: &str) -> Vec<Alternative> {
        self.alternatives_with_rng(&mut rand::thread_rng(), source_text)
    }

    pub fn alternatives_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, source_text: &str) -> Vec<Alternative> {
        if word_count(source_text) <= self.config.alternatives_min_words {
            return Vec::new();
        }

        ALTERNATIVE_STYLES
            .iter()
            .map(|&(label, low, high)| Alternative {
                label,
                quality_score: rng.gen_range(low..=high),
            })
            .collect()
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new(crate::config::Config::default().confidence)
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
