use tracing::debug;

use crate::config::MemoryConfig;
use crate::history::TranslationRecord;
use crate::similarity::{normalized_len, ratio, ratio_upper_bound};

/// Result of a translation memory lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryLookup<'a> {
    pub hit: Option<&'a TranslationRecord>,
    pub confidence: f64,
}

impl<'a> MemoryLookup<'a> {
    fn miss() -> Self {
        Self {
            hit: None,
            confidence: 0.0,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// Fuzzy lookup of previous translations by language pair and text similarity
#[derive(Debug, Clone)]
pub struct TranslationMemory {
    similarity_threshold: f64,
}

impl TranslationMemory {
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Find the oldest record with the same language pair whose source text
    /// is more similar to `query` than the threshold.
    pub fn lookup<'a>(
        &self,
        query: &str,
        source_language: &str,
        target_language: &str,
        history: &'a [TranslationRecord],
    ) -> MemoryLookup<'a> {
        let query_len = normalized_len(query);

        // Length alone rules out most records before the quadratic comparison
        let hit = history.iter().find(|record| {
            record.source_language == source_language
                && record.target_language == target_language
                && ratio_upper_bound(query_len, normalized_len(&record.source_text)) > self.similarity_threshold
                && ratio(query, &record.source_text) > self.similarity_threshold
        });

        match hit {
            Some(record) => {
                debug!(
                    "Translation memory hit for {}→{}: {:?}",
                    source_language, target_language, record.source_text
                );
                MemoryLookup {
                    hit: Some(record),
                    confidence: record.confidence,
                }
            }
            None => MemoryLookup::miss(),
        }
    }
}

impl Default for TranslationMemory {
    fn default() -> Self {
        Self::new(&MemoryConfig {
            similarity_threshold: 0.90,
        })
    }
}
