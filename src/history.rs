use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Result, TranslatorError};

/// One completed translation, as persisted in the history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    #[serde(rename = "source")]
    pub source_text: String,
    #[serde(rename = "translation")]
    pub translated_text: String,
    #[serde(rename = "src_lang")]
    pub source_language: String,
    #[serde(rename = "dest_lang")]
    pub target_language: String,
    pub confidence: f64,
    pub timestamp: NaiveDateTime,
}

impl TranslationRecord {
    /// Create a record stamped with the current local time, to the microsecond
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            confidence,
            timestamp: Local::now().naive_local().trunc_subsecs(6),
        }
    }

    /// Language pair rendered as `src→dest`
    pub fn language_pair(&self) -> String {
        format!("{}→{}", self.source_language, self.target_language)
    }
}

/// Insertion-ordered translation history backed by a single JSON file.
///
/// Every append rewrites the whole file. The store assumes one writer.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<TranslationRecord>,
}

impl HistoryStore {
    /// Load the history at `path`.
    ///
    /// A missing or unreadable file is treated as an empty history.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = read_records(&path);
        info!("Loaded {} history records from {}", records.len(), path.display());
        Self { path, records }
    }

    /// Create an empty store that will persist to `path` on the first append
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and persist the entire sequence.
    ///
    /// When the write fails the record is dropped again, so memory and file
    /// never disagree.
    pub fn append(&mut self, record: TranslationRecord) -> Result<()> {
        debug!(
            "Appending history record {} ({})",
            self.records.len() + 1,
            record.language_pair()
        );
        self.records.push(record);
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Overwrite the backing file with the in-memory sequence
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, content).map_err(|e| {
            TranslatorError::History(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Saved {} history records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

fn read_records(path: &Path) -> Vec<TranslationRecord> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No history at {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<TranslationRecord>>(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!("Ignoring unparseable history file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
