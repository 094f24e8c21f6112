//! Terminal rendering of translation outcomes and history.

use crate::history::TranslationRecord;
use crate::languages::language_name;
use crate::orchestrator::{TranslationOrigin, TranslationOutcome};

/// Longest preview shown in the history table
const PREVIEW_CHARS: usize = 50;

/// Render an outcome the way the translation pane shows it
pub fn render_outcome(outcome: &TranslationOutcome) -> String {
    let mut out = String::new();

    if let Some(detection) = &outcome.detection {
        out.push_str(&format!(
            "Detected language: {} ({:.0}%)\n",
            language_name(&detection.language),
            detection.percent()
        ));
        if outcome.low_confidence_detection {
            out.push_str("Warning: language detection confidence is low. Please verify the source language.\n");
        }
        out.push('\n');
    }

    out.push_str(&outcome.translated_text);
    out.push_str(&format!("\n\n[AI Confidence: {:.0}%]", outcome.confidence));
    if outcome.origin == TranslationOrigin::Memory {
        out.push_str(" (from translation memory)");
    }
    out.push('\n');

    out.push('\n');
    out.push_str(&render_alternatives(outcome));
    out
}

fn render_alternatives(outcome: &TranslationOutcome) -> String {
    if outcome.alternatives.is_empty() {
        return "No significant alternatives found\n".to_string();
    }

    let mut out = String::from("Alternative translations:\n\n");
    for (index, alternative) in outcome.alternatives.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, alternative.label));
        out.push_str(&format!("   [Quality Score: {:.0}/100]\n\n", alternative.quality_score));
    }
    out
}

/// Newest-first history table, limited to `limit` rows when given
pub fn render_history(records: &[TranslationRecord], limit: Option<usize>) -> String {
    if records.is_empty() {
        return "No translation history yet.\n".to_string();
    }

    let mut out = format!(
        "{:<52} {:<52} {:<10} {:<10} {:<16}\n",
        "Original Text", "Translation", "Languages", "Confidence", "Date/Time"
    );
    out.push_str(&"-".repeat(144));
    out.push('\n');

    let rows = records.iter().rev().take(limit.unwrap_or(records.len()));
    for record in rows {
        out.push_str(&format!(
            "{:<52} {:<52} {:<10} {:<10} {:<16}\n",
            preview(&record.source_text),
            preview(&record.translated_text),
            record.language_pair(),
            format!("{:.0}%", record.confidence),
            record.timestamp.format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}

/// First 50 characters with an ellipsis when truncated, newlines flattened
pub fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        flat
    }
}
