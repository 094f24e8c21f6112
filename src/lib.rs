//! smart-translator - Translation with a fuzzy translation memory
//!
//! Translates text through an external service, reuses earlier results from a
//! local JSON history when a similar text was already translated, attaches a
//! heuristic confidence score, and speaks translations aloud.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod similarity;
pub mod memory;
pub mod confidence;
pub mod languages;
pub mod translate;
pub mod speech;
pub mod orchestrator;
pub mod display;
