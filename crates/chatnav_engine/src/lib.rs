//! Chatnav engine: host-page parsing, message classification and extraction.
mod classify;
mod document;
mod extract;
mod types;

pub use classify::{
    AncestorPredicate, AncestorRule, ClassifierConfig, MessageClassifier, Verdict,
};
pub use document::{visible_text, DomHandle, PageDocument};
pub use extract::{ConfigError, MessageExtractor, SelectorConfig, SelectorSpec};
pub use types::{ExtractedMessage, ExtractionSnapshot, MessageKey};
