use std::collections::HashSet;

use overlay_logging::{nav_debug, nav_trace};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::MessageClassifier;
use crate::document::{visible_text, PageDocument};
use crate::types::{compose_key, ExtractedMessage, ExtractionSnapshot};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid selector `{selector}` ({purpose}): {message}")]
    InvalidSelector {
        selector: String,
        purpose: String,
        message: String,
    },
}

/// One structural selector plus the host-page shape it targets. The list is
/// configuration, not logic: host pages restructure, and keeping up should
/// be a data edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSpec {
    pub selector: String,
    pub purpose: String,
}

impl SelectorSpec {
    pub fn new(selector: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            purpose: purpose.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub entries: Vec<SelectorSpec>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entries: vec![
                SelectorSpec::new("user-query .query-text", "Gemini user turn body"),
                SelectorSpec::new(
                    "[data-testid=\"message_text_content\"]",
                    "test-id labeled message text",
                ),
                SelectorSpec::new("div[class^=\"fbb\"]", "obfuscated class prefix layout"),
                SelectorSpec::new(".query-text-wrapper", "wrapped query text"),
                SelectorSpec::new(
                    "[data-message-author-role=\"user\"]",
                    "author-role attributed container",
                ),
            ],
        }
    }
}

struct CompiledSelector {
    selector: Selector,
    source: String,
    purpose: String,
}

pub struct MessageExtractor {
    selectors: Vec<CompiledSelector>,
    classifier: MessageClassifier,
}

impl MessageExtractor {
    /// Compiles the selector list up front; an unparsable selector is a
    /// configuration error, not something to skip silently at runtime.
    pub fn new(
        config: SelectorConfig,
        classifier: MessageClassifier,
    ) -> Result<Self, ConfigError> {
        let mut selectors = Vec::with_capacity(config.entries.len());
        for spec in config.entries {
            let selector =
                Selector::parse(&spec.selector).map_err(|err| ConfigError::InvalidSelector {
                    selector: spec.selector.clone(),
                    purpose: spec.purpose.clone(),
                    message: err.to_string(),
                })?;
            selectors.push(CompiledSelector {
                selector,
                source: spec.selector,
                purpose: spec.purpose,
            });
        }
        Ok(Self {
            selectors,
            classifier,
        })
    }

    /// Runs every selector in list order, preserving document order within
    /// each selector, and dedups by visible text. The seen-set is only fed
    /// by retained candidates, so a rejected first occurrence does not
    /// shadow a genuine later one.
    pub fn extract(&self, document: &PageDocument) -> ExtractionSnapshot {
        let mut seen: HashSet<String> = HashSet::new();
        let mut messages: Vec<ExtractedMessage> = Vec::new();
        let mut candidates = 0usize;

        for compiled in &self.selectors {
            let before = messages.len();
            for element in document.select(&compiled.selector) {
                candidates += 1;
                let text = visible_text(element);
                if text.is_empty() || seen.contains(&text) {
                    continue;
                }
                if !self.classifier.is_user_message(element) {
                    continue;
                }
                let key = compose_key(document.generation(), messages.len());
                seen.insert(text.clone());
                messages.push(ExtractedMessage {
                    key,
                    text,
                    node: element.id(),
                });
            }
            nav_trace!(
                "selector `{}` ({}) retained {}",
                compiled.source,
                compiled.purpose,
                messages.len() - before
            );
        }

        nav_debug!(
            "extraction pass gen={} candidates={} retained={}",
            document.generation(),
            candidates,
            messages.len()
        );

        ExtractionSnapshot {
            generation: document.generation(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageExtractor, SelectorConfig, SelectorSpec};
    use crate::classify::{ClassifierConfig, MessageClassifier};
    use crate::document::PageDocument;

    fn default_extractor() -> MessageExtractor {
        MessageExtractor::new(
            SelectorConfig::default(),
            MessageClassifier::new(ClassifierConfig::default()),
        )
        .expect("default config compiles")
    }

    #[test]
    fn default_selector_list_compiles() {
        default_extractor();
    }

    #[test]
    fn invalid_selector_is_a_config_error() {
        let config = SelectorConfig {
            entries: vec![SelectorSpec::new("div[", "broken")],
        };
        let result = MessageExtractor::new(
            config,
            MessageClassifier::new(ClassifierConfig::default()),
        );
        let err = result.err().expect("config error");
        let rendered = err.to_string();
        assert!(rendered.contains("div["));
        assert!(rendered.contains("broken"));
    }

    #[test]
    fn empty_page_yields_an_empty_snapshot() {
        let document = PageDocument::parse("<html><body></body></html>", 1);
        let snapshot = default_extractor().extract(&document);
        assert!(snapshot.messages.is_empty());
    }

    #[test]
    fn rejected_first_occurrence_does_not_shadow_a_later_one() {
        // The sidebar copy of the text is rejected by the classifier; the
        // genuine message with identical text must still be retained.
        let html = r#"
            <aside class="sidebar">
                <div class="query-text-wrapper">repeated question</div>
            </aside>
            <div class="query-text-wrapper">repeated question</div>
        "#;
        let document = PageDocument::parse(html, 1);
        let snapshot = default_extractor().extract(&document);
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].text, "repeated question");
    }
}
