use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::document::visible_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AncestorPredicate {
    /// The element's class attribute (lowercased) contains any fragment.
    ClassContainsAny(Vec<String>),
    /// The element's tag name is any of the given names.
    TagIsAny(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

/// One entry of the ancestor rule table. Rules are data, not logic: host
/// pages change, and adapting to them should be a config edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorRule {
    pub predicate: AncestorPredicate,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Accept,
    Reject,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Candidates with fewer trimmed chars are rejected outright; filters
    /// whitespace- and icon-only nodes.
    pub min_text_chars: usize,
    /// Upper bound on the ancestor walk, counting the candidate itself.
    pub max_depth: usize,
    /// Id or class fragment marking the overlay's own subtree.
    pub overlay_marker: String,
    pub rules: Vec<AncestorRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let reject_classes = ["sidebar", "history", "markdown", "thought", "assistant", "answer"];
        Self {
            min_text_chars: 2,
            max_depth: 10,
            overlay_marker: "chatnav-overlay".to_string(),
            rules: vec![
                AncestorRule {
                    predicate: AncestorPredicate::ClassContainsAny(
                        reject_classes.iter().map(|s| s.to_string()).collect(),
                    ),
                    verdict: Verdict::Reject,
                },
                AncestorRule {
                    predicate: AncestorPredicate::TagIsAny(vec![
                        "aside".to_string(),
                        "nav".to_string(),
                    ]),
                    verdict: Verdict::Reject,
                },
                AncestorRule {
                    predicate: AncestorPredicate::TagIsAny(vec!["user-query".to_string()]),
                    verdict: Verdict::Accept,
                },
            ],
        }
    }
}

/// Decides whether a candidate element is a genuine user message, as
/// opposed to assistant output, sidebar/history chrome or navigation
/// furniture.
pub struct MessageClassifier {
    config: ClassifierConfig,
}

impl MessageClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn is_user_message(&self, candidate: ElementRef<'_>) -> bool {
        let text = visible_text(candidate);
        if text.chars().count() < self.config.min_text_chars {
            return false;
        }
        self.classify_ancestry(candidate)
    }

    /// Walks from the candidate upward, applying the rule table at each
    /// node. Accept and Reject short-circuit; exhausting the depth bound
    /// accepts. Dropping a real message is worse than listing a borderline
    /// one, so the fallback favors recall.
    fn classify_ancestry(&self, candidate: ElementRef<'_>) -> bool {
        let mut current = Some(candidate);
        let mut depth = 0;
        while let Some(element) = current {
            if depth >= self.config.max_depth {
                break;
            }
            match self.evaluate(element) {
                Outcome::Accept => return true,
                Outcome::Reject => return false,
                Outcome::Continue => {}
            }
            current = element.parent().and_then(ElementRef::wrap);
            depth += 1;
        }
        true
    }

    fn evaluate(&self, element: ElementRef<'_>) -> Outcome {
        let tag = element.value().name().to_ascii_lowercase();
        let class_attr = element
            .value()
            .attr("class")
            .unwrap_or_default()
            .to_lowercase();

        // The overlay must never index its own UI.
        if self.is_overlay_chrome(element, &class_attr) {
            return Outcome::Reject;
        }

        for rule in &self.config.rules {
            let hit = match &rule.predicate {
                AncestorPredicate::ClassContainsAny(fragments) => fragments
                    .iter()
                    .any(|fragment| class_attr.contains(fragment.as_str())),
                AncestorPredicate::TagIsAny(tags) => {
                    tags.iter().any(|name| name.eq_ignore_ascii_case(&tag))
                }
            };
            if hit {
                return match rule.verdict {
                    Verdict::Accept => Outcome::Accept,
                    Verdict::Reject => Outcome::Reject,
                };
            }
        }
        Outcome::Continue
    }

    fn is_overlay_chrome(&self, element: ElementRef<'_>, class_attr: &str) -> bool {
        let marker = &self.config.overlay_marker;
        if marker.is_empty() {
            return false;
        }
        element.value().id().is_some_and(|id| id == marker) || class_attr.contains(marker.as_str())
    }
}
