use crate::MessageKey;

/// Default preview length in characters.
pub const PREVIEW_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavViewModel {
    pub entries: Vec<EntryView>,
    pub search_term: String,
    pub message_count: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub key: MessageKey,
    /// 1-based position within the filtered sequence.
    pub ordinal: usize,
    pub preview: String,
}

/// Truncates `text` to `max_chars` characters, appending an ellipsis marker
/// only when truncation occurred.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((byte_end, _)) => format!("{}{}", &text[..byte_end], ELLIPSIS),
        None => text.to_string(),
    }
}

/// True when `text` contains `term`, both compared lowercased.
/// An empty term matches everything.
pub(crate) fn matches_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{matches_term, preview_text, PREVIEW_CHARS};

    #[test]
    fn short_text_kept_as_is() {
        let text = "short preview";
        assert_eq!(preview_text(text, PREVIEW_CHARS), text);
    }

    #[test]
    fn text_at_limit_is_not_truncated() {
        let text: String = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview_text(&text, PREVIEW_CHARS), text);
    }

    #[test]
    fn text_over_limit_gets_ellipsis() {
        let text: String = "a".repeat(PREVIEW_CHARS + 1);
        let preview = preview_text(&text, PREVIEW_CHARS);
        assert_eq!(preview.len(), PREVIEW_CHARS + "...".len());
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text: String = "ä".repeat(PREVIEW_CHARS + 3);
        let preview = preview_text(&text, PREVIEW_CHARS);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + "...".len());
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn term_matching_is_case_insensitive() {
        assert!(matches_term("Explain fMRI preprocessing", "fmri"));
        assert!(matches_term("Explain fMRI preprocessing", ""));
        assert!(!matches_term("Explain fMRI preprocessing", "xyz"));
    }
}
