use crate::document::DomHandle;

pub type MessageKey = u64;

const KEY_INDEX_BITS: u32 = 32;

/// Mints a key carrying the snapshot generation in its upper half and the
/// 1-based record position in its lower half. Keys from a superseded
/// snapshot fail to resolve instead of pointing at the wrong element.
pub(crate) fn compose_key(generation: u64, index: usize) -> MessageKey {
    ((generation & u64::from(u32::MAX)) << KEY_INDEX_BITS) | (index as u64 + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub key: MessageKey,
    /// Trimmed visible text; the dedup key within the snapshot.
    pub text: String,
    pub node: DomHandle,
}

/// The full result of one extraction pass. Superseded wholesale by the next
/// pass, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSnapshot {
    pub generation: u64,
    pub messages: Vec<ExtractedMessage>,
}

impl ExtractionSnapshot {
    /// Resolves a key minted by this snapshot. Keys from another generation
    /// resolve to `None`; a click bound to a superseded list degrades to a
    /// silent no-op instead of jumping to an unrelated element.
    pub fn resolve(&self, key: MessageKey) -> Option<DomHandle> {
        let generation = key >> KEY_INDEX_BITS;
        if generation != self.generation & u64::from(u32::MAX) {
            return None;
        }
        let position = (key & u64::from(u32::MAX)) as usize;
        let index = position.checked_sub(1)?;
        self.messages.get(index).map(|message| message.node)
    }
}
