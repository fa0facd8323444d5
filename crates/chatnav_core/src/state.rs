use crate::view_model::{matches_term, preview_text, EntryView, NavViewModel, PREVIEW_CHARS};
use crate::Effect;

pub type MessageKey = u64;
pub type TimerHandle = u64;

/// Quiet window after the last observed mutation batch.
pub const DEBOUNCE_MS: u64 = 500;
/// Unconditional startup scan, letting the page's initial render settle.
pub const INITIAL_SCAN_MS: u64 = 1500;
/// Lifetime of the activation highlight.
pub const HIGHLIGHT_MS: u64 = 2000;
/// "Close enough to the bottom" threshold for the auto-scroll policy.
pub const NEAR_BOTTOM_PX: u32 = 100;
/// Deferral before the list is scrolled to bottom, letting layout settle.
pub const SCROLL_SETTLE_MS: u64 = 100;

/// One retained user message. Ordinals are assigned at view projection
/// time, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub key: MessageKey,
    /// Trimmed visible text; unique within one snapshot (dedup key).
    pub text: String,
}

/// Coarse signature of a snapshot, used only to decide whether re-rendering
/// is worthwhile. False negatives are an accepted tradeoff for cheapness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    count: usize,
    first_text: String,
}

impl Fingerprint {
    pub fn of(records: &[MessageRecord]) -> Self {
        Self {
            count: records.len(),
            first_text: records
                .first()
                .map(|record| record.text.clone())
                .unwrap_or_default(),
        }
    }
}

/// Timing and sizing knobs, overridable through the app config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    pub debounce_ms: u64,
    pub initial_scan_ms: u64,
    pub highlight_ms: u64,
    pub near_bottom_px: u32,
    pub scroll_settle_ms: u64,
    pub preview_chars: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            initial_scan_ms: INITIAL_SCAN_MS,
            highlight_ms: HIGHLIGHT_MS,
            near_bottom_px: NEAR_BOTTOM_PX,
            scroll_settle_ms: SCROLL_SETTLE_MS,
            preview_chars: PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DragGrab {
    pub grab_x: i32,
    pub grab_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    records: Vec<MessageRecord>,
    fingerprint: Option<Fingerprint>,
    search_term: String,
    /// True until the first list render has been synced to the bottom.
    first_scroll_pending: bool,
    /// The single live debounce handle; at most one exists at any time.
    debounce: Option<TimerHandle>,
    next_timer: TimerHandle,
    drag: Option<DragGrab>,
    tuning: Tuning,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            records: Vec::new(),
            fingerprint: None,
            search_term: String::new(),
            first_scroll_pending: true,
            debounce: None,
            next_timer: 0,
            drag: None,
            tuning,
            dirty: false,
        }
    }

    /// Projects the retained snapshot through the active search filter.
    pub fn view(&self) -> NavViewModel {
        let entries = self
            .records
            .iter()
            .filter(|record| matches_term(&record.text, &self.search_term))
            .enumerate()
            .map(|(index, record)| EntryView {
                key: record.key,
                ordinal: index + 1,
                preview: preview_text(&record.text, self.tuning.preview_chars),
            })
            .collect();

        NavViewModel {
            entries,
            search_term: self.search_term.clone(),
            message_count: self.records.len(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub(crate) fn allocate_timer(&mut self) -> TimerHandle {
        self.next_timer += 1;
        self.next_timer
    }

    pub(crate) fn debounce(&self) -> Option<TimerHandle> {
        self.debounce
    }

    pub(crate) fn take_debounce(&mut self) -> Option<TimerHandle> {
        self.debounce.take()
    }

    pub(crate) fn set_debounce(&mut self, handle: TimerHandle) {
        self.debounce = Some(handle);
    }

    pub(crate) fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub(crate) fn search_term(&self) -> &str {
        &self.search_term
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.dirty = true;
    }

    /// Replaces the snapshot wholesale; the previous one is superseded, not
    /// merged.
    pub(crate) fn retain_snapshot(&mut self, records: Vec<MessageRecord>, fingerprint: Fingerprint) {
        self.records = records;
        self.fingerprint = Some(fingerprint);
        self.dirty = true;
    }

    /// Builds the auto-scroll effect for a render, consuming the
    /// first-render flag.
    pub(crate) fn sync_list_scroll_effect(&mut self) -> Effect {
        let force = std::mem::take(&mut self.first_scroll_pending);
        Effect::SyncListScroll {
            force,
            near_bottom_px: self.tuning.near_bottom_px,
            settle_delay_ms: self.tuning.scroll_settle_ms,
        }
    }

    pub(crate) fn drag(&self) -> Option<DragGrab> {
        self.drag
    }

    pub(crate) fn begin_drag(&mut self, grab: DragGrab) {
        self.drag = Some(grab);
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = None;
    }
}
