use crate::{MessageKey, TimerHandle};

/// What a scheduled timer should do when it fires. The platform hands the
/// purpose back unchanged in `Msg::TimerElapsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// One-shot startup scan, independent of the debounce path.
    InitialScan,
    /// Coalesced refresh after a quiet window of mutations.
    DebouncedRefresh,
    /// Remove the transient highlight from a previously activated message.
    HighlightClear { key: MessageKey },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleTimer {
        handle: TimerHandle,
        purpose: TimerPurpose,
        delay_ms: u64,
    },
    CancelTimer {
        handle: TimerHandle,
    },
    /// Re-extract messages from the host page and reply with
    /// `Msg::SnapshotReady`.
    ExtractMessages,
    /// Smooth-scroll the referenced message into centered view.
    ScrollToMessage { key: MessageKey },
    HighlightMessage { key: MessageKey },
    ClearHighlight { key: MessageKey },
    /// Scroll the list view to its bottom after `settle_delay_ms`, either
    /// unconditionally (`force`) or when the view is already within
    /// `near_bottom_px` of the bottom.
    SyncListScroll {
        force: bool,
        near_bottom_px: u32,
        settle_delay_ms: u64,
    },
    /// Reposition the overlay window (drag-to-move).
    MoveWindow { x: i32, y: i32 },
}
