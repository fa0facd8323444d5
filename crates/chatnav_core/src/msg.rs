use crate::{MessageKey, MessageRecord, TimerHandle, TimerPurpose};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The overlay has been mounted; schedule the startup settle scan.
    Started,
    /// The host's mutation observer reported a batch of structural changes.
    /// Payload-free: the refresh path re-extracts rather than diffing.
    MutationsObserved,
    /// A previously scheduled timer fired.
    TimerElapsed {
        handle: TimerHandle,
        purpose: TimerPurpose,
    },
    /// A completed extraction pass over the host page.
    SnapshotReady(Vec<MessageRecord>),
    /// User edited the search input.
    SearchChanged(String),
    /// User clicked a list entry.
    EntryActivated { key: MessageKey },
    /// Pointer went down on the overlay header.
    DragStarted {
        pointer_x: i32,
        pointer_y: i32,
        window_x: i32,
        window_y: i32,
    },
    /// Pointer moved while the header is held.
    DragMoved { pointer_x: i32, pointer_y: i32 },
    /// Pointer released.
    DragEnded,
    /// Fallback for placeholder wiring.
    NoOp,
}
