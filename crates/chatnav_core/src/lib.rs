//! Chatnav core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, TimerPurpose};
pub use msg::Msg;
pub use state::{
    AppState, Fingerprint, MessageKey, MessageRecord, TimerHandle, Tuning, DEBOUNCE_MS,
    HIGHLIGHT_MS, INITIAL_SCAN_MS, NEAR_BOTTOM_PX, SCROLL_SETTLE_MS,
};
pub use update::update;
pub use view_model::{preview_text, EntryView, NavViewModel, PREVIEW_CHARS};
