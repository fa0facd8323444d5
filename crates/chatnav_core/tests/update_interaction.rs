use std::sync::Once;

use chatnav_core::{
    update, AppState, Effect, MessageRecord, Msg, TimerPurpose, HIGHLIGHT_MS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(overlay_logging::initialize_for_tests);
}

fn record(key: u64, text: &str) -> MessageRecord {
    MessageRecord {
        key,
        text: text.to_string(),
    }
}

fn with_snapshot(records: Vec<MessageRecord>) -> AppState {
    let (mut state, _) = update(AppState::new(), Msg::SnapshotReady(records));
    state.consume_dirty();
    state
}

#[test]
fn activation_scrolls_highlights_and_schedules_clear() {
    init_logging();
    let state = with_snapshot(vec![record(7, "take me there")]);

    let (_, effects) = update(state, Msg::EntryActivated { key: 7 });

    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0], Effect::ScrollToMessage { key: 7 });
    assert_eq!(effects[1], Effect::HighlightMessage { key: 7 });
    assert!(matches!(
        effects[2],
        Effect::ScheduleTimer {
            purpose: TimerPurpose::HighlightClear { key: 7 },
            delay_ms: HIGHLIGHT_MS,
            ..
        }
    ));
}

#[test]
fn highlight_clear_timer_emits_clear() {
    init_logging();
    let state = with_snapshot(vec![record(7, "take me there")]);
    let (state, effects) = update(state, Msg::EntryActivated { key: 7 });
    let handle = match effects[2] {
        Effect::ScheduleTimer { handle, .. } => handle,
        _ => unreachable!(),
    };

    let (_, effects) = update(
        state,
        Msg::TimerElapsed {
            handle,
            purpose: TimerPurpose::HighlightClear { key: 7 },
        },
    );
    assert_eq!(effects, vec![Effect::ClearHighlight { key: 7 }]);
}

#[test]
fn double_activation_highlight_race_is_benign() {
    init_logging();
    let state = with_snapshot(vec![record(7, "take me there")]);

    // Clear timers are fire-once and not cancellable: activating the same
    // entry twice leaves two independent timers. The first to fire clears
    // the second activation's highlight early; both fires are harmless.
    let (state, first) = update(state, Msg::EntryActivated { key: 7 });
    let (state, second) = update(state, Msg::EntryActivated { key: 7 });
    let first_handle = match first[2] {
        Effect::ScheduleTimer { handle, .. } => handle,
        _ => unreachable!(),
    };
    let second_handle = match second[2] {
        Effect::ScheduleTimer { handle, .. } => handle,
        _ => unreachable!(),
    };
    assert_ne!(first_handle, second_handle);

    let (state, effects) = update(
        state,
        Msg::TimerElapsed {
            handle: first_handle,
            purpose: TimerPurpose::HighlightClear { key: 7 },
        },
    );
    assert_eq!(effects, vec![Effect::ClearHighlight { key: 7 }]);

    let (_, effects) = update(
        state,
        Msg::TimerElapsed {
            handle: second_handle,
            purpose: TimerPurpose::HighlightClear { key: 7 },
        },
    );
    assert_eq!(effects, vec![Effect::ClearHighlight { key: 7 }]);
}

#[test]
fn search_reprojects_cached_snapshot_without_extraction() {
    init_logging();
    let state = with_snapshot(vec![
        record(1, "Explain fMRI preprocessing steps"),
        record(2, "What about diffusion imaging?"),
    ]);

    let (mut state, effects) = update(state, Msg::SearchChanged("fmri".to_string()));

    assert!(!effects.contains(&Effect::ExtractMessages));
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].key, 1);
    // The full snapshot is retained; only the projection is filtered.
    assert_eq!(view.message_count, 2);
}

#[test]
fn ordinals_follow_filtered_positions() {
    init_logging();
    let state = with_snapshot(vec![
        record(1, "alpha question"),
        record(2, "beta question"),
        record(3, "alpha followup"),
    ]);
    let (state, _) = update(state, Msg::SearchChanged("alpha".to_string()));

    let view = state.view();
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].ordinal, 1);
    assert_eq!(view.entries[0].key, 1);
    assert_eq!(view.entries[1].ordinal, 2);
    assert_eq!(view.entries[1].key, 3);
}

#[test]
fn empty_term_lists_every_record_in_snapshot_order() {
    init_logging();
    let texts = ["one", "two", "three", "four"];
    let records = texts
        .iter()
        .enumerate()
        .map(|(index, text)| record(index as u64 + 1, text))
        .collect();
    let state = with_snapshot(records);

    let view = state.view();
    assert_eq!(view.entries.len(), texts.len());
    for (index, entry) in view.entries.iter().enumerate() {
        assert_eq!(entry.ordinal, index + 1);
        assert_eq!(entry.preview, texts[index]);
    }
}

#[test]
fn long_texts_are_truncated_with_ellipsis() {
    init_logging();
    // 51 characters: one past the preview limit.
    let text = "Explain fMRI preprocessing steps in detail please..";
    assert_eq!(text.chars().count(), 51);
    let state = with_snapshot(vec![record(1, text)]);

    let view = state.view();
    assert_eq!(view.entries.len(), 1);
    assert!(view.entries[0].preview.ends_with("..."));
    assert_eq!(view.entries[0].preview.chars().count(), 53);
}

#[test]
fn drag_moves_window_relative_to_grab_point() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(
        state,
        Msg::DragStarted {
            pointer_x: 110,
            pointer_y: 120,
            window_x: 100,
            window_y: 100,
        },
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::DragMoved {
            pointer_x: 150,
            pointer_y: 160,
        },
    );
    assert_eq!(effects, vec![Effect::MoveWindow { x: 140, y: 140 }]);

    let (state, effects) = update(state, Msg::DragEnded);
    assert!(effects.is_empty());

    // Pointer movement without a held header does nothing.
    let (_, effects) = update(
        state,
        Msg::DragMoved {
            pointer_x: 10,
            pointer_y: 10,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn drag_does_not_disturb_the_snapshot() {
    init_logging();
    let state = with_snapshot(vec![record(1, "kept")]);
    let (state, _) = update(
        state,
        Msg::DragStarted {
            pointer_x: 0,
            pointer_y: 0,
            window_x: 0,
            window_y: 0,
        },
    );
    let (mut state, _) = update(
        state,
        Msg::DragMoved {
            pointer_x: 5,
            pointer_y: 5,
        },
    );

    assert!(!state.consume_dirty());
    assert_eq!(state.view().message_count, 1);
}
