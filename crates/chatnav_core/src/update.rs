use crate::state::DragGrab;
use crate::{AppState, Effect, Fingerprint, Msg, TimerPurpose};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let handle = state.allocate_timer();
            vec![Effect::ScheduleTimer {
                handle,
                purpose: TimerPurpose::InitialScan,
                delay_ms: state.tuning().initial_scan_ms,
            }]
        }
        Msg::MutationsObserved => {
            // Cancel-and-reschedule: a burst of mutation batches collapses
            // into one refresh per quiet window.
            let mut effects = Vec::with_capacity(2);
            if let Some(stale) = state.take_debounce() {
                effects.push(Effect::CancelTimer { handle: stale });
            }
            let handle = state.allocate_timer();
            state.set_debounce(handle);
            effects.push(Effect::ScheduleTimer {
                handle,
                purpose: TimerPurpose::DebouncedRefresh,
                delay_ms: state.tuning().debounce_ms,
            });
            effects
        }
        Msg::TimerElapsed { handle, purpose } => match purpose {
            TimerPurpose::InitialScan => vec![Effect::ExtractMessages],
            TimerPurpose::DebouncedRefresh => {
                // A cancelled timer may still fire if the platform raced the
                // cancellation; only the live handle triggers a refresh.
                if state.debounce() == Some(handle) {
                    state.take_debounce();
                    vec![Effect::ExtractMessages]
                } else {
                    Vec::new()
                }
            }
            TimerPurpose::HighlightClear { key } => vec![Effect::ClearHighlight { key }],
        },
        Msg::SnapshotReady(records) => {
            let fingerprint = Fingerprint::of(&records);
            let unchanged = state.fingerprint() == Some(&fingerprint);
            if unchanged && state.search_term().is_empty() {
                // Nothing meaningful changed and nobody is filtering;
                // drop the snapshot and keep the current render.
                Vec::new()
            } else {
                state.retain_snapshot(records, fingerprint);
                vec![state.sync_list_scroll_effect()]
            }
        }
        Msg::SearchChanged(term) => {
            // Search re-projects the cached snapshot; it never triggers
            // extraction, so it may read a one-refresh-stale list.
            state.set_search_term(term);
            vec![state.sync_list_scroll_effect()]
        }
        Msg::EntryActivated { key } => {
            // The clear timer is fire-once and not cancellable. Activating
            // the same entry twice inside the highlight window means the
            // first timer clears the second highlight early; accepted.
            let handle = state.allocate_timer();
            vec![
                Effect::ScrollToMessage { key },
                Effect::HighlightMessage { key },
                Effect::ScheduleTimer {
                    handle,
                    purpose: TimerPurpose::HighlightClear { key },
                    delay_ms: state.tuning().highlight_ms,
                },
            ]
        }
        Msg::DragStarted {
            pointer_x,
            pointer_y,
            window_x,
            window_y,
        } => {
            state.begin_drag(DragGrab {
                grab_x: pointer_x - window_x,
                grab_y: pointer_y - window_y,
            });
            Vec::new()
        }
        Msg::DragMoved {
            pointer_x,
            pointer_y,
        } => match state.drag() {
            Some(grab) => vec![Effect::MoveWindow {
                x: pointer_x - grab.grab_x,
                y: pointer_y - grab.grab_y,
            }],
            None => Vec::new(),
        },
        Msg::DragEnded => {
            state.end_drag();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
