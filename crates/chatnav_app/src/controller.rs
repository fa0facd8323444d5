use std::time::Duration;

use chatnav_core::{update, AppState, Effect, MessageRecord, Msg, NavViewModel};
use chatnav_engine::{
    ConfigError, DomHandle, ExtractionSnapshot, MessageClassifier, MessageExtractor, MessageKey,
    PageDocument,
};
use overlay_logging::nav_debug;

use crate::config::OverlayConfig;
use crate::host::HostPage;
use crate::scheduler::TimerScheduler;
use crate::surface::OverlaySurface;

/// The retained page state one refresh pass produced: the parsed document
/// and the snapshot whose keys resolve against it.
struct ActivePage {
    document: PageDocument,
    snapshot: ExtractionSnapshot,
}

/// Owns the core state and drives it against the platform: applies
/// messages, executes effects, re-renders the surface when the projection
/// changed. All mutation happens on the caller's thread; timers and
/// mutation observers only enqueue messages.
pub struct OverlayController<H, S, T> {
    state: AppState,
    extractor: MessageExtractor,
    host: H,
    surface: S,
    scheduler: T,
    page: Option<ActivePage>,
    staged: Option<ActivePage>,
    next_generation: u64,
}

impl<H: HostPage, S: OverlaySurface, T: TimerScheduler> OverlayController<H, S, T> {
    pub fn new(config: OverlayConfig, host: H, surface: S, scheduler: T) -> Result<Self, ConfigError> {
        let extractor = MessageExtractor::new(
            config.selectors,
            MessageClassifier::new(config.classifier),
        )?;
        Ok(Self {
            state: AppState::with_tuning(config.timings.to_tuning()),
            extractor,
            host,
            surface,
            scheduler,
            page: None,
            staged: None,
            next_generation: 0,
        })
    }

    /// Kicks off the startup settle scan.
    pub fn start(&mut self) {
        self.dispatch(Msg::Started);
    }

    pub fn view(&self) -> NavViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let is_snapshot = matches!(&msg, Msg::SnapshotReady(_));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;

        if is_snapshot {
            if dirty {
                // The core retained the records; serve clicks from the
                // matching document from now on.
                if let Some(staged) = self.staged.take() {
                    self.page = Some(staged);
                }
            } else {
                // Skipped refresh: keep the previous document alive so the
                // entries already on screen keep resolving.
                self.staged = None;
            }
        }

        if dirty {
            self.render();
        }
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleTimer {
                handle,
                purpose,
                delay_ms,
            } => self
                .scheduler
                .schedule(handle, Duration::from_millis(delay_ms), purpose),
            Effect::CancelTimer { handle } => self.scheduler.cancel(handle),
            Effect::ExtractMessages => self.refresh(),
            Effect::ScrollToMessage { key } => match self.resolve(key) {
                Some(node) => self.host.scroll_to(node),
                None => nav_debug!("scroll target {key:#x} is stale; ignoring"),
            },
            Effect::HighlightMessage { key } => match self.resolve(key) {
                Some(node) => self.host.set_highlight(node, true),
                None => nav_debug!("highlight target {key:#x} is stale; ignoring"),
            },
            Effect::ClearHighlight { key } => match self.resolve(key) {
                Some(node) => self.host.set_highlight(node, false),
                None => nav_debug!("highlight target {key:#x} is stale; ignoring"),
            },
            Effect::SyncListScroll {
                force,
                near_bottom_px,
                settle_delay_ms,
            } => {
                // Keep the newest messages in view without fighting a user
                // who scrolled up to read history.
                if force || self.surface.list_near_bottom(near_bottom_px) {
                    self.surface
                        .scroll_list_to_bottom(Duration::from_millis(settle_delay_ms));
                }
            }
            Effect::MoveWindow { x, y } => self.surface.move_window(x, y),
        }
    }

    /// One extraction pass: reparse the host page and feed the resulting
    /// records back through the core's change-detection gate.
    fn refresh(&mut self) {
        let generation = self.next_generation;
        self.next_generation += 1;
        overlay_logging::set_refresh_pass(generation);

        let source = self.host.html();
        let document = PageDocument::parse(&source, generation);
        let snapshot = self.extractor.extract(&document);
        let records: Vec<MessageRecord> = snapshot
            .messages
            .iter()
            .map(|message| MessageRecord {
                key: message.key,
                text: message.text.clone(),
            })
            .collect();

        self.staged = Some(ActivePage { document, snapshot });
        self.dispatch(Msg::SnapshotReady(records));
    }

    /// Maps a message key to a live element handle. Keys minted by a
    /// superseded snapshot, or elements gone from the retained document,
    /// yield `None` and the caller degrades to a no-op.
    fn resolve(&self, key: MessageKey) -> Option<DomHandle> {
        let page = self.page.as_ref()?;
        let node = page.snapshot.resolve(key)?;
        page.document.resolve(node).map(|element| element.id())
    }

    fn render(&mut self) {
        let view = self.state.view();
        nav_debug!(
            "render: {} entries of {} messages (term: {:?})",
            view.entries.len(),
            view.message_count,
            view.search_term
        );
        self.surface.set_entries(&view.entries);
    }
}
