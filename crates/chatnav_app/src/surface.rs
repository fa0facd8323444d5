use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chatnav_core::EntryView;
use overlay_logging::nav_debug;

/// The overlay window boundary: a mount point for rendered entries plus
/// the few geometry operations the core's effects need. Styling, markup
/// and input wiring live entirely behind this trait.
pub trait OverlaySurface {
    fn set_entries(&mut self, entries: &[EntryView]);
    fn move_window(&mut self, x: i32, y: i32);
    fn list_near_bottom(&self, threshold_px: u32) -> bool;
    /// Scroll the list to its bottom after `settle_delay`. Fire-and-forget:
    /// the deferral lets layout settle and is never cancelled.
    fn scroll_list_to_bottom(&mut self, settle_delay: Duration);
}

impl<T: OverlaySurface> OverlaySurface for Rc<RefCell<T>> {
    fn set_entries(&mut self, entries: &[EntryView]) {
        self.borrow_mut().set_entries(entries);
    }

    fn move_window(&mut self, x: i32, y: i32) {
        self.borrow_mut().move_window(x, y);
    }

    fn list_near_bottom(&self, threshold_px: u32) -> bool {
        self.borrow().list_near_bottom(threshold_px)
    }

    fn scroll_list_to_bottom(&mut self, settle_delay: Duration) {
        self.borrow_mut().scroll_list_to_bottom(settle_delay);
    }
}

/// Surface double: keeps the last rendered entries and records scroll and
/// move requests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub entries: Vec<EntryView>,
    pub renders: usize,
    pub near_bottom: bool,
    pub bottom_scrolls: Vec<Duration>,
    pub moves: Vec<(i32, i32)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlaySurface for RecordingSurface {
    fn set_entries(&mut self, entries: &[EntryView]) {
        self.entries = entries.to_vec();
        self.renders += 1;
    }

    fn move_window(&mut self, x: i32, y: i32) {
        self.moves.push((x, y));
    }

    fn list_near_bottom(&self, _threshold_px: u32) -> bool {
        self.near_bottom
    }

    fn scroll_list_to_bottom(&mut self, settle_delay: Duration) {
        self.bottom_scrolls.push(settle_delay);
    }
}

/// Surface that only reports renders through the logging facade; used by
/// the CLI inspector, which prints the final listing itself.
#[derive(Debug, Default)]
pub struct LogSurface;

impl OverlaySurface for LogSurface {
    fn set_entries(&mut self, entries: &[EntryView]) {
        nav_debug!("rendered {} entries", entries.len());
    }

    fn move_window(&mut self, _x: i32, _y: i32) {}

    fn list_near_bottom(&self, _threshold_px: u32) -> bool {
        false
    }

    fn scroll_list_to_bottom(&mut self, _settle_delay: Duration) {}
}
