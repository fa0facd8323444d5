use std::cell::RefCell;
use std::rc::Rc;

use chatnav_engine::DomHandle;

/// Capabilities the overlay consumes from the host page. Scroll and
/// highlight requests may target elements the page has since removed; a
/// host must treat those as no-ops rather than failures.
pub trait HostPage {
    /// The current serialized document, reparsed per refresh pass.
    fn html(&self) -> String;
    fn scroll_to(&mut self, node: DomHandle);
    fn set_highlight(&mut self, node: DomHandle, on: bool);
}

impl<T: HostPage> HostPage for Rc<RefCell<T>> {
    fn html(&self) -> String {
        self.borrow().html()
    }

    fn scroll_to(&mut self, node: DomHandle) {
        self.borrow_mut().scroll_to(node);
    }

    fn set_highlight(&mut self, node: DomHandle, on: bool) {
        self.borrow_mut().set_highlight(node, on);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    ScrolledTo(DomHandle),
    HighlightSet(DomHandle),
    HighlightCleared(DomHandle),
}

/// Host double backed by swappable fixture HTML; records every operation
/// it is asked to perform.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    html: String,
    pub ops: Vec<HostOp>,
}

impl ScriptedHost {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ops: Vec::new(),
        }
    }

    /// Replaces the fixture document, simulating a page mutation.
    pub fn swap_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }
}

impl HostPage for ScriptedHost {
    fn html(&self) -> String {
        self.html.clone()
    }

    fn scroll_to(&mut self, node: DomHandle) {
        self.ops.push(HostOp::ScrolledTo(node));
    }

    fn set_highlight(&mut self, node: DomHandle, on: bool) {
        self.ops.push(if on {
            HostOp::HighlightSet(node)
        } else {
            HostOp::HighlightCleared(node)
        });
    }
}
