use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chatnav_core::{Msg, TimerHandle, TimerPurpose};

/// Cancellable one-shot timers. `schedule` arms a timer that delivers
/// `Msg::TimerElapsed` with the given handle and purpose; `cancel` revokes
/// a pending one. The core guards against fires that race a cancellation,
/// so implementations may be best-effort.
pub trait TimerScheduler {
    fn schedule(&mut self, handle: TimerHandle, delay: Duration, purpose: TimerPurpose);
    fn cancel(&mut self, handle: TimerHandle);
}

impl<T: TimerScheduler> TimerScheduler for Rc<RefCell<T>> {
    fn schedule(&mut self, handle: TimerHandle, delay: Duration, purpose: TimerPurpose) {
        self.borrow_mut().schedule(handle, delay, purpose);
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.borrow_mut().cancel(handle);
    }
}

/// Thread-per-timer scheduler feeding the controller's message queue.
pub struct ThreadScheduler {
    msg_tx: Sender<Msg>,
    cancelled: Arc<Mutex<HashSet<TimerHandle>>>,
}

impl ThreadScheduler {
    pub fn new(msg_tx: Sender<Msg>) -> Self {
        Self {
            msg_tx,
            cancelled: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl TimerScheduler for ThreadScheduler {
    fn schedule(&mut self, handle: TimerHandle, delay: Duration, purpose: TimerPurpose) {
        let msg_tx = self.msg_tx.clone();
        let cancelled = self.cancelled.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let was_cancelled = cancelled
                .lock()
                .map(|mut set| set.remove(&handle))
                .unwrap_or(false);
            if !was_cancelled {
                let _ = msg_tx.send(Msg::TimerElapsed { handle, purpose });
            }
        });
    }

    fn cancel(&mut self, handle: TimerHandle) {
        // The core only cancels handles it still considers live, so the
        // tombstone set stays small.
        if let Ok(mut set) = self.cancelled.lock() {
            set.insert(handle);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub handle: TimerHandle,
    pub delay: Duration,
    pub purpose: TimerPurpose,
}

/// Test double: records scheduled timers and lets the caller fire them
/// explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Vec<ScheduledTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[ScheduledTimer] {
        &self.pending
    }

    /// Removes and returns the oldest pending timer.
    pub fn pop_next(&mut self) -> Option<ScheduledTimer> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&mut self, handle: TimerHandle, delay: Duration, purpose: TimerPurpose) {
        self.pending.push(ScheduledTimer {
            handle,
            delay,
            purpose,
        });
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|timer| timer.handle != handle);
    }
}
