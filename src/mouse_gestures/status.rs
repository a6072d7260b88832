use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Status-bar collaborator that shows gesture progress.
pub trait StatusField {
    fn message(&self, text: &str);

    /// Enables or disables the host's link-hover preview, which would
    /// otherwise overwrite gesture status while the pointer crosses links.
    fn set_over_link(&self, _enabled: bool) {}
}

/// Keeps every message, for tests and the replay tool.
#[derive(Debug, Clone, Default)]
pub struct RecordingStatusField {
    messages: Rc<RefCell<Vec<String>>>,
    over_link: Rc<RefCell<Vec<bool>>>,
}

impl RecordingStatusField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn over_link_changes(&self) -> Vec<bool> {
        self.over_link.borrow().clone()
    }
}

impl StatusField for RecordingStatusField {
    fn message(&self, text: &str) {
        self.messages.borrow_mut().push(text.to_string());
    }

    fn set_over_link(&self, enabled: bool) {
        self.over_link.borrow_mut().push(enabled);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingStatus {
    due: Instant,
    text: String,
}

/// Fire-and-forget status timers. Nothing cancels them; the host drains due
/// entries with [`DeferredStatus::take_due`].
#[derive(Debug, Default)]
pub struct DeferredStatus {
    pending: Vec<PendingStatus>,
}

impl DeferredStatus {
    pub fn schedule(&mut self, text: String, delay: Duration) {
        self.pending.push(PendingStatus {
            due: Instant::now() + delay,
            text,
        });
    }

    /// Removes and returns texts due at `now`, oldest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<String> {
        let mut due = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push(entry.text.clone());
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
