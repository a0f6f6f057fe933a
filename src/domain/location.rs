//! Address fragment and navigation history
//!
//! The location plays the part of a browser address bar: it holds the
//! current `#fragment` and a back/forward history. Program navigation
//! (`push`, `replace`) updates the location silently, while external
//! navigation (`navigate`, `back`, `forward`) notifies every subscriber.
//!
//! Subscriptions are scoped: dropping a [`Subscription`] removes its
//! listener, so a torn-down controller never leaves a stale listener behind.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// The token after `#` in an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fragment(String);

impl Fragment {
    /// Parses a fragment, stripping one leading `#` and surrounding whitespace
    ///
    /// Malformed input never fails: anything that is not a usable token is
    /// treated as an empty fragment.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let token = raw.strip_prefix('#').unwrap_or(raw).trim();
        if token.chars().any(|c| c.is_whitespace() || c == '#') {
            return Self::default();
        }
        Self(token.to_string())
    }

    /// Fragment naming a section
    pub fn for_id(id: impl AsRef<str>) -> Self {
        Self::parse(id.as_ref())
    }

    /// The section ID named by this fragment, if any
    pub fn id(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Why the fragment changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Typed or pasted address
    Navigate,
    Back,
    Forward,
}

/// Notification delivered to subscribers on external fragment changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentChange {
    pub fragment: Fragment,
    pub cause: ChangeCause,
}

#[derive(Debug)]
struct Listener {
    id: u64,
    queue: Rc<RefCell<VecDeque<FragmentChange>>>,
}

#[derive(Debug)]
struct History {
    entries: Vec<Fragment>,
    cursor: usize,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl History {
    fn current(&self) -> &Fragment {
        &self.entries[self.cursor]
    }

    fn push(&mut self, fragment: Fragment) -> bool {
        if *self.current() == fragment {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment);
        self.cursor += 1;
        true
    }

    fn notify(&self, cause: ChangeCause) {
        let change = FragmentChange {
            fragment: self.current().clone(),
            cause,
        };
        for listener in &self.listeners {
            listener.queue.borrow_mut().push_back(change.clone());
        }
    }
}

/// Handle to the current address and its history
///
/// Clones share the same underlying history.
#[derive(Debug, Clone)]
pub struct Location {
    inner: Rc<RefCell<History>>,
}

impl Location {
    /// Creates a location with an initial fragment
    pub fn new(initial: Fragment) -> Self {
        Self {
            inner: Rc::new(RefCell::new(History {
                entries: vec![initial],
                cursor: 0,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Parses `raw` (e.g. `#installation`) as the initial fragment
    pub fn parse(raw: &str) -> Self {
        Self::new(Fragment::parse(raw))
    }

    /// The current fragment
    pub fn current(&self) -> Fragment {
        self.inner.borrow().current().clone()
    }

    /// Program navigation: adds a history entry without notifying
    pub fn push(&self, fragment: Fragment) {
        self.inner.borrow_mut().push(fragment);
    }

    /// Program navigation: rewrites the current entry without notifying
    pub fn replace(&self, fragment: Fragment) {
        let mut history = self.inner.borrow_mut();
        let cursor = history.cursor;
        history.entries[cursor] = fragment;
    }

    /// External navigation (typed or pasted address): adds an entry and notifies
    ///
    /// Navigating to the current fragment is a no-op, like re-entering the
    /// same address in a browser.
    pub fn navigate(&self, fragment: Fragment) {
        let mut history = self.inner.borrow_mut();
        if history.push(fragment) {
            history.notify(ChangeCause::Navigate);
        }
    }

    /// Steps back in history, notifying subscribers; false at the oldest entry
    pub fn back(&self) -> bool {
        let mut history = self.inner.borrow_mut();
        if history.cursor == 0 {
            return false;
        }
        history.cursor -= 1;
        history.notify(ChangeCause::Back);
        true
    }

    /// Steps forward in history, notifying subscribers; false at the newest entry
    pub fn forward(&self) -> bool {
        let mut history = self.inner.borrow_mut();
        if history.cursor + 1 >= history.entries.len() {
            return false;
        }
        history.cursor += 1;
        history.notify(ChangeCause::Forward);
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.inner.borrow().cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let history = self.inner.borrow();
        history.cursor + 1 < history.entries.len()
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Registers a listener for external fragment changes
    pub fn subscribe(&self) -> Subscription {
        let mut history = self.inner.borrow_mut();
        let id = history.next_listener;
        history.next_listener += 1;

        let queue = Rc::new(RefCell::new(VecDeque::new()));
        history.listeners.push(Listener {
            id,
            queue: Rc::clone(&queue),
        });

        Subscription {
            id,
            queue,
            history: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Fragment::default())
    }
}

/// Live registration for fragment changes; deregisters on drop
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    queue: Rc<RefCell<VecDeque<FragmentChange>>>,
    history: Weak<RefCell<History>>,
}

impl Subscription {
    /// Takes all pending notifications, oldest first
    pub fn drain(&self) -> Vec<FragmentChange> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(history) = self.history.upgrade() {
            if let Ok(mut history) = history.try_borrow_mut() {
                history.listeners.retain(|l| l.id != self.id);
            }
        }
    }
}
