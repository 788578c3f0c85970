//! Keyboard shortcuts for page navigation.
//!
//! Alt+ArrowLeft goes to the previous page and Alt+ArrowRight to the next
//! one. A handled key press reports [`KeyOutcome::Handled`] so the host can
//! suppress its default key handling; nothing else is suppressed.
//!
//! [`KeyEvents`] is a single-threaded dispatcher. Listeners stay registered
//! for as long as the [`KeyListener`] guard returned by [`KeyEvents::listen`]
//! is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::state::PageNav;

/// Key of a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<&str> for Key {
    /// Map a DOM `KeyboardEvent.key` name.
    fn from(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A key press with its modifier state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyEvent {
    pub key: Key,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            alt: false,
            ctrl: false,
            shift: false,
            meta: false,
        }
    }

    /// Same key press with Alt held.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Result of offering a key press to a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key press triggered navigation; suppress default handling.
    Handled,
    /// The key press was not used.
    Ignored,
}

/// Client-side navigation performed by the host.
pub trait Navigator {
    /// Navigate to a route path or URL.
    fn navigate(&mut self, link: &str);
}

impl PageNav<'_> {
    /// Navigate on Alt+ArrowLeft / Alt+ArrowRight when the matching link
    /// exists.
    pub fn handle_key(&self, event: &KeyEvent, navigator: &mut dyn Navigator) -> KeyOutcome {
        if !event.alt {
            return KeyOutcome::Ignored;
        }

        let target = match event.key {
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other(_) => return KeyOutcome::Ignored,
        };

        match target {
            Some(link) => {
                navigator.navigate(&link.link);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }
}

type Listener<'a> = Box<dyn FnMut(&KeyEvent) -> KeyOutcome + 'a>;

#[derive(Default)]
struct Listeners<'a> {
    next_id: u64,
    entries: Vec<(u64, Listener<'a>)>,
}

/// Dispatcher of key presses to registered listeners.
///
/// Listeners must not register or drop other listeners while being called.
#[derive(Default)]
pub struct KeyEvents<'a> {
    listeners: Rc<RefCell<Listeners<'a>>>,
}

impl<'a> KeyEvents<'a> {
    /// Create a dispatcher with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener until the returned guard is dropped.
    #[must_use = "the listener is removed when the guard is dropped"]
    pub fn listen(&self, listener: impl FnMut(&KeyEvent) -> KeyOutcome + 'a) -> KeyListener<'a> {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));

        KeyListener {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Offer a key press to every listener in registration order.
    ///
    /// Returns [`KeyOutcome::Handled`] if any listener handled it.
    pub fn dispatch(&self, event: &KeyEvent) -> KeyOutcome {
        let mut outcome = KeyOutcome::Ignored;
        for (_, listener) in &mut self.listeners.borrow_mut().entries {
            if listener(event) == KeyOutcome::Handled {
                outcome = KeyOutcome::Handled;
            }
        }
        outcome
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Check if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration guard returned by [`KeyEvents::listen`].
pub struct KeyListener<'a> {
    id: u64,
    listeners: Weak<RefCell<Listeners<'a>>>,
}

impl Drop for KeyListener<'_> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Bind the page navigation shortcuts for as long as the guard lives.
#[must_use = "the shortcuts are unbound when the guard is dropped"]
pub fn bind_page_nav_keys<'a, 'r: 'a, N: Navigator + 'a>(
    events: &KeyEvents<'a>,
    nav: &'a RefCell<PageNav<'r>>,
    navigator: &'a RefCell<N>,
) -> KeyListener<'a> {
    events.listen(move |event| nav.borrow().handle_key(event, &mut *navigator.borrow_mut()))
}
