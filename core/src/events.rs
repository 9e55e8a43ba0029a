//! Synchronous publish/subscribe.
//!
//! Handlers run on the publishing call stack, in registration order. Nothing is
//! buffered: a handler registered after a publish never sees it.
//!
//! The bus is single-threaded (`Rc`), matching the UI-event-driven model where
//! every operation runs to completion before the next starts.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Slots<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Slots<E> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(slot, _)| *slot == id)
    }
}

/// A list of handlers shared by every clone of the bus.
pub struct EventBus<E> {
    slots: Rc<RefCell<Slots<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.slots.borrow().handlers.len())
            .finish()
    }
}

impl<E: 'static> EventBus<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered until the returned handle is
    /// dropped or unsubscribed.
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, handler));
            id
        };

        let slots: Weak<RefCell<Slots<E>>> = Rc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.borrow_mut().handlers.retain(|(slot, _)| *slot != id);
                }
            })),
        }
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// The handler list is snapshotted first, so handlers may subscribe or
    /// unsubscribe while running. A handler unsubscribed mid-delivery is not
    /// called afterwards. A handler that is already running further up the
    /// stack is skipped for the nested delivery.
    pub fn publish(&self, event: &E) {
        let snapshot: Vec<(u64, Handler<E>)> = self
            .slots
            .borrow()
            .handlers
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in snapshot {
            if !self.slots.borrow().contains(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(event),
                Err(_) => {
                    tracing::warn!(
                        subscriber = id,
                        "Skipping re-entrant event delivery to a running handler"
                    );
                }
            }
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping it unsubscribes. Use [`Subscription::detach`] to keep the handler
/// registered for the lifetime of the bus.
#[must_use = "dropping a Subscription unsubscribes the handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn detach(mut self) {
        self.cancel = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
