//! Active-term collaborator.

use std::cell::RefCell;

use yacs_types::{Term, TermId};

use crate::events::{EventBus, Subscription};

/// Source of the term the user is currently looking at.
///
/// The selection layer only reads it; switching terms belongs to whoever owns
/// the implementation.
pub trait ActiveTerm {
    /// `None` until a term has been resolved (e.g. during start-up).
    fn current_term_id(&self) -> Option<TermId>;

    /// Invoke `handler` with the new term on every switch.
    fn subscribe_to_term(&self, handler: Box<dyn FnMut(&Term)>) -> Subscription;
}

/// In-memory [`ActiveTerm`] that publishes every [`SelectedTerm::set_term`].
#[derive(Debug, Default)]
pub struct SelectedTerm {
    current: RefCell<Option<Term>>,
    changes: EventBus<Term>,
}

impl SelectedTerm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_term(term: Term) -> Self {
        Self {
            current: RefCell::new(Some(term)),
            changes: EventBus::new(),
        }
    }

    #[must_use]
    pub fn current_term(&self) -> Option<Term> {
        self.current.borrow().clone()
    }

    /// Switch the active term and notify subscribers.
    ///
    /// Subscribers are notified even when the term is unchanged, mirroring a
    /// user re-picking the same term in the selector.
    pub fn set_term(&self, term: Term) {
        tracing::debug!(term = %term.id, "Active term changed");
        self.current.replace(Some(term.clone()));
        self.changes.publish(&term);
    }
}

impl ActiveTerm for SelectedTerm {
    fn current_term_id(&self) -> Option<TermId> {
        self.current.borrow().as_ref().map(|term| term.id.clone())
    }

    fn subscribe_to_term(&self, mut handler: Box<dyn FnMut(&Term)>) -> Subscription {
        self.changes.subscribe(move |term| handler(term))
    }
}
