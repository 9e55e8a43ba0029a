//! Owner of every per-term [`SelectionStore`].
//!
//! The registry is passed by reference to whatever needs selection state; it
//! lives as long as the session. Stores are created the first time a term is
//! mutated and are never evicted.
//!
//! When no term is given, the active-term collaborator decides. Before it has
//! resolved a term, operations run against an inert stand-in store that is
//! emptied after every call, so nothing is kept and nothing is published.
//!
//! Every store's change callback republishes on one [`EventBus`] tagged with
//! the term id. Handlers run while the registry is mutably borrowed, so they
//! must not call back into it synchronously.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use yacs_types::{Interest, Listing, ListingId, Section, SectionId, Term, TermId};

use crate::events::{EventBus, Subscription};
use crate::sidebar::SidebarVisibility;
use crate::store::{Notify, SelectionStore};
use crate::term::ActiveTerm;

/// Why subscribers are being told about a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCause {
    /// A store for the term changed.
    Mutation,
    /// The user switched to the term; views should re-read it.
    ActiveTermChanged,
}

impl EventCause {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::ActiveTermChanged => "active-term-changed",
        }
    }
}

impl fmt::Display for EventCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub term: TermId,
    pub cause: EventCause,
}

/// Outcome of resolving an optional term id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermResolution {
    Resolved(TermId),
    /// No term given and the active-term collaborator has none yet.
    Unresolved,
}

pub struct SelectionRegistry {
    stores: IndexMap<TermId, SelectionStore>,
    placeholder: SelectionStore,
    events: EventBus<SelectionEvent>,
    active_term: Rc<dyn ActiveTerm>,
    sidebar: Option<Rc<RefCell<dyn SidebarVisibility>>>,
    _term_changes: Subscription,
}

impl fmt::Debug for SelectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionRegistry")
            .field("stores", &self.stores)
            .field("events", &self.events)
            .field("current_term", &self.active_term.current_term_id())
            .field("sidebar", &self.sidebar.is_some())
            .finish_non_exhaustive()
    }
}

impl SelectionRegistry {
    /// Subscribes to `active_term` once; every term switch is republished as
    /// [`EventCause::ActiveTermChanged`].
    pub fn new(active_term: Rc<dyn ActiveTerm>) -> Self {
        let events = EventBus::new();
        let term_changes = {
            let events = events.clone();
            active_term.subscribe_to_term(Box::new(move |term: &Term| {
                events.publish(&SelectionEvent {
                    term: term.id.clone(),
                    cause: EventCause::ActiveTermChanged,
                });
            }))
        };

        Self {
            stores: IndexMap::new(),
            placeholder: SelectionStore::inert(),
            events,
            active_term,
            sidebar: None,
            _term_changes: term_changes,
        }
    }

    /// Register `sidebar` to be told about every listing that gains a section
    /// through [`Self::add_section`].
    pub fn with_sidebar(mut self, sidebar: Rc<RefCell<dyn SidebarVisibility>>) -> Self {
        self.sidebar = Some(sidebar);
        self
    }

    /// Invoke `handler` on every mutation of any term's store and on every
    /// active-term switch.
    pub fn subscribe_to_selections(&self, handler: impl FnMut(&SelectionEvent) + 'static) -> Subscription {
        self.events.subscribe(handler)
    }

    #[must_use]
    pub fn resolve(&self, term: Option<&TermId>) -> TermResolution {
        match term {
            Some(term) => TermResolution::Resolved(term.clone()),
            None => self
                .active_term
                .current_term_id()
                .map_or(TermResolution::Unresolved, TermResolution::Resolved),
        }
    }

    /// Terms that have a store, in creation order.
    #[must_use]
    pub fn terms(&self) -> Vec<TermId> {
        self.stores.keys().cloned().collect()
    }

    /// The store for `term`, created on first use.
    pub fn store_for_term(&mut self, term: &TermId) -> &mut SelectionStore {
        let events = &self.events;
        self.stores.entry(term.clone()).or_insert_with(|| {
            debug!(term = %term, "Creating selection store");
            let events = events.clone();
            let term = term.clone();
            SelectionStore::new(move || {
                events.publish(&SelectionEvent {
                    term: term.clone(),
                    cause: EventCause::Mutation,
                });
            })
        })
    }

    /// Read-only view of a term's store.
    ///
    /// Terms without a store (and the unresolved case) read as the empty
    /// stand-in.
    #[must_use]
    pub fn store(&self, term: Option<&TermId>) -> &SelectionStore {
        match self.resolve(term) {
            TermResolution::Resolved(term) => self.stores.get(&term).unwrap_or(&self.placeholder),
            TermResolution::Unresolved => &self.placeholder,
        }
    }

    fn with_store<R>(
        &mut self,
        term: Option<&TermId>,
        op: impl FnOnce(&mut SelectionStore) -> R,
    ) -> (R, TermResolution) {
        let resolution = self.resolve(term);
        let result = match &resolution {
            TermResolution::Resolved(term) => op(self.store_for_term(term)),
            TermResolution::Unresolved => {
                debug!("No active term yet; selection change discarded");
                let result = op(&mut self.placeholder);
                self.placeholder.clear_selections_with(Notify::Suppress);
                result
            }
        };
        (result, resolution)
    }

    pub fn toggle_section(&mut self, section: &Section, term: Option<&TermId>) -> bool {
        self.with_store(term, |store| store.toggle_section(section)).0
    }

    /// Add `section` at `interest`; on success the owning listing is made
    /// visible in the sidebar, if one is attached.
    pub fn add_section(&mut self, section: &Section, interest: Interest, term: Option<&TermId>) -> bool {
        let (added, resolution) = self.with_store(term, |store| store.add_section(section, interest));
        if added
            && resolution != TermResolution::Unresolved
            && let Some(sidebar) = &self.sidebar
        {
            sidebar.borrow_mut().add_listing(&section.listing_id);
        }
        added
    }

    /// Demote `section` to interested.
    pub fn remove_section(&mut self, section: &Section, term: Option<&TermId>) -> bool {
        self.with_store(term, |store| store.remove_section_selection(section)).0
    }

    pub fn set_section_interest(
        &mut self,
        section: &Section,
        interest: Interest,
        term: Option<&TermId>,
    ) -> bool {
        self.with_store(term, |store| store.set_section_interest(section, interest)).0
    }

    pub fn toggle_course(&mut self, listing: &Listing, term: Option<&TermId>) {
        self.with_store(term, |store| store.toggle_listing(listing));
    }

    pub fn remove_listing(&mut self, listing_id: &ListingId, term: Option<&TermId>) {
        self.with_store(term, |store| store.remove_listing_selection(listing_id));
    }

    pub fn remove_listing_entirely(&mut self, listing_id: &ListingId, term: Option<&TermId>) {
        self.with_store(term, |store| store.remove_listing_entirely(listing_id));
    }

    pub fn clear(&mut self, term: Option<&TermId>) {
        self.with_store(term, SelectionStore::clear_selections);
    }

    #[must_use]
    pub fn section_interest(&self, section: &Section, term: Option<&TermId>) -> Option<Interest> {
        self.store(term).section_interest(section)
    }

    #[must_use]
    pub fn is_section_selected(&self, section: &Section, term: Option<&TermId>) -> bool {
        self.store(term).is_section_selected(section)
    }

    #[must_use]
    pub fn is_section_interested(&self, section: &Section, term: Option<&TermId>) -> bool {
        self.store(term).is_section_interested(section)
    }

    #[must_use]
    pub fn has_selected_section(&self, listing_id: &ListingId, term: Option<&TermId>) -> bool {
        self.store(term).has_selected_section(listing_id)
    }

    #[must_use]
    pub fn has_interested_section(&self, listing_id: &ListingId, term: Option<&TermId>) -> bool {
        self.store(term).has_interested_section(listing_id)
    }

    #[must_use]
    pub fn selected_section_listing_pairs(&self, term: Option<&TermId>) -> Vec<(SectionId, ListingId)> {
        self.store(term).selected_section_listing_pairs()
    }

    /// Every recorded section id for the term, whatever its interest level.
    #[must_use]
    pub fn selected_section_ids(&self, term: Option<&TermId>) -> Vec<SectionId> {
        self.store(term).selected_sections()
    }

    #[must_use]
    pub fn selected_listing_ids(&self, term: Option<&TermId>) -> Vec<ListingId> {
        self.store(term).selected_listings()
    }
}
