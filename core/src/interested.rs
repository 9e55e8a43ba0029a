//! View model for the "interested courses" sidebar panel.
//!
//! Keeps the listings for the current term's recorded listing ids, fetched
//! from a [`ListingSource`]. A refresh reconciles rather than replaces, so
//! listings already on screen keep their position.

use std::collections::HashSet;

use tracing::warn;

use yacs_types::{Listing, ListingId, TermId};

use crate::registry::SelectionRegistry;
use crate::source::ListingSource;

#[derive(Debug, Default)]
pub struct InterestedListings {
    listings: Vec<Listing>,
    is_loaded: bool,
    is_empty: bool,
}

impl InterestedListings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// True when the last refresh found no recorded listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Re-read the recorded listing ids for `term` and reconcile.
    ///
    /// With no recorded listings the panel is flagged empty and nothing is
    /// fetched. A failed fetch is logged and leaves the listings untouched.
    pub async fn refresh<S: ListingSource>(
        &mut self,
        registry: &SelectionRegistry,
        source: &S,
        term: Option<&TermId>,
    ) {
        let ids = registry.selected_listing_ids(term);
        if ids.is_empty() {
            self.is_empty = true;
            return;
        }

        self.is_empty = false;
        self.is_loaded = false;
        match source.fetch_listings(&ids).await {
            Ok(fetched) => {
                self.reconcile(fetched);
                self.is_loaded = true;
            }
            Err(err) => {
                warn!(listings = ids.len(), "Failed to fetch interested listings: {err}");
            }
        }
    }

    fn reconcile(&mut self, fetched: Vec<Listing>) {
        let fetched_ids: HashSet<ListingId> = fetched.iter().map(|l| l.id.clone()).collect();
        self.listings.retain(|listing| fetched_ids.contains(&listing.id));

        let current: HashSet<ListingId> = self.listings.iter().map(|l| l.id.clone()).collect();
        self.listings
            .extend(fetched.into_iter().filter(|listing| !current.contains(&listing.id)));
    }
}
