//! Sidebar-visibility collaborator.

use indexmap::IndexSet;

use yacs_types::ListingId;

/// Target of the "show this listing in the sidebar" side effect.
pub trait SidebarVisibility {
    fn add_listing(&mut self, listing_id: &ListingId);
}

/// Insertion-ordered set of listings shown in the sidebar.
#[derive(Debug, Default, Clone)]
pub struct VisibleListings {
    listings: IndexSet<ListingId>,
}

impl VisibleListings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, listing_id: &ListingId) -> bool {
        self.listings.contains(listing_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListingId> {
        self.listings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl SidebarVisibility for VisibleListings {
    fn add_listing(&mut self, listing_id: &ListingId) {
        self.listings.insert(listing_id.clone());
    }
}
