//! Data-source collaborator: resolves listing ids to full listings.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

use yacs_types::{Listing, ListingId};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("listing request failed: {0}")]
    Request(String),
    #[error("failed to decode listings: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Asynchronous lookup of listings (with their sections) by id.
///
/// Ids the source does not know are omitted from the result rather than
/// reported as errors.
pub trait ListingSource {
    fn fetch_listings(
        &self,
        ids: &[ListingId],
    ) -> impl Future<Output = Result<Vec<Listing>, SourceError>>;
}

/// A fixed catalogue held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryListingSource {
    listings: HashMap<ListingId, Listing>,
}

impl InMemoryListingSource {
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: listings
                .into_iter()
                .map(|listing| (listing.id.clone(), listing))
                .collect(),
        }
    }

    /// Parse a JSON array of listings.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        Ok(Self::new(listings))
    }

    pub fn insert(&mut self, listing: Listing) {
        self.listings.insert(listing.id.clone(), listing);
    }

    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.get(id)
    }
}

impl ListingSource for InMemoryListingSource {
    async fn fetch_listings(&self, ids: &[ListingId]) -> Result<Vec<Listing>, SourceError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.listings.get(id).cloned())
            .collect())
    }
}
