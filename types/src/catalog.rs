//! Catalogue entities supplied by the data source.
//!
//! These are read-only from the selection layer's point of view: the store
//! keeps ids, never the entities themselves.

use serde::{Deserialize, Serialize};

use crate::{ListingId, SectionId, TermId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Term {
    #[must_use]
    pub fn new(id: impl Into<TermId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// One offered instance of a listing.
///
/// Backed by the id of its owning listing rather than the listing itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub listing_id: ListingId,
    /// Human-facing label such as "01" or the CRN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<SectionId>, listing_id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            listing_id: listing_id.into(),
            label: None,
        }
    }
}

/// A course listing and its sections, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Listing {
    #[must_use]
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            sections: Vec::new(),
        }
    }

    /// Build a listing whose sections all point back at it.
    #[must_use]
    pub fn with_sections<I, S>(id: impl Into<ListingId>, section_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let id = id.into();
        let sections = section_ids
            .into_iter()
            .map(|section_id| Section::new(section_id, id.clone()))
            .collect();
        Self {
            id,
            name: None,
            sections,
        }
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }
}
