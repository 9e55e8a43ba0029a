//! Single-document selection store.
//!
//! The whole `{listing_id: [section_id, ...]}` mapping lives as one JSON
//! document under [`SELECTIONS_KEY`] in a [`KeyValueStore`] and is re-read and
//! re-written on every call. There is no term scoping and no interest level:
//! every add is a full selection. This is a different model from
//! [`crate::SelectionRegistry`] and the two are never mixed.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use yacs_types::{Listing, ListingId, Section, SectionId};

use crate::events::{EventBus, Subscription};
use crate::sidebar::SidebarVisibility;
use crate::storage::{KeyValueStore, StorageError};

pub const SELECTIONS_KEY: &str = "selections";

pub type SelectionDocument = BTreeMap<ListingId, Vec<SectionId>>;

pub struct LegacySelections<K> {
    storage: K,
    sidebar: Option<Rc<RefCell<dyn SidebarVisibility>>>,
    changes: EventBus<()>,
}

impl<K: fmt::Debug> fmt::Debug for LegacySelections<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacySelections")
            .field("storage", &self.storage)
            .field("changes", &self.changes)
            .finish_non_exhaustive()
    }
}

impl<K: KeyValueStore> LegacySelections<K> {
    pub fn new(storage: K) -> Self {
        Self {
            storage,
            sidebar: None,
            changes: EventBus::new(),
        }
    }

    pub fn with_sidebar(mut self, sidebar: Rc<RefCell<dyn SidebarVisibility>>) -> Self {
        self.sidebar = Some(sidebar);
        self
    }

    pub fn subscribe(&self, handler: impl FnMut(&()) + 'static) -> Subscription {
        self.changes.subscribe(handler)
    }

    #[must_use]
    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// The stored document; missing or unparseable documents read as empty.
    pub fn selections(&self) -> Result<SelectionDocument, StorageError> {
        let Some(raw) = self.storage.get_item(SELECTIONS_KEY)? else {
            return Ok(SelectionDocument::new());
        };
        match serde_json::from_str(&raw) {
            Ok(document) => Ok(document),
            Err(err) => {
                warn!("Ignoring unreadable selections document: {err}");
                Ok(SelectionDocument::new())
            }
        }
    }

    fn save(&mut self, document: &SelectionDocument) -> Result<(), StorageError> {
        let raw = serde_json::to_string(document)?;
        self.storage.set_item(SELECTIONS_KEY, &raw)
    }

    /// Record `section`; section ids stay sorted within a listing.
    ///
    /// Returns `false` if it was already recorded. Does not publish.
    pub fn add_section(&mut self, section: &Section) -> Result<bool, StorageError> {
        let mut document = self.selections()?;
        let ids = document.entry(section.listing_id.clone()).or_default();
        if ids.contains(&section.id) {
            return Ok(false);
        }
        ids.push(section.id.clone());
        ids.sort();
        self.save(&document)?;
        debug!(listing = %section.listing_id, section = %section.id, "Section stored");

        if let Some(sidebar) = &self.sidebar {
            sidebar.borrow_mut().add_listing(&section.listing_id);
        }
        Ok(true)
    }

    /// Forget `section`, dropping its listing once no section is left.
    ///
    /// Returns `false` if it was not recorded. Does not publish.
    pub fn remove_section(&mut self, section: &Section) -> Result<bool, StorageError> {
        let mut document = self.selections()?;
        let Some(ids) = document.get_mut(&section.listing_id) else {
            return Ok(false);
        };
        let Some(index) = ids.iter().position(|id| *id == section.id) else {
            return Ok(false);
        };
        ids.remove(index);
        if ids.is_empty() {
            document.remove(&section.listing_id);
        }
        self.save(&document)?;
        Ok(true)
    }

    pub fn toggle_section(&mut self, section: &Section) -> Result<(), StorageError> {
        if self.is_section_selected(section)? {
            self.remove_section(section)?;
        } else {
            self.add_section(section)?;
        }
        self.changes.publish(&());
        Ok(())
    }

    /// Drop the listing if any of its sections is recorded, otherwise record
    /// all of them.
    pub fn toggle_course(&mut self, listing: &Listing) -> Result<(), StorageError> {
        if self.has_selected_section(&listing.id)? {
            self.drop_listing(&listing.id)?;
        } else {
            for section in &listing.sections {
                self.add_section(section)?;
            }
        }
        self.changes.publish(&());
        Ok(())
    }

    pub fn remove_listing(&mut self, listing_id: &ListingId) -> Result<(), StorageError> {
        if self.has_selected_section(listing_id)? {
            self.drop_listing(listing_id)?;
        }
        self.changes.publish(&());
        Ok(())
    }

    fn drop_listing(&mut self, listing_id: &ListingId) -> Result<(), StorageError> {
        let mut document = self.selections()?;
        document.remove(listing_id);
        self.save(&document)
    }

    pub fn is_section_selected(&self, section: &Section) -> Result<bool, StorageError> {
        Ok(self
            .selections()?
            .get(&section.listing_id)
            .is_some_and(|ids| ids.contains(&section.id)))
    }

    pub fn has_selected_section(&self, listing_id: &ListingId) -> Result<bool, StorageError> {
        Ok(self
            .selections()?
            .get(listing_id)
            .is_some_and(|ids| !ids.is_empty()))
    }

    pub fn selected_section_ids(&self) -> Result<Vec<SectionId>, StorageError> {
        Ok(self.selections()?.into_values().flatten().collect())
    }

    pub fn selected_listing_ids(&self) -> Result<Vec<ListingId>, StorageError> {
        Ok(self.selections()?.into_keys().collect())
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.save(&SelectionDocument::new())?;
        self.changes.publish(&());
        Ok(())
    }
}
