//! Per-term selection state.
//!
//! A [`SelectionStore`] maps listing ids to the sections the user has touched
//! in one term, each tagged with an [`Interest`]. Every observable mutation
//! calls the store's change callback unless the caller asks for
//! [`Notify::Suppress`]; composite operations suppress the per-section
//! notifications and fire once at the end.
//!
//! Records are never deleted by an interest change. "Removing a selection"
//! demotes the record to [`Interest::Interested`]; only
//! [`SelectionStore::clear_selections`] discards records.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use yacs_types::{Interest, Listing, ListingId, Section, SectionId};

/// Whether a mutation should invoke the store's change callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notify {
    #[default]
    Fire,
    Suppress,
}

/// A section the user has touched, with its current interest level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestedSection {
    pub id: SectionId,
    pub interest: Interest,
}

impl InterestedSection {
    #[must_use]
    pub fn new(id: SectionId, interest: Interest) -> Self {
        Self { id, interest }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.interest.is_selected()
    }
}

pub struct SelectionStore {
    // Invariant: every value is non-empty; a section id appears at most once per listing.
    listings: IndexMap<ListingId, Vec<InterestedSection>>,
    on_change: Box<dyn FnMut()>,
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("listings", &self.listings)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    #[must_use]
    pub fn new(on_change: impl FnMut() + 'static) -> Self {
        Self {
            listings: IndexMap::new(),
            on_change: Box::new(on_change),
        }
    }

    /// A store whose change callback does nothing.
    #[must_use]
    pub fn inert() -> Self {
        Self::new(|| {})
    }

    fn notify(&mut self, notify: Notify) {
        if notify == Notify::Fire {
            (self.on_change)();
        }
    }

    fn record(&self, section: &Section) -> Option<&InterestedSection> {
        self.listings
            .get(&section.listing_id)?
            .iter()
            .find(|record| record.id == section.id)
    }

    fn record_mut(&mut self, section: &Section) -> Option<&mut InterestedSection> {
        self.listings
            .get_mut(&section.listing_id)?
            .iter_mut()
            .find(|record| record.id == section.id)
    }

    pub fn add_section(&mut self, section: &Section, interest: Interest) -> bool {
        self.add_section_with(section, interest, Notify::Fire)
    }

    /// Create a record for `section` at `interest`.
    ///
    /// First add wins: if a record already exists this is a no-op returning
    /// `false`, whatever its level. Use [`Self::set_section_interest`] to
    /// change the level of an existing record.
    pub fn add_section_with(&mut self, section: &Section, interest: Interest, notify: Notify) -> bool {
        if self.record(section).is_some() {
            return false;
        }

        self.listings
            .entry(section.listing_id.clone())
            .or_default()
            .push(InterestedSection::new(section.id.clone(), interest));
        debug!(
            listing = %section.listing_id,
            section = %section.id,
            %interest,
            "Section added"
        );
        self.notify(notify);
        true
    }

    pub fn remove_section_selection(&mut self, section: &Section) -> bool {
        self.remove_section_selection_with(section, Notify::Fire)
    }

    /// Demote `section` to [`Interest::Interested`], keeping the record.
    ///
    /// Returns `false` only when the section has no record at all.
    pub fn remove_section_selection_with(&mut self, section: &Section, notify: Notify) -> bool {
        let Some(record) = self.record_mut(section) else {
            return false;
        };
        record.interest = Interest::Interested;
        debug!(listing = %section.listing_id, section = %section.id, "Section demoted");
        self.notify(notify);
        true
    }

    pub fn set_section_interest(&mut self, section: &Section, interest: Interest) -> bool {
        self.set_section_interest_with(section, interest, Notify::Fire)
    }

    /// Move an existing record to `interest`.
    ///
    /// Returns `false` when there is no record or it is already at `interest`.
    pub fn set_section_interest_with(
        &mut self,
        section: &Section,
        interest: Interest,
        notify: Notify,
    ) -> bool {
        let Some(record) = self.record_mut(section) else {
            return false;
        };
        if record.interest == interest {
            return false;
        }
        record.interest = interest;
        debug!(
            listing = %section.listing_id,
            section = %section.id,
            %interest,
            "Section interest changed"
        );
        self.notify(notify);
        true
    }

    /// Demote the section if it is selected, otherwise add it as selected.
    ///
    /// The add is first-add-wins, so an `Interested` record is left as it is
    /// and `false` is returned. Always notifies, changed or not.
    pub fn toggle_section(&mut self, section: &Section) -> bool {
        let changed = self.toggle_section_silently(section);
        self.notify(Notify::Fire);
        changed
    }

    fn toggle_section_silently(&mut self, section: &Section) -> bool {
        if self.is_section_selected(section) {
            self.remove_section_selection_with(section, Notify::Suppress)
        } else {
            self.add_section_with(section, Interest::Selected, Notify::Suppress)
        }
    }

    #[must_use]
    pub fn section_interest(&self, section: &Section) -> Option<Interest> {
        self.record(section).map(|record| record.interest)
    }

    #[must_use]
    pub fn is_section_selected(&self, section: &Section) -> bool {
        self.section_interest(section) == Some(Interest::Selected)
    }

    #[must_use]
    pub fn is_section_interested(&self, section: &Section) -> bool {
        self.section_interest(section) == Some(Interest::Interested)
    }

    /// True if the listing has any record, at any level.
    #[must_use]
    pub fn has_interested_section(&self, listing_id: &ListingId) -> bool {
        self.listings.contains_key(listing_id)
    }

    #[must_use]
    pub fn has_selected_section(&self, listing_id: &ListingId) -> bool {
        self.listings
            .get(listing_id)
            .is_some_and(|records| records.iter().any(InterestedSection::is_selected))
    }

    #[must_use]
    pub fn interested_sections(&self, listing_id: &ListingId) -> &[InterestedSection] {
        self.listings
            .get(listing_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn toggle_listing(&mut self, listing: &Listing) {
        self.toggle_listing_with(listing, Notify::Fire);
    }

    /// Demote every selected section of the listing if any is selected,
    /// otherwise add every section of it as selected (first add wins, so
    /// existing `Interested` records stay). Notifies at most once.
    pub fn toggle_listing_with(&mut self, listing: &Listing, notify: Notify) {
        if self.has_selected_section(&listing.id) {
            self.demote_listing(&listing.id);
        } else {
            for section in &listing.sections {
                self.add_section_with(section, Interest::Selected, Notify::Suppress);
            }
        }
        self.notify(notify);
    }

    fn demote_listing(&mut self, listing_id: &ListingId) -> usize {
        let Some(records) = self.listings.get_mut(listing_id) else {
            return 0;
        };
        let mut demoted = 0;
        for record in records.iter_mut().filter(|record| record.is_selected()) {
            record.interest = Interest::Interested;
            demoted += 1;
        }
        debug!(listing = %listing_id, demoted, "Listing selections demoted");
        demoted
    }

    pub fn remove_listing_selection(&mut self, listing_id: &ListingId) {
        self.remove_listing_selection_with(listing_id, Notify::Fire);
    }

    /// Demote every selected section of the listing, notifying once.
    pub fn remove_listing_selection_with(&mut self, listing_id: &ListingId, notify: Notify) {
        self.demote_listing(listing_id);
        self.notify(notify);
    }

    pub fn remove_listing_entirely(&mut self, listing_id: &ListingId) {
        self.remove_listing_entirely_with(listing_id, Notify::Fire);
    }

    /// Demote the listing's selected sections if the listing has any record.
    ///
    /// Interested-only records are kept despite the name.
    pub fn remove_listing_entirely_with(&mut self, listing_id: &ListingId, notify: Notify) {
        if self.has_interested_section(listing_id) {
            self.demote_listing(listing_id);
        }
        self.notify(notify);
    }

    pub fn clear_selections(&mut self) {
        self.clear_selections_with(Notify::Fire);
    }

    pub fn clear_selections_with(&mut self, notify: Notify) {
        self.listings.clear();
        self.notify(notify);
    }

    /// `(section, listing)` pairs for every `Selected` record, in listing then
    /// record insertion order.
    #[must_use]
    pub fn selected_section_listing_pairs(&self) -> Vec<(SectionId, ListingId)> {
        self.listings
            .iter()
            .flat_map(|(listing_id, records)| {
                records
                    .iter()
                    .filter(|record| record.is_selected())
                    .map(move |record| (record.id.clone(), listing_id.clone()))
            })
            .collect()
    }

    /// Ids of every record, whatever its interest level.
    #[must_use]
    pub fn selected_sections(&self) -> Vec<SectionId> {
        self.listings
            .values()
            .flatten()
            .map(|record| record.id.clone())
            .collect()
    }

    /// Every listing with a record, whatever its interest level.
    #[must_use]
    pub fn selected_listings(&self) -> Vec<ListingId> {
        self.listings.keys().cloned().collect()
    }

    /// Number of listings with at least one record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
