//! Per-term selection behavior observed through the registry.

use std::cell::RefCell;
use std::rc::Rc;

use yacs_core::{EventCause, SelectionEvent, TermResolution, VisibleListings};
use yacs_types::{Interest, Listing, ListingId, SectionId, TermId};

use crate::common::{Harness, section};

fn mutation(term: &str) -> SelectionEvent {
    SelectionEvent {
        term: TermId::from(term),
        cause: EventCause::Mutation,
    }
}

#[test]
fn demoted_section_stays_listed() {
    let mut h = Harness::new(Some("F24"));
    let s1 = section("L1", "S1");

    assert!(h.registry.add_section(&s1, Interest::Selected, None));
    assert_eq!(
        h.registry.selected_section_listing_pairs(None),
        vec![(SectionId::from("S1"), ListingId::from("L1"))]
    );

    assert!(h.registry.remove_section(&s1, None));
    assert!(!h.registry.is_section_selected(&s1, None));
    // Ids come back whatever their interest level.
    assert_eq!(h.registry.selected_section_ids(None), vec![SectionId::from("S1")]);
}

#[test]
fn toggling_a_listing_twice_demotes_it() {
    let mut h = Harness::new(Some("F24"));
    let l2 = Listing::with_sections("L2", ["S2", "S3"]);

    h.registry.toggle_course(&l2, None);
    assert!(h.registry.is_section_selected(&section("L2", "S2"), None));
    assert!(h.registry.is_section_selected(&section("L2", "S3"), None));
    assert!(h.registry.has_selected_section(&l2.id, None));
    assert_eq!(h.take_events(), vec![mutation("F24")]);

    h.registry.toggle_course(&l2, None);
    assert!(!h.registry.has_selected_section(&l2.id, None));
    assert!(h.registry.has_interested_section(&l2.id, None));
    assert_eq!(h.take_events(), vec![mutation("F24")]);
}

#[test]
fn terms_are_isolated() {
    let mut h = Harness::new(Some("F24"));
    let s = section("L1", "S1");
    let spring = TermId::from("S25");

    h.registry.add_section(&s, Interest::Selected, None);

    assert!(h.registry.is_section_selected(&s, None));
    assert!(!h.registry.is_section_selected(&s, Some(&spring)));
    assert_eq!(h.registry.terms(), vec![TermId::from("F24")]);
}

#[test]
fn explicit_term_wins_over_active_term() {
    let mut h = Harness::new(Some("F24"));
    let spring = TermId::from("S25");

    h.registry.toggle_section(&section("L1", "S1"), Some(&spring));

    assert_eq!(h.take_events(), vec![mutation("S25")]);
    assert!(h.registry.selected_listing_ids(None).is_empty());
    assert_eq!(
        h.registry.selected_listing_ids(Some(&spring)),
        vec![ListingId::from("L1")]
    );
}

#[test]
fn clear_fires_once_and_empties_listings() {
    let mut h = Harness::new(Some("F24"));
    h.registry.toggle_course(&Listing::with_sections("L1", ["S1", "S2"]), None);
    h.registry.toggle_course(&Listing::with_sections("L2", ["S3"]), None);
    h.take_events();

    h.registry.clear(None);

    assert!(h.registry.selected_listing_ids(None).is_empty());
    assert_eq!(h.take_events(), vec![mutation("F24")]);
}

#[test]
fn unresolved_term_keeps_nothing() {
    let mut h = Harness::new(None);
    let s = section("L1", "S1");

    assert_eq!(h.registry.resolve(None), TermResolution::Unresolved);
    assert!(h.registry.add_section(&s, Interest::Selected, None));
    assert!(!h.registry.is_section_selected(&s, None));
    assert!(h.registry.terms().is_empty());
    assert!(h.take_events().is_empty());

    h.active_term.set_term(yacs_types::Term::new("F24"));
    assert_eq!(
        h.take_events(),
        vec![SelectionEvent {
            term: TermId::from("F24"),
            cause: EventCause::ActiveTermChanged,
        }]
    );
    assert!(!h.registry.is_section_selected(&s, None));
}

#[test]
fn remove_listing_entirely_only_demotes() {
    let mut h = Harness::new(Some("F24"));
    let watched = section("L1", "S1");
    let picked = section("L1", "S2");
    h.registry.add_section(&watched, Interest::Interested, None);
    h.registry.add_section(&picked, Interest::Selected, None);

    h.registry.remove_listing_entirely(&ListingId::from("L1"), None);

    // Records survive at the interested level.
    assert_eq!(h.registry.section_interest(&watched, None), Some(Interest::Interested));
    assert_eq!(h.registry.section_interest(&picked, None), Some(Interest::Interested));
    assert!(h.registry.has_interested_section(&ListingId::from("L1"), None));
}

#[test]
fn successful_adds_show_the_listing_in_the_sidebar() {
    let sidebar = Rc::new(RefCell::new(VisibleListings::new()));
    let h = Harness::new(Some("F24"));
    let mut registry = h.registry.with_sidebar(sidebar.clone());

    registry.add_section(&section("L1", "S1"), Interest::Interested, None);
    registry.add_section(&section("L1", "S1"), Interest::Selected, None);
    registry.toggle_section(&section("L2", "S5"), None);

    let visible: Vec<_> = sidebar.borrow().iter().cloned().collect();
    assert_eq!(visible, vec![ListingId::from("L1")]);
}

#[test]
fn toggling_a_watched_section_changes_nothing_but_still_notifies() {
    let mut h = Harness::new(Some("F24"));
    let s = section("L1", "S1");
    h.registry.add_section(&s, Interest::Interested, None);
    h.take_events();

    assert!(!h.registry.toggle_section(&s, None));

    assert_eq!(h.registry.section_interest(&s, None), Some(Interest::Interested));
    assert_eq!(h.take_events(), vec![mutation("F24")]);
}

#[test]
fn removing_an_unknown_listing_still_notifies() {
    let mut h = Harness::new(Some("F24"));
    let absent = ListingId::from("L9");

    h.registry.remove_listing(&absent, None);
    h.registry.remove_listing_entirely(&absent, None);

    assert_eq!(h.take_events(), vec![mutation("F24"), mutation("F24")]);
    assert!(h.registry.selected_listing_ids(None).is_empty());
}
