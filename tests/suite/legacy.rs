//! The single-document store on disk.

use std::fs;

use yacs_core::{FileKeyValueStore, LegacySelections, StorageError};
use yacs_types::{Listing, ListingId};

use crate::common::section;

#[test]
fn document_layout_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut selections = LegacySelections::new(FileKeyValueStore::in_dir(dir.path()));

    selections.toggle_section(&section("L2", "S9")).unwrap();
    selections.toggle_course(&Listing::with_sections("L1", ["S2", "S1"])).unwrap();

    let raw = fs::read_to_string(selections.storage().path()).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let document: serde_json::Value =
        serde_json::from_str(stored["selections"].as_str().unwrap()).unwrap();
    assert_eq!(
        document,
        serde_json::json!({ "L1": ["S1", "S2"], "L2": ["S9"] })
    );
}

#[test]
fn remove_listing_drops_every_section() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut selections = LegacySelections::new(FileKeyValueStore::in_dir(dir.path()));
    selections.toggle_course(&Listing::with_sections("L1", ["S1", "S2"])).unwrap();

    selections.remove_listing(&ListingId::from("L1")).unwrap();

    assert!(selections.selected_section_ids().unwrap().is_empty());
    assert!(!selections.has_selected_section(&ListingId::from("L1")).unwrap());
}

#[test]
fn corrupt_file_errors_until_cleared() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKeyValueStore::in_dir(dir.path());
    fs::write(store.path(), "not json").unwrap();
    let mut selections = LegacySelections::new(store);

    assert!(matches!(
        selections.toggle_section(&section("L1", "S1")),
        Err(StorageError::Json(_))
    ));

    selections.clear().unwrap();
    selections.toggle_section(&section("L1", "S1")).unwrap();
    assert!(selections.is_section_selected(&section("L1", "S1")).unwrap());
}
