//! Core domain types for YACS course selection.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Terms, listings and sections are owned by the catalogue; the selection layer
//! only refers to them by id.

mod catalog;
mod ids;
mod interest;

pub use catalog::{Listing, Section, Term};
pub use ids::{ListingId, SectionId, TermId};
pub use interest::{Interest, UnknownInterest};
