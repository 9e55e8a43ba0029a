//! Course selection state for YACS.
//!
//! This crate owns the in-memory record of which sections a user has selected
//! or watch-listed, per academic term, and tells interested views when it
//! changes:
//!
//! - **`store`**: one term's listing -> section records and its change hook
//! - **`registry`**: the per-term stores, term resolution, and the shared
//!   event channel
//! - **`events`**: synchronous publish/subscribe with RAII subscriptions
//! - **`term`** / **`sidebar`** / **`source`**: collaborator seams
//! - **`interested`**: the sidebar's listing view model
//! - **`legacy`** / **`storage`**: the single-document persisted variant
//!
//! Everything here is single-threaded and runs to completion; nothing blocks.

pub mod events;
pub mod interested;
pub mod legacy;
pub mod registry;
pub mod sidebar;
pub mod source;
pub mod storage;
pub mod store;
pub mod term;

pub use events::{EventBus, Subscription};
pub use interested::InterestedListings;
pub use legacy::{LegacySelections, SELECTIONS_KEY, SelectionDocument};
pub use registry::{EventCause, SelectionEvent, SelectionRegistry, TermResolution};
pub use sidebar::{SidebarVisibility, VisibleListings};
pub use source::{InMemoryListingSource, ListingSource, SourceError};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};
pub use store::{InterestedSection, Notify, SelectionStore};
pub use term::{ActiveTerm, SelectedTerm};
