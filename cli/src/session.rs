//! Executes parsed commands against the configured selection backend.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use yacs_config::{StorageBackend, YacsConfig};
use yacs_core::{
    FileKeyValueStore, LegacySelections, SelectedTerm, SelectionEvent, SelectionRegistry,
    Subscription,
};
use yacs_types::{Interest, Term, TermId};

use crate::command::{Command, CommandError};

enum Backend {
    Memory {
        registry: SelectionRegistry,
        active_term: Rc<SelectedTerm>,
        events: Rc<RefCell<Vec<SelectionEvent>>>,
    },
    Document {
        selections: LegacySelections<FileKeyValueStore>,
        changes: Rc<RefCell<usize>>,
    },
}

pub struct Session {
    backend: Backend,
    _subscription: Subscription,
}

impl Session {
    /// Per-term in-memory selections. `default_term` seeds the active term.
    #[must_use]
    pub fn in_memory(default_term: Option<TermId>) -> Self {
        let active_term = Rc::new(match default_term {
            Some(term) => SelectedTerm::with_term(Term::new(term)),
            None => SelectedTerm::new(),
        });
        let registry = SelectionRegistry::new(active_term.clone());

        let events = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let events = Rc::clone(&events);
            registry.subscribe_to_selections(move |event| events.borrow_mut().push(event.clone()))
        };

        Self {
            backend: Backend::Memory {
                registry,
                active_term,
                events,
            },
            _subscription: subscription,
        }
    }

    /// The single-document store under `dir`.
    #[must_use]
    pub fn document(dir: &Path) -> Self {
        let selections = LegacySelections::new(FileKeyValueStore::in_dir(dir));
        let changes = Rc::new(RefCell::new(0));
        let subscription = {
            let changes = Rc::clone(&changes);
            selections.subscribe(move |()| *changes.borrow_mut() += 1)
        };

        Self {
            backend: Backend::Document {
                selections,
                changes,
            },
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn from_config(config: &YacsConfig) -> Self {
        match (config.storage_backend(), config.storage_dir()) {
            (StorageBackend::Document, Some(dir)) => {
                tracing::info!(path = %dir.display(), "Using document storage");
                Self::document(&dir)
            }
            (StorageBackend::Document, None) => {
                tracing::warn!("No storage directory available; falling back to memory storage");
                Self::in_memory(config.default_term())
            }
            (StorageBackend::Memory, _) => Self::in_memory(config.default_term()),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Memory { .. } => StorageBackend::Memory.as_str(),
            Backend::Document { .. } => StorageBackend::Document.as_str(),
        }
    }

    /// Run one command, returning its output lines followed by one line per
    /// selection event it caused.
    pub fn execute(&mut self, command: &Command) -> Result<Vec<String>, CommandError> {
        match &mut self.backend {
            Backend::Memory {
                registry,
                active_term,
                events,
            } => {
                let mut lines = execute_memory(registry, active_term, command);
                lines.extend(
                    events
                        .borrow_mut()
                        .drain(..)
                        .map(|event| format!("event {} {}", event.term, event.cause)),
                );
                Ok(lines)
            }
            Backend::Document {
                selections,
                changes,
            } => {
                let mut lines = execute_document(selections, command)?;
                let fired = std::mem::take(&mut *changes.borrow_mut());
                lines.extend((0..fired).map(|_| "event selections".to_string()));
                Ok(lines)
            }
        }
    }
}

fn flag(value: bool) -> String {
    value.to_string()
}

fn joined<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn execute_memory(
    registry: &mut SelectionRegistry,
    active_term: &SelectedTerm,
    command: &Command,
) -> Vec<String> {
    let term = command.term();
    let line = match command {
        Command::Term(id) => {
            active_term.set_term(Term::new(id.clone()));
            format!("term {id}")
        }
        Command::Add {
            section, interest, ..
        } => {
            let added = registry.add_section(section, interest.unwrap_or(Interest::Selected), term);
            String::from(if added { "added" } else { "unchanged" })
        }
        Command::Toggle { section, .. } => {
            registry.toggle_section(section, term);
            registry
                .section_interest(section, term)
                .map_or("none", Interest::as_str)
                .to_string()
        }
        Command::Remove { section, .. } => {
            String::from(if registry.remove_section(section, term) { "demoted" } else { "not found" })
        }
        Command::ToggleListing { listing, .. } => {
            registry.toggle_course(listing, term);
            format!(
                "{} {}",
                listing.id,
                if registry.has_selected_section(&listing.id, term) {
                    "selected"
                } else {
                    "interested"
                }
            )
        }
        Command::RemoveListing { listing, .. } => {
            registry.remove_listing(listing, term);
            "ok".to_string()
        }
        Command::Clear { .. } => {
            registry.clear(term);
            "ok".to_string()
        }
        Command::Selected { section, .. } => flag(registry.is_section_selected(section, term)),
        Command::Interest { section, .. } => registry
            .section_interest(section, term)
            .map_or("none", Interest::as_str)
            .to_string(),
        Command::Pairs { .. } => registry
            .selected_section_listing_pairs(term)
            .iter()
            .map(|(section, listing)| format!("{section}@{listing}"))
            .collect::<Vec<_>>()
            .join(" "),
        Command::Sections { .. } => joined(&registry.selected_section_ids(term)),
        Command::Listings { .. } => joined(&registry.selected_listing_ids(term)),
        Command::Quit => String::new(),
    };
    vec![line]
}

fn unsupported(command: &'static str) -> CommandError {
    CommandError::Unsupported {
        command,
        backend: StorageBackend::Document.as_str(),
    }
}

fn execute_document(
    selections: &mut LegacySelections<FileKeyValueStore>,
    command: &Command,
) -> Result<Vec<String>, CommandError> {
    if command.term().is_some() {
        return Err(unsupported("--term"));
    }
    let line = match command {
        Command::Term(_) => return Err(unsupported("term")),
        Command::Interest { .. } => return Err(unsupported("interest")),
        Command::Pairs { .. } => return Err(unsupported("pairs")),
        Command::Add {
            interest: Some(Interest::Interested),
            ..
        } => return Err(unsupported("add interested")),
        Command::Add { section, .. } => {
            String::from(if selections.add_section(section)? { "added" } else { "unchanged" })
        }
        Command::Toggle { section, .. } => {
            selections.toggle_section(section)?;
            flag(selections.is_section_selected(section)?)
        }
        Command::Remove { section, .. } => {
            String::from(if selections.remove_section(section)? { "removed" } else { "not found" })
        }
        Command::ToggleListing { listing, .. } => {
            selections.toggle_course(listing)?;
            format!("{} {}", listing.id, flag(selections.has_selected_section(&listing.id)?))
        }
        Command::RemoveListing { listing, .. } => {
            selections.remove_listing(listing)?;
            "ok".to_string()
        }
        Command::Clear { .. } => {
            selections.clear()?;
            "ok".to_string()
        }
        Command::Selected { section, .. } => flag(selections.is_section_selected(section)?),
        Command::Sections { .. } => joined(&selections.selected_section_ids()?),
        Command::Listings { .. } => joined(&selections.selected_listing_ids()?),
        Command::Quit => String::new(),
    };
    Ok(vec![line])
}
