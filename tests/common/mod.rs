//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use yacs::Session;
use yacs_core::{SelectedTerm, SelectionEvent, SelectionRegistry, Subscription};
use yacs_types::{Section, Term};

/// Output of one scripted run of the shell.
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
}

/// Feed `script` to `session` line by line.
pub fn transcript(session: &mut Session, script: &str) -> Transcript {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    yacs::run(session, script.as_bytes(), &mut stdout, &mut stderr).expect("shell run");
    Transcript {
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

/// A registry whose active term starts at `term`, with every event recorded.
pub struct Harness {
    pub registry: SelectionRegistry,
    pub active_term: Rc<SelectedTerm>,
    pub events: Rc<RefCell<Vec<SelectionEvent>>>,
    _subscription: Subscription,
}

impl Harness {
    pub fn new(term: Option<&str>) -> Self {
        let active_term = Rc::new(match term {
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
            registry,
            active_term,
            events,
            _subscription: subscription,
        }
    }

    pub fn take_events(&self) -> Vec<SelectionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

pub fn section(listing: &str, id: &str) -> Section {
    Section::new(id, listing)
}
