//! Test utilities and recording elements for Strata development.
//!
//! Provides [`Probe`], an [`Element`] that records every lifecycle hook
//! into a shared [`EventLog`], and [`ProbeFactory`], which hands out
//! probes with sequential tags. Tests assert on the log to check that
//! create, dispose and shift notifications fire exactly when and where
//! they should.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use strata_core::{Coord, Element, Factory, UnitRef};

/// One recorded lifecycle hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Created { tag: usize, coord: Coord },
    Disposed { tag: usize, coord: Coord },
    Shifted { tag: usize, coord: Coord },
}

impl Event {
    pub fn tag(&self) -> usize {
        match self {
            Self::Created { tag, .. } | Self::Disposed { tag, .. } | Self::Shifted { tag, .. } => {
                *tag
            }
        }
    }
}

/// Shared, append-only log of hook invocations.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Coordinates reported by each shift of the probe tagged `tag`, in order.
    pub fn shifts(&self, tag: usize) -> Vec<Coord> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Shifted { tag: t, coord } if *t == tag => Some(*coord),
                _ => None,
            })
            .collect()
    }

    pub fn count_created(&self, tag: usize) -> usize {
        self.count(|e| matches!(e, Event::Created { tag: t, .. } if *t == tag))
    }

    pub fn count_disposed(&self, tag: usize) -> usize {
        self.count(|e| matches!(e, Event::Disposed { tag: t, .. } if *t == tag))
    }

    pub fn count_shifts(&self, tag: usize) -> usize {
        self.count(|e| matches!(e, Event::Shifted { tag: t, .. } if *t == tag))
    }

    /// Total number of shift events across all probes.
    pub fn total_shifts(&self) -> usize {
        self.count(|e| matches!(e, Event::Shifted { .. }))
    }

    pub fn total_disposed(&self) -> usize {
        self.count(|e| matches!(e, Event::Disposed { .. }))
    }

    fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

/// An element that records its hooks into an [`EventLog`].
#[derive(Debug)]
pub struct Probe {
    tag: usize,
    unit: Option<UnitRef>,
    log: EventLog,
}

impl Probe {
    pub fn new(tag: usize, log: &EventLog) -> Self {
        Self {
            tag,
            unit: None,
            log: log.clone(),
        }
    }

    pub fn tag(&self) -> usize {
        self.tag
    }

    /// The most recently bound back-reference.
    pub fn unit(&self) -> Option<UnitRef> {
        self.unit
    }

    fn coord(&self) -> Coord {
        self.unit.map(|u| u.coord).unwrap_or_default()
    }
}

impl Element for Probe {
    fn set_unit(&mut self, unit: UnitRef) {
        self.unit = Some(unit);
    }

    fn on_create(&mut self) {
        self.log.push(Event::Created {
            tag: self.tag,
            coord: self.coord(),
        });
    }

    fn on_dispose(&mut self) {
        self.log.push(Event::Disposed {
            tag: self.tag,
            coord: self.coord(),
        });
    }

    fn on_shift(&mut self) {
        self.log.push(Event::Shifted {
            tag: self.tag,
            coord: self.coord(),
        });
    }
}

/// Counting factory: each probe gets the next sequential tag.
#[derive(Clone, Debug)]
pub struct ProbeFactory {
    log: EventLog,
    next: Rc<Cell<usize>>,
}

impl ProbeFactory {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            next: Rc::new(Cell::new(0)),
        }
    }

    /// Build the next probe.
    pub fn make(&self) -> Probe {
        let tag = self.next.get();
        self.next.set(tag + 1);
        Probe::new(tag, &self.log)
    }

    /// Number of probes built so far.
    pub fn produced(&self) -> usize {
        self.next.get()
    }

    /// Borrowing closure view, for APIs taking `&mut dyn FnMut() -> Probe`.
    pub fn as_fn(&self) -> impl FnMut() -> Probe + '_ {
        move || self.make()
    }

    /// Owning factory sharing this counter, for container `create_*` calls.
    pub fn boxed(&self) -> Factory<Probe> {
        let this = self.clone();
        Box::new(move || this.make())
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
