//! The single addressable cell.

use std::any::{type_name, Any};
use strata_core::{Coord, Dimension, Element, GridError, Owner, UnitRef};

/// A single cell holding at most one element.
///
/// The owner (and with it the [`Dimension`] tag) is fixed when the unit
/// is built. Only the container that owns the unit may move it, which is
/// the only path through which its coordinate changes.
#[derive(Debug)]
pub struct Unit<E> {
    coord: Coord,
    owner: Owner,
    element: Option<E>,
}

impl<E: Element> Unit<E> {
    pub(crate) fn new(owner: Owner, coord: Coord) -> Self {
        Self {
            coord,
            owner,
            element: None,
        }
    }

    /// A unit not owned by any container (dimension 0).
    pub fn detached(coord: Coord) -> Self {
        Self::new(Owner::Detached, coord)
    }

    /// Absolute coordinate of this unit.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// The owning container.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Dimension tag, derived from the owner.
    pub fn dimension(&self) -> Dimension {
        self.owner.dimension()
    }

    /// Back-reference describing this unit.
    pub fn reference(&self) -> UnitRef {
        UnitRef {
            owner: self.owner,
            coord: self.coord,
        }
    }

    /// The element, if the unit is occupied.
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Mutable access to the element, if the unit is occupied.
    pub fn element_mut(&mut self) -> Option<&mut E> {
        self.element.as_mut()
    }

    /// Whether an element is present.
    pub fn is_occupied(&self) -> bool {
        self.element.is_some()
    }

    /// Fill the unit with a fresh element from `factory`.
    ///
    /// An element already present is disposed first. The new element is
    /// bound to this unit and then receives its create hook.
    pub fn create_unit(&mut self, factory: &mut dyn FnMut() -> E) {
        self.dispose_unit();
        self.adopt(factory());
    }

    /// Dispose the element, if any, and hand it back for salvage.
    pub fn dispose_unit(&mut self) -> Option<E> {
        let mut element = self.element.take()?;
        element.on_dispose();
        Some(element)
    }

    /// Weakly-typed counterpart of [`create_unit`](Self::create_unit).
    ///
    /// Adopts `element` only if it is the container's element type;
    /// otherwise fails with [`GridError::CapabilityMismatch`] and leaves
    /// the unit untouched.
    pub fn place_any(&mut self, element: Box<dyn Any>) -> Result<(), GridError>
    where
        E: 'static,
    {
        let element = element
            .downcast::<E>()
            .map_err(|_| GridError::CapabilityMismatch {
                expected: type_name::<E>(),
            })?;
        self.dispose_unit();
        self.adopt(*element);
        Ok(())
    }

    fn adopt(&mut self, mut element: E) {
        element.set_unit(self.reference());
        element.on_create();
        self.element = Some(element);
    }

    /// Fire the shift hook.
    pub(crate) fn shift(&mut self) {
        if let Some(element) = self.element.as_mut() {
            element.on_shift();
        }
    }

    /// Move the unit to `coord`, re-bind the element and fire its shift
    /// hook.
    pub(crate) fn move_to(&mut self, coord: Coord) {
        tracing::trace!(owner = %self.owner, from = %self.coord, to = %coord, "unit shifted");
        self.coord = coord;
        let reference = self.reference();
        if let Some(element) = self.element.as_mut() {
            element.set_unit(reference);
        }
        self.shift();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::ContainerId;
    use strata_test_utils::{Event, EventLog, Probe, ProbeFactory};

    #[test]
    fn detached_unit_has_dimension_zero() {
        let unit: Unit<Probe> = Unit::detached(Coord::ORIGIN);
        assert_eq!(unit.dimension(), Dimension::Detached);
        assert!(!unit.is_occupied());
    }

    #[test]
    fn create_unit_binds_and_fires_create() {
        let log = EventLog::new();
        let factory = ProbeFactory::new(&log);
        let owner = Owner::Volume(ContainerId::next());
        let mut unit = Unit::new(owner, Coord::new(1, 2, 3));
        unit.create_unit(&mut factory.as_fn());

        let probe = unit.element().unwrap();
        assert_eq!(probe.unit().unwrap().coord, Coord::new(1, 2, 3));
        assert_eq!(probe.unit().unwrap().owner, owner);
        assert_eq!(
            log.events(),
            vec![Event::Created {
                tag: 0,
                coord: Coord::new(1, 2, 3)
            }]
        );
    }

    #[test]
    fn create_unit_replaces_existing_element() {
        let log = EventLog::new();
        let factory = ProbeFactory::new(&log);
        let mut unit = Unit::new(Owner::Line(ContainerId::next()), Coord::ORIGIN);
        unit.create_unit(&mut factory.as_fn());
        unit.create_unit(&mut factory.as_fn());

        assert_eq!(unit.element().unwrap().tag(), 1);
        assert_eq!(
            log.events(),
            vec![
                Event::Created { tag: 0, coord: Coord::ORIGIN },
                Event::Disposed { tag: 0, coord: Coord::ORIGIN },
                Event::Created { tag: 1, coord: Coord::ORIGIN },
            ]
        );
    }

    #[test]
    fn dispose_unit_clears_and_returns_element() {
        let log = EventLog::new();
        let factory = ProbeFactory::new(&log);
        let mut unit = Unit::new(Owner::Line(ContainerId::next()), Coord::ORIGIN);
        unit.create_unit(&mut factory.as_fn());

        let salvaged = unit.dispose_unit().unwrap();
        assert_eq!(salvaged.tag(), 0);
        assert!(!unit.is_occupied());
        assert!(unit.dispose_unit().is_none());
        assert_eq!(log.count_disposed(0), 1);
    }

    #[test]
    fn move_to_rebinds_before_shift() {
        let log = EventLog::new();
        let factory = ProbeFactory::new(&log);
        let mut unit = Unit::new(Owner::Line(ContainerId::next()), Coord::ORIGIN);
        unit.create_unit(&mut factory.as_fn());
        unit.move_to(Coord::new(4, 0, 0));

        assert_eq!(unit.coord(), Coord::new(4, 0, 0));
        assert_eq!(log.shifts(0), vec![Coord::new(4, 0, 0)]);
    }

    #[test]
    fn shift_on_empty_unit_is_silent() {
        let mut unit: Unit<Probe> = Unit::detached(Coord::ORIGIN);
        unit.move_to(Coord::new(0, 1, 0));
        assert_eq!(unit.coord(), Coord::new(0, 1, 0));
    }

    #[test]
    fn place_any_accepts_matching_type() {
        let log = EventLog::new();
        let mut unit: Unit<Probe> = Unit::new(Owner::Line(ContainerId::next()), Coord::ORIGIN);
        unit.place_any(Box::new(Probe::new(7, &log))).unwrap();
        assert_eq!(unit.element().unwrap().tag(), 7);
        assert_eq!(log.count_created(7), 1);
    }

    #[test]
    fn place_any_rejects_foreign_type() {
        let log = EventLog::new();
        let factory = ProbeFactory::new(&log);
        let mut unit = Unit::new(Owner::Line(ContainerId::next()), Coord::ORIGIN);
        unit.create_unit(&mut factory.as_fn());

        let err = unit.place_any(Box::new("not a probe")).unwrap_err();
        assert!(matches!(err, GridError::CapabilityMismatch { .. }));
        // The existing element survives.
        assert_eq!(unit.element().unwrap().tag(), 0);
        assert_eq!(log.count_disposed(0), 0);
    }
}
