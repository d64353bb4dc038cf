//! Standalone one-dimensional container.

use crate::lattice::{Lattice, PREALLOC_LIMIT};
use crate::unit::Unit;
use crate::view::LineView;
use std::ops::Range;
use strata_core::{
    Axis, ContainerId, Coord, Element, Factory, GridConfig, GridError, LineId, Owner, UnitId,
};

/// An ordered run of units along one axis.
///
/// The unit at index `i` always sits at `axis.to_coords(i)`. Inserting
/// or removing a unit re-anchors every later unit, firing one shift per
/// moved unit in increasing index order.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Element, UnitRef};
/// use strata_grid::Line;
///
/// #[derive(Default)]
/// struct Cell(Option<UnitRef>);
///
/// impl Element for Cell {
///     fn set_unit(&mut self, unit: UnitRef) {
///         self.0 = Some(unit);
///     }
/// }
///
/// let mut line: Line<Cell> = Line::new(3, Axis::Y).unwrap();
/// line.create_line(Box::new(Cell::default)).unwrap();
/// line.insert_unit(1).unwrap();
/// assert_eq!(line.len(), 4);
/// assert_eq!(line.get_unit(3).unwrap().coord().y, 3);
/// ```
#[derive(Debug)]
pub struct Line<E> {
    id: ContainerId,
    axis: Axis,
    lattice: Lattice<E>,
    line: LineId,
}

impl<E: Element> Line<E> {
    /// Create a line of `length` empty units along `axis`.
    pub fn new(length: usize, axis: Axis) -> Result<Self, GridError> {
        Self::with_config(length, axis, GridConfig::default())
    }

    /// Create a line with an explicit configuration.
    ///
    /// Returns `Err(GridError::ExtentTooLarge)` if `length` exceeds
    /// `config.max_extent`.
    pub fn with_config(length: usize, axis: Axis, config: GridConfig) -> Result<Self, GridError> {
        config.check_extent("length", length)?;
        let id = ContainerId::next();
        let mut lattice = Lattice::new(Owner::Line(id), config, length);
        let mut units = Vec::with_capacity(length.min(PREALLOC_LIMIT));
        for index in 0..length {
            let unit = lattice.spawn(axis.to_coords(index as i32))?;
            lattice.register(unit)?;
            units.push(unit);
        }
        let line = lattice.new_line(axis, units)?;
        tracing::debug!(line = %id, %axis, length, "line created");
        Ok(Self {
            id,
            axis,
            lattice,
            line,
        })
    }

    /// Unique identity of this line.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Axis the line runs along.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Configuration the line was built with.
    pub fn config(&self) -> &GridConfig {
        self.lattice.config()
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        let len = self.lattice.line_len(self.line);
        debug_assert!(len.is_ok(), "line {} lost its record", self.id);
        len.unwrap_or(0)
    }

    /// Number of units, failing if the line record no longer resolves.
    fn length(&self) -> Result<usize, GridError> {
        self.lattice.line_len(self.line)
    }

    /// Whether the line holds no units.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Structure ───────────────────────────────────────────────

    /// Append a unit at the tail.
    ///
    /// If a factory has been stored by [`create_line`](Self::create_line),
    /// the new unit is filled from it.
    pub fn add_unit(&mut self) -> Result<(), GridError> {
        self.insert_unit(self.length()?)
    }

    /// Insert a unit at `index`, pushing every unit at `index` or beyond
    /// one step along the axis.
    ///
    /// The new unit is created first; the displaced units then shift in
    /// increasing index order.
    pub fn insert_unit(&mut self, index: usize) -> Result<(), GridError> {
        let len = self.length()?;
        GridError::check_index("unit", index, len + 1)?;
        self.lattice.config().check_extent("length", len + 1)?;

        let fresh = self.lattice.spawn(self.axis.to_coords(index as i32))?;
        self.lattice.line_insert(self.line, index, fresh)?;
        self.lattice.reanchor(self.line, index + 1)?;
        self.lattice.register(fresh)?;
        tracing::debug!(line = %self.id, index, "unit inserted");
        Ok(())
    }

    /// Dispose and remove the unit at `index`; every later unit moves one
    /// step back along the axis.
    ///
    /// Returns the disposed element, if the unit held one.
    pub fn remove_unit(&mut self, index: usize) -> Result<Option<E>, GridError> {
        GridError::check_index("unit", index, self.length()?)?;
        let gone = self.lattice.line_detach(self.line, index)?;
        let element = self.lattice.retire(gone)?;
        self.lattice.reanchor(self.line, index)?;
        tracing::debug!(line = %self.id, index, "unit removed");
        Ok(element)
    }

    /// Grow or shrink to `length`.
    ///
    /// Shrinking removes from the tail back to front; growing appends.
    pub fn resize_line(&mut self, length: usize) -> Result<(), GridError> {
        self.lattice.config().check_extent("length", length)?;
        while self.length()? > length {
            self.remove_unit(self.length()? - 1)?;
        }
        while self.length()? < length {
            self.add_unit()?;
        }
        Ok(())
    }

    /// Remove the units in `range`, back to front.
    pub fn trim_line(&mut self, range: Range<usize>) -> Result<(), GridError> {
        GridError::check_range("unit", &range, self.length()?)?;
        for index in range.rev() {
            self.remove_unit(index)?;
        }
        Ok(())
    }

    // ── Element lifecycle ───────────────────────────────────────

    /// Store `factory` and fill every unit from it, in index order.
    ///
    /// Later insertions reuse the stored factory.
    pub fn create_line(&mut self, factory: Factory<E>) -> Result<(), GridError> {
        let order = self.order()?;
        self.lattice.create_units(&order, factory)?;
        tracing::debug!(line = %self.id, count = order.len(), "line populated");
        Ok(())
    }

    /// Dispose every element in index order, handing each to `collector`
    /// when one is supplied. The stored factory is dropped.
    ///
    /// Returns the number of elements disposed.
    pub fn remove_line(
        &mut self,
        collector: Option<&mut dyn FnMut(E)>,
    ) -> Result<usize, GridError> {
        let order = self.order()?;
        let disposed = self.lattice.dispose_units(&order, collector)?;
        tracing::debug!(line = %self.id, disposed, "line cleared");
        Ok(disposed)
    }

    /// Dispose every element without salvaging them.
    pub fn dispose_units(&mut self) -> Result<usize, GridError> {
        self.remove_line(None)
    }

    fn order(&self) -> Result<Vec<UnitId>, GridError> {
        Ok(self.lattice.line(self.line)?.units.clone())
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// The unit at `index`.
    pub fn get_unit(&self, index: usize) -> Result<&Unit<E>, GridError> {
        let id = self.lattice.line_member(self.line, index)?;
        self.lattice.unit(id)
    }

    /// Mutable access to the unit at `index`.
    pub fn get_unit_mut(&mut self, index: usize) -> Result<&mut Unit<E>, GridError> {
        let id = self.lattice.line_member(self.line, index)?;
        self.lattice.unit_mut(id)
    }

    /// The unit at absolute coordinate `coord`.
    pub fn unit_at(&self, coord: Coord) -> Result<&Unit<E>, GridError> {
        self.lattice.unit(self.lattice.lookup(coord)?)
    }

    /// Units in index order.
    pub fn units(&self) -> impl Iterator<Item = &Unit<E>> + '_ {
        let lattice = &self.lattice;
        lattice
            .line(self.line)
            .into_iter()
            .flat_map(|record| record.units.iter())
            .filter_map(move |&id| lattice.unit(id).ok())
    }

    /// Borrowed view of the line.
    pub fn view(&self) -> Result<LineView<'_, E>, GridError> {
        LineView::new(&self.lattice, self.line)
    }

    /// Verify that every unit sits at its index and is indexed under its
    /// own coordinate.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        self.lattice.audit_cells()?;
        self.lattice.audit_line(self.line)?;
        let len = self.length()?;
        if self.lattice.unit_count() != len || self.lattice.line_count() != 1 {
            return Err(GridError::InvariantViolated {
                reason: format!(
                    "{} units and {} lines behind a line of length {}",
                    self.lattice.unit_count(),
                    self.lattice.line_count(),
                    len
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{Dimension, Handle};
    use strata_test_utils::{EventLog, Probe, ProbeFactory};

    fn populated(length: usize, log: &EventLog) -> Line<Probe> {
        let mut line = Line::new(length, Axis::X).unwrap();
        line.create_line(ProbeFactory::new(log).boxed()).unwrap();
        log.clear();
        line
    }

    fn tags(line: &Line<Probe>) -> Vec<usize> {
        line.units()
            .map(|u| u.element().unwrap().tag())
            .collect()
    }

    #[test]
    fn construction_places_units_on_axis() {
        let line: Line<Probe> = Line::new(3, Axis::Z).unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line.get_unit(2).unwrap().coord(), Coord::new(0, 0, 2));
        assert_eq!(line.get_unit(0).unwrap().dimension(), Dimension::Line);
        line.check_invariants().unwrap();
    }

    #[test]
    fn insert_shifts_tail_once_each() {
        let log = EventLog::new();
        let mut line = populated(3, &log);
        line.insert_unit(1).unwrap();

        assert_eq!(tags(&line), vec![0, 3, 1, 2]);
        assert_eq!(log.count_shifts(0), 0);
        assert_eq!(log.shifts(1), vec![Coord::new(2, 0, 0)]);
        assert_eq!(log.shifts(2), vec![Coord::new(3, 0, 0)]);
        assert_eq!(log.count_shifts(3), 0);
        line.check_invariants().unwrap();
    }

    #[test]
    fn insert_fires_create_before_shifts() {
        let log = EventLog::new();
        let mut line = populated(2, &log);
        line.insert_unit(0).unwrap();
        let events = log.events();
        assert!(matches!(
            events[0],
            strata_test_utils::Event::Created { tag: 2, .. }
        ));
        assert_eq!(log.total_shifts(), 2);
    }

    #[test]
    fn remove_shifts_tail_back() {
        let log = EventLog::new();
        let mut line = populated(4, &log);
        let gone = line.remove_unit(1).unwrap().unwrap();

        assert_eq!(gone.tag(), 1);
        assert_eq!(log.count_disposed(1), 1);
        assert_eq!(tags(&line), vec![0, 2, 3]);
        assert_eq!(log.shifts(2), vec![Coord::new(1, 0, 0)]);
        assert_eq!(log.shifts(3), vec![Coord::new(2, 0, 0)]);
        line.check_invariants().unwrap();
    }

    #[test]
    fn remove_tail_shifts_nothing() {
        let log = EventLog::new();
        let mut line = populated(3, &log);
        line.remove_unit(2).unwrap();
        assert_eq!(log.total_shifts(), 0);
    }

    #[test]
    fn out_of_range_leaves_line_untouched() {
        let log = EventLog::new();
        let mut line = populated(2, &log);
        assert_eq!(
            line.remove_unit(2).unwrap_err(),
            GridError::OutOfRange {
                what: "unit",
                index: 2,
                bound: 2
            }
        );
        assert!(line.insert_unit(3).is_err());
        assert!(log.events().is_empty());
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn add_unit_reuses_stored_factory() {
        let log = EventLog::new();
        let mut line = populated(1, &log);
        line.add_unit().unwrap();
        assert_eq!(tags(&line), vec![0, 1]);
        assert_eq!(log.count_created(1), 1);
    }

    #[test]
    fn resize_shrinks_from_tail_and_grows() {
        let log = EventLog::new();
        let mut line = populated(5, &log);
        line.resize_line(2).unwrap();
        assert_eq!(tags(&line), vec![0, 1]);
        assert_eq!(log.total_disposed(), 3);
        assert_eq!(log.total_shifts(), 0);

        line.resize_line(4).unwrap();
        assert_eq!(line.len(), 4);
        line.check_invariants().unwrap();
    }

    #[test]
    fn trim_removes_half_open_range() {
        let log = EventLog::new();
        let mut line = populated(5, &log);
        line.trim_line(1..3).unwrap();
        assert_eq!(tags(&line), vec![0, 3, 4]);
        // Unit 3 moves 3 -> 2 -> 1; unit 4 moves 4 -> 3 -> 2.
        assert_eq!(log.shifts(3), vec![Coord::new(2, 0, 0), Coord::new(1, 0, 0)]);
        assert_eq!(log.shifts(4), vec![Coord::new(3, 0, 0), Coord::new(2, 0, 0)]);
        line.check_invariants().unwrap();
    }

    #[test]
    fn extent_limit_is_enforced() {
        let mut line: Line<Probe> =
            Line::with_config(2, Axis::X, GridConfig::with_max_extent(2)).unwrap();
        assert!(matches!(
            line.add_unit(),
            Err(GridError::ExtentTooLarge { .. })
        ));
        assert!(Line::<Probe>::with_config(3, Axis::X, GridConfig::with_max_extent(2)).is_err());
    }

    #[test]
    fn remove_line_salvages_and_forgets_factory() {
        let log = EventLog::new();
        let mut line = populated(3, &log);
        let mut salvaged = Vec::new();
        let disposed = line.remove_line(Some(&mut |p: Probe| salvaged.push(p.tag()))).unwrap();
        assert_eq!(disposed, 3);
        assert_eq!(salvaged, vec![0, 1, 2]);

        line.add_unit().unwrap();
        assert!(!line.get_unit(3).unwrap().is_occupied());
    }

    #[test]
    fn unit_at_resolves_coordinates() {
        let line: Line<Probe> = Line::new(3, Axis::Y).unwrap();
        assert_eq!(line.unit_at(Coord::new(0, 2, 0)).unwrap().coord().y, 2);
        assert!(matches!(
            line.unit_at(Coord::new(1, 0, 0)),
            Err(GridError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn lost_record_fails_structural_calls() {
        let mut line: Line<Probe> = Line::new(2, Axis::X).unwrap();
        line.line = LineId::new(7, 3);
        for result in [
            line.add_unit(),
            line.insert_unit(0),
            line.resize_line(4),
            line.trim_line(0..0),
            line.check_invariants(),
        ] {
            assert!(matches!(result, Err(GridError::InvariantViolated { .. })));
        }
        assert!(matches!(
            line.remove_unit(0),
            Err(GridError::InvariantViolated { .. })
        ));
        // No unit was spawned or retired on the way to the error.
        assert_eq!(line.lattice.unit_count(), 2);
    }

    #[test]
    fn insert_then_remove_shifts_once_per_call() {
        let log = EventLog::new();
        let mut line = populated(3, &log);
        line.insert_unit(1).unwrap();
        line.remove_unit(1).unwrap();

        assert_eq!(tags(&line), vec![0, 1, 2]);
        assert_eq!(log.count_shifts(0), 0);
        assert_eq!(log.shifts(1), vec![Coord::new(2, 0, 0), Coord::new(1, 0, 0)]);
        assert_eq!(log.shifts(2), vec![Coord::new(3, 0, 0), Coord::new(2, 0, 0)]);
        line.check_invariants().unwrap();
    }
}
