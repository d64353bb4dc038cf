//! Standalone two-dimensional container.
//!
//! A surface owns two families of lines. Width-lines run along the width
//! axis of its normal, one per height index; height-lines run along the
//! height axis, one per width index. Each unit is a member of exactly
//! one line of each family, and both families hold handles to the same
//! units in the surface's lattice.

use crate::lattice::{Lattice, PREALLOC_LIMIT};
use crate::unit::Unit;
use crate::view::{LineView, SurfaceRecord, SurfaceView};
use std::collections::HashSet;
use std::ops::Range;
use strata_core::axis::{convert_to_vector, line_to_vector};
use strata_core::{
    Axis, ContainerId, Coord, Element, Factory, GridConfig, GridError, LineId, Owner, UnitId,
};

/// Which line family an in-plane axis selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Width,
    Height,
}

impl Family {
    fn of(normal: Axis, axis: Axis) -> Result<Self, GridError> {
        if axis == normal.width_axis() {
            Ok(Self::Width)
        } else if axis == normal.height_axis() {
            Ok(Self::Height)
        } else {
            Err(GridError::InvalidAxis { axis, normal })
        }
    }

    /// Name of the extent that grows when a line joins this family.
    fn extent_name(self) -> &'static str {
        match self {
            Self::Width => "height",
            Self::Height => "width",
        }
    }
}

impl SurfaceRecord {
    /// `(family, cross family)` for `family`.
    fn split_mut(&mut self, family: Family) -> (&mut Vec<LineId>, &mut Vec<LineId>) {
        match family {
            Family::Width => (&mut self.width_lines, &mut self.height_lines),
            Family::Height => (&mut self.height_lines, &mut self.width_lines),
        }
    }

    fn family(&self, family: Family) -> &[LineId] {
        match family {
            Family::Width => &self.width_lines,
            Family::Height => &self.height_lines,
        }
    }
}

/// A rectangular grid of units oriented by a normal axis.
///
/// The unit at `(w, h)` sits at `convert_to_vector(normal, w, h, 0)`.
/// Lines can be inserted or removed along either in-plane axis; every
/// unit past the change shifts once, in increasing index order.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Element, UnitRef};
/// use strata_grid::Surface;
///
/// #[derive(Default)]
/// struct Tile(Option<UnitRef>);
///
/// impl Element for Tile {
///     fn set_unit(&mut self, unit: UnitRef) {
///         self.0 = Some(unit);
///     }
/// }
///
/// let mut surface: Surface<Tile> = Surface::new(3, 2, Axis::Z).unwrap();
/// surface.create_surface(Box::new(Tile::default)).unwrap();
/// // A line along Y is a column; removing one narrows the surface.
/// surface.remove_line(Axis::Y, 0).unwrap();
/// assert_eq!((surface.width(), surface.height()), (2, 2));
/// surface.check_invariants().unwrap();
/// ```
#[derive(Debug)]
pub struct Surface<E> {
    id: ContainerId,
    normal: Axis,
    lattice: Lattice<E>,
    record: SurfaceRecord,
}

impl<E: Element> Surface<E> {
    /// Create a `width` × `height` surface of empty units.
    pub fn new(width: usize, height: usize, normal: Axis) -> Result<Self, GridError> {
        Self::with_config(width, height, normal, GridConfig::default())
    }

    /// Create a surface with an explicit configuration.
    pub fn with_config(
        width: usize,
        height: usize,
        normal: Axis,
        config: GridConfig,
    ) -> Result<Self, GridError> {
        config.check_extent("width", width)?;
        config.check_extent("height", height)?;
        let id = ContainerId::next();
        let mut lattice = Lattice::new(Owner::Surface(id), config, width.saturating_mul(height));

        let mut rows: Vec<Vec<UnitId>> = Vec::with_capacity(height.min(PREALLOC_LIMIT));
        for h in 0..height {
            let mut row = Vec::with_capacity(width.min(PREALLOC_LIMIT));
            for w in 0..width {
                let unit = lattice.spawn(convert_to_vector(normal, w as i32, h as i32, 0))?;
                lattice.register(unit)?;
                row.push(unit);
            }
            rows.push(row);
        }
        let height_lines = (0..width)
            .map(|w| {
                let column = rows.iter().map(|row| row[w]).collect();
                lattice.new_line(normal.height_axis(), column)
            })
            .collect::<Result<_, _>>()?;
        let width_lines = rows
            .into_iter()
            .map(|row| lattice.new_line(normal.width_axis(), row))
            .collect::<Result<_, _>>()?;

        tracing::debug!(surface = %id, %normal, width, height, "surface created");
        Ok(Self {
            id,
            normal,
            lattice,
            record: SurfaceRecord {
                width_lines,
                height_lines,
            },
        })
    }

    /// Unique identity of this surface.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Axis the surface is orthogonal to.
    pub fn normal(&self) -> Axis {
        self.normal
    }

    /// Configuration the surface was built with.
    pub fn config(&self) -> &GridConfig {
        self.lattice.config()
    }

    /// Extent along the width axis: the number of height-lines.
    pub fn width(&self) -> usize {
        self.record.height_lines.len()
    }

    /// Extent along the height axis: the number of width-lines.
    pub fn height(&self) -> usize {
        self.record.width_lines.len()
    }

    /// Number of units.
    pub fn unit_count(&self) -> usize {
        self.lattice.unit_count()
    }

    // ── Structure ───────────────────────────────────────────────

    /// Append a line running along `axis`.
    ///
    /// `axis` must lie in the plane; a line along the width axis adds a
    /// row (height grows), one along the height axis adds a column.
    pub fn add_line(&mut self, axis: Axis) -> Result<(), GridError> {
        let family = Family::of(self.normal, axis)?;
        self.insert_line(axis, self.record.family(family).len())
    }

    /// Insert a line running along `axis` at family position `index`.
    ///
    /// Units are created first, one per crossing line, and spliced into
    /// the crossing lines. The new line then joins its family, and every
    /// unit past `index` shifts one step, in increasing index order.
    pub fn insert_line(&mut self, axis: Axis, index: usize) -> Result<(), GridError> {
        let family = Family::of(self.normal, axis)?;
        let count = self.record.family(family).len();
        GridError::check_index("line", index, count + 1)?;
        self.lattice
            .config()
            .check_extent(family.extent_name(), count + 1)?;

        let (lines, cross) = self.record.split_mut(family);
        let mut fresh = Vec::with_capacity(cross.len());
        for (j, &crossing) in cross.iter().enumerate() {
            let coord = line_to_vector(axis, self.normal, j as i32, index as i32);
            let unit = self.lattice.spawn(coord)?;
            self.lattice.line_insert(crossing, index, unit)?;
            fresh.push(unit);
        }
        let line = self.lattice.new_line(axis, fresh.clone())?;
        lines.insert(index, line);
        for k in index + 1..=count {
            for &crossing in cross.iter() {
                self.lattice.reanchor_member(crossing, k)?;
            }
        }
        for unit in fresh {
            self.lattice.register(unit)?;
        }
        tracing::debug!(surface = %self.id, %axis, index, "line inserted");
        Ok(())
    }

    /// Dispose and remove the line running along `axis` at family
    /// position `index`; every later line shifts back one step.
    pub fn remove_line(&mut self, axis: Axis, index: usize) -> Result<(), GridError> {
        let family = Family::of(self.normal, axis)?;
        let count = self.record.family(family).len();
        GridError::check_index("line", index, count)?;

        let (lines, cross) = self.record.split_mut(family);
        for &crossing in cross.iter() {
            let unit = self.lattice.line_detach(crossing, index)?;
            self.lattice.retire(unit)?;
        }
        let line = lines.remove(index);
        self.lattice.drop_line(line)?;
        for k in index..count - 1 {
            for &crossing in cross.iter() {
                self.lattice.reanchor_member(crossing, k)?;
            }
        }
        tracing::debug!(surface = %self.id, %axis, index, "line removed");
        Ok(())
    }

    /// Grow or shrink to `width` × `height`.
    ///
    /// Both axes shrink first, from the last line back, then grow by
    /// appending.
    pub fn resize_surface(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let config = self.lattice.config();
        config.check_extent("width", width)?;
        config.check_extent("height", height)?;
        let (wa, ha) = (self.normal.width_axis(), self.normal.height_axis());

        while self.width() > width {
            self.remove_line(ha, self.width() - 1)?;
        }
        while self.height() > height {
            self.remove_line(wa, self.height() - 1)?;
        }
        while self.width() < width {
            self.add_line(ha)?;
        }
        while self.height() < height {
            self.add_line(wa)?;
        }
        Ok(())
    }

    /// Remove the lines along `axis` whose family positions fall in
    /// `range`, back to front.
    pub fn trim_surface(&mut self, axis: Axis, range: Range<usize>) -> Result<(), GridError> {
        let family = Family::of(self.normal, axis)?;
        GridError::check_range("line", &range, self.record.family(family).len())?;
        for index in range.rev() {
            self.remove_line(axis, index)?;
        }
        Ok(())
    }

    // ── Element lifecycle ───────────────────────────────────────

    /// Store `factory` and fill every unit from it, in row-major order.
    pub fn create_surface(&mut self, factory: Factory<E>) -> Result<(), GridError> {
        let order = self.row_major()?;
        self.lattice.create_units(&order, factory)?;
        tracing::debug!(surface = %self.id, count = order.len(), "surface populated");
        Ok(())
    }

    /// Dispose every element in row-major order, handing each to
    /// `collector` when one is supplied. The stored factory is dropped.
    ///
    /// Returns the number of elements disposed.
    pub fn remove_surface(
        &mut self,
        collector: Option<&mut dyn FnMut(E)>,
    ) -> Result<usize, GridError> {
        let order = self.row_major()?;
        let disposed = self.lattice.dispose_units(&order, collector)?;
        tracing::debug!(surface = %self.id, disposed, "surface cleared");
        Ok(disposed)
    }

    /// Dispose every element without salvaging them.
    pub fn dispose_units(&mut self) -> Result<usize, GridError> {
        self.remove_surface(None)
    }

    fn row_major(&self) -> Result<Vec<UnitId>, GridError> {
        let mut order = Vec::with_capacity(self.lattice.unit_count());
        for &line in &self.record.width_lines {
            order.extend_from_slice(&self.lattice.line(line)?.units);
        }
        Ok(order)
    }

    // ── Lookup ──────────────────────────────────────────────────

    fn locate(&self, w: usize, h: usize) -> Result<UnitId, GridError> {
        GridError::check_index("width", w, self.width())?;
        GridError::check_index("height", h, self.height())?;
        self.lattice
            .lookup(convert_to_vector(self.normal, w as i32, h as i32, 0))
    }

    /// The unit at `(w, h)`.
    pub fn get_unit(&self, w: usize, h: usize) -> Result<&Unit<E>, GridError> {
        self.lattice.unit(self.locate(w, h)?)
    }

    /// Mutable access to the unit at `(w, h)`.
    pub fn get_unit_mut(&mut self, w: usize, h: usize) -> Result<&mut Unit<E>, GridError> {
        let id = self.locate(w, h)?;
        self.lattice.unit_mut(id)
    }

    /// The unit at absolute coordinate `coord`.
    pub fn unit_at(&self, coord: Coord) -> Result<&Unit<E>, GridError> {
        self.lattice.unit(self.lattice.lookup(coord)?)
    }

    /// Units in row-major order: height outer, width inner.
    pub fn units(&self) -> impl Iterator<Item = &Unit<E>> + '_ {
        let lattice = &self.lattice;
        self.record
            .width_lines
            .iter()
            .filter_map(move |&line| lattice.line(line).ok())
            .flat_map(|record| record.units.iter())
            .filter_map(move |&id| lattice.unit(id).ok())
    }

    /// The width-line at height index `h`.
    pub fn width_line(&self, h: usize) -> Result<LineView<'_, E>, GridError> {
        self.view().width_line(h)
    }

    /// The height-line at width index `w`.
    pub fn height_line(&self, w: usize) -> Result<LineView<'_, E>, GridError> {
        self.view().height_line(w)
    }

    /// Borrowed view of the surface.
    pub fn view(&self) -> SurfaceView<'_, E> {
        SurfaceView::new(&self.lattice, &self.record, self.normal, 0)
    }

    /// Verify the coordinate index, both line families and the crossing
    /// of every width-line with every height-line.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        self.lattice.audit_cells()?;
        let (width, height) = (self.width(), self.height());
        let violated = |reason: String| Err(GridError::InvariantViolated { reason });

        if self.lattice.unit_count() != width * height {
            return violated(format!(
                "{} units in a {width}x{height} surface",
                self.lattice.unit_count()
            ));
        }
        if self.lattice.line_count() != width + height {
            return violated(format!(
                "{} lines in a {width}x{height} surface",
                self.lattice.line_count()
            ));
        }

        let families = [
            (&self.record.width_lines, self.normal.width_axis(), width),
            (&self.record.height_lines, self.normal.height_axis(), height),
        ];
        for (lines, axis, len) in families {
            let mut seen = HashSet::with_capacity(width * height);
            for &line in lines.iter() {
                let record = self.lattice.line(line)?;
                if record.axis != axis || record.units.len() != len {
                    return violated(format!(
                        "{line} runs along {} with {} units, expected {axis} with {len}",
                        record.axis,
                        record.units.len()
                    ));
                }
                self.lattice.audit_line(line)?;
                for &unit in &record.units {
                    if !seen.insert(unit) {
                        return violated(format!("{unit} is in two lines along {axis}"));
                    }
                }
            }
        }

        for (h, &row) in self.record.width_lines.iter().enumerate() {
            for (w, &column) in self.record.height_lines.iter().enumerate() {
                let across = self.lattice.line_member(row, w)?;
                let down = self.lattice.line_member(column, h)?;
                if across != down {
                    return violated(format!("lines {row} and {column} do not cross at ({w}, {h})"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Dimension;
    use strata_test_utils::{EventLog, Probe, ProbeFactory};

    fn populated(width: usize, height: usize, normal: Axis, log: &EventLog) -> Surface<Probe> {
        let mut surface = Surface::new(width, height, normal).unwrap();
        surface
            .create_surface(ProbeFactory::new(log).boxed())
            .unwrap();
        log.clear();
        surface
    }

    fn tag(surface: &Surface<Probe>, w: usize, h: usize) -> usize {
        surface.get_unit(w, h).unwrap().element().unwrap().tag()
    }

    #[test]
    fn construction_follows_axis_table() {
        let surface: Surface<Probe> = Surface::new(3, 2, Axis::X).unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 2));
        // Normal X: width runs along Z, height along Y.
        assert_eq!(surface.get_unit(2, 1).unwrap().coord(), Coord::new(0, 1, 2));
        assert_eq!(surface.get_unit(0, 0).unwrap().dimension(), Dimension::Surface);
        assert_eq!(surface.width_line(0).unwrap().axis(), Axis::Z);
        assert_eq!(surface.height_line(0).unwrap().axis(), Axis::Y);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn create_surface_runs_row_major() {
        let log = EventLog::new();
        let surface = populated(3, 2, Axis::Z, &log);
        assert_eq!(tag(&surface, 0, 0), 0);
        assert_eq!(tag(&surface, 2, 0), 2);
        assert_eq!(tag(&surface, 0, 1), 3);
        assert_eq!(surface.units().count(), 6);
    }

    #[test]
    fn normal_axis_is_rejected() {
        let mut surface: Surface<Probe> = Surface::new(2, 2, Axis::Y).unwrap();
        assert_eq!(
            surface.add_line(Axis::Y),
            Err(GridError::InvalidAxis {
                axis: Axis::Y,
                normal: Axis::Y
            })
        );
        assert!(surface.remove_line(Axis::Y, 0).is_err());
        assert_eq!(surface.unit_count(), 4);
    }

    #[test]
    fn insert_column_shifts_later_columns() {
        let log = EventLog::new();
        let mut surface = populated(3, 2, Axis::Z, &log);
        // A line along Y is a column: width grows.
        surface.insert_line(Axis::Y, 1).unwrap();

        assert_eq!((surface.width(), surface.height()), (4, 2));
        assert_eq!(log.total_shifts(), 4);
        assert_eq!(log.count_shifts(0), 0);
        assert_eq!(log.shifts(1), vec![Coord::new(2, 0, 0)]);
        assert_eq!(log.shifts(5), vec![Coord::new(3, 1, 0)]);
        assert_eq!(tag(&surface, 1, 0), 6);
        assert_eq!(tag(&surface, 1, 1), 7);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn remove_row_shifts_later_rows() {
        let log = EventLog::new();
        let mut surface = populated(2, 3, Axis::Z, &log);
        surface.remove_line(Axis::X, 0).unwrap();

        assert_eq!((surface.width(), surface.height()), (2, 2));
        assert_eq!(log.total_disposed(), 2);
        assert_eq!(log.shifts(2), vec![Coord::new(0, 0, 0)]);
        assert_eq!(log.shifts(5), vec![Coord::new(1, 1, 0)]);
        assert_eq!(tag(&surface, 0, 0), 2);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn remove_last_line_shifts_nothing() {
        let log = EventLog::new();
        let mut surface = populated(3, 3, Axis::Y, &log);
        surface.remove_line(Axis::Z, 2).unwrap();
        assert_eq!(log.total_shifts(), 0);
        assert_eq!(log.total_disposed(), 3);
    }

    #[test]
    fn add_line_reuses_stored_factory() {
        let log = EventLog::new();
        let mut surface = populated(2, 2, Axis::Z, &log);
        surface.add_line(Axis::X).unwrap();
        assert_eq!(surface.height(), 3);
        assert_eq!(tag(&surface, 0, 2), 4);
        assert_eq!(tag(&surface, 1, 2), 5);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn resize_shrinks_then_grows() {
        let log = EventLog::new();
        let mut surface = populated(3, 3, Axis::Z, &log);
        surface.resize_surface(1, 4).unwrap();
        assert_eq!((surface.width(), surface.height()), (1, 4));
        assert_eq!(surface.unit_count(), 4);
        assert_eq!(log.total_disposed(), 6);
        surface.check_invariants().unwrap();

        surface.resize_surface(0, 0).unwrap();
        assert_eq!(surface.unit_count(), 0);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn grow_from_empty() {
        let mut surface: Surface<Probe> = Surface::new(0, 0, Axis::X).unwrap();
        surface.add_line(Axis::Z).unwrap();
        assert_eq!((surface.width(), surface.height()), (0, 1));
        surface.add_line(Axis::Y).unwrap();
        assert_eq!((surface.width(), surface.height()), (1, 1));
        assert_eq!(surface.unit_count(), 1);
        surface.check_invariants().unwrap();
    }

    #[test]
    fn trim_removes_half_open_range() {
        let log = EventLog::new();
        let mut surface = populated(4, 1, Axis::Z, &log);
        surface.trim_surface(Axis::Y, 1..3).unwrap();
        assert_eq!(surface.width(), 2);
        assert_eq!(tag(&surface, 1, 0), 3);
        assert!(surface.trim_surface(Axis::Y, 1..3).is_err());
        surface.check_invariants().unwrap();
    }

    #[test]
    fn remove_surface_collects_in_row_major_order() {
        let log = EventLog::new();
        let mut surface = populated(2, 2, Axis::X, &log);
        let mut salvaged = Vec::new();
        let disposed = surface
            .remove_surface(Some(&mut |p: Probe| salvaged.push(p.tag())))
            .unwrap();
        assert_eq!(disposed, 4);
        assert_eq!(salvaged, vec![0, 1, 2, 3]);
        assert_eq!(surface.dispose_units().unwrap(), 0);
    }

    #[test]
    fn lookup_bounds_are_checked() {
        let surface: Surface<Probe> = Surface::new(2, 3, Axis::Z).unwrap();
        assert!(matches!(
            surface.get_unit(2, 0),
            Err(GridError::OutOfRange { what: "width", .. })
        ));
        assert!(matches!(
            surface.get_unit(0, 3),
            Err(GridError::OutOfRange { what: "height", .. })
        ));
        assert_eq!(
            surface.unit_at(Coord::new(1, 2, 0)).unwrap().coord(),
            Coord::new(1, 2, 0)
        );
    }
}
