//! Three-dimensional container.
//!
//! The volume is the canonical owner of its units. Lines are indexed per
//! axis by their two cross coordinates (see [`Plane`]), and every
//! cross-section is a [`SurfaceRecord`] holding handles to those same
//! lines. A line reachable from the per-axis index and from two surfaces
//! is one record in the lattice, so a unit moved through any of them
//! shifts exactly once.

use crate::lattice::{Lattice, PREALLOC_LIMIT};
use crate::plane::Plane;
use crate::unit::Unit;
use crate::view::{LineView, SurfaceRecord, SurfaceView};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::ops::Range;
use strata_core::axis::convert_to_vector;
use strata_core::{
    Axis, ContainerId, Coord, Element, Factory, GridConfig, GridError, LineId, Owner, UnitId,
};

/// Name of the volume extent along `axis`.
fn extent_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "width",
        Axis::Y => "height",
        Axis::Z => "depth",
    }
}

/// Family of a cross-section normal to `normal` whose lines run along
/// `along`.
fn family_along(record: &mut SurfaceRecord, normal: Axis, along: Axis) -> &mut Vec<LineId> {
    if along == normal.width_axis() {
        &mut record.width_lines
    } else {
        &mut record.height_lines
    }
}

/// A box of units addressed by absolute `(x, y, z)` coordinates.
///
/// Width, height and depth are the extents along X, Y and Z; each is the
/// number of cross-sections with that normal. Whole cross-sections can
/// be inserted or removed along any axis.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Element, UnitRef};
/// use strata_grid::Volume;
///
/// #[derive(Default)]
/// struct Voxel(Option<UnitRef>);
///
/// impl Element for Voxel {
///     fn set_unit(&mut self, unit: UnitRef) {
///         self.0 = Some(unit);
///     }
/// }
///
/// let mut volume: Volume<Voxel> = Volume::new(2, 2, 2).unwrap();
/// volume.create_volume(Box::new(Voxel::default)).unwrap();
/// volume.add_surface(Axis::Z).unwrap();
/// assert_eq!(volume.depth(), 3);
/// assert_eq!(volume.unit_count(), 12);
/// assert!(volume.get_unit(1, 1, 2).unwrap().is_occupied());
/// ```
#[derive(Debug)]
pub struct Volume<E> {
    id: ContainerId,
    lattice: Lattice<E>,
    /// Lines along each axis, indexed by axis.
    planes: [Plane; 3],
    /// Cross-sections per normal, in depth order.
    surfaces: [Vec<SurfaceRecord>; 3],
}

impl<E: Element> Volume<E> {
    /// Create a `width` × `height` × `depth` volume of empty units.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self, GridError> {
        Self::with_config(width, height, depth, GridConfig::default())
    }

    /// Create a volume with an explicit configuration.
    pub fn with_config(
        width: usize,
        height: usize,
        depth: usize,
        config: GridConfig,
    ) -> Result<Self, GridError> {
        let extents = [width, height, depth];
        for axis in Axis::ALL {
            config.check_extent(extent_name(axis), extents[axis.index()])?;
        }
        let id = ContainerId::next();
        let capacity = width.saturating_mul(height).saturating_mul(depth);
        let mut lattice = Lattice::new(Owner::Volume(id), config, capacity);

        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    let unit = lattice.spawn(Coord::new(x as i32, y as i32, z as i32))?;
                    lattice.register(unit)?;
                }
            }
        }
        let planes = [
            Self::build_plane(&mut lattice, Axis::X, extents)?,
            Self::build_plane(&mut lattice, Axis::Y, extents)?,
            Self::build_plane(&mut lattice, Axis::Z, extents)?,
        ];
        let surfaces = Axis::ALL.map(|normal| vec![SurfaceRecord::default(); extents[normal.index()]]);

        let mut volume = Self {
            id,
            lattice,
            planes,
            surfaces,
        };
        volume.rewire()?;
        tracing::debug!(volume = %id, width, height, depth, "volume created");
        Ok(volume)
    }

    fn build_plane(
        lattice: &mut Lattice<E>,
        axis: Axis,
        extents: [usize; 3],
    ) -> Result<Plane, GridError> {
        let (outer, inner) = (axis.width_axis(), axis.height_axis());
        let mut rows = Vec::with_capacity(extents[outer.index()].min(PREALLOC_LIMIT));
        for o in 0..extents[outer.index()] {
            let mut row = Vec::with_capacity(extents[inner.index()].min(PREALLOC_LIMIT));
            for i in 0..extents[inner.index()] {
                let units = (0..extents[axis.index()])
                    .map(|a| {
                        lattice.lookup(
                            Coord::ORIGIN
                                .with(axis, a as i32)
                                .with(outer, o as i32)
                                .with(inner, i as i32),
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                row.push(lattice.new_line(axis, units)?);
            }
            rows.push(row);
        }
        Ok(Plane::new(rows, extents[inner.index()]))
    }

    /// Unique identity of this volume.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Configuration the volume was built with.
    pub fn config(&self) -> &GridConfig {
        self.lattice.config()
    }

    /// Extent along `axis`: the number of cross-sections normal to it.
    pub fn extent(&self, axis: Axis) -> usize {
        self.surfaces[axis.index()].len()
    }

    /// Extent along X.
    pub fn width(&self) -> usize {
        self.extent(Axis::X)
    }

    /// Extent along Y.
    pub fn height(&self) -> usize {
        self.extent(Axis::Y)
    }

    /// Extent along Z.
    pub fn depth(&self) -> usize {
        self.extent(Axis::Z)
    }

    /// Number of units.
    pub fn unit_count(&self) -> usize {
        self.lattice.unit_count()
    }

    // ── Line and surface wiring ─────────────────────────────────

    /// The line along `axis` that passes through `coord`.
    fn line_through(&self, axis: Axis, coord: Coord) -> Result<LineId, GridError> {
        let key = |a: Axis| usize::try_from(coord.get(a)).ok();
        key(axis.width_axis())
            .zip(key(axis.height_axis()))
            .and_then(|(outer, inner)| self.planes[axis.index()].get(outer, inner))
            .ok_or(GridError::KeyNotFound { coord })
    }

    /// Lines along `normal`, row-major over its `(width, height)` frame.
    fn depth_lines(&self, normal: Axis) -> Result<Vec<LineId>, GridError> {
        let (width, height) = (self.extent(normal.width_axis()), self.extent(normal.height_axis()));
        let mut lines = Vec::with_capacity(width * height);
        for h in 0..height {
            for w in 0..width {
                lines.push(self.line_through(normal, convert_to_vector(normal, w as i32, h as i32, 0))?);
            }
        }
        Ok(lines)
    }

    /// Families of the cross-section normal to `normal` at `depth`.
    fn record_for(&self, normal: Axis, depth: usize) -> Result<SurfaceRecord, GridError> {
        let (wa, ha) = (normal.width_axis(), normal.height_axis());
        let d = depth as i32;
        let width_lines = (0..self.extent(ha))
            .map(|h| self.line_through(wa, convert_to_vector(normal, 0, h as i32, d)))
            .collect::<Result<_, _>>()?;
        let height_lines = (0..self.extent(wa))
            .map(|w| self.line_through(ha, convert_to_vector(normal, w as i32, 0, d)))
            .collect::<Result<_, _>>()?;
        Ok(SurfaceRecord {
            width_lines,
            height_lines,
        })
    }

    /// Rebuild every cross-section from the per-axis line index.
    fn rewire(&mut self) -> Result<(), GridError> {
        for normal in Axis::ALL {
            let records = (0..self.extent(normal))
                .map(|depth| self.record_for(normal, depth))
                .collect::<Result<Vec<_>, _>>()?;
            self.surfaces[normal.index()] = records;
        }
        Ok(())
    }

    /// Wire a cross-section just inserted normal to `normal` at `index`.
    ///
    /// Records with the same normal keep their line handles. Every record
    /// normal to one of the other two axes gains the new line crossing it,
    /// at position `index` of the family running along the third axis.
    fn wire_inserted(&mut self, normal: Axis, index: usize) -> Result<(), GridError> {
        self.surfaces[normal.index()][index] = self.record_for(normal, index)?;
        for other in [normal.width_axis(), normal.height_axis()] {
            let along = other.partner(normal);
            for depth in 0..self.extent(other) {
                let coord = Coord::ORIGIN
                    .with(other, depth as i32)
                    .with(normal, index as i32);
                let line = self.line_through(along, coord)?;
                family_along(&mut self.surfaces[other.index()][depth], other, along)
                    .insert(index, line);
            }
        }
        Ok(())
    }

    /// Drop the line at position `index` from every record that crossed
    /// the cross-section removed normal to `normal`.
    fn unwire_removed(&mut self, normal: Axis, index: usize) {
        for other in [normal.width_axis(), normal.height_axis()] {
            let along = other.partner(normal);
            for record in &mut self.surfaces[other.index()] {
                let family = family_along(record, other, along);
                if index < family.len() {
                    family.remove(index);
                }
            }
        }
    }

    // ── Structure ───────────────────────────────────────────────

    /// Append a cross-section normal to `normal`.
    pub fn add_surface(&mut self, normal: Axis) -> Result<(), GridError> {
        self.insert_surface(normal, self.extent(normal))
    }

    /// Insert a cross-section normal to `normal` at depth `index`.
    ///
    /// The new units are created and spliced into the lines along
    /// `normal` first, then the two families of new lines spanning the
    /// cross-section, then the cross-section itself. Every unit at a
    /// larger depth shifts once, depth by depth.
    pub fn insert_surface(&mut self, normal: Axis, index: usize) -> Result<(), GridError> {
        let depth = self.extent(normal);
        GridError::check_index("surface", index, depth + 1)?;
        self.lattice
            .config()
            .check_extent(extent_name(normal), depth + 1)?;

        let (wa, ha) = (normal.width_axis(), normal.height_axis());
        let (width, height) = (self.extent(wa), self.extent(ha));
        let depth_lines = self.depth_lines(normal)?;

        // Row-major over (w, h).
        let mut fresh = Vec::with_capacity(width * height);
        for h in 0..height {
            for w in 0..width {
                let coord = convert_to_vector(normal, w as i32, h as i32, index as i32);
                let unit = self.lattice.spawn(coord)?;
                self.lattice.line_insert(depth_lines[h * width + w], index, unit)?;
                fresh.push(unit);
            }
        }

        for along in [wa, ha] {
            let (length, count) = (self.extent(along), self.extent(along.partner(normal)));
            let mut lines = Vec::with_capacity(count);
            for c in 0..count {
                let units = (0..length)
                    .map(|l| {
                        let (w, h) = if along == wa { (l, c) } else { (c, l) };
                        fresh[h * width + w]
                    })
                    .collect();
                lines.push(self.lattice.new_line(along, units)?);
            }
            let plane = &mut self.planes[along.index()];
            if along.width_axis() == normal {
                plane.insert_outer(index, lines);
            } else {
                plane.insert_inner(index, lines);
            }
        }
        self.surfaces[normal.index()].insert(index, SurfaceRecord::default());

        for d in index + 1..=depth {
            for &line in &depth_lines {
                self.lattice.reanchor_member(line, d)?;
            }
        }
        for unit in fresh {
            self.lattice.register(unit)?;
        }
        self.wire_inserted(normal, index)?;
        tracing::debug!(volume = %self.id, %normal, index, "surface inserted");
        Ok(())
    }

    /// Dispose and remove the cross-section normal to `normal` at depth
    /// `index`; every later cross-section shifts back one step.
    pub fn remove_surface(&mut self, normal: Axis, index: usize) -> Result<(), GridError> {
        let depth = self.extent(normal);
        GridError::check_index("surface", index, depth)?;
        let depth_lines = self.depth_lines(normal)?;

        for &line in &depth_lines {
            let unit = self.lattice.line_detach(line, index)?;
            self.lattice.retire(unit)?;
        }
        for along in [normal.width_axis(), normal.height_axis()] {
            let plane = &mut self.planes[along.index()];
            let removed = if along.width_axis() == normal {
                plane.remove_outer(index)
            } else {
                plane.remove_inner(index)
            };
            for line in removed {
                self.lattice.drop_line(line)?;
            }
        }
        self.surfaces[normal.index()].remove(index);
        self.unwire_removed(normal, index);

        for d in index..depth - 1 {
            for &line in &depth_lines {
                self.lattice.reanchor_member(line, d)?;
            }
        }
        tracing::debug!(volume = %self.id, %normal, index, "surface removed");
        Ok(())
    }

    /// Grow or shrink to `width` × `height` × `depth`.
    ///
    /// All three axes shrink first, last cross-section first, then grow
    /// by appending.
    pub fn resize_volume(&mut self, width: usize, height: usize, depth: usize) -> Result<(), GridError> {
        let targets = [width, height, depth];
        for axis in Axis::ALL {
            self.lattice
                .config()
                .check_extent(extent_name(axis), targets[axis.index()])?;
        }
        for axis in Axis::ALL {
            while self.extent(axis) > targets[axis.index()] {
                self.remove_surface(axis, self.extent(axis) - 1)?;
            }
        }
        for axis in Axis::ALL {
            while self.extent(axis) < targets[axis.index()] {
                self.add_surface(axis)?;
            }
        }
        Ok(())
    }

    /// Remove the cross-sections normal to `normal` whose depths fall in
    /// `range`, back to front.
    pub fn trim_volume(&mut self, normal: Axis, range: Range<usize>) -> Result<(), GridError> {
        GridError::check_range("surface", &range, self.extent(normal))?;
        for index in range.rev() {
            self.remove_surface(normal, index)?;
        }
        Ok(())
    }

    // ── Element lifecycle ───────────────────────────────────────

    /// Store `factory` and fill every unit from it, in canonical order
    /// (z outer, then y, then x).
    pub fn create_volume(&mut self, factory: Factory<E>) -> Result<(), GridError> {
        let order = self.canonical_order()?;
        self.lattice.create_units(&order, factory)?;
        tracing::debug!(volume = %self.id, count = order.len(), "volume populated");
        Ok(())
    }

    /// Dispose every element in canonical order, handing each to
    /// `collector` when one is supplied. The stored factory is dropped.
    ///
    /// Returns the number of elements disposed.
    pub fn remove_volume(
        &mut self,
        collector: Option<&mut dyn FnMut(E)>,
    ) -> Result<usize, GridError> {
        let order = self.canonical_order()?;
        let disposed = self.lattice.dispose_units(&order, collector)?;
        tracing::debug!(volume = %self.id, disposed, "volume cleared");
        Ok(disposed)
    }

    /// Dispose every element without salvaging them.
    pub fn dispose_units(&mut self) -> Result<usize, GridError> {
        self.remove_volume(None)
    }

    fn canonical_order(&self) -> Result<Vec<UnitId>, GridError> {
        let mut order = Vec::with_capacity(self.lattice.unit_count());
        // X-lines are keyed (z, y), so walking them outer-major is z-major.
        for (_, _, line) in self.planes[Axis::X.index()].iter() {
            order.extend_from_slice(&self.lattice.line(line)?.units);
        }
        Ok(order)
    }

    // ── Lookup ──────────────────────────────────────────────────

    fn locate(&self, x: usize, y: usize, z: usize) -> Result<UnitId, GridError> {
        GridError::check_index("width", x, self.width())?;
        GridError::check_index("height", y, self.height())?;
        GridError::check_index("depth", z, self.depth())?;
        self.lattice
            .lookup(Coord::new(x as i32, y as i32, z as i32))
    }

    /// The unit at `(x, y, z)`.
    pub fn get_unit(&self, x: usize, y: usize, z: usize) -> Result<&Unit<E>, GridError> {
        self.lattice.unit(self.locate(x, y, z)?)
    }

    /// Mutable access to the unit at `(x, y, z)`.
    pub fn get_unit_mut(&mut self, x: usize, y: usize, z: usize) -> Result<&mut Unit<E>, GridError> {
        let id = self.locate(x, y, z)?;
        self.lattice.unit_mut(id)
    }

    /// The unit at absolute coordinate `coord`.
    pub fn unit_at(&self, coord: Coord) -> Result<&Unit<E>, GridError> {
        self.lattice.unit(self.lattice.lookup(coord)?)
    }

    /// Units in canonical order: z outer, then y, then x.
    pub fn units(&self) -> impl Iterator<Item = &Unit<E>> + '_ {
        let lattice = &self.lattice;
        self.planes[Axis::X.index()]
            .iter()
            .filter_map(move |(_, _, line)| lattice.line(line).ok())
            .flat_map(|record| record.units.iter())
            .filter_map(move |&id| lattice.unit(id).ok())
    }

    /// The line along `axis` at cross coordinates `(a, b)`, where `a` is
    /// the coordinate along `axis.width_axis()` and `b` the coordinate
    /// along `axis.height_axis()`.
    pub fn line(&self, axis: Axis, a: usize, b: usize) -> Result<LineView<'_, E>, GridError> {
        let (outer, inner) = (axis.width_axis(), axis.height_axis());
        GridError::check_index(extent_name(outer), a, self.extent(outer))?;
        GridError::check_index(extent_name(inner), b, self.extent(inner))?;
        let coord = Coord::ORIGIN.with(outer, a as i32).with(inner, b as i32);
        LineView::new(&self.lattice, self.line_through(axis, coord)?)
    }

    /// The cross-section normal to `normal` at `depth`.
    pub fn surface(&self, normal: Axis, depth: usize) -> Result<SurfaceView<'_, E>, GridError> {
        GridError::check_index("surface", depth, self.extent(normal))?;
        let record = &self.surfaces[normal.index()][depth];
        Ok(SurfaceView::new(&self.lattice, record, normal, depth))
    }

    /// Verify the coordinate index, the per-axis line index, one line
    /// membership per axis for every unit, and that every cross-section
    /// references the volume's own lines.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        self.lattice.audit_cells()?;
        let violated = |reason: String| Err(GridError::InvariantViolated { reason });
        let extents = Axis::ALL.map(|axis| self.extent(axis));
        let expected: usize = extents.iter().product();
        if self.lattice.unit_count() != expected {
            return violated(format!(
                "{} units in a {}x{}x{} volume",
                self.lattice.unit_count(),
                extents[0],
                extents[1],
                extents[2]
            ));
        }

        let mut membership: IndexMap<UnitId, SmallVec<[Axis; 3]>> =
            IndexMap::with_capacity(expected);
        let mut line_total = 0;
        for axis in Axis::ALL {
            let plane = &self.planes[axis.index()];
            let (outer, inner) = (axis.width_axis(), axis.height_axis());
            if plane.outer_len() != extents[outer.index()] || plane.inner_len() != extents[inner.index()] {
                return violated(format!(
                    "lines along {axis} indexed {}x{}",
                    plane.outer_len(),
                    plane.inner_len()
                ));
            }
            line_total += plane.len();
            for (o, i, line) in plane.iter() {
                let record = self.lattice.line(line)?;
                if record.axis != axis || record.units.len() != extents[axis.index()] {
                    return violated(format!("{line} does not span the volume along {axis}"));
                }
                self.lattice.audit_line(line)?;
                if let Some(&first) = record.units.first() {
                    let coord = self.lattice.unit(first)?.coord();
                    if coord.get(outer) != o as i32 || coord.get(inner) != i as i32 {
                        return violated(format!("{line} at {coord} is indexed under ({o}, {i})"));
                    }
                }
                for &unit in &record.units {
                    membership.entry(unit).or_default().push(axis);
                }
            }
        }
        if self.lattice.line_count() != line_total {
            return violated(format!(
                "{} lines stored, {line_total} indexed",
                self.lattice.line_count()
            ));
        }
        for (unit, axes) in &membership {
            if axes.as_slice() != Axis::ALL {
                return violated(format!("{unit} is a member of lines along {axes:?}"));
            }
        }
        if membership.len() != expected {
            return violated(format!("{} of {expected} units are in lines", membership.len()));
        }

        for normal in Axis::ALL {
            for (depth, record) in self.surfaces[normal.index()].iter().enumerate() {
                if *record != self.record_for(normal, depth)? {
                    return violated(format!("surface {normal}@{depth} is out of step with its lines"));
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

    fn populated(w: usize, h: usize, d: usize, log: &EventLog) -> Volume<Probe> {
        let mut volume = Volume::new(w, h, d).unwrap();
        volume.create_volume(ProbeFactory::new(log).boxed()).unwrap();
        log.clear();
        volume
    }

    fn tag(volume: &Volume<Probe>, x: usize, y: usize, z: usize) -> usize {
        volume.get_unit(x, y, z).unwrap().element().unwrap().tag()
    }

    #[test]
    fn extents_and_count() {
        let volume: Volume<Probe> = Volume::new(2, 3, 4).unwrap();
        assert_eq!((volume.width(), volume.height(), volume.depth()), (2, 3, 4));
        assert_eq!(volume.unit_count(), 24);
        assert_eq!(volume.get_unit(1, 2, 3).unwrap().dimension(), Dimension::Volume);
        volume.check_invariants().unwrap();
    }

    #[test]
    fn create_volume_is_z_major() {
        let log = EventLog::new();
        let volume = populated(2, 2, 2, &log);
        assert_eq!(tag(&volume, 0, 0, 0), 0);
        assert_eq!(tag(&volume, 1, 0, 0), 1);
        assert_eq!(tag(&volume, 0, 1, 0), 2);
        assert_eq!(tag(&volume, 0, 0, 1), 4);
    }

    #[test]
    fn insert_surface_creates_then_shifts() {
        let log = EventLog::new();
        let mut volume = populated(2, 2, 2, &log);
        volume.insert_surface(Axis::Y, 0).unwrap();

        assert_eq!(volume.height(), 3);
        assert_eq!(volume.unit_count(), 12);
        assert_eq!(log.total_shifts(), 8);
        // Probe 0 started at the origin.
        assert_eq!(log.shifts(0), vec![Coord::new(0, 1, 0)]);
        assert_eq!(log.shifts(2), vec![Coord::new(0, 2, 0)]);
        let events = log.events();
        assert!(events[..4]
            .iter()
            .all(|e| matches!(e, strata_test_utils::Event::Created { .. })));
        volume.check_invariants().unwrap();
    }

    #[test]
    fn remove_surface_shifts_later_depths() {
        let log = EventLog::new();
        let mut volume = populated(3, 3, 3, &log);
        volume.remove_surface(Axis::X, 1).unwrap();

        assert_eq!(volume.width(), 2);
        assert_eq!(log.total_disposed(), 9);
        assert_eq!(log.total_shifts(), 9);
        assert_eq!(log.count_shifts(0), 0);
        assert_eq!(log.shifts(2), vec![Coord::new(1, 0, 0)]);
        assert_eq!(tag(&volume, 1, 0, 0), 2);
        volume.check_invariants().unwrap();
    }

    #[test]
    fn surface_views_share_volume_lines() {
        let volume: Volume<Probe> = Volume::new(2, 3, 4).unwrap();
        let section = volume.surface(Axis::Z, 1).unwrap();
        // Normal Z: width X, height Y.
        assert_eq!((section.width(), section.height()), (2, 3));
        let row = section.width_line(2).unwrap();
        let direct = volume.line(Axis::X, 1, 2).unwrap();
        assert_eq!(row.id(), direct.id());
        assert_eq!(section.get_unit(1, 2).unwrap().coord(), Coord::new(1, 2, 1));

        // The same X-line is the width-line of the matching Y cross-section.
        let other = volume.surface(Axis::Y, 2).unwrap();
        assert_eq!(other.height_line_ids().len(), 2);
        assert_eq!(other.width_line(1).unwrap().id(), direct.id());
    }

    #[test]
    fn bad_indices_are_rejected() {
        let mut volume: Volume<Probe> = Volume::new(2, 2, 2).unwrap();
        assert!(volume.remove_surface(Axis::Z, 2).is_err());
        assert!(volume.insert_surface(Axis::Z, 3).is_err());
        assert!(volume.get_unit(0, 2, 0).is_err());
        assert!(volume.surface(Axis::X, 2).is_err());
        assert!(volume.line(Axis::Y, 2, 0).is_err());
        assert!(matches!(
            volume.unit_at(Coord::new(-1, 0, 0)),
            Err(GridError::KeyNotFound { .. })
        ));
        volume.check_invariants().unwrap();
    }

    #[test]
    fn resize_and_trim() {
        let log = EventLog::new();
        let mut volume = populated(3, 2, 2, &log);
        volume.resize_volume(1, 3, 2).unwrap();
        assert_eq!((volume.width(), volume.height(), volume.depth()), (1, 3, 2));
        assert_eq!(volume.unit_count(), 6);
        volume.check_invariants().unwrap();

        volume.trim_volume(Axis::Y, 0..2).unwrap();
        assert_eq!(volume.height(), 1);
        assert_eq!(volume.unit_count(), 2);
        volume.check_invariants().unwrap();
    }

    #[test]
    fn empty_extent_round_trip() {
        let mut volume: Volume<Probe> = Volume::new(0, 2, 2).unwrap();
        assert_eq!(volume.unit_count(), 0);
        volume.check_invariants().unwrap();
        volume.add_surface(Axis::X).unwrap();
        assert_eq!(volume.unit_count(), 4);
        volume.check_invariants().unwrap();
        volume.remove_surface(Axis::X, 0).unwrap();
        assert_eq!(volume.unit_count(), 0);
        volume.check_invariants().unwrap();
    }

    #[test]
    fn extent_limit_is_enforced() {
        let mut volume: Volume<Probe> =
            Volume::with_config(2, 2, 2, GridConfig::with_max_extent(2)).unwrap();
        assert!(matches!(
            volume.add_surface(Axis::Y),
            Err(GridError::ExtentTooLarge { name: "height", .. })
        ));
        assert_eq!(volume.unit_count(), 8);
    }

    #[test]
    fn remove_volume_clears_factory() {
        let log = EventLog::new();
        let mut volume = populated(2, 1, 1, &log);
        assert_eq!(volume.dispose_units().unwrap(), 2);
        volume.add_surface(Axis::Z).unwrap();
        assert!(volume.units().all(|u| !u.is_occupied()));
    }

    fn assert_records_match_index(volume: &Volume<Probe>) {
        for normal in Axis::ALL {
            let rebuilt: Vec<SurfaceRecord> = (0..volume.extent(normal))
                .map(|depth| volume.record_for(normal, depth).unwrap())
                .collect();
            assert_eq!(volume.surfaces[normal.index()], rebuilt, "normal {normal}");
        }
    }

    #[test]
    fn patched_records_match_full_rebuild() {
        let log = EventLog::new();
        for normal in Axis::ALL {
            for index in 0..=3 {
                let mut volume = populated(3, 2, 3, &log);
                if index <= volume.extent(normal) {
                    volume.insert_surface(normal, index).unwrap();
                    assert_records_match_index(&volume);
                }
                if index < volume.extent(normal) {
                    volume.remove_surface(normal, index).unwrap();
                    assert_records_match_index(&volume);
                }
                volume.check_invariants().unwrap();
            }
        }
    }

    #[test]
    fn patched_records_survive_zero_extents() {
        let mut volume: Volume<Probe> = Volume::new(0, 2, 0).unwrap();
        volume.add_surface(Axis::X).unwrap();
        assert_records_match_index(&volume);
        volume.add_surface(Axis::Z).unwrap();
        assert_records_match_index(&volume);
        assert_eq!(volume.unit_count(), 2);
        volume.remove_surface(Axis::X, 0).unwrap();
        assert_records_match_index(&volume);
        assert_eq!(volume.unit_count(), 0);
        volume.check_invariants().unwrap();
    }
}
