//! Shared unit and line storage used by every container.
//!
//! A [`Lattice`] is the arena behind a Line, Surface or Volume: it owns
//! the canonical units, the line records that reference them by handle,
//! and the coordinate index. Containers only ever hold [`UnitId`] and
//! [`LineId`] handles into it, so a line reachable through two paths is
//! one record and an update through either path is visible through both.
//!
//! The reindexing primitives here never shift anything on their own.
//! Containers sequence them (detach or insert, then reanchor in strictly
//! increasing index order) so that no two units alias a coordinate key
//! when the mutating call returns.

use crate::slab::Slab;
use crate::unit::Unit;
use indexmap::IndexMap;
use strata_core::{Axis, Coord, Element, Factory, GridConfig, GridError, LineId, Owner, UnitId};

/// Ordered sequence of unit handles along one axis.
#[derive(Clone, Debug)]
pub(crate) struct LineRecord {
    pub(crate) axis: Axis,
    pub(crate) units: Vec<UnitId>,
}

pub(crate) struct Lattice<E> {
    owner: Owner,
    config: GridConfig,
    units: Slab<UnitId, Unit<E>>,
    lines: Slab<LineId, LineRecord>,
    /// Canonical coordinate index. Every live unit has exactly one key.
    cells: IndexMap<Coord, UnitId>,
    factory: Option<Factory<E>>,
}

fn stale_unit(id: UnitId) -> GridError {
    GridError::InvariantViolated {
        reason: format!("stale unit handle {id}"),
    }
}

fn stale_line(id: LineId) -> GridError {
    GridError::InvariantViolated {
        reason: format!("stale line handle {id}"),
    }
}

/// Most units reserved up front; larger containers grow on demand.
pub(crate) const PREALLOC_LIMIT: usize = 1 << 16;

impl<E: Element> Lattice<E> {
    /// `capacity` is a hint, capped at [`PREALLOC_LIMIT`].
    pub(crate) fn new(owner: Owner, config: GridConfig, capacity: usize) -> Self {
        let capacity = capacity.min(PREALLOC_LIMIT);
        Self {
            owner,
            config,
            units: Slab::with_capacity(capacity),
            lines: Slab::new(),
            cells: IndexMap::with_capacity(capacity),
            factory: None,
        }
    }

    pub(crate) fn config(&self) -> &GridConfig {
        &self.config
    }

    pub(crate) fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    // ── Units ───────────────────────────────────────────────────

    /// Build a unit at `coord`, filling it from the stored factory.
    ///
    /// The unit is not yet indexed by coordinate; call
    /// [`register`](Self::register) once the slot it will occupy is free.
    pub(crate) fn spawn(&mut self, coord: Coord) -> Result<UnitId, GridError> {
        let id = self.units.insert(Unit::new(self.owner, coord))?;
        if let (Some(factory), Some(unit)) = (self.factory.as_mut(), self.units.get_mut(id)) {
            unit.create_unit(&mut **factory);
        }
        Ok(id)
    }

    /// Index a spawned unit under its current coordinate.
    pub(crate) fn register(&mut self, id: UnitId) -> Result<(), GridError> {
        let coord = self.unit(id)?.coord();
        if let Some(previous) = self.cells.insert(coord, id) {
            if previous != id {
                return Err(GridError::InvariantViolated {
                    reason: format!("{id} registered over {previous} at {coord}"),
                });
            }
        }
        Ok(())
    }

    /// Dispose the unit's element, drop its coordinate key and free it.
    ///
    /// Returns the disposed element.
    pub(crate) fn retire(&mut self, id: UnitId) -> Result<Option<E>, GridError> {
        let unit = self.units.get_mut(id).ok_or_else(|| stale_unit(id))?;
        let element = unit.dispose_unit();
        let coord = unit.coord();
        if self.cells.get(&coord) == Some(&id) {
            self.cells.swap_remove(&coord);
        }
        self.units.remove(id);
        Ok(element)
    }

    /// Move a unit to `coord`, keeping the coordinate index in step, and
    /// fire its shift hook.
    ///
    /// The old key is dropped only while it still points at `id`; a key
    /// already taken over by a unit moved earlier in the same pass stays.
    fn relocate_in(
        units: &mut Slab<UnitId, Unit<E>>,
        cells: &mut IndexMap<Coord, UnitId>,
        id: UnitId,
        coord: Coord,
    ) -> Result<(), GridError> {
        let unit = units.get_mut(id).ok_or_else(|| stale_unit(id))?;
        let old = unit.coord();
        if old == coord {
            return Ok(());
        }
        if cells.get(&old) == Some(&id) {
            cells.swap_remove(&old);
        }
        unit.move_to(coord);
        cells.insert(coord, id);
        Ok(())
    }

    pub(crate) fn unit(&self, id: UnitId) -> Result<&Unit<E>, GridError> {
        self.units.get(id).ok_or_else(|| stale_unit(id))
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit<E>, GridError> {
        self.units.get_mut(id).ok_or_else(|| stale_unit(id))
    }

    pub(crate) fn lookup(&self, coord: Coord) -> Result<UnitId, GridError> {
        self.cells
            .get(&coord)
            .copied()
            .ok_or(GridError::KeyNotFound { coord })
    }

    // ── Lines ───────────────────────────────────────────────────

    pub(crate) fn new_line(&mut self, axis: Axis, units: Vec<UnitId>) -> Result<LineId, GridError> {
        self.lines.insert(LineRecord { axis, units })
    }

    pub(crate) fn drop_line(&mut self, id: LineId) -> Result<LineRecord, GridError> {
        self.lines.remove(id).ok_or_else(|| stale_line(id))
    }

    pub(crate) fn line(&self, id: LineId) -> Result<&LineRecord, GridError> {
        self.lines.get(id).ok_or_else(|| stale_line(id))
    }

    pub(crate) fn line_len(&self, id: LineId) -> Result<usize, GridError> {
        Ok(self.line(id)?.units.len())
    }

    /// Handle at `index` along a line.
    pub(crate) fn line_member(&self, id: LineId, index: usize) -> Result<UnitId, GridError> {
        let line = self.line(id)?;
        GridError::check_index("unit", index, line.units.len())?;
        Ok(line.units[index])
    }

    /// Splice `unit` into the line's sequence at `index` without moving
    /// anything.
    pub(crate) fn line_insert(
        &mut self,
        id: LineId,
        index: usize,
        unit: UnitId,
    ) -> Result<(), GridError> {
        let line = self.lines.get_mut(id).ok_or_else(|| stale_line(id))?;
        GridError::check_index("unit", index, line.units.len() + 1)?;
        line.units.insert(index, unit);
        Ok(())
    }

    /// Take the handle at `index` out of the line's sequence without
    /// moving anything.
    pub(crate) fn line_detach(&mut self, id: LineId, index: usize) -> Result<UnitId, GridError> {
        let line = self.lines.get_mut(id).ok_or_else(|| stale_line(id))?;
        GridError::check_index("unit", index, line.units.len())?;
        Ok(line.units.remove(index))
    }

    /// Move the member at `index` to its positional coordinate along the
    /// line's axis, firing its shift hook if it moved.
    pub(crate) fn reanchor_member(&mut self, id: LineId, index: usize) -> Result<(), GridError> {
        let Self {
            lines,
            units,
            cells,
            ..
        } = self;
        let line = lines.get(id).ok_or_else(|| stale_line(id))?;
        GridError::check_index("unit", index, line.units.len())?;
        let unit = line.units[index];
        let coord = units
            .get(unit)
            .ok_or_else(|| stale_unit(unit))?
            .coord()
            .with(line.axis, index as i32);
        Self::relocate_in(units, cells, unit, coord)
    }

    /// Reanchor every member from `from` to the end, in increasing index
    /// order.
    pub(crate) fn reanchor(&mut self, id: LineId, from: usize) -> Result<(), GridError> {
        let len = self.line_len(id)?;
        for index in from..len {
            self.reanchor_member(id, index)?;
        }
        Ok(())
    }

    // ── Bulk element lifecycle ──────────────────────────────────

    /// Store `factory` and fill every unit in `order` from it.
    pub(crate) fn create_units(&mut self, order: &[UnitId], factory: Factory<E>) -> Result<(), GridError> {
        let factory = self.factory.insert(factory);
        for &id in order {
            let unit = self.units.get_mut(id).ok_or_else(|| stale_unit(id))?;
            unit.create_unit(&mut **factory);
        }
        Ok(())
    }

    /// Dispose every unit in `order`, handing each disposed element to
    /// `collector` when one is supplied. Drops the stored factory.
    ///
    /// Returns the number of elements disposed.
    pub(crate) fn dispose_units(
        &mut self,
        order: &[UnitId],
        mut collector: Option<&mut dyn FnMut(E)>,
    ) -> Result<usize, GridError> {
        self.factory = None;
        let mut disposed = 0;
        for &id in order {
            let unit = self.units.get_mut(id).ok_or_else(|| stale_unit(id))?;
            if let Some(element) = unit.dispose_unit() {
                disposed += 1;
                if let Some(collect) = collector.as_mut() {
                    collect(element);
                }
            }
        }
        Ok(disposed)
    }

    // ── Audit ───────────────────────────────────────────────────

    /// Every unit is owned by this lattice and indexed under exactly its
    /// own coordinate.
    pub(crate) fn audit_cells(&self) -> Result<(), GridError> {
        if self.cells.len() != self.units.len() {
            return Err(GridError::InvariantViolated {
                reason: format!(
                    "{} coordinate keys for {} units",
                    self.cells.len(),
                    self.units.len()
                ),
            });
        }
        for (id, unit) in self.units.iter() {
            if unit.owner() != self.owner {
                return Err(GridError::InvariantViolated {
                    reason: format!("{id} owned by {} inside {}", unit.owner(), self.owner),
                });
            }
            if self.cells.get(&unit.coord()) != Some(&id) {
                return Err(GridError::InvariantViolated {
                    reason: format!("{id} at {} is not indexed there", unit.coord()),
                });
            }
        }
        Ok(())
    }

    /// Members sit at consecutive positions along the line's axis and
    /// share their cross coordinates.
    pub(crate) fn audit_line(&self, id: LineId) -> Result<(), GridError> {
        let line = self.line(id)?;
        let mut anchor: Option<Coord> = None;
        for (index, &unit) in line.units.iter().enumerate() {
            let coord = self.unit(unit)?.coord();
            if coord.get(line.axis) != index as i32 {
                return Err(GridError::InvariantViolated {
                    reason: format!("{unit} at {coord} is member {index} of {id}"),
                });
            }
            let cross = coord.with(line.axis, 0);
            match anchor {
                None => anchor = Some(cross),
                Some(a) if a != cross => {
                    return Err(GridError::InvariantViolated {
                        reason: format!("{unit} at {coord} leaves the cross section of {id}"),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl<E> std::fmt::Debug for Lattice<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("owner", &self.owner)
            .field("units", &self.units.len())
            .field("lines", &self.lines.len())
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
