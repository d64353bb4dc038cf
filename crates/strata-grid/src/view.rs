//! Borrowed read-only views of lines and surfaces.
//!
//! Views resolve handles against the owning container's lattice at the
//! moment they are built; holding one borrows the container, so the
//! structure cannot change underneath it.

use crate::lattice::{Lattice, LineRecord};
use crate::unit::Unit;
use strata_core::axis::convert_to_vector;
use strata_core::{Axis, Element, GridError, LineId, UnitId};

/// Read-only view of one line.
#[derive(Debug)]
pub struct LineView<'a, E> {
    lattice: &'a Lattice<E>,
    record: &'a LineRecord,
    id: LineId,
}

impl<'a, E: Element> LineView<'a, E> {
    pub(crate) fn new(lattice: &'a Lattice<E>, id: LineId) -> Result<Self, GridError> {
        Ok(Self {
            lattice,
            record: lattice.line(id)?,
            id,
        })
    }

    /// Handle of the underlying line record.
    ///
    /// Two views with the same handle are views of the same line.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Axis the line runs along.
    pub fn axis(&self) -> Axis {
        self.record.axis
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.record.units.len()
    }

    /// Whether the line holds no units.
    pub fn is_empty(&self) -> bool {
        self.record.units.is_empty()
    }

    /// Unit handles in index order.
    pub fn unit_ids(&self) -> &'a [UnitId] {
        let record = self.record;
        &record.units
    }

    /// The unit at `index`.
    pub fn get(&self, index: usize) -> Result<&'a Unit<E>, GridError> {
        GridError::check_index("unit", index, self.len())?;
        self.lattice.unit(self.record.units[index])
    }

    /// Units in index order.
    pub fn units(&self) -> impl Iterator<Item = &'a Unit<E>> + 'a {
        let (lattice, record) = (self.lattice, self.record);
        record
            .units
            .iter()
            .filter_map(move |&id| lattice.unit(id).ok())
    }
}

/// The two line families of a surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SurfaceRecord {
    /// Lines along the width axis, one per height index.
    pub(crate) width_lines: Vec<LineId>,
    /// Lines along the height axis, one per width index.
    pub(crate) height_lines: Vec<LineId>,
}

/// Read-only view of a surface: a standalone [`Surface`](crate::Surface)
/// or one cross-section of a [`Volume`](crate::Volume).
#[derive(Debug)]
pub struct SurfaceView<'a, E> {
    lattice: &'a Lattice<E>,
    record: &'a SurfaceRecord,
    normal: Axis,
    depth: usize,
}

impl<'a, E: Element> SurfaceView<'a, E> {
    pub(crate) fn new(
        lattice: &'a Lattice<E>,
        record: &'a SurfaceRecord,
        normal: Axis,
        depth: usize,
    ) -> Self {
        Self {
            lattice,
            record,
            normal,
            depth,
        }
    }

    /// Axis the surface is orthogonal to.
    pub fn normal(&self) -> Axis {
        self.normal
    }

    /// Position along the normal (zero for a standalone surface).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Extent along the width axis: the number of height-lines.
    pub fn width(&self) -> usize {
        self.record.height_lines.len()
    }

    /// Extent along the height axis: the number of width-lines.
    pub fn height(&self) -> usize {
        self.record.width_lines.len()
    }

    /// Handles of the width-lines, in height order.
    pub fn width_line_ids(&self) -> &'a [LineId] {
        let record = self.record;
        &record.width_lines
    }

    /// Handles of the height-lines, in width order.
    pub fn height_line_ids(&self) -> &'a [LineId] {
        let record = self.record;
        &record.height_lines
    }

    /// The width-line at height index `h`.
    pub fn width_line(&self, h: usize) -> Result<LineView<'a, E>, GridError> {
        GridError::check_index("width-line", h, self.height())?;
        LineView::new(self.lattice, self.record.width_lines[h])
    }

    /// The height-line at width index `w`.
    pub fn height_line(&self, w: usize) -> Result<LineView<'a, E>, GridError> {
        GridError::check_index("height-line", w, self.width())?;
        LineView::new(self.lattice, self.record.height_lines[w])
    }

    /// The unit at `(w, h)`, looked up by coordinate.
    pub fn get_unit(&self, w: usize, h: usize) -> Result<&'a Unit<E>, GridError> {
        GridError::check_index("width", w, self.width())?;
        GridError::check_index("height", h, self.height())?;
        let coord = convert_to_vector(self.normal, w as i32, h as i32, self.depth as i32);
        self.lattice.unit(self.lattice.lookup(coord)?)
    }

    /// Units in row-major order: height outer, width inner.
    pub fn units(&self) -> impl Iterator<Item = &'a Unit<E>> + 'a {
        let (lattice, record) = (self.lattice, self.record);
        record
            .width_lines
            .iter()
            .filter_map(move |&line| lattice.line(line).ok())
            .flat_map(|record| record.units.iter())
            .filter_map(move |&id| lattice.unit(id).ok())
    }
}
