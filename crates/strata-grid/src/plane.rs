//! Two-key index of the lines running along one axis of a volume.
//!
//! Lines along axis `A` are keyed by their two cross coordinates: the
//! outer key is the coordinate along `A.width_axis()`, the inner key the
//! coordinate along `A.height_axis()`.

use strata_core::LineId;

#[derive(Clone, Debug, Default)]
pub(crate) struct Plane {
    rows: Vec<Vec<LineId>>,
    /// Row length, kept explicitly so it survives an empty outer extent.
    inner: usize,
}

impl Plane {
    pub(crate) fn new(rows: Vec<Vec<LineId>>, inner: usize) -> Self {
        Self { rows, inner }
    }

    pub(crate) fn outer_len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn inner_len(&self) -> usize {
        self.inner
    }

    /// Total number of lines.
    pub(crate) fn len(&self) -> usize {
        self.rows.len() * self.inner
    }

    pub(crate) fn get(&self, outer: usize, inner: usize) -> Option<LineId> {
        self.rows.get(outer)?.get(inner).copied()
    }

    /// Splice a full row in at outer position `index`.
    pub(crate) fn insert_outer(&mut self, index: usize, row: Vec<LineId>) {
        debug_assert_eq!(row.len(), self.inner);
        self.rows.insert(index, row);
    }

    /// Splice one line into every row at inner position `index`.
    /// `column[o]` goes into row `o`.
    pub(crate) fn insert_inner(&mut self, index: usize, column: Vec<LineId>) {
        debug_assert_eq!(column.len(), self.rows.len());
        for (row, line) in self.rows.iter_mut().zip(column) {
            row.insert(index, line);
        }
        self.inner += 1;
    }

    pub(crate) fn remove_outer(&mut self, index: usize) -> Vec<LineId> {
        self.rows.remove(index)
    }

    pub(crate) fn remove_inner(&mut self, index: usize) -> Vec<LineId> {
        self.inner -= 1;
        self.rows.iter_mut().map(|row| row.remove(index)).collect()
    }

    /// Every line with its `(outer, inner)` key, outer-major.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, usize, LineId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(o, row)| {
            row.iter().enumerate().map(move |(i, &line)| (o, i, line))
        })
    }
}
