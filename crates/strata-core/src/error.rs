//! Error types for grid construction, lookup and structural mutation.
//!
//! Every fallible operation validates its arguments before touching any
//! state, so an `Err` always means nothing changed.

use crate::axis::Axis;
use crate::coord::Coord;
use std::error::Error;
use std::fmt;
use std::ops::Range;

/// Errors arising from grid operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An index is outside the valid bound for the target axis or length.
    OutOfRange {
        /// What was being indexed (e.g. `"unit"`, `"surface"`).
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Exclusive upper bound of valid indices.
        bound: usize,
    },
    /// A coordinate lookup missed.
    ///
    /// Signals a broken internal invariant; unreachable through the
    /// public API when the structure is used correctly.
    KeyNotFound {
        /// The coordinate that was not found.
        coord: Coord,
    },
    /// An element handed in through a weakly-typed entry point is not the
    /// container's element type.
    CapabilityMismatch {
        /// Name of the element type the container expected.
        expected: &'static str,
    },
    /// An axis argument does not lie in the plane of the surface.
    InvalidAxis {
        /// The axis that was passed.
        axis: Axis,
        /// Normal of the surface.
        normal: Axis,
    },
    /// An extent would exceed the configured maximum.
    ExtentTooLarge {
        /// Which extent.
        name: &'static str,
        /// The requested extent.
        value: usize,
        /// The configured maximum.
        max: u32,
    },
    /// A structural audit found an inconsistency.
    InvariantViolated {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { what, index, bound } => {
                write!(f, "{what} index {index} out of range [0, {bound})")
            }
            Self::KeyNotFound { coord } => {
                write!(f, "no unit at coordinate {coord}")
            }
            Self::CapabilityMismatch { expected } => {
                write!(f, "element is not of the container's type `{expected}`")
            }
            Self::InvalidAxis { axis, normal } => {
                write!(f, "axis {axis} is not in the plane of a surface with normal {normal}")
            }
            Self::ExtentTooLarge { name, value, max } => {
                write!(f, "{name} extent {value} exceeds maximum {max}")
            }
            Self::InvariantViolated { reason } => {
                write!(f, "invariant violated: {reason}")
            }
        }
    }
}

impl Error for GridError {}

impl GridError {
    /// Check `index < bound`, producing [`GridError::OutOfRange`] otherwise.
    pub fn check_index(what: &'static str, index: usize, bound: usize) -> Result<(), GridError> {
        if index < bound {
            Ok(())
        } else {
            Err(Self::OutOfRange { what, index, bound })
        }
    }

    /// Check that `range` is ordered and ends at or before `bound`.
    pub fn check_range(
        what: &'static str,
        range: &Range<usize>,
        bound: usize,
    ) -> Result<(), GridError> {
        Self::check_index(what, range.end, bound + 1)?;
        Self::check_index(what, range.start, range.end + 1)
    }
}
