//! The absolute integer coordinate triple.

use crate::axis::Axis;
use std::fmt;

/// An absolute position inside a container's canonical space.
///
/// For a Volume this is the unit's `(x, y, z)` position. Standalone
/// Lines and Surfaces use the same triple with the unused components
/// left at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Position along [`Axis::X`].
    pub x: i32,
    /// Position along [`Axis::Y`].
    pub y: i32,
    /// Position along [`Axis::Z`].
    pub z: i32,
}

impl Coord {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0, z: 0 };

    /// Build a coordinate from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The component along `axis`.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// A copy of `self` with the component along `axis` replaced.
    #[must_use]
    pub fn with(self, axis: Axis, value: i32) -> Self {
        let mut out = self;
        match axis {
            Axis::X => out.x = value,
            Axis::Y => out.y = value,
            Axis::Z => out.z = value,
        }
        out
    }

    /// A copy of `self` moved by `delta` along `axis`.
    #[must_use]
    pub fn offset(self, axis: Axis, delta: i32) -> Self {
        self.with(axis, self.get(axis) + delta)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<Coord> for (i32, i32, i32) {
    fn from(c: Coord) -> Self {
        (c.x, c.y, c.z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
