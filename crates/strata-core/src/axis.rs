//! Axes and the coordinate-system tables.
//!
//! Every Surface is oriented by a *normal* axis. The two remaining axes
//! play fixed **width** and **height** roles chosen by a cyclic table:
//!
//! | normal | width | height |
//! |--------|-------|--------|
//! | X      | Z     | Y      |
//! | Y      | X     | Z      |
//! | Z      | X     | Y      |
//!
//! All functions in this module are pure and total. The conversions
//! between a normal-relative `(width, height, depth)` frame and absolute
//! `(x, y, z)` coordinates are mutual inverses; every container relies
//! on that when it computes where a unit lives.

use crate::coord::Coord;
use std::fmt;

/// One of the three grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The first axis.
    X,
    /// The second axis.
    Y,
    /// The third axis.
    Z,
}

const WIDTH: [Axis; 3] = [Axis::Z, Axis::X, Axis::X];
const HEIGHT: [Axis; 3] = [Axis::Y, Axis::Z, Axis::Y];

impl Axis {
    /// All three axes in declaration order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Dense index of this axis: X = 0, Y = 1, Z = 2.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The width axis of a surface whose normal is `self`.
    pub const fn width_axis(self) -> Axis {
        WIDTH[self.index()]
    }

    /// The height axis of a surface whose normal is `self`.
    pub const fn height_axis(self) -> Axis {
        HEIGHT[self.index()]
    }

    /// Unit basis vector along this axis.
    pub fn unit_vector(self) -> Coord {
        self.to_coords(1)
    }

    /// The basis vector scaled by `index`.
    ///
    /// This is where the `index`-th unit of a standalone line along
    /// this axis lives.
    pub fn to_coords(self, index: i32) -> Coord {
        Coord::ORIGIN.with(self, index)
    }

    /// Whether `self` lies in the plane of a surface with normal `normal`.
    pub fn is_in_plane(self, normal: Axis) -> bool {
        self != normal
    }

    /// The in-plane axis of `normal` that is not `self`.
    ///
    /// When `self` is the normal itself there is no unique partner and
    /// the width axis is returned, which keeps the function total.
    pub fn partner(self, normal: Axis) -> Axis {
        if self == normal.width_axis() {
            normal.height_axis()
        } else {
            normal.width_axis()
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// The width axis for `normal`.
pub fn width_axis(normal: Axis) -> Axis {
    normal.width_axis()
}

/// The height axis for `normal`.
pub fn height_axis(normal: Axis) -> Axis {
    normal.height_axis()
}

fn pick<T: Copy>(axis: Axis, x: T, y: T, z: T) -> T {
    match axis {
        Axis::X => x,
        Axis::Y => y,
        Axis::Z => z,
    }
}

/// Project absolute extents `(x, y, z)` onto the width role of `normal`.
pub fn get_width<T: Copy>(normal: Axis, x: T, y: T, z: T) -> T {
    pick(normal.width_axis(), x, y, z)
}

/// Project absolute extents `(x, y, z)` onto the height role of `normal`.
pub fn get_height<T: Copy>(normal: Axis, x: T, y: T, z: T) -> T {
    pick(normal.height_axis(), x, y, z)
}

/// Project absolute extents `(x, y, z)` onto the depth role of `normal`.
pub fn get_depth<T: Copy>(normal: Axis, x: T, y: T, z: T) -> T {
    pick(normal, x, y, z)
}

/// Map a normal-relative `(width, height, depth)` triple to absolute
/// coordinates.
pub fn convert_to_vector(normal: Axis, width: i32, height: i32, depth: i32) -> Coord {
    Coord::ORIGIN
        .with(normal.width_axis(), width)
        .with(normal.height_axis(), height)
        .with(normal, depth)
}

/// Map a position on a line inside a surface to absolute coordinates.
///
/// `length` is placed on `axis`, `other` on the remaining in-plane axis
/// of `normal` (see [`Axis::partner`]) and the depth is zero.
pub fn line_to_vector(axis: Axis, normal: Axis, length: i32, other: i32) -> Coord {
    let placed = if axis == normal { normal.width_axis() } else { axis };
    Coord::ORIGIN
        .with(placed, length)
        .with(placed.partner(normal), other)
}

/// Inverse of [`convert_to_vector`]: split an absolute coordinate into
/// its `(width, height, depth)` roles relative to `normal`.
pub fn to_frame(normal: Axis, coord: Coord) -> (i32, i32, i32) {
    (
        coord.get(normal.width_axis()),
        coord.get(normal.height_axis()),
        coord.get(normal),
    )
}
