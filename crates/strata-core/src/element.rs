//! The element capability contract and unit back-references.

use crate::coord::Coord;
use crate::id::ContainerId;
use std::fmt;

/// Dimension tag of a unit, fixed at construction.
///
/// The discriminant is the rank of the owning container: 0 for a
/// detached unit, 1/2/3 for a Line/Surface/Volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Not owned by any container.
    Detached = 0,
    /// Owned by a standalone Line.
    Line = 1,
    /// Owned by a standalone Surface.
    Surface = 2,
    /// Owned by a Volume.
    Volume = 3,
}

impl Dimension {
    /// Numeric rank of the tag.
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

/// The single owning container of a unit.
///
/// The variant always agrees with the unit's [`Dimension`], so the two
/// can never drift apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// No owning container.
    Detached,
    /// A standalone Line.
    Line(ContainerId),
    /// A standalone Surface.
    Surface(ContainerId),
    /// A Volume.
    Volume(ContainerId),
}

impl Owner {
    /// Dimension tag matching this owner.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Detached => Dimension::Detached,
            Self::Line(_) => Dimension::Line,
            Self::Surface(_) => Dimension::Surface,
            Self::Volume(_) => Dimension::Volume,
        }
    }

    /// The owning container, if any.
    pub fn container(&self) -> Option<ContainerId> {
        match self {
            Self::Detached => None,
            Self::Line(id) | Self::Surface(id) | Self::Volume(id) => Some(*id),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "detached"),
            Self::Line(id) => write!(f, "line {id}"),
            Self::Surface(id) => write!(f, "surface {id}"),
            Self::Volume(id) => write!(f, "volume {id}"),
        }
    }
}

/// Back-reference from an element to the unit holding it.
///
/// Resolved by lookup (container identity plus coordinate) rather than
/// by pointer. The container is always the sole owner of its units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnitRef {
    /// Container that owns the unit.
    pub owner: Owner,
    /// The unit's absolute coordinate at the time of binding.
    pub coord: Coord,
}

impl UnitRef {
    /// Dimension tag of the referenced unit.
    pub fn dimension(&self) -> Dimension {
        self.owner.dimension()
    }
}

/// Capability contract for payloads placed in units.
///
/// Hooks are invoked synchronously by the container:
///
/// - [`on_create`](Element::on_create) right after the element is bound
///   to a unit.
/// - [`on_dispose`](Element::on_dispose) before the element leaves its
///   unit, either through disposal or removal of the unit.
/// - [`on_shift`](Element::on_shift) when a structural mutation elsewhere
///   moved the unit. The back-reference already carries the new
///   coordinate when this fires.
///
/// Structural mutation of the container from inside a hook is not
/// supported.
pub trait Element {
    /// Store the back-reference to the unit now holding this element.
    fn set_unit(&mut self, unit: UnitRef);

    /// Called once after the element is bound to its unit.
    fn on_create(&mut self) {}

    /// Called once before the element is removed from its unit.
    fn on_dispose(&mut self) {}

    /// Called each time the unit's coordinate changes.
    fn on_shift(&mut self) {}
}

/// Zero-argument element constructor, stored once per container and
/// reused for every unit it creates afterwards.
pub type Factory<E> = Box<dyn FnMut() -> E>;
