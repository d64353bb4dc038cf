//! Strongly-typed identifiers and slab handles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ContainerId`] allocation.
static CONTAINER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a Line, Surface or Volume.
///
/// Allocated from a monotonic atomic counter via [`ContainerId::next`].
/// Two distinct containers always have different IDs, even if they have
/// identical extents. A unit's back-reference names its container by
/// this ID instead of holding a pointer to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Allocate a fresh, unique container ID.
    pub fn next() -> Self {
        Self(CONTAINER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generation-scoped slot handle.
///
/// The `generation` allows O(1) staleness checks: once a slot is freed
/// and reused, handles minted for the previous occupant no longer
/// resolve.
pub trait Handle: Copy + Eq + fmt::Debug {
    /// Mint a handle for `index` at `generation`.
    fn new(index: u32, generation: u32) -> Self;

    /// Slot index inside the owning slab.
    fn index(&self) -> u32;

    /// Generation of the slot when this handle was minted.
    fn generation(&self) -> u32;
}

macro_rules! slab_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[must_use]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl Handle for $name {
            fn new(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }

            fn index(&self) -> u32 {
                self.index
            }

            fn generation(&self) -> u32 {
                self.generation
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({}@{})"), self.index, self.generation)
            }
        }
    };
}

slab_handle!(
    /// Handle to a unit in a container's unit slab.
    UnitId,
    "Unit"
);

slab_handle!(
    /// Handle to a line record in a container's line slab.
    ///
    /// A Volume and every Surface crossing a line hold the same
    /// `LineId`, so membership changes are visible from both paths.
    LineId,
    "Line"
);
