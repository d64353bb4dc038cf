//! Strata: an embeddable in-memory hierarchical grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! A [`Volume`](grid::Volume) is made of cross-sections, each a
//! [`Surface`](grid::Surface)-shaped family of lines, each line a run of
//! [`Unit`](grid::Unit)s. Every unit holds at most one caller-supplied
//! element, which is notified when it is created, disposed, or moved by a
//! structural change elsewhere in the grid.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! #[derive(Default)]
//! struct Cell {
//!     at: Option<UnitRef>,
//!     moves: usize,
//! }
//!
//! impl Element for Cell {
//!     fn set_unit(&mut self, unit: UnitRef) {
//!         self.at = Some(unit);
//!     }
//!     fn on_shift(&mut self) {
//!         self.moves += 1;
//!     }
//! }
//!
//! let mut volume: Volume<Cell> = Volume::new(2, 2, 2).unwrap();
//! volume.create_volume(Box::new(Cell::default)).unwrap();
//!
//! // Insert a cross-section at the front: every existing unit moves once.
//! volume.insert_surface(Axis::Z, 0).unwrap();
//! assert_eq!(volume.depth(), 3);
//!
//! let moved = volume.get_unit(0, 0, 1).unwrap().element().unwrap();
//! assert_eq!(moved.moves, 1);
//! assert_eq!(moved.at.unwrap().coord, Coord::new(0, 0, 1));
//! volume.check_invariants().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Axes, coordinates, identifiers, the element trait, errors, config |
//! | [`grid`] | `strata-grid` | Line, Surface and Volume containers and their views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`strata-core`).
///
/// Contains the [`types::Axis`] table and coordinate conversions, the
/// [`types::Element`] capability trait, [`types::GridError`] and
/// [`types::GridConfig`].
pub use strata_core as types;

/// Grid containers (`strata-grid`).
///
/// [`grid::Line`], [`grid::Surface`] and [`grid::Volume`], plus the
/// borrowed [`grid::LineView`] and [`grid::SurfaceView`].
pub use strata_grid as grid;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strata_core::{
        Axis, ContainerId, Coord, Dimension, Element, Factory, Owner, UnitRef,
    };

    // Errors and configuration
    pub use strata_core::{GridConfig, GridError};

    // Containers
    pub use strata_grid::{Line, LineView, Surface, SurfaceView, Unit, Volume};
}
