//! Line, Surface and Volume containers for Strata.
//!
//! Every container keeps its units in a private arena and refers to them
//! by generational handle. Lines are handle sequences in the same arena,
//! so a line shared between a volume's per-axis index and the surfaces
//! crossing it is a single record, and a structural change moves and
//! notifies each unit exactly once.
//!
//! # Containers
//!
//! - [`Line`]: units along one axis; insert and remove single units.
//! - [`Surface`]: two orthogonal line families; insert and remove lines.
//! - [`Volume`]: three line families and three cross-section lists;
//!   insert and remove whole cross-sections.
//!
//! Borrowed [`LineView`] and [`SurfaceView`] values give read-only access
//! to the lines and cross-sections of a container.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod lattice;
mod plane;
mod slab;

pub mod line;
pub mod surface;
pub mod unit;
pub mod view;
pub mod volume;

pub use line::Line;
pub use surface::Surface;
pub use unit::Unit;
pub use view::{LineView, SurfaceView};
pub use volume::Volume;
