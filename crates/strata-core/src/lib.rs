//! Core types and traits for the Strata hierarchical grid.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every container in the workspace: axes and
//! the coordinate-system tables, identifiers and handles, the element
//! capability contract, error types and configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod coord;
pub mod element;
pub mod error;
pub mod id;

pub use axis::Axis;
pub use config::GridConfig;
pub use coord::Coord;
pub use element::{Dimension, Element, Factory, Owner, UnitRef};
pub use error::GridError;
pub use id::{ContainerId, Handle, LineId, UnitId};
