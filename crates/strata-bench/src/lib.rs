//! Benchmark profiles and utilities for the Strata hierarchical grid.
//!
//! Provides pre-built containers for benchmarking:
//!
//! - [`reference_volume`]: 16x16x16 volume (4K units), fully populated
//! - [`stress_volume`]: 40x40x40 volume (64K units), fully populated
//! - [`populated_surface`] and [`populated_line`] for the smaller containers

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_core::{Axis, Element, GridError, UnitRef};
use strata_grid::{Line, Surface, Volume};

/// Minimal benchmark element: remembers its unit and counts moves.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    /// Back-reference to the holding unit.
    pub unit: Option<UnitRef>,
    /// Shift hooks received.
    pub shifts: u32,
}

impl Element for Tally {
    fn set_unit(&mut self, unit: UnitRef) {
        self.unit = Some(unit);
    }

    fn on_shift(&mut self) {
        self.shifts += 1;
    }
}

/// A cubic volume of side `side`, every unit holding a [`Tally`].
pub fn populated_volume(side: usize) -> Result<Volume<Tally>, GridError> {
    let mut volume = Volume::new(side, side, side)?;
    volume.create_volume(Box::new(Tally::default))?;
    Ok(volume)
}

/// Reference profile: 16x16x16 volume (4096 units).
pub fn reference_volume() -> Result<Volume<Tally>, GridError> {
    populated_volume(16)
}

/// Stress profile: 40x40x40 volume (64000 units).
pub fn stress_volume() -> Result<Volume<Tally>, GridError> {
    populated_volume(40)
}

/// A square surface of side `side` normal to `normal`, fully populated.
pub fn populated_surface(side: usize, normal: Axis) -> Result<Surface<Tally>, GridError> {
    let mut surface = Surface::new(side, side, normal)?;
    surface.create_surface(Box::new(Tally::default))?;
    Ok(surface)
}

/// A line of `length` units along X, fully populated.
pub fn populated_line(length: usize) -> Result<Line<Tally>, GridError> {
    let mut line = Line::new(length, Axis::X)?;
    line.create_line(Box::new(Tally::default))?;
    Ok(line)
}
