//! Grid configuration parameters.

use crate::error::GridError;

/// Configuration shared by Line, Surface and Volume.
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Largest extent any axis of the container may reach.
    ///
    /// Default: `i32::MAX`, since coordinates are `i32`. Growth beyond
    /// this is rejected with [`GridError::ExtentTooLarge`].
    pub max_extent: u32,
}

impl GridConfig {
    /// Default maximum extent per axis.
    pub const DEFAULT_MAX_EXTENT: u32 = i32::MAX as u32;

    /// Create a config with the default maximum extent.
    pub fn new() -> Self {
        Self {
            max_extent: Self::DEFAULT_MAX_EXTENT,
        }
    }

    /// Create a config with a custom maximum extent, clamped to what an
    /// `i32` coordinate can address.
    pub fn with_max_extent(max_extent: u32) -> Self {
        Self {
            max_extent: max_extent.min(Self::DEFAULT_MAX_EXTENT),
        }
    }

    /// Reject `value` if it exceeds [`max_extent`](Self::max_extent).
    pub fn check_extent(&self, name: &'static str, value: usize) -> Result<(), GridError> {
        if value > self.max_extent as usize {
            return Err(GridError::ExtentTooLarge {
                name,
                value,
                max: self.max_extent,
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fits_i32_coordinates() {
        let config = GridConfig::default();
        assert_eq!(config.max_extent, i32::MAX as u32);
    }

    #[test]
    fn custom_max_is_enforced() {
        let config = GridConfig::with_max_extent(4);
        assert!(config.check_extent("width", 4).is_ok());
        assert_eq!(
            config.check_extent("width", 5),
            Err(GridError::ExtentTooLarge {
                name: "width",
                value: 5,
                max: 4
            })
        );
    }

    #[test]
    fn custom_max_is_clamped() {
        let config = GridConfig::with_max_extent(u32::MAX);
        assert_eq!(config.max_extent, GridConfig::DEFAULT_MAX_EXTENT);
    }
}
