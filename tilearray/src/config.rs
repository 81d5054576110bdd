//! `tilearray` global configuration options.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global configuration options for the `tilearray` crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
///
/// ## Validate Tile Bounds
/// > default: [`true`]
///
/// If enabled, tiles are checked against the array shape before a backend is called and tiles outside the array fail with [`RangeError`](crate::ArrayHandleError::RangeError).
/// Otherwise, bound checking is left to the backend.
/// Out of bounds errors reported by a backend are always translated to [`RangeError`](crate::ArrayHandleError::RangeError).
///
/// ## Log Partial Regions
/// > default: [`true`]
///
/// If enabled, a debug message is logged when a Zarr V3 region read returns a region with a different shape to the requested tile.
#[derive(Debug)]
pub struct Config {
    validate_tile_bounds: bool,
    log_partial_regions: bool,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Config {
            validate_tile_bounds: true,
            log_partial_regions: true,
        }
    }
}

impl Config {
    /// Get the [validate tile bounds](#validate-tile-bounds) configuration.
    #[must_use]
    pub fn validate_tile_bounds(&self) -> bool {
        self.validate_tile_bounds
    }

    /// Set the [validate tile bounds](#validate-tile-bounds) configuration.
    pub fn set_validate_tile_bounds(&mut self, validate_tile_bounds: bool) {
        if !validate_tile_bounds {
            log::warn!("tile bound validation disabled, relying on backend bound checks");
        }
        self.validate_tile_bounds = validate_tile_bounds;
    }

    /// Get the [log partial regions](#log-partial-regions) configuration.
    #[must_use]
    pub fn log_partial_regions(&self) -> bool {
        self.log_partial_regions
    }

    /// Set the [log partial regions](#log-partial-regions) configuration.
    pub fn set_log_partial_regions(&mut self, log_partial_regions: bool) {
        self.log_partial_regions = log_partial_regions;
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global `tilearray` configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
        .unwrap()
}

/// Returns a mutable reference to the global `tilearray` configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn config_validate_tile_bounds() {
        assert!(global_config().validate_tile_bounds());
        global_config_mut().set_validate_tile_bounds(false);
        assert!(!global_config().validate_tile_bounds());
        global_config_mut().set_validate_tile_bounds(true);
    }

    #[test]
    #[serial]
    fn config_log_partial_regions() {
        assert!(global_config().log_partial_regions());
        global_config_mut().set_log_partial_regions(false);
        assert!(!global_config().log_partial_regions());
        global_config_mut().set_log_partial_regions(true);
    }
}
