//! Engine tunables.
//!
//! Every field has a default matching the stock board behavior. The host
//! can override them from JSON (e.g. a `data-config` attribute) or, in native
//! builds, from `DROPBOARD_*` environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DELETE_RADIUS_PX, HANDLE_RADIUS_PX, MIN_IMAGE_SIZE, ZOOM_FACTOR, ZOOM_MAX, ZOOM_MIN};
use crate::error::CanvasError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scale multiplier per wheel notch. Must be greater than 1.
    pub zoom_factor: f64,
    /// Floor for placed-image width and height, in canvas units.
    pub min_size: f64,
    /// Lowest reachable viewport scale.
    pub min_scale: f64,
    /// Highest reachable viewport scale.
    pub max_scale: f64,
    /// Resize handle hit radius in screen pixels.
    pub handle_radius_px: f64,
    /// Delete control radius in screen pixels.
    pub delete_radius_px: f64,
    /// Corner handles preserve the aspect ratio (shift inverts).
    pub keep_ratio: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_FACTOR,
            min_size: MIN_IMAGE_SIZE,
            min_scale: ZOOM_MIN,
            max_scale: ZOOM_MAX,
            handle_radius_px: HANDLE_RADIUS_PX,
            delete_radius_px: DELETE_RADIUS_PX,
            keep_ratio: true,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON object; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed JSON and `InvalidConfig` if the
    /// parsed values fail [`EngineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from `DROPBOARD_*` environment variables. Unset or
    /// unparsable variables fall back to the default for that key.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            zoom_factor: env_parse("DROPBOARD_ZOOM_FACTOR", defaults.zoom_factor),
            min_size: env_parse("DROPBOARD_MIN_SIZE", defaults.min_size),
            min_scale: env_parse("DROPBOARD_MIN_SCALE", defaults.min_scale),
            max_scale: env_parse("DROPBOARD_MAX_SCALE", defaults.max_scale),
            handle_radius_px: env_parse("DROPBOARD_HANDLE_RADIUS_PX", defaults.handle_radius_px),
            delete_radius_px: env_parse("DROPBOARD_DELETE_RADIUS_PX", defaults.delete_radius_px),
            keep_ratio: env_parse("DROPBOARD_KEEP_RATIO", defaults.keep_ratio),
        }
    }

    /// Check that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(CanvasError::InvalidConfig(format!("zoom_factor must be > 1, got {}", self.zoom_factor)));
        }
        if !(self.min_size.is_finite() && self.min_size > 0.0) {
            return Err(CanvasError::InvalidConfig(format!("min_size must be > 0, got {}", self.min_size)));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(CanvasError::InvalidConfig(format!("min_scale must be > 0, got {}", self.min_scale)));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(CanvasError::InvalidConfig(format!(
                "max_scale must be >= min_scale ({}), got {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.handle_radius_px < 0.0 || self.delete_radius_px < 0.0 {
            return Err(CanvasError::InvalidConfig("handle radii must be non-negative".into()));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
