#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom state mapping canvas space onto the screen.
///
/// `screen = canvas * scale + offset`. `offset` is in CSS pixels and
/// `scale` is a uniform factor (1.0 = no zoom), always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset: Point::new(0.0, 0.0), scale: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.offset.x,
            y: canvas.y * self.scale + self.offset.y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Zoom one step about `pointer`, keeping the canvas point under it fixed.
    ///
    /// A negative `direction` zooms in (`scale * factor`); anything else
    /// zooms out (`scale / factor`).
    #[must_use]
    pub fn apply_zoom(&self, pointer: Point, direction: f64, factor: f64) -> Self {
        let new_scale = if direction < 0.0 { self.scale * factor } else { self.scale / factor };
        self.rescaled_about(pointer, new_scale)
    }

    /// Clamp `scale` into `[min, max]`, keeping the canvas point under
    /// `pointer` fixed. Returns `self` unchanged when already in range.
    #[must_use]
    pub fn clamp_zoom(&self, pointer: Point, min: f64, max: f64) -> Self {
        if (min..=max).contains(&self.scale) {
            return *self;
        }
        self.rescaled_about(pointer, self.scale.clamp(min, max))
    }

    /// Translate the viewport by a screen-space delta.
    #[must_use]
    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            offset: Point::new(self.offset.x + dx, self.offset.y + dy),
            scale: self.scale,
        }
    }

    fn rescaled_about(&self, pointer: Point, new_scale: f64) -> Self {
        let anchor = self.screen_to_canvas(pointer);
        Self {
            offset: Point::new(pointer.x - anchor.x * new_scale, pointer.y - anchor.y * new_scale),
            scale: new_scale,
        }
    }
}
