//! Shared numeric constants for the drop board.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a placed image may have, in canvas units.
pub const MIN_IMAGE_SIZE: f64 = 5.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Multiplicative step applied per wheel notch.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Lowest scale the wheel can reach.
pub const ZOOM_MIN: f64 = 0.05;

/// Highest scale the wheel can reach.
pub const ZOOM_MAX: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit radius in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Screen-space radius in pixels of the delete control.
pub const DELETE_RADIUS_PX: f64 = 8.0;

/// Distance from the top-right corner up to the delete control, in screen pixels.
pub const DELETE_OFFSET_PX: f64 = 24.0;
