#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EngineConfig;
use crate::consts::DELETE_OFFSET_PX;
use crate::input::Cursor;
use crate::registry::{Bounds, ObjectId, Registry};
use crate::viewport::{Point, Viewport};

/// Which part of a placed image was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    DeleteHandle,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 8] = [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Resize cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::N | Self::S => Cursor::NsResize,
            Self::E | Self::W => Cursor::EwResize,
            Self::Ne | Self::Sw => Cursor::NeswResize,
            Self::Nw | Self::Se => Cursor::NwseResize,
        }
    }

    /// Canvas-space location of this handle on `bounds`.
    #[must_use]
    pub fn point_on(self, bounds: &Bounds) -> Point {
        let x = if self.moves_left() {
            bounds.left()
        } else if self.moves_right() {
            bounds.right()
        } else {
            bounds.center.x
        };
        let y = if self.moves_top() {
            bounds.top()
        } else if self.moves_bottom() {
            bounds.bottom()
        } else {
            bounds.center.y
        };
        Point::new(x, y)
    }
}

/// Canvas-space center of the delete control: on the right edge, a fixed
/// screen distance above the top-right corner.
#[must_use]
pub fn delete_handle_point(bounds: &Bounds, viewport: &Viewport) -> Point {
    Point::new(bounds.right(), bounds.top() - viewport.screen_dist_to_canvas(DELETE_OFFSET_PX))
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Test which image (if any) is under `canvas_pt`.
///
/// The selected image's handles are checked first, delete before resize, then
/// image bodies from the top of the draw order down. Images whose asset has
/// not loaded are invisible and never hit.
#[must_use]
pub fn hit_test(
    canvas_pt: Point,
    registry: &Registry,
    viewport: &Viewport,
    selected: Option<ObjectId>,
    config: &EngineConfig,
) -> Option<Hit> {
    if let Some(id) = selected {
        if let Some(bounds) = registry.bounds(&id) {
            if let Some(part) = hit_handles(canvas_pt, &bounds, viewport, config) {
                return Some(Hit { object_id: id, part });
            }
        }
    }

    registry
        .iter()
        .rev()
        .find(|r| r.bounds().is_some_and(|b| b.contains(canvas_pt)))
        .map(|r| Hit { object_id: r.id, part: HitPart::Body })
}

fn hit_handles(canvas_pt: Point, bounds: &Bounds, viewport: &Viewport, config: &EngineConfig) -> Option<HitPart> {
    let delete_r = viewport.screen_dist_to_canvas(config.delete_radius_px);
    if distance(canvas_pt, delete_handle_point(bounds, viewport)) <= delete_r {
        return Some(HitPart::DeleteHandle);
    }

    let handle_r = viewport.screen_dist_to_canvas(config.handle_radius_px);
    ResizeAnchor::ALL
        .into_iter()
        .find(|a| distance(canvas_pt, a.point_on(bounds)) <= handle_r)
        .map(HitPart::ResizeHandle)
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
